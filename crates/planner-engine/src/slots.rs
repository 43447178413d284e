//! Scheduling suggestions for a preferred slot that may be taken.
//!
//! The finder is a prioritized generate-and-filter, not an optimizer:
//!
//! 1. the preferred slot itself, if free;
//! 2. the same day, shifted by up to ±3 hours, inside business hours;
//! 3. the same time on the next day;
//! 4. a few fixed hours on each of the following days, decaying with
//!    distance.
//!
//! Every candidate is placed with wall-clock arithmetic in the caller's
//! time zone ("set the hour to 14 on that date"), so DST transitions shift
//! the UTC instant rather than the local hour.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, at_wall_clock, format_short_date};
use crate::conflict::has_conflict;
use crate::interval::TimeInterval;

pub const REASON_PREFERRED: &str = "Preferred time is available";
pub const REASON_SAME_DAY: &str = "Alternative time on the same day";
pub const REASON_NEXT_DAY: &str = "Same time tomorrow";

/// Upper bound on the lookahead; larger requests are clamped to it.
pub const MAX_DAYS_TO_CHECK: u32 = 366;

/// Tuning knobs for the slot finder. The defaults are the pinned heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotFinderConfig {
    /// Earliest start hour for same-day alternatives.
    pub business_start_hour: u32,
    /// Latest end hour for same-day alternatives.
    pub business_end_hour: u32,
    /// Same-day alternatives are tried this many hours either side.
    pub same_day_range_hours: i64,
    /// Hours tried on each lookahead day, always at minute zero.
    pub common_hours: Vec<u32>,
    pub preferred_confidence: f64,
    pub same_day_confidence: f64,
    pub next_day_confidence: f64,
    pub lookahead_base_confidence: f64,
    /// Subtracted from the base once per day of distance.
    pub lookahead_daily_decay: f64,
    pub max_suggestions: usize,
    pub default_duration_minutes: i64,
    pub default_days_to_check: u32,
}

impl Default for SlotFinderConfig {
    fn default() -> Self {
        Self {
            business_start_hour: 8,
            business_end_hour: 20,
            same_day_range_hours: 3,
            common_hours: vec![9, 10, 14, 15],
            preferred_confidence: 1.0,
            same_day_confidence: 0.8,
            next_day_confidence: 0.7,
            lookahead_base_confidence: 0.6,
            lookahead_daily_decay: 0.05,
            max_suggestions: 5,
            default_duration_minutes: 60,
            default_days_to_check: 7,
        }
    }
}

/// A candidate slot with a human-readable reason and a heuristic score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingSuggestion {
    #[serde(rename = "suggestedTime")]
    pub suggested_time: TimeInterval,
    pub reason: String,
    pub confidence: f64,
}

impl SchedulingSuggestion {
    fn new(suggested_time: TimeInterval, reason: impl Into<String>, confidence: f64) -> Self {
        Self {
            suggested_time,
            reason: reason.into(),
            confidence,
        }
    }
}

/// Finds free slots near a preferred time, in one time zone.
#[derive(Debug, Clone)]
pub struct SlotFinder {
    tz: Tz,
    config: SlotFinderConfig,
}

impl SlotFinder {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            config: SlotFinderConfig::default(),
        }
    }

    pub fn with_config(tz: Tz, config: SlotFinderConfig) -> Self {
        Self { tz, config }
    }

    pub fn config(&self) -> &SlotFinderConfig {
        &self.config
    }

    /// Suggest up to `max_suggestions` slots of `duration_minutes` around
    /// `preferred`, highest confidence first.
    ///
    /// `existing` should already be limited to the lookahead window; it is
    /// not filtered again here. An empty result means nothing was free.
    /// `days_to_check` is clamped to [`MAX_DAYS_TO_CHECK`]; candidates whose
    /// end would overflow the representable range are skipped.
    pub fn find_available_slots(
        &self,
        existing: &[TimeInterval],
        preferred: &TimeInterval,
        duration_minutes: i64,
        days_to_check: u32,
    ) -> Vec<SchedulingSuggestion> {
        let local_start = preferred.start.with_timezone(&self.tz);
        let date = local_start.date_naive();
        let hour = local_start.hour() as i64;
        let minute = local_start.minute() as i64;

        let mut suggestions = Vec::new();

        if !has_conflict(existing, preferred) {
            suggestions.push(SchedulingSuggestion::new(
                *preferred,
                REASON_PREFERRED,
                self.config.preferred_confidence,
            ));
        }

        suggestions.extend(self.same_day(existing, date, hour, minute, duration_minutes));

        if let Some(tomorrow) = self.slot(add_days(date, 1), hour, minute, duration_minutes) {
            if !has_conflict(existing, &tomorrow) {
                suggestions.push(SchedulingSuggestion::new(
                    tomorrow,
                    REASON_NEXT_DAY,
                    self.config.next_day_confidence,
                ));
            }
        }

        let days_to_check = days_to_check.min(MAX_DAYS_TO_CHECK);
        suggestions.extend(self.lookahead(existing, date, duration_minutes, days_to_check));

        let generated = suggestions.len();
        // Vec::sort_by is stable: equal scores keep generation order.
        suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        suggestions.truncate(self.config.max_suggestions);

        tracing::debug!(
            existing = existing.len(),
            generated,
            returned = suggestions.len(),
            "found available slots"
        );
        suggestions
    }

    /// Shifted candidates on the preferred date. Only events starting on
    /// that local date are considered busy.
    fn same_day(
        &self,
        existing: &[TimeInterval],
        date: NaiveDate,
        hour: i64,
        minute: i64,
        duration_minutes: i64,
    ) -> Vec<SchedulingSuggestion> {
        let day_events: Vec<TimeInterval> = existing
            .iter()
            .filter(|e| e.start.with_timezone(&self.tz).date_naive() == date)
            .copied()
            .collect();

        let range = self.config.same_day_range_hours;
        (-range..=range)
            .filter(|offset| *offset != 0)
            .filter_map(|offset| self.slot(date, hour + offset, minute, duration_minutes))
            .filter(|slot| self.within_business_hours(slot))
            .filter(|slot| !has_conflict(&day_events, slot))
            .map(|slot| {
                SchedulingSuggestion::new(slot, REASON_SAME_DAY, self.config.same_day_confidence)
            })
            .collect()
    }

    /// Fixed-hour candidates on each of the next `days_to_check` days. The
    /// end time is not held to business hours here.
    fn lookahead(
        &self,
        existing: &[TimeInterval],
        date: NaiveDate,
        duration_minutes: i64,
        days_to_check: u32,
    ) -> Vec<SchedulingSuggestion> {
        let mut found = Vec::new();
        for offset in 1..=days_to_check as i64 {
            let day = add_days(date, offset);
            let confidence = self.config.lookahead_base_confidence
                - self.config.lookahead_daily_decay * offset as f64;
            for &common in &self.config.common_hours {
                let Some(slot) = self.slot(day, common as i64, 0, duration_minutes) else {
                    continue;
                };
                if has_conflict(existing, &slot) {
                    continue;
                }
                let reason = format!("Available at {}:00 on {}", common, format_short_date(day));
                found.push(SchedulingSuggestion::new(slot, reason, confidence));
            }
        }
        found
    }

    /// `None` when the end is out of range.
    fn slot(
        &self,
        date: NaiveDate,
        hour: i64,
        minute: i64,
        duration_minutes: i64,
    ) -> Option<TimeInterval> {
        let start: DateTime<Utc> = at_wall_clock(&self.tz, date, hour, minute).with_timezone(&Utc);
        let end = Duration::try_minutes(duration_minutes)
            .and_then(|d| start.checked_add_signed(d))?;
        Some(TimeInterval::new(start, end))
    }

    fn within_business_hours(&self, slot: &TimeInterval) -> bool {
        let start_hour = slot.start.with_timezone(&self.tz).hour();
        let end_hour = slot.end.with_timezone(&self.tz).hour();
        start_hour >= self.config.business_start_hour && end_hour <= self.config.business_end_hour
    }
}

/// [`SlotFinder::find_available_slots`] with the default configuration.
pub fn find_available_slots(
    tz: Tz,
    existing: &[TimeInterval],
    preferred: &TimeInterval,
    duration_minutes: i64,
    days_to_check: u32,
) -> Vec<SchedulingSuggestion> {
    SlotFinder::new(tz).find_available_slots(existing, preferred, duration_minutes, days_to_check)
}
