//! The extraction rule chain.
//!
//! Each rule reads the *unmodified* input and writes into a shared
//! [`Extraction`]. Rules run in a fixed order; inside a rule, keyword
//! classes are tried in order and the first class that matches wins,
//! regardless of where in the text the other classes would match.

use chrono::{DateTime, Datelike, Duration, NaiveDate};
use chrono_tz::Tz;
use regex::{Captures, Regex};

use super::patterns::*;
use super::Priority;
use crate::calendar::{add_days, add_months, at_wall_clock, days_until_next, parse_weekday};
use crate::recurrence::{Frequency, RecurrenceRule};

/// A detected date keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateHit {
    /// A relative keyword resolved to a concrete local date.
    Resolved(NaiveDate),
    /// "on Friday" / "in 3 days": recognised but left at the anchor date.
    Unresolved,
}

/// Whether the draft is an event. Can be raised, never lowered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct EventFlag(bool);

impl EventFlag {
    pub(crate) fn raise(&mut self) {
        self.0 = true;
    }

    pub(crate) fn is_set(self) -> bool {
        self.0
    }
}

/// Everything the rules found, before it is folded into a draft.
#[derive(Debug, Default)]
pub(crate) struct Extraction {
    pub(crate) date: Option<DateHit>,
    pub(crate) start: Option<DateTime<Tz>>,
    pub(crate) recurrence: Option<RecurrenceRule>,
    pub(crate) location: Option<String>,
    pub(crate) priority: Option<Priority>,
    pub(crate) event: EventFlag,
}

/// One step of the parse.
pub(crate) trait ExtractionRule: Sync {
    fn name(&self) -> &'static str;

    /// Inspect `input` and record findings in `acc`.
    fn extract(&self, input: &str, now: &DateTime<Tz>, acc: &mut Extraction);

    /// Patterns whose matches are removed from the title.
    fn patterns(&self) -> Vec<&'static Regex>;
}

/// The chain, in evaluation order.
pub(crate) static RULES: [&dyn ExtractionRule; 5] = [
    &DateRule,
    &ClockTimeRule,
    &RepeatRule,
    &LocationRule,
    &PriorityRule,
];

// ── Dates ───────────────────────────────────────────────────────────────────

pub(crate) struct DateRule;

type DateExtractor = fn(&Captures<'_>, &DateTime<Tz>) -> DateHit;

impl DateRule {
    fn classes() -> [(&'static Regex, DateExtractor); 3] {
        [
            (&*RELATIVE_DATE, resolve_relative_date),
            (&*NAMED_WEEKDAY_DATE, detected_only),
            (&*OFFSET_DATE, detected_only),
        ]
    }
}

fn detected_only(_: &Captures<'_>, _: &DateTime<Tz>) -> DateHit {
    DateHit::Unresolved
}

fn resolve_relative_date(caps: &Captures<'_>, now: &DateTime<Tz>) -> DateHit {
    let today = now.date_naive();
    let keyword = caps["keyword"].to_lowercase();

    let weekday = caps.name("weekday").and_then(|m| parse_weekday(m.as_str()));

    let date = if let Some(weekday) = weekday {
        add_days(today, days_until_next(today.weekday(), weekday))
    } else if keyword == "tomorrow" {
        add_days(today, 1)
    } else if keyword == "today" {
        today
    } else if keyword.ends_with("week") {
        add_days(today, 7)
    } else {
        add_months(today, 1)
    };

    DateHit::Resolved(date)
}

impl ExtractionRule for DateRule {
    fn name(&self) -> &'static str {
        "date"
    }

    fn extract(&self, input: &str, now: &DateTime<Tz>, acc: &mut Extraction) {
        for (pattern, extractor) in Self::classes() {
            if let Some(caps) = pattern.captures(input) {
                let hit = extractor(&caps, now);
                tracing::debug!(rule = self.name(), matched = &caps[0], ?hit, "date keyword");
                acc.date = Some(hit);
                return;
            }
        }
    }

    fn patterns(&self) -> Vec<&'static Regex> {
        vec![&*RELATIVE_DATE, &*NAMED_WEEKDAY_DATE, &*OFFSET_DATE]
    }
}

// ── Clock times ─────────────────────────────────────────────────────────────

pub(crate) struct ClockTimeRule;

impl ClockTimeRule {
    /// The textually first clock-time match across both time patterns.
    fn first_match<'t>(input: &'t str) -> Option<Captures<'t>> {
        [&*CLOCK_TIME, &*ANCHORED_CLOCK_TIME]
            .into_iter()
            .filter_map(|pattern| pattern.captures(input))
            .min_by_key(|caps| caps.get(0).map_or(usize::MAX, |m| m.start()))
    }
}

/// 12-hour to 24-hour: 12am is 0, 12pm stays 12, other pm hours gain 12.
pub(crate) fn to_24_hour(hour: i64, meridiem: Option<&str>) -> i64 {
    match meridiem.map(str::to_lowercase).as_deref() {
        Some("pm") if hour != 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        _ => hour,
    }
}

impl ExtractionRule for ClockTimeRule {
    fn name(&self) -> &'static str {
        "clock_time"
    }

    fn extract(&self, input: &str, now: &DateTime<Tz>, acc: &mut Extraction) {
        let Some(caps) = Self::first_match(input) else {
            return;
        };
        let Some(hour) = caps.name("hour").and_then(|m| m.as_str().parse::<i64>().ok()) else {
            return;
        };
        let minute = caps
            .name("minute")
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .unwrap_or(0);
        let hour = to_24_hour(hour, caps.name("meridiem").map(|m| m.as_str()));

        let base = match acc.date {
            Some(DateHit::Resolved(date)) => date,
            _ => now.date_naive(),
        };
        let start = at_wall_clock(&now.timezone(), base, hour, minute);

        tracing::debug!(rule = self.name(), matched = &caps[0], %start, "clock time");
        acc.start = Some(start);
        acc.event.raise();
    }

    fn patterns(&self) -> Vec<&'static Regex> {
        vec![&*CLOCK_TIME, &*ANCHORED_CLOCK_TIME]
    }
}

/// End of an event that starts at `start`: exactly one hour later.
pub(crate) fn default_end(start: &DateTime<Tz>) -> DateTime<Tz> {
    *start + Duration::hours(1)
}

// ── Recurrence ──────────────────────────────────────────────────────────────

pub(crate) struct RepeatRule;

type RepeatExtractor = fn(&Captures<'_>) -> Option<RecurrenceRule>;

impl RepeatRule {
    fn classes() -> [(&'static Regex, RepeatExtractor); 4] {
        [
            (&*DAILY, daily),
            (&*WEEKLY, weekly),
            (&*MONTHLY, monthly),
            (&*WEEKDAY_REPEAT, on_weekday),
        ]
    }
}

fn daily(_: &Captures<'_>) -> Option<RecurrenceRule> {
    Some(RecurrenceRule::new(Frequency::Daily))
}

fn weekly(_: &Captures<'_>) -> Option<RecurrenceRule> {
    Some(RecurrenceRule::new(Frequency::Weekly))
}

fn monthly(_: &Captures<'_>) -> Option<RecurrenceRule> {
    Some(RecurrenceRule::new(Frequency::Monthly))
}

fn on_weekday(caps: &Captures<'_>) -> Option<RecurrenceRule> {
    parse_weekday(&caps["weekday"]).map(RecurrenceRule::weekly_on)
}

impl ExtractionRule for RepeatRule {
    fn name(&self) -> &'static str {
        "recurrence"
    }

    fn extract(&self, input: &str, _now: &DateTime<Tz>, acc: &mut Extraction) {
        let found = Self::classes().into_iter().find_map(|(pattern, extractor)| {
            pattern.captures(input).and_then(|caps| extractor(&caps))
        });
        let Some(mut rule) = found else {
            return;
        };

        // A named weekday narrows a plain weekly rule ("weekly review every
        // Friday"); it never changes the frequency.
        if rule.frequency == Frequency::Weekly && rule.by_day.is_none() {
            rule.by_day = WEEKDAY_REPEAT
                .captures(input)
                .and_then(|caps| parse_weekday(&caps["weekday"]));
        }

        tracing::debug!(rule = self.name(), rrule = %rule, "recurrence");
        acc.recurrence = Some(rule);
    }

    fn patterns(&self) -> Vec<&'static Regex> {
        vec![&*DAILY, &*WEEKLY, &*MONTHLY, &*WEEKDAY_REPEAT]
    }
}

// ── Location ────────────────────────────────────────────────────────────────

pub(crate) struct LocationRule;

impl ExtractionRule for LocationRule {
    fn name(&self) -> &'static str {
        "location"
    }

    fn extract(&self, input: &str, _now: &DateTime<Tz>, acc: &mut Extraction) {
        let place = LOCATION
            .captures(input)
            .and_then(|caps| caps.name("place").map(|m| m.as_str().trim().to_string()))
            .filter(|place| !place.is_empty());

        if let Some(place) = place {
            tracing::debug!(rule = self.name(), %place, "location");
            acc.location = Some(place);
            acc.event.raise();
        }
    }

    fn patterns(&self) -> Vec<&'static Regex> {
        vec![&*LOCATION]
    }
}

// ── Priority ────────────────────────────────────────────────────────────────

pub(crate) struct PriorityRule;

impl ExtractionRule for PriorityRule {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn extract(&self, input: &str, _now: &DateTime<Tz>, acc: &mut Extraction) {
        let classes: [(&Regex, Priority); 2] = [
            (&*HIGH_PRIORITY, Priority::High),
            (&*LOW_PRIORITY, Priority::Low),
        ];
        if let Some((_, priority)) = classes.iter().find(|(pattern, _)| pattern.is_match(input)) {
            tracing::debug!(rule = self.name(), ?priority, "priority");
            acc.priority = Some(*priority);
        }
    }

    fn patterns(&self) -> Vec<&'static Regex> {
        vec![&*HIGH_PRIORITY, &*LOW_PRIORITY]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike, Weekday};

    fn now() -> DateTime<Tz> {
        // Monday, October 19 2026, 10:15 in New York
        let tz: Tz = "America/New_York".parse().unwrap();
        tz.with_ymd_and_hms(2026, 10, 19, 10, 15, 0).unwrap()
    }

    fn run(rule: &dyn ExtractionRule, input: &str) -> Extraction {
        let mut acc = Extraction::default();
        rule.extract(input, &now(), &mut acc);
        acc
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_event_flag_only_rises() {
        let mut flag = EventFlag::default();
        assert!(!flag.is_set());
        flag.raise();
        flag.raise();
        assert!(flag.is_set());
    }

    #[test]
    fn test_date_relative_keywords() {
        let cases = [
            ("do it today", ymd(2026, 10, 19)),
            ("do it tomorrow", ymd(2026, 10, 20)),
            ("do it next week", ymd(2026, 10, 26)),
            ("do it next month", ymd(2026, 11, 19)),
            ("do it next Wednesday", ymd(2026, 10, 21)),
            ("do it next monday", ymd(2026, 10, 26)),
            ("do it next Sunday", ymd(2026, 10, 25)),
        ];
        for (input, expected) in cases {
            assert_eq!(run(&DateRule, input).date, Some(DateHit::Resolved(expected)), "{input}");
        }
    }

    #[test]
    fn test_date_class_order_beats_text_position() {
        // "on Friday" appears first, but relative keywords are checked first.
        let acc = run(&DateRule, "on Friday or tomorrow");
        assert_eq!(acc.date, Some(DateHit::Resolved(ymd(2026, 10, 20))));
    }

    #[test]
    fn test_date_detected_but_unresolved() {
        assert_eq!(run(&DateRule, "call on Friday").date, Some(DateHit::Unresolved));
        assert_eq!(run(&DateRule, "this thursday").date, Some(DateHit::Unresolved));
        assert_eq!(run(&DateRule, "follow up in 3 days").date, Some(DateHit::Unresolved));
        assert_eq!(run(&DateRule, "buy milk").date, None);
    }

    #[test]
    fn test_to_24_hour() {
        assert_eq!(to_24_hour(12, Some("am")), 0);
        assert_eq!(to_24_hour(12, Some("PM")), 12);
        assert_eq!(to_24_hour(1, Some("pm")), 13);
        assert_eq!(to_24_hour(9, Some("am")), 9);
        assert_eq!(to_24_hour(17, None), 17);
    }

    #[test]
    fn test_clock_time_uses_first_textual_match() {
        let acc = run(&ClockTimeRule, "call at 9am then at 3pm");
        let start = acc.start.unwrap();
        assert_eq!(start.hour(), 9);
        assert!(acc.event.is_set());
    }

    #[test]
    fn test_clock_time_ignores_non_ascii_digit_run() {
        // Arabic-Indic "12" comes first in the text but is not a clock time.
        let acc = run(&ClockTimeRule, "Room \u{0661}\u{0662} sync at 3pm");
        let start = acc.start.unwrap();
        assert_eq!((start.hour(), start.minute()), (15, 0));
        assert!(acc.event.is_set());
    }

    #[test]
    fn test_clock_time_anchors_to_resolved_date() {
        let mut acc = Extraction {
            date: Some(DateHit::Resolved(ymd(2026, 10, 20))),
            ..Default::default()
        };
        ClockTimeRule.extract("tomorrow at 1:45pm", &now(), &mut acc);
        let start = acc.start.unwrap();
        assert_eq!(start.date_naive(), ymd(2026, 10, 20));
        assert_eq!((start.hour(), start.minute(), start.second()), (13, 45, 0));
    }

    #[test]
    fn test_default_end_is_one_hour_later() {
        let start = now();
        let end = default_end(&start);
        assert_eq!(end - start, Duration::hours(1));
    }

    #[test]
    fn test_default_end_across_fall_back() {
        // 01:30 happens twice on Nov 1 2026; the start is the first one.
        let tz: Tz = "America/New_York".parse().unwrap();
        let start = tz.with_ymd_and_hms(2026, 11, 1, 1, 30, 0).earliest().unwrap();
        let end = default_end(&start);
        assert_eq!(end - start, Duration::hours(1));
        assert_eq!((end.hour(), end.minute()), (1, 30));
    }

    #[test]
    fn test_repeat_class_order() {
        let rule = |s: &str| run(&RepeatRule, s).recurrence.map(|r| r.to_string());
        assert_eq!(rule("standup every day").as_deref(), Some("FREQ=DAILY"));
        assert_eq!(rule("standup daily on Mondays").as_deref(), Some("FREQ=DAILY"));
        assert_eq!(rule("pay rent monthly").as_deref(), Some("FREQ=MONTHLY"));
        assert_eq!(rule("gym on Tuesdays").as_deref(), Some("FREQ=WEEKLY;BYDAY=TU"));
        assert_eq!(rule("weekly sync").as_deref(), Some("FREQ=WEEKLY"));
        assert_eq!(rule("Weekly review every Friday").as_deref(), Some("FREQ=WEEKLY;BYDAY=FR"));
        assert_eq!(rule("see you Friday"), None);
    }

    #[test]
    fn test_repeat_weekday_code() {
        let acc = run(&RepeatRule, "every Saturday");
        assert_eq!(acc.recurrence.unwrap().by_day, Some(Weekday::Sat));
    }

    #[test]
    fn test_location_raises_event() {
        let acc = run(&LocationRule, "Coffee at Blue Bottle tomorrow");
        assert_eq!(acc.location.as_deref(), Some("Blue Bottle"));
        assert!(acc.event.is_set());
    }

    #[test]
    fn test_priority_high_wins_over_low() {
        assert_eq!(run(&PriorityRule, "whenever, but urgent").priority, Some(Priority::High));
        assert_eq!(run(&PriorityRule, "low priority chores").priority, Some(Priority::Low));
        assert_eq!(run(&PriorityRule, "ASAP").priority, Some(Priority::High));
        assert_eq!(run(&PriorityRule, "water plants").priority, None);
    }
}
