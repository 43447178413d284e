//! Recurrence rules in the compact `FREQ=<F>[;BYDAY=<XX>]` subset.
//!
//! The parser only ever emits this subset. [`RecurrenceRule::expand`] hands
//! it to the `rrule` crate so downstream consumers can see concrete
//! occurrences.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::{byday_code, weekday_from_code};
use crate::error::PlannerError;

/// Hard cap on occurrences returned by a single expansion.
pub const MAX_EXPANSION: u16 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
        }
    }
}

/// A repeating schedule: a frequency plus an optional weekday qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub by_day: Option<Weekday>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            by_day: None,
        }
    }

    pub fn weekly_on(weekday: Weekday) -> Self {
        Self {
            frequency: Frequency::Weekly,
            by_day: Some(weekday),
        }
    }

    /// Expand the rule from `dtstart`, returning at most `limit` occurrences
    /// (capped at [`MAX_EXPANSION`]) as UTC instants.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Expansion`] if the `rrule` crate rejects the
    /// rule/start combination.
    pub fn expand(
        &self,
        dtstart: DateTime<Tz>,
        limit: u16,
    ) -> Result<Vec<DateTime<Utc>>, PlannerError> {
        let text = format!(
            "DTSTART;TZID={}:{}\nRRULE:{}",
            dtstart.timezone().name(),
            dtstart.format("%Y%m%dT%H%M%S"),
            self
        );
        let set: rrule::RRuleSet = text
            .parse()
            .map_err(|e: rrule::RRuleError| PlannerError::Expansion(e.to_string()))?;

        let result = set.all(limit.min(MAX_EXPANSION));
        tracing::debug!(
            rule = %self,
            occurrences = result.dates.len(),
            limited = result.limited,
            "expanded recurrence rule"
        );

        Ok(result
            .dates
            .into_iter()
            .map(|dt| dt.with_timezone(&Utc))
            .collect())
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={}", self.frequency.as_str())?;
        if let Some(day) = self.by_day {
            write!(f, ";BYDAY={}", byday_code(day))?;
        }
        Ok(())
    }
}

impl FromStr for RecurrenceRule {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("RRULE:").unwrap_or(s);
        if s.is_empty() {
            return Err(PlannerError::InvalidRule("empty rule".to_string()));
        }

        let mut frequency = None;
        let mut by_day = None;

        for part in s.split(';') {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                PlannerError::InvalidRule(format!("expected KEY=VALUE, got '{part}'"))
            })?;
            match key.trim().to_uppercase().as_str() {
                "FREQ" => {
                    frequency = Some(match value.trim().to_uppercase().as_str() {
                        "DAILY" => Frequency::Daily,
                        "WEEKLY" => Frequency::Weekly,
                        "MONTHLY" => Frequency::Monthly,
                        other => {
                            return Err(PlannerError::InvalidRule(format!(
                                "unsupported frequency '{other}'"
                            )));
                        }
                    });
                }
                "BYDAY" => {
                    by_day = Some(weekday_from_code(value).ok_or_else(|| {
                        PlannerError::InvalidRule(format!("unsupported BYDAY '{value}'"))
                    })?);
                }
                other => {
                    return Err(PlannerError::InvalidRule(format!(
                        "unsupported part '{other}'"
                    )));
                }
            }
        }

        let frequency =
            frequency.ok_or_else(|| PlannerError::InvalidRule(format!("missing FREQ in '{s}'")))?;
        Ok(Self { frequency, by_day })
    }
}

impl From<RecurrenceRule> for String {
    fn from(rule: RecurrenceRule) -> Self {
        rule.to_string()
    }
}

impl TryFrom<String> for RecurrenceRule {
    type Error = PlannerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
