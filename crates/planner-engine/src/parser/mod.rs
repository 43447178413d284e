//! Natural-language task/event parser.
//!
//! Turns one line of free text ("Lunch with Sarah at 1pm tomorrow") into a
//! [`ParsedDraft`]. The parser is a pure function of the input and the
//! caller-supplied "now"; it never fails and never reads the system clock.
//!
//! # Pipeline
//!
//! 1. **Date**: relative keywords (`today`, `tomorrow`, `next week`,
//!    `next month`, `next <weekday>`) resolve to a date; `on/this <weekday>`
//!    and `in N days` are recognised but stay at the anchor date.
//! 2. **Clock time**: the first `[at] H[:MM][am|pm]` in the text, anchored
//!    to the resolved date or to today.
//! 3. **Event decision**: a clock time makes an event lasting one hour;
//!    a date alone makes a due date.
//! 4. **Recurrence**: daily, weekly, monthly, then `every/on <weekday>`.
//! 5. **Location**: `at/in <words>` up to the next temporal keyword; a
//!    location always makes the draft an event.
//! 6. **Priority**: high or low keywords; otherwise unset.
//! 7. **Title**: the input with every matched keyword removed.
//!
//! Every step reads the unmodified input, so one step's match never hides
//! text from another.

mod draft;
mod patterns;
mod rules;

use std::ops::Range;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub use draft::{NewEvent, NewTask, PlannerItem};
use rules::{default_end, DateHit, Extraction, RULES};

use crate::recurrence::RecurrenceRule;

/// Title used when nothing is left after keyword removal.
pub const FALLBACK_TITLE: &str = "Untitled Task";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Start and end of an event. Always present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTimes {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// The structured result of parsing free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(rename = "isEvent", default)]
    pub is_event: bool,
    #[serde(flatten)]
    pub times: Option<EventTimes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "rrule", default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<RecurrenceRule>,
}

impl ParsedDraft {
    fn untitled() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            description: None,
            due_date: None,
            priority: None,
            is_event: false,
            times: None,
            location: None,
            recurrence_rule: None,
        }
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.times.map(|t| t.start_time)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.times.map(|t| t.end_time)
    }
}

/// Parse free text into a draft, relative to `now` in its time zone.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Timelike};
/// use chrono_tz::America::New_York;
/// use planner_engine::parser::parse;
///
/// let now = New_York.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
/// let draft = parse("Lunch with Sarah at 1pm tomorrow", now);
/// assert_eq!(draft.title, "Lunch with Sarah");
/// assert!(draft.is_event);
/// let start = draft.start_time().unwrap().with_timezone(&New_York);
/// assert_eq!(start.hour(), 13);
/// ```
pub fn parse(input: &str, now: DateTime<Tz>) -> ParsedDraft {
    let mut acc = Extraction::default();
    for rule in RULES.iter() {
        rule.extract(input, &now, &mut acc);
    }

    let mut draft = ParsedDraft::untitled();

    // Event decision: a clock time wins; a date alone becomes a due date.
    match (acc.start, acc.date) {
        (Some(start), _) => {
            draft.times = Some(EventTimes {
                start_time: start.with_timezone(&Utc),
                end_time: default_end(&start).with_timezone(&Utc),
            });
        }
        (None, Some(hit)) => {
            let due = match hit {
                DateHit::Resolved(date) => {
                    crate::calendar::localize(&now.timezone(), date.and_time(now.time()))
                }
                DateHit::Unresolved => now,
            };
            draft.due_date = Some(due.with_timezone(&Utc));
        }
        (None, None) => {}
    }

    draft.is_event = acc.event.is_set();
    draft.recurrence_rule = acc.recurrence;
    draft.location = acc.location;
    draft.priority = acc.priority;
    draft.title = clean_title(input);

    tracing::debug!(
        title = %draft.title,
        is_event = draft.is_event,
        has_due_date = draft.due_date.is_some(),
        rrule = ?draft.recurrence_rule.map(|r| r.to_string()),
        "parsed input"
    );
    draft
}

/// Remove every keyword match of every rule, collapse whitespace, and fall
/// back to [`FALLBACK_TITLE`] when nothing remains.
fn clean_title(input: &str) -> String {
    let mut spans: Vec<Range<usize>> = RULES
        .iter()
        .flat_map(|rule| rule.patterns())
        .flat_map(|pattern| pattern.find_iter(input).map(|m| m.range()))
        .collect();
    spans.sort_by_key(|r| r.start);

    let mut kept = String::with_capacity(input.len());
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            kept.push_str(&input[cursor..span.start]);
            // Keep words on either side of a removed keyword apart.
            kept.push(' ');
        }
        cursor = cursor.max(span.end);
    }
    if cursor < input.len() {
        kept.push_str(&input[cursor..]);
    }

    let title = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title
    }
}
