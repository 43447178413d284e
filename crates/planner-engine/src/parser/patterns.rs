//! Compiled keyword patterns for the natural-language parser.
//!
//! Every pattern is case-insensitive. Each rule in `rules.rs` owns a
//! subset of these; title cleanup strips the matches of all of them.

use std::sync::LazyLock;

use regex::Regex;

// ============================================================================
// Dates
// ============================================================================

/// Relative keywords that resolve to a concrete date.
pub(crate) static RELATIVE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<keyword>tomorrow|today|next\s+week|next\s+month|next\s+(?P<weekday>monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b",
    )
    .expect("Invalid regex")
});

/// "on Monday", "this Friday". Detected, never resolved.
pub(crate) static NAMED_WEEKDAY_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(on|this)\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("Invalid regex")
});

/// "in 2 days", "in 1 week". Detected, never resolved.
pub(crate) static OFFSET_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bin\s+([0-9]+)\s+(days?|weeks?|months?)\b").expect("Invalid regex")
});

// ============================================================================
// Clock times
// ============================================================================

/// "at 1pm", "13:00", "at 9:30 am", or a bare hour. ASCII digits only.
pub(crate) static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(at\s+)?(?P<hour>[0-9]{1,2})(?::(?P<minute>[0-9]{2}))?\s*(?P<meridiem>am|pm)?\b",
    )
    .expect("Invalid regex")
});

/// "tomorrow at 1pm", "today 9:30".
pub(crate) static ANCHORED_CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(tomorrow|today|next\s+week|next\s+month)\s+(at\s+)?(?P<hour>[0-9]{1,2})(?::(?P<minute>[0-9]{2}))?\s*(?P<meridiem>am|pm)?\b",
    )
    .expect("Invalid regex")
});

// ============================================================================
// Recurrence
// ============================================================================

pub(crate) static DAILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(every\s+day|daily|everyday)\b").expect("Invalid regex")
});

pub(crate) static WEEKLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(every\s+week|weekly)\b").expect("Invalid regex"));

pub(crate) static MONTHLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(every\s+month|monthly)\b").expect("Invalid regex"));

/// "every Friday", "on Mondays".
pub(crate) static WEEKDAY_REPEAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(every|on)\s+(?P<weekday>mondays?|tuesdays?|wednesdays?|thursdays?|fridays?|saturdays?|sundays?)\b",
    )
    .expect("Invalid regex")
});

// ============================================================================
// Location
// ============================================================================

/// "at <place>" or "in <place>", ending at the next temporal keyword or at
/// the end of the input.
pub(crate) static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(at|in)\s+(?P<place>[a-z\s]+?)(?:\s+(at|tomorrow|today|every|next)|\s*$)")
        .expect("Invalid regex")
});

// ============================================================================
// Priority
// ============================================================================

pub(crate) static HIGH_PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(urgent|important|high\s+priority|asap)\b").expect("Invalid regex")
});

pub(crate) static LOW_PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(low\s+priority|whenever|when\s+possible)\b").expect("Invalid regex")
});
