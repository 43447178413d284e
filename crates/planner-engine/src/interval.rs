//! Time intervals: busy events, candidate slots, and suggested slots.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open span of time `[start, end)`.
///
/// `start < end` is expected but not enforced; callers supply well-formed
/// windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// An interval of `minutes` length starting at `start`.
    pub fn starting_at(start: DateTime<Utc>, minutes: i64) -> Self {
        Self {
            start,
            end: start + Duration::minutes(minutes),
        }
    }

    /// Strict overlap: intervals that only touch at a boundary do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Restrict busy events to the lookahead window `[now, now + days]`,
/// ordered by start ascending.
///
/// Only events that lie entirely inside the window are kept. A horizon past
/// the representable range leaves the window open-ended.
pub fn within_lookahead(
    events: &[TimeInterval],
    now: DateTime<Utc>,
    days: u32,
) -> Vec<TimeInterval> {
    let horizon = Duration::try_days(days as i64).and_then(|d| now.checked_add_signed(d));
    let mut kept: Vec<TimeInterval> = events
        .iter()
        .filter(|e| e.start >= now && horizon.map_or(true, |h| e.end <= h))
        .copied()
        .collect();
    kept.sort_by_key(|e| e.start);
    kept
}
