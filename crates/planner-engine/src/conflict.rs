//! Conflict detection between a proposed interval and existing busy events.

use serde::Serialize;

use crate::interval::TimeInterval;

/// The result of checking a proposed interval against busy events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub has_conflict: bool,
    /// Every overlapping event, in input order.
    pub conflicting_events: Vec<TimeInterval>,
}

/// Find every existing event that overlaps `proposed`.
///
/// Overlap is strict: an event ending exactly when `proposed` starts is not
/// a conflict.
pub fn check_conflicts(existing: &[TimeInterval], proposed: &TimeInterval) -> ConflictReport {
    let conflicting_events: Vec<TimeInterval> = existing
        .iter()
        .filter(|event| event.overlaps(proposed))
        .copied()
        .collect();

    tracing::trace!(
        checked = existing.len(),
        conflicts = conflicting_events.len(),
        "checked proposed interval for conflicts"
    );

    ConflictReport {
        has_conflict: !conflicting_events.is_empty(),
        conflicting_events,
    }
}

/// Whether `proposed` overlaps any existing event.
pub fn has_conflict(existing: &[TimeInterval], proposed: &TimeInterval) -> bool {
    existing.iter().any(|event| event.overlaps(proposed))
}
