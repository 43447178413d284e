//! Property-based tests for the parser, conflict detection, and the slot
//! finder.

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use planner_engine::{check_conflicts, find_available_slots, parse, TimeInterval};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap()
}

fn tz() -> Tz {
    "America/New_York".parse().unwrap()
}

/// Intervals within two weeks of the base, between 1 minute and 10 hours.
fn interval() -> impl Strategy<Value = TimeInterval> {
    (0i64..20_160, 1i64..600).prop_map(|(offset, length)| {
        TimeInterval::starting_at(base() + Duration::minutes(offset), length)
    })
}

// ============================================================================
// Conflict Properties
// ============================================================================

proptest! {
    #[test]
    fn conflict_is_symmetric(a in interval(), b in interval()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert_eq!(
            check_conflicts(&[a], &b).has_conflict,
            check_conflicts(&[b], &a).has_conflict
        );
    }

    #[test]
    fn conflict_is_reflexive(a in interval()) {
        prop_assert!(check_conflicts(&[a], &a).has_conflict);
    }

    #[test]
    fn back_to_back_never_conflicts(a in interval(), length in 1i64..600) {
        let next = TimeInterval::starting_at(a.end, length);
        prop_assert!(!a.overlaps(&next));
    }

    #[test]
    fn report_lists_exactly_the_overlapping_events(
        existing in prop::collection::vec(interval(), 0..20),
        proposed in interval(),
    ) {
        let report = check_conflicts(&existing, &proposed);
        let expected: Vec<TimeInterval> =
            existing.iter().filter(|e| e.overlaps(&proposed)).copied().collect();
        prop_assert_eq!(report.has_conflict, !expected.is_empty());
        prop_assert_eq!(report.conflicting_events, expected);
    }
}

// ============================================================================
// Slot Finder Properties
// ============================================================================

proptest! {
    #[test]
    fn suggestions_are_capped_and_sorted(
        existing in prop::collection::vec(interval(), 0..30),
        preferred in interval(),
        duration in 15i64..240,
        days in 0u32..14,
    ) {
        let found = find_available_slots(tz(), &existing, &preferred, duration, days);
        prop_assert!(found.len() <= 5);
        prop_assert!(found.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn empty_calendar_returns_preferred_first(
        preferred in interval(),
        duration in 15i64..240,
        days in 0u32..14,
    ) {
        let found = find_available_slots(tz(), &[], &preferred, duration, days);
        prop_assert!(!found.is_empty());
        prop_assert_eq!(found[0].suggested_time, preferred);
        prop_assert_eq!(found[0].confidence, 1.0);
    }

    #[test]
    fn non_preferred_suggestions_have_requested_duration(
        existing in prop::collection::vec(interval(), 0..30),
        preferred in interval(),
        duration in 15i64..240,
    ) {
        let found = find_available_slots(tz(), &existing, &preferred, duration, 7);
        for suggestion in found.iter().filter(|s| s.confidence < 1.0) {
            prop_assert_eq!(suggestion.suggested_time.duration(), Duration::minutes(duration));
        }
    }
}

// ============================================================================
// Parser Properties
// ============================================================================

proptest! {
    #[test]
    fn parser_is_total(text in "\\PC{0,200}") {
        let now = tz().with_ymd_and_hms(2026, 10, 19, 10, 15, 30).unwrap();
        let draft = parse(&text, now);
        prop_assert!(!draft.title.is_empty());
        prop_assert_eq!(draft.title.trim(), draft.title.as_str());
        if let (Some(start), Some(end)) = (draft.start_time(), draft.end_time()) {
            prop_assert!(start < end);
        }
    }

    #[test]
    fn plain_words_are_kept_verbatim(words in prop::collection::vec("[bcdfghjklmnpqrstvwxz]{2,8}", 1..6)) {
        // Consonant-only words can never spell a keyword.
        let text = words.join(" ");
        let now = tz().with_ymd_and_hms(2026, 10, 19, 10, 15, 30).unwrap();
        let draft = parse(&text, now);
        prop_assert_eq!(draft.title, text);
        prop_assert!(!draft.is_event);
        prop_assert!(draft.due_date.is_none());
        prop_assert!(draft.recurrence_rule.is_none());
    }
}
