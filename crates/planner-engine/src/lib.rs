//! # planner-engine
//!
//! Deterministic core of a personal planner.
//!
//! Turns free text into structured task/event drafts, detects conflicts
//! between time intervals, and suggests alternative slots when a preferred
//! time is taken. Everything here is a pure function of its arguments: the
//! caller supplies "now", the time zone, and the busy-event list.
//!
//! ## Modules
//!
//! - [`parser`] — free text → [`ParsedDraft`] (title, due date, event times, location, priority, recurrence)
//! - [`slots`] — ranked scheduling suggestions around a preferred slot
//! - [`conflict`] — strict-overlap conflict detection
//! - [`interval`] — the `[start, end)` interval type and lookahead filtering
//! - [`recurrence`] — the `FREQ=..;BYDAY=..` rule subset and its expansion
//! - [`calendar`] — wall-clock date arithmetic in an IANA time zone
//! - [`request`] — JSON request bodies and their validation
//! - [`error`] — Error types

pub mod calendar;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod parser;
pub mod recurrence;
pub mod request;
pub mod slots;

pub use conflict::{check_conflicts, has_conflict, ConflictReport};
pub use error::{ErrorClass, PlannerError};
pub use interval::{within_lookahead, TimeInterval};
pub use parser::{parse, NewEvent, NewTask, ParsedDraft, PlannerItem, Priority};
pub use recurrence::{Frequency, RecurrenceRule};
pub use request::{ParseRequest, SuggestionQuery, SuggestionRequest};
pub use slots::{find_available_slots, SchedulingSuggestion, SlotFinder, SlotFinderConfig};
