//! Storable items built from a parsed draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ParsedDraft, Priority};
use crate::error::{PlannerError, Result};
use crate::recurrence::RecurrenceRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrule: Option<RecurrenceRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrule: Option<RecurrenceRule>,
}

/// A task or an event, ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum PlannerItem {
    Task(NewTask),
    Event(NewEvent),
}

impl ParsedDraft {
    /// Turn the draft into a task or an event.
    ///
    /// Drafts flagged as events become [`PlannerItem::Event`]; everything
    /// else becomes a [`PlannerItem::Task`] with priority defaulting to
    /// medium.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::IncompleteEvent`] for an event draft without
    /// a start time (a location with no clock time).
    pub fn into_item(self) -> Result<PlannerItem> {
        if !self.is_event {
            return Ok(PlannerItem::Task(NewTask {
                title: self.title,
                description: self.description,
                due_date: self.due_date,
                priority: self.priority.unwrap_or_default(),
                rrule: self.recurrence_rule,
            }));
        }

        let times = self.times.ok_or_else(|| {
            PlannerError::IncompleteEvent(format!("'{}' has no start time", self.title))
        })?;
        Ok(PlannerItem::Event(NewEvent {
            title: self.title,
            description: self.description,
            start_time: times.start_time,
            end_time: times.end_time,
            location: self.location,
            rrule: self.recurrence_rule,
        }))
    }
}
