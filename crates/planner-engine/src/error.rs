//! Error types for planner-engine operations.
//!
//! The parser and the slot finder never fail. Errors only come from the
//! edges: time zone and datetime strings, recurrence rule text, request
//! validation, and turning a draft into a storable item.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    #[error("Expansion error: {0}")]
    Expansion(String),

    #[error("Incomplete event: {0}")]
    IncompleteEvent(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which side of the request boundary an error belongs to.
///
/// `MalformedInput` maps to a 400-class response, `Internal` to 500-class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    MalformedInput,
    Internal,
}

impl PlannerError {
    /// Classify this error for the embedding caller.
    pub fn class(&self) -> ErrorClass {
        match self {
            PlannerError::InvalidRequest(_)
            | PlannerError::InvalidTimezone(_)
            | PlannerError::InvalidDatetime(_)
            | PlannerError::InvalidRule(_)
            | PlannerError::Json(_) => ErrorClass::MalformedInput,
            PlannerError::Expansion(_) | PlannerError::IncompleteEvent(_) => ErrorClass::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_are_malformed_input() {
        let err = PlannerError::InvalidRequest("Input text is required".to_string());
        assert_eq!(err.class(), ErrorClass::MalformedInput);
        assert_eq!(err.to_string(), "Invalid request: Input text is required");
    }

    #[test]
    fn test_incomplete_event_is_internal() {
        let err = PlannerError::IncompleteEvent("no start time".to_string());
        assert_eq!(err.class(), ErrorClass::Internal);
    }

    #[test]
    fn test_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PlannerError = parse_err.into();
        assert_eq!(err.class(), ErrorClass::MalformedInput);
        assert!(err.to_string().starts_with("Malformed JSON"));
    }
}
