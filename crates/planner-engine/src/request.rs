//! Request bodies accepted by an embedding HTTP layer.
//!
//! The engine has no server. These types pin the JSON contract so a caller
//! can deserialize a body, validate it, and map any failure to a status
//! class with [`PlannerError::class`](crate::error::PlannerError::class).

use serde::{Deserialize, Serialize};

use crate::calendar::parse_rfc3339;
use crate::error::{PlannerError, Result};
use crate::interval::TimeInterval;

pub const DEFAULT_DURATION_MINUTES: i64 = 60;
/// One week.
pub const MAX_DURATION_MINUTES: i64 = 10_080;

/// `{ "input": "..." }` for the parse endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub input: Option<String>,
}

impl ParseRequest {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// The text to parse.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidRequest`] if `input` is missing or
    /// empty.
    pub fn into_text(self) -> Result<String> {
        match self.input {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(PlannerError::InvalidRequest(
                "Input text is required".to_string(),
            )),
        }
    }
}

/// `{ "start_time", "end_time", "duration_minutes"? }` for the suggestion
/// endpoint. Times are RFC 3339 instants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

/// A validated suggestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionQuery {
    pub preferred: TimeInterval,
    pub duration_minutes: i64,
}

impl SuggestionRequest {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Validate the request and parse its instants.
    ///
    /// # Errors
    ///
    /// - [`PlannerError::InvalidRequest`] if either time is missing or the
    ///   duration is not in `1..=MAX_DURATION_MINUTES`
    /// - [`PlannerError::InvalidDatetime`] if a time is not RFC 3339
    pub fn into_query(self) -> Result<SuggestionQuery> {
        let (start, end) = match (non_empty(self.start_time), non_empty(self.end_time)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(PlannerError::InvalidRequest(
                    "Start time and end time are required".to_string(),
                ))
            }
        };

        let duration_minutes = self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
        if duration_minutes <= 0 {
            return Err(PlannerError::InvalidRequest(format!(
                "Duration must be positive, got {duration_minutes} minutes"
            )));
        }
        if duration_minutes > MAX_DURATION_MINUTES {
            return Err(PlannerError::InvalidRequest(format!(
                "Duration must be at most {MAX_DURATION_MINUTES} minutes, got {duration_minutes}"
            )));
        }

        Ok(SuggestionQuery {
            preferred: TimeInterval::new(parse_rfc3339(&start)?, parse_rfc3339(&end)?),
            duration_minutes,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_request_requires_input() {
        for body in [r#"{}"#, r#"{"input": null}"#, r#"{"input": ""}"#] {
            let err = ParseRequest::from_json(body).unwrap().into_text().unwrap_err();
            assert_eq!(err.to_string(), "Invalid request: Input text is required");
            assert_eq!(err.class(), ErrorClass::MalformedInput);
        }
    }

    #[test]
    fn test_parse_request_passes_text_through() {
        let req = ParseRequest::from_json(r#"{"input": "Lunch at 1pm"}"#).unwrap();
        assert_eq!(req.into_text().unwrap(), "Lunch at 1pm");
    }

    #[test]
    fn test_malformed_body_is_malformed_input() {
        let err = ParseRequest::from_json("{\"input\": 3}").unwrap_err();
        assert_eq!(err.class(), ErrorClass::MalformedInput);
    }

    #[test]
    fn test_suggestion_request_defaults_duration() {
        let query = SuggestionRequest::from_json(
            r#"{"start_time": "2026-10-20T18:00:00Z", "end_time": "2026-10-20T19:00:00Z"}"#,
        )
        .unwrap()
        .into_query()
        .unwrap();
        assert_eq!(query.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(
            query.preferred.start,
            Utc.with_ymd_and_hms(2026, 10, 20, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_suggestion_request_accepts_offsets() {
        let query = SuggestionRequest {
            start_time: Some("2026-10-20T14:00:00-04:00".to_string()),
            end_time: Some("2026-10-20T15:30:00-04:00".to_string()),
            duration_minutes: Some(90),
        }
        .into_query()
        .unwrap();
        assert_eq!(query.duration_minutes, 90);
        assert_eq!(
            query.preferred.end,
            Utc.with_ymd_and_hms(2026, 10, 20, 19, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_suggestion_request_missing_times() {
        let err = SuggestionRequest::from_json(r#"{"start_time": "2026-10-20T18:00:00Z"}"#)
            .unwrap()
            .into_query()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid request: Start time and end time are required"
        );
    }

    #[test]
    fn test_suggestion_request_bad_instant() {
        let err = SuggestionRequest {
            start_time: Some("tomorrow".to_string()),
            end_time: Some("2026-10-20T19:00:00Z".to_string()),
            duration_minutes: None,
        }
        .into_query()
        .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidDatetime(_)));
    }

    #[test]
    fn test_suggestion_request_rejects_non_positive_duration() {
        let err = SuggestionRequest {
            start_time: Some("2026-10-20T18:00:00Z".to_string()),
            end_time: Some("2026-10-20T19:00:00Z".to_string()),
            duration_minutes: Some(0),
        }
        .into_query()
        .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRequest(_)));
    }

    #[test]
    fn test_suggestion_request_caps_duration() {
        let request = |minutes| SuggestionRequest {
            start_time: Some("2026-10-20T18:00:00Z".to_string()),
            end_time: Some("2026-10-20T19:00:00Z".to_string()),
            duration_minutes: Some(minutes),
        };

        let query = request(MAX_DURATION_MINUTES).into_query().unwrap();
        assert_eq!(query.duration_minutes, MAX_DURATION_MINUTES);

        let err = request(1_000_000_000_000).into_query().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid request: Duration must be at most 10080 minutes, got 1000000000000"
        );
        assert_eq!(err.class(), ErrorClass::MalformedInput);
    }
}
