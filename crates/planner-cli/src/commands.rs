//! Subcommand implementations. Each prints pretty JSON to stdout.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use planner_engine::calendar::parse_rfc3339;
use planner_engine::{
    check_conflicts, parse, within_lookahead, ParseRequest, RecurrenceRule, SlotFinder,
    SlotFinderConfig, SuggestionRequest, TimeInterval,
};
use serde::Serialize;

/// Everything a command needs from the environment.
pub struct Session {
    pub tz: Tz,
    pub now: DateTime<Utc>,
    pub slots: SlotFinderConfig,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Busy events from a JSON array of `{ "start", "end" }` objects.
fn load_events(path: &Path) -> Result<Vec<TimeInterval>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file {}", path.display()))?;
    let events: Vec<TimeInterval> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid events file {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = events.len(), "loaded events");
    Ok(events)
}

pub fn parse_text(session: &Session, request: ParseRequest, create: bool) -> Result<()> {
    let text = request.into_text().context("Failed to parse input")?;
    let draft = parse(&text, session.now.with_timezone(&session.tz));
    if create {
        let item = draft.into_item().context("Failed to create item")?;
        print_json(&item)
    } else {
        print_json(&draft)
    }
}

pub fn suggest(
    session: &Session,
    request: SuggestionRequest,
    days: Option<u32>,
    events: Option<&Path>,
) -> Result<()> {
    let query = request.into_query().context("Failed to get suggestions")?;
    let days = days.unwrap_or(session.slots.default_days_to_check);

    let existing = match events {
        Some(path) => within_lookahead(&load_events(path)?, session.now, days),
        None => Vec::new(),
    };

    let finder = SlotFinder::with_config(session.tz, session.slots.clone());
    let suggestions =
        finder.find_available_slots(&existing, &query.preferred, query.duration_minutes, days);
    print_json(&suggestions)
}

pub fn conflicts(start: &str, end: &str, events: &Path) -> Result<()> {
    let proposed = TimeInterval::new(parse_rfc3339(start)?, parse_rfc3339(end)?);
    let report = check_conflicts(&load_events(events)?, &proposed);
    print_json(&report)
}

pub fn expand(session: &Session, rule: &str, start: &str, count: u16) -> Result<()> {
    let rule: RecurrenceRule = rule.parse()?;
    let dtstart = parse_rfc3339(start)?.with_timezone(&session.tz);
    let occurrences = rule.expand(dtstart, count)?;
    print_json(&occurrences)
}
