//! Planner command-line entry point

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use planner_engine::calendar::{parse_rfc3339, parse_timezone};
use planner_engine::slots::MAX_DAYS_TO_CHECK;
use planner_engine::{ParseRequest, SuggestionRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::Session;
use config::Config;

/// Planner: natural-language tasks and free-slot suggestions
#[derive(Parser, Debug)]
#[command(name = "planner")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// IANA time zone (e.g. "America/New_York"); overrides the config file
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Reference instant in RFC 3339 instead of the system clock
    #[arg(long, global = true)]
    now: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse free text into a task or event draft
    Parse {
        /// Text to parse; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Print the storable task/event instead of the draft
        #[arg(long)]
        create: bool,
    },
    /// Suggest free slots around a preferred time
    Suggest {
        /// Preferred start (RFC 3339)
        #[arg(long)]
        start: String,
        /// Preferred end (RFC 3339)
        #[arg(long)]
        end: String,
        /// Length of each suggested slot in minutes
        #[arg(short, long)]
        duration: Option<i64>,
        /// Number of days to look ahead
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_DAYS_TO_CHECK as i64))]
        days: Option<u32>,
        /// JSON file with busy events: [{"start": ..., "end": ...}]
        #[arg(short, long)]
        events: Option<PathBuf>,
    },
    /// List busy events that overlap a proposed interval
    Conflicts {
        /// Proposed start (RFC 3339)
        #[arg(long)]
        start: String,
        /// Proposed end (RFC 3339)
        #[arg(long)]
        end: String,
        /// JSON file with busy events
        #[arg(short, long)]
        events: PathBuf,
    },
    /// Expand a recurrence rule into concrete occurrences
    Expand {
        /// Rule such as "FREQ=WEEKLY;BYDAY=FR"
        rule: String,
        /// First occurrence (RFC 3339)
        #[arg(long)]
        start: String,
        /// Maximum number of occurrences
        #[arg(short = 'n', long, default_value = "10")]
        count: u16,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::load(args.config.as_deref())?;
    let timezone = args
        .timezone
        .as_deref()
        .or(config.timezone.as_deref())
        .unwrap_or("UTC");
    let session = Session {
        tz: parse_timezone(timezone)?,
        now: match args.now.as_deref() {
            Some(now) => parse_rfc3339(now)?,
            None => Utc::now(),
        },
        slots: config.slot_finder_config(),
    };
    tracing::debug!(tz = session.tz.name(), now = %session.now, "session ready");

    match args.command {
        Command::Parse { text, create } => {
            let request = ParseRequest {
                input: Some(text.join(" ")),
            };
            commands::parse_text(&session, request, create)
        }
        Command::Suggest {
            start,
            end,
            duration,
            days,
            events,
        } => {
            let request = SuggestionRequest {
                start_time: Some(start),
                end_time: Some(end),
                duration_minutes: Some(
                    duration.unwrap_or(session.slots.default_duration_minutes),
                ),
            };
            commands::suggest(&session, request, days, events.as_deref())
        }
        Command::Conflicts { start, end, events } => commands::conflicts(&start, &end, &events),
        Command::Expand { rule, start, count } => {
            commands::expand(&session, &rule, &start, count)
        }
    }
}
