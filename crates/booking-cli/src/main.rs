//! `bookcheck` CLI: validate captain booking requests from the command line.
//!
//! Every command reads one JSON document holding a captain's snapshot
//! (`bookings`, `blocked_dates`, optional `buffer_days`) plus whatever the
//! command needs, and writes JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Check one request (stdin → stdout)
//! echo '{"request":{...},"bookings":[...],"blocked_dates":[...]}' | bookcheck check
//!
//! # Same, as a sentence
//! bookcheck check -i request.json --format text
//!
//! # Check several candidates at once
//! bookcheck batch -i candidates.json -o results.json
//!
//! # Open windows for a destination in December, or the first 4-day fit
//! bookcheck windows -i snapshot.json --from 2026-12-01 --to 2026-12-31 --destination Goa
//! bookcheck windows -i snapshot.json --from 2026-12-01 --to 2026-12-31 --destination Goa --length 4
//!
//! # Find bookings that already overlap
//! bookcheck audit -i snapshot.json
//! ```
//!
//! Conflicts are normal results and exit 0. Malformed input exits 1, except
//! that `batch` reports a malformed candidate as an `{"error": ...}` entry.

use std::io::{self, Read};

use anyhow::{Context, Result};
use booking_engine::normalize::{parse_calendar_day, parse_timezone};
use booking_engine::wire::{
    check_request_inputs, to_blocked_dates, to_bookings, BookingInput, RequestInput,
};
use booking_engine::{
    Booking, CheckerConfig, ConflictReason, ConflictResult, DateRange, ProviderSnapshot,
};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bookcheck",
    version,
    about = "Check captain booking requests against existing bookings and blocked dates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Whole days required between bookings at different destinations
    /// (overrides `buffer_days` in the input)
    #[arg(long, global = true)]
    buffer_days: Option<u32>,

    /// IANA timezone used to turn timestamps into calendar days
    #[arg(long, global = true, default_value = "UTC")]
    timezone: String,

    /// Log decisions to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one booking request
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Check several candidate requests against the same snapshot
    Batch {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List open booking windows for a destination
    Windows {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First day of the search window
        #[arg(long)]
        from: String,
        /// Last day of the search window
        #[arg(long)]
        to: String,
        /// Destination of the trip being planned
        #[arg(long)]
        destination: String,
        /// Return only the earliest range of this many days
        #[arg(long)]
        length: Option<u32>,
    },
    /// Report existing bookings that already overlap each other
    Audit {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// The JSON document every command reads. Fields a command does not need are
/// ignored.
#[derive(Deserialize, Default)]
#[serde(default)]
struct Envelope {
    request: Option<RequestInput>,
    requests: Vec<RequestInput>,
    bookings: Vec<BookingInput>,
    blocked_dates: Vec<String>,
    buffer_days: Option<u32>,
}

impl Envelope {
    fn snapshot(&self, tz: Tz) -> Result<ProviderSnapshot> {
        Ok(ProviderSnapshot::new(
            to_bookings(&self.bookings, tz).context("Failed to read bookings")?,
            to_blocked_dates(&self.blocked_dates, tz).context("Failed to read blocked dates")?,
        ))
    }

    /// Flag beats file beats default.
    fn config(&self, flag: Option<u32>) -> CheckerConfig {
        flag.or(self.buffer_days)
            .map(CheckerConfig::with_buffer_days)
            .unwrap_or_default()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tz = parse_timezone(&cli.timezone)?;
    debug!(timezone = %tz, "resolved timezone");

    match cli.command {
        Commands::Check {
            input,
            output,
            format,
        } => {
            let envelope = read_envelope(input.as_deref())?;
            let config = envelope.config(cli.buffer_days);
            let request = envelope
                .request
                .as_ref()
                .context("Input has no \"request\" object")?
                .to_request(tz)
                .context("Failed to read request")?;
            let snapshot = envelope.snapshot(tz)?;

            let result = booking_engine::check_conflict_with(
                &request,
                &snapshot.bookings,
                &snapshot.blocked_dates,
                &config,
            )
            .context("Booking request is malformed")?;
            info!(conflict = result.is_conflict(), "check finished");

            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&result)?,
                Format::Text => describe(&result, &request.destination, request.range, &config)?,
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Batch { input, output } => {
            let envelope = read_envelope(input.as_deref())?;
            let config = envelope.config(cli.buffer_days);
            let snapshot = envelope.snapshot(tz)?;

            // A candidate with unreadable dates gets its own error entry;
            // the rest of the batch is still checked.
            let results = check_request_inputs(&envelope.requests, &snapshot, tz, &config)
                .into_iter()
                .map(|r| match r {
                    Ok(result) => serde_json::to_value(result),
                    Err(e) => Ok(serde_json::json!({ "error": e.to_string() })),
                })
                .collect::<serde_json::Result<Vec<_>>>()?;
            info!(candidates = results.len(), "batch finished");

            write_output(output.as_deref(), &serde_json::to_string_pretty(&results)?)?;
        }
        Commands::Windows {
            input,
            from,
            to,
            destination,
            length,
        } => {
            let envelope = read_envelope(input.as_deref())?;
            let config = envelope.config(cli.buffer_days);
            let snapshot = envelope.snapshot(tz)?;
            let window = DateRange {
                start: parse_calendar_day(&from, tz).context("Invalid --from")?,
                end: parse_calendar_day(&to, tz).context("Invalid --to")?,
            };

            let rendered = match length {
                Some(days) => {
                    let found = booking_engine::find_first_open_range(
                        &snapshot,
                        window,
                        &destination,
                        days,
                        &config,
                    )?;
                    serde_json::to_string_pretty(&found)?
                }
                None => {
                    let windows =
                        booking_engine::open_windows(&snapshot, window, &destination, &config)?;
                    serde_json::to_string_pretty(&windows)?
                }
            };
            write_output(None, &rendered)?;
        }
        Commands::Audit { input } => {
            let envelope = read_envelope(input.as_deref())?;
            let bookings = to_bookings(&envelope.bookings, tz).context("Failed to read bookings")?;
            let found = booking_engine::find_double_bookings(&bookings);
            write_output(None, &serde_json::to_string_pretty(&found)?)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

/// One-line English rendering of a check result.
///
/// Fails if the conflict carries a different set of details than its reason
/// implies.
fn describe(
    result: &ConflictResult,
    destination: &str,
    range: DateRange,
    config: &CheckerConfig,
) -> Result<String> {
    let conflict = match result {
        ConflictResult::NoConflict => {
            return Ok(format!(
                "No conflict: {} from {} to {} can be booked.\n",
                destination.trim(),
                range.start,
                range.end
            ));
        }
        ConflictResult::Conflict(c) => c,
    };

    let booking = |b: &Booking| {
        format!(
            "booking {} ({}, {} to {})",
            b.id, b.destination, b.range.start, b.range.end
        )
    };

    let line = match (
        conflict.reason,
        conflict.conflicting_booking.as_ref(),
        conflict.blocked_date,
    ) {
        (ConflictReason::BlockedDate, None, Some(day)) => {
            format!("Conflict: {} is blocked for this captain.\n", day)
        }
        (ConflictReason::DirectOverlap, Some(b), None) => {
            format!("Conflict: overlaps {}.\n", booking(b))
        }
        (ConflictReason::InsufficientTravelBuffer, Some(b), None) => format!(
            "Conflict: too close to {}; bookings at different destinations need at least {} free day(s) between them.\n",
            booking(b),
            config.buffer_days
        ),
        (reason, _, _) => anyhow::bail!("Inconsistent {:?} conflict from checker", reason),
    };
    Ok(line)
}

fn read_envelope(path: Option<&str>) -> Result<Envelope> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse input JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
