//! Open booking windows for a destination.
//!
//! Turns a captain's snapshot into the runs of days on which a new booking for
//! a given destination would be accepted. Built from the same three rules as
//! [`crate::conflict`]:
//!
//! - blocked days are closed,
//! - days inside any existing booking are closed,
//! - days within `buffer_days` of a booking at another destination are closed.
//!
//! A request range checks as `NoConflict` exactly when every one of its days
//! is open, so any sub-range of an open window is safe to offer the user.

use chrono::{Duration, NaiveDate};
use tracing::trace;

use crate::config::CheckerConfig;
use crate::conflict::{same_destination, validate_bookings, validate_destination};
use crate::error::{BookingError, Result};
use crate::model::{DateRange, ProviderSnapshot};

/// Maximal runs of open days inside `window`, sorted ascending.
///
/// # Errors
/// Returns `BookingError::InvalidRange` if `window` is inverted,
/// `BookingError::InvalidDestination` if `destination` is blank, and
/// `BookingError::InvalidBookingRange` if the snapshot holds an inverted booking.
pub fn open_windows(
    snapshot: &ProviderSnapshot,
    window: DateRange,
    destination: &str,
    config: &CheckerConfig,
) -> Result<Vec<DateRange>> {
    validate_inputs(snapshot, window, destination)?;

    let closed = closed_spans(snapshot, window, destination, config);

    let mut open = Vec::new();
    let mut cursor = window.start;
    let mut exhausted = false;

    for span in &closed {
        if cursor < span.start {
            open.push(DateRange {
                start: cursor,
                end: span.start - Duration::days(1),
            });
        }
        match span.end.succ_opt() {
            Some(next) => cursor = cursor.max(next),
            None => {
                exhausted = true;
                break;
            }
        }
    }

    // Trailing open run after the last closed span.
    if !exhausted && cursor <= window.end {
        open.push(DateRange {
            start: cursor,
            end: window.end,
        });
    }

    trace!(destination, windows = open.len(), "open windows computed");
    Ok(open)
}

/// The earliest run of exactly `length_days` open days inside `window`.
///
/// Returns `Ok(None)` when `length_days` is zero or no open window is long
/// enough.
pub fn find_first_open_range(
    snapshot: &ProviderSnapshot,
    window: DateRange,
    destination: &str,
    length_days: u32,
    config: &CheckerConfig,
) -> Result<Option<DateRange>> {
    if length_days == 0 {
        validate_inputs(snapshot, window, destination)?;
        return Ok(None);
    }
    let length = i64::from(length_days);

    Ok(open_windows(snapshot, window, destination, config)?
        .into_iter()
        .find(|w| w.len_days() >= length)
        .map(|w| DateRange {
            start: w.start,
            end: w.start + Duration::days(length - 1),
        }))
}

fn validate_inputs(snapshot: &ProviderSnapshot, window: DateRange, destination: &str) -> Result<()> {
    if !window.is_valid() {
        return Err(BookingError::InvalidRange {
            start: window.start,
            end: window.end,
        });
    }
    validate_destination(destination)?;
    validate_bookings(&snapshot.bookings)
}

/// Closed spans clipped to `window`, sorted and merged.
fn closed_spans(
    snapshot: &ProviderSnapshot,
    window: DateRange,
    destination: &str,
    config: &CheckerConfig,
) -> Vec<DateRange> {
    let buffer = Duration::days(i64::from(config.buffer_days));

    let blocked = snapshot
        .blocked_dates
        .range(window.start..=window.end)
        .map(|d| DateRange::single(*d));

    let booked = snapshot.bookings.iter().map(|b| {
        if same_destination(&b.destination, destination) {
            b.range
        } else {
            DateRange {
                start: saturating_sub(b.range.start, buffer),
                end: saturating_add(b.range.end, buffer),
            }
        }
    });

    let mut spans: Vec<DateRange> = blocked
        .chain(booked)
        .filter(|s| s.overlaps(&window))
        .map(|s| DateRange {
            start: s.start.max(window.start),
            end: s.end.min(window.end),
        })
        .collect();

    spans.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<DateRange> = Vec::with_capacity(spans.len());
    for span in spans {
        if let Some(last) = merged.last_mut() {
            // Touching day spans leave no open day between them.
            if last.end.succ_opt().is_none_or(|next| span.start <= next) {
                last.end = last.end.max(span.end);
                continue;
            }
        }
        merged.push(span);
    }
    merged
}

fn saturating_sub(day: NaiveDate, by: Duration) -> NaiveDate {
    day.checked_sub_signed(by).unwrap_or(NaiveDate::MIN)
}

fn saturating_add(day: NaiveDate, by: Duration) -> NaiveDate {
    day.checked_add_signed(by).unwrap_or(NaiveDate::MAX)
}
