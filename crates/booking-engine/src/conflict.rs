//! Decide whether a booking request fits a captain's existing schedule.
//!
//! Three rules run in a fixed order and the first one that fires is reported:
//!
//! 1. **Blocked date**: any day of the request is a blocked date.
//! 2. **Direct overlap**: the request shares at least one day with an existing booking.
//! 3. **Travel buffer**: an existing booking at a *different* destination ends
//!    or starts within `buffer_days` days of the request.
//!
//! Same-destination bookings may sit back to back with no gap.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::CheckerConfig;
use crate::error::{BookingError, Result};
use crate::model::{Booking, BookingRequest, ConflictReason, ConflictResult, ProviderSnapshot};

/// A pair of existing bookings that already share days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoubleBooking {
    pub booking_a: Booking,
    pub booking_b: Booking,
    pub overlap_days: i64,
}

/// Destinations match ignoring case and surrounding whitespace.
///
/// Internal whitespace and punctuation still count: `"Goa"` equals `" goa "`,
/// but not `"Goa Beach"`.
pub fn same_destination(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Check `request` against `existing` bookings and `blocked` dates with the
/// default one-day travel buffer.
///
/// # Errors
/// Returns `BookingError::InvalidRange` if the request range is inverted,
/// `BookingError::InvalidBookingRange` if an existing booking's range is
/// inverted, and `BookingError::InvalidDestination` if the request
/// destination is blank.
pub fn check_conflict(
    request: &BookingRequest,
    existing: &[Booking],
    blocked: &BTreeSet<NaiveDate>,
) -> Result<ConflictResult> {
    check_conflict_with(request, existing, blocked, &CheckerConfig::default())
}

/// Same as [`check_conflict`] with an explicit configuration.
pub fn check_conflict_with(
    request: &BookingRequest,
    existing: &[Booking],
    blocked: &BTreeSet<NaiveDate>,
    config: &CheckerConfig,
) -> Result<ConflictResult> {
    validate_request(request)?;
    validate_bookings(existing)?;

    let result = evaluate(request, existing, blocked, config);
    match &result {
        ConflictResult::NoConflict => debug!(
            destination = %request.destination,
            start = %request.range.start,
            end = %request.range.end,
            "booking request accepted"
        ),
        ConflictResult::Conflict(c) => debug!(
            destination = %request.destination,
            start = %request.range.start,
            end = %request.range.end,
            reason = ?c.reason,
            booking_id = c.conflicting_booking.as_ref().map(|b| b.id.as_str()),
            blocked_date = ?c.blocked_date,
            "booking request rejected"
        ),
    }
    Ok(result)
}

/// Check several candidate requests against the same snapshot.
///
/// Each request is judged on its own; earlier candidates are not treated as
/// bookings for later ones. Results come back in input order.
pub fn check_many(
    requests: &[BookingRequest],
    snapshot: &ProviderSnapshot,
    config: &CheckerConfig,
) -> Vec<Result<ConflictResult>> {
    requests
        .iter()
        .map(|request| {
            let result =
                check_conflict_with(request, &snapshot.bookings, &snapshot.blocked_dates, config);
            trace!(destination = %request.destination, ok = result.is_ok(), "batch candidate checked");
            result
        })
        .collect()
}

/// Find every pair of existing bookings whose ranges already overlap.
///
/// Pairs are reported as `(earlier index, later index)` in input order.
/// Bookings with inverted ranges are skipped.
pub fn find_double_bookings(bookings: &[Booking]) -> Vec<DoubleBooking> {
    let mut found = Vec::new();

    for (i, a) in bookings.iter().enumerate() {
        if !a.range.is_valid() {
            continue;
        }
        for b in &bookings[i + 1..] {
            if b.range.is_valid() && a.range.overlaps(&b.range) {
                found.push(DoubleBooking {
                    booking_a: a.clone(),
                    booking_b: b.clone(),
                    overlap_days: a.range.overlap_days(&b.range),
                });
            }
        }
    }

    if !found.is_empty() {
        debug!(pairs = found.len(), "double bookings detected");
    }
    found
}

pub(crate) fn validate_request(request: &BookingRequest) -> Result<()> {
    if !request.range.is_valid() {
        return Err(BookingError::InvalidRange {
            start: request.range.start,
            end: request.range.end,
        });
    }
    validate_destination(&request.destination)
}

pub(crate) fn validate_destination(destination: &str) -> Result<()> {
    if destination.trim().is_empty() {
        return Err(BookingError::InvalidDestination(destination.to_string()));
    }
    Ok(())
}

pub(crate) fn validate_bookings(bookings: &[Booking]) -> Result<()> {
    match bookings.iter().find(|b| !b.range.is_valid()) {
        Some(b) => Err(BookingError::InvalidBookingRange {
            id: b.id.clone(),
            start: b.range.start,
            end: b.range.end,
        }),
        None => Ok(()),
    }
}

/// The rule chain proper. Inputs are already validated.
fn evaluate(
    request: &BookingRequest,
    existing: &[Booking],
    blocked: &BTreeSet<NaiveDate>,
    config: &CheckerConfig,
) -> ConflictResult {
    // Rule 1: blocked dates. Walk whichever side is smaller.
    let first_blocked = if (blocked.len() as i64) < request.range.len_days() {
        blocked.range(request.range.start..=request.range.end).next().copied()
    } else {
        request.range.days().find(|d| blocked.contains(d))
    };
    if let Some(day) = first_blocked {
        return ConflictResult::blocked(day);
    }

    // Rule 2: direct overlap, first booking in caller order.
    if let Some(booking) = existing.iter().find(|b| request.range.overlaps(&b.range)) {
        return ConflictResult::against(ConflictReason::DirectOverlap, booking);
    }

    // Rule 3: travel buffer against other destinations.
    let buffer = i64::from(config.buffer_days);
    let too_close = |gap: i64| (0..=buffer).contains(&gap);
    for booking in existing {
        if same_destination(&booking.destination, &request.destination) {
            continue;
        }
        let after_booking = (request.range.start - booking.range.end).num_days();
        let before_booking = (booking.range.start - request.range.end).num_days();
        if too_close(after_booking) || too_close(before_booking) {
            return ConflictResult::against(ConflictReason::InsufficientTravelBuffer, booking);
        }
    }

    ConflictResult::NoConflict
}
