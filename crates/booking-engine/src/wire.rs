//! Serde input shapes for boundary adapters.
//!
//! Browser and CLI callers send dates as strings that may be bare dates or
//! full timestamps. These types deserialize that shape and convert it into the
//! day-granular model using [`crate::normalize`].
//!
//! Ranges are converted without validation; the checker reports inverted
//! ranges as contract violations itself.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::config::CheckerConfig;
use crate::conflict::check_conflict_with;
use crate::error::Result;
use crate::model::{Booking, BookingRequest, ConflictResult, DateRange, ProviderSnapshot};
use crate::normalize::parse_calendar_day;

#[derive(Debug, Clone, Deserialize)]
pub struct RangeInput {
    pub start: String,
    pub end: String,
}

impl RangeInput {
    pub fn to_range(&self, tz: Tz) -> Result<DateRange> {
        Ok(DateRange {
            start: parse_calendar_day(&self.start, tz)?,
            end: parse_calendar_day(&self.end, tz)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingInput {
    pub id: String,
    pub destination: String,
    pub range: RangeInput,
}

impl BookingInput {
    pub fn to_booking(&self, tz: Tz) -> Result<Booking> {
        Ok(Booking {
            id: self.id.clone(),
            destination: self.destination.clone(),
            range: self.range.to_range(tz)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestInput {
    pub destination: String,
    pub range: RangeInput,
}

impl RequestInput {
    pub fn to_request(&self, tz: Tz) -> Result<BookingRequest> {
        Ok(BookingRequest {
            destination: self.destination.clone(),
            range: self.range.to_range(tz)?,
        })
    }
}

/// A captain's bookings and blocked dates as sent over the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotInput {
    pub bookings: Vec<BookingInput>,
    pub blocked_dates: Vec<String>,
}

impl SnapshotInput {
    pub fn to_snapshot(&self, tz: Tz) -> Result<ProviderSnapshot> {
        Ok(ProviderSnapshot {
            bookings: to_bookings(&self.bookings, tz)?,
            blocked_dates: to_blocked_dates(&self.blocked_dates, tz)?,
        })
    }
}

pub fn to_bookings(inputs: &[BookingInput], tz: Tz) -> Result<Vec<Booking>> {
    inputs.iter().map(|b| b.to_booking(tz)).collect()
}

/// Duplicate days (including timestamps that land on the same day) collapse.
pub fn to_blocked_dates(inputs: &[String], tz: Tz) -> Result<BTreeSet<NaiveDate>> {
    inputs.iter().map(|s| parse_calendar_day(s, tz)).collect()
}

/// Check string-dated candidates against one snapshot.
///
/// The string-input counterpart of [`check_many`](crate::conflict::check_many):
/// a candidate whose dates fail to parse gets its own `Err` entry and the
/// rest are still checked. Results come back in input order.
pub fn check_request_inputs(
    requests: &[RequestInput],
    snapshot: &ProviderSnapshot,
    tz: Tz,
    config: &CheckerConfig,
) -> Vec<Result<ConflictResult>> {
    requests
        .iter()
        .map(|input| {
            input.to_request(tz).and_then(|request| {
                check_conflict_with(&request, &snapshot.bookings, &snapshot.blocked_dates, config)
            })
        })
        .collect()
}
