//! Booking data model: date ranges, bookings, requests, and check outcomes.
//!
//! Every date is a [`NaiveDate`]. Callers are expected to have reduced any
//! timestamps to calendar days before building these types (see
//! [`crate::normalize`]).

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// An inclusive range of calendar days. Both `start` and `end` are occupied.
///
/// The fields are public so ranges can be deserialized or built literally;
/// [`DateRange::new`] is the checked constructor, and the conflict checker
/// re-validates whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(BookingError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A one-day range.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Two inclusive ranges overlap iff `a.start <= b.end && a.end >= b.start`.
    ///
    /// Unlike half-open intervals, ranges that share a single boundary day
    /// DO overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days in the range, counting both ends. Zero when inverted.
    pub fn len_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    /// Every day in the range, ascending. Empty when inverted.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Days shared with `other`, counting both ends. Zero when disjoint.
    pub fn overlap_days(&self, other: &DateRange) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        ((end - start).num_days() + 1).max(0)
    }
}

/// A confirmed or pending commitment of a captain to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub destination: String,
    pub range: DateRange,
}

impl Booking {
    pub fn new(id: impl Into<String>, destination: impl Into<String>, range: DateRange) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            range,
        }
    }
}

/// A candidate booking awaiting validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub destination: String,
    pub range: DateRange,
}

impl BookingRequest {
    pub fn new(destination: impl Into<String>, range: DateRange) -> Self {
        Self {
            destination: destination.into(),
            range,
        }
    }
}

/// A consistent view of one captain's commitments, as fetched by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSnapshot {
    pub bookings: Vec<Booking>,
    pub blocked_dates: BTreeSet<NaiveDate>,
}

impl ProviderSnapshot {
    pub fn new(bookings: Vec<Booking>, blocked_dates: BTreeSet<NaiveDate>) -> Self {
        Self {
            bookings,
            blocked_dates,
        }
    }
}

/// Why a request was turned down. Listed in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    BlockedDate,
    DirectOverlap,
    InsufficientTravelBuffer,
}

/// Details of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub reason: ConflictReason,
    /// The existing booking that caused the rejection. `None` for
    /// [`ConflictReason::BlockedDate`].
    pub conflicting_booking: Option<Booking>,
    /// The earliest blocked day inside the request. Only set for
    /// [`ConflictReason::BlockedDate`].
    pub blocked_date: Option<NaiveDate>,
}

/// Outcome of checking one [`BookingRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConflictResult {
    NoConflict,
    Conflict(Conflict),
}

impl ConflictResult {
    pub(crate) fn blocked(day: NaiveDate) -> Self {
        ConflictResult::Conflict(Conflict {
            reason: ConflictReason::BlockedDate,
            conflicting_booking: None,
            blocked_date: Some(day),
        })
    }

    pub(crate) fn against(reason: ConflictReason, booking: &Booking) -> Self {
        ConflictResult::Conflict(Conflict {
            reason,
            conflicting_booking: Some(booking.clone()),
            blocked_date: None,
        })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ConflictResult::Conflict(_))
    }

    pub fn reason(&self) -> Option<ConflictReason> {
        match self {
            ConflictResult::NoConflict => None,
            ConflictResult::Conflict(c) => Some(c.reason),
        }
    }

    pub fn conflicting_booking(&self) -> Option<&Booking> {
        match self {
            ConflictResult::NoConflict => None,
            ConflictResult::Conflict(c) => c.conflicting_booking.as_ref(),
        }
    }
}
