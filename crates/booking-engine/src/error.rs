//! Error types for booking-engine operations.
//!
//! Only malformed input ends up here. A booking that cannot be accepted is a
//! normal [`ConflictResult`](crate::model::ConflictResult), never an error.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid range on booking '{id}': start {start} is after end {end}")]
    InvalidBookingRange {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid destination: {0:?} is empty after trimming")]
    InvalidDestination(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl BookingError {
    /// True for errors that mean the caller handed the checker a malformed
    /// request or snapshot, as opposed to text that failed to parse at a
    /// boundary adapter.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidRange { .. }
                | BookingError::InvalidBookingRange { .. }
                | BookingError::InvalidDestination(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
