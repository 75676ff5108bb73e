//! Reduce boundary input to calendar days.
//!
//! The checker compares days, never instants. Callers that receive timestamps
//! (browser date pickers, REST payloads) pick the timezone whose calendar the
//! captain works in and collapse each timestamp to its local day here.

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;

use crate::error::{BookingError, Result};

/// Parse an IANA timezone name such as `"Asia/Kolkata"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| BookingError::InvalidTimezone(name.to_string()))
}

/// The calendar day `instant` falls on in `tz`.
pub fn calendar_day(instant: DateTime<FixedOffset>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Parse either a bare `YYYY-MM-DD` date or an RFC 3339 timestamp.
///
/// Bare dates are taken as-is. Timestamps are converted to `tz` first, so
/// `2026-12-10T20:00:00Z` is December 11th in `Asia/Kolkata`.
pub fn parse_calendar_day(s: &str, tz: Tz) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| calendar_day(dt, tz))
        .map_err(|e| BookingError::InvalidDate(format!("'{}': {}", s, e)))
}
