//! # booking-engine
//!
//! Deterministic booking-conflict checks for captain (guide) scheduling.
//!
//! Given one captain's existing bookings and blocked dates, the engine decides
//! whether a new booking request can be accepted and, if not, why. It is a set
//! of pure functions over caller-supplied data: no I/O, no caching, no shared
//! state. The same code runs server-side and, through `booking-engine-wasm`,
//! in the browser.
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use chrono::NaiveDate;
//! use booking_engine::{check_conflict, Booking, BookingRequest, ConflictReason, DateRange};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2026, 12, d).unwrap();
//! let existing = vec![Booking::new("b1", "Goa", DateRange::new(day(10), day(15)).unwrap())];
//! let request = BookingRequest::new("Assam", DateRange::new(day(16), day(20)).unwrap());
//!
//! let result = check_conflict(&request, &existing, &BTreeSet::new()).unwrap();
//! assert_eq!(result.reason(), Some(ConflictReason::InsufficientTravelBuffer));
//! ```
//!
//! ## Modules
//!
//! - [`model`]: Date ranges, bookings, requests, and check outcomes
//! - [`conflict`]: The ordered rule chain, batch checks, double-booking audit
//! - [`availability`]: Open windows and first-fit search for a destination
//! - [`config`]: Travel-buffer configuration
//! - [`normalize`]: Timestamp → calendar day reduction for boundary adapters
//! - [`wire`]: String-dated serde inputs shared by the WASM and CLI callers
//! - [`error`]: Error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod error;
pub mod model;
pub mod normalize;
pub mod wire;

pub use availability::{find_first_open_range, open_windows};
pub use config::{CheckerConfig, DEFAULT_BUFFER_DAYS};
pub use conflict::{
    check_conflict, check_conflict_with, check_many, find_double_bookings, same_destination,
    DoubleBooking,
};
pub use error::BookingError;
pub use model::{
    Booking, BookingRequest, Conflict, ConflictReason, ConflictResult, DateRange,
    ProviderSnapshot,
};
