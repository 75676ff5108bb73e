//! WASM bindings for booking-engine.
//!
//! Exposes conflict checking, open-window search, and the double-booking audit
//! to JavaScript via `wasm-bindgen`, so the booking form runs exactly the same
//! rules as the server. All complex types are passed as JSON strings.
//!
//! Dates may be bare `YYYY-MM-DD` strings or RFC 3339 timestamps. Timestamps
//! are reduced to calendar days in the optional `timezone` argument (IANA
//! name, default `UTC`).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/booking-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use booking_engine::normalize::{parse_calendar_day, parse_timezone};
use booking_engine::wire::{to_blocked_dates, to_bookings, BookingInput, RequestInput, SnapshotInput};
use booking_engine::{CheckerConfig, DateRange};
use chrono_tz::Tz;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the optional timezone argument, defaulting to UTC.
fn resolve_timezone(timezone: Option<&str>) -> Result<Tz, String> {
    match timezone {
        Some(name) => parse_timezone(name).map_err(|e| e.to_string()),
        None => Ok(Tz::UTC),
    }
}

fn resolve_config(buffer_days: Option<u32>) -> CheckerConfig {
    buffer_days
        .map(CheckerConfig::with_buffer_days)
        .unwrap_or_default()
}

fn parse_json<'a, T: serde::Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn parse_window(start: &str, end: &str, tz: Tz) -> Result<DateRange, String> {
    Ok(DateRange {
        start: parse_calendar_day(start, tz).map_err(|e| e.to_string())?,
        end: parse_calendar_day(end, tz).map_err(|e| e.to_string())?,
    })
}

// ---------------------------------------------------------------------------
// Host-testable implementations (plain `String` errors)
// ---------------------------------------------------------------------------

fn check_conflict_impl(
    request_json: &str,
    bookings_json: &str,
    blocked_json: &str,
    buffer_days: Option<u32>,
    timezone: Option<&str>,
) -> Result<String, String> {
    let tz = resolve_timezone(timezone)?;
    let request: RequestInput = parse_json(request_json, "request")?;
    let bookings: Vec<BookingInput> = parse_json(bookings_json, "bookings")?;
    let blocked: Vec<String> = parse_json(blocked_json, "blocked dates")?;

    let request = request.to_request(tz).map_err(|e| e.to_string())?;
    let bookings = to_bookings(&bookings, tz).map_err(|e| e.to_string())?;
    let blocked = to_blocked_dates(&blocked, tz).map_err(|e| e.to_string())?;

    let result = booking_engine::check_conflict_with(
        &request,
        &bookings,
        &blocked,
        &resolve_config(buffer_days),
    )
    .map_err(|e| e.to_string())?;

    to_json(&result)
}

fn check_many_impl(
    requests_json: &str,
    snapshot_json: &str,
    buffer_days: Option<u32>,
    timezone: Option<&str>,
) -> Result<String, String> {
    let tz = resolve_timezone(timezone)?;
    let requests: Vec<RequestInput> = parse_json(requests_json, "requests")?;
    let snapshot: SnapshotInput = parse_json(snapshot_json, "snapshot")?;
    let snapshot = snapshot.to_snapshot(tz).map_err(|e| e.to_string())?;

    let out = booking_engine::wire::check_request_inputs(
        &requests,
        &snapshot,
        tz,
        &resolve_config(buffer_days),
    )
    .into_iter()
    .map(|entry| match entry {
        Ok(result) => serde_json::to_value(result),
        Err(e) => Ok(serde_json::json!({ "error": e.to_string() })),
    })
    .collect::<serde_json::Result<Vec<_>>>()
    .map_err(|e| format!("Serialization error: {}", e))?;

    to_json(&out)
}

fn open_windows_impl(
    snapshot_json: &str,
    window_start: &str,
    window_end: &str,
    destination: &str,
    buffer_days: Option<u32>,
    timezone: Option<&str>,
) -> Result<String, String> {
    let tz = resolve_timezone(timezone)?;
    let snapshot: SnapshotInput = parse_json(snapshot_json, "snapshot")?;
    let snapshot = snapshot.to_snapshot(tz).map_err(|e| e.to_string())?;
    let window = parse_window(window_start, window_end, tz)?;

    let windows = booking_engine::open_windows(
        &snapshot,
        window,
        destination,
        &resolve_config(buffer_days),
    )
    .map_err(|e| e.to_string())?;

    to_json(&windows)
}

#[allow(clippy::too_many_arguments)]
fn find_first_open_range_impl(
    snapshot_json: &str,
    window_start: &str,
    window_end: &str,
    destination: &str,
    length_days: u32,
    buffer_days: Option<u32>,
    timezone: Option<&str>,
) -> Result<String, String> {
    let tz = resolve_timezone(timezone)?;
    let snapshot: SnapshotInput = parse_json(snapshot_json, "snapshot")?;
    let snapshot = snapshot.to_snapshot(tz).map_err(|e| e.to_string())?;
    let window = parse_window(window_start, window_end, tz)?;

    let found = booking_engine::find_first_open_range(
        &snapshot,
        window,
        destination,
        length_days,
        &resolve_config(buffer_days),
    )
    .map_err(|e| e.to_string())?;

    to_json(&found)
}

fn find_double_bookings_impl(bookings_json: &str, timezone: Option<&str>) -> Result<String, String> {
    let tz = resolve_timezone(timezone)?;
    let bookings: Vec<BookingInput> = parse_json(bookings_json, "bookings")?;
    let bookings = to_bookings(&bookings, tz).map_err(|e| e.to_string())?;

    to_json(&booking_engine::find_double_bookings(&bookings))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Check one booking request against a captain's bookings and blocked dates.
///
/// # Arguments
/// - `request_json` -- `{destination, range: {start, end}}`
/// - `bookings_json` -- array of `{id, destination, range: {start, end}}`
/// - `blocked_json` -- array of date strings
/// - `buffer_days` -- travel buffer between destinations (default 1)
/// - `timezone` -- IANA timezone for timestamp inputs (default UTC)
///
/// Returns `{"outcome":"no_conflict"}` or
/// `{"outcome":"conflict","reason":...,"conflicting_booking":...,"blocked_date":...}`.
/// Malformed input (inverted range, blank destination, bad JSON) throws.
#[wasm_bindgen(js_name = "checkConflict")]
pub fn check_conflict(
    request_json: &str,
    bookings_json: &str,
    blocked_json: &str,
    buffer_days: Option<u32>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    check_conflict_impl(
        request_json,
        bookings_json,
        blocked_json,
        buffer_days,
        timezone.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Check several candidate requests against one snapshot.
///
/// Returns a JSON array in input order; each entry is a result object or
/// `{"error": "..."}` for a malformed candidate.
#[wasm_bindgen(js_name = "checkMany")]
pub fn check_many(
    requests_json: &str,
    snapshot_json: &str,
    buffer_days: Option<u32>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    check_many_impl(requests_json, snapshot_json, buffer_days, timezone.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Maximal runs of days inside the window on which a booking for
/// `destination` would be accepted. Returns a JSON array of `{start, end}`.
#[wasm_bindgen(js_name = "openWindows")]
pub fn open_windows(
    snapshot_json: &str,
    window_start: &str,
    window_end: &str,
    destination: &str,
    buffer_days: Option<u32>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    open_windows_impl(
        snapshot_json,
        window_start,
        window_end,
        destination,
        buffer_days,
        timezone.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Earliest `length_days`-day range inside the window that would be accepted.
/// Returns a JSON `{start, end}` object or `null`.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen(js_name = "findFirstOpenRange")]
pub fn find_first_open_range(
    snapshot_json: &str,
    window_start: &str,
    window_end: &str,
    destination: &str,
    length_days: u32,
    buffer_days: Option<u32>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    find_first_open_range_impl(
        snapshot_json,
        window_start,
        window_end,
        destination,
        length_days,
        buffer_days,
        timezone.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Pairs of existing bookings that already share days.
#[wasm_bindgen(js_name = "findDoubleBookings")]
pub fn find_double_bookings(bookings_json: &str, timezone: Option<String>) -> Result<String, JsValue> {
    find_double_bookings_impl(bookings_json, timezone.as_deref()).map_err(|e| JsValue::from_str(&e))
}
