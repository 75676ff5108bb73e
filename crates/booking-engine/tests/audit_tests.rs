//! Tests for double-booking detection over existing bookings.

use booking_engine::{find_double_bookings, Booking, DateRange};
use chrono::NaiveDate;

/// Helper to create a booking spanning days of March 2026.
fn booking(id: &str, destination: &str, start_day: u32, end_day: u32) -> Booking {
    Booking::new(
        id,
        destination,
        DateRange {
            start: NaiveDate::from_ymd_opt(2026, 3, start_day).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 3, end_day).unwrap(),
        },
    )
}

#[test]
fn overlapping_pair_detected_with_shared_days() {
    let bookings = vec![booking("a", "Goa", 1, 5), booking("b", "Assam", 4, 8)];

    let found = find_double_bookings(&bookings);

    assert_eq!(found.len(), 1, "should detect exactly one double booking");
    assert_eq!(found[0].booking_a.id, "a");
    assert_eq!(found[0].booking_b.id, "b");
    assert_eq!(found[0].overlap_days, 2, "Mar 4 and Mar 5 are shared");
}

#[test]
fn back_to_back_bookings_are_not_double_booked() {
    // Buffer rules apply to new requests only; the audit looks for shared days.
    let bookings = vec![booking("a", "Goa", 1, 5), booking("b", "Assam", 6, 8)];
    assert!(find_double_bookings(&bookings).is_empty());
}

#[test]
fn shared_boundary_day_counts_as_one_day() {
    let bookings = vec![booking("a", "Goa", 1, 5), booking("b", "Goa", 5, 8)];

    let found = find_double_bookings(&bookings);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].overlap_days, 1);
}

#[test]
fn contained_booking_overlap_is_its_length() {
    let bookings = vec![booking("long", "Goa", 1, 20), booking("short", "Goa", 10, 12)];

    let found = find_double_bookings(&bookings);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].overlap_days, 3);
}

#[test]
fn every_overlapping_pair_reported_in_input_order() {
    let bookings = vec![
        booking("a", "Goa", 1, 10),
        booking("b", "Goa", 5, 6),
        booking("c", "Goa", 9, 12),
        booking("d", "Goa", 20, 21),
    ];

    let pairs: Vec<(String, String)> = find_double_bookings(&bookings)
        .into_iter()
        .map(|d| (d.booking_a.id, d.booking_b.id))
        .collect();

    assert_eq!(
        pairs,
        vec![
            ("a".to_string(), "b".to_string()),
            ("a".to_string(), "c".to_string()),
        ]
    );
}

#[test]
fn inverted_bookings_are_skipped() {
    let bookings = vec![booking("bad", "Goa", 9, 2), booking("ok", "Goa", 3, 4)];
    assert!(find_double_bookings(&bookings).is_empty());
}

#[test]
fn empty_list_has_no_double_bookings() {
    assert!(find_double_bookings(&[]).is_empty());
}
