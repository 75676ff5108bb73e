//! Property-based tests for the conflict checker using proptest.
//!
//! These tests verify invariants that should hold for *any* valid snapshot and
//! request, not just the specific examples in `conflict_tests.rs`.

use std::collections::BTreeSet;

use booking_engine::{
    check_conflict, check_conflict_with, find_double_bookings, find_first_open_range,
    open_windows, Booking, BookingRequest, CheckerConfig, ConflictReason, ConflictResult,
    DateRange, ProviderSnapshot,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies: generate valid bookings and requests
// ---------------------------------------------------------------------------

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
}

/// A valid range starting within ~2 months of the base date, 1-10 days long.
fn arb_range() -> impl Strategy<Value = DateRange> {
    (0i64..60, 0i64..10).prop_map(|(offset, len)| {
        let start = base() + Duration::days(offset);
        DateRange {
            start,
            end: start + Duration::days(len),
        }
    })
}

/// Destinations include spelling variants that must compare equal.
fn arb_destination() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Goa".to_string()),
        Just(" goa ".to_string()),
        Just("Assam".to_string()),
        Just("ASSAM".to_string()),
        Just("Goa Beach".to_string()),
        Just("Kerala".to_string()),
    ]
}

fn arb_bookings() -> impl Strategy<Value = Vec<Booking>> {
    prop::collection::vec((arb_destination(), arb_range()), 0..6).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (dest, range))| Booking::new(format!("b{}", i), dest, range))
            .collect()
    })
}

fn arb_blocked() -> impl Strategy<Value = BTreeSet<NaiveDate>> {
    prop::collection::btree_set((0i64..70).prop_map(|o| base() + Duration::days(o)), 0..5)
}

fn arb_request() -> impl Strategy<Value = BookingRequest> {
    (arb_destination(), arb_range()).prop_map(|(d, r)| BookingRequest::new(d, r))
}

fn arb_buffer() -> impl Strategy<Value = CheckerConfig> {
    (0u32..4).prop_map(CheckerConfig::with_buffer_days)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Empty history never conflicts
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn empty_history_never_conflicts(request in arb_request(), cfg in arb_buffer()) {
        let result = check_conflict_with(&request, &[], &BTreeSet::new(), &cfg).unwrap();
        prop_assert_eq!(result, ConflictResult::NoConflict);
    }
}

// ---------------------------------------------------------------------------
// Property 2: A blocked day inside the request always wins
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn blocked_date_always_wins(
        request in arb_request(),
        bookings in arb_bookings(),
        mut blocked in arb_blocked(),
        pick in 0i64..10,
    ) {
        let day = request.range.start + Duration::days(pick % request.range.len_days());
        blocked.insert(day);

        let result = check_conflict(&request, &bookings, &blocked).unwrap();

        prop_assert_eq!(result.reason(), Some(ConflictReason::BlockedDate));
        prop_assert!(result.conflicting_booking().is_none());
    }
}

// ---------------------------------------------------------------------------
// Property 3: Overlap is symmetric
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_is_symmetric(a in arb_range(), b in arb_range()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert_eq!(a.overlap_days(&b), b.overlap_days(&a));
        prop_assert_eq!(a.overlaps(&b), a.overlap_days(&b) > 0);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Same-destination adjacency is allowed
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn same_destination_adjacency_allowed(
        existing in arb_range(),
        len in 0i64..10,
        spelling in prop_oneof![Just("Goa"), Just("goa"), Just("  GOA  ")],
        cfg in arb_buffer(),
    ) {
        let start = existing.end + Duration::days(1);
        let request = BookingRequest::new(spelling, DateRange { start, end: start + Duration::days(len) });
        let bookings = vec![Booking::new("b0", "Goa", existing)];

        let result = check_conflict_with(&request, &bookings, &BTreeSet::new(), &cfg).unwrap();
        prop_assert_eq!(result, ConflictResult::NoConflict);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Different-destination adjacency is blocked
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn different_destination_adjacency_blocked(
        existing in arb_range(),
        gap in 0i64..=1,
        len in 0i64..10,
    ) {
        let start = existing.end + Duration::days(gap);
        let request = BookingRequest::new("Assam", DateRange { start, end: start + Duration::days(len) });
        let bookings = vec![Booking::new("b0", "Goa", existing)];

        let result = check_conflict(&request, &bookings, &BTreeSet::new()).unwrap();

        // A zero-day gap shares the boundary day, which the overlap rule catches first.
        let expected = if gap == 0 {
            ConflictReason::DirectOverlap
        } else {
            ConflictReason::InsufficientTravelBuffer
        };
        prop_assert_eq!(result.reason(), Some(expected));
        prop_assert_eq!(result.conflicting_booking().map(|b| b.id.as_str()), Some("b0"));
    }
}

// ---------------------------------------------------------------------------
// Property 6: Checking is idempotent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn check_is_idempotent(
        request in arb_request(),
        bookings in arb_bookings(),
        blocked in arb_blocked(),
        cfg in arb_buffer(),
    ) {
        let first = check_conflict_with(&request, &bookings, &blocked, &cfg).unwrap();
        let second = check_conflict_with(&request, &bookings, &blocked, &cfg).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Property 7: Open windows agree with the checker day for day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn request_accepted_iff_inside_open_window(
        request in arb_request(),
        bookings in arb_bookings(),
        blocked in arb_blocked(),
        cfg in arb_buffer(),
    ) {
        let snapshot = ProviderSnapshot::new(bookings, blocked);
        let window = DateRange {
            start: base() - Duration::days(5),
            end: base() + Duration::days(80),
        };

        let windows = open_windows(&snapshot, window, &request.destination, &cfg).unwrap();
        let inside_open = windows
            .iter()
            .any(|w| w.start <= request.range.start && request.range.end <= w.end);

        let result = check_conflict_with(&request, &snapshot.bookings, &snapshot.blocked_dates, &cfg).unwrap();
        prop_assert_eq!(inside_open, result == ConflictResult::NoConflict);

        // Windows are sorted, disjoint, and separated by at least one closed day.
        for pair in windows.windows(2) {
            prop_assert!(pair[0].end + Duration::days(1) < pair[1].start);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 8: First open range is clean and earliest
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn first_open_range_is_earliest_clean_fit(
        bookings in arb_bookings(),
        blocked in arb_blocked(),
        dest in arb_destination(),
        length in 1u32..8,
        cfg in arb_buffer(),
    ) {
        let snapshot = ProviderSnapshot::new(bookings, blocked);
        let window = DateRange { start: base(), end: base() + Duration::days(40) };
        let span = Duration::days(i64::from(length) - 1);

        let found = find_first_open_range(&snapshot, window, &dest, length, &cfg).unwrap();

        let accepted = |start: NaiveDate| {
            let req = BookingRequest::new(dest.clone(), DateRange { start, end: start + span });
            check_conflict_with(&req, &snapshot.bookings, &snapshot.blocked_dates, &cfg).unwrap()
                == ConflictResult::NoConflict
        };

        let last_start = window.end - span;
        let earliest = window.days().take_while(|d| *d <= last_start).find(|d| accepted(*d));

        prop_assert_eq!(found.map(|r| r.start), earliest);
        if let Some(r) = found {
            prop_assert_eq!(r.len_days(), i64::from(length));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 9: Audit reports exactly the overlapping pairs
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn audit_reports_exactly_overlapping_pairs(bookings in arb_bookings()) {
        let found = find_double_bookings(&bookings);

        let mut expected = 0;
        for (i, a) in bookings.iter().enumerate() {
            for b in &bookings[i + 1..] {
                if a.range.overlaps(&b.range) {
                    expected += 1;
                }
            }
        }
        prop_assert_eq!(found.len(), expected);
        for d in &found {
            prop_assert!(d.overlap_days >= 1);
        }
    }
}
