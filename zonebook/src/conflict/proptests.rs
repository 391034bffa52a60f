//! Property-based tests for conflict resolution.
//!
//! These tests run the resolver against randomly populated in-memory venues
//! and assert the invariants of the report it produces.

use super::ConflictResolver;
use crate::store::test_util::{create_test_reservation, create_test_zone, test_slot};
use crate::store::{MemoryStore, ReservationStore};
use crate::{Reservation, ReservationId, ReservationStatus, Zone, ZoneId};
use proptest::prelude::*;

/// All zones in the generated venue: a main hall with two subzones, a
/// standalone annex, and a deactivated wing.
const ZONES: [&str; 5] = ["hall-a", "hall-a-east", "hall-a-west", "annex", "closed-wing"];

fn venue() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.add_zone(create_test_zone("hall-a", None, true));
    store.add_zone(create_test_zone("hall-a-east", Some("hall-a"), false));
    store.add_zone(create_test_zone("hall-a-west", Some("hall-a"), false));
    store.add_zone(create_test_zone("annex", None, false));
    store.add_zone(
        Zone::builder(ZoneId::new("closed-wing").unwrap())
            .active(false)
            .build()
            .unwrap(),
    );
    store
}

// Strategy for placing one booking: zone index, day of month, start hour
fn placement_strategy() -> impl Strategy<Value = (usize, u32, u32)> {
    (0..ZONES.len(), 1..28u32, 0..23u32)
}

fn bookings_strategy() -> impl Strategy<Value = Vec<(usize, u32, u32)>> {
    prop::collection::vec(placement_strategy(), 0..8)
}

fn populate(bookings: &[(usize, u32, u32)]) -> MemoryStore {
    let mut store = venue();
    for (i, &(zone_idx, day, hour)) in bookings.iter().enumerate() {
        let id = format!("res-{i}");
        let reservation = create_test_reservation(&id, ZONES[zone_idx], test_slot(day, hour));
        store.insert(&reservation).unwrap();
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Checking the same request twice yields the same report
    #[test]
    fn check_is_deterministic(
        bookings in bookings_strategy(),
        target in 0..ZONES.len(),
        day in 1..28u32,
        hour in 0..23u32
    ) {
        let store = populate(&bookings);
        let resolver = ConflictResolver::new(&store, &store);
        let zone_id = ZoneId::new(ZONES[target]).unwrap();
        let slot = test_slot(day, hour);

        let first = resolver.check(&zone_id, slot, None).unwrap();
        let second = resolver.check(&zone_id, slot, None).unwrap();
        prop_assert_eq!(first, second);
    }

    // A free slot never comes with alternatives
    #[test]
    fn free_slot_offers_no_alternatives(
        bookings in bookings_strategy(),
        target in 0..ZONES.len(),
        day in 1..28u32,
        hour in 0..23u32
    ) {
        let store = populate(&bookings);
        let resolver = ConflictResolver::new(&store, &store);
        let zone_id = ZoneId::new(ZONES[target]).unwrap();

        let report = resolver.check(&zone_id, test_slot(day, hour), None).unwrap();
        if !report.has_conflict() {
            prop_assert!(report.alternatives().is_empty());
        }
    }

    // The requested zone is never its own alternative
    #[test]
    fn requested_zone_never_an_alternative(
        bookings in bookings_strategy(),
        target in 0..ZONES.len(),
        day in 1..28u32,
        hour in 0..23u32
    ) {
        let store = populate(&bookings);
        let resolver = ConflictResolver::new(&store, &store);
        let zone_id = ZoneId::new(ZONES[target]).unwrap();

        let report = resolver.check(&zone_id, test_slot(day, hour), None).unwrap();
        prop_assert!(report.alternatives().iter().all(|z| z.id() != &zone_id));
    }

    // Inactive zones are never offered as alternatives
    #[test]
    fn alternatives_are_active(
        bookings in bookings_strategy(),
        target in 0..ZONES.len(),
        day in 1..28u32,
        hour in 0..23u32
    ) {
        let store = populate(&bookings);
        let resolver = ConflictResolver::new(&store, &store);
        let zone_id = ZoneId::new(ZONES[target]).unwrap();

        let report = resolver.check(&zone_id, test_slot(day, hour), None).unwrap();
        prop_assert!(report.alternatives().iter().all(Zone::is_active));
    }

    // Every offered alternative is actually free for the requested slot
    #[test]
    fn alternatives_are_free(
        bookings in bookings_strategy(),
        target in 0..ZONES.len(),
        day in 1..28u32,
        hour in 0..23u32
    ) {
        let store = populate(&bookings);
        let resolver = ConflictResolver::new(&store, &store);
        let zone_id = ZoneId::new(ZONES[target]).unwrap();
        let slot = test_slot(day, hour);

        let report = resolver.check(&zone_id, slot, None).unwrap();
        for alternative in report.alternatives() {
            let blocking = resolver.find_blocking(alternative.id(), slot, None).unwrap();
            prop_assert!(blocking.is_empty());
        }
    }

    // Blocking reservations come back sorted by start time, then id
    #[test]
    fn conflicting_is_sorted(
        bookings in bookings_strategy(),
        target in 0..ZONES.len(),
        day in 1..28u32,
        hour in 0..23u32
    ) {
        let store = populate(&bookings);
        let resolver = ConflictResolver::new(&store, &store);
        let zone_id = ZoneId::new(ZONES[target]).unwrap();

        let report = resolver.check(&zone_id, test_slot(day, hour), None).unwrap();
        for window in report.conflicting().windows(2) {
            let first = (window[0].slot().start(), window[0].id());
            let second = (window[1].slot().start(), window[1].id());
            prop_assert!(first <= second);
        }
    }

    // Every blocking reservation genuinely overlaps the requested slot
    #[test]
    fn conflicting_overlaps_requested_slot(
        bookings in bookings_strategy(),
        target in 0..ZONES.len(),
        day in 1..28u32,
        hour in 0..23u32
    ) {
        let store = populate(&bookings);
        let resolver = ConflictResolver::new(&store, &store);
        let zone_id = ZoneId::new(ZONES[target]).unwrap();
        let slot = test_slot(day, hour);

        let report = resolver.check(&zone_id, slot, None).unwrap();
        prop_assert!(report.conflicting().iter().all(|r| r.slot().overlaps(&slot)));
    }

    // An excluded reservation never appears among the blockers
    #[test]
    fn excluded_reservation_never_blocks(
        bookings in prop::collection::vec(placement_strategy(), 1..8),
        target in 0..ZONES.len(),
        day in 1..28u32,
        hour in 0..23u32
    ) {
        let store = populate(&bookings);
        let resolver = ConflictResolver::new(&store, &store);
        let zone_id = ZoneId::new(ZONES[target]).unwrap();
        let excluded = ReservationId::new("res-0").unwrap();

        let report = resolver
            .check(&zone_id, test_slot(day, hour), Some(&excluded))
            .unwrap();
        prop_assert!(report.conflicting().iter().all(|r| r.id() != &excluded));
    }

    // Cancelled bookings never conflict, no matter how densely they overlap
    #[test]
    fn inert_bookings_never_conflict(
        bookings in bookings_strategy(),
        target in 0..ZONES.len(),
        day in 1..28u32,
        hour in 0..23u32
    ) {
        let mut store = venue();
        for (i, &(zone_idx, b_day, b_hour)) in bookings.iter().enumerate() {
            let reservation = Reservation::builder(
                ReservationId::new(format!("res-{i}")).unwrap(),
                ZoneId::new(ZONES[zone_idx]).unwrap(),
                "facility-1",
                test_slot(b_day, b_hour),
            )
            .status(ReservationStatus::Cancelled)
            .build()
            .unwrap();
            store.insert(&reservation).unwrap();
        }
        let resolver = ConflictResolver::new(&store, &store);
        let zone_id = ZoneId::new(ZONES[target]).unwrap();

        let report = resolver.check(&zone_id, test_slot(day, hour), None).unwrap();
        prop_assert!(!report.has_conflict());
    }
}
