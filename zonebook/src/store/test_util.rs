//! Shared test utilities for store unit tests.
//!
//! This module provides helper functions used across multiple store test modules.

use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use crate::store::{Database, DatabaseConfig};
use crate::{Reservation, ReservationId, TimeSlot, Zone, ZoneId};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates a one-hour slot on the given March 2026 day at the given hour.
///
/// # Panics
///
/// Panics if the day or hour is out of range.
#[must_use]
pub fn test_slot(day: u32, hour: u32) -> TimeSlot {
    let start = Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, day, hour + 1, 0, 0).unwrap();
    TimeSlot::new(start, end).unwrap()
}

/// Creates a test reservation in the given zone.
///
/// Timestamps are pinned to whole seconds so values survive a database
/// round trip unchanged.
///
/// # Panics
///
/// Panics if any identifier is invalid.
#[must_use]
pub fn create_test_reservation(id: &str, zone: &str, slot: TimeSlot) -> Reservation {
    let booked_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    Reservation::builder(
        ReservationId::new(id).unwrap(),
        ZoneId::new(zone).unwrap(),
        "facility-1",
        slot,
    )
    .created_at(booked_at)
    .updated_at(booked_at)
    .build()
    .unwrap()
}

/// Creates an active test zone, optionally parented.
///
/// # Panics
///
/// Panics if any identifier is invalid.
#[must_use]
pub fn create_test_zone(id: &str, parent: Option<&str>, main_zone: bool) -> Zone {
    Zone::builder(ZoneId::new(id).unwrap())
        .parent(parent.map(|p| ZoneId::new(p).unwrap()))
        .main_zone(main_zone)
        .build()
        .unwrap()
}
