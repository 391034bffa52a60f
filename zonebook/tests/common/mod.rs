//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the zonebook library.

pub mod database;

use chrono::{Duration, TimeZone, Utc};

use zonebook::{Reservation, ReservationId, ReservationStatus, TimeSlot, ZoneId};

/// Creates a temporary directory for testing.
///
/// The directory will be automatically cleaned up when the returned
/// `TempDir` is dropped.
#[allow(dead_code)]
pub fn create_temp_dir() -> std::io::Result<tempfile::TempDir> {
    tempfile::tempdir()
}

/// One-hour slot on the given day of March 2026 at the given hour, UTC.
///
/// March 2026 starts on a Sunday, so day 2 is a Monday.
///
/// # Panics
///
/// Panics if the day or hour is out of range.
#[allow(dead_code)]
pub fn slot_on(day: u32, hour: u32) -> TimeSlot {
    let start = Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap();
    TimeSlot::new(start, start + Duration::hours(1)).unwrap()
}

/// Builder for creating test reservations with sensible defaults.
#[allow(dead_code)]
pub struct ReservationFixture {
    id: String,
    zone: String,
    facility: String,
    slot: TimeSlot,
    status: ReservationStatus,
    series: Option<String>,
}

#[allow(dead_code)]
impl ReservationFixture {
    /// Creates a new fixture builder with default values.
    ///
    /// Defaults:
    /// - id: "res-1"
    /// - zone: "grand-hall"
    /// - facility: "facility-1"
    /// - slot: Monday 2026-03-02, 09:00-10:00 UTC
    /// - status: Confirmed
    /// - series: None
    pub fn new() -> Self {
        Self {
            id: "res-1".to_string(),
            zone: "grand-hall".to_string(),
            facility: "facility-1".to_string(),
            slot: slot_on(2, 9),
            status: ReservationStatus::Confirmed,
            series: None,
        }
    }

    /// Sets the reservation identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the booked zone.
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    /// Sets the owning facility.
    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facility = facility.into();
        self
    }

    /// Sets the booked time slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slot = slot;
        self
    }

    /// Sets the lifecycle status.
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the recurrence series.
    pub fn with_series(mut self, series: impl Into<String>) -> Self {
        self.series = Some(series.into());
        self
    }

    /// Builds the reservation.
    ///
    /// # Panics
    ///
    /// Panics if any identifier is invalid. This is acceptable in test code
    /// where we want to fail fast on invalid fixtures.
    pub fn build(self) -> Reservation {
        let series = self
            .series
            .map(|s| ReservationId::new(s).expect("fixture should have valid series id"));

        Reservation::builder(
            ReservationId::new(self.id).expect("fixture should have valid reservation id"),
            ZoneId::new(self.zone).expect("fixture should have valid zone id"),
            self.facility,
            self.slot,
        )
        .status(self.status)
        .series(series)
        .build()
        .expect("fixture should build valid reservation")
    }
}

impl Default for ReservationFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_default() {
        let reservation = ReservationFixture::new().build();
        assert_eq!(reservation.id().as_str(), "res-1");
        assert_eq!(reservation.zone_id().as_str(), "grand-hall");
        assert_eq!(reservation.status(), ReservationStatus::Confirmed);
        assert_eq!(reservation.series_id(), None);
    }

    #[test]
    fn test_fixture_custom() {
        let reservation = ReservationFixture::new()
            .with_id("res-9")
            .with_zone("annex")
            .with_facility("facility-2")
            .with_slot(slot_on(5, 14))
            .with_status(ReservationStatus::PendingApproval)
            .with_series("res-base")
            .build();

        assert_eq!(reservation.id().as_str(), "res-9");
        assert_eq!(reservation.zone_id().as_str(), "annex");
        assert_eq!(reservation.facility_id(), "facility-2");
        assert_eq!(reservation.slot(), slot_on(5, 14));
        assert_eq!(reservation.status(), ReservationStatus::PendingApproval);
        assert_eq!(reservation.series_id().map(|s| s.as_str()), Some("res-base"));
    }

    #[test]
    fn test_temp_dir_creation() {
        let temp_dir = create_temp_dir().expect("should create temp dir");
        assert!(temp_dir.path().exists());
    }
}
