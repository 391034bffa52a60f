//! Storage layer for reservations and the zone hierarchy.
//!
//! This module provides a SQLite-based storage backend for bookings and
//! zones, including connection management, schema versioning, and CRUD
//! operations, plus an in-memory backend for transient use. The engines
//! in [`crate::conflict`] and [`crate::recurrence`] talk to storage only
//! through the [`ReservationStore`] and [`ZoneDirectory`] traits defined
//! here.
//!
//! # Examples
//!
//! ```no_run
//! use zonebook::store::{Database, DatabaseConfig};
//! use zonebook::{Reservation, ReservationId, TimeSlot, ZoneId};
//! use chrono::{TimeZone, Utc};
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/zonebook.db");
//! let mut db = Database::open(config).unwrap();
//!
//! // Create a booking
//! let slot = TimeSlot::new(
//!     Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap(),
//! ).unwrap();
//! let reservation = Reservation::builder(
//!     ReservationId::new("res-1").unwrap(),
//!     ZoneId::new("grand-hall").unwrap(),
//!     "customer-17",
//!     slot,
//! ).build().unwrap();
//! db.insert_reservation(&reservation).unwrap();
//!
//! // Query what occupies the slot
//! let zone = ZoneId::new("grand-hall").unwrap();
//! let busy = Database::query_overlapping(db.connection(), &zone, slot, None).unwrap();
//! ```

mod config;
mod connection;
mod memory;
pub mod migrations;
mod operations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;
pub use memory::MemoryStore;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};

use crate::error::Result;
use crate::{Reservation, ReservationId, TimeSlot, Zone, ZoneId};

/// Read and write access to stored reservations.
///
/// Implemented by [`Database`] over `SQLite` and by [`MemoryStore`] for
/// transient use. The conflict and recurrence engines are generic over
/// this trait, so alternative backends can be plugged in.
///
/// # Examples
///
/// ```
/// use zonebook::store::{MemoryStore, ReservationStore};
/// use zonebook::{Reservation, ReservationId, TimeSlot, ZoneId};
/// use chrono::{TimeZone, Utc};
///
/// let mut store = MemoryStore::new();
///
/// let slot = TimeSlot::new(
///     Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap(),
/// ).unwrap();
/// let booking = Reservation::builder(
///     ReservationId::new("res-1").unwrap(),
///     ZoneId::new("grand-hall").unwrap(),
///     "customer-17",
///     slot,
/// ).build().unwrap();
/// store.insert(&booking).unwrap();
///
/// let zone = ZoneId::new("grand-hall").unwrap();
/// let busy = store.find_overlapping(&zone, slot, None).unwrap();
/// assert_eq!(busy.len(), 1);
/// ```
pub trait ReservationStore {
    /// Finds occupying reservations in a zone whose slots overlap `slot`.
    ///
    /// Overlap is half-open, so back-to-back bookings do not collide.
    /// Cancelled and rejected reservations are never returned. When
    /// `exclude` is set, the named reservation is ignored so an existing
    /// booking can probe a new slot without blocking itself. Results are
    /// ordered by start time, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend query fails.
    fn find_overlapping(
        &self,
        zone_id: &ZoneId,
        slot: TimeSlot,
        exclude: Option<&ReservationId>,
    ) -> Result<Vec<Reservation>>;

    /// Inserts a new reservation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a reservation with the same id
    /// already exists, or a storage error if the write fails.
    fn insert(&mut self, reservation: &Reservation) -> Result<()>;
}

/// Read access to the zone hierarchy.
///
/// Implemented by [`Database`] and [`MemoryStore`]. Conflict cascades
/// use it to walk parent and child zones; alternative-zone suggestions
/// use it to enumerate active zones.
pub trait ZoneDirectory {
    /// Looks up a zone by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend query fails.
    fn zone(&self, id: &ZoneId) -> Result<Option<Zone>>;

    /// Lists all active zones, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend query fails.
    fn active_zones(&self) -> Result<Vec<Zone>>;

    /// Lists the direct children of a zone, ordered by id.
    ///
    /// Inactive children are included: their reservations still occupy
    /// physical space inside the parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend query fails.
    fn child_zones(&self, parent: &ZoneId) -> Result<Vec<Zone>>;
}
