//! In-memory store backend.
//!
//! This module provides a transient implementation of the store traits,
//! useful for embedding the engine without a database file and for tests
//! that do not want filesystem state.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::{Reservation, ReservationId, TimeSlot, Zone, ZoneId};

use super::{ReservationStore, ZoneDirectory};

/// A transient store holding reservations and zones in memory.
///
/// Behaves like [`super::Database`] for the operations the engine needs,
/// minus persistence: duplicate reservation ids are rejected, inert
/// statuses never occupy their slot, and query results use the same
/// ordering as the SQL backend.
///
/// # Examples
///
/// ```
/// use zonebook::store::MemoryStore;
/// use zonebook::{Zone, ZoneId};
///
/// let mut store = MemoryStore::new();
/// let zone = Zone::builder(ZoneId::new("grand-hall").unwrap())
///     .main_zone(true)
///     .build()
///     .unwrap();
/// store.add_zone(zone);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    reservations: Vec<Reservation>,
    zones: BTreeMap<ZoneId, Zone>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a zone definition.
    pub fn add_zone(&mut self, zone: Zone) {
        self.zones.insert(zone.id().clone(), zone);
    }

    /// Returns all stored reservations in insertion order.
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }
}

impl ReservationStore for MemoryStore {
    fn find_overlapping(
        &self,
        zone_id: &ZoneId,
        slot: TimeSlot,
        exclude: Option<&ReservationId>,
    ) -> Result<Vec<Reservation>> {
        let mut hits: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.zone_id() == zone_id)
            .filter(|r| r.status().is_occupying())
            .filter(|r| r.slot().overlaps(&slot))
            .filter(|r| exclude != Some(r.id()))
            .cloned()
            .collect();

        hits.sort_by(|a, b| {
            a.slot()
                .start()
                .cmp(&b.slot().start())
                .then_with(|| a.id().cmp(b.id()))
        });

        Ok(hits)
    }

    fn insert(&mut self, reservation: &Reservation) -> Result<()> {
        if self.reservations.iter().any(|r| r.id() == reservation.id()) {
            return Err(Error::Validation {
                field: "reservation_id".into(),
                message: format!("reservation '{}' already exists", reservation.id()),
            });
        }
        self.reservations.push(reservation.clone());
        Ok(())
    }
}

impl ZoneDirectory for MemoryStore {
    fn zone(&self, id: &ZoneId) -> Result<Option<Zone>> {
        Ok(self.zones.get(id).cloned())
    }

    fn active_zones(&self) -> Result<Vec<Zone>> {
        Ok(self
            .zones
            .values()
            .filter(|z| z.is_active())
            .cloned()
            .collect())
    }

    fn child_zones(&self, parent: &ZoneId) -> Result<Vec<Zone>> {
        Ok(self
            .zones
            .values()
            .filter(|z| z.parent_zone_id() == Some(parent))
            .cloned()
            .collect())
    }
}
