//! Conflict resolution over a reservation store and zone directory.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::{ReservationStore, ZoneDirectory};
use crate::{Reservation, ReservationId, TimeSlot, Zone, ZoneId};

/// The outcome of a conflict check.
///
/// `conflicting` holds every occupying reservation that blocks the requested
/// slot, across the checked zone, its parent, and (for main zones) its
/// children. `alternatives` holds other active zones that are free for the
/// same slot; it is only populated when a conflict was found.
///
/// # Examples
///
/// ```
/// use zonebook::conflict::ConflictResolver;
/// use zonebook::store::MemoryStore;
/// use zonebook::{TimeSlot, Zone, ZoneId};
/// use chrono::{TimeZone, Utc};
///
/// let mut store = MemoryStore::new();
/// store.add_zone(
///     Zone::builder(ZoneId::new("grand-hall").unwrap())
///         .main_zone(true)
///         .build()
///         .unwrap(),
/// );
///
/// let slot = TimeSlot::new(
///     Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap(),
/// ).unwrap();
///
/// let resolver = ConflictResolver::new(&store, &store);
/// let report = resolver
///     .check(&ZoneId::new("grand-hall").unwrap(), slot, None)
///     .unwrap();
/// assert!(!report.has_conflict());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictReport {
    conflicting: Vec<Reservation>,
    alternatives: Vec<Zone>,
}

impl ConflictReport {
    /// Returns true if any reservation blocks the requested slot.
    #[must_use]
    pub fn has_conflict(&self) -> bool {
        !self.conflicting.is_empty()
    }

    /// The reservations blocking the requested slot, ordered by start
    /// time, then id.
    #[must_use]
    pub fn conflicting(&self) -> &[Reservation] {
        &self.conflicting
    }

    /// Other active zones free for the requested slot.
    ///
    /// Empty when no conflict was found.
    #[must_use]
    pub fn alternatives(&self) -> &[Zone] {
        &self.alternatives
    }
}

/// Hierarchy-aware conflict detector.
///
/// The resolver borrows a [`ReservationStore`] for overlap queries and a
/// [`ZoneDirectory`] for hierarchy lookups. Both may be the same backing
/// object, as with [`crate::store::Database`] or
/// [`crate::store::MemoryStore`].
pub struct ConflictResolver<'a, S, Z> {
    store: &'a S,
    zones: &'a Z,
}

impl<'a, S, Z> ConflictResolver<'a, S, Z>
where
    S: ReservationStore,
    Z: ZoneDirectory,
{
    /// Creates a resolver over the given store and zone directory.
    pub fn new(store: &'a S, zones: &'a Z) -> Self {
        Self { store, zones }
    }

    /// Checks whether a slot in a zone is free, and suggests alternatives
    /// when it is not.
    ///
    /// The check cascades through the hierarchy:
    /// 1. Occupying reservations on the zone itself.
    /// 2. Plus those on the parent zone, when one exists.
    /// 3. Plus, for main zones, those on every direct child zone.
    ///
    /// When any blocking reservation is found, every *other* active zone is
    /// probed once with the same cascade, and the free ones are reported as
    /// alternatives. The alternative search never recurses.
    ///
    /// Pass `exclude` when re-checking the slot of an existing booking
    /// (for example a reschedule) so it does not block itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZoneNotFound`] if `zone_id` does not name a known
    /// zone, or a storage error if a query fails.
    pub fn check(
        &self,
        zone_id: &ZoneId,
        slot: TimeSlot,
        exclude: Option<&ReservationId>,
    ) -> Result<ConflictReport> {
        let zone = self.require_zone(zone_id)?;
        let conflicting = self.blocking_for(&zone, slot, exclude)?;

        let mut alternatives = Vec::new();
        if !conflicting.is_empty() {
            log::debug!(
                "slot {slot} in zone '{zone_id}' blocked by {} reservation(s)",
                conflicting.len()
            );
            for candidate in self.zones.active_zones()? {
                if candidate.id() == zone_id {
                    continue;
                }
                if self.blocking_for(&candidate, slot, exclude)?.is_empty() {
                    alternatives.push(candidate);
                }
            }
        }

        Ok(ConflictReport {
            conflicting,
            alternatives,
        })
    }

    /// Finds the reservations blocking a slot in a zone.
    ///
    /// This is the cascade of [`check`](Self::check) without the
    /// alternative search. The recurrence expander uses it to probe each
    /// candidate date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZoneNotFound`] if `zone_id` does not name a known
    /// zone, or a storage error if a query fails.
    pub fn find_blocking(
        &self,
        zone_id: &ZoneId,
        slot: TimeSlot,
        exclude: Option<&ReservationId>,
    ) -> Result<Vec<Reservation>> {
        let zone = self.require_zone(zone_id)?;
        self.blocking_for(&zone, slot, exclude)
    }

    fn require_zone(&self, zone_id: &ZoneId) -> Result<Zone> {
        self.zones.zone(zone_id)?.ok_or_else(|| Error::ZoneNotFound {
            zone_id: zone_id.clone(),
        })
    }

    /// Steps 1-3 of the cascade for an already-resolved zone.
    ///
    /// The zone, its parent, and its children are disjoint, so the merged
    /// result cannot contain duplicates; it is re-sorted by start time and
    /// id to stay deterministic.
    fn blocking_for(
        &self,
        zone: &Zone,
        slot: TimeSlot,
        exclude: Option<&ReservationId>,
    ) -> Result<Vec<Reservation>> {
        let mut blocking = self.store.find_overlapping(zone.id(), slot, exclude)?;

        if let Some(parent) = zone.parent_zone_id() {
            blocking.extend(self.store.find_overlapping(parent, slot, exclude)?);
        }

        if zone.is_main_zone() {
            for child in self.zones.child_zones(zone.id())? {
                blocking.extend(self.store.find_overlapping(child.id(), slot, exclude)?);
            }
        }

        blocking.sort_by(|a, b| {
            a.slot()
                .start()
                .cmp(&b.slot().start())
                .then_with(|| a.id().cmp(b.id()))
        });

        Ok(blocking)
    }
}
