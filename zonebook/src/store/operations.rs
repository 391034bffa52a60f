//! Database CRUD operations for reservations and zones.
//!
//! This module implements all create, read, update, and delete operations
//! for bookings and the zone hierarchy, including the overlap query that
//! backs conflict detection.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::{Error, Result};
use crate::{Reservation, ReservationId, ReservationStatus, TimeSlot, Zone, ZoneId};

use super::connection::Database;
use super::schema::{INSERT_RESERVATION, INSERT_ZONE};
use super::{ReservationStore, ZoneDirectory};

/// Converts Unix epoch seconds from the database to a UTC timestamp.
///
/// # Errors
///
/// Returns an error if the seconds value is outside the representable range.
pub(super) fn unix_secs_to_datetime(secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::ToSqlConversionFailure(Box::new(crate::reservation::ValidationError {
            field: "timestamp".into(),
            message: format!("timestamp {secs} is out of range"),
        }))
    })
}

/// Helper function to deserialize a reservation from a database row.
///
/// Expects row fields in this order: id, `zone_id`, `facility_id`, `start_at`,
/// `end_at`, status, `series_id`, `created_at`, `updated_at`
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: String = row.get(0)?;
    let zone_id: String = row.get(1)?;
    let facility_id: String = row.get(2)?;
    let start_secs: i64 = row.get(3)?;
    let end_secs: i64 = row.get(4)?;
    let status: String = row.get(5)?;
    let series_id: Option<String> = row.get(6)?;
    let created_secs: i64 = row.get(7)?;
    let updated_secs: i64 = row.get(8)?;

    let id = ReservationId::new(id)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let zone_id = ZoneId::new(zone_id)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let slot = TimeSlot::new(
        unix_secs_to_datetime(start_secs)?,
        unix_secs_to_datetime(end_secs)?,
    )
    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let status = status
        .parse::<ReservationStatus>()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let series_id = series_id
        .map(ReservationId::new)
        .transpose()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Reservation::builder(id, zone_id, facility_id, slot)
        .status(status)
        .series(series_id)
        .created_at(unix_secs_to_datetime(created_secs)?)
        .updated_at(unix_secs_to_datetime(updated_secs)?)
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Helper function to deserialize a zone from a database row.
///
/// Expects row fields in this order: id, name, `parent_zone_id`,
/// `is_main_zone`, `is_active`
fn row_to_zone(row: &rusqlite::Row<'_>) -> rusqlite::Result<Zone> {
    let id: String = row.get(0)?;
    let name: Option<String> = row.get(1)?;
    let parent: Option<String> = row.get(2)?;
    let is_main_zone: bool = row.get(3)?;
    let is_active: bool = row.get(4)?;

    let id = ZoneId::new(id).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let parent = parent
        .map(ZoneId::new)
        .transpose()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Zone::builder(id)
        .name(name)
        .parent(parent)
        .main_zone(is_main_zone)
        .active(is_active)
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

// SQL statements for CRUD operations
const SELECT_RESERVATION: &str = r"
    SELECT id, zone_id, facility_id, start_at, end_at, status, series_id, created_at, updated_at
    FROM reservations
    WHERE id = ?
";

const SELECT_OVERLAPPING: &str = r"
    SELECT id, zone_id, facility_id, start_at, end_at, status, series_id, created_at, updated_at
    FROM reservations
    WHERE zone_id = ?1
      AND start_at < ?3
      AND end_at > ?2
      AND status NOT IN ('cancelled', 'rejected')
      AND (?4 IS NULL OR id <> ?4)
    ORDER BY start_at, id
";

const LIST_SERIES: &str = r"
    SELECT id, zone_id, facility_id, start_at, end_at, status, series_id, created_at, updated_at
    FROM reservations
    WHERE id = ?1 OR series_id = ?1
    ORDER BY start_at, id
";

const LIST_ZONE_RESERVATIONS: &str = r"
    SELECT id, zone_id, facility_id, start_at, end_at, status, series_id, created_at, updated_at
    FROM reservations
    WHERE zone_id = ?
    ORDER BY start_at, id
";

const UPDATE_STATUS: &str = r"
    UPDATE reservations
    SET status = ?, updated_at = ?
    WHERE id = ?
";

const DELETE_RESERVATION: &str = r"
    DELETE FROM reservations
    WHERE id = ?
";

const SELECT_ZONE: &str = r"
    SELECT id, name, parent_zone_id, is_main_zone, is_active
    FROM zones
    WHERE id = ?
";

const LIST_ACTIVE_ZONES: &str = r"
    SELECT id, name, parent_zone_id, is_main_zone, is_active
    FROM zones
    WHERE is_active = 1
    ORDER BY id
";

const LIST_CHILD_ZONES: &str = r"
    SELECT id, name, parent_zone_id, is_main_zone, is_active
    FROM zones
    WHERE parent_zone_id = ?
    ORDER BY id
";

impl Database {
    /// Inserts a new reservation into the database.
    ///
    /// This operation uses a transaction with IMMEDIATE mode to ensure
    /// atomicity under concurrent writers. Reservation identifiers are
    /// immutable, so inserting an id that already exists is a validation
    /// error rather than an update.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A reservation with the same id already exists
    /// - The transaction cannot be started or committed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zonebook::store::{Database, DatabaseConfig};
    /// use zonebook::{Reservation, ReservationId, TimeSlot, ZoneId};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let config = DatabaseConfig::new("/tmp/zonebook.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let slot = TimeSlot::new(
    ///     Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap(),
    /// ).unwrap();
    /// let reservation = Reservation::builder(
    ///     ReservationId::new("res-1").unwrap(),
    ///     ZoneId::new("grand-hall").unwrap(),
    ///     "customer-17",
    ///     slot,
    /// ).build().unwrap();
    ///
    /// db.insert_reservation(&reservation).unwrap();
    /// ```
    pub fn insert_reservation(&mut self, reservation: &Reservation) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let result = tx.execute(
            INSERT_RESERVATION,
            params![
                reservation.id().as_str(),
                reservation.zone_id().as_str(),
                reservation.facility_id(),
                reservation.slot().start().timestamp(),
                reservation.slot().end().timestamp(),
                reservation.status().as_str(),
                reservation.series_id().map(|id| id.as_str()),
                reservation.created_at().timestamp(),
                reservation.updated_at().timestamp(),
            ],
        );

        match result {
            Ok(_) => {
                tx.commit()?;
                Ok(())
            }
            Err(e) if e.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) => {
                Err(Error::Validation {
                    field: "reservation_id".into(),
                    message: format!("reservation '{}' already exists", reservation.id()),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Updates the status of a reservation and bumps its `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation was found and updated
    /// - `Ok(false)` if the reservation was not found
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zonebook::store::{Database, DatabaseConfig};
    /// use zonebook::{ReservationId, ReservationStatus};
    ///
    /// let config = DatabaseConfig::new("/tmp/zonebook.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let id = ReservationId::new("res-1").unwrap();
    /// let updated = db.update_reservation_status(&id, ReservationStatus::Cancelled).unwrap();
    /// ```
    pub fn update_reservation_status(
        &mut self,
        id: &ReservationId,
        status: ReservationStatus,
    ) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let now = Utc::now().timestamp();
        let rows_affected = tx.execute(UPDATE_STATUS, params![status.as_str(), now, id.as_str()])?;

        tx.commit()?;
        Ok(rows_affected > 0)
    }

    /// Deletes a reservation from the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation was found and deleted
    /// - `Ok(false)` if the reservation was not found
    pub fn delete_reservation(&mut self, id: &ReservationId) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows_affected = tx.execute(DELETE_RESERVATION, params![id.as_str()])?;

        tx.commit()?;
        Ok(rows_affected > 0)
    }

    /// Creates or replaces a zone definition.
    ///
    /// Zone definitions are reference data and may be re-seeded, so this
    /// is an upsert.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or insert fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zonebook::store::{Database, DatabaseConfig};
    /// use zonebook::{Zone, ZoneId};
    ///
    /// let config = DatabaseConfig::new("/tmp/zonebook.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let zone = Zone::builder(ZoneId::new("grand-hall").unwrap())
    ///     .main_zone(true)
    ///     .build()
    ///     .unwrap();
    /// db.upsert_zone(&zone).unwrap();
    /// ```
    pub fn upsert_zone(&mut self, zone: &Zone) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_ZONE,
            params![
                zone.id().as_str(),
                zone.name(),
                zone.parent_zone_id().map(ZoneId::as_str),
                zone.is_main_zone(),
                zone.is_active(),
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Retrieves a reservation from the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` if the reservation exists
    /// - `Ok(None)` if the reservation doesn't exist
    /// - `Err(_)` if a database error occurs
    pub fn get_reservation(conn: &Connection, id: &ReservationId) -> Result<Option<Reservation>> {
        let mut stmt = conn.prepare(SELECT_RESERVATION)?;

        match stmt.query_row(params![id.as_str()], row_to_reservation) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Finds reservations in a zone whose slots overlap the given slot.
    ///
    /// Overlap is half-open: a reservation ending exactly when `slot`
    /// starts does not overlap it. Cancelled and rejected reservations
    /// never occupy their slot and are excluded, as is the reservation
    /// named by `exclude` (used when rescheduling an existing booking).
    /// Results are ordered by start time, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zonebook::store::{Database, DatabaseConfig};
    /// use zonebook::{TimeSlot, ZoneId};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let config = DatabaseConfig::new("/tmp/zonebook.db");
    /// let db = Database::open(config).unwrap();
    ///
    /// let slot = TimeSlot::new(
    ///     Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap(),
    /// ).unwrap();
    /// let zone = ZoneId::new("grand-hall").unwrap();
    ///
    /// let busy = Database::query_overlapping(db.connection(), &zone, slot, None).unwrap();
    /// ```
    pub fn query_overlapping(
        conn: &Connection,
        zone_id: &ZoneId,
        slot: TimeSlot,
        exclude: Option<&ReservationId>,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(SELECT_OVERLAPPING)?;

        let reservations = stmt
            .query_map(
                params![
                    zone_id.as_str(),
                    slot.start().timestamp(),
                    slot.end().timestamp(),
                    exclude.map(|id| id.as_str()),
                ],
                row_to_reservation,
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(reservations)
    }

    /// Lists a recurring series: the base reservation plus every
    /// materialized instance that points back to it.
    ///
    /// Results are ordered by start time, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    pub fn list_series(conn: &Connection, series_id: &ReservationId) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(LIST_SERIES)?;

        let reservations = stmt
            .query_map(params![series_id.as_str()], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(reservations)
    }

    /// Lists all reservations in a zone, ordered by start time, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    pub fn list_zone_reservations(conn: &Connection, zone_id: &ZoneId) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(LIST_ZONE_RESERVATIONS)?;

        let reservations = stmt
            .query_map(params![zone_id.as_str()], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(reservations)
    }

    /// Retrieves a zone definition from the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(zone))` if the zone exists
    /// - `Ok(None)` if the zone doesn't exist
    /// - `Err(_)` if a database error occurs
    pub fn get_zone(conn: &Connection, id: &ZoneId) -> Result<Option<Zone>> {
        let mut stmt = conn.prepare(SELECT_ZONE)?;

        match stmt.query_row(params![id.as_str()], row_to_zone) {
            Ok(zone) => Ok(Some(zone)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all active zones, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    pub fn list_active_zones(conn: &Connection) -> Result<Vec<Zone>> {
        let mut stmt = conn.prepare(LIST_ACTIVE_ZONES)?;

        let zones = stmt
            .query_map([], row_to_zone)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(zones)
    }

    /// Lists the direct children of a zone, ordered by id.
    ///
    /// Inactive children are included: their existing reservations still
    /// occupy physical space inside the parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    pub fn list_children(conn: &Connection, parent: &ZoneId) -> Result<Vec<Zone>> {
        let mut stmt = conn.prepare(LIST_CHILD_ZONES)?;

        let zones = stmt
            .query_map(params![parent.as_str()], row_to_zone)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(zones)
    }
}

impl ReservationStore for Database {
    fn find_overlapping(
        &self,
        zone_id: &ZoneId,
        slot: TimeSlot,
        exclude: Option<&ReservationId>,
    ) -> Result<Vec<Reservation>> {
        Self::query_overlapping(&self.conn, zone_id, slot, exclude)
    }

    fn insert(&mut self, reservation: &Reservation) -> Result<()> {
        self.insert_reservation(reservation)
    }
}

impl ZoneDirectory for Database {
    fn zone(&self, id: &ZoneId) -> Result<Option<Zone>> {
        Self::get_zone(&self.conn, id)
    }

    fn active_zones(&self) -> Result<Vec<Zone>> {
        Self::list_active_zones(&self.conn)
    }

    fn child_zones(&self, parent: &ZoneId) -> Result<Vec<Zone>> {
        Self::list_children(&self.conn, parent)
    }
}
