//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the zonebook reservation system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// The reservations table stores all bookings with their time slots as
/// Unix epoch seconds. `series_id` is NULL for standalone bookings and for
/// the base booking of a recurring series; materialized instances point
/// back to the series root through it.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id TEXT PRIMARY KEY NOT NULL,
        zone_id TEXT NOT NULL,
        facility_id TEXT NOT NULL,
        start_at INTEGER NOT NULL,
        end_at INTEGER NOT NULL,
        status TEXT NOT NULL,
        series_id TEXT,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to create the zones table.
///
/// The zones table stores the venue hierarchy. `parent_zone_id` is NULL
/// for top-level zones and references another row's `id` for subzones.
pub const CREATE_ZONES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS zones (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT,
        parent_zone_id TEXT,
        is_main_zone INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1
    )";

/// SQL statement to create an index on zone and time-slot columns.
///
/// This index speeds up the overlap queries that back every conflict check.
pub const CREATE_ZONE_TIME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_zone_time ON reservations(zone_id, start_at, end_at)";

/// SQL statement to create an index on the `series_id` column.
///
/// This index speeds up listing all instances of a recurring series.
pub const CREATE_SERIES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_series ON reservations(series_id)";

/// SQL statement to create an index on the `parent_zone_id` column.
///
/// This index speeds up child-zone lookups during conflict cascades.
pub const CREATE_PARENT_ZONE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_zones_parent ON zones(parent_zone_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a reservation.
///
/// This is a plain INSERT: reservation identifiers are immutable once
/// written, so a duplicate id is a caller error rather than an update.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (id, zone_id, facility_id, start_at, end_at, status, series_id, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

/// SQL statement to insert or replace a zone.
///
/// Zone definitions may be re-seeded, so replacement is allowed.
pub const INSERT_ZONE: &str = r"
    INSERT OR REPLACE INTO zones
    (id, name, parent_zone_id, is_main_zone, is_active)
    VALUES (?, ?, ?, ?, ?)
";
