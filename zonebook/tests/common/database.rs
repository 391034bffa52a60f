//! Shared database test utilities.

use zonebook::store::{Database, DatabaseConfig};
use zonebook::{Zone, ZoneId};

/// Creates a temporary test database that will be cleaned up when dropped.
///
/// Returns the database instance. The temporary directory is tied to the
/// database's lifetime through the test.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Seeds the standard test venue.
///
/// The venue is a main zone `grand-hall` with subzones `grand-hall-east`
/// and `grand-hall-west`, a standalone `annex`, and an inactive
/// `closed-wing`.
#[allow(dead_code)]
pub fn seed_venue(db: &mut Database) {
    let main = Zone::builder(ZoneId::new("grand-hall").unwrap())
        .name(Some("Grand Hall".to_string()))
        .main_zone(true)
        .build()
        .unwrap();

    let east = Zone::builder(ZoneId::new("grand-hall-east").unwrap())
        .name(Some("Grand Hall East".to_string()))
        .parent(Some(ZoneId::new("grand-hall").unwrap()))
        .build()
        .unwrap();

    let west = Zone::builder(ZoneId::new("grand-hall-west").unwrap())
        .name(Some("Grand Hall West".to_string()))
        .parent(Some(ZoneId::new("grand-hall").unwrap()))
        .build()
        .unwrap();

    let annex = Zone::builder(ZoneId::new("annex").unwrap())
        .name(Some("Annex".to_string()))
        .build()
        .unwrap();

    let closed = Zone::builder(ZoneId::new("closed-wing").unwrap())
        .active(false)
        .build()
        .unwrap();

    for zone in [main, east, west, annex, closed] {
        db.upsert_zone(&zone).unwrap();
    }
}
