#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # zonebook
//!
//! A booking-conflict detection and recurring-reservation expansion engine
//! for hierarchical venue zones.
//!
//! Zones form a tree: a main zone stands for a whole venue and its child
//! zones subdivide the same physical space, so a booking anywhere along
//! that axis blocks the others. The [`conflict::ConflictResolver`] checks a
//! requested slot against this hierarchy and suggests free alternatives;
//! the [`recurrence::RecurrenceExpander`] turns one base reservation plus a
//! [`RecurrencePattern`] into the series of concrete instances that fit.
//!
//! ## Core Types
//!
//! - [`Zone`] and [`ZoneId`]: the hierarchical venue model
//! - [`Reservation`], [`ReservationId`], [`ReservationStatus`]: bookings
//! - [`TimeSlot`]: half-open booking intervals
//! - [`RecurrencePattern`] and [`Frequency`]: recurrence rules
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use zonebook::conflict::ConflictResolver;
//! use zonebook::store::MemoryStore;
//! use zonebook::{Reservation, ReservationId, ReservationStore, TimeSlot, Zone, ZoneId};
//!
//! let mut store = MemoryStore::new();
//! store.add_zone(
//!     Zone::builder(ZoneId::new("grand-hall").unwrap())
//!         .main_zone(true)
//!         .build()
//!         .unwrap(),
//! );
//! store.add_zone(
//!     Zone::builder(ZoneId::new("grand-hall-east").unwrap())
//!         .parent(Some(ZoneId::new("grand-hall").unwrap()))
//!         .build()
//!         .unwrap(),
//! );
//!
//! let start = Utc.with_ymd_and_hms(2024, 6, 3, 18, 0, 0).unwrap();
//! let slot = TimeSlot::new(start, start + Duration::hours(2)).unwrap();
//!
//! // Book the east wing, then try the whole venue for the same evening
//! let booking = Reservation::builder(
//!     ReservationId::new("res-1").unwrap(),
//!     ZoneId::new("grand-hall-east").unwrap(),
//!     "facility-7",
//!     slot,
//! )
//! .build()
//! .unwrap();
//! store.insert(&booking).unwrap();
//!
//! let resolver = ConflictResolver::new(&store, &store);
//! let report = resolver
//!     .check(&ZoneId::new("grand-hall").unwrap(), slot, None)
//!     .unwrap();
//! assert!(report.has_conflict());
//! ```

pub mod config;
pub mod conflict;
pub mod error;
pub mod logging;
pub mod recurrence;
pub mod reservation;
pub mod store;
pub mod timeslot;
pub mod zone;

// Re-export key types at crate root for convenience
pub use config::EngineConfig;
pub use conflict::{ConflictReport, ConflictResolver};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use recurrence::{Frequency, RecurrenceExpander, RecurrencePattern};
pub use reservation::{Reservation, ReservationId, ReservationStatus};
pub use store::{Database, DatabaseConfig, MemoryStore, ReservationStore, ZoneDirectory};
pub use timeslot::TimeSlot;
pub use zone::{Zone, ZoneId};
