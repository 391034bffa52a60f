//! Booking conflict detection across the zone hierarchy.
//!
//! This module implements hierarchy-aware overlap detection: a booking in a
//! zone also blocks the zone's parent, and a booking anywhere inside a main
//! zone blocks the main zone itself. When a requested slot is taken, the
//! resolver suggests other active zones that are free at the same time.
//!
//! A detected conflict is a normal outcome reported through
//! [`ConflictReport`], never an error.

mod resolver;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use resolver::{ConflictReport, ConflictResolver};
