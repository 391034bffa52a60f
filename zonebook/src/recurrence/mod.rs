//! Recurrence patterns and their expansion into reservation instances.
//!
//! A [`RecurrencePattern`] describes how a base reservation repeats; the
//! [`RecurrenceExpander`] walks the pattern date by date, probes each
//! candidate slot for conflicts, and persists the instances that fit. Dates
//! that are excluded or already occupied are skipped without error, so a
//! series with gaps is a normal outcome.

mod expander;
mod pattern;

#[cfg(test)]
mod proptests;

pub use expander::{RecurrenceExpander, DEFAULT_MAX_ITERATIONS};
pub use pattern::{Frequency, RecurrencePattern, RecurrencePatternBuilder};
