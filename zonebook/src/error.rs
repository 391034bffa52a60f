//! Error types for the zonebook library.
//!
//! This module provides a comprehensive error hierarchy for all operations
//! in the zonebook library, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for operations that may fail with a zonebook error.
///
/// # Examples
///
/// ```
/// use zonebook::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the zonebook library.
///
/// This enum encompasses all possible error conditions that can occur
/// during reservation and scheduling operations. Booking conflicts are
/// deliberately absent: a conflict is an expected outcome reported
/// through [`crate::conflict::ConflictReport`], not a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid time slot was provided.
    #[error("invalid time slot {start}..{end}: {reason}")]
    InvalidTimeSlot {
        /// The requested start instant.
        start: DateTime<Utc>,
        /// The requested end instant.
        end: DateTime<Utc>,
        /// The reason the slot is invalid.
        reason: String,
    },

    /// The referenced zone does not exist.
    #[error("zone not found: {zone_id}")]
    ZoneNotFound {
        /// The identifier that did not resolve to a zone.
        zone_id: crate::zone::ZoneId,
    },

    /// The referenced reservation does not exist.
    #[error("reservation not found: {reservation_id}")]
    ReservationNotFound {
        /// The identifier that did not resolve to a reservation.
        reservation_id: crate::reservation::ReservationId,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// Recurrence expansion ran past its iteration limit.
    #[error("recurrence expansion exceeded {limit} iterations ({generated} instance(s) generated)")]
    ExpansionLimitExceeded {
        /// The configured iteration limit.
        limit: u32,
        /// How many instances had been generated when the limit was hit.
        generated: usize,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data directory was not found and auto-creation is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },
}

// Additional conversions for better ergonomics

impl From<crate::timeslot::InvalidTimeSlotError> for Error {
    fn from(err: crate::timeslot::InvalidTimeSlotError) -> Self {
        Self::InvalidTimeSlot {
            start: err.start,
            end: err.end,
            reason: err.reason,
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if error indicates a missing zone or reservation.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonebook::{Error, ZoneId};
    ///
    /// let err = Error::ZoneNotFound {
    ///     zone_id: ZoneId::new("grand-hall").unwrap(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ZoneNotFound { .. } | Self::ReservationNotFound { .. }
        )
    }

    /// Check if error was caused by invalid input.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonebook::Error;
    ///
    /// let err = Error::Validation {
    ///     field: "interval".to_string(),
    ///     message: "must be at least 1".to_string(),
    /// };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidTimeSlot { .. })
    }
}
