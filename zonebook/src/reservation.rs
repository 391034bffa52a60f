//! Reservation types for tracking zone bookings.
//!
//! This module provides the reservation record, its status classification,
//! and the builder used to construct validated instances.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::zone::ZoneId;
use crate::TimeSlot;

/// A unique identifier for a reservation.
///
/// Identifiers are opaque non-empty strings. Instances produced by recurrence
/// expansion derive their identifiers from the base reservation's id and the
/// instance start time.
///
/// # Examples
///
/// ```
/// use zonebook::ReservationId;
///
/// let id = ReservationId::new("res-1042").unwrap();
/// assert_eq!(id.as_str(), "res-1042");
/// assert!(ReservationId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(String);

impl ReservationId {
    /// Creates a new reservation identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "reservation_id".into(),
                message: "reservation id must be non-empty after trimming whitespace".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a reservation.
///
/// Status transitions are managed outside this library; conflict detection
/// only cares whether a status still occupies its zone. `Cancelled` and
/// `Rejected` reservations are *inert*: they never block other bookings.
///
/// # Examples
///
/// ```
/// use zonebook::ReservationStatus;
///
/// assert!(ReservationStatus::Confirmed.is_occupying());
/// assert!(!ReservationStatus::Cancelled.is_occupying());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    /// Requested but not yet reviewed.
    PendingApproval,
    /// Approved by the venue but not yet confirmed by the requester.
    Approved,
    /// Rejected by the venue. Inert.
    Rejected,
    /// Confirmed and scheduled.
    Confirmed,
    /// The booked slot has passed.
    Completed,
    /// Cancelled by the requester. Inert.
    Cancelled,
}

impl ReservationStatus {
    /// Returns `true` if a reservation with this status no longer occupies
    /// its zone.
    #[must_use]
    pub const fn is_inert(self) -> bool {
        matches!(self, Self::Cancelled | Self::Rejected)
    }

    /// Returns `true` if a reservation with this status blocks overlapping
    /// bookings.
    #[must_use]
    pub const fn is_occupying(self) -> bool {
        !self.is_inert()
    }

    /// Returns the canonical string form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingApproval => "pending-approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending-approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown reservation status '{other}'"),
            }),
        }
    }
}

/// A booked, time-bounded occupancy of a zone.
///
/// Reservations created by recurrence expansion share a `series_id` but are
/// otherwise independent rows, independently cancellable.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use zonebook::{Reservation, ReservationId, TimeSlot, ZoneId};
///
/// let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
/// let slot = TimeSlot::new(start, start + Duration::hours(1)).unwrap();
///
/// let reservation = Reservation::builder(
///     ReservationId::new("res-1").unwrap(),
///     ZoneId::new("grand-hall").unwrap(),
///     "facility-7",
///     slot,
/// )
/// .build()
/// .unwrap();
///
/// assert!(reservation.status().is_occupying());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    zone_id: ZoneId,
    facility_id: String,
    slot: TimeSlot,
    status: ReservationStatus,
    series_id: Option<ReservationId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new reservation builder.
    ///
    /// New reservations default to `PendingApproval` with no series and
    /// timestamps of now.
    #[must_use]
    pub fn builder(
        id: ReservationId,
        zone_id: ZoneId,
        facility_id: impl Into<String>,
        slot: TimeSlot,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id,
            zone_id,
            facility_id: facility_id.into(),
            slot,
            status: ReservationStatus::PendingApproval,
            series_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the reservation identifier.
    #[must_use]
    pub const fn id(&self) -> &ReservationId {
        &self.id
    }

    /// Returns the booked zone.
    #[must_use]
    pub const fn zone_id(&self) -> &ZoneId {
        &self.zone_id
    }

    /// Returns the facility the zone belongs to.
    #[must_use]
    pub fn facility_id(&self) -> &str {
        &self.facility_id
    }

    /// Returns the booked time slot.
    #[must_use]
    pub const fn slot(&self) -> TimeSlot {
        self.slot
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the recurrence series this reservation belongs to, if any.
    #[must_use]
    pub const fn series_id(&self) -> Option<&ReservationId> {
        self.series_id.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-modified timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Creates a concrete recurrence instance of this reservation at `slot`.
    ///
    /// The instance id is derived from this reservation's id and the slot's
    /// start time, so the ids of one series are unique per occurrence. The
    /// instance joins this reservation's series, or starts a new series
    /// rooted at this reservation when it has none. All other fields are
    /// copied; timestamps are set to now.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use zonebook::{Reservation, ReservationId, TimeSlot, ZoneId};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
    /// let slot = TimeSlot::new(start, start + Duration::hours(1)).unwrap();
    /// let base = Reservation::builder(
    ///     ReservationId::new("res-1").unwrap(),
    ///     ZoneId::new("hall").unwrap(),
    ///     "facility-7",
    ///     slot,
    /// )
    /// .build()
    /// .unwrap();
    ///
    /// let next = base.instance_at(slot.starting_at(start + Duration::weeks(1)));
    /// assert_eq!(next.series_id(), Some(base.id()));
    /// assert_ne!(next.id(), base.id());
    /// ```
    #[must_use]
    pub fn instance_at(&self, slot: TimeSlot) -> Self {
        let now = Utc::now();
        Self {
            id: ReservationId(format!("{}-{}", self.id.0, slot.start().timestamp())),
            zone_id: self.zone_id.clone(),
            facility_id: self.facility_id.clone(),
            slot,
            status: self.status,
            series_id: Some(self.series_id.clone().unwrap_or_else(|| self.id.clone())),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: ReservationId,
    zone_id: ZoneId,
    facility_id: String,
    slot: TimeSlot,
    status: ReservationStatus,
    series_id: Option<ReservationId>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    /// Sets the lifecycle status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the recurrence series.
    #[must_use]
    pub fn series(mut self, series_id: Option<ReservationId>) -> Self {
        self.series_id = series_id;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the last-modified timestamp.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the facility id is empty after trimming
    /// whitespace.
    pub fn build(self) -> Result<Reservation, ValidationError> {
        let facility_id = self.facility_id.trim().to_string();
        if facility_id.is_empty() {
            return Err(ValidationError {
                field: "facility_id".into(),
                message: "facility id must be non-empty after trimming whitespace".into(),
            });
        }

        let now = Utc::now();
        Ok(Reservation {
            id: self.id,
            zone_id: self.zone_id,
            facility_id,
            slot: self.slot,
            status: self.status,
            series_id: self.series_id,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
