//! Time slot types for reservation scheduling.
//!
//! This module provides the half-open time interval used by every booking,
//! including validation and overlap arithmetic.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open interval of time, `[start, end)`.
///
/// The start instant is included and the end instant is excluded, so two
/// slots that merely touch (one ends exactly when the other begins) do not
/// overlap. A slot must have positive length; zero-length and backwards
/// slots are rejected at construction.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use zonebook::TimeSlot;
///
/// let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
/// let slot = TimeSlot::new(start, end).unwrap();
/// assert_eq!(slot.duration(), chrono::Duration::hours(1));
///
/// // Backwards slots are invalid
/// assert!(TimeSlot::new(end, start).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot")]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    /// Creates a new time slot.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is not strictly after `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use zonebook::TimeSlot;
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    /// let end = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    /// assert!(TimeSlot::new(start, end).is_ok());
    /// assert!(TimeSlot::new(start, start).is_err());
    /// ```
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidTimeSlotError> {
        if end <= start {
            Err(InvalidTimeSlotError {
                start,
                end,
                reason: "end must be strictly after start".into(),
            })
        } else {
            Ok(Self { start, end })
        }
    }

    /// Returns the inclusive start of the slot.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end of the slot.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the length of the slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use zonebook::TimeSlot;
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    /// let slot = TimeSlot::new(start, start + Duration::minutes(90)).unwrap();
    /// assert_eq!(slot.duration(), Duration::minutes(90));
    /// ```
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns `true` if this slot overlaps the other.
    ///
    /// Because slots are half-open, adjacency does not count as overlap:
    /// a slot ending at 10:00 and another starting at 10:00 are disjoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use zonebook::TimeSlot;
    ///
    /// let nine = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    /// let ten = nine + Duration::hours(1);
    /// let eleven = nine + Duration::hours(2);
    ///
    /// let morning = TimeSlot::new(nine, eleven).unwrap();
    /// let mid = TimeSlot::new(ten, eleven).unwrap();
    /// let after = TimeSlot::new(eleven, eleven + Duration::hours(1)).unwrap();
    ///
    /// assert!(morning.overlaps(&mid));
    /// assert!(!morning.overlaps(&after));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns `true` if the slot contains the given instant.
    ///
    /// The start instant is contained; the end instant is not.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Returns a slot of the same length beginning at `start`.
    ///
    /// Used when projecting a base booking onto another date: the new slot
    /// keeps the original duration, so the slot invariant holds without
    /// re-validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use zonebook::TimeSlot;
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    /// let slot = TimeSlot::new(start, start + Duration::hours(1)).unwrap();
    ///
    /// let next_week = slot.starting_at(start + Duration::weeks(1));
    /// assert_eq!(next_week.duration(), slot.duration());
    /// assert_eq!(next_week.start(), start + Duration::weeks(1));
    /// ```
    #[must_use]
    pub fn starting_at(&self, start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: start + self.duration(),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Error type for invalid time slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTimeSlotError {
    /// The requested start instant.
    pub start: DateTime<Utc>,
    /// The requested end instant.
    pub end: DateTime<Utc>,
    /// The reason the slot is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidTimeSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid time slot {}..{}: {}",
            self.start, self.end, self.reason
        )
    }
}

impl std::error::Error for InvalidTimeSlotError {}

/// Unvalidated mirror used for deserialization.
#[derive(Deserialize)]
struct RawTimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = InvalidTimeSlotError;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}
