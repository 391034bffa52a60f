//! Recurrence rule types.
//!
//! A [`RecurrencePattern`] describes how one base reservation repeats:
//! frequency, step interval, optional weekday filter, end date, and
//! exception dates.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Months, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// How often a recurrence repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Step in days.
    Daily,
    /// Step in weeks, optionally filtered to specific weekdays.
    Weekly,
    /// Step in calendar months, preserving the day-of-month where valid.
    Monthly,
}

/// A rule describing repeated generation of reservation instances from one
/// base reservation.
///
/// The weekday filter is only consulted for weekly patterns. The end date is
/// optional in the type so an unterminated rule is representable; expansion
/// rejects it with a validation error rather than looping unbounded.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use std::collections::BTreeSet;
/// use zonebook::{Frequency, RecurrencePattern};
///
/// let pattern = RecurrencePattern::builder(Frequency::Weekly)
///     .days_of_week(Some(BTreeSet::from([Weekday::Mon, Weekday::Wed])))
///     .end_date(NaiveDate::from_ymd_opt(2024, 7, 1))
///     .build()
///     .unwrap();
///
/// assert!(pattern.allows_weekday(Weekday::Mon));
/// assert!(!pattern.allows_weekday(Weekday::Tue));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    frequency: Frequency,
    interval: u32,
    days_of_week: Option<BTreeSet<Weekday>>,
    end_date: Option<NaiveDate>,
    exceptions: BTreeSet<NaiveDate>,
}

impl RecurrencePattern {
    /// Creates a new pattern builder.
    ///
    /// New patterns default to an interval of 1 with no weekday filter, no
    /// end date, and no exceptions.
    #[must_use]
    pub fn builder(frequency: Frequency) -> RecurrencePatternBuilder {
        RecurrencePatternBuilder {
            frequency,
            interval: 1,
            days_of_week: None,
            end_date: None,
            exceptions: BTreeSet::new(),
        }
    }

    /// Returns the repeat frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the step interval, in units of the frequency.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Returns the weekday filter, if one is set.
    #[must_use]
    pub const fn days_of_week(&self) -> Option<&BTreeSet<Weekday>> {
        self.days_of_week.as_ref()
    }

    /// Returns the last date (inclusive) the pattern may produce.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the set of dates excluded from the pattern's output.
    #[must_use]
    pub const fn exceptions(&self) -> &BTreeSet<NaiveDate> {
        &self.exceptions
    }

    /// Returns `true` if the given date is excluded from the output.
    #[must_use]
    pub fn is_exception(&self, date: NaiveDate) -> bool {
        self.exceptions.contains(&date)
    }

    /// Returns `true` if the weekday passes this pattern's filter.
    ///
    /// The filter only applies to weekly patterns; every weekday passes for
    /// daily and monthly patterns, or when no filter is set.
    #[must_use]
    pub fn allows_weekday(&self, weekday: Weekday) -> bool {
        match (self.frequency, &self.days_of_week) {
            (Frequency::Weekly, Some(days)) => days.contains(&weekday),
            _ => true,
        }
    }

    /// Advances a cursor by one full step of this pattern.
    ///
    /// Daily patterns step `interval` days, weekly patterns `interval` weeks,
    /// and monthly patterns `interval` calendar months with the day-of-month
    /// clamped to the target month's last day when the nominal day does not
    /// exist (Jan 31 + 1 month = Feb 29 in a leap year).
    ///
    /// Returns `None` when the step leaves the representable date range,
    /// which also means it has stepped past any representable end date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use zonebook::{Frequency, RecurrencePattern};
    ///
    /// let pattern = RecurrencePattern::builder(Frequency::Weekly)
    ///     .interval(2)
    ///     .build()
    ///     .unwrap();
    ///
    /// let cursor = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
    /// let next = pattern.step(cursor).unwrap();
    /// assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 17, 9, 0, 0).unwrap());
    /// ```
    #[must_use]
    pub fn step(&self, cursor: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.frequency {
            Frequency::Daily => cursor.checked_add_signed(Duration::days(i64::from(self.interval))),
            Frequency::Weekly => {
                cursor.checked_add_signed(Duration::days(i64::from(self.interval) * 7))
            }
            Frequency::Monthly => cursor.checked_add_months(Months::new(self.interval)),
        }
    }
}

/// Builder for creating `RecurrencePattern` instances.
#[derive(Debug)]
pub struct RecurrencePatternBuilder {
    frequency: Frequency,
    interval: u32,
    days_of_week: Option<BTreeSet<Weekday>>,
    end_date: Option<NaiveDate>,
    exceptions: BTreeSet<NaiveDate>,
}

impl RecurrencePatternBuilder {
    /// Sets the step interval, in units of the frequency.
    #[must_use]
    pub const fn interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the weekday filter.
    #[must_use]
    pub fn days_of_week(mut self, days: Option<BTreeSet<Weekday>>) -> Self {
        self.days_of_week = days;
        self
    }

    /// Sets the last date (inclusive) the pattern may produce.
    #[must_use]
    pub const fn end_date(mut self, end_date: Option<NaiveDate>) -> Self {
        self.end_date = end_date;
        self
    }

    /// Sets the dates excluded from the pattern's output.
    #[must_use]
    pub fn exceptions(mut self, exceptions: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.exceptions = exceptions.into_iter().collect();
        self
    }

    /// Builds the pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonebook::{Frequency, RecurrencePattern};
    ///
    /// assert!(RecurrencePattern::builder(Frequency::Daily).build().is_ok());
    /// assert!(RecurrencePattern::builder(Frequency::Daily)
    ///     .interval(0)
    ///     .build()
    ///     .is_err());
    /// ```
    pub fn build(self) -> Result<RecurrencePattern, ValidationError> {
        if self.interval == 0 {
            return Err(ValidationError {
                field: "interval".into(),
                message: "interval must be at least 1".into(),
            });
        }

        Ok(RecurrencePattern {
            frequency: self.frequency,
            interval: self.interval,
            days_of_week: self.days_of_week,
            end_date: self.end_date,
            exceptions: self.exceptions,
        })
    }
}
