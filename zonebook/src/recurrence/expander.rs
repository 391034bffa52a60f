//! Expansion of a recurrence pattern into persisted reservation instances.

use chrono::{Datelike, Duration};

use crate::conflict::ConflictResolver;
use crate::error::{Error, Result};
use crate::recurrence::RecurrencePattern;
use crate::store::{ReservationStore, ZoneDirectory};
use crate::Reservation;

/// Iteration cap applied when none is configured.
///
/// One iteration is one examined date, whether or not it produced an
/// instance, so this bounds the run time of a single expansion.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Expands a base reservation and a recurrence pattern into concrete,
/// conflict-free reservation instances.
///
/// The expander treats the base reservation as a template: it is not
/// expected to be persisted, and the first candidate falls on the base's own
/// start date. Each accepted instance is inserted into the store before the
/// next date is probed, so later candidates see everything the same call
/// already committed.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, NaiveDate, TimeZone, Utc};
/// use zonebook::recurrence::RecurrenceExpander;
/// use zonebook::store::MemoryStore;
/// use zonebook::{
///     Frequency, RecurrencePattern, Reservation, ReservationId, TimeSlot, Zone, ZoneId,
/// };
///
/// let mut store = MemoryStore::new();
/// store.add_zone(Zone::builder(ZoneId::new("studio").unwrap()).build().unwrap());
///
/// let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
/// let slot = TimeSlot::new(start, start + Duration::hours(1)).unwrap();
/// let base = Reservation::builder(
///     ReservationId::new("res-1").unwrap(),
///     ZoneId::new("studio").unwrap(),
///     "facility-7",
///     slot,
/// )
/// .build()
/// .unwrap();
///
/// let pattern = RecurrencePattern::builder(Frequency::Daily)
///     .end_date(NaiveDate::from_ymd_opt(2024, 6, 5))
///     .build()
///     .unwrap();
///
/// let expander = RecurrenceExpander::new();
/// let instances = expander.generate(&mut store, &base, &pattern).unwrap();
/// assert_eq!(instances.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RecurrenceExpander {
    max_iterations: u32,
}

impl RecurrenceExpander {
    /// Creates an expander with the default iteration cap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Creates an expander with an explicit iteration cap.
    #[must_use]
    pub const fn with_max_iterations(max_iterations: u32) -> Self {
        Self { max_iterations }
    }

    /// Returns the configured iteration cap.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Expands `base` according to `pattern`, persisting each accepted
    /// instance through `store`.
    ///
    /// The cursor starts at the base's start instant and walks forward until
    /// it passes the pattern's end date. At each date, in order:
    ///
    /// 1. An exception date advances the cursor by a full step with no
    ///    instance and no conflict probe.
    /// 2. For weekly patterns with a weekday filter, a date whose weekday
    ///    misses the filter advances the cursor by exactly one calendar day.
    /// 3. Otherwise the base's time-of-day span is placed on the cursor's
    ///    date and probed for conflicts across the zone hierarchy. A free
    ///    candidate is materialized and inserted; an occupied one is skipped
    ///    silently. Either way the cursor advances by a full step.
    ///
    /// Returns the accepted instances, in date order. A series with gaps is
    /// a valid outcome, not a failure.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when the pattern has no end date.
    /// - [`Error::ZoneNotFound`] when the base names an unknown zone.
    /// - [`Error::ExpansionLimitExceeded`] when the walk exceeds the
    ///   iteration cap. Instances inserted before the cap was hit remain
    ///   persisted.
    /// - Any storage error raised by a probe or insert, propagated
    ///   unchanged.
    pub fn generate<S>(
        &self,
        store: &mut S,
        base: &Reservation,
        pattern: &RecurrencePattern,
    ) -> Result<Vec<Reservation>>
    where
        S: ReservationStore + ZoneDirectory,
    {
        let Some(end_date) = pattern.end_date() else {
            return Err(Error::Validation {
                field: "end_date".to_string(),
                message: "recurrence pattern must have an end date".to_string(),
            });
        };

        if store.zone(base.zone_id())?.is_none() {
            return Err(Error::ZoneNotFound {
                zone_id: base.zone_id().clone(),
            });
        }

        let mut generated = Vec::new();
        let mut cursor = base.slot().start();
        let mut iterations = 0u32;

        while cursor.date_naive() <= end_date {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(Error::ExpansionLimitExceeded {
                    limit: self.max_iterations,
                    generated: generated.len(),
                });
            }

            let date = cursor.date_naive();

            if pattern.is_exception(date) {
                cursor = match pattern.step(cursor) {
                    Some(next) => next,
                    None => break,
                };
                continue;
            }

            if !pattern.allows_weekday(date.weekday()) {
                // Scan day by day until the cursor lands inside the filter
                cursor = match cursor.checked_add_signed(Duration::days(1)) {
                    Some(next) => next,
                    None => break,
                };
                continue;
            }

            let slot = base.slot().starting_at(cursor);
            let blocking = {
                let resolver = ConflictResolver::new(&*store, &*store);
                resolver.find_blocking(base.zone_id(), slot, None)?
            };

            if blocking.is_empty() {
                let instance = base.instance_at(slot);
                store.insert(&instance)?;
                generated.push(instance);
            } else {
                log::debug!("skipping occupied date {date} for series '{}'", base.id());
            }

            cursor = match pattern.step(cursor) {
                Some(next) => next,
                None => break,
            };
        }

        log::debug!(
            "expanded '{}' into {} instance(s) over {} iteration(s)",
            base.id(),
            generated.len(),
            iterations
        );
        Ok(generated)
    }
}

impl Default for RecurrenceExpander {
    fn default() -> Self {
        Self::new()
    }
}
