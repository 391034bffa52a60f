//! Property-based tests for recurrence patterns.
//!
//! Expansion behavior is covered by the expander's unit and integration
//! tests; this module pins down the date-stepping arithmetic and the filter
//! predicates the expander builds on.

use super::{Frequency, RecurrencePattern};
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use proptest::prelude::*;
use std::collections::BTreeSet;

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Daily),
        Just(Frequency::Weekly),
        Just(Frequency::Monthly),
    ]
}

// Strategy for dates that exist in every month
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000..2100i32, 1..=12u32, 1..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn datetime_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (date_strategy(), 0..24u32, 0..60u32, 0..60u32)
        .prop_map(|(date, h, m, s)| date.and_hms_opt(h, m, s).unwrap().and_utc())
}

fn weekday_strategy() -> impl Strategy<Value = Weekday> {
    (0..7usize).prop_map(|i| ALL_WEEKDAYS[i])
}

fn weekday_set_strategy() -> impl Strategy<Value = BTreeSet<Weekday>> {
    prop::collection::btree_set(weekday_strategy(), 1..=7)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Stepping always moves the cursor strictly forward
    #[test]
    fn step_is_strictly_monotonic(
        frequency in frequency_strategy(),
        interval in 1..=52u32,
        cursor in datetime_strategy()
    ) {
        let pattern = RecurrencePattern::builder(frequency)
            .interval(interval)
            .build()
            .unwrap();

        let next = pattern.step(cursor).unwrap();
        prop_assert!(next > cursor);
    }

    // A daily step advances by exactly the interval in days
    #[test]
    fn daily_step_advances_interval_days(interval in 1..=365u32, cursor in datetime_strategy()) {
        let pattern = RecurrencePattern::builder(Frequency::Daily)
            .interval(interval)
            .build()
            .unwrap();

        let next = pattern.step(cursor).unwrap();
        prop_assert_eq!((next - cursor).num_days(), i64::from(interval));
    }

    // A weekly step advances whole weeks and lands on the same weekday
    #[test]
    fn weekly_step_preserves_weekday(interval in 1..=52u32, cursor in datetime_strategy()) {
        let pattern = RecurrencePattern::builder(Frequency::Weekly)
            .interval(interval)
            .build()
            .unwrap();

        let next = pattern.step(cursor).unwrap();
        prop_assert_eq!((next - cursor).num_days(), i64::from(interval) * 7);
        prop_assert_eq!(next.weekday(), cursor.weekday());
    }

    // Stepping never touches the time of day
    #[test]
    fn step_preserves_time_of_day(
        frequency in frequency_strategy(),
        interval in 1..=12u32,
        cursor in datetime_strategy()
    ) {
        let pattern = RecurrencePattern::builder(frequency)
            .interval(interval)
            .build()
            .unwrap();

        let next = pattern.step(cursor).unwrap();
        prop_assert_eq!(next.hour(), cursor.hour());
        prop_assert_eq!(next.minute(), cursor.minute());
        prop_assert_eq!(next.second(), cursor.second());
    }

    // Month-end clamping can only shrink the day of month, never grow it
    #[test]
    fn monthly_step_never_grows_day(interval in 1..=24u32, cursor in datetime_strategy()) {
        let pattern = RecurrencePattern::builder(Frequency::Monthly)
            .interval(interval)
            .build()
            .unwrap();

        let next = pattern.step(cursor).unwrap();
        prop_assert!(next.day() <= cursor.day());
    }

    // For weekly patterns, the filter is exactly set membership
    #[test]
    fn weekly_filter_is_set_membership(
        days in weekday_set_strategy(),
        probe in weekday_strategy()
    ) {
        let pattern = RecurrencePattern::builder(Frequency::Weekly)
            .days_of_week(Some(days.clone()))
            .build()
            .unwrap();

        prop_assert_eq!(pattern.allows_weekday(probe), days.contains(&probe));
    }

    // Daily and monthly patterns ignore the weekday filter entirely
    #[test]
    fn filter_ignored_outside_weekly(
        daily in prop::bool::ANY,
        days in weekday_set_strategy(),
        probe in weekday_strategy()
    ) {
        let frequency = if daily { Frequency::Daily } else { Frequency::Monthly };
        let pattern = RecurrencePattern::builder(frequency)
            .days_of_week(Some(days))
            .build()
            .unwrap();

        prop_assert!(pattern.allows_weekday(probe));
    }

    // Exception lookup is exactly set membership
    #[test]
    fn exceptions_are_set_membership(
        exceptions in prop::collection::btree_set(date_strategy(), 0..10),
        probe in date_strategy()
    ) {
        let pattern = RecurrencePattern::builder(Frequency::Daily)
            .exceptions(exceptions.clone())
            .build()
            .unwrap();

        prop_assert_eq!(pattern.is_exception(probe), exceptions.contains(&probe));
    }

    // Interval validation: zero is rejected, everything positive is accepted
    #[test]
    fn interval_validation(frequency in frequency_strategy(), interval in 0..=100u32) {
        let result = RecurrencePattern::builder(frequency).interval(interval).build();
        prop_assert_eq!(result.is_ok(), interval >= 1);
    }
}
