//! Age arithmetic for the visit age histogram.
//!
//! Ages are evaluated relative to the moment the computation runs, not to
//! visit time. That is a deliberate simplification carried over from the
//! reporting requirements: the histogram answers "how old are the patients
//! who have visited", not "how old were they when they visited".

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

/// Whole-year age of someone born on `birth`, as of `on`.
///
/// Applies the has-the-birthday-occurred-yet correction: if `on` falls
/// before the birthday in the year, the naive year difference is one too
/// high. Birth dates in the future produce negative ages; callers that care
/// must guard themselves.
pub fn age_in_years(birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - birth.year();
    if on.month() < birth.month() || (on.month() == birth.month() && on.day() < birth.day()) {
        age -= 1;
    }
    age
}

/// Floor an age to the lower multiple of ten.
///
/// Euclidean division keeps negative ages flooring downward (-3 -> -10),
/// matching the upstream semantics.
pub fn decade_bucket(age: i32) -> i32 {
    age.div_euclid(10) * 10
}

/// Histogram of decade buckets over a set of birth dates, one entry per
/// date, keyed ascending by bucket.
pub fn bucket_birth_dates<I>(births: I, on: NaiveDate) -> BTreeMap<i32, i64>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut histogram = BTreeMap::new();
    for birth in births {
        let bucket = decade_bucket(age_in_years(birth, on));
        *histogram.entry(bucket).or_insert(0) += 1;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn exact_anniversary_counts_the_full_year() {
        assert_eq!(age_in_years(d(1990, 6, 15), d(2024, 6, 15)), 34);
    }

    #[test]
    fn day_before_the_birthday_is_one_year_less() {
        assert_eq!(age_in_years(d(1990, 6, 15), d(2024, 6, 14)), 33);
    }

    #[test]
    fn earlier_month_subtracts_regardless_of_day() {
        assert_eq!(age_in_years(d(1990, 6, 15), d(2024, 5, 30)), 33);
    }

    #[test]
    fn later_month_keeps_the_naive_difference() {
        assert_eq!(age_in_years(d(1990, 6, 15), d(2024, 7, 1)), 34);
    }

    #[test]
    fn thirty_four_years_two_months_lands_in_the_thirties() {
        let birth = d(1990, 4, 15);
        let on = d(2024, 6, 15);
        assert_eq!(age_in_years(birth, on), 34);
        assert_eq!(decade_bucket(age_in_years(birth, on)), 30);
    }

    #[test]
    fn buckets_floor_to_lower_multiple_of_ten() {
        assert_eq!(decade_bucket(0), 0);
        assert_eq!(decade_bucket(9), 0);
        assert_eq!(decade_bucket(10), 10);
        assert_eq!(decade_bucket(34), 30);
        assert_eq!(decade_bucket(99), 90);
    }

    #[test]
    fn future_birth_dates_floor_to_negative_buckets() {
        // Not guarded against upstream; the bucket floors toward -10.
        let age = age_in_years(d(2030, 1, 1), d(2024, 6, 15));
        assert!(age < 0);
        assert_eq!(decade_bucket(age), -10);
        assert_eq!(decade_bucket(-3), -10);
    }

    #[test]
    fn histogram_counts_per_bucket_sorted_ascending() {
        let on = d(2024, 6, 15);
        let births = vec![
            d(2020, 1, 1), // 4  -> 0
            d(2016, 1, 1), // 8  -> 0
            d(1990, 4, 15), // 34 -> 30
            d(1951, 12, 1), // 72 -> 70
        ];
        let histogram = bucket_birth_dates(births, on);
        assert_eq!(
            histogram.into_iter().collect::<Vec<_>>(),
            vec![(0, 2), (30, 1), (70, 1)]
        );
    }

    #[test]
    fn histogram_total_equals_input_size() {
        let on = d(2024, 6, 15);
        let births: Vec<_> = (0..25).map(|i| d(1950 + i, 3, 3)).collect();
        let n = births.len() as i64;
        let histogram = bucket_birth_dates(births, on);
        assert_eq!(histogram.values().sum::<i64>(), n);
    }
}
