//! Calendar arithmetic.
//!
//! All functions are pure and return new values. Month and year arithmetic
//! follows overflow normalization: a day that does not exist in the target
//! month spills into the next one (January 31 plus one month is March 2 in a
//! leap year), the same way a `(year, month, day)` triple with an oversized
//! day rolls forward.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// Builds a date from a year, a zero-based month and a day, rolling any
/// out-of-range month or day into neighbouring months and years.
///
/// `normalized_ymd(2024, 12, 1)` is 2025-01-01 and `normalized_ymd(2024, 1, 30)`
/// is 2024-03-01. Returns `None` only when the result falls outside chrono's
/// representable range.
pub fn normalized_ymd(year: i32, month0: i64, day: i64) -> Option<NaiveDate> {
    let total = i64::from(year) * 12 + month0;
    let y = i32::try_from(total.div_euclid(12)).ok()?;
    let m = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(y, m, 1)?;
    first.checked_add_signed(Duration::try_days(day - 1)?)
}

fn saturating(result: Option<NaiveDateTime>, forward: bool) -> NaiveDateTime {
    result.unwrap_or(if forward {
        NaiveDateTime::MAX
    } else {
        NaiveDateTime::MIN
    })
}

/// Adds `days` calendar days, keeping the time of day.
pub fn add_days(date: NaiveDateTime, days: i64) -> NaiveDateTime {
    let shifted = Duration::try_days(days).and_then(|d| date.checked_add_signed(d));
    saturating(shifted, days >= 0)
}

/// Adds `months` calendar months, keeping the day number and time of day
/// and letting impossible days overflow into the following month.
pub fn add_months(date: NaiveDateTime, months: i32) -> NaiveDateTime {
    let shifted = normalized_ymd(
        date.year(),
        i64::from(date.month0()) + i64::from(months),
        i64::from(date.day()),
    )
    .map(|d| d.and_time(date.time()));
    saturating(shifted, months >= 0)
}

/// Adds `years` calendar years. February 29 moves to March 1 when the
/// target year is not a leap year.
pub fn add_years(date: NaiveDateTime, years: i32) -> NaiveDateTime {
    let shifted = date.year().checked_add(years).and_then(|year| {
        normalized_ymd(year, i64::from(date.month0()), i64::from(date.day()))
            .map(|d| d.and_time(date.time()))
    });
    saturating(shifted, years >= 0)
}

/// Returns `true` for Saturdays and Sundays.
pub fn is_weekend<D: Datelike>(date: &D) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns the Sunday on or before `date`, keeping the time of day.
pub fn first_day_of_week(date: NaiveDateTime) -> NaiveDateTime {
    add_days(date, -i64::from(date.weekday().num_days_from_sunday()))
}

/// Approximate, Sunday-based week of the year (1-based).
///
/// Week 1 is the row containing January 1st; a new week starts every Sunday.
/// This is not the ISO week number, see [`iso_week_number`] for that.
pub fn week_number(year: i32, month0: i32, day: i32) -> u32 {
    let Some(date) = normalized_ymd(year, i64::from(month0), i64::from(day)) else {
        return 1;
    };
    let Some(jan1) = NaiveDate::from_ymd_opt(date.year(), 1, 1) else {
        return 1;
    };
    (date.ordinal0() + jan1.weekday().num_days_from_sunday()) / 7 + 1
}

/// ISO-8601 week number (weeks start on Monday, week 1 holds the first Thursday).
pub fn iso_week_number<D: Datelike>(date: &D) -> u32 {
    date.iso_week().week()
}

/// Gregorian leap-year rule: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month given by a zero-based index.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        1 if is_leap_year(year) => 29,
        1 => 28,
        _ => days_in_month(year, month0 % 12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod arithmetic {
        use super::*;

        #[test]
        fn add_days_forward_and_back() {
            assert_eq!(add_days(dt(2024, 1, 1), 5), dt(2024, 1, 6));
            assert_eq!(add_days(dt(2024, 1, 10), -5), dt(2024, 1, 5));
        }

        #[test]
        fn add_days_crosses_month() {
            assert_eq!(add_days(dt(2024, 1, 30), 5), dt(2024, 2, 4));
        }

        #[test]
        fn add_days_keeps_time_of_day() {
            let start = date(2024, 1, 1).and_hms_opt(15, 45, 10).unwrap();
            let result = add_days(start, 1);
            assert_eq!(result, date(2024, 1, 2).and_hms_opt(15, 45, 10).unwrap());
        }

        #[test]
        fn add_months_within_year() {
            assert_eq!(add_months(dt(2024, 1, 15), 3), dt(2024, 4, 15));
            assert_eq!(add_months(dt(2024, 6, 15), -3), dt(2024, 3, 15));
        }

        #[test]
        fn add_months_crosses_year() {
            assert_eq!(add_months(dt(2024, 11, 15), 3), dt(2025, 2, 15));
            assert_eq!(add_months(dt(2024, 1, 15), -1), dt(2023, 12, 15));
        }

        #[test]
        fn add_months_overflows_short_months() {
            assert_eq!(add_months(dt(2024, 1, 31), 1), dt(2024, 3, 2));
            assert_eq!(add_months(dt(2023, 1, 31), 1), dt(2023, 3, 3));
        }

        #[test]
        fn add_years_basic() {
            assert_eq!(add_years(dt(2024, 6, 15), 2), dt(2026, 6, 15));
            assert_eq!(add_years(dt(2024, 6, 15), -2), dt(2022, 6, 15));
        }

        #[test]
        fn add_years_from_leap_day() {
            assert_eq!(add_years(dt(2024, 2, 29), 1), dt(2025, 3, 1));
            assert_eq!(add_years(dt(2024, 2, 29), 4), dt(2028, 2, 29));
        }

        #[test]
        fn inputs_are_not_mutated() {
            let original = dt(2024, 1, 1);
            let copy = original;
            let _ = add_days(original, 5);
            let _ = add_months(original, 3);
            let _ = add_years(original, 2);
            assert_eq!(original, copy);
        }

        #[test]
        fn normalized_ymd_rolls_both_directions() {
            assert_eq!(normalized_ymd(2024, 12, 1), Some(date(2025, 1, 1)));
            assert_eq!(normalized_ymd(2024, -1, 1), Some(date(2023, 12, 1)));
            assert_eq!(normalized_ymd(2024, 1, 30), Some(date(2024, 3, 1)));
            assert_eq!(normalized_ymd(2024, 2, 0), Some(date(2024, 2, 29)));
        }
    }

    mod weeks {
        use super::*;

        #[test]
        fn weekend_detection() {
            assert!(is_weekend(&date(2024, 1, 6)));
            assert!(is_weekend(&date(2024, 1, 7)));
            assert!(!is_weekend(&date(2024, 1, 1)));
            assert!(!is_weekend(&date(2024, 1, 3)));
            assert!(!is_weekend(&dt(2024, 1, 5)));
        }

        #[test]
        fn first_day_of_week_mid_week() {
            let result = first_day_of_week(dt(2024, 1, 3));
            assert_eq!(result, dt(2023, 12, 31));
            assert_eq!(result.weekday(), Weekday::Sun);
        }

        #[test]
        fn first_day_of_week_on_sunday() {
            assert_eq!(first_day_of_week(dt(2024, 1, 7)), dt(2024, 1, 7));
        }

        #[test]
        fn week_number_grows_through_year() {
            assert_eq!(week_number(2024, 0, 1), 1);
            let june = week_number(2024, 5, 15);
            assert!(june > week_number(2024, 0, 1));
            assert_eq!(week_number(2024, 0, 7), 2);
        }

        #[test]
        fn iso_week_numbers() {
            assert_eq!(iso_week_number(&date(2024, 1, 1)), 1);
            assert_eq!(iso_week_number(&date(2021, 1, 1)), 53);
            assert_eq!(iso_week_number(&date(2024, 12, 30)), 1);
        }
    }

    mod leap_years {
        use super::*;

        #[test]
        fn leap_rule() {
            for year in [2024, 2020, 2000, 2400] {
                assert!(is_leap_year(year), "{year} should be leap");
            }
            for year in [2023, 1900, 2100] {
                assert!(!is_leap_year(year), "{year} should not be leap");
            }
        }

        #[test]
        fn month_lengths() {
            assert_eq!(days_in_month(2024, 1), 29);
            assert_eq!(days_in_month(2023, 1), 28);
            assert_eq!(days_in_month(1900, 1), 28);
            assert_eq!(days_in_month(2000, 1), 29);
            assert_eq!(days_in_month(2024, 0), 31);
            assert_eq!(days_in_month(2024, 3), 30);
            assert_eq!(days_in_month(2024, 11), 31);
        }
    }
}
