//! Business-day counting over an inclusive date range.

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::warn;

use crate::holidays::HolidayProvider;

/// Whether a date falls on Monday through Friday.
fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the business days in `[start, end]`, both inclusive.
///
/// Every Monday–Friday in the range counts as one day; public holidays that
/// fall on a weekday inside the range are subtracted. A holiday on a weekend
/// is never subtracted since it was never counted. The holiday set is
/// fetched once per calendar year the range spans; a failing lookup degrades
/// to "no holidays known" for that year rather than aborting.
///
/// An empty range (`start > end`) counts zero days.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use slacktime::calculation::count_business_days;
/// use slacktime::holidays::ColombiaCalendar;
///
/// // 2025-06-09 (Monday) through 2025-06-13 (Friday), no holidays between.
/// let start = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
/// assert_eq!(count_business_days(start, end, &ColombiaCalendar), 5);
/// ```
pub fn count_business_days(
    start: NaiveDate,
    end: NaiveDate,
    provider: &impl HolidayProvider,
) -> u32 {
    let mut weekdays = 0u32;
    let mut day = start;
    while day <= end {
        if is_weekday(day) {
            weekdays += 1;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    let mut weekday_holidays = 0u32;
    for year in start.year()..=end.year() {
        let dates = match provider.holidays(year) {
            Ok(dates) => dates,
            Err(error) => {
                warn!(year, %error, "holiday source unavailable, counting weekdays only");
                Vec::new()
            }
        };
        for date in dates {
            if date >= start && date <= end && is_weekday(date) {
                weekday_holidays += 1;
            }
        }
    }

    weekdays - weekday_holidays
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EngineError, EngineResult};
    use crate::holidays::ColombiaCalendar;

    /// A provider with a fixed holiday list, for deterministic tests.
    struct FixedHolidays(Vec<NaiveDate>);

    impl HolidayProvider for FixedHolidays {
        fn holidays(&self, year: i32) -> EngineResult<Vec<NaiveDate>> {
            Ok(self
                .0
                .iter()
                .copied()
                .filter(|d| d.year() == year)
                .collect())
        }
    }

    /// A provider that always fails, to exercise the degrade path.
    struct BrokenProvider;

    impl HolidayProvider for BrokenProvider {
        fn holidays(&self, year: i32) -> EngineResult<Vec<NaiveDate>> {
            Err(EngineError::Holidays {
                year,
                message: "source unavailable".to_string(),
            })
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monday_to_friday_without_holidays_is_five() {
        let count = count_business_days(
            date(2025, 6, 2),
            date(2025, 6, 6),
            &FixedHolidays(Vec::new()),
        );
        assert_eq!(count, 5);
    }

    #[test]
    fn test_weekday_holiday_is_subtracted() {
        // Wednesday 2025-06-04 declared a holiday.
        let count = count_business_days(
            date(2025, 6, 2),
            date(2025, 6, 6),
            &FixedHolidays(vec![date(2025, 6, 4)]),
        );
        assert_eq!(count, 4);
    }

    #[test]
    fn test_weekend_holiday_is_not_subtracted() {
        // Saturday 2025-06-07 declared a holiday; never counted, never
        // subtracted.
        let count = count_business_days(
            date(2025, 6, 2),
            date(2025, 6, 8),
            &FixedHolidays(vec![date(2025, 6, 7)]),
        );
        assert_eq!(count, 5);
    }

    #[test]
    fn test_weekend_only_range_is_zero() {
        let count = count_business_days(
            date(2025, 6, 7),
            date(2025, 6, 8),
            &FixedHolidays(Vec::new()),
        );
        assert_eq!(count, 0);
    }

    #[test]
    fn test_reversed_range_is_zero() {
        let count = count_business_days(
            date(2025, 6, 6),
            date(2025, 6, 2),
            &FixedHolidays(vec![date(2025, 6, 4)]),
        );
        assert_eq!(count, 0);
    }

    #[test]
    fn test_single_weekday_range_is_one() {
        let count = count_business_days(
            date(2025, 6, 4),
            date(2025, 6, 4),
            &FixedHolidays(Vec::new()),
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_holiday_outside_range_is_ignored() {
        let count = count_business_days(
            date(2025, 6, 2),
            date(2025, 6, 6),
            &FixedHolidays(vec![date(2025, 6, 9)]),
        );
        assert_eq!(count, 5);
    }

    #[test]
    fn test_broken_provider_degrades_to_weekday_count() {
        let count = count_business_days(date(2025, 6, 2), date(2025, 6, 6), &BrokenProvider);
        assert_eq!(count, 5);
    }

    #[test]
    fn test_cross_year_range_queries_both_years() {
        // 2024-12-30 (Mon) through 2025-01-03 (Fri): five weekdays, minus
        // New Year's Day in the second year.
        let count = count_business_days(
            date(2024, 12, 30),
            date(2025, 1, 3),
            &FixedHolidays(vec![date(2025, 1, 1)]),
        );
        assert_eq!(count, 4);
    }

    #[test]
    fn test_colombia_week_with_holiday() {
        // 2025-06-23 is Corpus Christi Monday in Colombia; that week has
        // four business days.
        let count =
            count_business_days(date(2025, 6, 23), date(2025, 6, 27), &ColombiaCalendar);
        assert_eq!(count, 4);
    }
}
