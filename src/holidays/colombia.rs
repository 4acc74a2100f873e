//! Colombia calendar.
//!
//! The following holidays are observed:
//! * New Year's Day (Jan 1)
//! * Epiphany (Jan 6, moved to Monday)
//! * Saint Joseph's Day (Mar 19, moved to Monday)
//! * Holy Thursday (Easter - 3)
//! * Good Friday (Easter - 2)
//! * Labour Day (May 1)
//! * Ascension (Easter + 39, moved to Monday)
//! * Corpus Christi (Easter + 60, moved to Monday)
//! * Sacred Heart (Easter + 68, moved to Monday)
//! * Saints Peter and Paul (Jun 29, moved to Monday)
//! * Independence Day (Jul 20)
//! * Battle of Boyacá (Aug 7)
//! * Assumption of Mary (Aug 15, moved to Monday)
//! * Columbus Day (Oct 12, moved to Monday)
//! * All Saints' Day (Nov 1, moved to Monday)
//! * Independence of Cartagena (Nov 11, moved to Monday)
//! * Immaculate Conception (Dec 8)
//! * Christmas Day (Dec 25)
//!
//! "Moved to Monday" follows Ley Emiliani: the holiday is observed on its
//! own date when that is a Monday, otherwise on the following Monday.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::EngineResult;

use super::HolidayProvider;

/// Colombian public-holiday calendar.
///
/// Purely computed, so lookups never fail and no per-year cache is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColombiaCalendar;

impl HolidayProvider for ColombiaCalendar {
    fn holidays(&self, year: i32) -> EngineResult<Vec<NaiveDate>> {
        Ok(holidays_for_year(year))
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Easter Sunday by the Meeus/Jones/Butcher Gregorian computus.
fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    date(year, month as u32, day as u32)
}

/// Observed date under Ley Emiliani: the following Monday unless the date
/// already is one.
fn next_monday(date: NaiveDate) -> NaiveDate {
    let offset = (7 - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(i64::from(offset))
}

fn holidays_for_year(year: i32) -> Vec<NaiveDate> {
    let easter = easter_sunday(year);

    let mut dates = vec![
        // Fixed-date holidays, observed in place
        date(year, 1, 1),   // New Year's Day
        date(year, 5, 1),   // Labour Day
        date(year, 7, 20),  // Independence Day
        date(year, 8, 7),   // Battle of Boyacá
        date(year, 12, 8),  // Immaculate Conception
        date(year, 12, 25), // Christmas Day
        // Easter-anchored, observed in place
        easter - Duration::days(3), // Holy Thursday
        easter - Duration::days(2), // Good Friday
        // Emiliani holidays, moved to the following Monday
        next_monday(date(year, 1, 6)),   // Epiphany
        next_monday(date(year, 3, 19)),  // Saint Joseph's Day
        next_monday(date(year, 6, 29)),  // Saints Peter and Paul
        next_monday(date(year, 8, 15)),  // Assumption of Mary
        next_monday(date(year, 10, 12)), // Columbus Day
        next_monday(date(year, 11, 1)),  // All Saints' Day
        next_monday(date(year, 11, 11)), // Independence of Cartagena
        // Easter-anchored Emiliani holidays
        next_monday(easter + Duration::days(39)), // Ascension
        next_monday(easter + Duration::days(60)), // Corpus Christi
        next_monday(easter + Duration::days(68)), // Sacred Heart
    ];

    // Two observances can land on the same Monday (e.g. Sacred Heart and
    // Saints Peter and Paul in 2025); the calendar reports the date once.
    dates.sort_unstable();
    dates.dedup();
    dates
}
