// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season calendar.
//!
//! A date is peak season when it is a Friday, Saturday or Sunday, a South
//! African public holiday, or inside one of the school holiday windows.
//! Everything here is a pure function of the date, valid for any year.

use crate::error::DomainError;
use crate::types::SeasonType;
use crate::validation::dates_in_range;
use serde::Serialize;
use std::collections::BTreeSet;
use time::{Date, Duration, Month, Weekday};

/// Whether a holiday is a public holiday or a school holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    /// Gazetted public holiday.
    Public,
    /// Day inside a school holiday window.
    School,
}

/// A labelled holiday date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holiday {
    /// The holiday date.
    pub date: Date,
    /// Display name.
    pub name: &'static str,
    /// Public or school holiday.
    pub kind: HolidayKind,
}

/// Public holidays on a fixed month and day, as `(month, day, name)`.
const FIXED_PUBLIC_HOLIDAYS: [(u8, u8, &str); 10] = [
    (1, 1, "New Year's Day"),
    (3, 21, "Human Rights Day"),
    (4, 27, "Freedom Day"),
    (5, 1, "Workers' Day"),
    (6, 16, "Youth Day"),
    (8, 9, "National Women's Day"),
    (9, 24, "Heritage Day"),
    (12, 16, "Day of Reconciliation"),
    (12, 25, "Christmas Day"),
    (12, 26, "Day of Goodwill"),
];

const GOOD_FRIDAY: &str = "Good Friday";
const FAMILY_DAY: &str = "Family Day";

/// A closed school holiday window within one calendar year.
struct SchoolWindow {
    name: &'static str,
    start: (u8, u8),
    end: (u8, u8),
}

/// School holiday windows. The summer holidays run from 15 December to
/// 15 January, so they appear at both ends of every year.
const SCHOOL_WINDOWS: [SchoolWindow; 5] = [
    SchoolWindow {
        name: "Summer Holidays",
        start: (1, 1),
        end: (1, 15),
    },
    SchoolWindow {
        name: "Autumn Break",
        start: (3, 25),
        end: (4, 5),
    },
    SchoolWindow {
        name: "Winter Holidays",
        start: (6, 24),
        end: (7, 14),
    },
    SchoolWindow {
        name: "Spring Break",
        start: (9, 23),
        end: (10, 2),
    },
    SchoolWindow {
        name: "Summer Holidays",
        start: (12, 15),
        end: (12, 31),
    },
];

fn month_day(date: Date) -> (u8, u8) {
    (u8::from(date.month()), date.day())
}

fn calendar_date(year: i32, month: u8, day: u8) -> Result<Date, DomainError> {
    let month: Month =
        Month::try_from(month).map_err(|_| DomainError::InvalidMonth { year, month })?;
    Date::from_calendar_date(year, month, day).map_err(|e| DomainError::DateArithmeticOverflow {
        operation: format!("building {year}-{month}-{day}: {e}"),
    })
}

/// Computes Easter Sunday for a Gregorian calendar year (anonymous
/// Gregorian algorithm).
///
/// # Errors
///
/// Returns an error if the year is outside the supported date range.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Result<Date, DomainError> {
    let a: i32 = year.rem_euclid(19);
    let b: i32 = year.div_euclid(100);
    let c: i32 = year.rem_euclid(100);
    let d: i32 = b.div_euclid(4);
    let e: i32 = b.rem_euclid(4);
    let f: i32 = (b + 8).div_euclid(25);
    let g: i32 = (b - f + 1).div_euclid(3);
    let h: i32 = (19 * a + b - d - g + 15).rem_euclid(30);
    let i: i32 = c / 4;
    let k: i32 = c % 4;
    let l: i32 = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m: i32 = (a + 11 * h + 22 * l) / 451;
    let month: i32 = (h + l - 7 * m + 114) / 31;
    let day: i32 = ((h + l - 7 * m + 114) % 31) + 1;

    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("computing Easter Sunday for {year}"),
    };
    let month: u8 = u8::try_from(month).map_err(|_| overflow())?;
    let day: u8 = u8::try_from(day).map_err(|_| overflow())?;
    calendar_date(year, month, day)
}

fn easter_holidays(year: i32) -> Result<[Holiday; 2], DomainError> {
    let easter: Date = easter_sunday(year)?;
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("offsetting Easter Sunday {easter}"),
    };
    let good_friday: Date = easter.checked_sub(Duration::days(2)).ok_or_else(overflow)?;
    let family_day: Date = easter.checked_add(Duration::days(1)).ok_or_else(overflow)?;
    Ok([
        Holiday {
            date: good_friday,
            name: GOOD_FRIDAY,
            kind: HolidayKind::Public,
        },
        Holiday {
            date: family_day,
            name: FAMILY_DAY,
            kind: HolidayKind::Public,
        },
    ])
}

/// Returns the public holidays of `year`, ordered by date.
///
/// # Errors
///
/// Returns an error if the year is outside the supported date range.
pub fn public_holidays(year: i32) -> Result<Vec<Holiday>, DomainError> {
    let mut holidays: Vec<Holiday> = FIXED_PUBLIC_HOLIDAYS
        .iter()
        .map(|&(month, day, name)| {
            Ok(Holiday {
                date: calendar_date(year, month, day)?,
                name,
                kind: HolidayKind::Public,
            })
        })
        .collect::<Result<Vec<Holiday>, DomainError>>()?;
    holidays.extend(easter_holidays(year)?);
    holidays.sort_by_key(|h| h.date);
    Ok(holidays)
}

/// Returns every school holiday date falling in calendar year `year`,
/// ordered by date.
///
/// # Errors
///
/// Returns an error if the year is outside the supported date range.
pub fn school_holidays(year: i32) -> Result<Vec<Holiday>, DomainError> {
    let mut holidays: Vec<Holiday> = Vec::new();
    for window in &SCHOOL_WINDOWS {
        let start: Date = calendar_date(year, window.start.0, window.start.1)?;
        let end: Date = calendar_date(year, window.end.0, window.end.1)?;
        holidays.extend(dates_in_range(start, end)?.into_iter().map(|date| Holiday {
            date,
            name: window.name,
            kind: HolidayKind::School,
        }));
    }
    Ok(holidays)
}

/// Returns the public and school holidays of `year`, ordered by date.
///
/// A date that is both a public holiday and inside a school window is
/// listed once, as the public holiday.
///
/// # Errors
///
/// Returns an error if the year is outside the supported date range.
pub fn holidays_for_year(year: i32) -> Result<Vec<Holiday>, DomainError> {
    let mut holidays: Vec<Holiday> = public_holidays(year)?;
    let public_dates: BTreeSet<Date> = holidays.iter().map(|h| h.date).collect();
    holidays.extend(
        school_holidays(year)?
            .into_iter()
            .filter(|h| !public_dates.contains(&h.date)),
    );
    holidays.sort_by_key(|h| h.date);
    Ok(holidays)
}

/// Returns the holiday name for `date`, if it is a holiday.
///
/// Public holidays take precedence over school holiday windows.
#[must_use]
pub fn holiday_name(date: Date) -> Option<&'static str> {
    let md: (u8, u8) = month_day(date);

    if let Some(&(_, _, name)) = FIXED_PUBLIC_HOLIDAYS
        .iter()
        .find(|&&(month, day, _)| (month, day) == md)
    {
        return Some(name);
    }

    if let Ok(easter) = easter_holidays(date.year())
        && let Some(holiday) = easter.iter().find(|h| h.date == date)
    {
        return Some(holiday.name);
    }

    SCHOOL_WINDOWS
        .iter()
        .find(|window| window.start <= md && md <= window.end)
        .map(|window| window.name)
}

/// Returns true if `date` falls on a Friday, Saturday or Sunday.
#[must_use]
pub const fn is_weekend(date: Date) -> bool {
    matches!(
        date.weekday(),
        Weekday::Friday | Weekday::Saturday | Weekday::Sunday
    )
}

/// Returns true if `date` is peak season.
#[must_use]
pub fn is_peak_season(date: Date) -> bool {
    is_weekend(date) || holiday_name(date).is_some()
}

/// Returns the computed season of `date`, ignoring any manual override.
#[must_use]
pub fn season_for(date: Date) -> SeasonType {
    if is_peak_season(date) {
        SeasonType::Peak
    } else {
        SeasonType::Offpeak
    }
}

/// Returns every peak season date of `year`.
///
/// # Errors
///
/// Returns an error if the year is outside the supported date range.
pub fn peak_season_dates(year: i32) -> Result<BTreeSet<Date>, DomainError> {
    let first: Date = calendar_date(year, 1, 1)?;
    let last: Date = calendar_date(year, 12, 31)?;
    Ok(dates_in_range(first, last)?
        .into_iter()
        .filter(|date| is_peak_season(*date))
        .collect())
}
