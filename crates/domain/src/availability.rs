// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-date availability records.
//!
//! Records are created lazily by admin writes. A date with no record is
//! fully available at the configured maximum capacity, with its season
//! taken from the season calendar.

use crate::error::DomainError;
use crate::season::{holiday_name, season_for};
use crate::types::SeasonType;
use crate::validation::dates_in_range;
use std::collections::BTreeMap;
use time::{Date, Month};

/// Availability of a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityDay {
    /// The calendar date.
    pub date: Date,
    /// Remaining guest capacity. Informational only.
    pub available: u32,
    /// No accommodation bookings are accepted while set.
    pub blocked: bool,
    /// The boma cannot be booked while set.
    pub boma_blocked: bool,
    /// Manual season override.
    pub season_type: Option<SeasonType>,
}

impl AvailabilityDay {
    /// Returns the record an unrecorded date is treated as having.
    #[must_use]
    pub const fn with_defaults(date: Date, max_capacity: u32) -> Self {
        Self {
            date,
            available: max_capacity,
            blocked: false,
            boma_blocked: false,
            season_type: None,
        }
    }

    /// Returns the manual override, or the computed season when there is none.
    #[must_use]
    pub fn effective_season(&self) -> SeasonType {
        self.season_type.unwrap_or_else(|| season_for(self.date))
    }
}

/// A partial update of an availability record.
///
/// `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvailabilityPatch {
    /// New remaining capacity.
    pub available: Option<u32>,
    /// New accommodation block flag.
    pub blocked: Option<bool>,
    /// New boma block flag.
    pub boma_blocked: Option<bool>,
    /// New manual season override.
    pub season_type: Option<SeasonType>,
}

/// Applies `patch` to the record for `date`.
///
/// When no record exists one is started from the defaults for
/// `max_capacity`. Setting `available` to zero without an explicit
/// `blocked` value also blocks the date.
#[must_use]
pub fn apply_availability_patch(
    existing: Option<&AvailabilityDay>,
    date: Date,
    patch: &AvailabilityPatch,
    max_capacity: u32,
) -> AvailabilityDay {
    let mut day: AvailabilityDay = existing
        .copied()
        .unwrap_or_else(|| AvailabilityDay::with_defaults(date, max_capacity));

    if let Some(available) = patch.available {
        day.available = available;
    }
    match patch.blocked {
        Some(blocked) => day.blocked = blocked,
        None if patch.available == Some(0) => day.blocked = true,
        None => {}
    }
    if let Some(boma_blocked) = patch.boma_blocked {
        day.boma_blocked = boma_blocked;
    }
    if let Some(season_type) = patch.season_type {
        day.season_type = Some(season_type);
    }
    day
}

/// Sets the season override on every date from `start` to `end` inclusive.
///
/// Only the season is changed on existing records; dates without a record
/// get one at full default capacity.
///
/// # Errors
///
/// Returns an error if `start` is after `end`.
pub fn apply_season_range(
    existing: &BTreeMap<Date, AvailabilityDay>,
    start: Date,
    end: Date,
    season_type: SeasonType,
    max_capacity: u32,
) -> Result<Vec<AvailabilityDay>, DomainError> {
    let patch: AvailabilityPatch = AvailabilityPatch {
        season_type: Some(season_type),
        ..AvailabilityPatch::default()
    };
    Ok(dates_in_range(start, end)?
        .into_iter()
        .map(|date| apply_availability_patch(existing.get(&date), date, &patch, max_capacity))
        .collect())
}

/// Returns the first and last day of a calendar month.
///
/// # Errors
///
/// Returns `DomainError::InvalidMonth` if the month is not 1 to 12 or the
/// year is outside the supported range.
pub fn month_bounds(year: i32, month: u8) -> Result<(Date, Date), DomainError> {
    let invalid = || DomainError::InvalidMonth { year, month };
    let calendar_month: Month = Month::try_from(month).map_err(|_| invalid())?;
    let first: Date = Date::from_calendar_date(year, calendar_month, 1).map_err(|_| invalid())?;
    let mut last: Date = first;
    while let Some(next) = last.next_day() {
        if next.month() != calendar_month {
            break;
        }
        last = next;
    }
    Ok((first, last))
}

/// One date of a month view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthDay {
    /// The stored record, or the defaults when the date has none.
    pub day: AvailabilityDay,
    /// Whether a record is stored for the date.
    pub recorded: bool,
    /// The season the date is priced at.
    pub effective_season: SeasonType,
    /// Holiday name, if any.
    pub holiday_name: Option<&'static str>,
    /// Whether the date is before the lodge's current date.
    pub is_past: bool,
}

/// Builds the availability view of every date in a month.
///
/// # Errors
///
/// Returns an error if the year and month do not name a calendar month.
pub fn month_view(
    year: i32,
    month: u8,
    recorded: &[AvailabilityDay],
    max_capacity: u32,
    today: Date,
) -> Result<Vec<MonthDay>, DomainError> {
    let (first, last): (Date, Date) = month_bounds(year, month)?;
    let by_date: BTreeMap<Date, AvailabilityDay> =
        recorded.iter().map(|day| (day.date, *day)).collect();

    Ok(dates_in_range(first, last)?
        .into_iter()
        .map(|date| {
            let stored: Option<&AvailabilityDay> = by_date.get(&date);
            let day: AvailabilityDay = stored
                .copied()
                .unwrap_or_else(|| AvailabilityDay::with_defaults(date, max_capacity));
            MonthDay {
                day,
                recorded: stored.is_some(),
                effective_season: day.effective_season(),
                holiday_name: holiday_name(date),
                is_past: date < today,
            }
        })
        .collect())
}

/// Rejects boma dates that are blocked in `recorded`.
///
/// # Errors
///
/// Returns `DomainError::BomaDateUnavailable` for the first blocked date.
pub fn validate_boma_dates(
    boma_dates: &[Date],
    recorded: &[AvailabilityDay],
) -> Result<(), DomainError> {
    let blocked: Option<&AvailabilityDay> = recorded
        .iter()
        .filter(|day| day.boma_blocked)
        .find(|day| boma_dates.contains(&day.date));
    match blocked {
        Some(day) => Err(DomainError::BomaDateUnavailable { date: day.date }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_zero_available_without_blocked_forces_block() {
        let patch = AvailabilityPatch {
            available: Some(0),
            ..AvailabilityPatch::default()
        };
        let day = apply_availability_patch(None, date!(2025 - 07 - 01), &patch, 16);
        assert_eq!(day.available, 0);
        assert!(day.blocked);
    }

    #[test]
    fn test_zero_available_with_explicit_unblock_is_respected() {
        let patch = AvailabilityPatch {
            available: Some(0),
            blocked: Some(false),
            ..AvailabilityPatch::default()
        };
        let day = apply_availability_patch(None, date!(2025 - 07 - 01), &patch, 16);
        assert!(!day.blocked);
    }

    #[test]
    fn test_new_record_starts_from_defaults() {
        let patch = AvailabilityPatch {
            boma_blocked: Some(true),
            ..AvailabilityPatch::default()
        };
        let day = apply_availability_patch(None, date!(2025 - 07 - 01), &patch, 12);
        assert_eq!(day.available, 12);
        assert!(!day.blocked);
        assert!(day.boma_blocked);
        assert_eq!(day.season_type, None);
    }

    #[test]
    fn test_omitted_fields_keep_prior_values() {
        let existing = AvailabilityDay {
            date: date!(2025 - 07 - 01),
            available: 4,
            blocked: true,
            boma_blocked: true,
            season_type: Some(SeasonType::Peak),
        };
        let patch = AvailabilityPatch {
            available: Some(6),
            ..AvailabilityPatch::default()
        };
        let day = apply_availability_patch(Some(&existing), existing.date, &patch, 16);
        assert_eq!(day.available, 6);
        assert!(day.blocked);
        assert!(day.boma_blocked);
        assert_eq!(day.season_type, Some(SeasonType::Peak));
    }

    #[test]
    fn test_season_range_touches_every_date_inclusive() {
        let mut existing = BTreeMap::new();
        existing.insert(
            date!(2025 - 06 - 02),
            AvailabilityDay {
                date: date!(2025 - 06 - 02),
                available: 3,
                blocked: true,
                boma_blocked: false,
                season_type: None,
            },
        );

        let days = apply_season_range(
            &existing,
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 03),
            SeasonType::Peak,
            16,
        )
        .unwrap();

        assert_eq!(days.len(), 3);
        assert!(days.iter().all(|d| d.season_type == Some(SeasonType::Peak)));
        assert_eq!(days[0].available, 16);
        assert_eq!(days[1].available, 3);
        assert!(days[1].blocked);
    }

    #[test]
    fn test_season_range_rejects_reversed_range() {
        let result = apply_season_range(
            &BTreeMap::new(),
            date!(2025 - 06 - 03),
            date!(2025 - 06 - 01),
            SeasonType::Peak,
            16,
        );
        assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_month_bounds_handles_leap_years() {
        assert_eq!(
            month_bounds(2024, 2).unwrap(),
            (date!(2024 - 02 - 01), date!(2024 - 02 - 29))
        );
        assert_eq!(
            month_bounds(2025, 2).unwrap(),
            (date!(2025 - 02 - 01), date!(2025 - 02 - 28))
        );
        assert!(matches!(
            month_bounds(2025, 13),
            Err(DomainError::InvalidMonth { year: 2025, month: 13 })
        ));
    }

    #[test]
    fn test_month_view_fills_unrecorded_dates() {
        let recorded = [AvailabilityDay {
            date: date!(2025 - 06 - 10),
            available: 0,
            blocked: true,
            boma_blocked: false,
            season_type: Some(SeasonType::Peak),
        }];
        let view = month_view(2025, 6, &recorded, 16, date!(2025 - 06 - 05)).unwrap();

        assert_eq!(view.len(), 30);
        let tenth = &view[9];
        assert!(tenth.recorded);
        assert!(tenth.day.blocked);
        assert_eq!(tenth.effective_season, SeasonType::Peak);

        let ninth = &view[8];
        assert!(!ninth.recorded);
        assert_eq!(ninth.day.available, 16);
        // 2025-06-09 is a Monday outside any holiday
        assert_eq!(ninth.effective_season, SeasonType::Offpeak);

        assert!(view[0].is_past);
        assert!(!view[4].is_past);
        assert_eq!(view[15].holiday_name, Some("Youth Day"));
    }

    #[test]
    fn test_blocked_boma_date_is_rejected() {
        let recorded = [AvailabilityDay {
            date: date!(2025 - 12 - 25),
            available: 16,
            blocked: false,
            boma_blocked: true,
            season_type: None,
        }];
        let result = validate_boma_dates(&[date!(2025 - 12 - 25)], &recorded);
        assert_eq!(
            result,
            Err(DomainError::BomaDateUnavailable {
                date: date!(2025 - 12 - 25)
            })
        );
        assert!(validate_boma_dates(&[date!(2025 - 12 - 24)], &recorded).is_ok());
    }
}
