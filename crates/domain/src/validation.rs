// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, DomainError> {
    date.format(DATE_FORMAT)
        .map_err(|e| DomainError::DateArithmeticOverflow {
            operation: format!("formatting {date}: {e}"),
        })
}

/// Validates an optional guest count.
///
/// # Errors
///
/// Returns `DomainError::InvalidGuestCount` if a count of zero is supplied.
pub const fn validate_guest_count(guests: Option<u32>) -> Result<(), DomainError> {
    match guests {
        Some(0) => Err(DomainError::InvalidGuestCount(0)),
        _ => Ok(()),
    }
}

/// Trims an optional display string, treating blank input as absent.
#[must_use]
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Returns every date from `start` to `end` inclusive.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `start` is after `end`.
pub fn dates_in_range(start: Date, end: Date) -> Result<Vec<Date>, DomainError> {
    if start > end {
        return Err(DomainError::InvalidDateRange { start, end });
    }

    let mut dates: Vec<Date> = Vec::new();
    let mut current: Date = start;
    loop {
        dates.push(current);
        if current == end {
            break;
        }
        current = current
            .next_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("advancing past {current}"),
            })?;
    }
    Ok(dates)
}
