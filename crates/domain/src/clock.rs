// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The lodge's local calendar date.

use crate::error::DomainError;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use time::{Date, Month, OffsetDateTime};

/// Time zone the lodge operates in unless configured otherwise.
pub const DEFAULT_LODGE_TIMEZONE: &str = "Africa/Johannesburg";

/// The time zone used to decide which calendar day it is at the lodge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LodgeTimezone {
    tz: Tz,
}

impl Default for LodgeTimezone {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Africa::Johannesburg,
        }
    }
}

impl LodgeTimezone {
    /// Parses an IANA time zone name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is not recognised.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))?;
        Ok(Self { tz })
    }

    /// Returns the IANA name of the zone.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Returns the calendar date at the lodge at instant `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the instant is outside the supported date range.
    pub fn local_date(&self, now: OffsetDateTime) -> Result<Date, DomainError> {
        let overflow = || DomainError::DateArithmeticOverflow {
            operation: format!("converting {now} to {}", self.tz.name()),
        };

        let utc: DateTime<Utc> =
            DateTime::from_timestamp(now.unix_timestamp(), now.nanosecond()).ok_or_else(overflow)?;
        let local: NaiveDate = utc.with_timezone(&self.tz).date_naive();

        let month: Month = u8::try_from(local.month())
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(overflow)?;
        let day: u8 = u8::try_from(local.day()).map_err(|_| overflow())?;
        Date::from_calendar_date(local.year(), month, day).map_err(|_| overflow())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_default_is_johannesburg() {
        assert_eq!(LodgeTimezone::default().name(), DEFAULT_LODGE_TIMEZONE);
    }

    #[test]
    fn test_local_date_crosses_midnight_before_utc() {
        // 23:30 UTC is 01:30 the next day in Johannesburg (UTC+2)
        let tz = LodgeTimezone::default();
        let local = tz.local_date(datetime!(2025-12-31 23:30 UTC)).unwrap();
        assert_eq!(local, date!(2026 - 01 - 01));
    }

    #[test]
    fn test_other_zone_is_respected() {
        let tz = LodgeTimezone::parse("America/New_York").unwrap();
        let local = tz.local_date(datetime!(2026-01-01 03:00 UTC)).unwrap();
        assert_eq!(local, date!(2025 - 12 - 31));
    }

    #[test]
    fn test_unknown_zone_is_rejected() {
        assert_eq!(
            LodgeTimezone::parse("Mars/Olympus_Mons"),
            Err(DomainError::InvalidTimezone(String::from(
                "Mars/Olympus_Mons"
            )))
        );
    }
}
