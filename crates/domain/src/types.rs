// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Duration};

/// Identifies the unit-holder's bungalow.
///
/// There are no user accounts, so the bungalow number is the key for the
/// cooldown and single-active-booking rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BungalowNumber {
    value: String,
}

impl BungalowNumber {
    /// Maximum accepted length of a bungalow number.
    pub const MAX_LENGTH: usize = 16;

    /// Creates a bungalow number from user input.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed value is empty or longer than
    /// [`Self::MAX_LENGTH`] characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidBungalowNumber(String::from(
                "Bungalow number cannot be empty",
            )));
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::InvalidBungalowNumber(format!(
                "Bungalow number must be at most {} characters",
                Self::MAX_LENGTH
            )));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the bungalow number as entered (trimmed).
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for BungalowNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// The kind of guest making a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// A bungalow owner.
    Owner,
    /// A registered user of an owner's bungalow.
    Registered,
}

impl UserType {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Registered => "registered",
        }
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "registered" => Ok(Self::Registered),
            _ => Err(DomainError::InvalidUserType(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing season of a single night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonType {
    /// Weekends, public holidays and school holidays.
    Peak,
    /// Every other date.
    Offpeak,
}

impl SeasonType {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Peak => "peak",
            Self::Offpeak => "offpeak",
        }
    }
}

impl FromStr for SeasonType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "peak" => Ok(Self::Peak),
            "offpeak" => Ok(Self::Offpeak),
            _ => Err(DomainError::InvalidSeasonType(s.to_string())),
        }
    }
}

impl std::fmt::Display for SeasonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-open range of nights `[check_in, check_out)`.
///
/// The check-out day is never a night of the stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    check_in: Date,
    check_out: Date,
}

impl StayRange {
    /// Longest stay accepted, in nights.
    pub const MAX_NIGHTS: i64 = 60;

    /// Creates a stay range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStayRange` unless `check_out` is after `check_in`,
    /// or `DomainError::StayTooLong` if the stay is longer than [`Self::MAX_NIGHTS`].
    pub fn new(check_in: Date, check_out: Date) -> Result<Self, DomainError> {
        if check_out <= check_in {
            return Err(DomainError::InvalidStayRange {
                check_in,
                check_out,
            });
        }
        let nights: i64 = (check_out - check_in).whole_days();
        if nights > Self::MAX_NIGHTS {
            return Err(DomainError::StayTooLong {
                nights,
                max_nights: Self::MAX_NIGHTS,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in date.
    #[must_use]
    pub const fn check_in(&self) -> Date {
        self.check_in
    }

    /// Returns the check-out date.
    #[must_use]
    pub const fn check_out(&self) -> Date {
        self.check_out
    }

    /// Returns the number of nights in the stay. Always at least 1.
    #[must_use]
    pub fn night_count(&self) -> i64 {
        let span: Duration = self.check_out - self.check_in;
        span.whole_days()
    }

    /// Returns true if `date` is one of the nights of the stay.
    #[must_use]
    pub fn contains_night(&self, date: Date) -> bool {
        date >= self.check_in && date < self.check_out
    }

    /// Returns every night of the stay, in order.
    #[must_use]
    pub fn nights(&self) -> Vec<Date> {
        let mut nights: Vec<Date> = Vec::new();
        let mut current: Option<Date> = Some(self.check_in);
        while let Some(date) = current {
            if date >= self.check_out {
                break;
            }
            nights.push(date);
            current = date.next_day();
        }
        nights
    }
}
