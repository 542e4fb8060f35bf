// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
///
/// The `Display` text of the booking rule variants is shown to visitors
/// verbatim, so it is phrased for them rather than for operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Bungalow number is empty or malformed.
    InvalidBungalowNumber(String),
    /// User type is not one of the recognised kinds.
    InvalidUserType(String),
    /// Booking status string is not recognised.
    InvalidBookingStatus {
        /// The rejected status string.
        status: String,
    },
    /// Season type string is not recognised.
    InvalidSeasonType(String),
    /// Guest count must be at least one when supplied.
    InvalidGuestCount(u32),
    /// Check-out must fall after check-in.
    InvalidStayRange {
        /// The requested check-in date.
        check_in: Date,
        /// The requested check-out date.
        check_out: Date,
    },
    /// The stay is longer than the lodge accepts.
    StayTooLong {
        /// Number of nights requested.
        nights: i64,
        /// Longest accepted stay, in nights.
        max_nights: i64,
    },
    /// A date range whose start falls after its end.
    InvalidDateRange {
        /// The first date of the range.
        start: Date,
        /// The last date of the range.
        end: Date,
    },
    /// Failed to parse a date string.
    DateParseError {
        /// The date string that failed to parse.
        date_string: String,
        /// The underlying parse error message.
        error: String,
    },
    /// Year and month do not name a real calendar month.
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u8,
    },
    /// Date arithmetic left the supported calendar range.
    DateArithmeticOverflow {
        /// Description of the operation that overflowed.
        operation: String,
    },
    /// Time zone name is not a recognised IANA zone.
    InvalidTimezone(String),
    /// Invalid booking status transition.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested target status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// Completing a stay requires a confirmed booking.
    StayNotConfirmed {
        /// The booking's current status.
        status: String,
    },
    /// The stay has already been marked as completed.
    StayAlreadyCompleted,
    /// The bungalow completed a stay less than a year ago.
    CooldownActive {
        /// Whole days since the previous stay was completed.
        days_elapsed: i64,
        /// Days left until a new booking may be requested.
        days_remaining: i64,
    },
    /// The bungalow already has a booking in progress.
    ActiveBookingExists {
        /// The bungalow holding the active booking.
        bungalow_number: String,
    },
    /// Booking does not exist.
    BookingNotFound(i64),
    /// Boma day selected outside of the nights being stayed.
    BomaDateOutsideStay {
        /// The offending boma date.
        date: Date,
    },
    /// Boma day selected on a date where the boma is blocked.
    BomaDateUnavailable {
        /// The blocked boma date.
        date: Date,
    },
    /// Maximum capacity must be at least one guest.
    InvalidMaxCapacity(u32),
    /// The first-time admin key path was used after a key exists.
    AdminKeyAlreadyConfigured,
    /// Key rotation was requested before any key was set.
    AdminKeyNotConfigured,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBungalowNumber(msg) => write!(f, "Invalid bungalow number: {msg}"),
            Self::InvalidUserType(user_type) => write!(
                f,
                "Invalid user type '{user_type}': expected 'owner' or 'registered'"
            ),
            Self::InvalidBookingStatus { status } => {
                write!(f, "Invalid booking status: {status}")
            }
            Self::InvalidSeasonType(season) => write!(
                f,
                "Invalid season type '{season}': expected 'peak' or 'offpeak'"
            ),
            Self::InvalidGuestCount(count) => {
                write!(f, "Invalid guest count {count}: must be at least 1")
            }
            Self::InvalidStayRange {
                check_in,
                check_out,
            } => write!(
                f,
                "Check-out date {check_out} must be after check-in date {check_in}"
            ),
            Self::StayTooLong { nights, max_nights } => write!(
                f,
                "Stay of {nights} nights exceeds the maximum of {max_nights} nights"
            ),
            Self::InvalidDateRange { start, end } => {
                write!(f, "Start date {start} must not be after end date {end}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidMonth { year, month } => {
                write!(f, "Invalid month {month} for year {year}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from {from} to {to}: {reason}")
            }
            Self::StayNotConfirmed { .. } => write!(f, "Can only complete confirmed bookings"),
            Self::StayAlreadyCompleted => write!(f, "Stay has already been completed"),
            Self::CooldownActive {
                days_elapsed,
                days_remaining,
            } => write!(
                f,
                "You can only book once per year. Your last stay was completed {days_elapsed} days ago. Please wait {days_remaining} more days."
            ),
            Self::ActiveBookingExists { .. } => write!(
                f,
                "You already have an active booking request. Please wait for it to be processed or contact an admin."
            ),
            Self::BookingNotFound(id) => write!(f, "Booking not found: {id}"),
            Self::BomaDateOutsideStay { date } => write!(
                f,
                "Boma date {date} is not one of the nights of the stay"
            ),
            Self::BomaDateUnavailable { date } => {
                write!(f, "The boma is not available on {date}")
            }
            Self::InvalidMaxCapacity(capacity) => {
                write!(f, "Invalid maximum capacity {capacity}: must be at least 1")
            }
            Self::AdminKeyAlreadyConfigured => write!(f, "Admin key already set"),
            Self::AdminKeyNotConfigured => write!(f, "Admin key has not been set"),
        }
    }
}

impl std::error::Error for DomainError {}
