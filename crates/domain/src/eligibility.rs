// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rules deciding whether a bungalow may submit a new booking.
//!
//! A bungalow may hold one active booking at a time, and must wait a year
//! after a completed stay before booking again.

use crate::booking::Booking;
use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use time::{Duration, OffsetDateTime};

/// Days a bungalow must wait after a completed stay.
pub const COOLDOWN_DAYS: i64 = 365;

const MILLIS_PER_DAY: i128 = 86_400_000;

/// Time left on a bungalow's cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    /// Whole days since the stay was completed.
    pub days_elapsed: i64,
    /// Days until a new booking may be submitted, rounded up.
    pub days_remaining: i64,
}

/// Returns the cooldown still running for a stay completed at
/// `completed_at`, or `None` once a full year has passed.
///
/// A completion time after `now` counts as completed just now.
///
/// # Errors
///
/// Returns an error if the elapsed time cannot be represented in days.
pub fn cooldown_for(
    completed_at: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<Option<Cooldown>, DomainError> {
    let window: Duration = Duration::days(COOLDOWN_DAYS);
    let elapsed: Duration = (now - completed_at).max(Duration::ZERO);
    if elapsed >= window {
        return Ok(None);
    }

    let elapsed_ms: i128 = elapsed.whole_milliseconds();
    let remaining_ms: i128 = window.whole_milliseconds() - elapsed_ms;
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: String::from("computing booking cooldown"),
    };

    let days_elapsed: i64 =
        i64::try_from(elapsed_ms.div_euclid(MILLIS_PER_DAY)).map_err(|_| overflow())?;
    let days_remaining: i64 =
        i64::try_from((remaining_ms + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY))
            .map_err(|_| overflow())?;

    Ok(Some(Cooldown {
        days_elapsed,
        days_remaining,
    }))
}

/// Checks a bungalow's existing bookings before a new request is accepted.
///
/// The cooldown is checked first, using the most recently completed stay,
/// then the single-active-booking rule.
///
/// # Errors
///
/// Returns `DomainError::CooldownActive` if a stay was completed less than
/// [`COOLDOWN_DAYS`] ago, or `DomainError::ActiveBookingExists` if another
/// booking is still active.
pub fn check_booking_eligibility(
    existing: &[Booking],
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let latest_completed: Option<OffsetDateTime> = existing
        .iter()
        .filter(|booking| booking.status == BookingStatus::Confirmed)
        .filter_map(|booking| booking.stay_completed_at)
        .max();

    if let Some(completed_at) = latest_completed
        && let Some(cooldown) = cooldown_for(completed_at, now)?
    {
        return Err(DomainError::CooldownActive {
            days_elapsed: cooldown.days_elapsed,
            days_remaining: cooldown.days_remaining,
        });
    }

    if let Some(active) = existing.iter().find(|booking| booking.is_active()) {
        return Err(DomainError::ActiveBookingExists {
            bungalow_number: active.bungalow_number.value().to_string(),
        });
    }

    Ok(())
}
