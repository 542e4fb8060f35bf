// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod booking;
mod booking_status;
mod clock;
mod eligibility;
mod error;
mod pricing;
mod season;
mod settings;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{
    AvailabilityDay, AvailabilityPatch, MonthDay, apply_availability_patch, apply_season_range,
    month_bounds, month_view, validate_boma_dates,
};
pub use booking::{Booking, BookingEdit, BookingRequest};
pub use booking_status::BookingStatus;
pub use clock::{DEFAULT_LODGE_TIMEZONE, LodgeTimezone};
pub use eligibility::{COOLDOWN_DAYS, Cooldown, check_booking_eligibility, cooldown_for};
pub use error::DomainError;
pub use pricing::{
    BOMA_DAILY_RATE, CostBreakdown, NightCharge, OFFPEAK_NIGHTLY_RATE, PEAK_NIGHTLY_RATE,
    RateCard, compute_cost,
};
pub use season::{
    Holiday, HolidayKind, easter_sunday, holiday_name, holidays_for_year, is_peak_season,
    is_weekend, peak_season_dates, public_holidays, school_holidays, season_for,
};
pub use settings::{AdminKeyMode, DEFAULT_MAX_CAPACITY, Settings, validate_max_capacity};
pub use types::{BungalowNumber, SeasonType, StayRange, UserType};
pub use validation::{
    dates_in_range, format_date, normalize_optional_text, parse_date, validate_guest_count,
};
