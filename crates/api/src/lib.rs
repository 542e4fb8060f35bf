// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Sibon lodge booking system.
//!
//! This crate turns wire-level requests into domain values, enforces admin
//! key authorization, runs the core commands inside store transactions and
//! translates every failure into an [`ApiError`]. It knows nothing about
//! HTTP; the server crate maps these handlers onto routes.

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
#![allow(clippy::multiple_crate_versions)]

mod admin_key_policy;
mod auth;
mod config;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use admin_key_policy::{AdminKeyPolicy, AdminKeyPolicyError};
pub use auth::AuthorizationService;
pub use config::ServiceConfig;
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    PreparedAdminKey, complete_stay, create_booking, get_audit_log, get_holidays,
    get_month_availability, get_settings, is_configured, list_bookings, prepare_admin_key,
    prepare_rotated_admin_key, quote, remove_booking, rotate_admin_key, set_admin_key,
    set_date_availability, set_max_capacity, set_season_for_range, store_admin_key,
    store_rotated_admin_key, update_booking, update_status, verify_admin_key_request,
};
pub use request_response::{
    AdminKeyResponse, AuditEventInfo, AuditLogQuery, AuditLogResponse, AvailabilityDayInfo,
    BookingInfo, ConfiguredResponse, CreateBookingRequest, HolidayInfo, HolidaysResponse,
    ListBookingsQuery, ListBookingsResponse, ListedBookingInfo, MonthAvailabilityResponse,
    MonthDayInfo, NightChargeInfo, QuoteRequest, QuoteResponse, RemoveBookingResponse,
    RotateAdminKeyRequest, SetAdminKeyRequest, SetDateAvailabilityRequest,
    SetMaxCapacityRequest, SetSeasonRangeRequest, SetSeasonRangeResponse, SettingsResponse,
    UpdateBookingRequest, UpdateStatusRequest, VerifyAdminKeyRequest, VerifyAdminKeyResponse,
};
