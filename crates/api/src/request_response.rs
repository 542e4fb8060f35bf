// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `YYYY-MM-DD` strings and timestamps as RFC 3339
//! strings. Status, user type and season values use their lowercase
//! wire names (e.g. `"payment_requested"`, `"offpeak"`).

use serde::{Deserialize, Serialize};

/// API response describing whether an admin key has been set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredResponse {
    /// True once an admin key exists.
    pub configured: bool,
}

/// API request to set the first admin key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAdminKeyRequest {
    /// The new admin key.
    pub admin_key: String,
}

/// API request to replace the admin key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateAdminKeyRequest {
    /// The key currently in use.
    pub current_key: String,
    /// The replacement key.
    pub new_key: String,
}

/// API response for a successful admin key change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminKeyResponse {
    /// A success message.
    pub message: String,
}

/// API request to check an admin key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyAdminKeyRequest {
    /// The key to check.
    pub admin_key: String,
}

/// API response to an admin key check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyAdminKeyResponse {
    /// True if the key matches the configured key.
    pub valid: bool,
}

/// API response carrying the public settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsResponse {
    /// Default capacity of a date with no availability record.
    pub max_capacity: u32,
    /// True once an admin key exists.
    pub admin_key_configured: bool,
}

/// API request to change the maximum capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMaxCapacityRequest {
    /// The new maximum capacity.
    pub max_capacity: u32,
}

/// API request to change the availability of one date.
///
/// Omitted fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDateAvailabilityRequest {
    /// The date to change.
    pub date: String,
    /// New remaining capacity.
    #[serde(default)]
    pub available: Option<u32>,
    /// New accommodation block flag.
    #[serde(default)]
    pub blocked: Option<bool>,
    /// New boma block flag.
    #[serde(default)]
    pub boma_blocked: Option<bool>,
    /// New season override (`"peak"` or `"offpeak"`).
    #[serde(default)]
    pub season_type: Option<String>,
}

/// A stored availability record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDayInfo {
    /// The date.
    pub date: String,
    /// Remaining capacity.
    pub available: u32,
    /// Accommodation block flag.
    pub blocked: bool,
    /// Boma block flag.
    pub boma_blocked: bool,
    /// Manual season override, if any.
    pub season_type: Option<String>,
}

/// One date of a month view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDayInfo {
    /// The date.
    pub date: String,
    /// Remaining capacity.
    pub available: u32,
    /// Accommodation block flag.
    pub blocked: bool,
    /// Boma block flag.
    pub boma_blocked: bool,
    /// Manual season override, if any.
    pub season_type: Option<String>,
    /// The season the date is priced at.
    pub effective_season: String,
    /// Holiday name, if any.
    pub holiday_name: Option<String>,
    /// True if the date is before today at the lodge.
    pub is_past: bool,
    /// True if a record is stored for the date.
    pub recorded: bool,
}

/// API response for a month of availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAvailabilityResponse {
    /// The year.
    pub year: i32,
    /// The month number (1-12).
    pub month: u8,
    /// Every date of the month, in order.
    pub days: Vec<MonthDayInfo>,
}

/// API request to override the season of a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSeasonRangeRequest {
    /// First date of the range.
    pub start: String,
    /// Last date of the range, inclusive.
    pub end: String,
    /// The season to apply (`"peak"` or `"offpeak"`).
    pub season_type: String,
}

/// API response for a season range override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSeasonRangeResponse {
    /// Number of dates written.
    pub dates_updated: usize,
}

/// API query for the booking listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookingsQuery {
    /// Case-insensitive search over guest name and email.
    #[serde(default)]
    pub search: Option<String>,
    /// Only bookings in this status.
    #[serde(default)]
    pub status: Option<String>,
}

/// API request to submit a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Arrival date.
    pub check_in: String,
    /// Departure date.
    pub check_out: String,
    /// The requesting bungalow.
    pub bungalow_number: String,
    /// `"owner"` or `"registered"`.
    pub user_type: String,
    /// Guest name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Guest email.
    #[serde(default)]
    pub user_email: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Number of guests.
    #[serde(default)]
    pub guests: Option<u32>,
}

/// API request to edit a booking.
///
/// Omitted fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBookingRequest {
    /// New arrival date.
    #[serde(default)]
    pub check_in: Option<String>,
    /// New departure date.
    #[serde(default)]
    pub check_out: Option<String>,
    /// New guest name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// New guest email.
    #[serde(default)]
    pub user_email: Option<String>,
    /// New notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// New number of guests.
    #[serde(default)]
    pub guests: Option<u32>,
}

/// API request to move a booking to its next status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// The target status.
    pub status: String,
}

/// A booking as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    /// The booking ID.
    pub booking_id: i64,
    /// The requesting bungalow.
    pub bungalow_number: String,
    /// `"owner"` or `"registered"`.
    pub user_type: String,
    /// Guest name.
    pub user_name: Option<String>,
    /// Guest email.
    pub user_email: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Number of guests.
    pub guests: Option<u32>,
    /// Arrival date.
    pub check_in: String,
    /// Departure date.
    pub check_out: String,
    /// Workflow status.
    pub status: String,
    /// Submission time.
    pub created_at: String,
    /// When payment was requested.
    pub payment_requested_at: Option<String>,
    /// When payment was received.
    pub payment_received_at: Option<String>,
    /// When the stay was confirmed.
    pub confirmed_at: Option<String>,
    /// When the stay was completed.
    pub stay_completed_at: Option<String>,
}

/// A booking in the admin listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedBookingInfo {
    /// The booking.
    #[serde(flatten)]
    pub booking: BookingInfo,
    /// Number of nights.
    pub nights: i64,
    /// Accommodation cost, excluding the boma.
    pub accommodation_cost: u64,
}

/// API response for the booking listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    /// Matching bookings, newest first.
    pub bookings: Vec<ListedBookingInfo>,
    /// Pending bookings, ignoring the filters.
    pub pending_count: usize,
    /// Approved bookings, ignoring the filters.
    pub approved_count: usize,
}

/// API response for a removed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveBookingResponse {
    /// The removed booking.
    pub booking_id: i64,
    /// A success message.
    pub message: String,
}

/// API request for a price quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Arrival date.
    pub check_in: String,
    /// Departure date.
    pub check_out: String,
    /// Nights on which the boma is wanted.
    #[serde(default)]
    pub boma_dates: Vec<String>,
}

/// The charge for one night of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightChargeInfo {
    /// The night.
    pub date: String,
    /// The season it was priced at.
    pub season: String,
    /// The amount charged.
    pub rate: u64,
}

/// API response for a price quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Arrival date.
    pub check_in: String,
    /// Departure date.
    pub check_out: String,
    /// One entry per night.
    pub nights: Vec<NightChargeInfo>,
    /// Sum of the nightly charges.
    pub accommodation: u64,
    /// Distinct boma days charged.
    pub boma_days: Vec<String>,
    /// Boma charge.
    pub boma: u64,
    /// Accommodation plus boma.
    pub total: u64,
}

/// A holiday in the season calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInfo {
    /// The date.
    pub date: String,
    /// Display name.
    pub name: String,
    /// `"public"` or `"school"`.
    pub kind: String,
}

/// API response listing the holidays of a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaysResponse {
    /// The year.
    pub year: i32,
    /// Holidays in date order.
    pub holidays: Vec<HolidayInfo>,
}

/// API query for the audit log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogQuery {
    /// Only events about this booking.
    #[serde(default)]
    pub booking_id: Option<i64>,
}

/// An audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The event ID.
    pub event_id: i64,
    /// When the event was recorded.
    pub created_at: String,
    /// The booking the event concerns, if any.
    pub booking_id: Option<i64>,
    /// Who made the change.
    pub actor_id: String,
    /// `"admin"` or `"visitor"`.
    pub actor_type: String,
    /// The request that caused the change.
    pub cause_id: String,
    /// Description of the cause.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// State before the change.
    pub before: String,
    /// State after the change.
    pub after: String,
}

/// API response for the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogResponse {
    /// Events in the order they were recorded.
    pub events: Vec<AuditEventInfo>,
}
