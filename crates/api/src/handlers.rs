// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Every mutating handler runs its whole read-validate-write cycle inside
//! one store transaction: load state, authorize, apply the core command,
//! then write the result together with its audit event. Any error rolls
//! the transaction back.

use sibon::{
    BookingCommand, BookingFilter, BookingListing, BungalowState, CalendarCommand, CalendarResult,
    CalendarState, SettingsCommand, SettingsResult, TransitionResult, apply_booking,
    apply_calendar, apply_settings, apply_submit, build_booking_listing, quote_stay,
};
use sibon_audit::{Actor, Cause};
use sibon_domain::{
    AdminKeyMode, AvailabilityDay, AvailabilityPatch, Booking, BookingEdit, BookingRequest,
    BookingStatus, BungalowNumber, CostBreakdown, Holiday, HolidayKind, MonthDay, SeasonType,
    Settings, StayRange, UserType, format_date, holidays_for_year, month_bounds, month_view,
    parse_date,
};
use sibon_persistence::{Persistence, RecordedAuditEvent, hash_admin_key, verify_admin_key};
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

use crate::auth::AuthorizationService;
use crate::config::ServiceConfig;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AdminKeyResponse, AuditEventInfo, AuditLogQuery, AuditLogResponse, AvailabilityDayInfo,
    BookingInfo, ConfiguredResponse, CreateBookingRequest, HolidayInfo, HolidaysResponse,
    ListBookingsQuery, ListBookingsResponse, ListedBookingInfo, MonthAvailabilityResponse,
    MonthDayInfo, NightChargeInfo, QuoteRequest, QuoteResponse, RemoveBookingResponse,
    RotateAdminKeyRequest, SetAdminKeyRequest, SetDateAvailabilityRequest,
    SetMaxCapacityRequest, SetSeasonRangeRequest, SetSeasonRangeResponse, SettingsResponse,
    UpdateBookingRequest, UpdateStatusRequest, VerifyAdminKeyRequest, VerifyAdminKeyResponse,
};

fn parse_request_date(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|e| ApiError::InvalidInput {
        field: String::from(field),
        message: e.to_string(),
    })
}

fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value.map(|v| parse_request_date(field, v)).transpose()
}

fn parse_season(value: &str) -> Result<SeasonType, ApiError> {
    SeasonType::from_str(value).map_err(translate_domain_error)
}

fn parse_status(value: &str) -> Result<BookingStatus, ApiError> {
    BookingStatus::from_str(value).map_err(translate_domain_error)
}

fn date_string(date: Date) -> Result<String, ApiError> {
    format_date(date).map_err(translate_domain_error)
}

fn timestamp_string(timestamp: OffsetDateTime) -> Result<String, ApiError> {
    timestamp.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn optional_timestamp_string(
    timestamp: Option<OffsetDateTime>,
) -> Result<Option<String>, ApiError> {
    timestamp.map(timestamp_string).transpose()
}

fn booking_info(booking: &Booking) -> Result<BookingInfo, ApiError> {
    let booking_id: i64 = booking.booking_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Booking has not been stored"),
    })?;

    Ok(BookingInfo {
        booking_id,
        bungalow_number: booking.bungalow_number.value().to_string(),
        user_type: booking.user_type.as_str().to_string(),
        user_name: booking.user_name.clone(),
        user_email: booking.user_email.clone(),
        notes: booking.notes.clone(),
        guests: booking.guests,
        check_in: date_string(booking.stay.check_in())?,
        check_out: date_string(booking.stay.check_out())?,
        status: booking.status.as_str().to_string(),
        created_at: timestamp_string(booking.created_at)?,
        payment_requested_at: optional_timestamp_string(booking.payment_requested_at)?,
        payment_received_at: optional_timestamp_string(booking.payment_received_at)?,
        confirmed_at: optional_timestamp_string(booking.confirmed_at)?,
        stay_completed_at: optional_timestamp_string(booking.stay_completed_at)?,
    })
}

fn availability_day_info(day: &AvailabilityDay) -> Result<AvailabilityDayInfo, ApiError> {
    Ok(AvailabilityDayInfo {
        date: date_string(day.date)?,
        available: day.available,
        blocked: day.blocked,
        boma_blocked: day.boma_blocked,
        season_type: day.season_type.map(|s| s.as_str().to_string()),
    })
}

fn month_day_info(month_day: &MonthDay) -> Result<MonthDayInfo, ApiError> {
    Ok(MonthDayInfo {
        date: date_string(month_day.day.date)?,
        available: month_day.day.available,
        blocked: month_day.day.blocked,
        boma_blocked: month_day.day.boma_blocked,
        season_type: month_day.day.season_type.map(|s| s.as_str().to_string()),
        effective_season: month_day.effective_season.as_str().to_string(),
        holiday_name: month_day.holiday_name.map(String::from),
        is_past: month_day.is_past,
        recorded: month_day.recorded,
    })
}

fn holiday_info(holiday: &Holiday) -> Result<HolidayInfo, ApiError> {
    let kind: &str = match holiday.kind {
        HolidayKind::Public => "public",
        HolidayKind::School => "school",
    };
    Ok(HolidayInfo {
        date: date_string(holiday.date)?,
        name: String::from(holiday.name),
        kind: String::from(kind),
    })
}

fn audit_event_info(recorded: RecordedAuditEvent) -> Result<AuditEventInfo, ApiError> {
    let event = recorded.event;
    Ok(AuditEventInfo {
        event_id: recorded.event_id,
        created_at: timestamp_string(recorded.created_at)?,
        booking_id: event.booking_id,
        actor_id: event.actor.id,
        actor_type: event.actor.actor_type,
        cause_id: event.cause.id,
        cause_description: event.cause.description,
        action: event.action.name,
        details: event.action.details,
        before: event.before.data,
        after: event.after.data,
    })
}

const fn settings_response(settings: &Settings) -> SettingsResponse {
    SettingsResponse {
        max_capacity: settings.max_capacity,
        admin_key_configured: settings.admin_key.is_configured(),
    }
}

/// Reports whether an admin key has been set.
///
/// # Errors
///
/// Returns an error if the settings cannot be read.
pub fn is_configured(persistence: &mut Persistence) -> Result<ConfiguredResponse, ApiError> {
    let settings: Settings = persistence.load_settings()?;
    Ok(ConfiguredResponse {
        configured: settings.admin_key.is_configured(),
    })
}

/// A new admin key that passed the policy and has been hashed.
///
/// Produced without touching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedAdminKey {
    key_hash: String,
}

/// Checks a first admin key against the policy and hashes it.
///
/// # Arguments
///
/// * `request` - The new key
/// * `config` - Service configuration (key policy and hash cost)
///
/// # Errors
///
/// Returns an error if the key does not meet the policy or cannot be hashed.
pub fn prepare_admin_key(
    request: &SetAdminKeyRequest,
    config: &ServiceConfig,
) -> Result<PreparedAdminKey, ApiError> {
    config.admin_key_policy.validate(&request.admin_key)?;
    let key_hash: String = hash_admin_key(&request.admin_key, config.admin_key_hash_cost)?;
    Ok(PreparedAdminKey { key_hash })
}

/// Checks a replacement admin key against the policy and hashes it.
///
/// The current key is not checked here; [`store_rotated_admin_key`] does
/// that against the stored hash.
///
/// # Arguments
///
/// * `request` - The current and the new key
/// * `config` - Service configuration (key policy and hash cost)
///
/// # Errors
///
/// Returns an error if the new key does not meet the policy, equals the
/// current key, or cannot be hashed.
pub fn prepare_rotated_admin_key(
    request: &RotateAdminKeyRequest,
    config: &ServiceConfig,
) -> Result<PreparedAdminKey, ApiError> {
    config
        .admin_key_policy
        .validate_rotation(&request.current_key, &request.new_key)?;
    let key_hash: String = hash_admin_key(&request.new_key, config.admin_key_hash_cost)?;
    Ok(PreparedAdminKey { key_hash })
}

/// Stores the first admin key.
///
/// This is the trust-on-first-use bootstrap: it is open to any caller but
/// succeeds only while no key exists.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `prepared` - The checked and hashed key
/// * `cause` - The cause or reason for this action
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if a key has already been set.
pub fn store_admin_key(
    persistence: &mut Persistence,
    prepared: PreparedAdminKey,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AdminKeyResponse, ApiError> {
    persistence.transaction(|tx| -> Result<(), ApiError> {
        let settings: Settings = tx.load_settings()?;
        if settings.admin_key.is_configured() {
            return Err(translate_domain_error(
                sibon_domain::DomainError::AdminKeyAlreadyConfigured,
            ));
        }

        let result: SettingsResult = apply_settings(
            &settings,
            SettingsCommand::ConfigureAdminKey {
                key_hash: prepared.key_hash,
            },
            Actor::admin(),
            cause,
        )
        .map_err(translate_core_error)?;

        tx.save_settings(&result.new_settings)?;
        tx.record_audit_event(&result.audit_event, now)?;
        Ok(())
    })?;

    info!("Admin key configured");
    Ok(AdminKeyResponse {
        message: String::from("Admin key set"),
    })
}

/// Replaces the admin key with a prepared one.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `current_key` - The key currently in use
/// * `prepared` - The checked and hashed replacement
/// * `cause` - The cause or reason for this action
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if:
/// - The current key does not match
/// - No key has been set yet
pub fn store_rotated_admin_key(
    persistence: &mut Persistence,
    current_key: &str,
    prepared: PreparedAdminKey,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AdminKeyResponse, ApiError> {
    persistence.transaction(|tx| -> Result<(), ApiError> {
        let settings: Settings = tx.load_settings()?;
        let actor: Actor = AuthorizationService::authorize_admin(
            &settings.admin_key,
            Some(current_key),
            "rotate_admin_key",
        )?;
        if !settings.admin_key.is_configured() {
            return Err(translate_domain_error(
                sibon_domain::DomainError::AdminKeyNotConfigured,
            ));
        }

        let result: SettingsResult = apply_settings(
            &settings,
            SettingsCommand::RotateAdminKey {
                key_hash: prepared.key_hash,
            },
            actor,
            cause,
        )
        .map_err(translate_core_error)?;

        tx.save_settings(&result.new_settings)?;
        tx.record_audit_event(&result.audit_event, now)?;
        Ok(())
    })?;

    info!("Admin key rotated");
    Ok(AdminKeyResponse {
        message: String::from("Admin key updated"),
    })
}

/// Sets the admin key for the first time.
///
/// Runs [`prepare_admin_key`] then [`store_admin_key`].
///
/// # Errors
///
/// Returns an error if:
/// - The key does not meet the admin key policy
/// - A key has already been set
pub fn set_admin_key(
    persistence: &mut Persistence,
    request: &SetAdminKeyRequest,
    config: &ServiceConfig,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AdminKeyResponse, ApiError> {
    let prepared: PreparedAdminKey = prepare_admin_key(request, config)?;
    store_admin_key(persistence, prepared, cause, now)
}

/// Replaces the admin key.
///
/// Runs [`prepare_rotated_admin_key`] then [`store_rotated_admin_key`].
///
/// # Errors
///
/// Returns an error if:
/// - The new key does not meet the policy or equals the current key
/// - The current key does not match
/// - No key has been set yet
pub fn rotate_admin_key(
    persistence: &mut Persistence,
    request: &RotateAdminKeyRequest,
    config: &ServiceConfig,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AdminKeyResponse, ApiError> {
    let prepared: PreparedAdminKey = prepare_rotated_admin_key(request, config)?;
    store_rotated_admin_key(persistence, &request.current_key, prepared, cause, now)
}

/// Checks a key against the configured admin key.
///
/// Always reports `false` while no key has been set.
///
/// # Errors
///
/// Returns an error if the settings cannot be read or the stored hash is
/// malformed.
pub fn verify_admin_key_request(
    persistence: &mut Persistence,
    request: &VerifyAdminKeyRequest,
) -> Result<VerifyAdminKeyResponse, ApiError> {
    let settings: Settings = persistence.load_settings()?;
    let valid: bool = match &settings.admin_key {
        AdminKeyMode::Unconfigured => false,
        AdminKeyMode::Configured { key_hash } => verify_admin_key(&request.admin_key, key_hash)?,
    };
    Ok(VerifyAdminKeyResponse { valid })
}

/// Returns the public settings.
///
/// # Errors
///
/// Returns an error if the settings cannot be read.
pub fn get_settings(persistence: &mut Persistence) -> Result<SettingsResponse, ApiError> {
    let settings: Settings = persistence.load_settings()?;
    Ok(settings_response(&settings))
}

/// Changes the default capacity of unrecorded dates.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `admin_key` - The key supplied with the request
/// * `request` - The new capacity
/// * `cause` - The cause or reason for this action
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if:
/// - The admin key is required and missing or wrong
/// - The capacity is zero
pub fn set_max_capacity(
    persistence: &mut Persistence,
    admin_key: Option<&str>,
    request: &SetMaxCapacityRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SettingsResponse, ApiError> {
    let new_settings: Settings = persistence.transaction(|tx| -> Result<Settings, ApiError> {
        let settings: Settings = tx.load_settings()?;
        let actor: Actor = AuthorizationService::authorize_admin(
            &settings.admin_key,
            admin_key,
            "set_max_capacity",
        )?;

        let result: SettingsResult = apply_settings(
            &settings,
            SettingsCommand::SetMaxCapacity {
                max_capacity: request.max_capacity,
            },
            actor,
            cause,
        )
        .map_err(translate_core_error)?;

        tx.save_settings(&result.new_settings)?;
        tx.record_audit_event(&result.audit_event, now)?;
        Ok(result.new_settings)
    })?;

    info!(max_capacity = new_settings.max_capacity, "Max capacity changed");
    Ok(settings_response(&new_settings))
}

/// Returns the availability of every date in a month.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `year` - The year
/// * `month` - The month number (1-12)
/// * `config` - Service configuration (lodge time zone)
/// * `now` - The current time, used to flag past dates
///
/// # Errors
///
/// Returns an error if the month is invalid or the records cannot be read.
pub fn get_month_availability(
    persistence: &mut Persistence,
    year: i32,
    month: u8,
    config: &ServiceConfig,
    now: OffsetDateTime,
) -> Result<MonthAvailabilityResponse, ApiError> {
    let (first, last): (Date, Date) = month_bounds(year, month).map_err(translate_domain_error)?;
    let recorded: Vec<AvailabilityDay> = persistence.availability_in_range(first, last)?;
    let settings: Settings = persistence.load_settings()?;
    let today: Date = config
        .timezone
        .local_date(now)
        .map_err(translate_domain_error)?;

    let days: Vec<MonthDay> = month_view(year, month, &recorded, settings.max_capacity, today)
        .map_err(translate_domain_error)?;

    debug!(year, month, recorded = recorded.len(), "Built month view");

    Ok(MonthAvailabilityResponse {
        year,
        month,
        days: days
            .iter()
            .map(month_day_info)
            .collect::<Result<Vec<MonthDayInfo>, ApiError>>()?,
    })
}

/// Changes the availability of one date.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `admin_key` - The key supplied with the request
/// * `request` - The date and the fields to change
/// * `cause` - The cause or reason for this action
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if:
/// - The admin key is required and missing or wrong
/// - The date or season is malformed
pub fn set_date_availability(
    persistence: &mut Persistence,
    admin_key: Option<&str>,
    request: &SetDateAvailabilityRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AvailabilityDayInfo, ApiError> {
    let date: Date = parse_request_date("date", &request.date)?;
    let patch: AvailabilityPatch = AvailabilityPatch {
        available: request.available,
        blocked: request.blocked,
        boma_blocked: request.boma_blocked,
        season_type: request.season_type.as_deref().map(parse_season).transpose()?,
    };

    let updated: AvailabilityDay =
        persistence.transaction(|tx| -> Result<AvailabilityDay, ApiError> {
            let settings: Settings = tx.load_settings()?;
            let actor: Actor = AuthorizationService::authorize_admin(
                &settings.admin_key,
                admin_key,
                "set_date_availability",
            )?;

            let state: CalendarState =
                CalendarState::new(tx.availability_in_range(date, date)?, settings.max_capacity);
            let result: CalendarResult = apply_calendar(
                &state,
                CalendarCommand::SetDateAvailability { date, patch },
                actor,
                cause,
            )
            .map_err(translate_core_error)?;

            tx.upsert_availability_days(&result.updated_days)?;
            tx.record_audit_event(&result.audit_event, now)?;

            result
                .updated_days
                .into_iter()
                .next()
                .ok_or_else(|| ApiError::Internal {
                    message: String::from("Availability update produced no record"),
                })
        })?;

    info!(
        date = %date,
        available = updated.available,
        blocked = updated.blocked,
        boma_blocked = updated.boma_blocked,
        "Date availability changed"
    );
    availability_day_info(&updated)
}

/// Overrides the season of every date in a range.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `admin_key` - The key supplied with the request
/// * `request` - The range and the season to apply
/// * `cause` - The cause or reason for this action
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if:
/// - The admin key is required and missing or wrong
/// - A date or the season is malformed
/// - The range starts after it ends
pub fn set_season_for_range(
    persistence: &mut Persistence,
    admin_key: Option<&str>,
    request: &SetSeasonRangeRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SetSeasonRangeResponse, ApiError> {
    let start: Date = parse_request_date("start", &request.start)?;
    let end: Date = parse_request_date("end", &request.end)?;
    let season_type: SeasonType = parse_season(&request.season_type)?;

    let dates_updated: usize = persistence.transaction(|tx| -> Result<usize, ApiError> {
        let settings: Settings = tx.load_settings()?;
        let actor: Actor = AuthorizationService::authorize_admin(
            &settings.admin_key,
            admin_key,
            "set_season_for_range",
        )?;

        let state: CalendarState =
            CalendarState::new(tx.availability_in_range(start, end)?, settings.max_capacity);
        let result: CalendarResult = apply_calendar(
            &state,
            CalendarCommand::SetSeasonForRange {
                start,
                end,
                season_type,
            },
            actor,
            cause,
        )
        .map_err(translate_core_error)?;

        let written: usize = tx.upsert_availability_days(&result.updated_days)?;
        tx.record_audit_event(&result.audit_event, now)?;
        Ok(written)
    })?;

    info!(
        start = %start,
        end = %end,
        season = %season_type,
        dates_updated,
        "Season override applied"
    );
    Ok(SetSeasonRangeResponse { dates_updated })
}

/// Lists bookings, newest first, with their night count and cost.
///
/// # Errors
///
/// Returns an error if the status filter is malformed or the bookings
/// cannot be read.
pub fn list_bookings(
    persistence: &mut Persistence,
    query: &ListBookingsQuery,
    config: &ServiceConfig,
) -> Result<ListBookingsResponse, ApiError> {
    let filter: BookingFilter = BookingFilter {
        search: query.search.clone(),
        status: query.status.as_deref().map(parse_status).transpose()?,
    };

    let bookings: Vec<Booking> = persistence.list_bookings()?;
    let first_night: Option<Date> = bookings.iter().map(|b| b.stay.check_in()).min();
    let last_day: Option<Date> = bookings.iter().map(|b| b.stay.check_out()).max();
    let recorded: Vec<AvailabilityDay> = match (first_night, last_day) {
        (Some(start), Some(end)) => persistence.availability_in_range(start, end)?,
        _ => Vec::new(),
    };

    let listing: BookingListing =
        build_booking_listing(bookings, &filter, &recorded, &config.rates)
            .map_err(translate_core_error)?;

    Ok(ListBookingsResponse {
        bookings: listing
            .bookings
            .iter()
            .map(|listed| -> Result<ListedBookingInfo, ApiError> {
                Ok(ListedBookingInfo {
                    booking: booking_info(&listed.booking)?,
                    nights: listed.nights,
                    accommodation_cost: listed.accommodation_cost,
                })
            })
            .collect::<Result<Vec<ListedBookingInfo>, ApiError>>()?,
        pending_count: listing.pending_count,
        approved_count: listing.approved_count,
    })
}

/// Submits a new booking request.
///
/// The cooldown and single-active-booking rules are checked and the
/// booking inserted in the same transaction.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The booking request
/// * `cause` - The cause or reason for this action
/// * `now` - The submission time
///
/// # Errors
///
/// Returns an error if:
/// - A field is malformed
/// - The bungalow completed a stay less than a year ago
/// - The bungalow already has an active booking
pub fn create_booking(
    persistence: &mut Persistence,
    request: &CreateBookingRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    let bungalow_number: BungalowNumber =
        BungalowNumber::new(&request.bungalow_number).map_err(translate_domain_error)?;
    let user_type: UserType =
        UserType::from_str(&request.user_type).map_err(translate_domain_error)?;
    let stay: StayRange = StayRange::new(
        parse_request_date("check_in", &request.check_in)?,
        parse_request_date("check_out", &request.check_out)?,
    )
    .map_err(translate_domain_error)?;
    let booking_request: BookingRequest = BookingRequest::new(
        bungalow_number.clone(),
        user_type,
        stay,
        request.user_name.as_deref(),
        request.user_email.as_deref(),
        request.notes.as_deref(),
        request.guests,
    )
    .map_err(translate_domain_error)?;

    let actor: Actor = Actor::visitor(bungalow_number.value());

    let stored: Booking = persistence.transaction(|tx| -> Result<Booking, ApiError> {
        let history: Vec<Booking> = tx.bookings_for_bungalow(&bungalow_number)?;
        let state: BungalowState = BungalowState::new(bungalow_number.clone(), history);

        let result: TransitionResult =
            apply_submit(&state, booking_request, now, actor, cause).map_err(translate_core_error)?;
        let new_booking: Booking = result.new_booking.ok_or_else(|| ApiError::Internal {
            message: String::from("Submission produced no booking"),
        })?;

        let stored: Booking = tx.insert_booking(&new_booking)?;
        let booking_id: i64 = stored.booking_id.ok_or_else(|| ApiError::Internal {
            message: String::from("Inserted booking has no id"),
        })?;
        tx.record_audit_event(&result.audit_event.for_booking(booking_id), now)?;
        Ok(stored)
    })?;

    info!(
        booking_id = ?stored.booking_id,
        bungalow_number = stored.bungalow_number.value(),
        check_in = %stored.stay.check_in(),
        check_out = %stored.stay.check_out(),
        "Booking submitted"
    );
    booking_info(&stored)
}

/// Applies an admin command to a stored booking and writes the result.
///
/// Returns the booking after the command, or `None` when it was removed.
fn run_booking_command(
    persistence: &mut Persistence,
    admin_key: Option<&str>,
    booking_id: i64,
    command: BookingCommand,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<Option<Booking>, ApiError> {
    let action: &'static str = command.action_name();

    let updated: Option<Booking> =
        persistence.transaction(|tx| -> Result<Option<Booking>, ApiError> {
            let settings: Settings = tx.load_settings()?;
            let actor: Actor =
                AuthorizationService::authorize_admin(&settings.admin_key, admin_key, action)?;

            let booking: Booking = tx.get_booking(booking_id)?;
            let result: TransitionResult =
                apply_booking(&booking, command, now, actor, cause).map_err(translate_core_error)?;

            match &result.new_booking {
                Some(updated) => tx.update_booking(updated)?,
                None => tx.delete_booking(booking_id)?,
            }
            tx.record_audit_event(&result.audit_event, now)?;
            Ok(result.new_booking)
        })?;

    info!(booking_id, action, "Booking command applied");
    Ok(updated)
}

fn require_booking(booking: Option<Booking>) -> Result<BookingInfo, ApiError> {
    let booking: Booking = booking.ok_or_else(|| ApiError::Internal {
        message: String::from("Booking command removed the booking"),
    })?;
    booking_info(&booking)
}

/// Edits the dates or guest details of a booking.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `admin_key` - The key supplied with the request
/// * `booking_id` - The booking to edit
/// * `request` - The fields to change
/// * `cause` - The cause or reason for this action
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if:
/// - The admin key is required and missing or wrong
/// - No field is supplied or a field is malformed
/// - The booking does not exist
/// - The edited dates do not form a valid stay
pub fn update_booking(
    persistence: &mut Persistence,
    admin_key: Option<&str>,
    booking_id: i64,
    request: &UpdateBookingRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    let edit: BookingEdit = BookingEdit {
        check_in: parse_optional_date("check_in", request.check_in.as_deref())?,
        check_out: parse_optional_date("check_out", request.check_out.as_deref())?,
        user_name: request.user_name.clone(),
        user_email: request.user_email.clone(),
        notes: request.notes.clone(),
        guests: request.guests,
    };
    if edit.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("booking"),
            message: String::from("No changes supplied"),
        });
    }

    let updated: Option<Booking> = run_booking_command(
        persistence,
        admin_key,
        booking_id,
        BookingCommand::EditBooking { edit },
        cause,
        now,
    )?;
    require_booking(updated)
}

/// Moves a booking to the next status of its workflow.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `admin_key` - The key supplied with the request
/// * `booking_id` - The booking to move
/// * `request` - The target status
/// * `cause` - The cause or reason for this action
/// * `now` - The time the transition is stamped with
///
/// # Errors
///
/// Returns an error if:
/// - The admin key is required and missing or wrong
/// - The status is malformed
/// - The booking does not exist
/// - The target is not the next status in the workflow
pub fn update_status(
    persistence: &mut Persistence,
    admin_key: Option<&str>,
    booking_id: i64,
    request: &UpdateStatusRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    let new_status: BookingStatus = parse_status(&request.status)?;

    let updated: Option<Booking> = run_booking_command(
        persistence,
        admin_key,
        booking_id,
        BookingCommand::TransitionStatus { new_status },
        cause,
        now,
    )?;
    require_booking(updated)
}

/// Marks the stay of a confirmed booking as completed.
///
/// # Errors
///
/// Returns an error if:
/// - The admin key is required and missing or wrong
/// - The booking does not exist
/// - The booking is not confirmed or was already completed
pub fn complete_stay(
    persistence: &mut Persistence,
    admin_key: Option<&str>,
    booking_id: i64,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingInfo, ApiError> {
    let updated: Option<Booking> = run_booking_command(
        persistence,
        admin_key,
        booking_id,
        BookingCommand::CompleteStay,
        cause,
        now,
    )?;
    require_booking(updated)
}

/// Deletes a booking.
///
/// # Errors
///
/// Returns an error if:
/// - The admin key is required and missing or wrong
/// - The booking does not exist
pub fn remove_booking(
    persistence: &mut Persistence,
    admin_key: Option<&str>,
    booking_id: i64,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<RemoveBookingResponse, ApiError> {
    run_booking_command(
        persistence,
        admin_key,
        booking_id,
        BookingCommand::RemoveBooking,
        cause,
        now,
    )?;

    Ok(RemoveBookingResponse {
        booking_id,
        message: format!("Booking {booking_id} removed"),
    })
}

/// Prices a stay using the stored season overrides.
///
/// # Errors
///
/// Returns an error if:
/// - A date is malformed or the stay is empty
/// - A boma date is not a night of the stay
/// - The boma is blocked on a selected date
pub fn quote(
    persistence: &mut Persistence,
    request: &QuoteRequest,
    config: &ServiceConfig,
) -> Result<QuoteResponse, ApiError> {
    let stay: StayRange = StayRange::new(
        parse_request_date("check_in", &request.check_in)?,
        parse_request_date("check_out", &request.check_out)?,
    )
    .map_err(translate_domain_error)?;
    let boma_dates: Vec<Date> = request
        .boma_dates
        .iter()
        .map(|value| parse_request_date("boma_dates", value))
        .collect::<Result<Vec<Date>, ApiError>>()?;

    let recorded: Vec<AvailabilityDay> =
        persistence.availability_in_range(stay.check_in(), stay.check_out())?;
    let breakdown: CostBreakdown = quote_stay(&stay, &boma_dates, &recorded, &config.rates)
        .map_err(translate_core_error)?;

    Ok(QuoteResponse {
        check_in: request.check_in.clone(),
        check_out: request.check_out.clone(),
        nights: breakdown
            .nights
            .iter()
            .map(|night| -> Result<NightChargeInfo, ApiError> {
                Ok(NightChargeInfo {
                    date: date_string(night.date)?,
                    season: night.season.as_str().to_string(),
                    rate: night.rate,
                })
            })
            .collect::<Result<Vec<NightChargeInfo>, ApiError>>()?,
        accommodation: breakdown.accommodation,
        boma_days: breakdown
            .boma_days
            .iter()
            .map(|date| date_string(*date))
            .collect::<Result<Vec<String>, ApiError>>()?,
        boma: breakdown.boma,
        total: breakdown.total,
    })
}

/// Lists the public and school holidays of a year.
///
/// # Errors
///
/// Returns an error if the year is outside the supported calendar range.
pub fn get_holidays(year: i32) -> Result<HolidaysResponse, ApiError> {
    let holidays: Vec<Holiday> = holidays_for_year(year).map_err(translate_domain_error)?;
    Ok(HolidaysResponse {
        year,
        holidays: holidays
            .iter()
            .map(holiday_info)
            .collect::<Result<Vec<HolidayInfo>, ApiError>>()?,
    })
}

/// Returns the audit trail, optionally for one booking.
///
/// # Errors
///
/// Returns an error if the admin key is required and missing or wrong, or
/// the events cannot be read.
pub fn get_audit_log(
    persistence: &mut Persistence,
    admin_key: Option<&str>,
    query: &AuditLogQuery,
) -> Result<AuditLogResponse, ApiError> {
    let settings: Settings = persistence.load_settings()?;
    AuthorizationService::authorize_admin(&settings.admin_key, admin_key, "get_audit_log")?;

    let events: Vec<RecordedAuditEvent> = persistence.audit_events(query.booking_id)?;
    Ok(AuditLogResponse {
        events: events
            .into_iter()
            .map(audit_event_info)
            .collect::<Result<Vec<AuditEventInfo>, ApiError>>()?,
    })
}
