// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{BookingCommand, CalendarCommand, SettingsCommand};
use crate::error::CoreError;
use crate::state::{
    BungalowState, CalendarResult, CalendarState, SettingsResult, TransitionResult,
};
use sibon_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use sibon_domain::{
    AdminKeyMode, AvailabilityDay, Booking, BookingRequest, DomainError, Settings,
    apply_availability_patch, apply_season_range, check_booking_eligibility,
    validate_max_capacity,
};
use time::OffsetDateTime;

fn booking_snapshot(booking: &Booking) -> StateSnapshot {
    StateSnapshot::new(booking.summary())
}

fn day_snapshot(day: &AvailabilityDay) -> StateSnapshot {
    let season: &str = day.season_type.map_or("computed", |s| s.as_str());
    StateSnapshot::new(format!(
        "date={},available={},blocked={},boma_blocked={},season={season}",
        day.date, day.available, day.blocked, day.boma_blocked
    ))
}

fn settings_snapshot(settings: &Settings) -> StateSnapshot {
    let admin_key: &str = if settings.admin_key.is_configured() {
        "configured"
    } else {
        "unconfigured"
    };
    StateSnapshot::new(format!(
        "admin_key={admin_key},max_capacity={}",
        settings.max_capacity
    ))
}

/// Validates a visitor's booking request and produces the pending booking.
///
/// The cooldown and single-active-booking rules are checked against every
/// stored booking of the requesting bungalow.
///
/// # Arguments
///
/// * `state` - The bungalow's stored bookings (immutable)
/// * `request` - The visitor's request
/// * `now` - The submission time
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The request belongs to a different bungalow than `state`
/// - The bungalow completed a stay less than a year ago
/// - The bungalow already has an active booking
pub fn apply_submit(
    state: &BungalowState,
    request: BookingRequest,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    if request.bungalow_number != state.bungalow_number {
        return Err(CoreError::Internal(format!(
            "request for bungalow {} validated against bungalow {}",
            request.bungalow_number, state.bungalow_number
        )));
    }

    check_booking_eligibility(&state.bookings, now)?;

    let booking: Booking = Booking::from_request(request, now);

    let mut after_state: BungalowState = state.clone();
    after_state.bookings.push(booking.clone());

    let action: Action = Action::new(
        String::from("SubmitBooking"),
        Some(format!(
            "Requested {} to {} ({} nights) for bungalow {}",
            booking.stay.check_in(),
            booking.stay.check_out(),
            booking.stay.night_count(),
            booking.bungalow_number
        )),
    );

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        state.to_snapshot(),
        after_state.to_snapshot(),
    );

    Ok(TransitionResult {
        new_booking: Some(booking),
        audit_event,
    })
}

/// Applies an admin command to a stored booking, producing the new booking
/// and an audit event.
///
/// # Arguments
///
/// * `booking` - The current booking (immutable)
/// * `command` - The command to apply
/// * `now` - The time the command is applied
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The booking has not been stored yet
/// - The command violates a booking lifecycle rule
pub fn apply_booking(
    booking: &Booking,
    command: BookingCommand,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let booking_id: i64 = booking.booking_id.ok_or_else(|| {
        CoreError::Internal(String::from("booking commands require a stored booking"))
    })?;
    let action_name: &str = command.action_name();

    let (new_booking, details): (Option<Booking>, String) = match command {
        BookingCommand::EditBooking { edit } => {
            let edited: Booking = booking.with_edit(&edit)?;
            let details: String = format!(
                "Edited booking {booking_id}: {} to {}",
                edited.stay.check_in(),
                edited.stay.check_out()
            );
            (Some(edited), details)
        }
        BookingCommand::TransitionStatus { new_status } => {
            let moved: Booking = booking.with_status(new_status, now)?;
            let details: String = format!(
                "Moved booking {booking_id} from {} to {new_status}",
                booking.status
            );
            (Some(moved), details)
        }
        BookingCommand::CompleteStay => {
            let completed: Booking = booking.with_stay_completed(now)?;
            (
                Some(completed),
                format!("Completed stay for booking {booking_id}"),
            )
        }
        BookingCommand::RemoveBooking => (None, format!("Removed booking {booking_id}")),
    };

    let after: StateSnapshot = new_booking
        .as_ref()
        .map_or_else(StateSnapshot::absent, booking_snapshot);

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(String::from(action_name), Some(details)),
        booking_snapshot(booking),
        after,
    )
    .for_booking(booking_id);

    Ok(TransitionResult {
        new_booking,
        audit_event,
    })
}

/// Applies a calendar command, producing every record to write and an
/// audit event.
///
/// # Arguments
///
/// * `state` - The stored records in the affected range (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if a season range starts after it ends.
pub fn apply_calendar(
    state: &CalendarState,
    command: CalendarCommand,
    actor: Actor,
    cause: Cause,
) -> Result<CalendarResult, CoreError> {
    match command {
        CalendarCommand::SetDateAvailability { date, patch } => {
            let existing: Option<&AvailabilityDay> = state.days.get(&date);
            let updated: AvailabilityDay =
                apply_availability_patch(existing, date, &patch, state.max_capacity);

            let before: StateSnapshot = existing.map_or_else(StateSnapshot::absent, day_snapshot);
            let action: Action = Action::new(
                String::from("SetDateAvailability"),
                Some(format!("Updated availability for {date}")),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, day_snapshot(&updated));

            Ok(CalendarResult {
                updated_days: vec![updated],
                audit_event,
            })
        }
        CalendarCommand::SetSeasonForRange {
            start,
            end,
            season_type,
        } => {
            let updated_days: Vec<AvailabilityDay> =
                apply_season_range(&state.days, start, end, season_type, state.max_capacity)?;

            let overridden_before: usize = state
                .days
                .range(start..=end)
                .filter(|(_, day)| day.season_type.is_some())
                .count();
            let before: StateSnapshot = StateSnapshot::new(format!(
                "range={start}..={end},recorded={},overridden={overridden_before}",
                state.days.range(start..=end).count()
            ));
            let after: StateSnapshot = StateSnapshot::new(format!(
                "range={start}..={end},recorded={},overridden={},season={season_type}",
                updated_days.len(),
                updated_days.len()
            ));
            let action: Action = Action::new(
                String::from("SetSeasonForRange"),
                Some(format!(
                    "Set {} dates from {start} to {end} to {season_type}",
                    updated_days.len()
                )),
            );

            Ok(CalendarResult {
                updated_days,
                audit_event: AuditEvent::new(actor, cause, action, before, after),
            })
        }
    }
}

/// Applies a settings command, producing the new settings and an audit event.
///
/// # Arguments
///
/// * `settings` - The current settings (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - A first-time key is configured when one already exists
/// - A key is rotated before one was configured
/// - The maximum capacity is zero
pub fn apply_settings(
    settings: &Settings,
    command: SettingsCommand,
    actor: Actor,
    cause: Cause,
) -> Result<SettingsResult, CoreError> {
    let mut new_settings: Settings = settings.clone();

    let action: Action = match command {
        SettingsCommand::ConfigureAdminKey { key_hash } => {
            if settings.admin_key.is_configured() {
                return Err(CoreError::DomainViolation(
                    DomainError::AdminKeyAlreadyConfigured,
                ));
            }
            new_settings.admin_key = AdminKeyMode::Configured { key_hash };
            Action::new(
                String::from("ConfigureAdminKey"),
                Some(String::from("Admin key set for the first time")),
            )
        }
        SettingsCommand::RotateAdminKey { key_hash } => {
            if !settings.admin_key.is_configured() {
                return Err(CoreError::DomainViolation(
                    DomainError::AdminKeyNotConfigured,
                ));
            }
            new_settings.admin_key = AdminKeyMode::Configured { key_hash };
            Action::new(
                String::from("RotateAdminKey"),
                Some(String::from("Admin key replaced")),
            )
        }
        SettingsCommand::SetMaxCapacity { max_capacity } => {
            validate_max_capacity(max_capacity)?;
            new_settings.max_capacity = max_capacity;
            Action::new(
                String::from("SetMaxCapacity"),
                Some(format!(
                    "Changed maximum capacity from {} to {max_capacity}",
                    settings.max_capacity
                )),
            )
        }
    };

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        settings_snapshot(settings),
        settings_snapshot(&new_settings),
    );

    Ok(SettingsResult {
        new_settings,
        audit_event,
    })
}
