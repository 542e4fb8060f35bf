// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    NOW, create_stored_booking, create_test_cause, create_test_request,
};
use crate::{BungalowState, CoreError, TransitionResult, apply_submit};
use sibon_audit::Actor;
use sibon_domain::{Booking, BookingStatus, BungalowNumber, DomainError};
use time::Duration;
use time::macros::date;

fn bungalow_state(bookings: Vec<Booking>) -> BungalowState {
    BungalowState::new(BungalowNumber::new("B12").unwrap(), bookings)
}

fn completed_days_ago(days: i64) -> Booking {
    let mut booking: Booking = create_stored_booking(1, BookingStatus::Confirmed);
    booking.stay_completed_at = Some(NOW - Duration::days(days));
    booking
}

#[test]
fn test_first_request_creates_pending_booking() {
    let state: BungalowState = bungalow_state(Vec::new());
    let request = create_test_request("B12", date!(2026 - 12 - 24), date!(2026 - 12 - 27));

    let result: TransitionResult = apply_submit(
        &state,
        request,
        NOW,
        Actor::visitor("B12"),
        create_test_cause(),
    )
    .unwrap();

    let booking: Booking = result.new_booking.unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.created_at, NOW);
    assert_eq!(booking.booking_id, None);
    assert_eq!(booking.guests, Some(2));
}

#[test]
fn test_submit_emits_audit_event() {
    let state: BungalowState = bungalow_state(Vec::new());
    let request = create_test_request("B12", date!(2026 - 12 - 24), date!(2026 - 12 - 27));

    let result: TransitionResult = apply_submit(
        &state,
        request,
        NOW,
        Actor::visitor("B12"),
        create_test_cause(),
    )
    .unwrap();

    let event = result.audit_event;
    assert_eq!(event.action.name, "SubmitBooking");
    assert_eq!(event.actor.id, "bungalow:B12");
    assert_eq!(event.booking_id, None);
    assert!(event.before.data.contains("bookings_count=0"));
    assert!(event.after.data.contains("bookings_count=1"));
    assert!(event.action.details.unwrap().contains("3 nights"));
}

#[test]
fn test_second_request_while_pending_is_rejected() {
    let state: BungalowState =
        bungalow_state(vec![create_stored_booking(1, BookingStatus::Pending)]);
    let request = create_test_request("B12", date!(2027 - 03 - 01), date!(2027 - 03 - 03));

    let result: Result<TransitionResult, CoreError> = apply_submit(
        &state,
        request,
        NOW,
        Actor::visitor("B12"),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ActiveBookingExists {
            bungalow_number: String::from("B12"),
        }))
    );
}

#[test]
fn test_request_inside_cooldown_reports_days_remaining() {
    let state: BungalowState = bungalow_state(vec![completed_days_ago(100)]);
    let request = create_test_request("B12", date!(2027 - 03 - 01), date!(2027 - 03 - 03));

    let err: CoreError = apply_submit(
        &state,
        request,
        NOW,
        Actor::visitor("B12"),
        create_test_cause(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::CooldownActive {
            days_elapsed: 100,
            days_remaining: 265,
        })
    );
    assert!(err.to_string().contains("Please wait 265 more days."));
}

#[test]
fn test_request_after_cooldown_succeeds() {
    let state: BungalowState = bungalow_state(vec![completed_days_ago(366)]);
    let request = create_test_request("B12", date!(2027 - 03 - 01), date!(2027 - 03 - 03));

    let result: Result<TransitionResult, CoreError> = apply_submit(
        &state,
        request,
        NOW,
        Actor::visitor("B12"),
        create_test_cause(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_rejected_booking_allows_new_request() {
    let state: BungalowState =
        bungalow_state(vec![create_stored_booking(1, BookingStatus::Rejected)]);
    let request = create_test_request("B12", date!(2027 - 03 - 01), date!(2027 - 03 - 03));

    assert!(
        apply_submit(
            &state,
            request,
            NOW,
            Actor::visitor("B12"),
            create_test_cause(),
        )
        .is_ok()
    );
}

#[test]
fn test_request_for_other_bungalow_is_internal_error() {
    let state: BungalowState = bungalow_state(Vec::new());
    let request = create_test_request("C7", date!(2027 - 03 - 01), date!(2027 - 03 - 03));

    let result: Result<TransitionResult, CoreError> = apply_submit(
        &state,
        request,
        NOW,
        Actor::visitor("C7"),
        create_test_cause(),
    );

    assert!(matches!(result, Err(CoreError::Internal(_))));
}
