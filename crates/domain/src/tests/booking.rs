// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Booking, BookingEdit, BookingRequest, BookingStatus, BungalowNumber, DomainError, StayRange,
    UserType,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};

fn create_test_booking() -> Booking {
    let request: BookingRequest = BookingRequest::new(
        BungalowNumber::new("B12").unwrap(),
        UserType::Registered,
        StayRange::new(date!(2025 - 12 - 24), date!(2025 - 12 - 27)).unwrap(),
        Some("Jane Dlamini"),
        Some("Jane@Example.com"),
        Some("  "),
        Some(4),
    )
    .unwrap();
    Booking::from_request(request, datetime!(2025-11-01 08:00 UTC))
}

#[test]
fn test_new_booking_is_pending() {
    let booking: Booking = create_test_booking();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.booking_id, None);
    assert_eq!(booking.created_at, datetime!(2025-11-01 08:00 UTC));
    assert_eq!(booking.notes, None);
    assert!(booking.is_active());
}

#[test]
fn test_zero_guests_is_rejected() {
    let result = BookingRequest::new(
        BungalowNumber::new("B12").unwrap(),
        UserType::Owner,
        StayRange::new(date!(2025 - 12 - 24), date!(2025 - 12 - 27)).unwrap(),
        None,
        None,
        None,
        Some(0),
    );
    assert_eq!(result, Err(DomainError::InvalidGuestCount(0)));
}

#[test]
fn test_each_transition_stamps_its_timestamp_once() {
    let requested_at: OffsetDateTime = datetime!(2025-11-02 10:00 UTC);
    let received_at: OffsetDateTime = datetime!(2025-11-05 10:00 UTC);
    let confirmed_at: OffsetDateTime = datetime!(2025-11-06 10:00 UTC);

    let approved: Booking = create_test_booking()
        .with_status(BookingStatus::Approved, datetime!(2025-11-01 12:00 UTC))
        .unwrap();
    assert_eq!(approved.payment_requested_at, None);

    let requested: Booking = approved
        .with_status(BookingStatus::PaymentRequested, requested_at)
        .unwrap();
    let received: Booking = requested
        .with_status(BookingStatus::PaymentReceived, received_at)
        .unwrap();
    let confirmed: Booking = received
        .with_status(BookingStatus::Confirmed, confirmed_at)
        .unwrap();

    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(confirmed.payment_requested_at, Some(requested_at));
    assert_eq!(confirmed.payment_received_at, Some(received_at));
    assert_eq!(confirmed.confirmed_at, Some(confirmed_at));
}

#[test]
fn test_illegal_transition_leaves_booking_untouched() {
    let booking: Booking = create_test_booking();
    let result = booking.with_status(BookingStatus::Confirmed, datetime!(2025-11-02 10:00 UTC));
    assert!(matches!(
        result,
        Err(DomainError::InvalidStatusTransition { .. })
    ));
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.confirmed_at, None);
}

#[test]
fn test_complete_stay_requires_confirmed_booking() {
    let booking: Booking = create_test_booking();
    assert_eq!(
        booking.with_stay_completed(datetime!(2025-12-28 09:00 UTC)),
        Err(DomainError::StayNotConfirmed {
            status: String::from("pending"),
        })
    );
}

#[test]
fn test_complete_stay_twice_is_rejected() {
    let mut booking: Booking = create_test_booking();
    booking.status = BookingStatus::Confirmed;

    let completed: Booking = booking
        .with_stay_completed(datetime!(2025-12-28 09:00 UTC))
        .unwrap();
    assert_eq!(completed.status, BookingStatus::Confirmed);
    assert_eq!(
        completed.stay_completed_at,
        Some(datetime!(2025-12-28 09:00 UTC))
    );
    assert!(!completed.is_active());

    assert_eq!(
        completed.with_stay_completed(datetime!(2025-12-29 09:00 UTC)),
        Err(DomainError::StayAlreadyCompleted)
    );
}

#[test]
fn test_edit_changes_dates_without_touching_status() {
    let booking: Booking = create_test_booking();
    let edit: BookingEdit = BookingEdit {
        check_out: Some(date!(2025 - 12 - 29)),
        notes: Some(String::from("Late arrival")),
        ..BookingEdit::default()
    };

    let edited: Booking = booking.with_edit(&edit).unwrap();
    assert_eq!(edited.stay.check_in(), date!(2025 - 12 - 24));
    assert_eq!(edited.stay.check_out(), date!(2025 - 12 - 29));
    assert_eq!(edited.notes, Some(String::from("Late arrival")));
    assert_eq!(edited.user_name, booking.user_name);
    assert_eq!(edited.status, BookingStatus::Pending);
}

#[test]
fn test_edit_rejects_inverted_stay() {
    let booking: Booking = create_test_booking();
    let edit: BookingEdit = BookingEdit {
        check_in: Some(date!(2025 - 12 - 30)),
        ..BookingEdit::default()
    };
    assert!(matches!(
        booking.with_edit(&edit),
        Err(DomainError::InvalidStayRange { .. })
    ));
}

#[test]
fn test_search_matches_name_or_email_ignoring_case() {
    let booking: Booking = create_test_booking();
    assert!(booking.matches_search("dlamini"));
    assert!(booking.matches_search("example.COM"));
    assert!(booking.matches_search(""));
    assert!(!booking.matches_search("smith"));
}
