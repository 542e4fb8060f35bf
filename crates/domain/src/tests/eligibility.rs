// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Booking, BookingRequest, BookingStatus, BungalowNumber, Cooldown, DomainError, StayRange,
    UserType, check_booking_eligibility, cooldown_for,
};
use time::macros::{date, datetime};
use time::{Duration, OffsetDateTime};

const NOW: OffsetDateTime = datetime!(2026-10-16 09:00 UTC);

fn booking_with_status(status: BookingStatus) -> Booking {
    let request: BookingRequest = BookingRequest::new(
        BungalowNumber::new("B12").unwrap(),
        UserType::Owner,
        StayRange::new(date!(2025 - 06 - 01), date!(2025 - 06 - 04)).unwrap(),
        Some("Jane"),
        None,
        None,
        None,
    )
    .unwrap();
    let mut booking: Booking = Booking::from_request(request, NOW - Duration::days(500));
    booking.booking_id = Some(1);
    booking.status = status;
    booking
}

fn completed_days_ago(days: i64) -> Booking {
    let mut booking: Booking = booking_with_status(BookingStatus::Confirmed);
    booking.stay_completed_at = Some(NOW - Duration::days(days));
    booking
}

#[test]
fn test_cooldown_reports_elapsed_and_remaining_days() {
    let result = check_booking_eligibility(&[completed_days_ago(100)], NOW);
    assert_eq!(
        result,
        Err(DomainError::CooldownActive {
            days_elapsed: 100,
            days_remaining: 265,
        })
    );
}

#[test]
fn test_cooldown_ends_after_a_year() {
    assert!(check_booking_eligibility(&[completed_days_ago(366)], NOW).is_ok());
    assert!(check_booking_eligibility(&[completed_days_ago(365)], NOW).is_ok());
}

#[test]
fn test_partial_days_round_elapsed_down_and_remaining_up() {
    let completed_at: OffsetDateTime = NOW - Duration::days(100) - Duration::hours(12);
    assert_eq!(
        cooldown_for(completed_at, NOW).unwrap(),
        Some(Cooldown {
            days_elapsed: 100,
            days_remaining: 265,
        })
    );
}

#[test]
fn test_most_recent_completed_stay_is_used() {
    let bookings = [completed_days_ago(400), completed_days_ago(30)];
    assert_eq!(
        check_booking_eligibility(&bookings, NOW),
        Err(DomainError::CooldownActive {
            days_elapsed: 30,
            days_remaining: 335,
        })
    );
}

#[test]
fn test_cooldown_is_checked_before_active_booking() {
    let bookings = [
        completed_days_ago(10),
        booking_with_status(BookingStatus::Pending),
    ];
    assert!(matches!(
        check_booking_eligibility(&bookings, NOW),
        Err(DomainError::CooldownActive { .. })
    ));
}

#[test]
fn test_each_active_status_blocks_a_new_request() {
    for status in [
        BookingStatus::Pending,
        BookingStatus::Approved,
        BookingStatus::PaymentRequested,
        BookingStatus::PaymentReceived,
        BookingStatus::Confirmed,
    ] {
        let result = check_booking_eligibility(&[booking_with_status(status)], NOW);
        assert_eq!(
            result,
            Err(DomainError::ActiveBookingExists {
                bungalow_number: String::from("B12"),
            }),
            "{status} should block a new request"
        );
    }
}

#[test]
fn test_rejected_booking_does_not_block() {
    let bookings = [booking_with_status(BookingStatus::Rejected)];
    assert!(check_booking_eligibility(&bookings, NOW).is_ok());
}

#[test]
fn test_no_history_is_eligible() {
    assert!(check_booking_eligibility(&[], NOW).is_ok());
}

#[test]
fn test_completion_in_the_future_counts_as_just_completed() {
    let result = check_booking_eligibility(&[completed_days_ago(-1)], NOW);
    assert_eq!(
        result,
        Err(DomainError::CooldownActive {
            days_elapsed: 0,
            days_remaining: 365,
        })
    );
}
