// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_stored_booking;
use crate::{BookingFilter, BookingListing, build_booking_listing};
use sibon_domain::{Booking, BookingStatus, RateCard};
use time::Duration;

fn create_bookings() -> Vec<Booking> {
    let mut first: Booking = create_stored_booking(1, BookingStatus::Pending);
    let mut second: Booking = create_stored_booking(2, BookingStatus::Approved);
    second.created_at = first.created_at + Duration::hours(1);
    second.user_name = Some(String::from("Sipho Nkosi"));
    second.user_email = Some(String::from("sipho@example.com"));
    let mut third: Booking = create_stored_booking(3, BookingStatus::Pending);
    third.created_at = second.created_at;
    first.user_email = None;
    vec![first, second, third]
}

#[test]
fn test_listing_is_newest_first_with_id_tie_break() {
    let listing: BookingListing = build_booking_listing(
        create_bookings(),
        &BookingFilter::default(),
        &[],
        &RateCard::default(),
    )
    .unwrap();

    let ids: Vec<Option<i64>> = listing
        .bookings
        .iter()
        .map(|listed| listed.booking.booking_id)
        .collect();
    assert_eq!(ids, vec![Some(3), Some(2), Some(1)]);
}

#[test]
fn test_listing_carries_nights_and_accommodation_cost() {
    let listing: BookingListing = build_booking_listing(
        create_bookings(),
        &BookingFilter::default(),
        &[],
        &RateCard::default(),
    )
    .unwrap();

    // 24 to 27 December is three peak nights
    assert!(listing.bookings.iter().all(|listed| listed.nights == 3));
    assert!(
        listing
            .bookings
            .iter()
            .all(|listed| listed.accommodation_cost == 24_900)
    );
}

#[test]
fn test_counts_ignore_filters() {
    let filter: BookingFilter = BookingFilter {
        search: Some(String::from("SIPHO")),
        status: None,
    };

    let listing: BookingListing =
        build_booking_listing(create_bookings(), &filter, &[], &RateCard::default()).unwrap();

    assert_eq!(listing.bookings.len(), 1);
    assert_eq!(listing.bookings[0].booking.booking_id, Some(2));
    assert_eq!(listing.pending_count, 2);
    assert_eq!(listing.approved_count, 1);
}

#[test]
fn test_status_filter() {
    let filter: BookingFilter = BookingFilter {
        search: None,
        status: Some(BookingStatus::Pending),
    };

    let listing: BookingListing =
        build_booking_listing(create_bookings(), &filter, &[], &RateCard::default()).unwrap();

    assert_eq!(listing.bookings.len(), 2);
    assert!(
        listing
            .bookings
            .iter()
            .all(|listed| listed.booking.status == BookingStatus::Pending)
    );
}
