// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sibon_audit::{Actor, Cause};
use sibon_domain::{
    Booking, BookingRequest, BookingStatus, BungalowNumber, StayRange, UserType,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const NOW: OffsetDateTime = datetime!(2026-10-16 09:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

pub fn create_test_request(bungalow: &str, check_in: Date, check_out: Date) -> BookingRequest {
    BookingRequest::new(
        BungalowNumber::new(bungalow).unwrap(),
        UserType::Owner,
        StayRange::new(check_in, check_out).unwrap(),
        Some("Jane Dlamini"),
        Some("jane@example.com"),
        None,
        Some(2),
    )
    .unwrap()
}

pub fn create_stored_booking(booking_id: i64, status: BookingStatus) -> Booking {
    let request: BookingRequest =
        create_test_request("B12", date!(2026 - 12 - 24), date!(2026 - 12 - 27));
    let mut booking: Booking = Booking::from_request(request, datetime!(2026-10-01 08:00 UTC));
    booking.booking_id = Some(booking_id);
    booking.status = status;
    booking
}
