// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod audit_tests;
mod availability_tests;
mod initialization_tests;
mod settings_tests;

use sibon_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use sibon_domain::{Booking, BookingRequest, BungalowNumber, StayRange, UserType};
use time::macros::datetime;
use time::{Date, OffsetDateTime};

use crate::{Persistence, PersistenceError};

pub const NOW: OffsetDateTime = datetime!(2026-10-16 09:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

pub fn create_test_booking(
    bungalow_number: &str,
    check_in: Date,
    check_out: Date,
    created_at: OffsetDateTime,
) -> Booking {
    let request: BookingRequest = BookingRequest::new(
        BungalowNumber::new(bungalow_number).unwrap(),
        UserType::Owner,
        StayRange::new(check_in, check_out).unwrap(),
        Some("Thandi Mokoena"),
        Some("thandi@example.com"),
        Some("Arriving late"),
        Some(4),
    )
    .unwrap();
    Booking::from_request(request, created_at)
}

pub fn create_test_event(name: &str) -> AuditEvent {
    AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(String::from(name), None),
        StateSnapshot::absent(),
        StateSnapshot::new(String::from("after")),
    )
}

/// Inserts a booking in its own transaction and returns it with its ID.
pub fn store_booking(persistence: &mut Persistence, booking: &Booking) -> Booking {
    persistence
        .transaction(|tx| -> Result<Booking, PersistenceError> { tx.insert_booking(booking) })
        .expect("booking insert")
}
