// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use sibon_audit::Cause;
use sibon_domain::LodgeTimezone;
use sibon_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    BookingInfo, CreateBookingRequest, ServiceConfig, SetAdminKeyRequest, UpdateStatusRequest,
    create_booking, set_admin_key, update_status,
};

pub const NOW: OffsetDateTime = datetime!(2026-10-16 09:00 UTC);

pub const ADMIN_KEY: &str = "lodge-admin-key";

pub fn create_test_config() -> ServiceConfig {
    ServiceConfig::new(4, LodgeTimezone::default())
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Sets the admin key so that admin operations require it.
pub fn configure_admin_key(persistence: &mut Persistence) {
    let request: SetAdminKeyRequest = SetAdminKeyRequest {
        admin_key: String::from(ADMIN_KEY),
    };
    set_admin_key(
        persistence,
        &request,
        &create_test_config(),
        create_test_cause(),
        NOW,
    )
    .expect("Failed to configure admin key");
}

pub fn create_booking_request(
    bungalow_number: &str,
    check_in: &str,
    check_out: &str,
) -> CreateBookingRequest {
    CreateBookingRequest {
        check_in: String::from(check_in),
        check_out: String::from(check_out),
        bungalow_number: String::from(bungalow_number),
        user_type: String::from("owner"),
        user_name: Some(String::from("Thandi Mokoena")),
        user_email: Some(String::from("thandi@example.com")),
        notes: None,
        guests: Some(4),
    }
}

pub fn submit_booking(
    persistence: &mut Persistence,
    bungalow_number: &str,
    check_in: &str,
    check_out: &str,
    now: OffsetDateTime,
) -> BookingInfo {
    create_booking(
        persistence,
        &create_booking_request(bungalow_number, check_in, check_out),
        create_test_cause(),
        now,
    )
    .expect("Failed to submit booking")
}

/// Walks a booking through the workflow up to `confirmed`.
pub fn confirm_booking(persistence: &mut Persistence, admin_key: Option<&str>, booking_id: i64) {
    for status in ["approved", "payment_requested", "payment_received", "confirmed"] {
        update_status(
            persistence,
            admin_key,
            booking_id,
            &UpdateStatusRequest {
                status: String::from(status),
            },
            create_test_cause(),
            NOW,
        )
        .expect("Failed to advance booking status");
    }
}
