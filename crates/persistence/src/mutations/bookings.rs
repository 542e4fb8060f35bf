// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use sibon_domain::Booking;
use tracing::{debug, info};

use crate::data_models::BookingValues;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

/// Maps a write error, turning the one-active-booking index violation into
/// its own error.
fn map_write_error(err: diesel::result::Error, booking: &Booking) -> PersistenceError {
    match err {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PersistenceError::ActiveBookingConflict {
                bungalow_number: booking.bungalow_number.value().to_string(),
            }
        }
        other => PersistenceError::from(other),
    }
}

/// Inserts a new booking and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `booking` - The booking to store. Any ID it carries is ignored.
///
/// # Errors
///
/// Returns `PersistenceError::ActiveBookingConflict` if the bungalow already
/// holds an active booking, or an error if the insert fails.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<i64, PersistenceError> {
    let values: BookingValues = BookingValues::from_booking(booking)?;

    let booking_id: i64 = diesel::insert_into(bookings::table)
        .values(&values)
        .returning(bookings::booking_id)
        .get_result(conn)
        .map_err(|e| map_write_error(e, booking))?;

    info!(
        booking_id,
        bungalow_number = booking.bungalow_number.value(),
        "Inserted booking"
    );
    Ok(booking_id)
}

/// Overwrites a stored booking with new values.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `booking` - The booking to store. Must carry its ID.
///
/// # Errors
///
/// Returns `PersistenceError::BookingNotFound` if no row has the booking's
/// ID, or an error if the update fails.
pub fn update_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<(), PersistenceError> {
    let booking_id: i64 = booking.booking_id.ok_or_else(|| {
        PersistenceError::QueryFailed(String::from("cannot update a booking without an id"))
    })?;
    let values: BookingValues = BookingValues::from_booking(booking)?;

    let affected: usize = diesel::update(bookings::table)
        .filter(bookings::booking_id.eq(booking_id))
        .set(&values)
        .execute(conn)
        .map_err(|e| map_write_error(e, booking))?;

    if affected == 0 {
        return Err(PersistenceError::BookingNotFound(booking_id));
    }

    debug!(booking_id, status = booking.status.as_str(), "Updated booking");
    Ok(())
}

/// Deletes a booking.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `booking_id` - The booking to delete
///
/// # Errors
///
/// Returns `PersistenceError::BookingNotFound` if no such booking exists.
pub fn delete_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::delete(bookings::table)
        .filter(bookings::booking_id.eq(booking_id))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::BookingNotFound(booking_id));
    }

    info!(booking_id, "Deleted booking");
    Ok(())
}
