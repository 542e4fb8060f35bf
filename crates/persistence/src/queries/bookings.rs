// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use sibon_domain::{Booking, BungalowNumber};
use tracing::debug;

use crate::data_models::BookingRow;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

/// Retrieves a booking by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking_id` - The booking to load
///
/// # Errors
///
/// Returns `PersistenceError::BookingNotFound` if no such booking exists,
/// or an error if the stored row cannot be reconstructed.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Booking, PersistenceError> {
    debug!(booking_id, "Loading booking");

    let result: Result<BookingRow, diesel::result::Error> = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .select(BookingRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_booking(),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::BookingNotFound(booking_id)),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every booking, newest first.
///
/// Bookings created in the same millisecond are ordered by descending ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_bookings(conn: &mut SqliteConnection) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .order((bookings::created_at.desc(), bookings::booking_id.desc()))
        .select(BookingRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded bookings");

    rows.into_iter().map(BookingRow::into_booking).collect()
}

/// Lists every booking ever made for a bungalow, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `bungalow_number` - The bungalow whose history to load
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn bookings_for_bungalow(
    conn: &mut SqliteConnection,
    bungalow_number: &BungalowNumber,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::bungalow_number.eq(bungalow_number.value()))
        .order((bookings::created_at.asc(), bookings::booking_id.asc()))
        .select(BookingRow::as_select())
        .load(conn)?;

    debug!(
        bungalow_number = bungalow_number.value(),
        count = rows.len(),
        "Loaded bungalow booking history"
    );

    rows.into_iter().map(BookingRow::into_booking).collect()
}
