// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional access to the store.
//!
//! A [`StoreTx`] is only handed out by `Persistence::transaction`. Every
//! read and write made through it belongs to one immediate `SQLite`
//! transaction, which commits when the closure returns `Ok` and rolls back
//! on any error.

use diesel::SqliteConnection;
use sibon_audit::AuditEvent;
use sibon_domain::{AvailabilityDay, Booking, BungalowNumber, Settings};
use time::{Date, OffsetDateTime};

use crate::error::PersistenceError;
use crate::{mutations, queries};

/// A handle to the store inside an open transaction.
pub struct StoreTx<'a> {
    pub(crate) conn: &'a mut SqliteConnection,
}

impl StoreTx<'_> {
    /// Loads the lodge settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings row cannot be read.
    pub fn load_settings(&mut self) -> Result<Settings, PersistenceError> {
        queries::settings::load_settings(self.conn)
    }

    /// Stores the lodge settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings row cannot be written.
    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), PersistenceError> {
        mutations::settings::save_settings(self.conn, settings)
    }

    /// Loads a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BookingNotFound` if no such booking exists.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Booking, PersistenceError> {
        queries::bookings::get_booking(self.conn, booking_id)
    }

    /// Loads every booking made for a bungalow.
    ///
    /// # Errors
    ///
    /// Returns an error if the bookings cannot be read.
    pub fn bookings_for_bungalow(
        &mut self,
        bungalow_number: &BungalowNumber,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::bookings_for_bungalow(self.conn, bungalow_number)
    }

    /// Inserts a new booking and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ActiveBookingConflict` if the bungalow
    /// already holds an active booking.
    pub fn insert_booking(&mut self, booking: &Booking) -> Result<Booking, PersistenceError> {
        let booking_id: i64 = mutations::bookings::insert_booking(self.conn, booking)?;
        let mut stored: Booking = booking.clone();
        stored.booking_id = Some(booking_id);
        Ok(stored)
    }

    /// Overwrites a stored booking.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BookingNotFound` if the booking does not exist.
    pub fn update_booking(&mut self, booking: &Booking) -> Result<(), PersistenceError> {
        mutations::bookings::update_booking(self.conn, booking)
    }

    /// Deletes a booking.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BookingNotFound` if the booking does not exist.
    pub fn delete_booking(&mut self, booking_id: i64) -> Result<(), PersistenceError> {
        mutations::bookings::delete_booking(self.conn, booking_id)
    }

    /// Loads the stored availability records between two dates, inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read.
    pub fn availability_in_range(
        &mut self,
        start: Date,
        end: Date,
    ) -> Result<Vec<AvailabilityDay>, PersistenceError> {
        queries::availability::availability_in_range(self.conn, start, end)
    }

    /// Inserts or replaces availability records.
    ///
    /// # Errors
    ///
    /// Returns an error if any record cannot be written.
    pub fn upsert_availability_days(
        &mut self,
        days: &[AvailabilityDay],
    ) -> Result<usize, PersistenceError> {
        mutations::availability::upsert_availability_days(self.conn, days)
    }

    /// Writes an audit event and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized or written.
    pub fn record_audit_event(
        &mut self,
        event: &AuditEvent,
        now: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(self.conn, event, now)
    }
}

/// Why a transaction closure was aborted.
///
/// Diesel requires the closure's error type to absorb its own errors, so
/// the caller's error and Diesel's are carried side by side.
pub(crate) enum Abort<E> {
    Caller(E),
    Diesel(diesel::result::Error),
}

impl<E> From<diesel::result::Error> for Abort<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Diesel(err)
    }
}
