// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Sibon lodge booking system.
//!
//! This crate stores settings, bookings, availability records and audit
//! events in `SQLite` through Diesel.
//!
//! ## Layout
//!
//! - `connection`: opening, migrating and checking the database
//! - `queries/`: Diesel DSL reads
//! - `mutations/`: Diesel DSL writes
//! - `store`: the transactional handle passed to callers
//!
//! ## Transactions
//!
//! Every read-modify-write goes through [`Persistence::transaction`], which
//! opens an immediate transaction. A mutation and its audit event are
//! therefore committed together, and a failed operation leaves nothing
//! behind.
//!
//! ## Testing
//!
//! Tests run against [`Persistence::new_in_memory`], which gives each call
//! its own shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::{Connection, SqliteConnection};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

use sibon_domain::{AvailabilityDay, Booking, Settings};

mod connection;
mod credentials;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use connection::MIGRATIONS;
pub use credentials::{hash_admin_key, verify_admin_key};
pub use error::PersistenceError;
pub use queries::audit::RecordedAuditEvent;
pub use store::StoreTx;

use connection::DatabaseLocation;
use store::Abort;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let conn: SqliteConnection = connection::open(DatabaseLocation::Memory(db_id))?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is opened in write-ahead-log mode.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let conn: SqliteConnection = connection::open(DatabaseLocation::File(path_str))?;
        Ok(Self { conn })
    }

    /// Runs `f` inside one immediate transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back
    /// otherwise. Errors raised by Diesel while opening or committing the
    /// transaction are reported as `PersistenceError::TransactionFailed`.
    ///
    /// # Arguments
    ///
    /// * `f` - The work to perform against the store
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or a transaction failure.
    pub fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        E: From<PersistenceError>,
        F: FnOnce(&mut StoreTx<'_>) -> Result<T, E>,
    {
        let outcome: Result<T, Abort<E>> = self.conn.immediate_transaction(|conn| {
            let mut tx: StoreTx<'_> = StoreTx { conn };
            f(&mut tx).map_err(Abort::Caller)
        });

        outcome.map_err(|abort| match abort {
            Abort::Caller(err) => err,
            Abort::Diesel(err) => E::from(PersistenceError::TransactionFailed(err.to_string())),
        })
    }

    /// Loads the lodge settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings row cannot be read.
    pub fn load_settings(&mut self) -> Result<Settings, PersistenceError> {
        queries::settings::load_settings(&mut self.conn)
    }

    /// Loads a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BookingNotFound` if no such booking exists.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Booking, PersistenceError> {
        queries::bookings::get_booking(&mut self.conn, booking_id)
    }

    /// Lists every booking, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the bookings cannot be read.
    pub fn list_bookings(&mut self) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings(&mut self.conn)
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
        queries::availability::availability_in_range(&mut self.conn, start, end)
    }

    /// Lists audit events in the order they were written.
    ///
    /// # Arguments
    ///
    /// * `booking_id` - When set, only events about this booking are returned
    ///
    /// # Errors
    ///
    /// Returns an error if the events cannot be read.
    pub fn audit_events(
        &mut self,
        booking_id: Option<i64>,
    ) -> Result<Vec<RecordedAuditEvent>, PersistenceError> {
        queries::audit::list_audit_events(&mut self.conn, booking_id)
    }
}
