// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use sibon_domain::{
    AvailabilityDay, Booking, BookingStatus, BungalowNumber, SeasonType, StayRange, UserType,
    format_date, parse_date,
};
use std::str::FromStr;
use time::OffsetDateTime;

use crate::diesel_schema::{availability, bookings};
use crate::error::PersistenceError;

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Converts a timestamp to stored Unix milliseconds.
pub fn to_millis(timestamp: OffsetDateTime) -> Result<i64, PersistenceError> {
    (timestamp.unix_timestamp_nanos() / NANOS_PER_MILLI)
        .to_i64()
        .ok_or_else(|| {
            PersistenceError::SerializationError(format!("Timestamp out of range: {timestamp}"))
        })
}

/// Converts stored Unix milliseconds back to a timestamp.
pub fn from_millis(millis: i64) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * NANOS_PER_MILLI).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid timestamp {millis}: {e}"))
    })
}

fn optional_millis(timestamp: Option<OffsetDateTime>) -> Result<Option<i64>, PersistenceError> {
    timestamp.map(to_millis).transpose()
}

fn optional_timestamp(millis: Option<i64>) -> Result<Option<OffsetDateTime>, PersistenceError> {
    millis.map(from_millis).transpose()
}

fn to_stored_count(value: u32, column: &str) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("{column} out of range: {value}"))
    })
}

fn from_stored_count(value: i32, column: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{column} out of range: {value}"))
    })
}

const fn to_stored_flag(value: bool) -> i32 {
    if value { 1 } else { 0 }
}

/// Diesel Queryable struct for booking rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = bookings)]
pub struct BookingRow {
    pub booking_id: i64,
    pub bungalow_number: String,
    pub user_type: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub notes: Option<String>,
    pub guests: Option<i32>,
    pub check_in: String,
    pub check_out: String,
    pub status: String,
    pub created_at: i64,
    pub payment_requested_at: Option<i64>,
    pub payment_received_at: Option<i64>,
    pub confirmed_at: Option<i64>,
    pub stay_completed_at: Option<i64>,
}

impl BookingRow {
    /// Rebuilds the domain booking from a stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value no longer satisfies the domain rules.
    pub fn into_booking(self) -> Result<Booking, PersistenceError> {
        let stay: StayRange =
            StayRange::new(parse_date(&self.check_in)?, parse_date(&self.check_out)?)?;
        let guests: Option<u32> = self
            .guests
            .map(|g| from_stored_count(g, "guests"))
            .transpose()?;

        Ok(Booking {
            booking_id: Some(self.booking_id),
            bungalow_number: BungalowNumber::new(&self.bungalow_number)?,
            user_type: UserType::from_str(&self.user_type)?,
            user_name: self.user_name,
            user_email: self.user_email,
            notes: self.notes,
            guests,
            stay,
            status: BookingStatus::from_str(&self.status)?,
            created_at: from_millis(self.created_at)?,
            payment_requested_at: optional_timestamp(self.payment_requested_at)?,
            payment_received_at: optional_timestamp(self.payment_received_at)?,
            confirmed_at: optional_timestamp(self.confirmed_at)?,
            stay_completed_at: optional_timestamp(self.stay_completed_at)?,
        })
    }
}

/// Diesel Insertable/AsChangeset struct for booking writes.
///
/// `booking_id` is assigned by the database and never written.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = bookings, treat_none_as_null = true)]
pub struct BookingValues {
    pub bungalow_number: String,
    pub user_type: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub notes: Option<String>,
    pub guests: Option<i32>,
    pub check_in: String,
    pub check_out: String,
    pub status: String,
    pub created_at: i64,
    pub payment_requested_at: Option<i64>,
    pub payment_received_at: Option<i64>,
    pub confirmed_at: Option<i64>,
    pub stay_completed_at: Option<i64>,
}

impl BookingValues {
    /// Builds the stored column values of a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in its column.
    pub fn from_booking(booking: &Booking) -> Result<Self, PersistenceError> {
        Ok(Self {
            bungalow_number: booking.bungalow_number.value().to_string(),
            user_type: booking.user_type.as_str().to_string(),
            user_name: booking.user_name.clone(),
            user_email: booking.user_email.clone(),
            notes: booking.notes.clone(),
            guests: booking
                .guests
                .map(|g| to_stored_count(g, "guests"))
                .transpose()?,
            check_in: format_date(booking.stay.check_in())?,
            check_out: format_date(booking.stay.check_out())?,
            status: booking.status.as_str().to_string(),
            created_at: to_millis(booking.created_at)?,
            payment_requested_at: optional_millis(booking.payment_requested_at)?,
            payment_received_at: optional_millis(booking.payment_received_at)?,
            confirmed_at: optional_millis(booking.confirmed_at)?,
            stay_completed_at: optional_millis(booking.stay_completed_at)?,
        })
    }
}

/// Diesel Queryable/Insertable struct for availability rows.
#[derive(Debug, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = availability, treat_none_as_null = true)]
pub struct AvailabilityRow {
    pub date: String,
    pub available: i32,
    pub blocked: i32,
    pub boma_blocked: i32,
    pub season_type: Option<String>,
}

impl AvailabilityRow {
    /// Builds the stored row of an availability record.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in its column.
    pub fn from_day(day: &AvailabilityDay) -> Result<Self, PersistenceError> {
        Ok(Self {
            date: format_date(day.date)?,
            available: to_stored_count(day.available, "available")?,
            blocked: to_stored_flag(day.blocked),
            boma_blocked: to_stored_flag(day.boma_blocked),
            season_type: day.season_type.map(|s| s.as_str().to_string()),
        })
    }

    /// Rebuilds the availability record from a stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value is out of range.
    pub fn into_day(self) -> Result<AvailabilityDay, PersistenceError> {
        Ok(AvailabilityDay {
            date: parse_date(&self.date)?,
            available: from_stored_count(self.available, "available")?,
            blocked: self.blocked != 0,
            boma_blocked: self.boma_blocked != 0,
            season_type: self
                .season_type
                .as_deref()
                .map(SeasonType::from_str)
                .transpose()?,
        })
    }
}

/// Converts the stored max capacity column.
///
/// # Errors
///
/// Returns an error if the stored value is negative.
pub fn max_capacity_from_column(value: i32) -> Result<u32, PersistenceError> {
    from_stored_count(value, "max_capacity")
}

/// Converts a max capacity to its stored column value.
///
/// # Errors
///
/// Returns an error if the value does not fit the column.
pub fn max_capacity_to_column(value: u32) -> Result<i32, PersistenceError> {
    to_stored_count(value, "max_capacity")
}
