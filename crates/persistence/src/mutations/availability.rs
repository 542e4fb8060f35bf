// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use sibon_domain::AvailabilityDay;
use tracing::debug;

use crate::data_models::AvailabilityRow;
use crate::diesel_schema::availability;
use crate::error::PersistenceError;

/// Inserts or replaces the availability record of each given date.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `days` - Complete records to store
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn upsert_availability_days(
    conn: &mut SqliteConnection,
    days: &[AvailabilityDay],
) -> Result<usize, PersistenceError> {
    for day in days {
        let row: AvailabilityRow = AvailabilityRow::from_day(day)?;

        diesel::insert_into(availability::table)
            .values(&row)
            .on_conflict(availability::date)
            .do_update()
            .set(&row)
            .execute(conn)?;
    }

    debug!(count = days.len(), "Upserted availability records");
    Ok(days.len())
}
