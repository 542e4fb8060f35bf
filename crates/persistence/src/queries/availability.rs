// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use sibon_domain::{AvailabilityDay, format_date};
use time::Date;
use tracing::debug;

use crate::data_models::AvailabilityRow;
use crate::diesel_schema::availability;
use crate::error::PersistenceError;

/// Loads the stored availability records between two dates, inclusive.
///
/// Dates are stored as `YYYY-MM-DD` text, so the range filter compares
/// lexically and runs inside the store.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `start` - First date of the range
/// * `end` - Last date of the range
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn availability_in_range(
    conn: &mut SqliteConnection,
    start: Date,
    end: Date,
) -> Result<Vec<AvailabilityDay>, PersistenceError> {
    let start_key: String = format_date(start)?;
    let end_key: String = format_date(end)?;

    let rows: Vec<AvailabilityRow> = availability::table
        .filter(availability::date.ge(&start_key))
        .filter(availability::date.le(&end_key))
        .order(availability::date.asc())
        .select(AvailabilityRow::as_select())
        .load(conn)?;

    debug!(
        start = %start_key,
        end = %end_key,
        count = rows.len(),
        "Loaded availability records"
    );

    rows.into_iter().map(AvailabilityRow::into_day).collect()
}
