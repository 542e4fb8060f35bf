// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Settings queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use sibon_domain::{AdminKeyMode, Settings};

use crate::data_models::max_capacity_from_column;
use crate::diesel_schema::settings;
use crate::error::PersistenceError;

/// Key of the single settings row.
pub const GLOBAL_SETTINGS_KEY: &str = "global";

/// Diesel Queryable struct for the settings row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = settings)]
struct SettingsRow {
    admin_key_hash: Option<String>,
    max_capacity: i32,
}

/// Loads the lodge settings.
///
/// # Errors
///
/// Returns `PersistenceError::SettingsNotFound` if the seeded row is
/// missing, or an error if the query fails.
pub fn load_settings(conn: &mut SqliteConnection) -> Result<Settings, PersistenceError> {
    let result: Result<SettingsRow, diesel::result::Error> = settings::table
        .filter(settings::setting_key.eq(GLOBAL_SETTINGS_KEY))
        .select(SettingsRow::as_select())
        .first(conn);

    let row: SettingsRow = match result {
        Ok(row) => row,
        Err(diesel::result::Error::NotFound) => return Err(PersistenceError::SettingsNotFound),
        Err(e) => return Err(PersistenceError::from(e)),
    };

    Ok(Settings {
        admin_key: AdminKeyMode::from_stored_hash(row.admin_key_hash),
        max_capacity: max_capacity_from_column(row.max_capacity)?,
    })
}
