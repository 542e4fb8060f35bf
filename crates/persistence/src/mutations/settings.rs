// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Settings mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use sibon_domain::{AdminKeyMode, Settings};
use tracing::info;

use crate::data_models::max_capacity_to_column;
use crate::diesel_schema::settings;
use crate::error::PersistenceError;
use crate::queries::settings::GLOBAL_SETTINGS_KEY;

/// Stores the lodge settings.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `new_settings` - The settings to store
///
/// # Errors
///
/// Returns `PersistenceError::SettingsNotFound` if the seeded row is
/// missing, or an error if the update fails.
pub fn save_settings(
    conn: &mut SqliteConnection,
    new_settings: &Settings,
) -> Result<(), PersistenceError> {
    let admin_key_hash: Option<&str> = match &new_settings.admin_key {
        AdminKeyMode::Unconfigured => None,
        AdminKeyMode::Configured { key_hash } => Some(key_hash.as_str()),
    };
    let max_capacity: i32 = max_capacity_to_column(new_settings.max_capacity)?;

    let affected: usize = diesel::update(settings::table)
        .filter(settings::setting_key.eq(GLOBAL_SETTINGS_KEY))
        .set((
            settings::admin_key_hash.eq(admin_key_hash),
            settings::max_capacity.eq(max_capacity),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::SettingsNotFound);
    }

    info!(
        admin_key_configured = new_settings.admin_key.is_configured(),
        max_capacity = new_settings.max_capacity,
        "Saved settings"
    );
    Ok(())
}
