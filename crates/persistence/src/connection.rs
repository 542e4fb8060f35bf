// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening the booking database.
//!
//! A connection is only handed out once the schema is migrated and the
//! global settings row is present.

use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Embedded `SQLite` migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a writer waits on a locked database file, in milliseconds.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Where the booking database lives.
#[derive(Debug, Clone, Copy)]
pub enum DatabaseLocation<'a> {
    /// A private in-memory database, named by a process-unique number.
    Memory(u64),
    /// A database file on disk.
    File(&'a str),
}

impl DatabaseLocation<'_> {
    fn url(self) -> String {
        match self {
            Self::Memory(id) => format!("file:sibon_mem_{id}?mode=memory&cache=shared"),
            Self::File(path) => path.to_string(),
        }
    }

    /// Connection PRAGMAs for this location. Only files get a write-ahead log.
    fn pragmas(self) -> Vec<String> {
        let mut pragmas: Vec<String> = vec![format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}")];
        if matches!(self, Self::File(_)) {
            pragmas.push(String::from("PRAGMA journal_mode = WAL"));
        }
        pragmas
    }
}

#[derive(QueryableByName)]
struct SettingsRowCount {
    #[diesel(sql_type = BigInt)]
    settings_rows: i64,
}

/// Opens the booking database, migrates it and checks the settings seed.
///
/// # Arguments
///
/// * `location` - Where the database lives
///
/// # Errors
///
/// Returns `PersistenceError::DatabaseConnectionFailed` if the database
/// cannot be opened, `PersistenceError::MigrationFailed` if a migration
/// fails, and `PersistenceError::SettingsNotFound` if the migrated schema
/// does not hold exactly one settings row.
pub fn open(location: DatabaseLocation<'_>) -> Result<SqliteConnection, PersistenceError> {
    let url: String = location.url();
    let mut conn: SqliteConnection = SqliteConnection::establish(&url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    for pragma in location.pragmas() {
        diesel::sql_query(pragma.as_str())
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    debug!(applied, "Applied pending migrations");

    let settings_rows: i64 = diesel::sql_query("SELECT COUNT(*) AS settings_rows FROM settings")
        .get_result::<SettingsRowCount>(&mut conn)?
        .settings_rows;
    if settings_rows != 1 {
        return Err(PersistenceError::SettingsNotFound);
    }

    info!(database = %url, "Booking database ready");
    Ok(conn)
}
