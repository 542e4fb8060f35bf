// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use sibon_domain::Booking;
use time::macros::date;

use super::{NOW, create_test_booking, store_booking};
use crate::{Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    store_booking(
        &mut db1,
        &create_test_booking("B12", date!(2026 - 12 - 24), date!(2026 - 12 - 27), NOW),
    );

    assert_eq!(db1.list_bookings().unwrap().len(), 1);
    assert_eq!(db2.list_bookings().unwrap().len(), 0);
}

#[test]
fn test_migrations_seed_the_settings_row() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(
        persistence.load_settings().is_ok(),
        "Migrations must have seeded the global settings row"
    );
}

#[test]
fn test_file_database_survives_reopening() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "sibon_persistence_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        store_booking(
            &mut persistence,
            &create_test_booking("B7", date!(2026 - 11 - 02), date!(2026 - 11 - 04), NOW),
        );
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let bookings = reopened.list_bookings().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].bungalow_number.value(), "B7");

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

#[derive(diesel::QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = diesel::sql_types::Text)]
    journal_mode: String,
}

fn temp_database_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("sibon_{name}_{}.db", std::process::id()))
}

fn remove_database_files(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

#[test]
fn test_file_database_uses_write_ahead_log() {
    use diesel::RunQueryDsl;

    let path: std::path::PathBuf = temp_database_path("wal");
    remove_database_files(&path);

    let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
    let mode: JournalMode = diesel::sql_query("PRAGMA journal_mode")
        .get_result(&mut persistence.conn)
        .unwrap();
    assert_eq!(mode.journal_mode, "wal");

    drop(persistence);
    remove_database_files(&path);
}

#[test]
fn test_reopening_without_settings_row_fails() {
    use diesel::RunQueryDsl;

    let path: std::path::PathBuf = temp_database_path("no_settings");
    remove_database_files(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        diesel::sql_query("DELETE FROM settings")
            .execute(&mut persistence.conn)
            .unwrap();
    }

    let result: Result<Persistence, PersistenceError> = Persistence::new_with_file(&path);
    assert!(matches!(result, Err(PersistenceError::SettingsNotFound)));

    remove_database_files(&path);
}

#[test]
fn test_inserted_ids_increase() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let first: Booking = store_booking(
        &mut persistence,
        &create_test_booking("B1", date!(2026 - 11 - 02), date!(2026 - 11 - 04), NOW),
    );
    let second: Booking = store_booking(
        &mut persistence,
        &create_test_booking("B2", date!(2026 - 11 - 02), date!(2026 - 11 - 04), NOW),
    );

    assert!(second.booking_id.unwrap() > first.booking_id.unwrap());
}
