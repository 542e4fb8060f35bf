// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sibon_domain::{AdminKeyMode, DEFAULT_MAX_CAPACITY, Settings};

use crate::{Persistence, PersistenceError};

#[test]
fn test_fresh_store_is_unconfigured_with_default_capacity() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let settings: Settings = persistence.load_settings().unwrap();

    assert_eq!(settings.admin_key, AdminKeyMode::Unconfigured);
    assert_eq!(settings.max_capacity, DEFAULT_MAX_CAPACITY);
}

#[test]
fn test_saved_settings_are_reloaded() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let new_settings: Settings = Settings {
        admin_key: AdminKeyMode::Configured {
            key_hash: String::from("$2b$04$hash"),
        },
        max_capacity: 24,
    };

    persistence
        .transaction(|tx| tx.save_settings(&new_settings))
        .unwrap();

    assert_eq!(persistence.load_settings().unwrap(), new_settings);
}

#[test]
fn test_transaction_sees_its_own_settings_write() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let seen: Settings = persistence
        .transaction(|tx| -> Result<Settings, PersistenceError> {
            let mut settings: Settings = tx.load_settings()?;
            settings.max_capacity = 8;
            tx.save_settings(&settings)?;
            tx.load_settings()
        })
        .unwrap();

    assert_eq!(seen.max_capacity, 8);
}
