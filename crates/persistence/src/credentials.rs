// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin key hashing.
//!
//! The admin key is never stored in plain text. Only its bcrypt hash is
//! written to the settings row.

use crate::error::PersistenceError;

/// Hashes an admin key for storage.
///
/// # Arguments
///
/// * `admin_key` - The plain-text key
/// * `cost` - The bcrypt cost factor
///
/// # Errors
///
/// Returns an error if hashing fails (e.g. an out-of-range cost).
pub fn hash_admin_key(admin_key: &str, cost: u32) -> Result<String, PersistenceError> {
    bcrypt::hash(admin_key, cost)
        .map_err(|e| PersistenceError::CredentialError(format!("Failed to hash admin key: {e}")))
}

/// Checks a supplied admin key against a stored hash.
///
/// # Arguments
///
/// * `admin_key` - The plain-text key supplied by the caller
/// * `key_hash` - The stored hash
///
/// # Errors
///
/// Returns an error if the stored hash is malformed.
pub fn verify_admin_key(admin_key: &str, key_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(admin_key, key_hash)
        .map_err(|e| PersistenceError::CredentialError(format!("Failed to verify admin key: {e}")))
}
