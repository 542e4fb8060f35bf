// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin key policy validation.
//!
//! This module enforces the requirements a new admin key must meet, both
//! when the first key is set and when an existing key is rotated.

use thiserror::Error;

/// Admin key policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminKeyPolicyError {
    /// Key is too short.
    #[error("Admin key must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Key contains nothing but whitespace.
    #[error("Admin key must not be blank")]
    Blank,

    /// Rotation to the key already in use.
    #[error("New admin key must differ from the current key")]
    Unchanged,
}

/// Admin key policy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminKeyPolicy {
    /// Minimum key length, in characters.
    pub min_length: usize,
}

impl Default for AdminKeyPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl AdminKeyPolicy {
    /// Validates a new admin key against the policy.
    ///
    /// # Arguments
    ///
    /// * `admin_key` - The proposed key
    ///
    /// # Errors
    ///
    /// Returns an `AdminKeyPolicyError` if the key does not meet the policy.
    pub fn validate(&self, admin_key: &str) -> Result<(), AdminKeyPolicyError> {
        if admin_key.trim().is_empty() {
            return Err(AdminKeyPolicyError::Blank);
        }

        if admin_key.chars().count() < self.min_length {
            return Err(AdminKeyPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        Ok(())
    }

    /// Validates the replacement key of a rotation.
    ///
    /// # Arguments
    ///
    /// * `current_key` - The key being replaced
    /// * `new_key` - The proposed key
    ///
    /// # Errors
    ///
    /// Returns an `AdminKeyPolicyError` if the new key does not meet the
    /// policy or equals the current key.
    pub fn validate_rotation(
        &self,
        current_key: &str,
        new_key: &str,
    ) -> Result<(), AdminKeyPolicyError> {
        self.validate(new_key)?;

        if current_key == new_key {
            return Err(AdminKeyPolicyError::Unchanged);
        }

        Ok(())
    }
}
