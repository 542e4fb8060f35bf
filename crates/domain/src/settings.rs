// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lodge-wide settings and the admin key mode.

use crate::error::DomainError;

/// Default guest capacity of a date with no availability record.
pub const DEFAULT_MAX_CAPACITY: u32 = 16;

/// Whether an admin key has been configured.
///
/// Until a key is configured every admin operation is open to any caller
/// (trust on first use). Once configured, the key is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminKeyMode {
    /// No admin key has ever been set.
    Unconfigured,
    /// An admin key is set. Only its hash is held.
    Configured {
        /// Hash of the admin key.
        key_hash: String,
    },
}

impl AdminKeyMode {
    /// Builds the mode from the stored key hash, if any.
    #[must_use]
    pub fn from_stored_hash(key_hash: Option<String>) -> Self {
        key_hash.map_or(Self::Unconfigured, |key_hash| Self::Configured { key_hash })
    }

    /// Returns true once an admin key has been set.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Configured { .. })
    }
}

/// The singleton lodge settings record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Admin key mode.
    pub admin_key: AdminKeyMode,
    /// Default capacity of a date with no availability record.
    pub max_capacity: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            admin_key: AdminKeyMode::Unconfigured,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

/// Validates a new maximum capacity.
///
/// # Errors
///
/// Returns `DomainError::InvalidMaxCapacity` if the capacity is zero.
pub const fn validate_max_capacity(max_capacity: u32) -> Result<(), DomainError> {
    if max_capacity == 0 {
        return Err(DomainError::InvalidMaxCapacity(max_capacity));
    }
    Ok(())
}
