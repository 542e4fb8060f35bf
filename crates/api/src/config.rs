// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sibon_domain::{LodgeTimezone, RateCard};

use crate::admin_key_policy::AdminKeyPolicy;

/// Runtime configuration shared by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Requirements a new admin key must meet.
    pub admin_key_policy: AdminKeyPolicy,
    /// bcrypt cost used when hashing a new admin key.
    pub admin_key_hash_cost: u32,
    /// Time zone that decides which dates are past.
    pub timezone: LodgeTimezone,
    /// Nightly and boma rates.
    pub rates: RateCard,
}

impl ServiceConfig {
    /// Creates a configuration with the default policy and rates.
    ///
    /// # Arguments
    ///
    /// * `admin_key_hash_cost` - bcrypt cost for new admin keys
    /// * `timezone` - The lodge time zone
    #[must_use]
    pub fn new(admin_key_hash_cost: u32, timezone: LodgeTimezone) -> Self {
        Self {
            admin_key_policy: AdminKeyPolicy::default(),
            admin_key_hash_cost,
            timezone,
            rates: RateCard::default(),
        }
    }
}
