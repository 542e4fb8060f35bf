// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin key authorization.
//!
//! Authorization is a pure decision over the stored [`AdminKeyMode`] and the
//! key the caller supplied. Until a key is configured every admin operation
//! is open (trust on first use); afterwards a missing or mismatched key is
//! rejected.

use sibon_audit::Actor;
use sibon_domain::AdminKeyMode;
use sibon_persistence::verify_admin_key;
use tracing::warn;

use crate::error::ApiError;

/// Authorization service for admin-gated operations.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks the supplied admin key and returns the actor to record.
    ///
    /// # Arguments
    ///
    /// * `mode` - The stored admin key mode
    /// * `supplied_key` - The key sent with the request, if any
    /// * `action` - The operation being attempted, for logging
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if a key is configured and the
    /// supplied key is missing or does not match. Returns
    /// `ApiError::Internal` if the stored hash cannot be checked.
    pub fn authorize_admin(
        mode: &AdminKeyMode,
        supplied_key: Option<&str>,
        action: &str,
    ) -> Result<Actor, ApiError> {
        match mode {
            AdminKeyMode::Unconfigured => Ok(Actor::admin()),
            AdminKeyMode::Configured { key_hash } => {
                let Some(key) = supplied_key else {
                    warn!(action, "Admin key missing");
                    return Err(ApiError::Unauthorized {
                        action: String::from(action),
                    });
                };

                if verify_admin_key(key, key_hash)? {
                    Ok(Actor::admin())
                } else {
                    warn!(action, "Admin key mismatch");
                    Err(ApiError::Unauthorized {
                        action: String::from(action),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sibon_persistence::hash_admin_key;

    fn configured(key: &str) -> AdminKeyMode {
        AdminKeyMode::Configured {
            key_hash: hash_admin_key(key, 4).unwrap(),
        }
    }

    #[test]
    fn test_unconfigured_mode_allows_any_caller() {
        let mode: AdminKeyMode = AdminKeyMode::Unconfigured;

        assert!(AuthorizationService::authorize_admin(&mode, None, "set_max_capacity").is_ok());
        assert!(
            AuthorizationService::authorize_admin(&mode, Some("anything"), "set_max_capacity")
                .is_ok()
        );
    }

    #[test]
    fn test_configured_mode_accepts_matching_key() {
        let mode: AdminKeyMode = configured("lodge-admin");
        let actor: Actor =
            AuthorizationService::authorize_admin(&mode, Some("lodge-admin"), "remove_booking")
                .unwrap();
        assert!(actor.is_admin());
    }

    #[test]
    fn test_configured_mode_rejects_missing_and_wrong_keys() {
        let mode: AdminKeyMode = configured("lodge-admin");
        let expected: ApiError = ApiError::Unauthorized {
            action: String::from("remove_booking"),
        };

        assert_eq!(
            AuthorizationService::authorize_admin(&mode, None, "remove_booking"),
            Err(expected.clone())
        );
        assert_eq!(
            AuthorizationService::authorize_admin(&mode, Some("wrong-key"), "remove_booking"),
            Err(expected)
        );
    }

    #[test]
    fn test_rejection_message_does_not_echo_the_key() {
        let mode: AdminKeyMode = configured("lodge-admin");
        let err: ApiError =
            AuthorizationService::authorize_admin(&mode, Some("guess-1234"), "update_status")
                .unwrap_err();
        assert_eq!(err.to_string(), "Forbidden");
    }

    #[test]
    fn test_corrupt_stored_hash_is_internal() {
        let mode: AdminKeyMode = AdminKeyMode::Configured {
            key_hash: String::from("not-a-bcrypt-hash"),
        };
        assert!(matches!(
            AuthorizationService::authorize_admin(&mode, Some("lodge-admin"), "update_status"),
            Err(ApiError::Internal { .. })
        ));
    }
}
