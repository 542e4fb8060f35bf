// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::admin_key_policy::AdminKeyPolicyError;
use sibon::CoreError;
use sibon_domain::DomainError;
use sibon_persistence::PersistenceError;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// The `Display` text is what callers see, so rule violations carry the
/// domain message verbatim and authorization failures never echo the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The admin key was missing or did not match.
    Unauthorized {
        /// The action that was attempted.
        action: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { .. } => write!(f, "Forbidden"),
            Self::DomainRuleViolation { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. } => write!(f, "{message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AdminKeyPolicyError> for ApiError {
    fn from(err: AdminKeyPolicyError) -> Self {
        Self::InvalidInput {
            field: String::from("admin_key"),
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::BookingNotFound(booking_id) => {
                translate_domain_error(DomainError::BookingNotFound(booking_id))
            }
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            PersistenceError::ActiveBookingConflict { bungalow_number } => {
                translate_domain_error(DomainError::ActiveBookingExists { bungalow_number })
            }
            other => {
                error!(error = %other, "Persistence error");
                Self::Internal {
                    message: other.to_string(),
                }
            }
        }
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

fn rule_violation(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// Malformed values become `InvalidInput`; rejected requests that were
/// well-formed become `DomainRuleViolation`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidBungalowNumber(_) => invalid_input("bungalow_number", &err),
        DomainError::InvalidUserType(_) => invalid_input("user_type", &err),
        DomainError::InvalidBookingStatus { .. } => invalid_input("status", &err),
        DomainError::InvalidSeasonType(_) => invalid_input("season_type", &err),
        DomainError::InvalidGuestCount(_) => invalid_input("guests", &err),
        DomainError::InvalidStayRange { .. } | DomainError::StayTooLong { .. } => {
            invalid_input("check_out", &err)
        }
        DomainError::InvalidDateRange { .. } => invalid_input("end", &err),
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            invalid_input("date", &err)
        }
        DomainError::InvalidMonth { .. } => invalid_input("month", &err),
        DomainError::InvalidTimezone(_) => invalid_input("timezone", &err),
        DomainError::BomaDateOutsideStay { .. } => invalid_input("boma_dates", &err),
        DomainError::InvalidMaxCapacity(_) => invalid_input("max_capacity", &err),
        DomainError::InvalidStatusTransition { .. } => rule_violation("status_transition", &err),
        DomainError::StayNotConfirmed { .. } | DomainError::StayAlreadyCompleted => {
            rule_violation("complete_stay", &err)
        }
        DomainError::CooldownActive { .. } => rule_violation("booking_cooldown", &err),
        DomainError::ActiveBookingExists { .. } => rule_violation("single_active_booking", &err),
        DomainError::BomaDateUnavailable { .. } => rule_violation("boma_availability", &err),
        DomainError::AdminKeyAlreadyConfigured | DomainError::AdminKeyNotConfigured => {
            rule_violation("admin_key_bootstrap", &err)
        }
        DomainError::BookingNotFound(booking_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {booking_id} does not exist"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => {
            error!(error = %msg, "Core invariant violated");
            ApiError::Internal { message: msg }
        }
    }
}
