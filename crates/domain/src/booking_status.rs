// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status states and the transition table.
//!
//! Status only moves forward, one step at a time, and only when an
//! administrator asks for it. Completing a stay is a separate side
//! transition on a confirmed booking and does not change the status.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Booking status through the request, payment and confirmation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Submitted by a visitor, awaiting review
    Pending,
    /// Accepted by an admin, payment not yet requested
    Approved,
    /// Declined by an admin
    Rejected,
    /// Payment has been requested from the guest
    PaymentRequested,
    /// Payment has been received from the guest
    PaymentReceived,
    /// Stay is confirmed
    Confirmed,
}

impl BookingStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::PaymentRequested,
        Self::PaymentReceived,
        Self::Confirmed,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::PaymentRequested => "payment_requested",
            Self::PaymentReceived => "payment_received",
            Self::Confirmed => "confirmed",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "payment_requested" => Ok(Self::PaymentRequested),
            "payment_received" => Ok(Self::PaymentReceived),
            "confirmed" => Ok(Self::Confirmed),
            _ => Err(DomainError::InvalidBookingStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns the statuses reachable from this one in a single step.
    #[must_use]
    pub const fn next_states(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::PaymentRequested],
            Self::PaymentRequested => &[Self::PaymentReceived],
            Self::PaymentReceived => &[Self::Confirmed],
            Self::Rejected | Self::Confirmed => &[],
        }
    }

    /// Returns true if no status transition leaves this state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Confirmed)
    }

    /// Returns true if this status holds the bungalow's single booking slot.
    ///
    /// A confirmed booking stops being active once its stay is completed;
    /// see [`crate::Booking::is_active`].
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Rejected)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if `new_status` is not
    /// the immediate next state.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("cannot transition from terminal state"),
            });
        }

        if self.next_states().contains(&new_status) {
            return Ok(());
        }

        let allowed: Vec<&str> = self.next_states().iter().map(Self::as_str).collect();
        Err(DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: format!("allowed next status: {}", allowed.join(" or ")),
        })
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in BookingStatus::ALL {
            let s = status.as_str();
            match BookingStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        let result = BookingStatus::parse_str("cancelled");
        assert!(matches!(
            result,
            Err(DomainError::InvalidBookingStatus { status }) if status == "cancelled"
        ));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Approved.is_terminal());
        assert!(!BookingStatus::PaymentRequested.is_terminal());
        assert!(!BookingStatus::PaymentReceived.is_terminal());
        assert!(BookingStatus::Rejected.is_terminal());
        assert!(BookingStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_forward_chain_is_valid() {
        let chain = [
            BookingStatus::Pending,
            BookingStatus::Approved,
            BookingStatus::PaymentRequested,
            BookingStatus::PaymentReceived,
            BookingStatus::Confirmed,
        ];
        for pair in chain.windows(2) {
            assert!(
                pair[0].validate_transition(pair[1]).is_ok(),
                "{} -> {} should be allowed",
                pair[0],
                pair[1]
            );
        }
        assert!(
            BookingStatus::Pending
                .validate_transition(BookingStatus::Rejected)
                .is_ok()
        );
    }

    #[test]
    fn test_skipping_payment_states_is_rejected() {
        let result = BookingStatus::Pending.validate_transition(BookingStatus::Confirmed);
        assert!(matches!(
            result,
            Err(DomainError::InvalidStatusTransition { ref from, ref to, .. })
                if from == "pending" && to == "confirmed"
        ));
    }

    #[test]
    fn test_backward_and_repeated_transitions_are_rejected() {
        assert!(
            BookingStatus::PaymentReceived
                .validate_transition(BookingStatus::PaymentRequested)
                .is_err()
        );
        assert!(
            BookingStatus::Approved
                .validate_transition(BookingStatus::Approved)
                .is_err()
        );
        assert!(
            BookingStatus::Approved
                .validate_transition(BookingStatus::Rejected)
                .is_err()
        );
    }

    #[test]
    fn test_no_transition_out_of_terminal_states() {
        for target in BookingStatus::ALL {
            assert!(BookingStatus::Rejected.validate_transition(target).is_err());
            assert!(BookingStatus::Confirmed.validate_transition(target).is_err());
        }
    }

    #[test]
    fn test_only_rejected_is_inactive() {
        for status in BookingStatus::ALL {
            assert_eq!(status.is_active(), status != BookingStatus::Rejected);
        }
    }
}
