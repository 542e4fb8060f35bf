// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sibon_audit::{AuditEvent, StateSnapshot};
use sibon_domain::{AvailabilityDay, Booking, BungalowNumber, Settings};
use std::collections::BTreeMap;
use time::Date;

/// Every stored booking of one bungalow.
///
/// This is the state a new booking request is validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BungalowState {
    /// The bungalow this state is scoped to.
    pub bungalow_number: BungalowNumber,
    /// All bookings ever stored for the bungalow.
    pub bookings: Vec<Booking>,
}

impl BungalowState {
    /// Creates the state of a bungalow from its stored bookings.
    ///
    /// # Arguments
    ///
    /// * `bungalow_number` - The bungalow this state is scoped to
    /// * `bookings` - The bungalow's stored bookings
    #[must_use]
    pub const fn new(bungalow_number: BungalowNumber, bookings: Vec<Booking>) -> Self {
        Self {
            bungalow_number,
            bookings,
        }
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "bungalow={},bookings_count={},active_count={}",
            self.bungalow_number,
            self.bookings.len(),
            self.bookings.iter().filter(|b| b.is_active()).count()
        ))
    }
}

/// The recorded availability days a calendar command touches, plus the
/// capacity new records start from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    /// Stored records, keyed by date.
    pub days: BTreeMap<Date, AvailabilityDay>,
    /// Capacity given to dates that have no record yet.
    pub max_capacity: u32,
}

impl CalendarState {
    /// Creates calendar state from stored records.
    ///
    /// # Arguments
    ///
    /// * `days` - The stored records in the affected range
    /// * `max_capacity` - The configured default capacity
    #[must_use]
    pub fn new(days: Vec<AvailabilityDay>, max_capacity: u32) -> Self {
        Self {
            days: days.into_iter().map(|day| (day.date, day)).collect(),
            max_capacity,
        }
    }
}

/// The result of a successful booking transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The booking after the transition. `None` when it was removed.
    pub new_booking: Option<Booking>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a calendar command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarResult {
    /// Every record written by the command, in date order.
    pub updated_days: Vec<AvailabilityDay>,
    /// The audit event recording this change.
    pub audit_event: AuditEvent,
}

/// The result of a settings command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsResult {
    /// The settings after the change.
    pub new_settings: Settings,
    /// The audit event recording this change.
    pub audit_event: AuditEvent,
}
