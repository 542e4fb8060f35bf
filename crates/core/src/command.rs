// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sibon_domain::{AvailabilityPatch, BookingEdit, BookingStatus, SeasonType};
use time::Date;

/// An admin change to an existing booking, as data only.
///
/// New bookings are not commands on an existing booking; they go through
/// [`crate::apply_submit`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingCommand {
    /// Change dates, contact details or notes without a status change.
    EditBooking {
        /// The fields to change.
        edit: BookingEdit,
    },
    /// Advance the booking to the next workflow status.
    TransitionStatus {
        /// The requested status.
        new_status: BookingStatus,
    },
    /// Mark the confirmed stay as completed.
    CompleteStay,
    /// Delete the booking.
    RemoveBooking,
}

impl BookingCommand {
    /// Returns the audit action name for this command.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::EditBooking { .. } => "EditBooking",
            Self::TransitionStatus { .. } => "TransitionStatus",
            Self::CompleteStay => "CompleteStay",
            Self::RemoveBooking => "RemoveBooking",
        }
    }
}

/// An admin change to the availability calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCommand {
    /// Patch the availability record of one date.
    SetDateAvailability {
        /// The date to change.
        date: Date,
        /// The fields to change.
        patch: AvailabilityPatch,
    },
    /// Override the season of every date in an inclusive range.
    SetSeasonForRange {
        /// First date of the range.
        start: Date,
        /// Last date of the range.
        end: Date,
        /// The season to apply.
        season_type: SeasonType,
    },
}

/// A change to the lodge settings.
///
/// Key hashing happens before the command is built; commands only ever
/// carry the hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    /// Set the admin key for the first time.
    ConfigureAdminKey {
        /// Hash of the new key.
        key_hash: String,
    },
    /// Replace an existing admin key.
    RotateAdminKey {
        /// Hash of the new key.
        key_hash: String,
    },
    /// Change the default capacity of unrecorded dates.
    SetMaxCapacity {
        /// The new capacity.
        max_capacity: u32,
    },
}
