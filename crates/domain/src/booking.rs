// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking records and the changes an administrator can make to them.

use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use crate::types::{BungalowNumber, StayRange, UserType};
use crate::validation::{normalize_optional_text, validate_guest_count};
use time::{Date, OffsetDateTime};

/// A visitor's request for a stay, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// The bungalow requesting the stay.
    pub bungalow_number: BungalowNumber,
    /// Whether the requester is an owner or a registered user.
    pub user_type: UserType,
    /// The nights requested.
    pub stay: StayRange,
    /// Optional guest name.
    pub user_name: Option<String>,
    /// Optional guest email.
    pub user_email: Option<String>,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Optional number of guests.
    pub guests: Option<u32>,
}

impl BookingRequest {
    /// Creates a booking request, normalising optional text fields.
    ///
    /// Blank optional strings are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a guest count of zero is supplied.
    pub fn new(
        bungalow_number: BungalowNumber,
        user_type: UserType,
        stay: StayRange,
        user_name: Option<&str>,
        user_email: Option<&str>,
        notes: Option<&str>,
        guests: Option<u32>,
    ) -> Result<Self, DomainError> {
        validate_guest_count(guests)?;
        Ok(Self {
            bungalow_number,
            user_type,
            stay,
            user_name: normalize_optional_text(user_name),
            user_email: normalize_optional_text(user_email),
            notes: normalize_optional_text(notes),
            guests,
        })
    }
}

/// Fields an administrator may change on an existing booking.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingEdit {
    /// New check-in date.
    pub check_in: Option<Date>,
    /// New check-out date.
    pub check_out: Option<Date>,
    /// New guest name.
    pub user_name: Option<String>,
    /// New guest email.
    pub user_email: Option<String>,
    /// New notes.
    pub notes: Option<String>,
    /// New guest count.
    pub guests: Option<u32>,
}

impl BookingEdit {
    /// Returns true if the edit would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.check_in.is_none()
            && self.check_out.is_none()
            && self.user_name.is_none()
            && self.user_email.is_none()
            && self.notes.is_none()
            && self.guests.is_none()
    }
}

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Store-assigned identifier. `None` until persisted.
    pub booking_id: Option<i64>,
    /// The bungalow that made the request.
    pub bungalow_number: BungalowNumber,
    /// Whether the requester is an owner or a registered user.
    pub user_type: UserType,
    /// Optional guest name.
    pub user_name: Option<String>,
    /// Optional guest email.
    pub user_email: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Optional number of guests.
    pub guests: Option<u32>,
    /// The nights booked.
    pub stay: StayRange,
    /// Current workflow status.
    pub status: BookingStatus,
    /// When the request was submitted.
    pub created_at: OffsetDateTime,
    /// When payment was requested.
    pub payment_requested_at: Option<OffsetDateTime>,
    /// When payment was received.
    pub payment_received_at: Option<OffsetDateTime>,
    /// When the stay was confirmed.
    pub confirmed_at: Option<OffsetDateTime>,
    /// When the stay was marked as completed.
    pub stay_completed_at: Option<OffsetDateTime>,
}

impl Booking {
    /// Creates a new pending booking from a visitor request.
    #[must_use]
    pub fn from_request(request: BookingRequest, now: OffsetDateTime) -> Self {
        Self {
            booking_id: None,
            bungalow_number: request.bungalow_number,
            user_type: request.user_type,
            user_name: request.user_name,
            user_email: request.user_email,
            notes: request.notes,
            guests: request.guests,
            stay: request.stay,
            status: BookingStatus::Pending,
            created_at: now,
            payment_requested_at: None,
            payment_received_at: None,
            confirmed_at: None,
            stay_completed_at: None,
        }
    }

    /// Returns true if this booking holds the bungalow's single booking slot.
    ///
    /// Rejected bookings and confirmed bookings whose stay has been
    /// completed are not active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active() && self.stay_completed_at.is_none()
    }

    /// Returns a copy of this booking moved to `new_status`.
    ///
    /// The timestamp belonging to the new status is stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if `new_status` is not the immediate next state.
    pub fn with_status(
        &self,
        new_status: BookingStatus,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        self.status.validate_transition(new_status)?;

        let mut updated: Self = self.clone();
        updated.status = new_status;
        match new_status {
            BookingStatus::PaymentRequested => updated.payment_requested_at = Some(now),
            BookingStatus::PaymentReceived => updated.payment_received_at = Some(now),
            BookingStatus::Confirmed => updated.confirmed_at = Some(now),
            BookingStatus::Pending | BookingStatus::Approved | BookingStatus::Rejected => {}
        }
        Ok(updated)
    }

    /// Returns a copy of this booking with the stay marked as completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is not confirmed or the stay was
    /// already completed.
    pub fn with_stay_completed(&self, now: OffsetDateTime) -> Result<Self, DomainError> {
        if self.status != BookingStatus::Confirmed {
            return Err(DomainError::StayNotConfirmed {
                status: self.status.as_str().to_string(),
            });
        }
        if self.stay_completed_at.is_some() {
            return Err(DomainError::StayAlreadyCompleted);
        }

        let mut updated: Self = self.clone();
        updated.stay_completed_at = Some(now);
        Ok(updated)
    }

    /// Returns a copy of this booking with `edit` applied.
    ///
    /// The status and all workflow timestamps are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the edited dates do not form a valid stay or the
    /// guest count is zero.
    pub fn with_edit(&self, edit: &BookingEdit) -> Result<Self, DomainError> {
        let check_in: Date = edit.check_in.unwrap_or_else(|| self.stay.check_in());
        let check_out: Date = edit.check_out.unwrap_or_else(|| self.stay.check_out());
        let stay: StayRange = StayRange::new(check_in, check_out)?;
        validate_guest_count(edit.guests)?;

        let mut updated: Self = self.clone();
        updated.stay = stay;
        if let Some(user_name) = &edit.user_name {
            updated.user_name = normalize_optional_text(Some(user_name));
        }
        if let Some(user_email) = &edit.user_email {
            updated.user_email = normalize_optional_text(Some(user_email));
        }
        if let Some(notes) = &edit.notes {
            updated.notes = normalize_optional_text(Some(notes));
        }
        if edit.guests.is_some() {
            updated.guests = edit.guests;
        }
        Ok(updated)
    }

    /// Returns true if the name or email contains `term`, ignoring case.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let needle: String = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.user_name, &self.user_email]
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(&needle))
    }

    /// Returns a one-line description used in audit snapshots.
    #[must_use]
    pub fn summary(&self) -> String {
        let id: String = self
            .booking_id
            .map_or_else(|| String::from("new"), |id| id.to_string());
        format!(
            "booking={id} bungalow={} status={} check_in={} check_out={} completed={}",
            self.bungalow_number,
            self.status,
            self.stay.check_in(),
            self.stay.check_out(),
            self.stay_completed_at.is_some()
        )
    }
}
