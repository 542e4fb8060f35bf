// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The admin booking listing.

use crate::error::CoreError;
use crate::quote::season_overrides;
use sibon_domain::{
    AvailabilityDay, Booking, BookingStatus, CostBreakdown, RateCard, SeasonType, compute_cost,
};
use std::collections::BTreeMap;
use time::Date;

/// Optional filters for the booking listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Case-insensitive term matched against guest name and email.
    pub search: Option<String>,
    /// Only list bookings in this status.
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    fn matches(&self, booking: &Booking) -> bool {
        self.status.is_none_or(|status| booking.status == status)
            && self
                .search
                .as_deref()
                .is_none_or(|term| booking.matches_search(term))
    }
}

/// A booking with its night count and accommodation cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedBooking {
    /// The stored booking.
    pub booking: Booking,
    /// Number of nights booked.
    pub nights: i64,
    /// Accommodation cost of the stay, excluding the boma.
    pub accommodation_cost: u64,
}

/// The admin booking listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingListing {
    /// Matching bookings, newest first.
    pub bookings: Vec<ListedBooking>,
    /// Pending bookings across the whole store, ignoring filters.
    pub pending_count: usize,
    /// Approved bookings across the whole store, ignoring filters.
    pub approved_count: usize,
}

/// Builds the admin listing from every stored booking.
///
/// Bookings are ordered by creation time, newest first, with the higher id
/// first on a tie. Costs use the manual season overrides in `recorded`.
///
/// # Errors
///
/// Returns an error if a booking's cost cannot be computed.
pub fn build_booking_listing(
    mut bookings: Vec<Booking>,
    filter: &BookingFilter,
    recorded: &[AvailabilityDay],
    rates: &RateCard,
) -> Result<BookingListing, CoreError> {
    let pending_count: usize = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Pending)
        .count();
    let approved_count: usize = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Approved)
        .count();

    bookings.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.booking_id.cmp(&a.booking_id))
    });

    let overrides: BTreeMap<Date, SeasonType> = season_overrides(recorded);
    let listed: Vec<ListedBooking> = bookings
        .into_iter()
        .filter(|booking| filter.matches(booking))
        .map(|booking| -> Result<ListedBooking, CoreError> {
            let cost: CostBreakdown = compute_cost(&booking.stay, &[], &overrides, rates)?;
            Ok(ListedBooking {
                nights: booking.stay.night_count(),
                accommodation_cost: cost.accommodation,
                booking,
            })
        })
        .collect::<Result<Vec<ListedBooking>, CoreError>>()?;

    Ok(BookingListing {
        bookings: listed,
        pending_count,
        approved_count,
    })
}
