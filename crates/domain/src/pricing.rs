// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stay pricing.
//!
//! Each night is charged at the peak or off-peak rate, preferring a manual
//! season override over the season calendar. Boma days are charged at a
//! flat daily rate.

use crate::error::DomainError;
use crate::season::season_for;
use crate::types::{SeasonType, StayRange};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// Nightly rate for a peak season night.
pub const PEAK_NIGHTLY_RATE: u64 = 8300;
/// Nightly rate for an off-peak night.
pub const OFFPEAK_NIGHTLY_RATE: u64 = 4600;
/// Daily rate for the boma.
pub const BOMA_DAILY_RATE: u64 = 350;

/// Rates used to price a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateCard {
    /// Rate per peak night.
    pub peak_nightly: u64,
    /// Rate per off-peak night.
    pub offpeak_nightly: u64,
    /// Rate per boma day.
    pub boma_daily: u64,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            peak_nightly: PEAK_NIGHTLY_RATE,
            offpeak_nightly: OFFPEAK_NIGHTLY_RATE,
            boma_daily: BOMA_DAILY_RATE,
        }
    }
}

impl RateCard {
    /// Returns the nightly rate for a season.
    #[must_use]
    pub const fn nightly_rate(&self, season: SeasonType) -> u64 {
        match season {
            SeasonType::Peak => self.peak_nightly,
            SeasonType::Offpeak => self.offpeak_nightly,
        }
    }
}

/// The charge for a single night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightCharge {
    /// The night.
    pub date: Date,
    /// Season the night was priced at.
    pub season: SeasonType,
    /// Amount charged.
    pub rate: u64,
}

/// Itemised cost of a stay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostBreakdown {
    /// One entry per night, in order.
    pub nights: Vec<NightCharge>,
    /// Sum of the nightly charges.
    pub accommodation: u64,
    /// Distinct boma days charged, in order.
    pub boma_days: Vec<Date>,
    /// Boma charge.
    pub boma: u64,
    /// Accommodation plus boma.
    pub total: u64,
}

/// Computes the cost of a stay.
///
/// `overrides` holds manual season overrides by date. Boma dates must be
/// nights of the stay; duplicates are charged once.
///
/// # Errors
///
/// Returns `DomainError::BomaDateOutsideStay` if a boma date is not one of
/// the nights of the stay (including the check-out day).
pub fn compute_cost(
    stay: &StayRange,
    boma_dates: &[Date],
    overrides: &BTreeMap<Date, SeasonType>,
    rates: &RateCard,
) -> Result<CostBreakdown, DomainError> {
    if let Some(outside) = boma_dates.iter().find(|date| !stay.contains_night(**date)) {
        return Err(DomainError::BomaDateOutsideStay { date: *outside });
    }

    let nights: Vec<NightCharge> = stay
        .nights()
        .into_iter()
        .map(|date| {
            let season: SeasonType = overrides
                .get(&date)
                .copied()
                .unwrap_or_else(|| season_for(date));
            NightCharge {
                date,
                season,
                rate: rates.nightly_rate(season),
            }
        })
        .collect();
    let accommodation: u64 = nights.iter().map(|night| night.rate).sum();

    let boma_days: Vec<Date> = boma_dates
        .iter()
        .copied()
        .collect::<BTreeSet<Date>>()
        .into_iter()
        .collect();
    let boma: u64 = rates.boma_daily * boma_days.len() as u64;

    Ok(CostBreakdown {
        nights,
        accommodation,
        boma_days,
        boma,
        total: accommodation + boma,
    })
}
