// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only pricing over stored availability records.

use crate::error::CoreError;
use sibon_domain::{
    AvailabilityDay, CostBreakdown, RateCard, SeasonType, StayRange, compute_cost,
    validate_boma_dates,
};
use std::collections::BTreeMap;
use time::Date;

/// Collects the manual season overrides from stored records.
#[must_use]
pub fn season_overrides(recorded: &[AvailabilityDay]) -> BTreeMap<Date, SeasonType> {
    recorded
        .iter()
        .filter_map(|day| day.season_type.map(|season| (day.date, season)))
        .collect()
}

/// Prices a stay against the stored records covering it.
///
/// This is a read-only operation and produces no audit event.
///
/// # Arguments
///
/// * `stay` - The nights to price
/// * `boma_dates` - Nights on which the boma is wanted
/// * `recorded` - Stored availability records for the nights of the stay
/// * `rates` - The rate card
///
/// # Errors
///
/// Returns an error if a boma date is not a night of the stay or the boma
/// is blocked on that date.
pub fn quote_stay(
    stay: &StayRange,
    boma_dates: &[Date],
    recorded: &[AvailabilityDay],
    rates: &RateCard,
) -> Result<CostBreakdown, CoreError> {
    let breakdown: CostBreakdown =
        compute_cost(stay, boma_dates, &season_overrides(recorded), rates)?;
    validate_boma_dates(&breakdown.boma_days, recorded)?;
    Ok(breakdown)
}
