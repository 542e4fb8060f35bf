// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_actor, create_test_cause};
use crate::{CalendarCommand, CalendarResult, CalendarState, CoreError, apply_calendar};
use sibon_domain::{
    AvailabilityDay, AvailabilityPatch, DomainError, SeasonType, season_for,
};
use time::macros::date;

fn recorded_day() -> AvailabilityDay {
    AvailabilityDay {
        date: date!(2025 - 06 - 02),
        available: 5,
        blocked: false,
        boma_blocked: true,
        season_type: None,
    }
}

#[test]
fn test_zero_capacity_blocks_new_record() {
    let state: CalendarState = CalendarState::new(Vec::new(), 16);
    let command: CalendarCommand = CalendarCommand::SetDateAvailability {
        date: date!(2025 - 07 - 01),
        patch: AvailabilityPatch {
            available: Some(0),
            ..AvailabilityPatch::default()
        },
    };

    let result: CalendarResult =
        apply_calendar(&state, command, create_test_actor(), create_test_cause()).unwrap();

    assert_eq!(result.updated_days.len(), 1);
    let day: AvailabilityDay = result.updated_days[0];
    assert_eq!(day.available, 0);
    assert!(day.blocked);
    assert!(!day.boma_blocked);
    assert_eq!(result.audit_event.before.data, "none");
    assert!(result.audit_event.after.data.contains("blocked=true"));
    assert_eq!(result.audit_event.action.name, "SetDateAvailability");
}

#[test]
fn test_patch_keeps_omitted_fields() {
    let state: CalendarState = CalendarState::new(vec![recorded_day()], 16);
    let command: CalendarCommand = CalendarCommand::SetDateAvailability {
        date: date!(2025 - 06 - 02),
        patch: AvailabilityPatch {
            season_type: Some(SeasonType::Peak),
            ..AvailabilityPatch::default()
        },
    };

    let result: CalendarResult =
        apply_calendar(&state, command, create_test_actor(), create_test_cause()).unwrap();

    let day: AvailabilityDay = result.updated_days[0];
    assert_eq!(day.available, 5);
    assert!(day.boma_blocked);
    assert_eq!(day.season_type, Some(SeasonType::Peak));
    assert!(result.audit_event.before.data.contains("available=5"));
}

#[test]
fn test_new_record_starts_at_max_capacity() {
    let state: CalendarState = CalendarState::new(Vec::new(), 12);
    let command: CalendarCommand = CalendarCommand::SetDateAvailability {
        date: date!(2025 - 07 - 01),
        patch: AvailabilityPatch {
            boma_blocked: Some(true),
            ..AvailabilityPatch::default()
        },
    };

    let result: CalendarResult =
        apply_calendar(&state, command, create_test_actor(), create_test_cause()).unwrap();

    assert_eq!(result.updated_days[0].available, 12);
    assert!(!result.updated_days[0].blocked);
}

#[test]
fn test_season_range_overrides_every_date() {
    let state: CalendarState = CalendarState::new(vec![recorded_day()], 16);
    let command: CalendarCommand = CalendarCommand::SetSeasonForRange {
        start: date!(2025 - 06 - 01),
        end: date!(2025 - 06 - 03),
        season_type: SeasonType::Peak,
    };

    let result: CalendarResult =
        apply_calendar(&state, command, create_test_actor(), create_test_cause()).unwrap();

    assert_eq!(result.updated_days.len(), 3);
    assert!(
        result
            .updated_days
            .iter()
            .all(|day| day.season_type == Some(SeasonType::Peak))
    );
    // Monday 2 June is computed off-peak but reports the override
    assert_eq!(season_for(date!(2025 - 06 - 02)), SeasonType::Offpeak);
    assert_eq!(result.updated_days[1].effective_season(), SeasonType::Peak);
    // The existing record only had its season changed
    assert_eq!(result.updated_days[1].available, 5);
    assert!(result.updated_days[1].boma_blocked);
    assert_eq!(result.updated_days[0].available, 16);
    assert!(
        result
            .audit_event
            .action
            .details
            .unwrap()
            .contains("Set 3 dates")
    );
}

#[test]
fn test_inverted_season_range_is_rejected() {
    let state: CalendarState = CalendarState::new(Vec::new(), 16);
    let command: CalendarCommand = CalendarCommand::SetSeasonForRange {
        start: date!(2025 - 06 - 03),
        end: date!(2025 - 06 - 01),
        season_type: SeasonType::Offpeak,
    };

    let result: Result<CalendarResult, CoreError> =
        apply_calendar(&state, command, create_test_actor(), create_test_cause());

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidDateRange {
            start: date!(2025 - 06 - 03),
            end: date!(2025 - 06 - 01),
        }))
    );
}
