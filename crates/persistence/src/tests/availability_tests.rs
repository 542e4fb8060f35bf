// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sibon_domain::{AvailabilityDay, SeasonType};
use time::macros::date;

use crate::{Persistence, PersistenceError};

fn blocked_day(date: time::Date) -> AvailabilityDay {
    AvailabilityDay {
        date,
        available: 0,
        blocked: true,
        boma_blocked: false,
        season_type: None,
    }
}

#[test]
fn test_range_query_is_inclusive_and_ordered() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let days: Vec<AvailabilityDay> = vec![
        blocked_day(date!(2026 - 07 - 01)),
        blocked_day(date!(2026 - 06 - 30)),
        blocked_day(date!(2026 - 06 - 01)),
        blocked_day(date!(2026 - 05 - 31)),
    ];

    let written: usize = persistence
        .transaction(|tx| tx.upsert_availability_days(&days))
        .unwrap();
    assert_eq!(written, 4);

    let june: Vec<AvailabilityDay> = persistence
        .availability_in_range(date!(2026 - 06 - 01), date!(2026 - 06 - 30))
        .unwrap();

    let dates: Vec<time::Date> = june.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date!(2026 - 06 - 01), date!(2026 - 06 - 30)]);
}

#[test]
fn test_upsert_replaces_existing_record() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let day: AvailabilityDay = blocked_day(date!(2026 - 06 - 02));

    persistence
        .transaction(|tx| tx.upsert_availability_days(&[day]))
        .unwrap();

    let reopened: AvailabilityDay = AvailabilityDay {
        available: 9,
        blocked: false,
        boma_blocked: true,
        season_type: Some(SeasonType::Peak),
        ..day
    };
    persistence
        .transaction(|tx| tx.upsert_availability_days(&[reopened]))
        .unwrap();

    let stored: Vec<AvailabilityDay> = persistence
        .availability_in_range(date!(2026 - 06 - 02), date!(2026 - 06 - 02))
        .unwrap();
    assert_eq!(stored, vec![reopened]);
}

#[test]
fn test_clearing_override_is_stored_as_null() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let peak: AvailabilityDay = AvailabilityDay {
        season_type: Some(SeasonType::Offpeak),
        ..AvailabilityDay::with_defaults(date!(2026 - 12 - 25), 16)
    };
    let computed: AvailabilityDay = AvailabilityDay {
        season_type: None,
        ..peak
    };

    persistence
        .transaction(|tx| -> Result<usize, PersistenceError> {
            tx.upsert_availability_days(&[peak])?;
            tx.upsert_availability_days(&[computed])
        })
        .unwrap();

    let stored: Vec<AvailabilityDay> = persistence
        .availability_in_range(date!(2026 - 12 - 25), date!(2026 - 12 - 25))
        .unwrap();
    assert_eq!(stored[0].season_type, None);
    assert_eq!(stored[0].effective_season(), SeasonType::Peak);
}
