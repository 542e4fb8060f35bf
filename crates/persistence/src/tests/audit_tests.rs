// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sibon_audit::AuditEvent;

use super::{NOW, create_test_event};
use crate::{Persistence, PersistenceError, RecordedAuditEvent};

#[test]
fn test_audit_event_round_trips() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let event: AuditEvent = create_test_event("SetMaxCapacity");

    let event_id: i64 = persistence
        .transaction(|tx| tx.record_audit_event(&event, NOW))
        .unwrap();

    let recorded: Vec<RecordedAuditEvent> = persistence.audit_events(None).unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].event_id, event_id);
    assert_eq!(recorded[0].created_at, NOW);
    assert_eq!(recorded[0].event, event);
}

#[test]
fn test_audit_events_filter_by_booking() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    persistence
        .transaction(|tx| -> Result<(), PersistenceError> {
            tx.record_audit_event(&create_test_event("SetMaxCapacity"), NOW)?;
            tx.record_audit_event(&create_test_event("TransitionStatus").for_booking(3), NOW)?;
            tx.record_audit_event(&create_test_event("CompleteStay").for_booking(3), NOW)?;
            tx.record_audit_event(&create_test_event("RemoveBooking").for_booking(4), NOW)?;
            Ok(())
        })
        .unwrap();

    let names: Vec<String> = persistence
        .audit_events(Some(3))
        .unwrap()
        .into_iter()
        .map(|r| r.event.action.name)
        .collect();
    assert_eq!(names, vec!["TransitionStatus", "CompleteStay"]);

    assert_eq!(persistence.audit_events(None).unwrap().len(), 4);
    assert!(persistence.audit_events(Some(99)).unwrap().is_empty());
}

#[test]
fn test_audit_event_outlives_deleted_booking() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let stored = super::store_booking(
        &mut persistence,
        &super::create_test_booking(
            "B12",
            time::macros::date!(2026 - 12 - 24),
            time::macros::date!(2026 - 12 - 27),
            NOW,
        ),
    );
    let booking_id: i64 = stored.booking_id.unwrap();

    persistence
        .transaction(|tx| -> Result<(), PersistenceError> {
            tx.delete_booking(booking_id)?;
            tx.record_audit_event(
                &create_test_event("RemoveBooking").for_booking(booking_id),
                NOW,
            )?;
            Ok(())
        })
        .unwrap();

    assert_eq!(persistence.audit_events(Some(booking_id)).unwrap().len(), 1);
}
