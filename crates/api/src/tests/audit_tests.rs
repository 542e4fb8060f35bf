// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    ADMIN_KEY, NOW, configure_admin_key, create_test_cause, create_test_persistence,
    submit_booking,
};
use crate::{
    ApiError, AuditEventInfo, AuditLogQuery, AuditLogResponse, BookingInfo,
    SetMaxCapacityRequest, UpdateStatusRequest, get_audit_log, set_max_capacity,
    update_status,
};
use sibon_persistence::Persistence;

fn actions(response: &AuditLogResponse) -> Vec<&str> {
    response.events.iter().map(|e| e.action.as_str()).collect()
}

#[test]
fn test_every_mutation_is_audited() {
    let mut persistence: Persistence = create_test_persistence();
    let booking: BookingInfo =
        submit_booking(&mut persistence, "B12", "2026-11-10", "2026-11-13", NOW);
    update_status(
        &mut persistence,
        None,
        booking.booking_id,
        &UpdateStatusRequest {
            status: String::from("approved"),
        },
        create_test_cause(),
        NOW,
    )
    .unwrap();
    set_max_capacity(
        &mut persistence,
        None,
        &SetMaxCapacityRequest { max_capacity: 14 },
        create_test_cause(),
        NOW,
    )
    .unwrap();

    let log: AuditLogResponse =
        get_audit_log(&mut persistence, None, &AuditLogQuery::default()).unwrap();

    assert_eq!(
        actions(&log),
        vec!["SubmitBooking", "TransitionStatus", "SetMaxCapacity"]
    );

    let submitted: &AuditEventInfo = &log.events[0];
    assert_eq!(submitted.booking_id, Some(booking.booking_id));
    assert_eq!(submitted.actor_type, "visitor");
    assert_eq!(submitted.cause_id, "api-req-456");
    assert_eq!(submitted.created_at, "2026-10-16T09:00:00Z");

    let transitioned: &AuditEventInfo = &log.events[1];
    assert_eq!(transitioned.booking_id, Some(booking.booking_id));
    assert_eq!(transitioned.actor_type, "admin");

    assert_eq!(log.events[2].booking_id, None);
}

#[test]
fn test_audit_log_filters_by_booking() {
    let mut persistence: Persistence = create_test_persistence();
    let first: BookingInfo =
        submit_booking(&mut persistence, "B1", "2026-11-10", "2026-11-13", NOW);
    submit_booking(&mut persistence, "B2", "2026-11-10", "2026-11-13", NOW);

    let log: AuditLogResponse = get_audit_log(
        &mut persistence,
        None,
        &AuditLogQuery {
            booking_id: Some(first.booking_id),
        },
    )
    .unwrap();

    assert_eq!(log.events.len(), 1);
    assert_eq!(log.events[0].booking_id, Some(first.booking_id));
}

#[test]
fn test_failed_mutation_leaves_no_audit_event() {
    let mut persistence: Persistence = create_test_persistence();
    let booking: BookingInfo =
        submit_booking(&mut persistence, "B12", "2026-11-10", "2026-11-13", NOW);

    let skipped: Result<_, ApiError> = update_status(
        &mut persistence,
        None,
        booking.booking_id,
        &UpdateStatusRequest {
            status: String::from("confirmed"),
        },
        create_test_cause(),
        NOW,
    );
    assert!(skipped.is_err());

    let log: AuditLogResponse =
        get_audit_log(&mut persistence, None, &AuditLogQuery::default()).unwrap();
    assert_eq!(actions(&log), vec!["SubmitBooking"]);
}

#[test]
fn test_audit_log_is_admin_gated() {
    let mut persistence: Persistence = create_test_persistence();
    configure_admin_key(&mut persistence);

    let denied: Result<_, ApiError> =
        get_audit_log(&mut persistence, None, &AuditLogQuery::default());
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    let log: AuditLogResponse =
        get_audit_log(&mut persistence, Some(ADMIN_KEY), &AuditLogQuery::default()).unwrap();
    assert_eq!(actions(&log), vec!["ConfigureAdminKey"]);
    // The hash never reaches the log
    assert!(!log.events[0].after.contains("$2"));
}
