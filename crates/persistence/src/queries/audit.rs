// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use sibon_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use time::OffsetDateTime;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData, from_millis};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// An audit event as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAuditEvent {
    /// The store-assigned event ID.
    pub event_id: i64,
    /// When the event was written.
    pub created_at: OffsetDateTime,
    /// The event itself.
    pub event: AuditEvent,
}

/// Diesel Queryable struct for audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    booking_id: Option<i64>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    created_at: i64,
}

impl AuditEventRow {
    fn into_recorded(self) -> Result<RecordedAuditEvent, PersistenceError> {
        let actor_data: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&self.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&self.action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        let mut event: AuditEvent = AuditEvent::new(
            Actor::new(actor_data.id, actor_data.actor_type),
            Cause::new(cause_data.id, cause_data.description),
            Action::new(action_data.name, action_data.details),
            StateSnapshot::new(before_data.data),
            StateSnapshot::new(after_data.data),
        );
        if let Some(booking_id) = self.booking_id {
            event = event.for_booking(booking_id);
        }

        Ok(RecordedAuditEvent {
            event_id: self.event_id,
            created_at: from_millis(self.created_at)?,
            event,
        })
    }
}

/// Lists audit events in the order they were written.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking_id` - When set, only events about this booking are returned
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn list_audit_events(
    conn: &mut SqliteConnection,
    booking_id: Option<i64>,
) -> Result<Vec<RecordedAuditEvent>, PersistenceError> {
    let mut query = audit_events::table
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.asc())
        .into_boxed::<Sqlite>();
    if let Some(id) = booking_id {
        query = query.filter(audit_events::booking_id.eq(id));
    }

    let rows: Vec<AuditEventRow> = query.load(conn)?;

    rows.into_iter().map(AuditEventRow::into_recorded).collect()
}
