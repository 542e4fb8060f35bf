// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// Actor type recorded for changes made with the admin key.
pub const ADMIN_ACTOR_TYPE: &str = "admin";

/// Actor type recorded for changes made by a visiting bungalow.
pub const VISITOR_ACTOR_TYPE: &str = "visitor";

/// Represents the entity performing an action.
///
/// An actor is either the lodge administrator or the bungalow that
/// submitted a booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (`"admin"` or `"visitor"`).
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Creates the actor used for admin-key authorized changes.
    #[must_use]
    pub fn admin() -> Self {
        Self::new(String::from("admin"), String::from(ADMIN_ACTOR_TYPE))
    }

    /// Creates an actor for the visitor acting on behalf of a bungalow.
    ///
    /// # Arguments
    ///
    /// * `bungalow_number` - The bungalow the visitor booked for
    #[must_use]
    pub fn visitor(bungalow_number: &str) -> Self {
        Self::new(
            format!("bungalow:{bungalow_number}"),
            String::from(VISITOR_ACTOR_TYPE),
        )
    }

    /// Returns true if this actor acted with the admin key.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.actor_type == ADMIN_ACTOR_TYPE
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated, usually the
/// API request that carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SubmitBooking`", "`TransitionStatus`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A textual snapshot of the affected record at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A one-line representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Snapshot used when the record did not exist on one side of the change.
    #[must_use]
    pub fn absent() -> Self {
        Self::new(String::from("none"))
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful mutation produces exactly one audit event, written in
/// the same transaction as the change it describes. Events that concern a
/// booking carry its id so the history of one booking can be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The booking this event concerns, if any.
    pub booking_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent` that is not tied to a booking.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            booking_id: None,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Returns this event scoped to a booking.
    ///
    /// New bookings only receive an id once stored, so the persistence
    /// layer attaches it after the insert.
    #[must_use]
    pub const fn for_booking(mut self, booking_id: i64) -> Self {
        self.booking_id = Some(booking_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_event() -> AuditEvent {
        AuditEvent::new(
            Actor::admin(),
            Cause::new(String::from("req-456"), String::from("Admin request")),
            Action::new(String::from("TransitionStatus"), None),
            StateSnapshot::new(String::from("status=pending")),
            StateSnapshot::new(String::from("status=approved")),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("user-123"), String::from("admin"));

        assert_eq!(actor.id, "user-123");
        assert_eq!(actor.actor_type, "admin");
    }

    #[test]
    fn test_admin_and_visitor_actors() {
        let admin: Actor = Actor::admin();
        let visitor: Actor = Actor::visitor("B12");

        assert!(admin.is_admin());
        assert!(!visitor.is_admin());
        assert_eq!(visitor.id, "bungalow:B12");
        assert_eq!(visitor.actor_type, VISITOR_ACTOR_TYPE);
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("SubmitBooking"),
            Some(String::from("bungalow B12")),
        );

        assert_eq!(action.name, "SubmitBooking");
        assert_eq!(action.details, Some(String::from("bungalow B12")));
    }

    #[test]
    fn test_absent_snapshot() {
        assert_eq!(StateSnapshot::absent().data, "none");
    }

    #[test]
    fn test_new_event_is_not_scoped_to_a_booking() {
        let event: AuditEvent = create_test_event();

        assert_eq!(event.booking_id, None);
        assert_eq!(event.action.name, "TransitionStatus");
        assert_eq!(event.before.data, "status=pending");
        assert_eq!(event.after.data, "status=approved");
    }

    #[test]
    fn test_for_booking_attaches_id_and_keeps_fields() {
        let event: AuditEvent = create_test_event();
        let scoped: AuditEvent = event.clone().for_booking(7);

        assert_eq!(scoped.booking_id, Some(7));
        assert_eq!(scoped.actor, event.actor);
        assert_eq!(scoped.cause, event.cause);
        assert_eq!(scoped.after, event.after);
        assert_ne!(scoped, event);
    }
}
