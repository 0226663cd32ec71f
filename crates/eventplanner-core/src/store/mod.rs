//! Event store: state container and reducer.
//!
//! [`reduce`] is a pure state-transition function. It performs no I/O;
//! time comes from the supplied [`Clock`] and new ids from UUIDv4.
//!
//! ## Transitions
//!
//! ```text
//! AddEvent       -> append (pending, version 1)
//! UpdateEvent    -> replace fields, version + 1
//! DeleteEvent    -> remove
//! MarkCompleted  -> status completed, version + 1
//! MarkPending    -> status pending, version + 1
//! LoadEvents     -> replace collection, loading = false
//! OptimizeCache  -> keep the 100 most recently modified
//! Unknown        -> identity
//! ```
//!
//! Every known transition stamps `last_sync`, even when the target id
//! does not exist and the collection is left untouched.

#[cfg(test)]
mod reducer_tests;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::event::{Event, EventStatus, NewEvent, StatusCounts};

/// Number of events kept by [`EventAction::OptimizeCache`].
pub const MAX_CACHED_EVENTS: usize = 100;

/// In-memory event state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventState {
    /// Insertion-ordered collection
    pub events: Vec<Event>,
    /// True until the initial cache load completes
    pub loading: bool,
    pub error: Option<String>,
    /// Milliseconds since the Unix epoch of the last transition
    pub last_sync: i64,
}

impl EventState {
    /// Fresh state, waiting for the initial load.
    pub fn new(now_ms: i64) -> Self {
        Self {
            events: Vec::new(),
            loading: true,
            error: None,
            last_sync: now_ms,
        }
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::from_events(&self.events)
    }
}

/// An intent dispatched against the store.
///
/// Wire form is `{"type": "ADD_EVENT", "payload": ...}`; unrecognized
/// types deserialize to [`EventAction::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    AddEvent(NewEvent),
    UpdateEvent(Event),
    DeleteEvent(String),
    MarkCompleted(String),
    MarkPending(String),
    LoadEvents(Vec<Event>),
    OptimizeCache,
    #[serde(other)]
    Unknown,
}

impl EventAction {
    pub fn name(&self) -> &'static str {
        match self {
            EventAction::AddEvent(_) => "ADD_EVENT",
            EventAction::UpdateEvent(_) => "UPDATE_EVENT",
            EventAction::DeleteEvent(_) => "DELETE_EVENT",
            EventAction::MarkCompleted(_) => "MARK_COMPLETED",
            EventAction::MarkPending(_) => "MARK_PENDING",
            EventAction::LoadEvents(_) => "LOAD_EVENTS",
            EventAction::OptimizeCache => "OPTIMIZE_CACHE",
            EventAction::Unknown => "UNKNOWN",
        }
    }
}

/// Compute the next state from `state` and `action`.
pub fn reduce(mut state: EventState, action: EventAction, clock: &dyn Clock) -> EventState {
    let now = clock.now_ms();
    match action {
        EventAction::AddEvent(payload) => {
            state.events.push(Event {
                id: Uuid::new_v4().to_string(),
                name: payload.name,
                date: payload.date,
                time: payload.time,
                location: payload.location,
                description: payload.description,
                status: EventStatus::Pending,
                last_modified: now,
                version: 1,
            });
        }
        EventAction::UpdateEvent(payload) => {
            if let Some(event) = state.events.iter_mut().find(|e| e.id == payload.id) {
                let version = event.version.saturating_add(1);
                *event = Event {
                    last_modified: now,
                    version,
                    ..payload
                };
            }
        }
        EventAction::DeleteEvent(id) => {
            state.events.retain(|e| e.id != id);
        }
        EventAction::MarkCompleted(id) => set_status(&mut state, &id, EventStatus::Completed, now),
        EventAction::MarkPending(id) => set_status(&mut state, &id, EventStatus::Pending, now),
        EventAction::LoadEvents(events) => {
            state.events = events;
            state.loading = false;
        }
        EventAction::OptimizeCache => {
            optimize(&mut state.events, MAX_CACHED_EVENTS);
        }
        EventAction::Unknown => return state,
    }
    state.last_sync = now;
    state
}

/// Status changes bump the version even when the status is already set.
/// Versions saturate at `u64::MAX`.
fn set_status(state: &mut EventState, id: &str, status: EventStatus, now: i64) {
    if let Some(event) = state.events.iter_mut().find(|e| e.id == id) {
        event.status = status;
        event.last_modified = now;
        event.version = event.version.saturating_add(1);
    }
}

/// Keep the `limit` most recently modified events, newest first.
///
/// The sort is stable, so ties keep their previous relative order.
pub fn optimize(events: &mut Vec<Event>, limit: usize) {
    events.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    events.truncate(limit);
}
