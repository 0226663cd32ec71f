//! Event session: the single owner of the in-memory event state.
//!
//! The session runs each action through the reducer, then hands the new
//! snapshot to its cache and any registered [`TransitionObserver`]s. The
//! caller drives periodic optimization by calling [`EventSession::tick`]
//! (or by spawning [`crate::optimizer::spawn_optimizer`]).
//!
//! ## Usage
//!
//! ```ignore
//! let cache = EventCache::new(SqliteStore::open_default()?);
//! let mut session = EventSession::new(cache, Arc::new(SystemClock));
//! session.load();
//! session.add_event(NewEvent::new("Team Sync", "2026-10-20", "09:30", "Room 2"));
//! // In a loop:
//! session.tick(); // optimizes the collection when due
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

use crate::cache::EventCache;
use crate::clock::Clock;
use crate::error::ValidationError;
use crate::event::{Event, EventDraft, NewEvent};
use crate::optimizer::{OptimizerSchedule, DEFAULT_OPTIMIZE_INTERVAL};
use crate::storage::KvStore;
use crate::store::{reduce, EventAction, EventState};
use crate::validation;

/// Hook invoked with the new state after every applied transition.
pub trait TransitionObserver: Send {
    fn on_transition(&self, action: &'static str, state: &EventState);
}

impl<S: KvStore> TransitionObserver for EventCache<S> {
    fn on_transition(&self, _action: &'static str, state: &EventState) {
        self.sync(&state.events);
    }
}

/// A session shared with a background optimizer task.
pub type SharedSession<S> = Arc<Mutex<EventSession<S>>>;

/// Owner of the canonical [`EventState`].
pub struct EventSession<S> {
    state: EventState,
    cache: EventCache<S>,
    clock: Arc<dyn Clock>,
    optimizer: OptimizerSchedule,
    observers: Vec<Box<dyn TransitionObserver>>,
}

impl<S: KvStore> EventSession<S> {
    /// Create a session in the loading state.
    pub fn new(cache: EventCache<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: EventState::new(clock.now_ms()),
            cache,
            clock,
            optimizer: OptimizerSchedule::new(DEFAULT_OPTIMIZE_INTERVAL),
            observers: Vec::new(),
        }
    }

    pub fn with_optimize_interval(mut self, interval: Duration) -> Self {
        self.optimizer = OptimizerSchedule::new(interval);
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn TransitionObserver>) {
        self.observers.push(observer);
    }

    pub fn into_shared(self) -> SharedSession<S> {
        Arc::new(Mutex::new(self))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &EventState {
        &self.state
    }

    pub fn cache(&self) -> &EventCache<S> {
        &self.cache
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn optimizer(&self) -> &OptimizerSchedule {
        &self.optimizer
    }

    pub fn into_cache(self) -> EventCache<S> {
        self.cache
    }

    /// Lightweight yes/no check, see [`validation::validate_event`].
    pub fn validate_event(&self, draft: &EventDraft) -> bool {
        validation::validate_event(draft, self.clock.as_ref())
    }

    /// Field-level check, see [`validation::validate_form`].
    ///
    /// # Errors
    /// Returns one error per failing field.
    pub fn validate_form(&self, draft: &EventDraft) -> Result<(), Vec<ValidationError>> {
        validation::validate_form(draft, self.clock.as_ref())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Seed the state from the cache. Completes loading even when the
    /// cache is empty or unreadable.
    pub fn load(&mut self) -> &EventState {
        let events = self.cache.initialize();
        info!(count = events.len(), "initial load complete");
        self.dispatch(EventAction::LoadEvents(events))
    }

    /// Apply `action`, then notify the cache and observers.
    ///
    /// Observers are skipped while the initial load is pending and for
    /// unknown actions.
    pub fn dispatch(&mut self, action: EventAction) -> &EventState {
        if matches!(action, EventAction::Unknown) {
            debug!("ignoring unknown action");
            return &self.state;
        }

        let name = action.name();
        let previous = std::mem::replace(&mut self.state, EventState::new(0));
        self.state = reduce(previous, action, self.clock.as_ref());
        debug!(action = name, count = self.state.len(), "transition applied");

        if !self.state.loading {
            self.cache.on_transition(name, &self.state);
            for observer in &self.observers {
                observer.on_transition(name, &self.state);
            }
        }
        &self.state
    }

    /// Add an event and return it as stored.
    pub fn add_event(&mut self, event: NewEvent) -> Option<&Event> {
        self.dispatch(EventAction::AddEvent(event));
        self.state.events.last()
    }

    /// Replace an event. Returns `false` if no event has that id.
    pub fn update_event(&mut self, event: Event) -> bool {
        let found = self.state.find(&event.id).is_some();
        self.dispatch(EventAction::UpdateEvent(event));
        found
    }

    /// Returns `false` if no event has that id.
    pub fn delete_event(&mut self, id: &str) -> bool {
        let found = self.state.find(id).is_some();
        self.dispatch(EventAction::DeleteEvent(id.to_string()));
        found
    }

    /// Returns `false` if no event has that id.
    pub fn mark_completed(&mut self, id: &str) -> bool {
        let found = self.state.find(id).is_some();
        self.dispatch(EventAction::MarkCompleted(id.to_string()));
        found
    }

    /// Returns `false` if no event has that id.
    pub fn mark_pending(&mut self, id: &str) -> bool {
        let found = self.state.find(id).is_some();
        self.dispatch(EventAction::MarkPending(id.to_string()));
        found
    }

    pub fn optimize_now(&mut self) -> &EventState {
        self.dispatch(EventAction::OptimizeCache)
    }

    // ── Optimizer ────────────────────────────────────────────────────

    pub fn start_optimizer(&mut self) {
        self.optimizer.start(self.clock.now_ms());
        info!(
            interval_ms = self.optimizer.interval_ms(),
            "cache optimizer started"
        );
    }

    pub fn stop_optimizer(&mut self) {
        if self.optimizer.is_running() {
            self.optimizer.stop();
            info!("cache optimizer stopped");
        }
    }

    /// Run the optimizer if its interval has elapsed.
    ///
    /// Returns `true` when an optimization was dispatched.
    pub fn tick(&mut self) -> bool {
        if !self.optimizer.poll(self.clock.now_ms()) {
            return false;
        }
        let before = self.state.len();
        self.dispatch(EventAction::OptimizeCache);
        info!(before, after = self.state.len(), "cache optimized");
        true
    }
}
