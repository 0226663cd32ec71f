//! Versioned event snapshot kept in a single key-value slot.
//!
//! The slot is a best-effort mirror of the in-memory store: it seeds the
//! state at startup and is overwritten after every transition. Read and
//! write failures are logged and never reach the caller.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::CoreError;
use crate::event::Event;
use crate::storage::KvStore;

/// Default slot name.
pub const CACHE_KEY: &str = "event_planner_cache";
/// Format version written to and expected from the slot.
pub const CACHE_VERSION: &str = "1.0";

/// Wrapper record stored in the slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord<T> {
    pub version: String,
    /// Unix timestamp in milliseconds of the write
    pub timestamp: i64,
    pub data: T,
}

/// Reads and writes the event snapshot slot of a [`KvStore`].
pub struct EventCache<S> {
    store: S,
    key: String,
    clock: Arc<dyn Clock>,
}

impl<S: KvStore> EventCache<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, CACHE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read the cached events.
    ///
    /// Returns an empty collection when the slot is absent, unreadable,
    /// or written by another format version (the slot is evicted then).
    pub fn initialize(&self) -> Vec<Event> {
        match self.try_initialize() {
            Ok(events) => events,
            Err(e) => {
                error!(key = %self.key, "Cache initialization failed: {e}");
                Vec::new()
            }
        }
    }

    fn try_initialize(&self) -> Result<Vec<Event>, CoreError> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "cache slot empty");
            return Ok(Vec::new());
        };

        let mut record: serde_json::Value = serde_json::from_str(&raw)?;
        let version = record.get("version").cloned().unwrap_or_default();
        if version.as_str() != Some(CACHE_VERSION) {
            warn!(
                key = %self.key,
                found = %version,
                expected = CACHE_VERSION,
                "cache version mismatch, evicting slot"
            );
            self.store.remove(&self.key)?;
            return Ok(Vec::new());
        }

        let data = record
            .get_mut("data")
            .map(serde_json::Value::take)
            .unwrap_or_default();
        let events: Vec<Event> = serde_json::from_value(data)?;
        info!(key = %self.key, count = events.len(), "loaded events from cache");
        Ok(events)
    }

    /// Overwrite the slot with `events`.
    ///
    /// Failures (quota, serialization, store errors) are logged and dropped.
    pub fn sync(&self, events: &[Event]) {
        if let Err(e) = self.try_sync(events) {
            error!(key = %self.key, count = events.len(), "Cache sync failed: {e}");
        }
    }

    fn try_sync(&self, events: &[Event]) -> Result<(), CoreError> {
        let record = CacheRecord {
            version: CACHE_VERSION.to_string(),
            timestamp: self.clock.now_ms(),
            data: events,
        };
        let json = serde_json::to_string(&record)?;
        self.store.set(&self.key, &json)?;
        debug!(key = %self.key, count = events.len(), bytes = json.len(), "synced cache");
        Ok(())
    }

    /// The stored record as-is, without version checks.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or the slot is not JSON.
    pub fn read_record(&self) -> Result<Option<CacheRecord<serde_json::Value>>, CoreError> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Remove the slot. Returns whether it existed.
    ///
    /// # Errors
    /// Returns an error if the store rejects the removal.
    pub fn clear(&self) -> Result<bool, CoreError> {
        Ok(self.store.remove(&self.key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::event::EventStatus;
    use crate::storage::{MemoryStore, SqliteStore};

    const T0: i64 = 1_790_000_000_000;

    fn events() -> Vec<Event> {
        vec![
            Event {
                id: "a1".to_string(),
                name: "Launch Party".to_string(),
                date: "2026-11-02".to_string(),
                time: "19:00".to_string(),
                location: "Rooftop".to_string(),
                description: "Bring snacks".to_string(),
                status: EventStatus::Pending,
                last_modified: T0,
                version: 1,
            },
            Event {
                id: "b2".to_string(),
                name: "Retro".to_string(),
                date: "2026-11-03".to_string(),
                time: "10:15".to_string(),
                location: "Room 4".to_string(),
                description: String::new(),
                status: EventStatus::Completed,
                last_modified: T0 + 5,
                version: 4,
            },
        ]
    }

    fn cache(store: MemoryStore) -> EventCache<MemoryStore> {
        EventCache::new(store).with_clock(Arc::new(ManualClock::new(T0)))
    }

    #[test]
    fn empty_slot_yields_empty_collection() {
        let cache = cache(MemoryStore::new());
        assert!(cache.initialize().is_empty());
    }

    #[test]
    fn sync_then_initialize_round_trips() {
        let cache = cache(MemoryStore::new());
        cache.sync(&events());
        assert_eq!(cache.initialize(), events());
    }

    #[test]
    fn sqlite_round_trip() {
        let cache = EventCache::new(SqliteStore::open_memory().unwrap());
        cache.sync(&events());
        assert_eq!(cache.initialize(), events());
    }

    #[test]
    fn writes_versioned_wrapper() {
        let cache = cache(MemoryStore::new());
        cache.sync(&events());
        let raw = cache.store().get(CACHE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["timestamp"], T0);
        assert_eq!(json["data"][1]["lastModified"], T0 + 5);

        let record = cache.read_record().unwrap().unwrap();
        assert_eq!(record.version, CACHE_VERSION);
        assert_eq!(record.data.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn version_mismatch_evicts_slot() {
        let cache = cache(MemoryStore::new());
        cache
            .store()
            .set(CACHE_KEY, r#"{"version":"0.9","timestamp":1,"data":[]}"#)
            .unwrap();
        assert!(cache.initialize().is_empty());
        assert!(cache.store().get(CACHE_KEY).unwrap().is_none());
    }

    #[test]
    fn missing_version_evicts_slot() {
        let cache = cache(MemoryStore::new());
        cache.store().set(CACHE_KEY, r#"{"data":[]}"#).unwrap();
        assert!(cache.initialize().is_empty());
        assert!(cache.store().get(CACHE_KEY).unwrap().is_none());
    }

    #[test]
    fn corrupt_slot_yields_empty_and_is_kept() {
        let cache = cache(MemoryStore::new());
        cache.store().set(CACHE_KEY, "{not json").unwrap();
        assert!(cache.initialize().is_empty());
        assert!(cache.store().get(CACHE_KEY).unwrap().is_some());
    }

    #[test]
    fn malformed_events_yield_empty() {
        let cache = cache(MemoryStore::new());
        cache
            .store()
            .set(CACHE_KEY, r#"{"version":"1.0","timestamp":1,"data":[{"id":3}]}"#)
            .unwrap();
        assert!(cache.initialize().is_empty());
    }

    #[test]
    fn quota_failure_is_swallowed_and_keeps_previous_snapshot() {
        let cache = cache(MemoryStore::with_quota(600));
        cache.sync(&events()[..1]);
        let before = cache.store().get(CACHE_KEY).unwrap();
        assert!(before.is_some());

        let many: Vec<Event> = (0..20).flat_map(|_| events()).collect();
        cache.sync(&many);
        assert_eq!(cache.store().get(CACHE_KEY).unwrap(), before);
        assert_eq!(cache.initialize(), events()[..1].to_vec());
    }

    #[test]
    fn custom_key_and_clear() {
        let cache = EventCache::with_key(MemoryStore::new(), "other_slot");
        cache.sync(&events());
        assert!(cache.store().get(CACHE_KEY).unwrap().is_none());
        assert!(cache.clear().unwrap());
        assert!(!cache.clear().unwrap());
        assert!(cache.read_record().unwrap().is_none());
    }
}
