//! In-process key-value store with an optional size quota.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::KvStore;
use crate::error::StoreError;

/// Key-value store kept in memory.
///
/// With a quota, the combined length of all keys and values may not
/// exceed `quota` bytes, the way browser local storage refuses writes
/// once its budget is spent.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.lock()
            .map(|slots| slots.iter().map(|(k, v)| k.len() + v.len()).sum())
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.slots.lock().map_err(|_| StoreError::Locked)
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut slots = self.lock()?;
        if let Some(quota) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("slot").unwrap().is_none());
        store.set("slot", "hello").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("hello"));
        assert!(store.remove("slot").unwrap());
        assert!(!store.remove("slot").unwrap());
        assert!(store.get("slot").unwrap().is_none());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let store = MemoryStore::with_quota(16);
        store.set("k", "small").unwrap();
        let err = store.set("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { quota: 16, .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn quota_counts_replaced_slot_once() {
        let store = MemoryStore::with_quota(10);
        store.set("k", "123456789").unwrap();
        store.set("k", "987654321").unwrap();
        assert_eq!(store.used_bytes(), 10);
    }
}
