mod config;
pub mod memory;
pub mod sqlite;

pub use config::{CacheConfig, Config, LogConfig, StorageConfig};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::error::{ConfigError, StoreError};

/// A string key-value store holding named slots.
///
/// Implementations are synchronous; a slot write either fully replaces the
/// previous value or fails.
pub trait KvStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a slot. Returns whether it existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

/// Returns the Event Planner data directory, creating it if needed.
///
/// `EVENT_PLANNER_HOME` overrides the location; otherwise
/// `~/.config/eventplanner[-dev]/` based on `EVENT_PLANNER_ENV`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("EVENT_PLANNER_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("EVENT_PLANNER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("eventplanner-dev")
            } else {
                base_dir.join("eventplanner")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
