pub mod cache;
pub mod config;
pub mod event;

use std::sync::Arc;

use eventplanner_core::{Config, EventCache, EventSession, SqliteStore, SystemClock};
use tracing::debug;

/// Open the configured cache slot.
pub fn open_cache(config: &Config) -> Result<EventCache<SqliteStore>, Box<dyn std::error::Error>> {
    let store = SqliteStore::open(config.database_path()?)?;
    Ok(EventCache::with_key(store, config.cache.key.clone()))
}

/// Open a session and seed it from the cache.
pub fn open_session() -> Result<EventSession<SqliteStore>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let cache = open_cache(&config)?;
    let mut session = EventSession::new(cache, Arc::new(SystemClock));
    session.load();
    debug!(events = session.state().len(), key = %config.cache.key, "session loaded");
    Ok(session)
}
