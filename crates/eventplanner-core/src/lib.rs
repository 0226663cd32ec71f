//! # Event Planner Core Library
//!
//! State management for a local event planner: users create, edit, list,
//! filter and complete events, and the collection is mirrored into a
//! local key-value slot between runs.
//!
//! ## Architecture
//!
//! - **Event Store**: a pure reducer over [`EventState`] driven by
//!   [`EventAction`]s
//! - **Validation**: a yes/no pre-dispatch check and a form validator with
//!   per-field errors
//! - **Cache**: a versioned snapshot of the collection in one [`KvStore`]
//!   slot, backed by SQLite or memory
//! - **Optimizer**: a wall-clock schedule trimming the collection to the
//!   most recently modified events
//!
//! ## Key Components
//!
//! - [`EventSession`]: owner of the state, runs transitions and observers
//! - [`EventCache`]: snapshot read/write with version checks
//! - [`Config`]: application configuration management

pub mod cache;
pub mod clock;
pub mod error;
pub mod event;
pub mod optimizer;
pub mod session;
pub mod storage;
pub mod store;
pub mod validation;

pub use cache::{CacheRecord, EventCache, CACHE_KEY, CACHE_VERSION};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use event::{Event, EventDraft, EventStatus, NewEvent, StatusCounts, StatusFilter};
pub use optimizer::{spawn_optimizer, OptimizerHandle, OptimizerSchedule};
pub use session::{EventSession, SharedSession, TransitionObserver};
pub use storage::{Config, KvStore, MemoryStore, SqliteStore};
pub use store::{reduce, EventAction, EventState, MAX_CACHED_EVENTS};
pub use validation::{validate_event, validate_form};
