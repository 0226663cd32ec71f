//! Periodic cache optimization.
//!
//! [`OptimizerSchedule`] is a wall-clock schedule with no thread of its
//! own; [`EventSession::tick`] polls it. [`spawn_optimizer`] drives those
//! ticks from a tokio task for sessions shared behind a mutex.

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::session::SharedSession;
use crate::storage::KvStore;

/// Five minutes.
pub const DEFAULT_OPTIMIZE_INTERVAL: Duration = Duration::from_secs(300);

/// When the next optimization is due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerSchedule {
    interval_ms: i64,
    next_due_ms: Option<i64>,
}

impl OptimizerSchedule {
    /// A stopped schedule firing every `interval` once started.
    pub fn new(interval: Duration) -> Self {
        let interval_ms = i64::try_from(interval.as_millis()).unwrap_or(i64::MAX);
        Self {
            interval_ms: interval_ms.max(1),
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    pub fn next_due_ms(&self) -> Option<i64> {
        self.next_due_ms
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// First run is one interval after `now_ms`.
    pub fn start(&mut self, now_ms: i64) {
        self.next_due_ms = Some(now_ms.saturating_add(self.interval_ms));
    }

    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    /// Returns `true` if a run is due at `now_ms` and schedules the next.
    ///
    /// Missed intervals collapse into a single run.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }
        let missed = (now_ms - due) / self.interval_ms;
        self.next_due_ms = Some(due.saturating_add((missed + 1).saturating_mul(self.interval_ms)));
        true
    }
}

/// Handle to a running optimizer task. Dropping it stops the task.
#[derive(Debug)]
pub struct OptimizerHandle {
    task: JoinHandle<()>,
}

impl OptimizerHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Abort the task.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for OptimizerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start the session's optimizer schedule and poll it every `poll_every`.
///
/// Must be called from within a tokio runtime. The task ends when the
/// handle is stopped or dropped, or when the session mutex is poisoned.
pub fn spawn_optimizer<S>(session: SharedSession<S>, poll_every: Duration) -> OptimizerHandle
where
    S: KvStore + 'static,
{
    if let Ok(mut guard) = session.lock() {
        guard.start_optimizer();
    }

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let Ok(mut guard) = session.lock() else {
                warn!("session lock poisoned, optimizer exiting");
                break;
            };
            if !guard.optimizer().is_running() {
                debug!("optimizer stopped on session, exiting");
                break;
            }
            guard.tick();
        }
    });

    OptimizerHandle { task }
}

/// Stop both the session schedule and its driving task.
pub fn stop_optimizer<S: KvStore>(session: &SharedSession<S>, handle: OptimizerHandle) {
    handle.stop();
    if let Ok(mut guard) = session.lock() {
        guard.stop_optimizer();
    }
}
