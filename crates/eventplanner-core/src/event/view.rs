//! Read-only views over an event collection.
//!
//! Storage order is insertion order; these helpers produce the
//! presentation order (most recently modified first).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{Event, EventStatus};

/// Status tab selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => event.status == EventStatus::Pending,
            StatusFilter::Completed => event.status == EventStatus::Completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown filter: {other} (expected all, pending or completed)")),
        }
    }
}

/// Events matching `filter`, most recently modified first.
///
/// Events with equal `last_modified` keep their storage order.
pub fn filter_events<'a>(events: &'a [Event], filter: StatusFilter) -> Vec<&'a Event> {
    let mut matching: Vec<&Event> = events.iter().filter(|e| filter.matches(e)).collect();
    matching.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    matching
}

/// Number of events per status tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn from_events(events: &[Event]) -> Self {
        events.iter().fold(Self::default(), |mut acc, event| {
            acc.all += 1;
            match event.status {
                EventStatus::Pending => acc.pending += 1,
                EventStatus::Completed => acc.completed += 1,
            }
            acc
        })
    }

    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Pending => self.pending,
            StatusFilter::Completed => self.completed,
        }
    }
}
