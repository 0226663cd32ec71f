//! Event types.
//!
//! The serialized shape of [`Event`] is the one stored in the cache slot,
//! so field names follow the persisted camelCase form.

pub mod view;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use view::{filter_events, StatusCounts, StatusFilter};

/// Completion status of an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Completed => "completed",
        }
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Pending
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EventStatus::Pending),
            "completed" => Ok(EventStatus::Completed),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A user-created calendar item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque unique identifier, assigned once on creation
    pub id: String,
    pub name: String,
    /// ISO-8601 date (`YYYY-MM-DD`)
    pub date: String,
    /// 24h `HH:MM`
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: EventStatus,
    /// Milliseconds since the Unix epoch of the last write
    pub last_modified: i64,
    /// Starts at 1, incremented on every mutation
    pub version: u64,
}

/// Payload of an add: every event field except the ones the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Ignored by the store; new events always start pending.
    #[serde(default)]
    pub status: EventStatus,
}

impl NewEvent {
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            time: time.into(),
            location: location.into(),
            description: String::new(),
            status: EventStatus::Pending,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A partially filled event, as submitted for validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl From<&NewEvent> for EventDraft {
    fn from(event: &NewEvent) -> Self {
        Self {
            name: Some(event.name.clone()),
            date: Some(event.date.clone()),
            time: Some(event.time.clone()),
            location: Some(event.location.clone()),
            description: Some(event.description.clone()),
            status: Some(event.status.to_string()),
        }
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            name: Some(event.name.clone()),
            date: Some(event.date.clone()),
            time: Some(event.time.clone()),
            location: Some(event.location.clone()),
            description: Some(event.description.clone()),
            status: Some(event.status.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        Event {
            id: "evt-1".to_string(),
            name: "Team Sync".to_string(),
            date: "2026-10-20".to_string(),
            time: "09:30".to_string(),
            location: "Room 2".to_string(),
            description: String::new(),
            status: EventStatus::Pending,
            last_modified: 1_700_000_000_000,
            version: 1,
        }
    }

    #[test]
    fn event_uses_camel_case_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["lastModified"], 1_700_000_000_000i64);
        assert_eq!(json["status"], "pending");
        assert!(json.get("last_modified").is_none());
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let json = r#"{
            "id": "a", "name": "Lunch", "date": "2026-10-20", "time": "12:00",
            "location": "Cafe", "status": "completed", "lastModified": 5, "version": 3
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.description, "");
        assert_eq!(event.status, EventStatus::Completed);
        assert_eq!(event.version, 3);
    }

    #[test]
    fn status_parses_from_lowercase() {
        assert_eq!("pending".parse::<EventStatus>().unwrap(), EventStatus::Pending);
        assert_eq!("completed".parse::<EventStatus>().unwrap(), EventStatus::Completed);
        assert!("done".parse::<EventStatus>().is_err());
    }

    #[test]
    fn draft_from_event_fills_every_field() {
        let draft = EventDraft::from(&sample());
        assert_eq!(draft.name.as_deref(), Some("Team Sync"));
        assert_eq!(draft.status.as_deref(), Some("pending"));
        assert_eq!(draft.description.as_deref(), Some(""));
    }
}
