//! Event validation.
//!
//! Two validators share the same rules:
//! - [`validate_event`] answers yes/no and never fails to the caller.
//! - [`schema::validate_form`] reports every failing field, adding upper
//!   bounds on name and location, for form submission.

pub mod schema;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::debug;

use crate::clock::Clock;
use crate::error::ValidationError;
use crate::event::EventDraft;

pub use schema::validate_form;

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 100;
pub const LOCATION_MIN: usize = 3;
pub const LOCATION_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 500;

/// Check a draft before it is dispatched.
///
/// Returns `false` on the first failing rule; the reason is logged at
/// debug level only.
pub fn validate_event(draft: &EventDraft, clock: &dyn Clock) -> bool {
    match check_event(draft, clock.now()) {
        Ok(()) => true,
        Err(err) => {
            debug!(field = err.field(), "Event validation failed: {err}");
            false
        }
    }
}

fn check_event(draft: &EventDraft, now: DateTime<Utc>) -> Result<(), ValidationError> {
    let name = draft.name.as_deref().unwrap_or_default();
    if name.trim().chars().count() < NAME_MIN {
        return Err(ValidationError::TooShort {
            field: "name".into(),
            min: NAME_MIN,
        });
    }

    if let Some(date) = non_empty(draft.date.as_deref()) {
        let parsed = parse_event_date(date).ok_or_else(|| ValidationError::InvalidValue {
            field: "date".into(),
            message: format!("'{date}' is not a valid date"),
        })?;
        if parsed < now {
            return Err(ValidationError::DateInPast);
        }
    }

    if let Some(time) = non_empty(draft.time.as_deref()) {
        if parse_hours_minutes(time).is_none() {
            return Err(ValidationError::InvalidValue {
                field: "time".into(),
                message: format!("'{time}' is not a valid HH:MM time"),
            });
        }
    }

    let location = draft.location.as_deref().unwrap_or_default();
    if location.trim().chars().count() < LOCATION_MIN {
        return Err(ValidationError::TooShort {
            field: "location".into(),
            min: LOCATION_MIN,
        });
    }

    if let Some(description) = non_empty(draft.description.as_deref()) {
        if description.trim().chars().count() > DESCRIPTION_MAX {
            return Err(ValidationError::TooLong {
                field: "description".into(),
                max: DESCRIPTION_MAX,
            });
        }
    }

    Ok(())
}

/// Empty optional fields count as absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Parse an event date.
///
/// Plain `YYYY-MM-DD` dates are taken as UTC midnight; full RFC 3339
/// timestamps are accepted as well.
pub fn parse_event_date(date: &str) -> Option<DateTime<Utc>> {
    let date = date.trim();
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        let midnight = day.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight));
    }
    DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Split `H:M` into numeric hours and minutes within the 24h range.
fn parse_hours_minutes(time: &str) -> Option<(u32, u32)> {
    let (hours, minutes) = time.split_once(':')?;
    if minutes.contains(':') {
        return None;
    }
    let hours = parse_digits(hours)?;
    let minutes = parse_digits(minutes)?;
    (hours <= 23 && minutes <= 59).then_some((hours, minutes))
}

fn parse_digits(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
