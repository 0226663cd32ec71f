//! Form-level validation with per-field errors.

use chrono::{DateTime, TimeZone, Utc};

use super::{
    parse_event_date, DESCRIPTION_MAX, LOCATION_MAX, LOCATION_MIN, NAME_MAX, NAME_MIN,
};
use crate::clock::Clock;
use crate::error::ValidationError;
use crate::event::{EventDraft, EventStatus};

/// Validate every field of a submitted form.
///
/// # Errors
/// Returns one [`ValidationError`] per failing field, in form order.
pub fn validate_form(draft: &EventDraft, clock: &dyn Clock) -> Result<(), Vec<ValidationError>> {
    let now = clock.now();
    let errors: Vec<ValidationError> = [
        check_length("name", draft.name.as_deref(), NAME_MIN, NAME_MAX),
        check_date(draft.date.as_deref(), now),
        check_time(draft.time.as_deref()),
        check_length("location", draft.location.as_deref(), LOCATION_MIN, LOCATION_MAX),
        check_description(draft.description.as_deref()),
        check_status(draft.status.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_length(
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) -> Option<ValidationError> {
    let Some(value) = value else {
        return Some(ValidationError::Missing { field: field.into() });
    };
    let len = value.chars().count();
    if len < min {
        Some(ValidationError::TooShort {
            field: field.into(),
            min,
        })
    } else if len > max {
        Some(ValidationError::TooLong {
            field: field.into(),
            max,
        })
    } else {
        None
    }
}

/// The date may be today; only days before the current one are rejected.
fn check_date(date: Option<&str>, now: DateTime<Utc>) -> Option<ValidationError> {
    let Some(date) = date else {
        return Some(ValidationError::Missing { field: "date".into() });
    };
    let Some(parsed) = parse_event_date(date) else {
        return Some(ValidationError::InvalidValue {
            field: "date".into(),
            message: format!("'{date}' is not a valid date"),
        });
    };
    let start_of_today = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .unwrap_or(now);
    (parsed < start_of_today).then_some(ValidationError::DateInPast)
}

fn check_time(time: Option<&str>) -> Option<ValidationError> {
    let Some(time) = time else {
        return Some(ValidationError::Missing { field: "time".into() });
    };
    if is_clock_time(time) {
        None
    } else {
        Some(ValidationError::InvalidValue {
            field: "time".into(),
            message: "Invalid time format".into(),
        })
    }
}

fn check_description(description: Option<&str>) -> Option<ValidationError> {
    let description = description?;
    (description.chars().count() > DESCRIPTION_MAX).then(|| ValidationError::TooLong {
        field: "description".into(),
        max: DESCRIPTION_MAX,
    })
}

fn check_status(status: Option<&str>) -> Option<ValidationError> {
    let status = status?;
    status
        .parse::<EventStatus>()
        .err()
        .map(|message| ValidationError::InvalidValue {
            field: "status".into(),
            message,
        })
}

/// `H:MM` or `HH:MM`, hours 0-23, minutes 00-59.
fn is_clock_time(time: &str) -> bool {
    let Some((hours, minutes)) = time.split_once(':') else {
        return false;
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(hours) || !digits(minutes) || hours.len() > 2 || minutes.len() != 2 {
        return false;
    }
    matches!(hours.parse::<u32>(), Ok(h) if h <= 23)
        && matches!(minutes.parse::<u32>(), Ok(m) if m <= 59)
}
