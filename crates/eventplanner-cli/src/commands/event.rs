//! Event management commands for CLI.

use clap::Subcommand;
use eventplanner_core::event::filter_events;
use eventplanner_core::{EventDraft, NewEvent, StatusFilter, ValidationError};

use super::open_session;

#[derive(Subcommand)]
pub enum EventCommand {
    /// Create a new event
    Add {
        /// Event name
        name: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Time (HH:MM, 24h)
        #[arg(long)]
        time: String,
        /// Location
        #[arg(long)]
        location: String,
        /// Optional description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List events, most recently modified first
    List {
        /// Filter by status: all, pending or completed
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Number of events per status
    Counts,
    /// Get event details
    Get {
        /// Event ID
        id: String,
    },
    /// Update an event
    Update {
        /// Event ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New date
        #[arg(long)]
        date: Option<String>,
        /// New time
        #[arg(long)]
        time: Option<String>,
        /// New location
        #[arg(long)]
        location: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },
    /// Mark an event as completed
    Complete {
        /// Event ID
        id: String,
    },
    /// Mark an event as pending
    Pending {
        /// Event ID
        id: String,
    },
    /// Keep only the most recently modified events
    Optimize,
}

fn report(errors: &[ValidationError]) -> Box<dyn std::error::Error> {
    for err in errors {
        eprintln!("  {}: {err}", err.field());
    }
    format!("{} invalid field(s)", errors.len()).into()
}

pub fn run(action: EventCommand) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session()?;

    match action {
        EventCommand::Add {
            name,
            date,
            time,
            location,
            description,
        } => {
            let event = NewEvent::new(name, date, time, location).with_description(description);
            session
                .validate_form(&EventDraft::from(&event))
                .map_err(|errors| report(&errors))?;
            let created = session
                .add_event(event)
                .ok_or("event was not stored")?;
            println!("Event created: {}", created.id);
            println!("{}", serde_json::to_string_pretty(created)?);
        }
        EventCommand::List { status } => {
            let events = filter_events(&session.state().events, status);
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        EventCommand::Counts => {
            println!("{}", serde_json::to_string_pretty(&session.state().counts())?);
        }
        EventCommand::Get { id } => match session.state().find(&id) {
            Some(event) => println!("{}", serde_json::to_string_pretty(event)?),
            None => println!("Event not found: {id}"),
        },
        EventCommand::Update {
            id,
            name,
            date,
            time,
            location,
            description,
        } => {
            let mut event = session
                .state()
                .find(&id)
                .cloned()
                .ok_or(format!("Event not found: {id}"))?;

            if let Some(n) = name { event.name = n; }
            if let Some(d) = date { event.date = d; }
            if let Some(t) = time { event.time = t; }
            if let Some(l) = location { event.location = l; }
            if let Some(d) = description { event.description = d; }

            session
                .validate_form(&EventDraft::from(&event))
                .map_err(|errors| report(&errors))?;
            session.update_event(event);
            let updated = session
                .state()
                .find(&id)
                .ok_or(format!("Event not found: {id}"))?;
            println!("Event updated:");
            println!("{}", serde_json::to_string_pretty(updated)?);
        }
        EventCommand::Delete { id } => {
            if !session.delete_event(&id) {
                return Err(format!("Event not found: {id}").into());
            }
            println!("Event deleted: {id}");
        }
        EventCommand::Complete { id } => {
            if !session.mark_completed(&id) {
                return Err(format!("Event not found: {id}").into());
            }
            println!("Event completed: {id}");
        }
        EventCommand::Pending { id } => {
            if !session.mark_pending(&id) {
                return Err(format!("Event not found: {id}").into());
            }
            println!("Event pending: {id}");
        }
        EventCommand::Optimize => {
            let before = session.state().len();
            let after = session.optimize_now().len();
            println!("Optimized: {before} -> {after} events");
        }
    }
    Ok(())
}
