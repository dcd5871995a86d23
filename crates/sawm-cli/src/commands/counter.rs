use clap::Subcommand;
use sawm_core::{CounterState, Event, ValidationError};
use serde::Serialize;

use crate::app::{print_events, print_json, App, CliResult};

#[derive(Subcommand)]
pub enum CounterAction {
    /// Count one or more repetitions
    Tap {
        #[arg(default_value = "1")]
        times: u32,
    },
    /// Commit the current count (unless already committed) and start over
    Reset,
    /// Switch to another ritual
    Switch {
        /// Ritual id, see `sawm rituals`
        id: String,
    },
    /// Print the live session
    Status,
    /// Print committed entries
    History,
}

#[derive(Serialize)]
struct SessionView<'a> {
    ritual_id: &'a str,
    name: Option<&'a str>,
    count: u32,
    goal: u32,
    progress: f64,
    goal_reached: bool,
    state: CounterState,
    total_count: u64,
}

pub fn run(action: CounterAction) -> CliResult {
    let mut app = App::open()?;

    match action {
        CounterAction::Status => {
            let session = app.load_session()?;
            let view = SessionView {
                ritual_id: session.ritual_id(),
                name: app
                    .catalog
                    .ritual(session.ritual_id())
                    .map(|r| r.name.as_str()),
                count: session.count(),
                goal: session.goal(),
                progress: session.progress(),
                goal_reached: session.goal_reached(),
                state: session.state(),
                total_count: app.store.get().total_count,
            };
            print_json(&view)
        }
        CounterAction::History => print_json(&app.store.get().counter_history),
        action => {
            let events = update(&mut app, action)?;
            print_events(&events)
        }
    }
}

/// Apply a tap, reset or switch and settle badges.
///
/// The session is saved as soon as its transition lands, before any badge
/// write, so a failure there cannot roll the session back behind a commit.
fn update(app: &mut App, action: CounterAction) -> CliResult<Vec<Event>> {
    let mut session = app.load_session()?;
    let today = app.clock().today();

    let mut events = match action {
        CounterAction::Tap { times } => {
            // Keep the goal event and the final tap, not every tap.
            let mut events = Vec::new();
            let mut last = None;
            for _ in 0..times {
                match session.tap(&mut app.store, today)? {
                    event @ Event::GoalReached { .. } => {
                        events.push(event);
                        last = None;
                    }
                    event => last = Some(event),
                }
            }
            events.extend(last);
            events
        }
        CounterAction::Reset => vec![session.reset(&mut app.store, today)?],
        CounterAction::Switch { id } => {
            let ritual = app
                .catalog
                .ritual(&id)
                .cloned()
                .ok_or(ValidationError::UnknownRitual(id))?;
            vec![session.switch_ritual(&mut app.store, &ritual, today)?]
        }
        CounterAction::Status | CounterAction::History => Vec::new(),
    };

    app.save_session(&session)?;
    events.extend(app.settle_badges()?);
    Ok(events)
}
