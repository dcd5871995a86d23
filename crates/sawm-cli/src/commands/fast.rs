use clap::Subcommand;
use sawm_core::DateKey;
use serde::Serialize;

use crate::app::{print_events, print_json, App, CliResult};

#[derive(Subcommand)]
pub enum FastAction {
    /// Mark or unmark a day as fasted
    Toggle {
        /// YYYY-MM-DD; defaults to today
        date: Option<String>,
    },
    /// List logged fasting days
    List,
}

#[derive(Serialize)]
struct FastDay {
    date: DateKey,
    /// Day of the observance month; absent outside it.
    #[serde(skip_serializing_if = "Option::is_none")]
    day: Option<i64>,
}

#[derive(Serialize)]
struct FastLog {
    days: Vec<FastDay>,
    streak: u32,
    longest_streak: u32,
}

pub fn run(action: FastAction) -> CliResult {
    let mut app = App::open()?;

    match action {
        FastAction::Toggle { date } => {
            let date = match date {
                Some(raw) => raw.parse::<DateKey>()?,
                None => app.clock().today(),
            };
            let mut events = vec![app.store.toggle_fasting_day(date)?];
            events.extend(app.settle_badges()?);
            print_events(&events)?;
        }
        FastAction::List => {
            let period = app.config.observance_period();
            let today = app.clock().today();
            let progress = app.store.progress(&app.catalog, today);
            let log = FastLog {
                days: app
                    .store
                    .get()
                    .fasting_log
                    .iter()
                    .map(|date| FastDay {
                        date: *date,
                        day: period
                            .contains(date.date())
                            .then(|| period.day_number(date.date())),
                    })
                    .collect(),
                streak: progress.streak,
                longest_streak: progress.longest_streak,
            };
            print_json(&log)?;
        }
    }
    Ok(())
}
