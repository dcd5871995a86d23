use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sawm_core::{
    qibla_bearing, Countdown, CountdownLabel, CountdownResolver, DateKey, Dua, Event, Language,
    Location, NextPrayer, Progress, Ticker,
};
use serde::Serialize;

use crate::app::{clock_from_env, print_json, App, CliResult};

#[derive(Serialize)]
struct Status {
    date: DateKey,
    /// Day of the observance month, when today falls inside it.
    day: Option<i64>,
    location: Location,
    language: Language,
    fasted_today: bool,
    countdown: Option<Countdown>,
    /// Iftar dua while fasting, the suhoor intention otherwise.
    dua: Option<Dua>,
    next_prayer: Option<NextPrayer>,
    qibla_bearing: f64,
    progress: Progress,
    unlocked_badges: Vec<String>,
    newly_unlocked: Vec<Event>,
}

pub fn run() -> CliResult {
    let mut app = App::open()?;
    let now = app.clock().now();
    let today = app.clock().today();
    let state = app.store.get();

    let (countdown, next_prayer) = if app.has_provider() {
        let resolver = CountdownResolver::new(app.provider()?);
        (
            Some(resolver.resolve(&state.location, now)?),
            resolver.next_prayer(&state.location, now)?,
        )
    } else {
        (None, None)
    };

    let newly_unlocked = app.settle_badges()?;
    let period = app.config.observance_period();
    let status = Status {
        date: today,
        day: period
            .contains(today.date())
            .then(|| period.day_number(today.date())),
        location: state.location.clone(),
        language: state.language,
        fasted_today: app.store.is_fasting_day(&today),
        dua: countdown
            .as_ref()
            .map(|c| app.catalog.dua_for(c.label).clone()),
        countdown,
        next_prayer,
        qibla_bearing: qibla_bearing(&state.location),
        progress: app.store.progress(&app.catalog, today),
        unlocked_badges: app.store.get().unlocked_badges.iter().cloned().collect(),
        newly_unlocked,
    };
    print_json(&status)
}

fn label(label: CountdownLabel, language: Language) -> &'static str {
    match (label, language) {
        (CountdownLabel::UntilStart, Language::English) => "Sehri ends in",
        (CountdownLabel::UntilEnd, Language::English) => "Iftar in",
        (CountdownLabel::UntilStart, Language::Bengali) => "সেহরির বাকি",
        (CountdownLabel::UntilEnd, Language::Bengali) => "ইফতারের বাকি",
    }
}

/// Redraw the countdown once per second until Ctrl-C or `ticks` lines.
pub fn watch(ticks: Option<u64>) -> CliResult {
    let app = App::open()?;
    let resolver = CountdownResolver::new(app.provider()?);
    let state = app.store.get();
    let location = state.location.clone();
    let language = state.language;
    let clock = clock_from_env()?;

    let failure: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let failure_slot = Arc::clone(&failure);
    let mut remaining = ticks;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let ticker = Ticker::spawn(Duration::from_secs(1), move || {
            match resolver.resolve(&location, clock.now()) {
                Ok(countdown) => println!(
                    "{} | {} {} | {:.0}%",
                    location.name,
                    label(countdown.label, language),
                    countdown.remaining,
                    countdown.progress * 100.0
                ),
                Err(e) => {
                    if let Ok(mut slot) = failure_slot.lock() {
                        *slot = Some(e.to_string());
                    }
                    return ControlFlow::Break(());
                }
            }
            match remaining.as_mut() {
                Some(n) if *n <= 1 => ControlFlow::Break(()),
                Some(n) => {
                    *n -= 1;
                    ControlFlow::Continue(())
                }
                None => ControlFlow::Continue(()),
            }
        });
        tokio::select! {
            _ = ticker.join() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    });

    let failure = failure.lock().map(|slot| slot.clone()).unwrap_or_default();
    match failure {
        Some(message) => Err(message.into()),
        None => Ok(()),
    }
}
