//! Per-invocation context shared by the commands.

use chrono::DateTime;
use sawm_core::storage::SqliteStore;
use sawm_core::{
    AppState, Catalog, Clock, Config, CounterSession, Event, FixedClock, StateStore, SystemClock,
    TimetableProvider, ValidationError,
};
use tracing::debug;

const SESSION_KEY: &str = "counter_session";

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub struct App {
    pub config: Config,
    pub catalog: Catalog,
    pub store: StateStore,
    /// Second connection to the same database for front-end kv state.
    kv: SqliteStore,
    clock: Box<dyn Clock>,
}

impl App {
    pub fn open() -> CliResult<Self> {
        let config = Config::load()?;
        let default_state = config
            .location
            .clone()
            .map(AppState::with_location)
            .unwrap_or_default();
        let store = StateStore::open(Box::new(SqliteStore::open()?), default_state)
            .with_recent_streak_gate(config.streak.require_recent);
        Ok(Self {
            catalog: Catalog::builtin(),
            store,
            kv: SqliteStore::open()?,
            clock: clock_from_env()?,
            config,
        })
    }

    /// Context over caller-supplied storage and clock, with default config.
    #[cfg(test)]
    pub fn in_memory(store: StateStore, kv: SqliteStore, clock: Box<dyn Clock>) -> Self {
        Self {
            config: Config::default(),
            catalog: Catalog::builtin(),
            store,
            kv,
            clock,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// The configured timetable. Countdown commands cannot run without one.
    pub fn provider(&self) -> CliResult<TimetableProvider> {
        match &self.config.prayer.timetable {
            Some(path) => Ok(TimetableProvider::load(path)?),
            None => Err("no prayer timetable configured; run `sawm config set prayer.timetable <path>`".into()),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.config.prayer.timetable.is_some()
    }

    /// The stored counter session, or a fresh one on the configured ritual.
    pub fn load_session(&self) -> CliResult<CounterSession> {
        let recommit = self.config.counter.recommit_on_switch;
        if let Some(json) = self.kv.kv_get(SESSION_KEY)? {
            match serde_json::from_str::<CounterSession>(&json) {
                Ok(session) => return Ok(session.with_recommit_on_switch(recommit)),
                Err(e) => debug!(error = %e, "discarding stored counter session"),
            }
        }
        let id = &self.config.counter.default_ritual;
        let ritual = self
            .catalog
            .ritual(id)
            .ok_or_else(|| ValidationError::UnknownRitual(id.clone()))?;
        Ok(CounterSession::new(ritual).with_recommit_on_switch(recommit))
    }

    pub fn save_session(&self, session: &CounterSession) -> CliResult {
        let json = serde_json::to_string(session)?;
        self.kv.kv_set(SESSION_KEY, &json)?;
        Ok(())
    }

    /// Unlock whatever the current numbers qualify for.
    pub fn settle_badges(&mut self) -> CliResult<Vec<Event>> {
        let today = self.clock.today();
        let unlocked = self.store.settle_badges(&self.catalog, today)?;
        Ok(unlocked
            .into_iter()
            .map(|badge_id| Event::BadgeUnlocked { badge_id })
            .collect())
    }
}

/// `SAWM_NOW` pins the clock to an RFC 3339 instant.
pub fn clock_from_env() -> CliResult<Box<dyn Clock>> {
    match std::env::var("SAWM_NOW") {
        Ok(raw) => {
            let now = DateTime::parse_from_rfc3339(&raw)
                .map_err(|e| format!("invalid SAWM_NOW '{raw}': {e}"))?;
            Ok(Box::new(FixedClock::new(now)))
        }
        Err(_) => Ok(Box::new(SystemClock)),
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_events(events: &[Event]) -> CliResult {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
