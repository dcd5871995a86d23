//! The canonical owner of [`AppState`].
//!
//! Transitions validate, build a new snapshot, swap it in, then write the
//! snapshot through to the [`PersistentStore`]. A failed write is reported
//! but the in-memory change stays; [`StateStore::flush`] retries.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{AppState, BadgeId, CounterEntry, DateKey, Language, Location};
use crate::badges;
use crate::catalog::Catalog;
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::storage::PersistentStore;
use crate::streak;

/// A [`StateStore`] shared across threads. Every mutation goes through the
/// mutex, which keeps `total_count` consistent with the history.
pub type SharedStateStore = Arc<Mutex<StateStore>>;

/// Where committed counter entries go.
///
/// [`CounterSession`](crate::counter::CounterSession) commits through this
/// so it never needs to own application state.
pub trait CounterLedger {
    fn record_counter_entry(&mut self, entry: CounterEntry) -> Result<Event>;
}

/// Derived progress, computed from a snapshot on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub streak: u32,
    pub longest_streak: u32,
    pub total_count: u64,
    /// Badges the current numbers qualify for.
    pub qualifying_badges: BTreeSet<BadgeId>,
}

pub struct StateStore {
    state: Arc<AppState>,
    store: Box<dyn PersistentStore>,
    revision: u64,
    dirty: bool,
    require_recent_streak: bool,
}

impl StateStore {
    /// Load from `store`, or start from `default` when nothing readable is
    /// stored. Load failures fall back to the default as well.
    ///
    /// A discarded snapshot still counts: the store resumes at its revision,
    /// so the first transition replaces it.
    pub fn open(store: Box<dyn PersistentStore>, default: AppState) -> Self {
        let (state, revision) = match store.load() {
            Ok(Some(stored)) => {
                debug!(revision = stored.revision, "loaded stored state");
                (stored.state, stored.revision)
            }
            Ok(None) => {
                let revision = Self::discarded_revision(&*store);
                info!(revision, "no stored state, starting fresh");
                (default, revision)
            }
            Err(e) => {
                let revision = Self::discarded_revision(&*store);
                warn!(error = %e, revision, "failed to load stored state, starting fresh");
                (default, revision)
            }
        };
        Self {
            state: Arc::new(state),
            store,
            revision,
            dirty: false,
            require_recent_streak: false,
        }
    }

    /// Only count a streak whose latest day is today or yesterday.
    pub fn with_recent_streak_gate(mut self, enabled: bool) -> Self {
        self.require_recent_streak = enabled;
        self
    }

    pub fn into_shared(self) -> SharedStateStore {
        Arc::new(Mutex::new(self))
    }

    /// The current immutable snapshot.
    pub fn get(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Revision of the current snapshot. Bumped on every applied transition.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the current snapshot has not reached durable storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ── Transitions ──────────────────────────────────────────────────

    pub fn set_location(&mut self, location: Location) -> Result<Event> {
        location.validate()?;
        debug!(location = %location.name, "set location");
        self.apply(|s| s.location = location.clone())?;
        Ok(Event::LocationChanged { location })
    }

    pub fn set_language(&mut self, language: Language) -> Result<Event> {
        self.apply(|s| s.language = language)?;
        Ok(Event::LanguageChanged { language })
    }

    /// Flip membership of `date` in the fasting log.
    pub fn toggle_fasting_day(&mut self, date: DateKey) -> Result<Event> {
        let fasted = !self.state.fasting_log.contains(&date);
        debug!(%date, fasted, "toggle fasting day");
        self.apply(|s| {
            if fasted {
                s.fasting_log.insert(date);
            } else {
                s.fasting_log.remove(&date);
            }
        })?;
        Ok(Event::FastingDayToggled { date, fasted })
    }

    /// Append to the history and fold the count into the total.
    pub fn record_counter_entry(&mut self, entry: CounterEntry) -> Result<Event> {
        if entry.count == 0 {
            return Err(ValidationError::NonPositiveCount {
                ritual_id: entry.ritual_id,
            }
            .into());
        }
        let total_count = self.state.total_count + u64::from(entry.count);
        debug!(ritual = %entry.ritual_id, count = entry.count, total_count, "commit counter entry");
        self.apply(|s| {
            s.counter_history.push(entry.clone());
            s.total_count = total_count;
        })?;
        Ok(Event::CounterCommitted { entry, total_count })
    }

    /// Insert a badge. `None` when it was already unlocked (no write).
    pub fn unlock_badge(&mut self, badge_id: impl Into<BadgeId>) -> Result<Option<Event>> {
        let badge_id = badge_id.into();
        if self.state.unlocked_badges.contains(&badge_id) {
            return Ok(None);
        }
        info!(badge = %badge_id, "badge unlocked");
        self.apply(|s| {
            s.unlocked_badges.insert(badge_id.clone());
        })?;
        Ok(Some(Event::BadgeUnlocked { badge_id }))
    }

    /// Write the current snapshot again, e.g. after a `PersistenceError`.
    pub fn flush(&mut self) -> Result<()> {
        self.persist()
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn is_fasting_day(&self, date: &DateKey) -> bool {
        self.state.fasting_log.contains(date)
    }

    /// Streak over the current log, honouring the freshness gate if set.
    pub fn streak(&self, today: DateKey) -> u32 {
        if self.require_recent_streak {
            streak::streak_as_of(&self.state.fasting_log, today)
        } else {
            streak::streak(&self.state.fasting_log)
        }
    }

    pub fn progress(&self, catalog: &Catalog, today: DateKey) -> Progress {
        let streak = self.streak(today);
        Progress {
            streak,
            longest_streak: streak::longest_streak(&self.state.fasting_log),
            total_count: self.state.total_count,
            qualifying_badges: badges::evaluate(streak, self.state.total_count, catalog),
        }
    }

    /// Merge every qualifying badge into `unlocked_badges`.
    ///
    /// Returns the newly unlocked ids. Badges already held are kept even if
    /// they no longer qualify.
    pub fn settle_badges(&mut self, catalog: &Catalog, today: DateKey) -> Result<Vec<BadgeId>> {
        let qualifying = self.progress(catalog, today).qualifying_badges;
        let mut unlocked = Vec::new();
        for badge_id in qualifying {
            if self.unlock_badge(badge_id.clone())?.is_some() {
                unlocked.push(badge_id);
            }
        }
        Ok(unlocked)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn discarded_revision(store: &dyn PersistentStore) -> u64 {
        match store.stored_revision() {
            Ok(revision) => revision,
            Err(e) => {
                warn!(error = %e, "stored revision unreadable, starting at 0");
                0
            }
        }
    }

    fn apply(&mut self, mutate: impl FnOnce(&mut AppState)) -> Result<()> {
        let mut next = AppState::clone(&self.state);
        mutate(&mut next);
        self.state = Arc::new(next);
        self.revision += 1;
        self.dirty = true;
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        match self.store.save(&self.state, self.revision) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, revision = self.revision, "state write failed; keeping in-memory change");
                Err(CoreError::Persistence(e))
            }
        }
    }
}

impl CounterLedger for StateStore {
    fn record_counter_entry(&mut self, entry: CounterEntry) -> Result<Event> {
        StateStore::record_counter_entry(self, entry)
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
