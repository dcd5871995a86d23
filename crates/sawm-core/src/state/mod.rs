//! Persisted application state.
//!
//! [`AppState`] is the single aggregate written to the [`PersistentStore`]
//! after every transition. It is only ever mutated through [`StateStore`].
//!
//! [`PersistentStore`]: crate::storage::PersistentStore

mod date_key;
mod store;

pub use date_key::DateKey;
pub use store::{CounterLedger, Progress, SharedStateStore, StateStore};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::ValidationError;

pub type BadgeId = String;

/// A latitude/longitude pair handed to the prayer-time provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Active location. Replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Finite latitude in [-90, 90] and longitude in [-180, 180].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

/// Display language. Has no effect on any derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "bn")]
    Bengali,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Bengali => "bn",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::English),
            "bn" => Some(Language::Bengali),
            _ => None,
        }
    }
}

/// One committed counting session. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterEntry {
    pub date: DateKey,
    pub ritual_id: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub location: Location,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub fasting_log: BTreeSet<DateKey>,
    #[serde(default)]
    pub counter_history: Vec<CounterEntry>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub unlocked_badges: BTreeSet<BadgeId>,
}

impl AppState {
    /// First-run state at the given location.
    pub fn with_location(location: Location) -> Self {
        Self {
            location,
            language: Language::default(),
            fasting_log: BTreeSet::new(),
            counter_history: Vec::new(),
            total_count: 0,
            unlocked_badges: BTreeSet::new(),
        }
    }

    /// Sum of the history, the value `total_count` must always equal.
    pub fn history_total(&self) -> u64 {
        self.counter_history.iter().map(|e| u64::from(e.count)).sum()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_location(catalog::default_location())
    }
}
