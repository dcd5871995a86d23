//! # Sawm Core Library
//!
//! Core logic for the Sawm fasting companion: the daily fast countdown, the
//! fasting-day log and its streak, the dhikr counter, and achievement badges.
//! The `sawm` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **State**: a single [`AppState`] aggregate owned by [`StateStore`],
//!   written through to a [`PersistentStore`] after every transition
//! - **Countdown**: resolves "now" against prayer times into the next fast
//!   boundary
//! - **Counter**: a tap/reset/switch state machine that commits entries to the
//!   store
//! - **Storage**: SQLite snapshot persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`StateStore`]: validated transitions over the application state
//! - [`CountdownResolver`]: countdown to the start or end of today's fast
//! - [`CounterSession`]: the dhikr counter
//! - [`Catalog`]: built-in rituals, badges, duas and locations
//! - [`qibla_bearing`]: direction of prayer from the active location
//! - [`Config`]: application configuration management

pub mod badges;
pub mod catalog;
pub mod clock;
pub mod countdown;
pub mod counter;
pub mod error;
pub mod events;
pub mod observance;
pub mod prayer;
pub mod qibla;
pub mod state;
pub mod storage;
pub mod streak;
pub mod ticker;

pub use catalog::{Badge, BadgeKind, Catalog, Dua, RitualPreset};
pub use clock::{Clock, FixedClock, SystemClock};
pub use countdown::{Countdown, CountdownLabel, CountdownResolver, FastingWindow, NextPrayer, TimeRemaining};
pub use counter::{CounterSession, CounterState};
pub use error::{ConfigError, CoreError, PersistenceError, ProviderError, ValidationError};
pub use events::Event;
pub use observance::{ObservanceDay, ObservancePeriod};
pub use prayer::{Prayer, PrayerTimeProvider, PrayerTimes, TimetableProvider};
pub use qibla::qibla_bearing;
pub use state::{
    AppState, BadgeId, Coordinates, CounterEntry, CounterLedger, DateKey, Language, Location,
    Progress, SharedStateStore, StateStore,
};
pub use storage::{Config, MemoryStore, PersistentStore, SqliteStore, StoredState};
pub use ticker::Ticker;
