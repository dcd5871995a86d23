mod config;
pub mod database;
mod memory;

pub use config::{
    Config, CounterConfig, LoggingConfig, ObservanceConfig, PrayerConfig, StreakConfig,
};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use tracing::warn;

use crate::error::{ConfigError, PersistenceError};
use crate::state::AppState;

/// A snapshot as it came back from durable storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredState {
    pub state: AppState,
    /// Write stamp of the snapshot; 0 if the store predates stamping.
    pub revision: u64,
}

/// Durable whole-snapshot storage for [`AppState`].
///
/// Implementations must apply writes in revision order: a save carrying a
/// revision lower than the stored one is refused with
/// [`PersistenceError::StaleRevision`] rather than overwriting it.
pub trait PersistentStore: Send {
    /// Load the last saved snapshot.
    ///
    /// Unreadable or malformed data is reported as `Ok(None)` so startup
    /// falls back to the default state.
    fn load(&self) -> Result<Option<StoredState>, PersistenceError>;

    /// Revision stamped on whatever is stored, readable or not. 0 when
    /// nothing is stored.
    fn stored_revision(&self) -> Result<u64, PersistenceError>;

    /// Replace the stored snapshot.
    fn save(&mut self, state: &AppState, revision: u64) -> Result<(), PersistenceError>;
}

/// Serialize a snapshot. Identical states always produce identical bytes.
pub fn encode_state(state: &AppState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(state)?)
}

/// Parse a stored snapshot, logging and discarding anything malformed.
pub fn decode_state(raw: &str) -> Option<AppState> {
    match serde_json::from_str::<AppState>(raw) {
        Ok(state) => Some(state),
        Err(e) => {
            warn!(error = %e, "discarding unreadable stored state");
            None
        }
    }
}

/// Returns the data directory.
///
/// `SAWM_DATA_DIR` wins if set; otherwise `~/.config/sawm[-dev]/`, where the
/// `-dev` suffix is chosen by `SAWM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SAWM_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("SAWM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("sawm-dev")
            } else {
                base_dir.join("sawm")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
