//! Core error types for sawm-core.
//!
//! One thiserror enum per concern, folded into [`CoreError`] with `#[from]`
//! conversions so callers can use `?` across module boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sawm-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed input to a transition; state is unchanged.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Durable write or read failed; in-memory state is kept.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Prayer-time lookup failed.
    #[error("Prayer time error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// Counter entries must carry a positive count.
    #[error("counter entry for '{ritual_id}' has a zero count")]
    NonPositiveCount { ritual_id: String },

    /// Date keys are `YYYY-MM-DD`, zero padded.
    #[error("invalid date key '{0}', expected YYYY-MM-DD")]
    InvalidDateKey(String),

    #[error("unknown ritual '{0}'")]
    UnknownRitual(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing store refused the write.
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    /// A newer snapshot is already stored; the write was skipped.
    #[error("stale write at revision {attempted}; stored revision is {stored}")]
    StaleRevision { attempted: u64, stored: u64 },
}

/// Prayer-time provider errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("no prayer times for {latitude}, {longitude}")]
    UnsupportedLocation { latitude: f64, longitude: f64 },

    #[error("no prayer times for {0}")]
    MissingDate(chrono::NaiveDate),

    #[error("invalid time '{value}' for {date}")]
    InvalidTime { date: chrono::NaiveDate, value: String },

    #[error("Failed to read timetable {path}: {message}")]
    Timetable { path: PathBuf, message: String },

    #[error("Invalid timetable: {0}")]
    InvalidTimetable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Data directory could not be determined or created.
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
