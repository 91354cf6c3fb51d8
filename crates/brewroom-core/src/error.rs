//! Core error types for brewroom-core.
//!
//! This module defines the error hierarchy using thiserror. Only
//! `SessionError` and `PlaybackError` ever reach a host during a session;
//! storage failures are recovered or logged where they happen.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for brewroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session state machine errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Persistence store errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Audio playback errors
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the session timer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Duration must be a positive number of seconds.
    #[error("Invalid session duration: {duration_secs}s (must be greater than zero)")]
    InvalidConfig { duration_secs: u64 },

    /// The duration cannot change while a session is counting down.
    #[error("Cannot reconfigure a running session")]
    SessionRunning,

    /// A restored timer whose fields contradict each other.
    #[error("Invalid session state: {0}")]
    InvalidState(String),
}

/// Persistence store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    /// A stored record could not be interpreted.
    #[error("Corrupt record under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// Record encoding failed
    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// A writer panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Audio playback errors. Surfaced to the host, never fatal to a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The audio file for a track is not present in the asset directory.
    #[error("Cannot find the music in directory: {filename}.mp3")]
    MissingAsset { filename: String },

    /// No track with this id exists in the library.
    #[error("Unknown track id: {0}")]
    UnknownTrack(u32),

    /// The playback engine refused or failed to play.
    #[error("Failed to play audio: {0}")]
    Engine(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
