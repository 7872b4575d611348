//! Core error types for timecraft-core.
//!
//! The planner itself never fails: it degrades bad input into warnings and
//! always returns a plan. These errors cover the fallible edges around it:
//! parsing clock strings and day labels, loading configuration, and talking
//! to an external plan generator.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timecraft-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// External generator errors
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Config directory could not be determined or created
    #[error("Configuration directory unavailable: {0}")]
    NoConfigDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Clock string is not `HH:MM` within a day
    #[error("Invalid clock time '{0}': expected HH:MM between 00:00 and 24:00")]
    InvalidClock(String),

    /// Unknown weekday label
    #[error("Unknown day label '{0}': expected one of Mon, Tue, Wed, Thu, Fri, Sat, Sun")]
    UnknownDay(String),

    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange { start: String, end: String },

    /// Plan event failed a shape check
    #[error("Invalid event '{id}': {message}")]
    InvalidEvent { id: String, message: String },
}

/// Errors reported by an external plan generator.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Generator not configured or not reachable
    #[error("Generator unavailable: {0}")]
    Unavailable(String),

    /// Generator output was not a parseable plan
    #[error("Generator returned malformed output: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Generator output parsed but failed plan validation
    #[error("Generator returned an invalid plan: {0}")]
    Rejected(#[from] ValidationError),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
