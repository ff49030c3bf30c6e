//! Core error types for arstatus-core.
//!
//! The scheduling engine itself is total: showing, scheduling and cancelling
//! never fail. Errors only come from the edges -- loading configuration and
//! scenario files from disk.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for arstatus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scenario-related errors
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to locate or create the configuration directory
    #[error("Cannot access configuration directory {path}: {message}")]
    DirUnavailable { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dotted key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Scenario validation errors.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// The run ends before its last step
    #[error("until_ms ({until_ms}) is earlier than the last step at {last_step_ms} ms")]
    EndsBeforeLastStep { until_ms: u64, last_step_ms: u64 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
