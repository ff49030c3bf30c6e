mod config;

pub use config::{Config, DisplayConfig, TrackingConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/arstatus[-dev]/` based on ARSTATUS_ENV.
///
/// Set ARSTATUS_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ARSTATUS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("arstatus-dev")
    } else {
        base_dir.join("arstatus")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
