pub mod config;
pub mod live;
pub mod simulate;

use std::path::Path;

use arstatus_core::Config;

/// Explicit config file if given, otherwise the user's config.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Config::load_from(path)?),
        None => Ok(Config::load_or_default()),
    }
}
