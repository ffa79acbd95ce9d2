//! Locating and loading the configuration file for the CLI.
//!
//! The file is read through [`cri_config::loader`], so anything it does not
//! set keeps the built-in default value.

use std::path::{Path, PathBuf};

use cri_config::loader::{load_plugin_config, load_plugin_config_without_defaults};
use cri_config::PluginConfig;
use tracing::{debug, error};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Resolve the configuration file path.
///
/// Uses `config_path` when given, otherwise `config.toml` in the current
/// directory.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}

/// Load the configuration file at `path`.
///
/// With `defaults` the file is layered over the built-in defaults; without it
/// the file must be complete on its own.
pub fn load_config(path: &Path, defaults: bool) -> Result<PluginConfig, Error> {
    debug!(message = "Loading configuration", path = ?path, defaults);

    let result = if defaults {
        load_plugin_config(path)
    } else {
        load_plugin_config_without_defaults(path)
    };
    result.map_err(|e| {
        error!(message = "Failed to load configuration", path = ?path, error = %e);
        Error::Load(e)
    })
}
