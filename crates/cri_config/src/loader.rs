//! Loading the plugin configuration from TOML.
//!
//! A configuration file only needs to name the settings it changes. The file
//! is parsed into a TOML table and merged over the built-in defaults: tables
//! are merged key by key, every other value in the file replaces the default.
//! Adding `[containerd.runtimes.kata]` therefore keeps the default `runc`
//! handler, while `cdi_spec_dirs = []` clears the default directories.
//!
//! # Examples
//!
//! ```rust
//! use cri_config::loader::parse_plugin_config;
//!
//! let config = parse_plugin_config(r#"
//!     [containerd.runtimes.kata]
//!     runtime_type = "io.containerd.kata.v2"
//! "#)?;
//!
//! assert!(config.containerd.runtimes.contains_key("runc"));
//! assert!(config.containerd.runtimes.contains_key("kata"));
//! # Ok::<(), cri_config::ConfigurationError>(())
//! ```

use crate::pipeline::validate_plugin_config;
use crate::plugin_config::PluginConfig;
use crate::{ConfigurationError, ConfigurationResult};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

/// Parse a configuration file's content layered over the built-in defaults.
///
/// # Errors
///
/// Returns `ConfigurationError::ParseError` if the content is not valid TOML
/// or does not match the configuration schema.
pub fn parse_plugin_config(content: &str) -> ConfigurationResult<PluginConfig> {
    let overrides = parse_table(content)?;

    let defaults = match toml::Value::try_from(PluginConfig::default_config()) {
        Ok(toml::Value::Table(table)) => table,
        Ok(other) => {
            return Err(ConfigurationError::ParseError {
                reason: format!("Default configuration is not a table: {}", other.type_str()),
            })
        }
        Err(e) => {
            return Err(ConfigurationError::ParseError {
                reason: format!("Failed to serialize default configuration: {}", e),
            })
        }
    };

    let merged = merge_tables(defaults, overrides);
    toml::Value::Table(merged)
        .try_into()
        .map_err(|e| ConfigurationError::ParseError {
            reason: format!("Failed to parse configuration: {}", e),
        })
}

/// Parse a configuration file's content on its own, without defaults.
///
/// Settings missing from the content are left zero-valued.
pub fn parse_plugin_config_without_defaults(content: &str) -> ConfigurationResult<PluginConfig> {
    toml::from_str(content).map_err(|e| ConfigurationError::ParseError {
        reason: e.to_string(),
    })
}

/// Read a configuration file and layer it over the built-in defaults.
///
/// # Errors
///
/// - `FileNotFound` if `path` does not exist
/// - `FileAccessError` if it cannot be read
/// - `ParseError` if its content is invalid
pub fn load_plugin_config(path: &Path) -> ConfigurationResult<PluginConfig> {
    parse_plugin_config(&read_config_file(path)?)
}

/// Read a configuration file on its own, without the built-in defaults.
///
/// Fails the same way as [`load_plugin_config`].
pub fn load_plugin_config_without_defaults(path: &Path) -> ConfigurationResult<PluginConfig> {
    parse_plugin_config_without_defaults(&read_config_file(path)?)
}

/// Load a configuration file and validate it.
///
/// Deprecation warnings are logged; the returned configuration is canonical.
pub fn load_and_validate(path: &Path) -> ConfigurationResult<PluginConfig> {
    let mut config = load_plugin_config(path)?;
    validate_plugin_config(&mut config)?;

    info!("Configuration loaded and validated from {:?}", path);
    Ok(config)
}

fn read_config_file(path: &Path) -> ConfigurationResult<String> {
    debug!("Loading configuration from {:?}", path);

    if !path.exists() {
        return Err(ConfigurationError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    fs::read_to_string(path).map_err(|e| ConfigurationError::FileAccessError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn parse_table(content: &str) -> ConfigurationResult<toml::Table> {
    toml::from_str::<toml::Table>(content).map_err(|e| ConfigurationError::ParseError {
        reason: e.to_string(),
    })
}

/// Merge `overrides` into `base`, recursing into tables present in both.
pub(crate) fn merge_tables(mut base: toml::Table, overrides: toml::Table) -> toml::Table {
    for (key, value) in overrides {
        let merged = match (base.remove(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                toml::Value::Table(merge_tables(existing, incoming))
            }
            (_, incoming) => incoming,
        };
        base.insert(key, merged);
    }
    base
}
