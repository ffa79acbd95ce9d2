use std::path::Path;

use clap::Subcommand;
use cri_config::{reconcile, DeprecationWarning, PluginConfig};
use tracing::{debug, info, instrument, warn};

use crate::config::{get_config_path, load_config};
use crate::errors::Error;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the cri-config CLI
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Check a configuration file and report deprecated options
    Validate {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,

        /// Read the file on its own instead of over the built-in defaults
        #[arg(long)]
        no_defaults: bool,
    },

    /// Show the reconciled configuration
    Show {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,

        /// Print JSON instead of TOML
        #[arg(long)]
        json: bool,

        /// Read the file on its own instead of over the built-in defaults
        #[arg(long)]
        no_defaults: bool,
    },

    /// Print the built-in default configuration
    Defaults,
}

/// Execute a command and print its output
#[instrument]
pub fn execute(cmd: ConfigCommands) -> Result<(), Error> {
    let output = match cmd {
        ConfigCommands::Validate { path, no_defaults } => {
            validate_config(&get_config_path(path.as_deref()), !no_defaults)?
        }
        ConfigCommands::Show {
            path,
            json,
            no_defaults,
        } => show_config(&get_config_path(path.as_deref()), json, !no_defaults)?,
        ConfigCommands::Defaults => default_config()?,
    };

    print!("{}", output);
    Ok(())
}

/// Validate the configuration file at `path`, over the built-in defaults
/// when `defaults` is set.
///
/// Returns a report listing every deprecation warning. If the configuration is
/// rejected, the warnings raised before the failing step are logged and the
/// failure is returned.
#[instrument]
pub fn validate_config(path: &Path, defaults: bool) -> Result<String, Error> {
    let config = load_config(path, defaults)?;
    let outcome = reconcile(&config);

    if let Some(failure) = outcome.failure {
        for warning in &outcome.warnings {
            warn!(field = %warning.field_path, "{}", warning.message);
        }
        return Err(Error::Rejected {
            step: failure.step,
            source: failure.error,
        });
    }

    info!(
        message = "Configuration is valid",
        path = ?path,
        warnings = outcome.warnings.len()
    );
    Ok(render_report(&outcome.warnings))
}

/// Render the reconciled configuration at `path` as TOML or JSON.
#[instrument]
pub fn show_config(path: &Path, json: bool, defaults: bool) -> Result<String, Error> {
    let config = load_config(path, defaults)?;
    let outcome = reconcile(&config);

    if let Some(failure) = outcome.failure {
        return Err(Error::Rejected {
            step: failure.step,
            source: failure.error,
        });
    }

    debug!(
        message = "Rendering reconciled configuration",
        warnings = outcome.warnings.len()
    );
    render(&outcome.config, json)
}

/// Render the built-in default configuration as TOML.
pub fn default_config() -> Result<String, Error> {
    render(&PluginConfig::default_config(), false)
}

fn render(config: &PluginConfig, json: bool) -> Result<String, Error> {
    if json {
        serde_json::to_string_pretty(config)
            .map(|s| s + "\n")
            .map_err(|e| Error::Serialize(e.to_string()))
    } else {
        toml::to_string_pretty(config).map_err(|e| Error::Serialize(e.to_string()))
    }
}

fn render_report(warnings: &[DeprecationWarning]) -> String {
    let mut report = String::new();
    for warning in warnings {
        report.push_str(&format!(
            "warning: {}: {}\n",
            warning.field_path, warning.message
        ));
    }

    if warnings.is_empty() {
        report.push_str("Configuration is valid\n");
    } else {
        report.push_str(&format!(
            "Configuration is valid with {} deprecation warning(s)\n",
            warnings.len()
        ));
    }
    report
}
