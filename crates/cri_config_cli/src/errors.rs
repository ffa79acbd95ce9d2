use cri_config::ConfigurationError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the cri-config CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be read or decoded.
    #[error("Failed to load configuration: {0}")]
    Load(ConfigurationError),

    /// A reconciliation step rejected the configuration.
    ///
    /// `step` names the check that failed, e.g. `check_runtime_handlers`.
    #[error("Configuration rejected by `{step}`: {source}")]
    Rejected {
        step: &'static str,
        source: ConfigurationError,
    },

    /// The configuration could not be rendered for output.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),
}

impl Error {
    /// The underlying configuration error, when there is one.
    pub fn configuration_error(&self) -> Option<&ConfigurationError> {
        match self {
            Error::Load(e) | Error::Rejected { source: e, .. } => Some(e),
            Error::Serialize(_) => None,
        }
    }
}
