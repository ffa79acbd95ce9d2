//! Configuration error types.
//!
//! Domain-specific errors for loading, reconciling and validating the CRI
//! plugin configuration. Every error names exactly one violated constraint and
//! is terminal: a configuration that produced one of these must not be used.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Configuration system errors.
///
/// The reconciliation pipeline stops at the first of these it encounters, so
/// the caller only ever sees one of them per run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A legacy option and its canonical replacement are both defined.
    #[error("conflicting definitions: configuration includes both `{legacy}` and `{canonical}`")]
    ConflictingDefinitions { legacy: String, canonical: String },

    /// Two settings that cannot be combined were both provided.
    #[error("`{field}` cannot be set when `{conflicts_with}` is provided")]
    MutuallyExclusive {
        field: String,
        conflicts_with: String,
    },

    /// A flag was enabled without the flag it depends on.
    #[error("`{field}` requires `{requires}` to be enabled (runtime {runtime:?})")]
    RequiresSetting {
        field: String,
        requires: String,
        runtime: String,
    },

    /// A required setting was left empty.
    #[error("`{key}` is empty")]
    RequiredConfigMissing { key: String },

    /// A runtime name is referenced but not defined in `containerd.runtimes`.
    #[error(
        "no corresponding runtime configured in `containerd.runtimes` for `containerd` `{field} = {name:?}`"
    )]
    UndefinedRuntime { field: String, name: String },

    /// A legacy option was set on a runtime whose type does not support it.
    #[error("`{field}` only works for runtime {required_type}")]
    RuntimeTypeMismatch {
        field: String,
        required_type: String,
        actual_type: String,
    },

    /// A duration string could not be parsed.
    #[error("invalid `{field}` {value:?}: {reason}")]
    InvalidDuration {
        field: String,
        value: String,
        reason: String,
    },

    /// A legacy registry endpoint could not be parsed as a URL.
    #[error("failed to parse registry url {endpoint:?} from `registry.auths`: {reason}")]
    InvalidRegistryEndpoint { endpoint: String, reason: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to access configuration file: {path} - {reason}")]
    FileAccessError { path: String, reason: String },

    #[error("Failed to parse configuration: {reason}")]
    ParseError { reason: String },
}

/// Broad classes of configuration failures.
///
/// None of the categories is transient; all of them block startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Two mechanisms for the same concept were supplied.
    Conflict,
    /// A name is referenced but not defined, or a required name is empty.
    MissingReference,
    /// A legacy option is set on a runtime type that does not support it.
    TypeRestriction,
    /// A value failed to parse.
    MalformedValue,
    /// The configuration could not be read or decoded.
    Load,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict => write!(f, "Conflict"),
            Self::MissingReference => write!(f, "MissingReference"),
            Self::TypeRestriction => write!(f, "TypeRestriction"),
            Self::MalformedValue => write!(f, "MalformedValue"),
            Self::Load => write!(f, "Load"),
        }
    }
}

impl ConfigurationError {
    /// Returns the failure class of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConflictingDefinitions { .. }
            | Self::MutuallyExclusive { .. }
            | Self::RequiresSetting { .. } => ErrorCategory::Conflict,
            Self::RequiredConfigMissing { .. } | Self::UndefinedRuntime { .. } => {
                ErrorCategory::MissingReference
            }
            Self::RuntimeTypeMismatch { .. } => ErrorCategory::TypeRestriction,
            Self::InvalidDuration { .. } | Self::InvalidRegistryEndpoint { .. } => {
                ErrorCategory::MalformedValue
            }
            Self::FileNotFound { .. } | Self::FileAccessError { .. } | Self::ParseError { .. } => {
                ErrorCategory::Load
            }
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
