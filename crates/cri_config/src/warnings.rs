//! Deprecation warnings produced during reconciliation.

use std::fmt;

/// Non-blocking notice that a deprecated option is in use.
///
/// Deprecated options that do not conflict with anything are still honored;
/// the warning only nudges towards the canonical option.
///
/// # Examples
///
/// ```rust
/// use cri_config::DeprecationWarning;
///
/// let warning = DeprecationWarning::new(
///     "registry.mirrors",
///     "`mirrors` is deprecated, please use `config_path` instead",
/// )
/// .with_replacement("registry.config_path");
///
/// assert_eq!(warning.replacement.as_deref(), Some("registry.config_path"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationWarning {
    /// Dot-separated path to the deprecated option.
    pub field_path: String,
    /// Human-readable warning message.
    pub message: String,
    /// The option to use instead, when one exists.
    pub replacement: Option<String>,
}

impl DeprecationWarning {
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            message: message.into(),
            replacement: None,
        }
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }
}

impl fmt::Display for DeprecationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
