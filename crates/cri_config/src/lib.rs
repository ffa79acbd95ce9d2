//! Configuration reconciliation and validation for the CRI plugin.
//!
//! The plugin configuration has grown over several generations: deprecated
//! single-handler runtime fields, inline registry mirrors, TLS material and
//! credentials have all been superseded by newer options. This crate turns a
//! decoded configuration into a single canonical one:
//!
//! - [`settings`] and [`PluginConfig`] describe every recognized option.
//! - [`pipeline`] folds deprecated options into canonical ones, rejects
//!   conflicting or dangling settings, and applies per-handler defaults.
//! - [`loader`] reads a TOML file layered over the built-in defaults.
//!
//! # Examples
//!
//! ```rust
//! use cri_config::{validate_plugin_config, PluginConfig};
//!
//! let mut config = PluginConfig::default_config();
//! config.stream_idle_timeout = "30m".to_string();
//!
//! validate_plugin_config(&mut config)?;
//! # Ok::<(), cri_config::ConfigurationError>(())
//! ```

pub mod duration;
pub mod errors;
pub mod loader;
pub mod pipeline;
pub mod plugin_config;
pub mod settings;
pub mod warnings;

// Re-export for convenient access
pub use errors::{ConfigurationError, ConfigurationResult, ErrorCategory};
pub use pipeline::{
    reconcile, validate_plugin_config, Reconciliation, ReconcileStep, StepFailure,
    RECONCILE_STEPS,
};
pub use plugin_config::PluginConfig;
pub use settings::{
    AuthConfig, CniConfig, ContainerdConfig, ImageDecryption, Mirror, Registry, RegistryConfig,
    Runtime, SandboxControllerMode, TlsConfig, X509KeyPairStreaming,
};
pub use warnings::DeprecationWarning;
