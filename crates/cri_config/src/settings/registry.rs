//! Image registry access settings.
//!
//! Registries are configured either through an external directory
//! (`config_path`) or inline through `mirrors`, `configs` and `auths`. The
//! inline TLS and mirror settings are deprecated and cannot be combined with
//! `config_path`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Endpoints for one registry namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mirror {
    /// Endpoint URLs, tried in order until one works.
    #[serde(rename = "endpoint")]
    pub endpoints: Vec<String>,
}

/// Credentials for one registry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,

    /// Base64 of `username:password`.
    pub auth: String,

    /// Token exchanged for a registry access token.
    #[serde(rename = "identitytoken")]
    pub identity_token: String,
}

/// CA, client certificate and key for one registry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub insecure_skip_verify: bool,
    pub ca_file: String,
    pub cert_file: String,
    pub key_file: String,
}

/// Per-host registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Credentials for the registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,

    /// Deprecated: use `config_path` instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

/// The `[registry]` section.
///
/// # TOML Format
///
/// ```toml
/// [registry]
/// config_path = "/etc/containerd/certs.d"
///
/// [registry.configs."registry.example.com".auth]
/// username = "user"
/// password = "secret"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Registry {
    /// Root directory of per-registry host configuration.
    pub config_path: String,

    /// Deprecated: use `config_path` instead.
    pub mirrors: BTreeMap<String, Mirror>,

    /// Configuration keyed by registry host (domain name or IP, optional port).
    pub configs: BTreeMap<String, RegistryConfig>,

    /// Deprecated: use `configs` instead.
    ///
    /// Keyed by registry endpoint URL. Cleared once folded into `configs`.
    pub auths: BTreeMap<String, AuthConfig>,

    /// Extra HTTP headers sent to every registry.
    pub headers: BTreeMap<String, Vec<String>>,
}

impl Registry {
    /// Whether registry hosts are configured through `config_path`.
    pub fn uses_config_path(&self) -> bool {
        !self.config_path.is_empty()
    }

    /// Whether any per-host entry still carries deprecated TLS material.
    pub fn has_deprecated_tls(&self) -> bool {
        self.configs.values().any(|config| config.tls.is_some())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
