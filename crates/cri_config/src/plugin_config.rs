//! Top-level CRI plugin configuration.
//!
//! `PluginConfig` aggregates every section of the plugin configuration file.
//! It is a plain record: values that are invalid on their own, such as a
//! malformed timeout, are accepted here and only rejected by the
//! reconciliation pipeline.

use crate::duration::parse_duration;
use crate::settings::*;
use crate::{ConfigurationError, ConfigurationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[cfg(test)]
#[path = "plugin_config_tests.rs"]
mod tests;

/// The CRI plugin configuration.
///
/// `PluginConfig::default()` is the empty schema with every field zero-valued.
/// Use [`PluginConfig::default_config`] for the built-in defaults the plugin
/// ships with.
///
/// # TOML Format
///
/// ```toml
/// sandbox_image = "registry.k8s.io/pause:3.8"
/// stream_idle_timeout = "4h0m0s"
///
/// [containerd]
/// default_runtime_name = "runc"
///
/// [containerd.runtimes.runc]
/// runtime_type = "io.containerd.runc.v2"
///
/// [registry]
/// config_path = "/etc/containerd/certs.d"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Serve CRI only on the local socket, never on TCP.
    pub disable_tcp_service: bool,

    /// Address the streaming server listens on.
    pub stream_server_address: String,

    /// Port the streaming server listens on.
    pub stream_server_port: String,

    /// Idle time after which a streaming connection is closed; empty means no timeout.
    pub stream_idle_timeout: String,

    pub enable_selinux: bool,

    /// Upper bound of the SELinux category range; 0 uses the library default.
    pub selinux_category_range: u32,

    /// Image used for the pod sandbox container.
    pub sandbox_image: String,

    /// Period, in seconds, of snapshot stats collection.
    pub stats_collect_period: u32,

    /// Deprecated: configure the runc handler options instead.
    ///
    /// Only valid when the default handler is the v1 Linux runtime.
    pub systemd_cgroup: bool,

    pub enable_tls_streaming: bool,

    /// Maximum container log line size in bytes; non-positive means no limit.
    pub max_container_log_line_size: i64,

    pub disable_cgroup: bool,
    pub disable_apparmor: bool,
    pub restrict_oom_score_adj: bool,

    /// Concurrent layer downloads per image.
    pub max_concurrent_downloads: u32,

    pub disable_proc_mount: bool,

    /// Seccomp profile applied when a container leaves it unset.
    pub unset_seccomp_profile: String,

    pub tolerate_missing_hugetlb_controller: bool,
    pub disable_hugetlb_controller: bool,
    pub device_ownership_from_security_context: bool,
    pub ignore_image_defined_volumes: bool,
    pub netns_mounts_under_state_dir: bool,
    pub enable_unprivileged_ports: bool,
    pub enable_unprivileged_icmp: bool,

    /// Inject Container Device Interface specifications.
    pub enable_cdi: bool,

    /// Directories scanned for CDI specifications.
    pub cdi_spec_dirs: Vec<String>,

    /// Cancel a pull when no data was read for this long; empty means no timeout.
    pub image_pull_progress_timeout: String,

    /// Wait this long for exec IO to drain after the process exits; empty means no timeout.
    pub drain_exec_sync_io_timeout: String,

    pub containerd: ContainerdConfig,
    pub cni: CniConfig,
    pub registry: Registry,
    pub image_decryption: ImageDecryption,
    pub x509_key_pair_streaming: X509KeyPairStreaming,
}

impl PluginConfig {
    /// The built-in defaults of the plugin on Linux.
    ///
    /// A single `runc` handler of type [`RUNTIME_RUNC_V2`] is configured as
    /// the default runtime.
    pub fn default_config() -> Self {
        let mut runtimes = BTreeMap::new();
        runtimes.insert(
            "runc".to_string(),
            Runtime {
                sandbox_mode: Some(SandboxControllerMode::PodSandbox),
                ..Runtime::new(RUNTIME_RUNC_V2)
            },
        );

        Self {
            disable_tcp_service: true,
            stream_server_address: "127.0.0.1".to_string(),
            stream_server_port: "0".to_string(),
            stream_idle_timeout: "4h0m0s".to_string(),
            enable_selinux: false,
            selinux_category_range: 1024,
            sandbox_image: "registry.k8s.io/pause:3.8".to_string(),
            stats_collect_period: 10,
            systemd_cgroup: false,
            enable_tls_streaming: false,
            max_container_log_line_size: 16 * 1024,
            disable_cgroup: false,
            disable_apparmor: false,
            restrict_oom_score_adj: false,
            max_concurrent_downloads: 3,
            disable_proc_mount: false,
            unset_seccomp_profile: String::new(),
            tolerate_missing_hugetlb_controller: true,
            disable_hugetlb_controller: true,
            device_ownership_from_security_context: false,
            ignore_image_defined_volumes: false,
            netns_mounts_under_state_dir: false,
            enable_unprivileged_ports: false,
            enable_unprivileged_icmp: false,
            enable_cdi: false,
            cdi_spec_dirs: vec!["/etc/cdi".to_string(), "/var/run/cdi".to_string()],
            image_pull_progress_timeout: "5m0s".to_string(),
            drain_exec_sync_io_timeout: "0s".to_string(),
            containerd: ContainerdConfig {
                snapshotter: "overlayfs".to_string(),
                default_runtime_name: "runc".to_string(),
                disable_snapshot_annotations: true,
                runtimes,
                ..Default::default()
            },
            cni: CniConfig {
                bin_dir: "/opt/cni/bin".to_string(),
                conf_dir: "/etc/cni/net.d".to_string(),
                max_conf_num: 1,
                ..Default::default()
            },
            registry: Registry::default(),
            image_decryption: ImageDecryption {
                key_model: KEY_MODEL_NODE.to_string(),
            },
            x509_key_pair_streaming: X509KeyPairStreaming::default(),
        }
    }

    /// Parsed `stream_idle_timeout`; `None` when unset.
    pub fn stream_idle_timeout(&self) -> ConfigurationResult<Option<Duration>> {
        parse_timeout("stream_idle_timeout", &self.stream_idle_timeout)
    }

    /// Parsed `image_pull_progress_timeout`; `None` when unset.
    pub fn image_pull_progress_timeout(&self) -> ConfigurationResult<Option<Duration>> {
        parse_timeout(
            "image_pull_progress_timeout",
            &self.image_pull_progress_timeout,
        )
    }

    /// Parsed `drain_exec_sync_io_timeout`; `None` when unset.
    pub fn drain_exec_sync_io_timeout(&self) -> ConfigurationResult<Option<Duration>> {
        parse_timeout(
            "drain_exec_sync_io_timeout",
            &self.drain_exec_sync_io_timeout,
        )
    }

    /// Every timeout setting as `(key, value)` pairs, in validation order.
    pub(crate) fn timeout_settings(&self) -> [(&'static str, &str); 3] {
        [
            ("stream_idle_timeout", self.stream_idle_timeout.as_str()),
            (
                "image_pull_progress_timeout",
                self.image_pull_progress_timeout.as_str(),
            ),
            (
                "drain_exec_sync_io_timeout",
                self.drain_exec_sync_io_timeout.as_str(),
            ),
        ]
    }
}

/// Parse a timeout setting. An empty value means "no timeout".
pub(crate) fn parse_timeout(field: &str, value: &str) -> ConfigurationResult<Option<Duration>> {
    if value.is_empty() {
        return Ok(None);
    }

    parse_duration(value)
        .map(Some)
        .map_err(|e| ConfigurationError::InvalidDuration {
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}
