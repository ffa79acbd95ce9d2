//! Runtime handler configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime type of the legacy v1 Linux shim.
///
/// `runtime_engine`, `runtime_root`, `systemd_cgroup` and `no_pivot` only have
/// meaning for this runtime type.
pub const RUNTIME_LINUX_V1: &str = "io.containerd.runtime.v1.linux";

/// Runtime type of the runc v2 shim.
pub const RUNTIME_RUNC_V2: &str = "io.containerd.runc.v2";

/// Selects which component manages the pod sandbox lifecycle for a handler.
///
/// The set of modes is closed. A value other than `podsandbox` or `shim` is
/// rejected when the file is decoded, as a `ParseError`, rather than during
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SandboxControllerMode {
    /// The built-in pod sandbox controller.
    #[default]
    PodSandbox,
    /// Whatever controller the shim provides.
    Shim,
}

impl SandboxControllerMode {
    /// The configuration value of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PodSandbox => "podsandbox",
            Self::Shim => "shim",
        }
    }
}

impl fmt::Display for SandboxControllerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named way of executing containers.
///
/// Handlers live in `containerd.runtimes` keyed by the CRI runtime handler
/// name. The same structure is used by the deprecated single-handler fields
/// `containerd.default_runtime` and `containerd.untrusted_workload_runtime`.
///
/// # TOML Format
///
/// ```toml
/// [containerd.runtimes.kata]
/// runtime_type = "io.containerd.kata.v2"
/// privileged_without_host_devices = true
/// pod_annotations = ["io.katacontainers.*"]
/// sandbox_mode = "shim"
///
/// [containerd.runtimes.kata.options]
/// ConfigPath = "/etc/kata/configuration.toml"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Runtime {
    /// Runtime type, e.g. `io.containerd.runc.v2`. An empty type means the
    /// handler is not configured.
    pub runtime_type: String,

    /// Absolute path to the shim binary; overrides resolution by type.
    pub runtime_path: String,

    /// Legacy engine name, only valid for [`RUNTIME_LINUX_V1`].
    pub runtime_engine: String,

    /// Pod annotations passed to both the sandbox and container OCI specs.
    pub pod_annotations: Vec<String>,

    /// Container annotations passed through to the container OCI spec.
    pub container_annotations: Vec<String>,

    /// Legacy runtime state directory, only valid for [`RUNTIME_LINUX_V1`].
    pub runtime_root: String,

    /// Options specific to the runtime type.
    pub options: toml::Table,

    /// Do not expose host devices to privileged containers.
    pub privileged_without_host_devices: bool,

    /// Allow all devices for privileged containers. Requires
    /// `privileged_without_host_devices`.
    pub privileged_without_host_devices_all_devices_allowed: bool,

    /// Path to a JSON OCI spec used as the base for every container.
    pub base_runtime_spec: String,

    /// CNI configuration directory for this runtime class.
    pub cni_conf_dir: String,

    /// Maximum number of CNI configuration files to load; 0 loads all.
    pub cni_max_conf_num: u32,

    /// Snapshotter used by this handler instead of the global one.
    pub snapshotter: String,

    /// Sandbox controller mode; filled with `podsandbox` during validation.
    ///
    /// Unknown modes never reach validation, see [`SandboxControllerMode`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox_mode: Option<SandboxControllerMode>,
}

impl Runtime {
    /// Create a handler of the given runtime type with every other field unset.
    pub fn new(runtime_type: impl Into<String>) -> Self {
        Self {
            runtime_type: runtime_type.into(),
            ..Default::default()
        }
    }

    /// Whether this handler carries a runtime type at all.
    ///
    /// The deprecated single-handler fields are considered absent when this
    /// returns `false`.
    pub fn is_configured(&self) -> bool {
        !self.runtime_type.is_empty()
    }

    /// The sandbox controller mode in effect for this handler.
    pub fn sandbox_mode_or_default(&self) -> SandboxControllerMode {
        self.sandbox_mode.unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
