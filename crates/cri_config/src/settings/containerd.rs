//! Containerd-level runtime selection settings.

use super::runtime::Runtime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Handler name the deprecated `untrusted_workload_runtime` migrates to.
pub const RUNTIME_UNTRUSTED: &str = "untrusted";

/// Handler name the deprecated `default_runtime` migrates to.
pub const RUNTIME_DEFAULT: &str = "default";

/// The `[containerd]` section.
///
/// # TOML Format
///
/// ```toml
/// [containerd]
/// snapshotter = "overlayfs"
/// default_runtime_name = "runc"
///
/// [containerd.runtimes.runc]
/// runtime_type = "io.containerd.runc.v2"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerdConfig {
    /// Snapshotter used when a handler does not set its own.
    pub snapshotter: String,

    /// Name of the handler in `runtimes` used when no handler is requested.
    pub default_runtime_name: String,

    /// Disables pivot-root; legacy v1 Linux runtime only.
    pub no_pivot: bool,

    /// Do not pass image annotations to snapshotters.
    pub disable_snapshot_annotations: bool,

    /// Let GC remove layers from the content store once unpacked.
    pub discard_unpacked_layers: bool,

    /// Ignore blockio errors when blockio support is not enabled.
    pub ignore_blockio_not_enabled_errors: bool,

    /// Ignore RDT errors when RDT support is not enabled.
    pub ignore_rdt_not_enabled_errors: bool,

    /// Deprecated: use `default_runtime_name` instead.
    ///
    /// Cleared once migrated to `runtimes["default"]`.
    pub default_runtime: Runtime,

    /// Deprecated: use the `untrusted` handler in `runtimes` instead.
    ///
    /// Cleared once migrated to `runtimes["untrusted"]`.
    pub untrusted_workload_runtime: Runtime,

    /// Runtime handlers keyed by CRI runtime handler name.
    pub runtimes: BTreeMap<String, Runtime>,
}

impl ContainerdConfig {
    /// The handler `default_runtime_name` points at, if it exists.
    pub fn default_runtime_handler(&self) -> Option<&Runtime> {
        self.runtimes.get(&self.default_runtime_name)
    }
}

#[cfg(test)]
#[path = "containerd_tests.rs"]
mod tests;
