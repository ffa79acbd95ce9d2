//! CNI network plugin settings.

use serde::{Deserialize, Serialize};

/// The `[cni]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CniConfig {
    /// Directory holding the CNI plugin binaries.
    pub bin_dir: String,

    /// Directory holding the CNI network configuration.
    pub conf_dir: String,

    /// Maximum number of configuration files loaded from `conf_dir`; 0 loads all.
    pub max_conf_num: u32,

    /// Set up networks one at a time when several configurations are loaded.
    pub setup_serially: bool,

    /// Template used to generate the CNI configuration from the pod CIDR.
    pub conf_template: String,

    /// Strategy for picking the pod's primary IP: `ipv4` (or empty), `ipv6`, `cni`.
    pub ip_pref: String,
}
