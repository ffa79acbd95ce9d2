//! Configuration sections of the CRI plugin.
//!
//! Each submodule holds one section of the plugin configuration file. Field
//! names match the TOML keys of the configuration file.

pub mod cni;
pub mod containerd;
pub mod image_decryption;
pub mod registry;
pub mod runtime;
pub mod streaming;

// Re-export all types for convenient access
pub use cni::CniConfig;
pub use containerd::{ContainerdConfig, RUNTIME_DEFAULT, RUNTIME_UNTRUSTED};
pub use image_decryption::{ImageDecryption, KEY_MODEL_NODE};
pub use registry::{AuthConfig, Mirror, Registry, RegistryConfig, TlsConfig};
pub use runtime::{Runtime, SandboxControllerMode, RUNTIME_LINUX_V1, RUNTIME_RUNC_V2};
pub use streaming::X509KeyPairStreaming;
