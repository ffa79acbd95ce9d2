use super::*;
use cri_config::ErrorCategory;
use std::error::Error as StdError;

#[test]
fn test_load_error_display() {
    let error = Error::Load(ConfigurationError::FileNotFound {
        path: "/etc/containerd/config.toml".to_string(),
    });
    assert!(error
        .to_string()
        .starts_with("Failed to load configuration: "));
    assert!(error.to_string().contains("/etc/containerd/config.toml"));
}

#[test]
fn test_rejected_error_display_names_step() {
    let error = Error::Rejected {
        step: "check_default_runtime_name",
        source: ConfigurationError::RequiredConfigMissing {
            key: "default_runtime_name".to_string(),
        },
    };
    assert!(error
        .to_string()
        .starts_with("Configuration rejected by `check_default_runtime_name`: "));
}

#[test]
fn test_rejected_error_exposes_source() {
    let error = Error::Rejected {
        step: "check_registry_mirrors",
        source: ConfigurationError::MutuallyExclusive {
            field: "registry.mirrors".to_string(),
            conflicts_with: "registry.config_path".to_string(),
        },
    };
    assert!(error.source().is_some());
    assert_eq!(
        error.configuration_error().map(ConfigurationError::category),
        Some(ErrorCategory::Conflict)
    );
}

#[test]
fn test_serialize_error_display() {
    let error = Error::Serialize("unsupported value".to_string());
    assert_eq!(
        error.to_string(),
        "Failed to serialize configuration: unsupported value"
    );
    assert!(error.configuration_error().is_none());
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
