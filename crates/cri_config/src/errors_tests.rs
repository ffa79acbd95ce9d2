//! Tests for configuration error types.

use super::*;

#[test]
fn conflicting_definitions_message_names_both_options() {
    let error = ConfigurationError::ConflictingDefinitions {
        legacy: "untrusted_workload_runtime".to_string(),
        canonical: "runtimes[\"untrusted\"]".to_string(),
    };

    let message = error.to_string();
    assert!(message.starts_with("conflicting definitions"));
    assert!(message.contains("`untrusted_workload_runtime`"));
    assert!(message.contains("`runtimes[\"untrusted\"]`"));
}

#[test]
fn runtime_type_mismatch_names_required_type() {
    let error = ConfigurationError::RuntimeTypeMismatch {
        field: "systemd_cgroup".to_string(),
        required_type: "io.containerd.runtime.v1.linux".to_string(),
        actual_type: "io.containerd.runc.v2".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "`systemd_cgroup` only works for runtime io.containerd.runtime.v1.linux"
    );
}

#[test]
fn undefined_runtime_message_quotes_name() {
    let error = ConfigurationError::UndefinedRuntime {
        field: "default_runtime_name".to_string(),
        name: "kata".to_string(),
    };

    assert!(error.to_string().contains("default_runtime_name = \"kata\""));
}

#[test]
fn categories_follow_taxonomy() {
    let cases = vec![
        (
            ConfigurationError::MutuallyExclusive {
                field: "mirrors".to_string(),
                conflicts_with: "config_path".to_string(),
            },
            ErrorCategory::Conflict,
        ),
        (
            ConfigurationError::RequiresSetting {
                field: "a".to_string(),
                requires: "b".to_string(),
                runtime: "runc".to_string(),
            },
            ErrorCategory::Conflict,
        ),
        (
            ConfigurationError::RequiredConfigMissing {
                key: "default_runtime_name".to_string(),
            },
            ErrorCategory::MissingReference,
        ),
        (
            ConfigurationError::InvalidDuration {
                field: "stream_idle_timeout".to_string(),
                value: "soon".to_string(),
                reason: "bad".to_string(),
            },
            ErrorCategory::MalformedValue,
        ),
        (
            ConfigurationError::InvalidRegistryEndpoint {
                endpoint: "https://".to_string(),
                reason: "empty host".to_string(),
            },
            ErrorCategory::MalformedValue,
        ),
        (
            ConfigurationError::ParseError {
                reason: "bad toml".to_string(),
            },
            ErrorCategory::Load,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.category(), expected, "wrong category for {:?}", error);
    }
}

#[test]
fn error_category_display() {
    assert_eq!(ErrorCategory::TypeRestriction.to_string(), "TypeRestriction");
    assert_eq!(ErrorCategory::MissingReference.to_string(), "MissingReference");
}
