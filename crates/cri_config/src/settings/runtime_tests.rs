//! Tests for runtime handler configuration.

use super::*;

#[test]
fn test_runtime_new_sets_only_type() {
    let runtime = Runtime::new(RUNTIME_RUNC_V2);

    assert_eq!(runtime.runtime_type, "io.containerd.runc.v2");
    assert!(runtime.is_configured());
    assert!(runtime.options.is_empty());
    assert!(runtime.sandbox_mode.is_none());
    assert!(!runtime.privileged_without_host_devices);
}

#[test]
fn test_default_runtime_is_not_configured() {
    assert!(!Runtime::default().is_configured());
}

#[test]
fn test_sandbox_mode_or_default() {
    let mut runtime = Runtime::new(RUNTIME_RUNC_V2);
    assert_eq!(
        runtime.sandbox_mode_or_default(),
        SandboxControllerMode::PodSandbox
    );

    runtime.sandbox_mode = Some(SandboxControllerMode::Shim);
    assert_eq!(runtime.sandbox_mode_or_default(), SandboxControllerMode::Shim);
}

#[test]
fn test_sandbox_mode_display() {
    assert_eq!(SandboxControllerMode::PodSandbox.to_string(), "podsandbox");
    assert_eq!(SandboxControllerMode::Shim.to_string(), "shim");
}

#[test]
fn test_runtime_deserialization() {
    let toml = r#"
        runtime_type = "io.containerd.kata.v2"
        runtime_path = "/opt/kata/bin/containerd-shim-kata-v2"
        pod_annotations = ["io.katacontainers.*"]
        privileged_without_host_devices = true
        privileged_without_host_devices_all_devices_allowed = true
        cni_max_conf_num = 2
        snapshotter = "devmapper"
        sandbox_mode = "shim"

        [options]
        ConfigPath = "/etc/kata/configuration.toml"
    "#;

    let runtime: Runtime = toml::from_str(toml).expect("Failed to parse");
    assert_eq!(runtime.runtime_type, "io.containerd.kata.v2");
    assert_eq!(runtime.runtime_path, "/opt/kata/bin/containerd-shim-kata-v2");
    assert_eq!(runtime.pod_annotations, vec!["io.katacontainers.*"]);
    assert!(runtime.privileged_without_host_devices);
    assert!(runtime.privileged_without_host_devices_all_devices_allowed);
    assert_eq!(runtime.cni_max_conf_num, 2);
    assert_eq!(runtime.snapshotter, "devmapper");
    assert_eq!(runtime.sandbox_mode, Some(SandboxControllerMode::Shim));
    assert_eq!(
        runtime.options.get("ConfigPath").and_then(|v| v.as_str()),
        Some("/etc/kata/configuration.toml")
    );
}

#[test]
fn test_unknown_sandbox_mode_rejected() {
    let toml = r#"
        runtime_type = "io.containerd.runc.v2"
        sandbox_mode = "remote"
    "#;

    let result: Result<Runtime, _> = toml::from_str(toml);
    assert!(result.is_err());
}

#[test]
fn test_runtime_serialization_skips_unset_sandbox_mode() {
    let runtime = Runtime::new(RUNTIME_RUNC_V2);

    let toml = toml::to_string(&runtime).expect("Failed to serialize");
    assert!(toml.contains("runtime_type = \"io.containerd.runc.v2\""));
    assert!(!toml.contains("sandbox_mode"));
}
