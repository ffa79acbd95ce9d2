//! Tests for PluginConfig

use super::*;

#[test]
fn test_default_creates_empty_config() {
    let config = PluginConfig::default();

    assert!(config.containerd.runtimes.is_empty());
    assert!(config.containerd.default_runtime_name.is_empty());
    assert!(config.stream_idle_timeout.is_empty());
    assert!(config.registry.config_path.is_empty());
    assert_eq!(config.max_concurrent_downloads, 0);
}

#[test]
fn test_default_config_has_runc_handler() {
    let config = PluginConfig::default_config();

    assert_eq!(config.containerd.default_runtime_name, "runc");
    assert_eq!(config.containerd.snapshotter, "overlayfs");
    let runc = config
        .containerd
        .default_runtime_handler()
        .expect("runc handler should exist");
    assert_eq!(runc.runtime_type, RUNTIME_RUNC_V2);
    assert_eq!(runc.sandbox_mode, Some(SandboxControllerMode::PodSandbox));
}

#[test]
fn test_default_config_values() {
    let config = PluginConfig::default_config();

    assert!(config.disable_tcp_service);
    assert_eq!(config.stream_server_address, "127.0.0.1");
    assert_eq!(config.stream_server_port, "0");
    assert_eq!(config.sandbox_image, "registry.k8s.io/pause:3.8");
    assert_eq!(config.max_container_log_line_size, 16384);
    assert_eq!(config.max_concurrent_downloads, 3);
    assert_eq!(config.cni.bin_dir, "/opt/cni/bin");
    assert_eq!(config.cni.conf_dir, "/etc/cni/net.d");
    assert_eq!(config.cni.max_conf_num, 1);
    assert_eq!(config.image_decryption.key_model, KEY_MODEL_NODE);
    assert_eq!(config.cdi_spec_dirs, vec!["/etc/cdi", "/var/run/cdi"]);
}

#[test]
fn test_default_config_timeouts_parse() {
    let config = PluginConfig::default_config();

    assert_eq!(
        config.stream_idle_timeout(),
        Ok(Some(Duration::from_secs(4 * 3600)))
    );
    assert_eq!(
        config.image_pull_progress_timeout(),
        Ok(Some(Duration::from_secs(300)))
    );
    assert_eq!(config.drain_exec_sync_io_timeout(), Ok(Some(Duration::ZERO)));
}

#[test]
fn test_empty_timeout_means_none() {
    let config = PluginConfig::default();

    assert_eq!(config.stream_idle_timeout(), Ok(None));
    assert_eq!(config.image_pull_progress_timeout(), Ok(None));
    assert_eq!(config.drain_exec_sync_io_timeout(), Ok(None));
}

#[test]
fn test_malformed_timeout_names_field() {
    let config = PluginConfig {
        image_pull_progress_timeout: "soon".to_string(),
        ..Default::default()
    };

    match config.image_pull_progress_timeout() {
        Err(ConfigurationError::InvalidDuration { field, value, .. }) => {
            assert_eq!(field, "image_pull_progress_timeout");
            assert_eq!(value, "soon");
        }
        other => panic!("Expected InvalidDuration, got {:?}", other),
    }
}

#[test]
fn test_deserialize_from_toml() {
    let toml = r#"
        stream_idle_timeout = "30m"
        enable_cdi = true
        systemd_cgroup = true

        [containerd]
        default_runtime_name = "kata"

        [containerd.runtimes.kata]
        runtime_type = "io.containerd.kata.v2"

        [cni]
        max_conf_num = 0

        [x509_key_pair_streaming]
        tls_cert_file = "/etc/cert.pem"
    "#;

    let config: PluginConfig = toml::from_str(toml).expect("Failed to deserialize");

    assert_eq!(config.stream_idle_timeout, "30m");
    assert!(config.enable_cdi);
    assert!(config.systemd_cgroup);
    assert_eq!(config.containerd.default_runtime_name, "kata");
    assert!(config.containerd.runtimes.contains_key("kata"));
    assert_eq!(config.cni.max_conf_num, 0);
    assert_eq!(config.x509_key_pair_streaming.tls_cert_file, "/etc/cert.pem");
    assert!(config.registry.mirrors.is_empty());
}

#[test]
fn test_default_config_serialization_roundtrip() {
    let config = PluginConfig::default_config();

    let toml = toml::to_string(&config).expect("Failed to serialize");
    let parsed: PluginConfig = toml::from_str(&toml).expect("Failed to parse");

    assert_eq!(parsed, config);
}
