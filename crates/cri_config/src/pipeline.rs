//! Reconciliation and validation of the plugin configuration.
//!
//! The configuration is checked by a fixed, ordered list of named steps
//! ([`RECONCILE_STEPS`]). Each step takes the configuration by value, may fold
//! deprecated options into their canonical replacements, may record
//! deprecation warnings, and returns the configuration or the first violated
//! constraint. Later steps rely on the output of earlier ones: the default
//! runtime name is only checked after the legacy default runtime has been
//! migrated, and so on.
//!
//! Two entry points drive the steps:
//!
//! - [`reconcile`] is a pure transform. It never touches its input and returns
//!   a [`Reconciliation`] holding the resulting configuration, the warnings and
//!   the failure, if any.
//! - [`validate_plugin_config`] validates in place. Warnings go to the
//!   `tracing` subscriber of the hosting process.
//!
//! # Examples
//!
//! ```rust
//! use cri_config::{reconcile, PluginConfig, Runtime};
//!
//! let mut config = PluginConfig::default();
//! config.containerd.default_runtime = Runtime::new("io.containerd.runc.v2");
//!
//! let outcome = reconcile(&config);
//! assert!(outcome.is_accepted());
//! assert_eq!(outcome.config.containerd.default_runtime_name, "default");
//! assert_eq!(outcome.warnings.len(), 1);
//! ```

use crate::plugin_config::{parse_timeout, PluginConfig};
use crate::settings::{RUNTIME_DEFAULT, RUNTIME_LINUX_V1, RUNTIME_UNTRUSTED};
use crate::warnings::DeprecationWarning;
use crate::{ConfigurationError, ConfigurationResult};
use tracing::{debug, warn};
use url::Url;

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

/// Signature shared by every reconciliation step.
pub type StepFn =
    fn(PluginConfig, &mut Vec<DeprecationWarning>) -> ConfigurationResult<PluginConfig>;

/// A named reconciliation step.
#[derive(Clone, Copy)]
pub struct ReconcileStep {
    pub name: &'static str,
    pub run: StepFn,
}

impl std::fmt::Debug for ReconcileStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcileStep")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The reconciliation steps, in the order they run.
///
/// The runtime registry needs no initialization step: it is a plain map that
/// is empty by default, so lookups never fail on a missing registry.
pub const RECONCILE_STEPS: &[ReconcileStep] = &[
    ReconcileStep {
        name: "migrate_untrusted_workload_runtime",
        run: migrate_untrusted_workload_runtime,
    },
    ReconcileStep {
        name: "migrate_default_runtime",
        run: migrate_default_runtime,
    },
    ReconcileStep {
        name: "check_default_runtime_name",
        run: check_default_runtime_name,
    },
    ReconcileStep {
        name: "check_legacy_runtime_options",
        run: check_legacy_runtime_options,
    },
    ReconcileStep {
        name: "check_runtime_handlers",
        run: check_runtime_handlers,
    },
    ReconcileStep {
        name: "check_registry_mirrors",
        run: check_registry_mirrors,
    },
    ReconcileStep {
        name: "check_registry_tls",
        run: check_registry_tls,
    },
    ReconcileStep {
        name: "migrate_registry_auths",
        run: migrate_registry_auths,
    },
    ReconcileStep {
        name: "check_timeouts",
        run: check_timeouts,
    },
];

/// The step that rejected a configuration, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    pub step: &'static str,
    pub error: ConfigurationError,
}

/// Outcome of running the reconciliation steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// The canonical configuration when accepted. On failure, the state left
    /// by the steps that ran before the failing one.
    pub config: PluginConfig,
    /// Deprecation warnings, in the order they were raised.
    pub warnings: Vec<DeprecationWarning>,
    /// Set when a step rejected the configuration.
    pub failure: Option<StepFailure>,
}

impl Reconciliation {
    /// Whether every step accepted the configuration.
    pub fn is_accepted(&self) -> bool {
        self.failure.is_none()
    }

    /// The error that stopped reconciliation, if any.
    pub fn error(&self) -> Option<&ConfigurationError> {
        self.failure.as_ref().map(|failure| &failure.error)
    }

    /// Convert into the canonical configuration and its warnings, or the error.
    pub fn into_result(self) -> ConfigurationResult<(PluginConfig, Vec<DeprecationWarning>)> {
        match self.failure {
            Some(failure) => Err(failure.error),
            None => Ok((self.config, self.warnings)),
        }
    }
}

/// Reconcile and validate `config` without modifying it.
pub fn reconcile(config: &PluginConfig) -> Reconciliation {
    run_steps(RECONCILE_STEPS, config)
}

/// Run `steps` in order over a copy of `config`, stopping at the first error.
pub fn run_steps(steps: &[ReconcileStep], config: &PluginConfig) -> Reconciliation {
    let mut current = config.clone();
    let mut warnings = Vec::new();

    for step in steps {
        debug!(step = step.name, "Running configuration step");
        match (step.run)(current.clone(), &mut warnings) {
            Ok(next) => current = next,
            Err(error) => {
                debug!(step = step.name, error = %error, "Configuration step failed");
                return Reconciliation {
                    config: current,
                    warnings,
                    failure: Some(StepFailure {
                        step: step.name,
                        error,
                    }),
                };
            }
        }
    }

    Reconciliation {
        config: current,
        warnings,
        failure: None,
    }
}

/// Validate the plugin configuration in place.
///
/// Deprecated options are folded into their canonical replacements and every
/// deprecation warning is logged at WARN level. On failure the steps that ran
/// before the failing one stay applied; the caller is expected to abort
/// startup.
///
/// # Errors
///
/// Returns the first violated constraint.
pub fn validate_plugin_config(config: &mut PluginConfig) -> ConfigurationResult<()> {
    let outcome = reconcile(config);

    for warning in &outcome.warnings {
        warn!(field = %warning.field_path, "{}", warning.message);
    }

    *config = outcome.config;
    match outcome.failure {
        Some(failure) => Err(failure.error),
        None => Ok(()),
    }
}

/// Move the deprecated `untrusted_workload_runtime` to `runtimes["untrusted"]`.
pub fn migrate_untrusted_workload_runtime(
    mut config: PluginConfig,
    warnings: &mut Vec<DeprecationWarning>,
) -> ConfigurationResult<PluginConfig> {
    if !config.containerd.untrusted_workload_runtime.is_configured() {
        return Ok(config);
    }

    warnings.push(
        DeprecationWarning::new(
            "containerd.untrusted_workload_runtime",
            "`untrusted_workload_runtime` is deprecated, please use `untrusted` runtime in `runtimes` instead",
        )
        .with_replacement(format!("containerd.runtimes.{}", RUNTIME_UNTRUSTED)),
    );

    if config.containerd.runtimes.contains_key(RUNTIME_UNTRUSTED) {
        return Err(ConfigurationError::ConflictingDefinitions {
            legacy: "untrusted_workload_runtime".to_string(),
            canonical: format!("runtimes[{:?}]", RUNTIME_UNTRUSTED),
        });
    }

    let runtime = std::mem::take(&mut config.containerd.untrusted_workload_runtime);
    config
        .containerd
        .runtimes
        .insert(RUNTIME_UNTRUSTED.to_string(), runtime);
    Ok(config)
}

/// Move the deprecated `default_runtime` to `runtimes["default"]` and select it.
///
/// An existing `default` handler is overwritten.
pub fn migrate_default_runtime(
    mut config: PluginConfig,
    warnings: &mut Vec<DeprecationWarning>,
) -> ConfigurationResult<PluginConfig> {
    if !config.containerd.default_runtime.is_configured() {
        return Ok(config);
    }

    warnings.push(
        DeprecationWarning::new(
            "containerd.default_runtime",
            "`default_runtime` is deprecated, please use `default_runtime_name` to reference the default configuration you have defined in `runtimes`",
        )
        .with_replacement("containerd.default_runtime_name"),
    );

    let runtime = std::mem::take(&mut config.containerd.default_runtime);
    config.containerd.default_runtime_name = RUNTIME_DEFAULT.to_string();
    config
        .containerd
        .runtimes
        .insert(RUNTIME_DEFAULT.to_string(), runtime);
    Ok(config)
}

/// Require `default_runtime_name` to name a handler in `runtimes`.
pub fn check_default_runtime_name(
    config: PluginConfig,
    _warnings: &mut Vec<DeprecationWarning>,
) -> ConfigurationResult<PluginConfig> {
    let name = &config.containerd.default_runtime_name;
    if name.is_empty() {
        return Err(ConfigurationError::RequiredConfigMissing {
            key: "default_runtime_name".to_string(),
        });
    }
    if !config.containerd.runtimes.contains_key(name) {
        return Err(ConfigurationError::UndefinedRuntime {
            field: "default_runtime_name".to_string(),
            name: name.clone(),
        });
    }
    Ok(config)
}

/// Restrict the legacy v1 Linux runtime options to handlers of that type.
///
/// `systemd_cgroup` and `no_pivot` apply to the default handler;
/// `runtime_engine` and `runtime_root` to the handler that sets them.
/// `no_pivot` has no replacement yet, so it is accepted without a warning.
pub fn check_legacy_runtime_options(
    config: PluginConfig,
    warnings: &mut Vec<DeprecationWarning>,
) -> ConfigurationResult<PluginConfig> {
    let default_type = config
        .containerd
        .default_runtime_handler()
        .map(|runtime| runtime.runtime_type.as_str())
        .unwrap_or_default();

    if config.systemd_cgroup {
        require_linux_v1("systemd_cgroup", default_type)?;
        warnings.push(
            DeprecationWarning::new(
                "systemd_cgroup",
                "`systemd_cgroup` is deprecated, please use runtime `options` instead",
            )
            .with_replacement("containerd.runtimes.<name>.options"),
        );
    }
    if config.containerd.no_pivot {
        require_linux_v1("no_pivot", default_type)?;
    }

    for (name, runtime) in &config.containerd.runtimes {
        if !runtime.runtime_engine.is_empty() {
            require_linux_v1("runtime_engine", &runtime.runtime_type)?;
            warnings.push(
                DeprecationWarning::new(
                    format!("containerd.runtimes.{}.runtime_engine", name),
                    "`runtime_engine` is deprecated, please use runtime `options` instead",
                )
                .with_replacement(format!("containerd.runtimes.{}.options", name)),
            );
        }
        if !runtime.runtime_root.is_empty() {
            require_linux_v1("runtime_root", &runtime.runtime_type)?;
            warnings.push(
                DeprecationWarning::new(
                    format!("containerd.runtimes.{}.runtime_root", name),
                    "`runtime_root` is deprecated, please use runtime `options` instead",
                )
                .with_replacement(format!("containerd.runtimes.{}.options", name)),
            );
        }
    }

    Ok(config)
}

fn require_linux_v1(field: &str, runtime_type: &str) -> ConfigurationResult<()> {
    if runtime_type == RUNTIME_LINUX_V1 {
        return Ok(());
    }
    Err(ConfigurationError::RuntimeTypeMismatch {
        field: field.to_string(),
        required_type: RUNTIME_LINUX_V1.to_string(),
        actual_type: runtime_type.to_string(),
    })
}

/// Check the device flags of every handler and default its sandbox mode.
pub fn check_runtime_handlers(
    mut config: PluginConfig,
    _warnings: &mut Vec<DeprecationWarning>,
) -> ConfigurationResult<PluginConfig> {
    for (name, runtime) in config.containerd.runtimes.iter_mut() {
        if runtime.privileged_without_host_devices_all_devices_allowed
            && !runtime.privileged_without_host_devices
        {
            return Err(ConfigurationError::RequiresSetting {
                field: "privileged_without_host_devices_all_devices_allowed".to_string(),
                requires: "privileged_without_host_devices".to_string(),
                runtime: name.clone(),
            });
        }
        runtime.sandbox_mode = Some(runtime.sandbox_mode_or_default());
    }
    Ok(config)
}

/// `mirrors` is deprecated and cannot be combined with `config_path`.
pub fn check_registry_mirrors(
    config: PluginConfig,
    warnings: &mut Vec<DeprecationWarning>,
) -> ConfigurationResult<PluginConfig> {
    if config.registry.mirrors.is_empty() {
        return Ok(config);
    }
    if config.registry.uses_config_path() {
        return Err(ConfigurationError::MutuallyExclusive {
            field: "mirrors".to_string(),
            conflicts_with: "config_path".to_string(),
        });
    }

    warnings.push(
        DeprecationWarning::new(
            "registry.mirrors",
            "`mirrors` is deprecated, please use `config_path` instead",
        )
        .with_replacement("registry.config_path"),
    );
    Ok(config)
}

/// `configs.*.tls` is deprecated and cannot be combined with `config_path`.
pub fn check_registry_tls(
    config: PluginConfig,
    warnings: &mut Vec<DeprecationWarning>,
) -> ConfigurationResult<PluginConfig> {
    if !config.registry.has_deprecated_tls() {
        return Ok(config);
    }
    if config.registry.uses_config_path() {
        return Err(ConfigurationError::MutuallyExclusive {
            field: "configs.tls".to_string(),
            conflicts_with: "config_path".to_string(),
        });
    }

    warnings.push(
        DeprecationWarning::new(
            "registry.configs.tls",
            "`configs.tls` is deprecated, please use `config_path` instead",
        )
        .with_replacement("registry.config_path"),
    );
    Ok(config)
}

/// Fold the deprecated `auths` into `configs`, keyed by registry host.
///
/// This runs whether or not `config_path` is set.
pub fn migrate_registry_auths(
    mut config: PluginConfig,
    warnings: &mut Vec<DeprecationWarning>,
) -> ConfigurationResult<PluginConfig> {
    if config.registry.auths.is_empty() {
        return Ok(config);
    }

    let auths = std::mem::take(&mut config.registry.auths);
    for (endpoint, auth) in auths {
        let host = registry_host(&endpoint)?;
        debug!(endpoint = %endpoint, host = %host, "Migrating registry auth");
        config.registry.configs.entry(host).or_default().auth = Some(auth);
    }

    warnings.push(
        DeprecationWarning::new(
            "registry.auths",
            "`auths` is deprecated, please use `configs` instead",
        )
        .with_replacement("registry.configs.<host>.auth"),
    );
    Ok(config)
}

/// The `configs` key for a legacy `auths` endpoint.
///
/// An endpoint with a scheme is reduced to its authority exactly as written:
/// case and any port, default or not, are kept. An endpoint without one, such
/// as `registry.example.com` or `localhost:5000`, is used as is.
pub(crate) fn registry_host(endpoint: &str) -> ConfigurationResult<String> {
    match Url::parse(endpoint) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => {
            Ok(written_authority(endpoint).unwrap_or(endpoint).to_string())
        }
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => Ok(endpoint.to_string()),
        Err(e) => Err(ConfigurationError::InvalidRegistryEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// The `host[:port]` text between `://` and the path, without user info.
fn written_authority(endpoint: &str) -> Option<&str> {
    let (_, rest) = endpoint.split_once("://")?;
    let end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    (!host.is_empty()).then_some(host)
}

/// Every non-empty timeout must be a valid duration.
pub fn check_timeouts(
    config: PluginConfig,
    _warnings: &mut Vec<DeprecationWarning>,
) -> ConfigurationResult<PluginConfig> {
    for (field, value) in config.timeout_settings() {
        parse_timeout(field, value)?;
    }
    Ok(config)
}
