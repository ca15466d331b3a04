//! Checkpoint configuration.
//!
//! Provides [`CheckpointConfig`] with defaults (mainnet, checkpoints enabled,
//! the standard sigcheck factor). Values can be layered from an optional TOML
//! file and `TOLLGATE_*` environment variables, e.g.
//! `TOLLGATE_ENABLED=false` or `TOLLGATE_NETWORK=testnet`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ::config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tollgate_core::constants::{NetworkType, SIGCHECK_VERIFICATION_FACTOR};

use crate::guard::CheckpointGuard;
use crate::progress::{is_valid_sigcheck_factor, ProgressEstimator};
use crate::selector::{ChainSelector, CheckpointTables, NetworkSelector};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "TOLLGATE";

/// Configuration for the checkpoint guard and progress estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    /// Network whose checkpoint table is active.
    pub network: NetworkType,
    /// Whether checkpoint enforcement starts enabled.
    pub enabled: bool,
    /// Cost multiplier for post-checkpoint transactions.
    pub sigcheck_factor: f64,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            network: NetworkType::Mainnet,
            enabled: true,
            sigcheck_factor: SIGCHECK_VERIFICATION_FACTOR,
        }
    }
}

impl CheckpointConfig {
    /// Default config file location: `<config dir>/tollgate/tollgate.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tollgate")
            .join("tollgate.toml")
    }

    /// Load configuration from `path` (if given) and the environment.
    ///
    /// Missing keys keep their defaults. A `path` that is given must exist.
    /// Environment values override file values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the estimator cannot use.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Message`] if `sigcheck_factor` is not finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_sigcheck_factor(self.sigcheck_factor) {
            return Err(ConfigError::Message(format!(
                "sigcheck_factor must be finite and positive, got {}",
                self.sigcheck_factor
            )));
        }
        Ok(())
    }

    /// Selector over the compiled-in tables for the configured network.
    pub fn selector(&self) -> Arc<dyn NetworkSelector> {
        Arc::new(ChainSelector::new(CheckpointTables::builtin(), self.network))
    }

    /// A guard with the configured initial state.
    pub fn guard(&self, selector: Arc<dyn NetworkSelector>) -> CheckpointGuard {
        CheckpointGuard::new(selector).with_enabled(self.enabled)
    }

    /// An estimator with the configured sigcheck factor and the system clock.
    pub fn estimator(&self, selector: Arc<dyn NetworkSelector>) -> ProgressEstimator {
        ProgressEstimator::new(selector).with_sigcheck_factor(self.sigcheck_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let cfg = CheckpointConfig::default();
        assert_eq!(cfg.network, NetworkType::Mainnet);
        assert!(cfg.enabled);
        assert_eq!(cfg.sigcheck_factor, SIGCHECK_VERIFICATION_FACTOR);
    }

    #[test]
    fn default_path_ends_with_file_name() {
        let path = CheckpointConfig::default_path();
        assert!(path.ends_with("tollgate/tollgate.toml"), "{path:?}");
    }

    #[test]
    fn load_from_file() {
        let file = write_toml("network = \"testnet\"\nenabled = false\nsigcheck_factor = 3.5\n");
        let cfg = CheckpointConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.network, NetworkType::Testnet);
        assert!(!cfg.enabled);
        assert_eq!(cfg.sigcheck_factor, 3.5);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_toml("enabled = false\n");
        let cfg = CheckpointConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.network, NetworkType::Mainnet);
        assert!(!cfg.enabled);
        assert_eq!(cfg.sigcheck_factor, SIGCHECK_VERIFICATION_FACTOR);
    }

    #[test]
    fn unknown_network_in_file_falls_back_to_regtest() {
        let file = write_toml("network = \"moonnet\"\n");
        let cfg = CheckpointConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.network, NetworkType::Regtest);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(CheckpointConfig::load(Some(&missing)).is_err());
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<::config::Map<_, _>>();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_toml("network = \"main\"\nenabled = true\nsigcheck_factor = 4.0\n");
        let cfg = CheckpointConfig::load_with_env(
            Some(file.path()),
            env(&[
                ("TOLLGATE_NETWORK", "testnet"),
                ("TOLLGATE_ENABLED", "false"),
                ("TOLLGATE_SIGCHECK_FACTOR", "3.5"),
            ]),
        )
        .unwrap();
        assert_eq!(
            cfg,
            CheckpointConfig { network: NetworkType::Testnet, enabled: false, sigcheck_factor: 3.5 }
        );
    }

    #[test]
    fn environment_alone_and_unrelated_vars() {
        let cfg = CheckpointConfig::load_with_env(
            None,
            env(&[("TOLLGATE_ENABLED", "false"), ("OTHER_NETWORK", "testnet")]),
        )
        .unwrap();
        assert_eq!(cfg.network, NetworkType::Mainnet);
        assert!(!cfg.enabled);
    }

    #[test]
    fn invalid_sigcheck_factor_is_rejected() {
        for bad in ["0.0", "-1.0"] {
            let file = write_toml(&format!("sigcheck_factor = {bad}\n"));
            assert!(CheckpointConfig::load(Some(file.path())).is_err(), "{bad}");
        }
        let err = CheckpointConfig::load_with_env(None, env(&[("TOLLGATE_SIGCHECK_FACTOR", "inf")]))
            .unwrap_err();
        assert!(err.to_string().contains("sigcheck_factor"), "{err}");

        let cfg = CheckpointConfig { sigcheck_factor: f64::NAN, ..CheckpointConfig::default() };
        assert!(cfg.validate().is_err());
        assert!(CheckpointConfig::default().validate().is_ok());
    }

    #[test]
    fn builds_components() {
        let cfg = CheckpointConfig {
            network: NetworkType::Testnet,
            enabled: false,
            sigcheck_factor: 2.0,
        };
        let selector = cfg.selector();
        assert_eq!(selector.active_table().last_height(), Some(0));

        let guard = cfg.guard(Arc::clone(&selector));
        assert!(!guard.is_enabled());

        let estimator = cfg.estimator(selector);
        assert_eq!(estimator.sigcheck_factor(), 2.0);
    }
}
