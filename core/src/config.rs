//! Configuration loading
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. TOML file: `ROBORALLY_CONFIG_PATH`, or `roborally.toml` in the working directory
//! 3. Environment variables prefixed `ROBORALLY_` (`__` separates nested keys,
//!    e.g. `ROBORALLY_ENERGY__MOVE_COST=250`)
//!
//! A `.env` file in the working directory is loaded into the environment first.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "ROBORALLY_CONFIG_PATH";
const DEFAULT_CONFIG_FILE: &str = "roborally.toml";
const ENV_PREFIX: &str = "ROBORALLY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default tracing directive, used when `RUST_LOG` is unset
    pub log_level: String,
    pub energy: EnergyConfig,
    pub runner: RunnerConfig,
}

/// Energy costs of primitive actions and the robot's storage limit, in watt-seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub move_cost: f64,
    pub turn_cost: f64,
    pub shoot_cost: f64,
    pub capacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Upper bound on steps when a program is stepped to completion
    pub max_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            energy: EnergyConfig::default(),
            runner: RunnerConfig::default(),
        }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            move_cost: 500.0,
            turn_cost: 100.0,
            shoot_cost: 1000.0,
            capacity: 20000.0,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { max_steps: 10_000 }
    }
}

impl Config {
    /// Load configuration from all layers and validate it
    pub fn load() -> Result<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let path = std::env::var(CONFIG_PATH_ENV).ok();
        let config = Self::load_from(path.as_deref().map(Path::new))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit file (required to exist) or the default file (optional)
    ///
    /// Keys absent from every layer fall back to `Default` during deserialization.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }

    pub fn validate(&self) -> Result<()> {
        let energy = &self.energy;
        for (name, cost) in [
            ("energy.move_cost", energy.move_cost),
            ("energy.turn_cost", energy.turn_cost),
            ("energy.shoot_cost", energy.shoot_cost),
        ] {
            if !cost.is_finite() || cost < 0.0 {
                bail!("{} must be a non-negative number, got {}", name, cost);
            }
        }
        if !energy.capacity.is_finite() || energy.capacity <= 0.0 {
            bail!("energy.capacity must be positive, got {}", energy.capacity);
        }
        if self.runner.max_steps == 0 {
            bail!("runner.max_steps must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that read or write process environment variables
    pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "roborally-config-{}-{}.toml",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).expect("create config file");
        file.write_all(contents.as_bytes()).expect("write config file");
        path
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.energy.move_cost, 500.0);
        assert_eq!(config.energy.turn_cost, 100.0);
        assert_eq!(config.runner.max_steps, 10_000);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = write_config(
            "override",
            "log_level = \"debug\"\n\n[energy]\nmove_cost = 250\n",
        );

        let _env = env_lock();
        let config = Config::load_from(Some(path.as_path())).expect("load config");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.energy.move_cost, 250.0);
        // Untouched keys keep their defaults
        assert_eq!(config.energy.turn_cost, 100.0);
        assert_eq!(config.energy.capacity, 20000.0);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("roborally-config-does-not-exist.toml");
        assert!(Config::load_from(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let mut config = Config::default();
        config.energy.shoot_cost = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let mut config = Config::default();
        config.energy.capacity = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _env = env_lock();
        let path = write_config("env", "log_level = \"debug\"\n\n[energy]\nshoot_cost = 700\n");
        std::env::set_var("ROBORALLY_ENERGY__SHOOT_COST", "2500");
        std::env::set_var("ROBORALLY_RUNNER__MAX_STEPS", "42");

        let loaded = Config::load_from(Some(path.as_path()));
        std::env::remove_var("ROBORALLY_ENERGY__SHOOT_COST");
        std::env::remove_var("ROBORALLY_RUNNER__MAX_STEPS");
        std::fs::remove_file(&path).ok();

        let config = loaded.expect("load config");
        assert_eq!(config.energy.shoot_cost, 2500.0);
        assert_eq!(config.runner.max_steps, 42);
        // File values the environment does not mention survive
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.energy.move_cost, 500.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_environment_value_fails_validation() {
        let _env = env_lock();
        std::env::set_var("ROBORALLY_ENERGY__MOVE_COST", "-1");

        let loaded = Config::load_from(None);
        std::env::remove_var("ROBORALLY_ENERGY__MOVE_COST");

        let config = loaded.expect("load config");
        assert_eq!(config.energy.move_cost, -1.0);
        assert!(config.validate().is_err());
    }
}
