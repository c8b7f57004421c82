//! Configuration loader for bookstore-rs
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::PathBuf;

use config::{Config, Environment as EnvSource, File};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "BOOKSTORE_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "BOOKSTORE_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "BOOKSTORE";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources in order of priority:
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `BOOKSTORE__*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if both `BOOKSTORE_CONFIG_DIR` and
    /// `BOOKSTORE_CONFIG_FILE` are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "BOOKSTORE_CONFIG_DIR and BOOKSTORE_CONFIG_FILE cannot both be set. \
                 Use BOOKSTORE_CONFIG_DIR for layered configuration or \
                 BOOKSTORE_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Overrides the single configuration file (e.g. from a CLI flag).
    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_file = Some(path);
        self
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources.
    ///
    /// If a single configuration file is set, loads only that file (plus
    /// environment variable overrides). Otherwise performs layered loading
    /// from the configuration directory.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();

        if let Some(file) = &self.config_file {
            builder = builder.add_source(File::from(file.clone()).required(true));
        } else {
            builder = builder
                .add_source(File::from(self.config_dir.join("default.toml")).required(false))
                .add_source(
                    File::from(
                        self.config_dir
                            .join(format!("{}.toml", self.environment.as_str())),
                    )
                    .required(false),
                )
                .add_source(File::from(self.config_dir.join("local.toml")).required(false));
        }

        let config = builder
            .add_source(
                EnvSource::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_defaults_to_config_dir() {
        // Construct directly so the test does not depend on ambient env vars.
        let loader = ConfigLoader {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::Development,
        };
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
    }

    #[test]
    fn missing_layers_fall_back_to_defaults() {
        let loader = ConfigLoader {
            config_dir: PathBuf::from("definitely-not-a-real-directory"),
            config_file: None,
            environment: AppEnvironment::Test,
        };
        let settings = loader.load().expect("defaults should load");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.application.name, "bookstore-rs");
    }
}
