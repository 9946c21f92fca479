//! Configuration loading from YAML files with environment overrides.

use crate::schema::Config;
use mixhaven_common::MixHavenError;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "MIXHAVEN_CONFIG_PATH";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error.
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] MixHavenError),
}

/// Configuration loader for the application.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from a YAML file with environment variable overrides.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        info!("Loading configuration from {}", path.as_ref().display());
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::parse(&content)?;

        Self::apply_env_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from the first source found.
    ///
    /// Order: `MIXHAVEN_CONFIG_PATH`, `config.yaml`, `config.yml`, then
    /// defaults. Environment overrides apply in every case.
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Self::load_config(config_path);
        }

        for candidate in ["config.yaml", "config.yml"] {
            if Path::new(candidate).exists() {
                return Self::load_config(candidate);
            }
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration YAML without overrides or validation.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies environment variable overrides to configuration.
    pub fn apply_env_overrides(config: &mut Config) {
        Self::apply_overrides(config, |key| env::var(key).ok());
    }

    /// Applies overrides from an arbitrary lookup; `apply_env_overrides` uses the process environment.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            config.discord.token = token;
        }

        if let Some(prefix) = lookup("MIXHAVEN_PREFIX") {
            config.discord.prefix = prefix;
        }

        if let Some(path) = lookup("MIXHAVEN_DB_PATH") {
            config.storage.database_path = path;
        }

        if let Some(level) = lookup("MIXHAVEN_LOG_LEVEL") {
            config.logging.level = level;
        }
    }
}
