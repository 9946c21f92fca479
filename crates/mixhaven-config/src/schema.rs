//! Configuration schema definitions using serde.

use mixhaven_common::{ChannelId, LogFormat, LoggingSetup, MixHavenError, RoleId};
use serde::{Deserialize, Serialize};

/// Main configuration structure for the MixHaven bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord connection settings.
    pub discord: DiscordConfig,
    /// Staff roles gating commands.
    pub roles: RolesConfig,
    /// Ticket channel placement.
    pub tickets: TicketsConfig,
    /// Persistence settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Prefix for text commands.
    pub prefix: String,
}

/// Guild role IDs used by permission checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RolesConfig {
    /// Founder role; passes every staff check.
    pub founder: RoleId,
    /// Administrator role.
    pub admin: RoleId,
    /// Support staff role.
    pub support: RoleId,
    /// Exchanger role.
    pub exchanger: RoleId,
}

/// Guild categories that hold ticket channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketsConfig {
    /// Category for INR to crypto tickets.
    pub inr_to_crypto_category: ChannelId,
    /// Category for crypto to INR tickets.
    pub crypto_to_inr_category: ChannelId,
    /// Category for crypto to crypto tickets.
    pub crypto_to_crypto_category: ChannelId,
    /// Category closed tickets are moved into, if any.
    pub closed_category: Option<ChannelId>,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the embedded database directory.
    pub database_path: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Console format: `compact`, `pretty` or `json`.
    pub format: String,
    /// Optional log file, rotated daily.
    pub file: Option<String>,
}

impl LoggingConfig {
    /// Converts to the runtime logging setup.
    pub fn to_setup(&self) -> LoggingSetup {
        let format = match self.format.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        LoggingSetup {
            level: self.level.clone(),
            format,
            file_path: self.file.clone(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), MixHavenError> {
        crate::validator::ConfigValidator::validate(self)
    }
}
