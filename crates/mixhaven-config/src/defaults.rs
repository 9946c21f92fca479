//! Default values matching the MixHaven guild.

use crate::schema::*;
use mixhaven_common::{ChannelId, RoleId};

/// Default text command prefix.
pub const DEFAULT_PREFIX: &str = "+";

/// Default database location.
pub const DEFAULT_DATABASE_PATH: &str = "mixhaven.db";

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            roles: RolesConfig::default(),
            tickets: TicketsConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            founder: RoleId(1_435_350_376_579_600_465),
            admin: RoleId(1_435_350_682_231_111_750),
            support: RoleId(1_435_350_881_292_783_666),
            exchanger: RoleId(1_435_351_384_722_509_926),
        }
    }
}

impl Default for TicketsConfig {
    fn default() -> Self {
        Self {
            inr_to_crypto_category: ChannelId(1_435_356_449_923_403_876),
            crypto_to_inr_category: ChannelId(1_435_356_616_026_488_974),
            crypto_to_crypto_category: ChannelId(1_435_356_713_174_958_265),
            closed_category: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
            file: None,
        }
    }
}
