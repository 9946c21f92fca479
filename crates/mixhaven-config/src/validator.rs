//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use mixhaven_common::{MixHavenError, Result};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.discord.token.trim().is_empty() {
            return Err(MixHavenError::validation(
                "discord.token",
                "Discord token cannot be empty",
            ));
        }

        if config.discord.prefix.trim().is_empty() {
            return Err(MixHavenError::validation(
                "discord.prefix",
                "command prefix cannot be empty",
            ));
        }

        let roles = [
            ("roles.founder", config.roles.founder.0),
            ("roles.admin", config.roles.admin.0),
            ("roles.support", config.roles.support.0),
            ("roles.exchanger", config.roles.exchanger.0),
        ];
        for (field, id) in roles {
            if id == 0 {
                return Err(MixHavenError::validation(field, "role id must be set"));
            }
        }

        let categories = [
            (
                "tickets.inr_to_crypto_category",
                config.tickets.inr_to_crypto_category.0,
            ),
            (
                "tickets.crypto_to_inr_category",
                config.tickets.crypto_to_inr_category.0,
            ),
            (
                "tickets.crypto_to_crypto_category",
                config.tickets.crypto_to_crypto_category.0,
            ),
        ];
        for (field, id) in categories {
            if id == 0 {
                return Err(MixHavenError::validation(field, "category id must be set"));
            }
        }

        if config.tickets.closed_category.is_some_and(|c| c.0 == 0) {
            return Err(MixHavenError::validation(
                "tickets.closed_category",
                "category id must be non-zero when present",
            ));
        }

        if config.storage.database_path.trim().is_empty() {
            return Err(MixHavenError::validation(
                "storage.database_path",
                "database path cannot be empty",
            ));
        }

        Ok(())
    }
}
