//! Application-wide error types using thiserror.

use mixhaven_common::MixHavenError;
use mixhaven_config::ConfigError;
use mixhaven_store::StoreError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Startup error: {0}")]
    Startup(#[from] MixHavenError),

    /// The database could not be opened.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BotError::from(MixHavenError::validation("discord.token", "must not be empty"));
        assert!(err.to_string().starts_with("Startup error:"));

        let err = BotError::from(StoreError::MissingRate("c2i".to_string()));
        assert_eq!(err.to_string(), "Storage error: No rate configured for `c2i`");
    }
}
