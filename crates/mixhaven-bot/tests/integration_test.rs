//! Integration tests for mixhaven-bot crate.
//!
//! The gateway client is not started here; these cover the startup path up to
//! the point where a Discord connection would be made.

use mixhaven_bot::{intents, BotError, MixHavenBot};
use mixhaven_common::test_utils::{init_test_logging, temp_dir};
use mixhaven_config::{ConfigError, ConfigLoader};
use mixhaven_store::{RateKind, Store};
use poise::serenity_prelude as serenity;

#[test]
fn test_startup_config_from_file() {
    init_test_logging();
    let dir = temp_dir();
    let db_path = dir.path().join("bot.db");
    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        format!(
            "discord:\n  token: \"test-token\"\n  prefix: \"!\"\nstorage:\n  database_path: \"{}\"\n",
            db_path.display()
        ),
    )
    .unwrap();

    let config = ConfigLoader::load_config(&config_path).unwrap();
    assert_eq!(config.discord.prefix, "!");

    let store = Store::open(&config.storage.database_path).unwrap();
    assert_eq!(store.rate(RateKind::I2c).unwrap().below_50, 96.0);

    let _bot = MixHavenBot::new(config);
}

#[test]
fn test_invalid_config_is_a_config_error() {
    let dir = temp_dir();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "discord: [not, a, map]\n").unwrap();

    let err = ConfigLoader::load_config(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
    assert!(BotError::from(err).to_string().starts_with("Configuration error:"));
}

#[test]
fn test_intents_read_messages() {
    assert!(intents().contains(serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS));
    assert!(intents().contains(serenity::GatewayIntents::MESSAGE_CONTENT));
}
