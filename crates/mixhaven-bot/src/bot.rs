//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use crate::events::event_handler;
use mixhaven_commands::{framework_options, Data};
use mixhaven_config::{Config, ConfigCache};
use mixhaven_store::Store;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info};

/// Gateway intents the bot runs with.
///
/// Prefix commands and vouch footers need message content; role checks read
/// guild members.
pub fn intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MEMBERS
}

/// Main bot structure.
pub struct MixHavenBot {
    config: Arc<ConfigCache>,
}

impl MixHavenBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(ConfigCache::new(config)),
        }
    }

    /// Opens the store, connects to Discord and runs until shutdown.
    pub async fn start(&self) -> BotResult<()> {
        let config = self.config.get();
        let store = Store::open(&config.storage.database_path)?;
        info!("Opened database at {}", config.storage.database_path);

        let mut options = framework_options(&config.discord.prefix);
        options.event_handler = |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        };

        let shared_config = Arc::clone(&self.config);
        let framework = poise::Framework::builder()
            .options(options)
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Bot connected as: {} ({})", ready.user.name, ready.user.id);
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Slash commands registered globally");
                    Ok(Data {
                        config: shared_config,
                        store,
                    })
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(&config.discord.token, intents())
            .framework(framework)
            .await?;

        let shard_manager = Arc::clone(&client.shard_manager);
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {:?}", e);
                return;
            }
            info!("Received shutdown signal, starting graceful shutdown");
            shard_manager.shutdown_all().await;
        });

        info!("MixHaven bot is starting up with prefix `{}`", config.discord.prefix);
        client.start().await?;
        info!("MixHaven bot has shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intents_include_message_content() {
        let intents = intents();
        assert!(intents.contains(serenity::GatewayIntents::MESSAGE_CONTENT));
        assert!(intents.contains(serenity::GatewayIntents::GUILD_MESSAGES));
        assert!(intents.contains(serenity::GatewayIntents::GUILD_MEMBERS));
    }
}
