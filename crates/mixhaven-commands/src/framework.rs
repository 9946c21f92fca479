//! Poise framework setup, shared data and error reporting.

use crate::embeds::error_embed;
use mixhaven_config::ConfigCache;
use mixhaven_store::{Store, StoreError};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Application data accessible in all commands and event handlers.
pub struct Data {
    /// Active configuration.
    pub config: Arc<ConfigCache>,
    /// Embedded database.
    pub store: Store,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// An error whose message is safe to show to the member who caused it.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct UserFacing(pub String);

impl UserFacing {
    /// Boxes a user-facing message as a command error.
    pub fn err(message: impl Into<String>) -> Error {
        Box::new(Self(message.into()))
    }
}

/// Every command the bot exposes.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crate::exchange::i2c(),
        crate::exchange::c2i(),
        crate::exchange::setrate(),
        crate::vouch::vouch(),
        crate::vouch::stats(),
        crate::ticket_panel::panel(),
        crate::tickets::claim(),
        crate::tickets::unclaim(),
        crate::tickets::sent(),
        crate::tickets::deal_not_done(),
        crate::tickets::screenshot_sent(),
        crate::tickets::close(),
        crate::general::help(),
        crate::general::ping(),
        crate::general::about(),
    ]
}

/// Framework options with every command registered under `prefix`.
///
/// The caller installs its own event handler.
pub fn framework_options(prefix: &str) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: commands(),
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(prefix.to_string()),
            ..Default::default()
        },
        pre_command: |ctx| {
            Box::pin(async move {
                info!(
                    "{} invoked `{}` in channel {}",
                    ctx.author().name,
                    ctx.command().qualified_name,
                    ctx.channel_id()
                );
            })
        },
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    }
}

/// Message shown to members for a failed command, if the error is theirs to fix.
pub fn user_message(error: &Error) -> Option<String> {
    if let Some(user) = error.downcast_ref::<UserFacing>() {
        return Some(user.0.clone());
    }

    match error.downcast_ref::<StoreError>() {
        Some(err @ (StoreError::InvalidInput { .. } | StoreError::MissingRate(_))) => {
            Some(err.to_string())
        }
        _ => None,
    }
}

/// Global error handler for the framework.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let message = user_message(&error).unwrap_or_else(|| {
                error!("Error in command '{}': {:?}", ctx.command().name, error);
                "Something went wrong while running this command.".to_string()
            });
            if let Err(e) = ctx.send(error_reply(&message)).await {
                warn!("Failed to report command error: {}", e);
            }
        }
        poise::FrameworkError::CommandCheckFailed { ctx, error, .. } => {
            if let Some(error) = error {
                error!("Check for '{}' failed: {:?}", ctx.command().name, error);
            }
            let reply = error_reply("⛔ You don't have permission to use this command.");
            if let Err(e) = ctx.send(reply).await {
                warn!("Failed to report permission error: {}", e);
            }
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!("Error in event handler for {:?}: {:?}", event.snake_case_name(), error);
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

fn error_reply(message: &str) -> poise::CreateReply {
    poise::CreateReply::default()
        .embed(error_embed(message))
        .ephemeral(true)
}
