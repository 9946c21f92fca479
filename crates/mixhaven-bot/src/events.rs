//! Gateway events that are not commands.

use mixhaven_commands::{ticket_panel, vouch, Data, Error};
use poise::serenity_prelude as serenity;
use tracing::info;

/// Central event handler for Discord events.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!(
                "{} is online in {} guilds",
                data_about_bot.user.name,
                data_about_bot.guilds.len()
            );
        }
        serenity::FullEvent::Message { new_message } => {
            vouch::handle_message(ctx, data, new_message).await?;
        }
        serenity::FullEvent::InteractionCreate { interaction } => {
            ticket_panel::handle_interaction(ctx, data, interaction).await?;
        }
        _ => {}
    }
    Ok(())
}
