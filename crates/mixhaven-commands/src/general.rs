//! Help, latency and about commands.

use crate::embeds::electric_embed;
use crate::framework::{Context, Error};
use std::time::Duration;

/// Command listing shown by `help`, with every command under `prefix`.
pub fn help_text(prefix: &str) -> String {
    let p = prefix;
    format!(
        "**Exchange**\n\
         `{p}i2c <amount>` – INR → CRYPTO\n\
         `{p}c2i <amount>` – CRYPTO → INR\n\
         `{p}setrate i2c/c2i <below> <above>` – Admin only\n\
         \n\
         **Vouches**\n\
         `{p}v @user <amount> <type>` – Create vouch\n\
         `{p}stats [@user]` – View vouch stats\n\
         \n\
         **Tickets**\n\
         `{p}panel` – Create ticket panel\n\
         `{p}c`, `{p}uc`, `{p}sent`, `{p}dn`, `{p}ss`, `{p}close` – Manage tickets\n\
         \n\
         **General**\n\
         `{p}help`, `{p}ping`, `{p}about`"
    )
}

/// Body of the `ping` reply.
pub fn latency_text(latency: Duration) -> String {
    format!("Latency: {} ms", latency.as_millis())
}

/// List the bot's commands.
#[poise::command(prefix_command, slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = ctx.data().config.get().discord.prefix.clone();
    ctx.send(
        poise::CreateReply::default()
            .embed(electric_embed("📘 MixHaven Bot Commands", help_text(&prefix))),
    )
    .await?;
    Ok(())
}

/// Show gateway latency.
#[poise::command(prefix_command, slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    ctx.send(poise::CreateReply::default().embed(electric_embed("🏓 Pong!", latency_text(latency))))
        .await?;
    Ok(())
}

/// What MixHaven is.
#[poise::command(prefix_command, slash_command)]
pub async fn about(ctx: Context<'_>) -> Result<(), Error> {
    ctx.send(poise::CreateReply::default().embed(electric_embed(
        "ℹ️ About MixHaven",
        "A secure and trusted exchange community powered by MixHaven Bot.",
    )))
    .await?;
    Ok(())
}
