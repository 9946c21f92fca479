//! Staff commands that move a ticket channel through its lifecycle.
//!
//! Ticket state lives in the channel name:
//!
//! | status    | channel name            |
//! |-----------|-------------------------|
//! | open      | `ticket-{opener}`       |
//! | claimed   | `claimed-by-{staff}`    |
//! | sent      | `closed-ticket-{staff}` |
//! | closed    | `closed-{staff}`        |
//!
//! When the channel belongs to a stored ticket the record is updated as well.

use crate::embeds::electric_embed;
use crate::framework::{Context, Error, UserFacing};
use crate::ids;
use chrono::Utc;
use mixhaven_common::{channel_slug, truncate_string, MAX_CHANNEL_NAME_LEN};
use mixhaven_store::TicketStatus;
use poise::serenity_prelude::{self as serenity, Mentionable};
use tracing::{info, warn};

/// Substring that marks a claimed ticket.
pub const CLAIMED_MARKER: &str = "claimed-by";

/// Channel name prefix for a ticket in `status`.
pub const fn channel_prefix(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "ticket-",
        TicketStatus::Claimed => "claimed-by-",
        TicketStatus::Sent => "closed-ticket-",
        TicketStatus::Closed => "closed-",
    }
}

/// Channel name for a ticket in `status`, attributed to `who`.
pub fn channel_name(status: TicketStatus, who: &str) -> String {
    let slug = channel_slug(who);
    let slug = if slug.is_empty() { "member".to_string() } else { slug };
    truncate_name(&format!("{}{}", channel_prefix(status), slug))
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_CHANNEL_NAME_LEN {
        name.to_string()
    } else {
        truncate_string(name, MAX_CHANNEL_NAME_LEN)
            .trim_end_matches('.')
            .to_string()
    }
}

/// Whether the channel name marks the ticket as claimed.
pub fn is_claimed(name: &str) -> bool {
    name.contains(CLAIMED_MARKER)
}

async fn current_channel(ctx: Context<'_>) -> Result<serenity::GuildChannel, Error> {
    ctx.channel_id()
        .to_channel(ctx.serenity_context())
        .await?
        .guild()
        .ok_or_else(|| UserFacing::err("This command only works in server channels."))
}

async fn rename_channel(ctx: Context<'_>, name: String) -> Result<(), Error> {
    ctx.channel_id()
        .edit(ctx.http(), serenity::EditChannel::new().name(name.clone()))
        .await?;
    info!("Renamed channel {} to {}", ctx.channel_id(), name);
    Ok(())
}

async fn record_status(ctx: Context<'_>, status: TicketStatus) -> Result<(), Error> {
    let updated = ctx
        .data()
        .store
        .update_ticket_status(
            ids::channel_id(ctx.channel_id()),
            status,
            ids::user_id(ctx.author().id),
            Utc::now(),
        )
        .await?;

    if let Some(ticket) = updated {
        info!("Ticket #{} moved to {:?} by {}", ticket.ticket_id, status, ctx.author().name);
    }
    Ok(())
}

async fn say_embed(ctx: Context<'_>, title: &str, body: String) -> Result<(), Error> {
    ctx.send(poise::CreateReply::default().embed(electric_embed(title, body)))
        .await?;
    Ok(())
}

/// Claim this ticket.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "c",
    check = "crate::checks::is_exchanger"
)]
pub async fn claim(ctx: Context<'_>) -> Result<(), Error> {
    let channel = current_channel(ctx).await?;
    if is_claimed(&channel.name) {
        ctx.say("Already claimed.").await?;
        return Ok(());
    }

    rename_channel(ctx, channel_name(TicketStatus::Claimed, &ctx.author().name)).await?;
    record_status(ctx, TicketStatus::Claimed).await?;
    say_embed(
        ctx,
        "🎟️ Ticket Claimed",
        format!("{} has claimed this ticket.", ctx.author().mention()),
    )
    .await
}

/// Release your claim on this ticket.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "uc",
    check = "crate::checks::is_exchanger"
)]
pub async fn unclaim(ctx: Context<'_>) -> Result<(), Error> {
    let channel = current_channel(ctx).await?;
    if !is_claimed(&channel.name) {
        ctx.say("Ticket is not claimed.").await?;
        return Ok(());
    }

    let opener = ctx
        .data()
        .store
        .ticket_by_channel(ids::channel_id(channel.id))?
        .map_or_else(|| ctx.author().name.clone(), |ticket| ticket.opener_name);

    rename_channel(ctx, channel_name(TicketStatus::Open, &opener)).await?;
    record_status(ctx, TicketStatus::Open).await?;
    say_embed(
        ctx,
        "🎟️ Unclaimed",
        format!("{} has unclaimed this ticket.", ctx.author().mention()),
    )
    .await
}

/// Mark the transaction as sent and close the ticket.
#[poise::command(prefix_command, slash_command, guild_only, check = "crate::checks::is_exchanger")]
pub async fn sent(ctx: Context<'_>) -> Result<(), Error> {
    say_embed(
        ctx,
        "✅ Transaction Sent",
        "Your transaction has been marked as **sent**.".to_string(),
    )
    .await?;
    rename_channel(ctx, channel_name(TicketStatus::Sent, &ctx.author().name)).await?;
    record_status(ctx, TicketStatus::Sent).await
}

/// Mark the deal as not completed.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "dn",
    check = "crate::checks::is_exchanger"
)]
pub async fn deal_not_done(ctx: Context<'_>) -> Result<(), Error> {
    say_embed(
        ctx,
        "⚠️ Deal Not Done",
        "This deal has been marked as **not completed**.".to_string(),
    )
    .await
}

/// Note that a payment screenshot was shared.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "ss",
    check = "crate::checks::is_exchanger"
)]
pub async fn screenshot_sent(ctx: Context<'_>) -> Result<(), Error> {
    say_embed(
        ctx,
        "📸 Screenshot Sent",
        "Proof of payment or transfer screenshot shared.".to_string(),
    )
    .await
}

/// Close and archive this ticket.
#[poise::command(prefix_command, slash_command, guild_only, check = "crate::checks::is_support")]
pub async fn close(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or_else(|| UserFacing::err("This command only works in server channels."))?;

    say_embed(ctx, "🔒 Ticket Closed", "Ticket will now be archived.".to_string()).await?;

    let mut edit = serenity::EditChannel::new()
        .name(channel_name(TicketStatus::Closed, &ctx.author().name));
    if let Some(category) = ctx.data().config.get().tickets.closed_category {
        edit = edit.category(Some(ids::to_serenity_channel(category)));
    }
    ctx.channel_id().edit(ctx.http(), edit).await?;

    let everyone = serenity::RoleId::new(guild_id.get());
    ctx.channel_id()
        .create_permission(
            ctx.http(),
            serenity::PermissionOverwrite {
                allow: serenity::Permissions::empty(),
                deny: serenity::Permissions::VIEW_CHANNEL | serenity::Permissions::SEND_MESSAGES,
                kind: serenity::PermissionOverwriteType::Role(everyone),
            },
        )
        .await?;

    if let Err(e) = record_status(ctx, TicketStatus::Closed).await {
        warn!("Closed channel {} but could not update its ticket: {}", ctx.channel_id(), e);
    }
    info!("{} closed ticket channel {}", ctx.author().name, ctx.channel_id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(channel_name(TicketStatus::Open, "Alice"), "ticket-alice");
        assert_eq!(channel_name(TicketStatus::Claimed, "Bob Trader"), "claimed-by-bob-trader");
        assert_eq!(channel_name(TicketStatus::Sent, "bob"), "closed-ticket-bob");
        assert_eq!(channel_name(TicketStatus::Closed, "carol"), "closed-carol");
        assert_eq!(channel_name(TicketStatus::Open, "!!!"), "ticket-member");
    }

    #[test]
    fn test_long_names_fit_discord_limit() {
        let name = channel_name(TicketStatus::Claimed, &"x".repeat(200));
        assert!(name.chars().count() <= MAX_CHANNEL_NAME_LEN);
        assert!(name.starts_with("claimed-by-"));
    }

    #[test]
    fn test_names_carry_status_prefix() {
        for status in [
            TicketStatus::Open,
            TicketStatus::Claimed,
            TicketStatus::Sent,
            TicketStatus::Closed,
        ] {
            let name = channel_name(status, "dave");
            assert_eq!(name, format!("{}dave", channel_prefix(status)));
            assert_eq!(is_claimed(&name), status == TicketStatus::Claimed);
        }
    }

    #[test]
    fn test_claim_marker() {
        assert!(is_claimed("claimed-by-erin"));
        assert!(!is_claimed("ticket-erin"));
    }
}
