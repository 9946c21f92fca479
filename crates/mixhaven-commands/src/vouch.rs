//! Vouch ledger: posting vouches, crediting both parties and showing stats.
//!
//! A vouch embed carries its data in the footer as
//! `mixhaven_vouch|{exchanger_id}|{amount}`. Any non-bot message whose first
//! embed has such a footer credits the exchanger and the message author.

use crate::embeds::electric_embed;
use crate::framework::{Context, Data, Error, UserFacing};
use crate::ids;
use chrono::Utc;
use mixhaven_common::{format_amount, format_timestamp, UserId};
use mixhaven_store::{Store, StoreError, StoreResult, UserStats};
use poise::serenity_prelude::{self as serenity, Mentionable};
use tracing::{debug, warn};

/// Marker every vouch footer starts with.
pub const VOUCH_FOOTER_TAG: &str = "mixhaven_vouch";

/// Data carried by a vouch embed footer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VouchFooter {
    /// Member being vouched for.
    pub exchanger: UserId,
    /// Exchanged amount in USD.
    pub amount: f64,
}

impl VouchFooter {
    /// Footer text for this vouch.
    pub fn to_footer_text(&self) -> String {
        format!("{VOUCH_FOOTER_TAG}|{}|{}", self.exchanger, format_amount(self.amount))
    }

    /// Parses a footer, returning `None` for anything that is not a well-formed vouch.
    pub fn parse(text: &str) -> Option<Self> {
        if !text.starts_with(VOUCH_FOOTER_TAG) {
            return None;
        }

        let parts: Vec<&str> = text.split('|').collect();
        let [_, exchanger, amount] = parts.as_slice() else {
            return None;
        };

        let exchanger = exchanger.trim().parse::<u64>().ok().filter(|id| *id != 0)?;
        let amount = amount.trim().parse::<f64>().ok()?;

        Some(Self {
            exchanger: UserId(exchanger),
            amount,
        })
    }
}

/// Description of the public vouch embed.
pub fn vouch_description(exchanger_mention: &str, amount: f64, kind: &str) -> String {
    format!(
        "🐾 +rep {exchanger_mention}\n**EXCHANGED {} [{}$]**",
        kind.trim().to_uppercase(),
        format_amount(amount)
    )
}

/// The public vouch embed: gold, with the machine-readable footer.
pub fn vouch_embed(exchanger_mention: &str, footer: &VouchFooter, kind: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .description(vouch_description(exchanger_mention, footer.amount, kind))
        .colour(serenity::Colour::GOLD)
        .footer(serenity::CreateEmbedFooter::new(footer.to_footer_text()))
}

/// Confirmation posted after both parties are credited.
pub fn recorded_embed(exchanger: UserId, client: UserId, amount: f64) -> serenity::CreateEmbed {
    electric_embed(
        "✅ Vouch Recorded",
        format!(
            "**Exchanger:** {}\n**Client:** {}\n**Amount:** ${}\nBoth stats updated.",
            ids::to_serenity_user(exchanger).mention(),
            ids::to_serenity_user(client).mention(),
            format_amount(amount),
        ),
    )
}

/// The vouch footer of a member message, if it carries one.
///
/// Only the first embed is read and bot-authored messages never count, so the
/// bot's own vouch embeds are credited once, by the `v` command.
pub fn vouch_footer_of(message: &serenity::Message) -> Option<VouchFooter> {
    if message.author.bot {
        return None;
    }
    message
        .embeds
        .first()
        .and_then(|embed| embed.footer.as_ref())
        .and_then(|footer| VouchFooter::parse(&footer.text))
}

/// Credits both sides of a vouch in the ledger.
pub async fn credit_vouch(
    store: &Store,
    footer: &VouchFooter,
    client: UserId,
) -> StoreResult<(UserStats, UserStats)> {
    debug!("Crediting vouch from {} for exchanger {}", client, footer.exchanger);
    store
        .record_vouch(footer.exchanger, client, footer.amount, Utc::now())
        .await
}

/// Title and body of a stats reply.
pub fn stats_text(mention: &str, stats: Option<&UserStats>) -> (&'static str, String) {
    match stats {
        Some(stats) => {
            let mut body = format!(
                "**User:** {mention}\n**Total Vouches:** {}\n**Total Amount:** ${:.2}",
                stats.total_vouches, stats.total_amount_usd
            );
            if let Some(at) = stats.last_vouch_ts {
                body.push_str(&format!("\n**Last Vouch:** {}", format_timestamp(at)));
            }
            ("📊 Vouch Stats", body)
        }
        None => ("📊 Stats", format!("No vouches found for {mention}.")),
    }
}

/// Post a vouch for an exchanger and credit you both.
#[poise::command(prefix_command, slash_command, guild_only, rename = "v")]
pub async fn vouch(
    ctx: Context<'_>,
    #[description = "Exchanger you traded with"] user: serenity::User,
    #[description = "Amount in USD"] amount: f64,
    #[description = "What was exchanged, e.g. USDT"]
    #[rest]
    kind: String,
) -> Result<(), Error> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(UserFacing::err("Amount must be a positive number."));
    }
    if user.id == ctx.author().id {
        return Err(UserFacing::err("You can't vouch for yourself."));
    }
    if user.bot {
        return Err(UserFacing::err("Bots can't receive vouches."));
    }

    let footer = VouchFooter {
        exchanger: ids::user_id(user.id),
        amount,
    };
    let mention = user.mention().to_string();
    ctx.send(poise::CreateReply::default().embed(vouch_embed(&mention, &footer, &kind)))
        .await?;

    let client = ids::user_id(ctx.author().id);
    credit_vouch(&ctx.data().store, &footer, client).await?;

    if let Context::Prefix(prefix_ctx) = ctx {
        if let Err(e) = prefix_ctx.msg.react(ctx.http(), '✅').await {
            warn!("Failed to react to vouch from {}: {}", client, e);
        }
    }

    ctx.send(poise::CreateReply::default().embed(recorded_embed(footer.exchanger, client, amount)))
        .await?;
    Ok(())
}

/// Show vouch statistics for yourself or another member.
#[poise::command(prefix_command, slash_command)]
pub async fn stats(
    ctx: Context<'_>,
    #[description = "Member to look up"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    let stats = ctx.data().store.user_stats(ids::user_id(target.id))?;
    let (title, body) = stats_text(&target.mention().to_string(), stats.as_ref());

    ctx.send(poise::CreateReply::default().embed(electric_embed(title, body)))
        .await?;
    Ok(())
}

/// Credits a vouch posted as a member message carrying a vouch footer.
pub async fn handle_message(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
) -> Result<(), Error> {
    let Some(footer) = vouch_footer_of(message) else {
        return Ok(());
    };

    let client = ids::user_id(message.author.id);
    match credit_vouch(&data.store, &footer, client).await {
        Ok(_) => {}
        Err(err @ StoreError::InvalidInput { .. }) => {
            warn!("Ignoring vouch from {}: {}", client, err);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    message
        .channel_id
        .send_message(
            &ctx.http,
            serenity::CreateMessage::new().embed(recorded_embed(footer.exchanger, client, footer.amount)),
        )
        .await?;
    Ok(())
}
