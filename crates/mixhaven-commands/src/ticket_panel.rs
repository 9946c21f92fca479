//! Ticket panel: select menu, exchange form modal and ticket channel creation.
//!
//! Components are routed by custom id from the gateway handler rather than
//! by a collector, so a panel posted before a restart keeps working.

use crate::embeds::electric_embed;
use crate::framework::{Context, Data, Error};
use crate::ids;
use crate::tickets::channel_name;
use chrono::Utc;
use mixhaven_common::{truncate_string, ChannelId};
use mixhaven_config::TicketsConfig;
use mixhaven_store::{NewTicket, TicketCategory, TicketForm, TicketStatus};
use poise::serenity_prelude::{self as serenity, Mentionable};
use tracing::{debug, error, info, warn};

/// Custom id of the exchange type select menu.
pub const PANEL_SELECT_ID: &str = "mixhaven_ticket_select";

/// Prefix of the form modal custom id; the category key follows it.
pub const FORM_MODAL_PREFIX: &str = "mixhaven_ticket_form:";

const FIELD_NAME: &str = "name";
const FIELD_AMOUNT: &str = "amount";
const FIELD_ASSET: &str = "type";
const FIELD_METHOD: &str = "method";

/// Longest value shown per form field in the welcome embed.
const MAX_FIELD_LEN: usize = 200;

/// Emoji shown before a category in the select menu.
pub const fn category_emoji(category: TicketCategory) -> &'static str {
    match category {
        TicketCategory::InrToCrypto => "💵",
        TicketCategory::CryptoToInr => "💰",
        TicketCategory::CryptoToCrypto => "🔁",
    }
}

/// Option description shown in the select menu.
pub const fn category_description(category: TicketCategory) -> &'static str {
    match category {
        TicketCategory::InrToCrypto => "Exchange INR to Crypto",
        TicketCategory::CryptoToInr => "Exchange Crypto to INR",
        TicketCategory::CryptoToCrypto => "Exchange between cryptos",
    }
}

/// Guild category configured for a ticket category.
pub const fn category_channel(tickets: &TicketsConfig, category: TicketCategory) -> ChannelId {
    match category {
        TicketCategory::InrToCrypto => tickets.inr_to_crypto_category,
        TicketCategory::CryptoToInr => tickets.crypto_to_inr_category,
        TicketCategory::CryptoToCrypto => tickets.crypto_to_crypto_category,
    }
}

/// The persistent exchange type select menu.
pub fn panel_select_menu() -> serenity::CreateSelectMenu {
    let options = TicketCategory::ALL
        .into_iter()
        .map(|category| {
            serenity::CreateSelectMenuOption::new(
                format!("{} {}", category_emoji(category), category.label()),
                category.key(),
            )
            .description(category_description(category))
        })
        .collect();

    serenity::CreateSelectMenu::new(
        PANEL_SELECT_ID,
        serenity::CreateSelectMenuKind::String { options },
    )
    .placeholder("Select Exchange Type...")
}

/// Custom id of the form modal for a category.
pub fn form_modal_id(category: TicketCategory) -> String {
    format!("{FORM_MODAL_PREFIX}{}", category.key())
}

/// Category encoded in a form modal custom id.
pub fn category_from_modal_id(custom_id: &str) -> Option<TicketCategory> {
    custom_id
        .strip_prefix(FORM_MODAL_PREFIX)
        .and_then(TicketCategory::from_key)
}

/// The exchange form opened from the panel.
pub fn form_modal(category: TicketCategory) -> serenity::CreateModal {
    let input = |label: &str, id: &str| {
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(serenity::InputTextStyle::Short, label, id)
                .required(true),
        )
    };

    serenity::CreateModal::new(form_modal_id(category), "MixHaven Exchange Form").components(vec![
        input("Name / Tag", FIELD_NAME),
        input("Amount", FIELD_AMOUNT),
        input("Type (USDT, BTC, etc.)", FIELD_ASSET),
        input("Payment Method (UPI/Wallet)", FIELD_METHOD),
    ])
}

/// Reads the submitted form out of modal rows.
pub fn parse_form(rows: &[serenity::ActionRow]) -> TicketForm {
    let value = |id: &str| {
        rows.iter()
            .flat_map(|row| row.components.iter())
            .find_map(|component| match component {
                serenity::ActionRowComponent::InputText(input) if input.custom_id == id => {
                    input.value.clone()
                }
                _ => None,
            })
            .map(|v| truncate_string(v.trim(), MAX_FIELD_LEN))
            .unwrap_or_default()
    };

    TicketForm {
        name: value(FIELD_NAME),
        amount: value(FIELD_AMOUNT),
        asset: value(FIELD_ASSET),
        method: value(FIELD_METHOD),
    }
}

/// Body of the welcome embed posted in a new ticket channel.
pub fn welcome_text(form: &TicketForm) -> String {
    format!(
        "Please describe your issue below.\n\n**Name:** {}\n**Amount:** {}\n**Type:** {}\n**Method:** {}",
        form.name, form.amount, form.asset, form.method
    )
}

/// Post the ticket panel (admin only).
#[poise::command(prefix_command, slash_command, guild_only, check = "crate::checks::is_admin")]
pub async fn panel(ctx: Context<'_>) -> Result<(), Error> {
    let reply = poise::CreateReply::default()
        .embed(electric_embed(
            "🎟️ MixHaven Ticket Panel",
            "Select an exchange type below to open a ticket.",
        ))
        .components(vec![serenity::CreateActionRow::SelectMenu(panel_select_menu())]);

    ctx.send(reply).await?;
    Ok(())
}

/// Routes ticket panel interactions. Other interactions are ignored.
pub async fn handle_interaction(
    ctx: &serenity::Context,
    data: &Data,
    interaction: &serenity::Interaction,
) -> Result<(), Error> {
    match interaction {
        serenity::Interaction::Component(component) if component.data.custom_id == PANEL_SELECT_ID => {
            open_form(ctx, component).await
        }
        serenity::Interaction::Modal(modal) if modal.data.custom_id.starts_with(FORM_MODAL_PREFIX) => {
            create_ticket(ctx, data, modal).await
        }
        _ => Ok(()),
    }
}

async fn open_form(ctx: &serenity::Context, component: &serenity::ComponentInteraction) -> Result<(), Error> {
    let serenity::ComponentInteractionDataKind::StringSelect { values } = &component.data.kind else {
        return Ok(());
    };

    let Some(category) = values.first().and_then(|v| TicketCategory::from_key(v)) else {
        warn!("Unknown ticket panel selection {:?}", values);
        return Ok(());
    };

    debug!("{} selected {} on the ticket panel", component.user.name, category);
    component
        .create_response(&ctx.http, serenity::CreateInteractionResponse::Modal(form_modal(category)))
        .await?;
    Ok(())
}

/// Ephemeral reply shown once a ticket form has been handled.
pub fn ticket_response_text(channel_mention: Option<&str>) -> String {
    match channel_mention {
        Some(mention) => format!("✅ Ticket created: {mention}"),
        None => "❌ Could not create your ticket. Please try again or contact staff.".to_string(),
    }
}

async fn create_ticket(
    ctx: &serenity::Context,
    data: &Data,
    modal: &serenity::ModalInteraction,
) -> Result<(), Error> {
    let Some(category) = category_from_modal_id(&modal.data.custom_id) else {
        warn!("Malformed ticket form id {}", modal.data.custom_id);
        return Ok(());
    };

    let Some(guild_id) = modal.guild_id else {
        modal
            .create_response(
                &ctx.http,
                serenity::CreateInteractionResponse::Message(
                    serenity::CreateInteractionResponseMessage::new()
                        .content("Tickets can only be opened inside the server.")
                        .ephemeral(true),
                ),
            )
            .await?;
        return Ok(());
    };

    modal
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Defer(
                serenity::CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await?;

    // The deferred reply must always be resolved, whatever happened to the channel.
    let mention = match open_ticket(ctx, data, modal, guild_id, category).await {
        Ok(channel) => Some(channel.mention().to_string()),
        Err(e) => {
            error!("Failed to open {} ticket for {}: {}", category, modal.user.name, e);
            None
        }
    };

    modal
        .edit_response(
            &ctx.http,
            serenity::EditInteractionResponse::new()
                .content(ticket_response_text(mention.as_deref())),
        )
        .await?;
    Ok(())
}

/// Creates the private channel, greets the opener and records the ticket.
///
/// Only channel creation is fatal; once the channel exists it is returned so
/// the opener can be pointed at it.
async fn open_ticket(
    ctx: &serenity::Context,
    data: &Data,
    modal: &serenity::ModalInteraction,
    guild_id: serenity::GuildId,
    category: TicketCategory,
) -> Result<serenity::GuildChannel, Error> {
    let form = parse_form(&modal.data.components);
    let user = &modal.user;
    let parent = category_channel(&data.config.get().tickets, category);
    let everyone = serenity::RoleId::new(guild_id.get());
    let bot_id = ctx.cache.current_user().id;

    let private = serenity::Permissions::VIEW_CHANNEL | serenity::Permissions::SEND_MESSAGES;
    let overwrites = vec![
        serenity::PermissionOverwrite {
            allow: serenity::Permissions::empty(),
            deny: serenity::Permissions::VIEW_CHANNEL,
            kind: serenity::PermissionOverwriteType::Role(everyone),
        },
        serenity::PermissionOverwrite {
            allow: private,
            deny: serenity::Permissions::empty(),
            kind: serenity::PermissionOverwriteType::Member(user.id),
        },
        serenity::PermissionOverwrite {
            allow: private,
            deny: serenity::Permissions::empty(),
            kind: serenity::PermissionOverwriteType::Member(bot_id),
        },
    ];

    let channel = guild_id
        .create_channel(
            &ctx.http,
            serenity::CreateChannel::new(channel_name(TicketStatus::Open, &user.name))
                .kind(serenity::ChannelType::Text)
                .category(ids::to_serenity_channel(parent))
                .permissions(overwrites),
        )
        .await?;

    if let Err(e) = channel
        .send_message(
            &ctx.http,
            serenity::CreateMessage::new().embed(electric_embed(
                "🎫 Welcome to MixHaven Support!",
                welcome_text(&form),
            )),
        )
        .await
    {
        warn!("Failed to post welcome message in {}: {}", channel.name, e);
    }

    let new_ticket = NewTicket {
        user_id: ids::user_id(user.id),
        opener_name: user.name.clone(),
        channel_id: ids::channel_id(channel.id),
        category,
        form_data: form,
    };
    match data.store.create_ticket(new_ticket, Utc::now()).await {
        Ok(record) => info!(
            "Opened ticket #{} ({}) for {} in {}",
            record.ticket_id, category, user.name, channel.name
        ),
        Err(e) => warn!("Ticket channel {} opened but not recorded: {}", channel.name, e),
    }

    Ok(channel)
}
