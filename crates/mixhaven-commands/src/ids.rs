//! Conversions between serenity ids and the workspace newtypes.

use mixhaven_common::{ChannelId, UserId};
use poise::serenity_prelude as serenity;

/// Serenity user id to store key.
pub const fn user_id(id: serenity::UserId) -> UserId {
    UserId(id.get())
}

/// Serenity channel id to store key.
pub const fn channel_id(id: serenity::ChannelId) -> ChannelId {
    ChannelId(id.get())
}

/// Configured channel id to serenity.
pub const fn to_serenity_channel(id: ChannelId) -> serenity::ChannelId {
    serenity::ChannelId::new(id.0)
}

/// Stored user id to serenity.
pub const fn to_serenity_user(id: UserId) -> serenity::UserId {
    serenity::UserId::new(id.0)
}
