//! Embed styling shared by every reply.

use poise::serenity_prelude::{Colour, CreateEmbed, CreateEmbedFooter};

/// Brand footer on every bot embed except vouches.
pub const BRAND_FOOTER: &str = "MixHaven Exchange System • Secure • Verified";

/// Brand color, RGB(0, 102, 255).
pub const BRAND_COLOUR: Colour = Colour::from_rgb(0, 102, 255);

/// Colour used for error replies.
pub const ERROR_COLOUR: Colour = Colour::from_rgb(220, 53, 69);

/// Standard branded embed.
pub fn electric_embed(title: impl Into<String>, description: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .colour(BRAND_COLOUR)
        .footer(CreateEmbedFooter::new(BRAND_FOOTER))
}

/// Embed for a failed command.
pub fn error_embed(message: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .description(message)
        .colour(ERROR_COLOUR)
}
