//! Exchange rate quotes and rate administration.

use crate::embeds::electric_embed;
use crate::framework::{Context, Error, UserFacing};
use mixhaven_common::format_amount;
use mixhaven_store::{RateEntry, RateKind};
use tracing::info;

/// Result of converting an amount at the stored rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Direction of the exchange.
    pub kind: RateKind,
    /// Amount the member offered (INR for i2c, USD for c2i).
    pub amount: f64,
    /// Tier that applied.
    pub rate: f64,
    /// Amount the member receives (USD for i2c, INR for c2i).
    pub output: f64,
}

/// Converts `amount` using the tier that applies to it.
pub fn quote(entry: &RateEntry, amount: f64) -> Result<Quote, Error> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(UserFacing::err("Amount must be a positive number."));
    }

    let rate = entry.rate_for(amount);
    if !rate.is_finite() || rate <= 0.0 {
        return Err(UserFacing::err(format!(
            "The {} rate is not usable right now; ask an admin to set it.",
            entry.rate_type
        )));
    }

    let output = match entry.rate_type {
        RateKind::I2c => amount / rate,
        RateKind::C2i => amount * rate,
    };

    Ok(Quote {
        kind: entry.rate_type,
        amount,
        rate,
        output,
    })
}

/// Title and body of a quote reply.
pub fn quote_text(quote: &Quote) -> (&'static str, String) {
    match quote.kind {
        RateKind::I2c => (
            "💱 INR → CRYPTO",
            format!(
                "**INR:** ₹{}\n**Rate:** {}/$\n**You Get:** ${:.2}",
                format_amount(quote.amount),
                format_amount(quote.rate),
                quote.output
            ),
        ),
        RateKind::C2i => (
            "💰 CRYPTO → INR",
            format!(
                "**USD:** ${}\n**Rate:** {}/$\n**You Get:** ₹{:.2}",
                format_amount(quote.amount),
                format_amount(quote.rate),
                quote.output
            ),
        ),
    }
}

/// Body of the reply after a rate change.
pub fn rate_update_text(entry: &RateEntry) -> String {
    format!(
        "**{}** → Below $50: `{}` | Above $50: `{}`",
        entry.rate_type.as_str().to_uppercase(),
        format_amount(entry.below_50),
        format_amount(entry.above_50)
    )
}

async fn send_quote(ctx: Context<'_>, kind: RateKind, amount: f64) -> Result<(), Error> {
    let entry = ctx.data().store.rate(kind)?;
    let quote = quote(&entry, amount)?;
    let (title, body) = quote_text(&quote);

    ctx.send(poise::CreateReply::default().embed(electric_embed(title, body)))
        .await?;
    Ok(())
}

/// Convert INR to crypto at the current rate.
#[poise::command(prefix_command, slash_command)]
pub async fn i2c(
    ctx: Context<'_>,
    #[description = "Amount in INR"] amount: f64,
) -> Result<(), Error> {
    send_quote(ctx, RateKind::I2c, amount).await
}

/// Convert crypto (USD) to INR at the current rate.
#[poise::command(prefix_command, slash_command)]
pub async fn c2i(
    ctx: Context<'_>,
    #[description = "Amount in USD"] amount: f64,
) -> Result<(), Error> {
    send_quote(ctx, RateKind::C2i, amount).await
}

/// Set both tiers of a rate (admin only).
#[poise::command(prefix_command, slash_command, guild_only, check = "crate::checks::is_admin")]
pub async fn setrate(
    ctx: Context<'_>,
    #[description = "Rate type: i2c or c2i"] rate_type: String,
    #[description = "Rate below $50"] below: f64,
    #[description = "Rate at or above $50"] above: f64,
) -> Result<(), Error> {
    let kind: RateKind = rate_type.parse()?;
    let entry = ctx.data().store.set_rate(kind, below, above).await?;
    info!("{} set {} rates to {}/{}", ctx.author().name, kind, below, above);

    ctx.send(
        poise::CreateReply::default()
            .embed(electric_embed("✅ Rates Updated", rate_update_text(&entry))),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixhaven_common::test_utils::assert_approx_eq;
    use proptest::prelude::*;

    const I2C: RateEntry = RateEntry {
        rate_type: RateKind::I2c,
        below_50: 96.0,
        above_50: 92.0,
    };

    const C2I: RateEntry = RateEntry {
        rate_type: RateKind::C2i,
        below_50: 92.0,
        above_50: 92.5,
    };

    #[test]
    fn test_i2c_divides_by_rate() {
        let small = quote(&I2C, 48.0).unwrap();
        assert_eq!(small.rate, 96.0);
        assert_approx_eq(small.output, 0.5, 1e-12);

        let large = quote(&I2C, 9200.0).unwrap();
        assert_eq!(large.rate, 92.0);
        assert_approx_eq(large.output, 100.0, 1e-9);
    }

    #[test]
    fn test_c2i_multiplies_by_rate() {
        let small = quote(&C2I, 10.0).unwrap();
        assert_approx_eq(small.output, 920.0, 1e-9);

        let large = quote(&C2I, 50.0).unwrap();
        assert_eq!(large.rate, 92.5);
        assert_approx_eq(large.output, 4625.0, 1e-9);
    }

    #[test]
    fn test_rejects_bad_amounts() {
        assert!(quote(&I2C, 0.0).is_err());
        assert!(quote(&I2C, -10.0).is_err());
        assert!(quote(&C2I, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_zero_rate() {
        let broken = RateEntry {
            below_50: 0.0,
            ..I2C
        };
        assert!(quote(&broken, 10.0).is_err());
        assert!(quote(&broken, 100.0).is_ok());
    }

    #[test]
    fn test_quote_text() {
        let (title, body) = quote_text(&quote(&C2I, 100.0).unwrap());
        assert_eq!(title, "💰 CRYPTO → INR");
        assert_eq!(body, "**USD:** $100.0\n**Rate:** 92.5/$\n**You Get:** ₹9250.00");

        let (title, body) = quote_text(&quote(&I2C, 1000.0).unwrap());
        assert_eq!(title, "💱 INR → CRYPTO");
        assert_eq!(body, "**INR:** ₹1000.0\n**Rate:** 92.0/$\n**You Get:** $10.87");
    }

    #[test]
    fn test_rate_update_text() {
        assert_eq!(
            rate_update_text(&C2I),
            "**C2I** → Below $50: `92.0` | Above $50: `92.5`"
        );
    }

    proptest! {
        #[test]
        fn conversion_round_trips_through_rate(amount in 0.01f64..1_000_000.0) {
            let q = quote(&I2C, amount).unwrap();
            prop_assert!((q.output * q.rate - amount).abs() <= amount * 1e-12);
        }
    }
}
