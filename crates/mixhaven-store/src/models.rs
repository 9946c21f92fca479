//! Records persisted by the store.

use chrono::{DateTime, Utc};
use mixhaven_common::{ChannelId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Amount at which the `above_50` rate takes over.
pub const RATE_THRESHOLD: f64 = 50.0;

/// Direction of an exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateKind {
    /// INR to crypto; the rate is INR per USD paid out.
    I2c,
    /// Crypto to INR; the rate is INR paid per USD received.
    C2i,
}

impl RateKind {
    /// Every known kind, in seeding order.
    pub const ALL: [Self; 2] = [Self::I2c, Self::C2i];

    /// Key used in the `rates` tree.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I2c => "i2c",
            Self::C2i => "c2i",
        }
    }

    /// Rates seeded into an empty database as `(below_50, above_50)`.
    pub const fn default_rates(self) -> (f64, f64) {
        match self {
            Self::I2c => (96.0, 92.0),
            Self::C2i => (92.0, 92.5),
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i2c" => Ok(Self::I2c),
            "c2i" => Ok(Self::C2i),
            other => Err(StoreError::invalid(
                "rate type",
                format!("`{other}` is not one of i2c, c2i"),
            )),
        }
    }
}

/// One row of the rate table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Which direction this row prices.
    pub rate_type: RateKind,
    /// Rate applied to amounts below the threshold.
    pub below_50: f64,
    /// Rate applied to amounts at or above the threshold.
    pub above_50: f64,
}

impl RateEntry {
    /// Picks the tier for an amount.
    pub fn rate_for(&self, amount: f64) -> f64 {
        if amount < RATE_THRESHOLD {
            self.below_50
        } else {
            self.above_50
        }
    }
}

/// Accumulated vouch statistics for one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Discord user ID.
    pub user_id: UserId,
    /// Number of vouches this user took part in.
    pub total_vouches: u64,
    /// Sum of vouched amounts in USD.
    pub total_amount_usd: f64,
    /// When the last vouch was recorded.
    pub last_vouch_ts: Option<DateTime<Utc>>,
    /// Free-form tag shown next to the user; empty by default.
    #[serde(default)]
    pub role_tag: String,
}

impl UserStats {
    /// A fresh row for a user's first vouch.
    pub const fn first_vouch(user_id: UserId, amount: f64, at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            total_vouches: 1,
            total_amount_usd: amount,
            last_vouch_ts: Some(at),
            role_tag: String::new(),
        }
    }

    /// Adds one vouch to an existing row.
    pub fn add_vouch(&mut self, amount: f64, at: DateTime<Utc>) {
        self.total_vouches += 1;
        self.total_amount_usd += amount;
        self.last_vouch_ts = Some(at);
    }
}

/// Exchange direction a ticket was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    /// INR to crypto.
    InrToCrypto,
    /// Crypto to INR.
    CryptoToInr,
    /// Crypto to crypto.
    CryptoToCrypto,
}

impl TicketCategory {
    /// Every category, in panel order.
    pub const ALL: [Self; 3] = [Self::InrToCrypto, Self::CryptoToInr, Self::CryptoToCrypto];

    /// Stable identifier used in component custom ids.
    pub const fn key(self) -> &'static str {
        match self {
            Self::InrToCrypto => "inr_to_crypto",
            Self::CryptoToInr => "crypto_to_inr",
            Self::CryptoToCrypto => "crypto_to_crypto",
        }
    }

    /// Human label without decoration.
    pub const fn label(self) -> &'static str {
        match self {
            Self::InrToCrypto => "INR → CRYPTO",
            Self::CryptoToInr => "CRYPTO → INR",
            Self::CryptoToCrypto => "CRYPTO → CRYPTO",
        }
    }

    /// Resolves a category from its [`key`](Self::key).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a ticket is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Waiting for staff.
    Open,
    /// An exchanger has taken it.
    Claimed,
    /// Funds were sent; the deal is done.
    Sent,
    /// Archived by support.
    Closed,
}

impl TicketStatus {
    /// Whether the ticket no longer accepts work.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Sent | Self::Closed)
    }
}

/// Values the member entered in the ticket form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicketForm {
    /// Name or tag.
    pub name: String,
    /// Amount, as typed.
    pub amount: String,
    /// Asset, e.g. USDT or BTC.
    pub asset: String,
    /// Payment method, e.g. UPI or a wallet.
    pub method: String,
}

/// A ticket about to be stored.
#[derive(Debug, Clone)]
pub struct NewTicket {
    /// Member who opened the ticket.
    pub user_id: UserId,
    /// Their username at creation time.
    pub opener_name: String,
    /// Private channel created for the ticket.
    pub channel_id: ChannelId,
    /// Exchange direction.
    pub category: TicketCategory,
    /// Submitted form.
    pub form_data: TicketForm,
}

/// A stored ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// Monotonic ticket number.
    pub ticket_id: u64,
    /// Member who opened the ticket.
    pub user_id: UserId,
    /// Their username at creation time.
    pub opener_name: String,
    /// Private channel created for the ticket.
    pub channel_id: ChannelId,
    /// Exchange direction.
    pub category: TicketCategory,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Set once the ticket reaches a terminal status.
    pub closed_at: Option<DateTime<Utc>>,
    /// Submitted form.
    pub form_data: TicketForm,
    /// Current lifecycle status.
    pub status: TicketStatus,
    /// Exchanger currently holding the ticket.
    pub claimed_by: Option<UserId>,
}
