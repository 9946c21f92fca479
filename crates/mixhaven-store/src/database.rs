//! sled-backed store for vouch statistics, exchange rates and tickets.
//!
//! Records are JSON-encoded. Numeric keys are big-endian so trees iterate in
//! id order.

use crate::error::{StoreError, StoreResult};
use crate::models::{
    NewTicket, RateEntry, RateKind, TicketRecord, TicketStatus, UserStats,
};
use chrono::{DateTime, Utc};
use mixhaven_common::{ChannelId, UserId};
use serde::{de::DeserializeOwned, Serialize};
use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionalTree,
};
use sled::Transactional;
use std::path::Path;
use tracing::{debug, info};

const USERS_TREE: &str = "users";
const RATES_TREE: &str = "rates";
const TICKETS_TREE: &str = "tickets";
const TICKET_CHANNELS_TREE: &str = "ticket_channels";

/// Handle to the bot's embedded database. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Store {
    db: sled::Db,
    users: sled::Tree,
    rates: sled::Tree,
    tickets: sled::Tree,
    ticket_channels: sled::Tree,
}

impl Store {
    /// Opens (or creates) the database at `path` and seeds default rates.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        info!("Opening database at {}", path.as_ref().display());

        let db = sled::Config::default()
            .path(path.as_ref())
            .flush_every_ms(Some(1000))
            .open()?;

        let store = Self {
            users: db.open_tree(USERS_TREE)?,
            rates: db.open_tree(RATES_TREE)?,
            tickets: db.open_tree(TICKETS_TREE)?,
            ticket_channels: db.open_tree(TICKET_CHANNELS_TREE)?,
            db,
        };

        store.seed_default_rates()?;
        info!("Database initialized");
        Ok(store)
    }

    /// Inserts the default rate rows that are missing. Existing rows are kept.
    pub fn seed_default_rates(&self) -> StoreResult<()> {
        for kind in RateKind::ALL {
            let (below_50, above_50) = kind.default_rates();
            let entry = RateEntry {
                rate_type: kind,
                below_50,
                above_50,
            };
            let inserted = self
                .rates
                .compare_and_swap(kind.as_str(), None as Option<&[u8]>, Some(encode(&entry)?))?
                .is_ok();
            if inserted {
                debug!("Seeded default {} rates: {}/{}", kind, below_50, above_50);
            }
        }
        Ok(())
    }

    /// Current rate row for a kind.
    pub fn rate(&self, kind: RateKind) -> StoreResult<RateEntry> {
        self.rates
            .get(kind.as_str())?
            .map(|bytes| decode(&bytes))
            .transpose()?
            .ok_or_else(|| StoreError::MissingRate(kind.to_string()))
    }

    /// Replaces both tiers of a rate row.
    pub async fn set_rate(&self, kind: RateKind, below_50: f64, above_50: f64) -> StoreResult<RateEntry> {
        ensure_positive("below rate", below_50)?;
        ensure_positive("above rate", above_50)?;

        let entry = RateEntry {
            rate_type: kind,
            below_50,
            above_50,
        };
        self.rates.insert(kind.as_str(), encode(&entry)?)?;
        self.db.flush_async().await?;

        info!("Rates for {} set to {}/{}", kind, below_50, above_50);
        Ok(entry)
    }

    /// Credits one vouch of `amount` USD to a single user.
    pub async fn add_user_stat(
        &self,
        user_id: UserId,
        amount: f64,
        at: DateTime<Utc>,
    ) -> StoreResult<UserStats> {
        ensure_positive("amount", amount)?;

        let stats = self
            .users
            .transaction(|tx| credit_user(tx, user_id, amount, at))?;
        self.db.flush_async().await?;

        debug!(
            "User {} now has {} vouches totalling ${:.2}",
            user_id, stats.total_vouches, stats.total_amount_usd
        );
        Ok(stats)
    }

    /// Credits both parties of a vouch atomically.
    ///
    /// Returns the updated `(exchanger, client)` rows.
    pub async fn record_vouch(
        &self,
        exchanger: UserId,
        client: UserId,
        amount: f64,
        at: DateTime<Utc>,
    ) -> StoreResult<(UserStats, UserStats)> {
        ensure_positive("amount", amount)?;
        if exchanger == client {
            return Err(StoreError::invalid("vouch", "a member cannot vouch for themselves"));
        }

        let pair = self.users.transaction(|tx| {
            let exchanger_stats = credit_user(tx, exchanger, amount, at)?;
            let client_stats = credit_user(tx, client, amount, at)?;
            Ok::<_, ConflictableTransactionError<StoreError>>((exchanger_stats, client_stats))
        })?;
        self.db.flush_async().await?;

        info!(
            "Recorded vouch of ${} between exchanger {} and client {}",
            amount, exchanger, client
        );
        Ok(pair)
    }

    /// Statistics for a user, if they have ever been vouched.
    pub fn user_stats(&self, user_id: UserId) -> StoreResult<Option<UserStats>> {
        self.users
            .get(user_key(user_id))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    /// Stores a new open ticket and indexes it by channel.
    pub async fn create_ticket(&self, new: NewTicket, at: DateTime<Utc>) -> StoreResult<TicketRecord> {
        let record = TicketRecord {
            ticket_id: self.db.generate_id()?,
            user_id: new.user_id,
            opener_name: new.opener_name,
            channel_id: new.channel_id,
            category: new.category,
            created_at: at,
            closed_at: None,
            form_data: new.form_data,
            status: TicketStatus::Open,
            claimed_by: None,
        };

        let id_key = record.ticket_id.to_be_bytes();
        let channel_key = record.channel_id.0.to_be_bytes();
        let bytes = encode(&record)?;

        (&self.tickets, &self.ticket_channels).transaction(|(tickets, channels)| {
            tickets.insert(&id_key[..], bytes.clone())?;
            channels.insert(&channel_key[..], &id_key[..])?;
            Ok::<_, ConflictableTransactionError<StoreError>>(())
        })?;
        self.db.flush_async().await?;

        info!(
            "Created ticket #{} ({}) for user {} in channel {}",
            record.ticket_id, record.category, record.user_id, record.channel_id
        );
        Ok(record)
    }

    /// Ticket bound to a channel, if the channel is a tracked ticket.
    pub fn ticket_by_channel(&self, channel_id: ChannelId) -> StoreResult<Option<TicketRecord>> {
        let Some(id_key) = self.ticket_channels.get(channel_id.0.to_be_bytes())? else {
            return Ok(None);
        };

        self.tickets
            .get(id_key)?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    /// Moves the ticket in `channel_id` to `status`.
    ///
    /// Claiming records `actor` as the holder, reopening clears it and the
    /// terminal statuses stamp `closed_at` once. Returns `None` for channels
    /// that are not tracked tickets.
    pub async fn update_ticket_status(
        &self,
        channel_id: ChannelId,
        status: TicketStatus,
        actor: UserId,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<TicketRecord>> {
        let Some(mut record) = self.ticket_by_channel(channel_id)? else {
            debug!("Channel {} is not a tracked ticket", channel_id);
            return Ok(None);
        };

        record.status = status;
        match status {
            TicketStatus::Claimed => record.claimed_by = Some(actor),
            TicketStatus::Open => record.claimed_by = None,
            TicketStatus::Sent | TicketStatus::Closed => {}
        }
        if status.is_terminal() {
            record.closed_at.get_or_insert(at);
        }

        self.tickets
            .insert(record.ticket_id.to_be_bytes(), encode(&record)?)?;
        self.db.flush_async().await?;

        debug!("Ticket #{} is now {:?}", record.ticket_id, status);
        Ok(Some(record))
    }
}

fn credit_user(
    tx: &TransactionalTree,
    user_id: UserId,
    amount: f64,
    at: DateTime<Utc>,
) -> ConflictableTransactionResult<UserStats, StoreError> {
    let key = user_key(user_id);
    let stats = match tx.get(&key[..])? {
        Some(bytes) => {
            let mut stats: UserStats = decode(&bytes).map_err(ConflictableTransactionError::Abort)?;
            stats.add_vouch(amount, at);
            stats
        }
        None => UserStats::first_vouch(user_id, amount, at),
    };

    let bytes = encode(&stats).map_err(ConflictableTransactionError::Abort)?;
    tx.insert(&key[..], bytes)?;
    Ok(stats)
}

const fn user_key(user_id: UserId) -> [u8; 8] {
    user_id.0.to_be_bytes()
}

fn ensure_positive(field: &'static str, value: f64) -> StoreResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StoreError::invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn encode<T: Serialize>(value: &T) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> StoreResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("amount", 0.01).is_ok());
        assert!(ensure_positive("amount", 0.0).is_err());
        assert!(ensure_positive("amount", -5.0).is_err());
        assert!(ensure_positive("amount", f64::NAN).is_err());
        assert!(ensure_positive("amount", f64::INFINITY).is_err());
    }

    #[test]
    fn test_user_keys_sort_numerically() {
        assert!(user_key(UserId(2)) < user_key(UserId(256)));
    }
}
