//! Integration tests for mixhaven-store crate.

use mixhaven_common::test_utils::{assert_approx_eq, discord_fixtures, utc_time};
use mixhaven_common::{ChannelId, UserId};
use mixhaven_store::{
    NewTicket, RateKind, Store, StoreError, TicketCategory, TicketForm, TicketStatus,
};
use tempfile::TempDir;

fn open_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("mixhaven.db")).unwrap();
    (dir, store)
}

fn sample_ticket(channel_id: ChannelId) -> NewTicket {
    NewTicket {
        user_id: discord_fixtures::client_id(),
        opener_name: "alice".to_string(),
        channel_id,
        category: TicketCategory::InrToCrypto,
        form_data: TicketForm {
            name: "Alice".to_string(),
            amount: "5000".to_string(),
            asset: "USDT".to_string(),
            method: "UPI".to_string(),
        },
    }
}

#[test]
fn test_default_rates_are_seeded() {
    let (_dir, store) = open_store();

    let i2c = store.rate(RateKind::I2c).unwrap();
    assert_eq!((i2c.below_50, i2c.above_50), (96.0, 92.0));

    let c2i = store.rate(RateKind::C2i).unwrap();
    assert_eq!((c2i.below_50, c2i.above_50), (92.0, 92.5));
}

#[tokio::test]
async fn test_seeding_keeps_existing_rates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixhaven.db");

    {
        let store = Store::open(&path).unwrap();
        store.set_rate(RateKind::I2c, 97.0, 93.5).await.unwrap();
    }

    let reopened = Store::open(&path).unwrap();
    let i2c = reopened.rate(RateKind::I2c).unwrap();
    assert_eq!((i2c.below_50, i2c.above_50), (97.0, 93.5));
}

#[tokio::test]
async fn test_set_rate_rejects_non_positive() {
    let (_dir, store) = open_store();

    let err = store.set_rate(RateKind::C2i, 0.0, 92.0).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput { .. }));

    let unchanged = store.rate(RateKind::C2i).unwrap();
    assert_eq!(unchanged.below_50, 92.0);
}

#[tokio::test]
async fn test_first_vouch_creates_row_then_increments() {
    let (_dir, store) = open_store();
    let user = discord_fixtures::exchanger_id();
    let first_at = utc_time(2025, 11, 1, 10, 0, 0);
    let second_at = utc_time(2025, 11, 2, 10, 0, 0);

    assert!(store.user_stats(user).unwrap().is_none());

    let first = store.add_user_stat(user, 25.5, first_at).await.unwrap();
    assert_eq!(first.total_vouches, 1);
    assert_approx_eq(first.total_amount_usd, 25.5, 1e-9);
    assert_eq!(first.role_tag, "");

    let second = store.add_user_stat(user, 100.0, second_at).await.unwrap();
    assert_eq!(second.total_vouches, 2);
    assert_approx_eq(second.total_amount_usd, 125.5, 1e-9);
    assert_eq!(second.last_vouch_ts, Some(second_at));

    assert_eq!(store.user_stats(user).unwrap(), Some(second));
}

#[tokio::test]
async fn test_record_vouch_credits_both_parties() {
    let (_dir, store) = open_store();
    let exchanger = discord_fixtures::exchanger_id();
    let client = discord_fixtures::client_id();
    let at = utc_time(2025, 11, 3, 18, 45, 0);

    store.add_user_stat(exchanger, 10.0, at).await.unwrap();
    let (ex, cl) = store.record_vouch(exchanger, client, 40.0, at).await.unwrap();

    assert_eq!(ex.total_vouches, 2);
    assert_approx_eq(ex.total_amount_usd, 50.0, 1e-9);
    assert_eq!(cl.total_vouches, 1);
    assert_approx_eq(cl.total_amount_usd, 40.0, 1e-9);
}

#[tokio::test]
async fn test_record_vouch_rejects_self_and_bad_amounts() {
    let (_dir, store) = open_store();
    let user = UserId(7);
    let other = UserId(8);
    let at = utc_time(2025, 11, 3, 0, 0, 0);

    assert!(store.record_vouch(user, user, 10.0, at).await.is_err());
    assert!(store.record_vouch(user, other, -1.0, at).await.is_err());
    assert!(store.record_vouch(user, other, f64::NAN, at).await.is_err());

    assert!(store.user_stats(user).unwrap().is_none());
    assert!(store.user_stats(other).unwrap().is_none());
}

#[tokio::test]
async fn test_ticket_lifecycle() {
    let (_dir, store) = open_store();
    let channel = discord_fixtures::ticket_channel_id();
    let staff = discord_fixtures::exchanger_id();
    let created_at = utc_time(2025, 11, 4, 9, 0, 0);
    let closed_at = utc_time(2025, 11, 4, 11, 0, 0);

    let created = store.create_ticket(sample_ticket(channel), created_at).await.unwrap();
    assert_eq!(created.status, TicketStatus::Open);
    assert_eq!(store.ticket_by_channel(channel).unwrap(), Some(created.clone()));

    let claimed = store
        .update_ticket_status(channel, TicketStatus::Claimed, staff, created_at)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(claimed.claimed_by, Some(staff));

    let reopened = store
        .update_ticket_status(channel, TicketStatus::Open, staff, created_at)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reopened.claimed_by, None);
    assert!(reopened.closed_at.is_none());

    let closed = store
        .update_ticket_status(channel, TicketStatus::Closed, staff, closed_at)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed.closed_at, Some(closed_at));
    assert!(closed.status.is_terminal());
    assert_eq!(closed.form_data.asset, "USDT");
}

#[tokio::test]
async fn test_ticket_ids_are_distinct() {
    let (_dir, store) = open_store();
    let at = utc_time(2025, 11, 4, 9, 0, 0);

    let a = store.create_ticket(sample_ticket(ChannelId(1)), at).await.unwrap();
    let b = store.create_ticket(sample_ticket(ChannelId(2)), at).await.unwrap();

    assert_ne!(a.ticket_id, b.ticket_id);
    assert_eq!(store.ticket_by_channel(ChannelId(2)).unwrap().unwrap().ticket_id, b.ticket_id);
}

#[tokio::test]
async fn test_untracked_channel_update_is_noop() {
    let (_dir, store) = open_store();
    let at = utc_time(2025, 11, 4, 9, 0, 0);

    let result = store
        .update_ticket_status(ChannelId(404), TicketStatus::Closed, UserId(1), at)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_rate_kind_parsing() {
    assert_eq!("I2C".parse::<RateKind>().unwrap(), RateKind::I2c);
    assert_eq!(" c2i ".parse::<RateKind>().unwrap(), RateKind::C2i);
    assert!("usd".parse::<RateKind>().is_err());
}

#[test]
fn test_ticket_category_keys_round_trip() {
    for category in TicketCategory::ALL {
        assert_eq!(TicketCategory::from_key(category.key()), Some(category));
    }
    assert_eq!(TicketCategory::from_key("gift_cards"), None);
}
