//! Integration tests for mixhaven-commands crate.
//!
//! These exercise command logic against a real store; nothing here talks to
//! Discord.

use mixhaven_commands::exchange::{quote, quote_text};
use mixhaven_commands::general::help_text;
use mixhaven_commands::tickets::{channel_name, channel_prefix};
use mixhaven_commands::vouch::{stats_text, VouchFooter};
use mixhaven_commands::{commands, framework_options, Data};
use mixhaven_common::test_utils::{
    assert_approx_eq, discord_fixtures, init_test_logging, temp_dir, utc_time,
};
use mixhaven_config::{Config, ConfigCache};
use mixhaven_store::{NewTicket, RateKind, Store, TicketCategory, TicketForm, TicketStatus};
use std::sync::Arc;
use tempfile::TempDir;

fn test_data() -> (TempDir, Data) {
    init_test_logging();
    let dir = temp_dir();
    let store = Store::open(dir.path().join("mixhaven.db")).unwrap();
    let data = Data {
        config: Arc::new(ConfigCache::new(Config::default())),
        store,
    };
    (dir, data)
}

#[test]
fn test_framework_uses_configured_prefix() {
    let options = framework_options("!");
    assert_eq!(options.prefix_options.prefix.as_deref(), Some("!"));
    assert_eq!(options.commands.len(), commands().len());
}

#[test]
fn test_help_lists_every_prefix_command() {
    let help = help_text("+");
    for command in commands() {
        assert!(
            help.contains(&format!("`+{}", command.name)),
            "help is missing `{}`",
            command.name
        );
    }
}

#[tokio::test]
async fn test_quotes_follow_rate_changes() {
    let (_dir, data) = test_data();

    let entry = data.store.rate(RateKind::C2i).unwrap();
    let (_, body) = quote_text(&quote(&entry, 10.0).unwrap());
    assert!(body.ends_with("₹920.00"));

    let entry = data.store.set_rate(RateKind::C2i, 90.0, 91.0).await.unwrap();
    let q = quote(&entry, 100.0).unwrap();
    assert_eq!(q.rate, 91.0);
    assert_approx_eq(q.output, 9100.0, 1e-9);
}

#[tokio::test]
async fn test_footer_vouch_credits_both_parties() {
    let (_dir, data) = test_data();
    let exchanger = discord_fixtures::exchanger_id();
    let client = discord_fixtures::client_id();

    let footer = VouchFooter::parse(&format!("mixhaven_vouch|{exchanger}|75.5")).unwrap();
    data.store
        .record_vouch(footer.exchanger, client, footer.amount, utc_time(2025, 1, 2, 3, 4, 5))
        .await
        .unwrap();

    let stats = data.store.user_stats(exchanger).unwrap();
    let (title, body) = stats_text("<@222>", stats.as_ref());
    assert_eq!(title, "📊 Vouch Stats");
    assert!(body.contains("**Total Vouches:** 1"));
    assert!(body.contains("$75.50"));

    assert_eq!(data.store.user_stats(client).unwrap().unwrap().total_vouches, 1);
}

#[tokio::test]
async fn test_ticket_names_track_stored_status() {
    let (_dir, data) = test_data();
    let channel = discord_fixtures::ticket_channel_id();
    let opened_at = utc_time(2025, 3, 1, 12, 0, 0);

    data.store
        .create_ticket(
            NewTicket {
                user_id: discord_fixtures::client_id(),
                opener_name: "Alice".to_string(),
                channel_id: channel,
                category: TicketCategory::CryptoToCrypto,
                form_data: TicketForm::default(),
            },
            opened_at,
        )
        .await
        .unwrap();

    let name = channel_name(TicketStatus::Open, "Alice");
    assert_eq!(name, "ticket-alice");
    assert!(name.starts_with(channel_prefix(TicketStatus::Open)));

    for status in [TicketStatus::Claimed, TicketStatus::Open, TicketStatus::Sent] {
        let record = data
            .store
            .update_ticket_status(channel, status, discord_fixtures::exchanger_id(), opened_at)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.status, status);
        assert!(channel_name(record.status, "bob").starts_with(channel_prefix(status)));
    }

    let record = data.store.ticket_by_channel(channel).unwrap().unwrap();
    assert_eq!(record.opener_name, "Alice");
    assert!(record.closed_at.is_some());
}
