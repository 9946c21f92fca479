//! Helpers shared by the workspace's unit and integration tests.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::OnceLock;

/// Routes `tracing` output to the test harness. Only the first call installs
/// a subscriber.
pub fn init_test_logging() {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(
                std::env::var("RUST_LOG").unwrap_or_else(|_| "mixhaven=debug".to_string()),
            )
            .try_init();
    });
}

/// A fixed UTC instant, panicking on an impossible date.
pub fn utc_time(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day} {hour}:{min}:{sec}"))
}

/// Scratch directory for a test database, removed on drop.
#[cfg(feature = "tempfile")]
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("mixhaven-test-")
        .tempdir()
        .expect("create test directory")
}

/// Asserts two money amounts agree to within `tolerance`.
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{actual} differs from {expected} by more than {tolerance}"
    );
}

/// Stable ids for the parties in a typical exchange.
pub mod discord_fixtures {
    use crate::types::{ChannelId, UserId};

    /// A client placing an exchange.
    pub const fn client_id() -> UserId {
        UserId(111_111_111_111_111_111)
    }

    /// An exchanger serving a client.
    pub const fn exchanger_id() -> UserId {
        UserId(222_222_222_222_222_222)
    }

    /// A ticket channel.
    pub const fn ticket_channel_id() -> ChannelId {
        ChannelId(333_333_333_333_333_333)
    }
}
