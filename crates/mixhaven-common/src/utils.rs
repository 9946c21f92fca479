//! Shared utility functions.

use chrono::{DateTime, Utc};

/// Maximum length Discord accepts for a channel name.
pub const MAX_CHANNEL_NAME_LEN: usize = 100;

/// Formats a timestamp for display.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Normalizes a display name into the form Discord uses for text channel names.
///
/// Lowercases, turns whitespace runs into a single `-` and drops characters
/// Discord would strip anyway.
pub fn channel_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.trim().chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = !slug.is_empty();
            continue;
        }
        if !(c.is_alphanumeric() || c == '_' || c == '.') {
            continue;
        }
        if pending_dash {
            slug.push('-');
            pending_dash = false;
        }
        slug.extend(c.to_lowercase());
    }

    slug
}

/// Formats an amount or rate the way members type it, always with a decimal
/// part: `1000.0`, `92.5`, `0.125`.
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let formatted = format_timestamp(timestamp);
        assert_eq!(formatted, "2024-01-01 12:00:00 UTC");
    }

    #[test]
    fn test_channel_slug() {
        assert_eq!(channel_slug("Alice"), "alice");
        assert_eq!(channel_slug("Big  Trader"), "big-trader");
        assert_eq!(channel_slug("  x--y "), "x-y");
        assert_eq!(channel_slug("crypto!king"), "cryptoking");
        assert_eq!(channel_slug("user_name.1"), "user_name.1");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1000.0), "1000.0");
        assert_eq!(format_amount(92.0), "92.0");
        assert_eq!(format_amount(92.5), "92.5");
        assert_eq!(format_amount(0.125), "0.125");
        assert_eq!(format_amount(-3.0), "-3.0");
    }

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        let truncated = truncate_string(input, 20);
        assert_eq!(truncated, "This is a very lo...");

        let short = "Short";
        assert_eq!(truncate_string(short, 20), "Short");

        let wide = "₹₹₹₹₹₹₹₹₹₹";
        assert_eq!(truncate_string(wide, 5), "₹₹...");
    }
}
