//! Command-line auction countdown.

use chrono::{DateTime, Utc};

use crate::app::render::auction_text;
use crate::logic::watch_countdown;

/// What: Parse an auction end time given on the command line.
///
/// Inputs:
/// - `raw`: RFC 3339 timestamp
///
/// Output:
/// - UTC end time, or `None` when the text is not a valid timestamp.
#[must_use]
pub fn parse_end_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// What: Print the remaining time once per second until the auction ends.
///
/// Inputs:
/// - `raw_end`: RFC 3339 end time
///
/// Output:
/// - Exit code (`2` for an unparsable end time).
pub async fn handle_watch_auction(raw_end: &str) -> i32 {
    let Some(ends_at) = parse_end_time(raw_end) else {
        eprintln!("invalid end time (expected RFC 3339): {raw_end}");
        tracing::error!(raw_end, "invalid auction end time");
        return 2;
    };
    tracing::info!(%ends_at, "auction countdown requested from CLI");
    let mut rx = watch_countdown(ends_at);
    while let Some(clock) = rx.recv().await {
        println!("{}", auction_text(clock));
    }
    0
}
