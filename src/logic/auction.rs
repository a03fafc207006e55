//! Remaining-time computation for auction listings.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// Seconds in a day.
const DAY: i64 = 86_400;
/// Seconds in an hour.
const HOUR: i64 = 3_600;
/// Seconds in a minute.
const MINUTE: i64 = 60;

/// Time left on an auction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionClock {
    /// The end time has passed.
    Ended,
    /// Whole units of time still left.
    Running {
        /// Full days.
        days: i64,
        /// Hours past the full days (`0..24`).
        hours: i64,
        /// Minutes past the full hours (`0..60`).
        minutes: i64,
        /// Seconds past the full minutes (`0..60`).
        seconds: i64,
    },
}

impl AuctionClock {
    /// `true` once the auction has ended.
    #[must_use]
    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }
}

/// What: Split the time until `ends_at` into days, hours, minutes and seconds.
///
/// Inputs:
/// - `ends_at`: Auction end.
/// - `now`: Reference time.
///
/// Output:
/// - `Ended` when less than one second is left, otherwise `Running`.
#[must_use]
pub fn remaining(ends_at: DateTime<Utc>, now: DateTime<Utc>) -> AuctionClock {
    let total = (ends_at - now).num_seconds();
    if total <= 0 {
        return AuctionClock::Ended;
    }
    AuctionClock::Running {
        days: total / DAY,
        hours: (total % DAY) / HOUR,
        minutes: (total % HOUR) / MINUTE,
        seconds: total % MINUTE,
    }
}

/// What: Stream the remaining time once per second until the auction ends.
///
/// Inputs:
/// - `ends_at`: Auction end.
///
/// Output:
/// - Receiver yielding one clock per tick; the last value is `Ended`.
pub fn watch_countdown(ends_at: DateTime<Utc>) -> mpsc::UnboundedReceiver<AuctionClock> {
    watch_countdown_with(ends_at, Duration::from_secs(1), Utc::now)
}

/// What: Countdown worker with an explicit tick period and clock source.
///
/// Inputs:
/// - `ends_at`: Auction end.
/// - `period`: Delay between ticks.
/// - `now`: Clock read on every tick.
///
/// Output:
/// - Receiver yielding one clock per tick.
///
/// Details:
/// - The first value is sent immediately.
/// - The worker stops after sending `Ended` or when the receiver is dropped.
pub fn watch_countdown_with<N>(
    ends_at: DateTime<Utc>,
    period: Duration,
    now: N,
) -> mpsc::UnboundedReceiver<AuctionClock>
where
    N: Fn() -> DateTime<Utc> + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let clock = remaining(ends_at, now());
            if tx.send(clock).is_err() || clock.is_ended() {
                break;
            }
        }
        tracing::debug!(%ends_at, "auction countdown stopped");
    });
    rx
}
