//! Plain-text rendering of entities and collection status for the terminal.

use chrono::{DateTime, Utc};

use super::favorites;
use crate::i18n;
use crate::logic::{AuctionClock, remaining};
use crate::state::{Collection, Conversation, Deal, Listing, Message};

/// What: Format a minor-unit amount with two decimals.
///
/// Inputs:
/// - `minor`: Amount in minor units (e.g. halalas)
/// - `currency`: ISO code, may be empty
///
/// Output:
/// - e.g. `"1250.50 SAR"` or `"-3.05"`
#[must_use]
pub fn format_amount(minor: i64, currency: &str) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let text = format!("{sign}{}.{:02}", abs / 100, abs % 100);
    if currency.is_empty() {
        text
    } else {
        format!("{text} {currency}")
    }
}

/// What: Localised text for an auction clock.
///
/// Inputs:
/// - `clock`: Remaining time
///
/// Output:
/// - "Auction ended" or "Ends in 1d 2h 3m 4s"
#[must_use]
pub fn auction_text(clock: AuctionClock) -> String {
    match clock {
        AuctionClock::Ended => i18n::t("app.auction.ended"),
        AuctionClock::Running {
            days,
            hours,
            minutes,
            seconds,
        } => i18n::t_fmt("app.auction.remaining", &[&days, &hours, &minutes, &seconds]),
    }
}

/// What: One-line summary of a listing.
///
/// Inputs:
/// - `listing`: Listing to show
/// - `now`: Reference time for the auction countdown
///
/// Output:
/// - Favorite marker, id, title, price, city, and the countdown for auctions.
#[must_use]
pub fn listing_line(listing: &Listing, now: DateTime<Utc>) -> String {
    let marker = if favorites::is_favorite(&listing.id) || listing.is_favorite {
        '*'
    } else {
        ' '
    };
    let mut line = format!(
        "{marker} {}  {}  {}",
        listing.id,
        listing.title,
        format_amount(listing.price, &listing.currency)
    );
    if !listing.city.is_empty() {
        line.push_str("  ");
        line.push_str(&listing.city);
    }
    if let Some(ends_at) = listing.auction_ends_at {
        line.push_str("  [");
        line.push_str(&auction_text(remaining(ends_at, now)));
        line.push(']');
    }
    line
}

/// One-line summary of a deal.
#[must_use]
pub fn deal_line(deal: &Deal) -> String {
    format!(
        "  {}  {}  {}  listing {}",
        deal.id,
        deal.status.as_param(),
        format_amount(deal.amount, &deal.currency),
        deal.listing_id
    )
}

/// One-line summary of a conversation, with the unread count when non-zero.
#[must_use]
pub fn conversation_line(conversation: &Conversation) -> String {
    let unread = if conversation.unread_count > 0 {
        format!(" ({})", conversation.unread_count)
    } else {
        String::new()
    };
    let preview = conversation.last_message.as_deref().unwrap_or_default();
    format!(
        "  {}  {}{unread}  {preview}",
        conversation.id, conversation.peer_name
    )
}

/// One-line rendering of a chat message.
#[must_use]
pub fn message_line(message: &Message) -> String {
    let at = message
        .sent_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    format!("  [{at}] {}: {}", message.sender_id, message.body)
}

/// What: Status line for a collection, shown under its items.
///
/// Inputs:
/// - `collection`: Collection to describe
///
/// Output:
/// - Loading, error, empty, end-of-list or load-more hint; `None` before the first load.
#[must_use]
pub fn status_line<T>(collection: &Collection<T>) -> Option<String> {
    if collection.is_loading() {
        return Some(i18n::t("app.lists.loading"));
    }
    if collection.is_loading_more() {
        return Some(i18n::t("app.lists.loading_more"));
    }
    if let Some(error) = collection.error() {
        return Some(error.to_string());
    }
    if !collection.has_loaded() {
        return None;
    }
    if collection.is_empty() {
        return Some(i18n::t("app.lists.empty"));
    }
    if collection.is_exhausted() {
        Some(i18n::t("app.lists.end"))
    } else {
        Some(i18n::t("app.lists.more_hint"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Cursor, Page};

    #[test]
    /// What: Amounts render with two decimals, sign and optional currency.
    ///
    /// - Input: 125050 SAR, -305 without currency, 7
    /// - Output: "1250.50 SAR", "-3.05", "0.07"
    fn format_amount_cases() {
        assert_eq!(format_amount(125_050, "SAR"), "1250.50 SAR");
        assert_eq!(format_amount(-305, ""), "-3.05");
        assert_eq!(format_amount(7, ""), "0.07");
    }

    #[test]
    /// What: Auction listings carry the countdown; ended auctions say so.
    ///
    /// - Input: Listing ending 90 seconds after `now`, then `now` after the end
    /// - Output: Line contains "0d 0h 1m 30s", then the ended text
    fn listing_line_shows_countdown() {
        let now = DateTime::from_timestamp(1_000, 0).expect("ts");
        let listing: Listing = serde_json::from_value(serde_json::json!({
            "id": "render-auction",
            "title": "Camera",
            "price": 9_900,
            "currency": "SAR",
            "auctionEndsAt": "1970-01-01T00:18:10Z"
        }))
        .expect("listing json");
        let line = listing_line(&listing, now);
        assert!(line.contains("Camera"));
        assert!(line.contains("99.00 SAR"));
        assert!(line.contains("0d 0h 1m 30s"), "{line}");
        let later = DateTime::from_timestamp(2_000, 0).expect("ts");
        assert!(listing_line(&listing, later).contains(&i18n::t("app.auction.ended")));
    }

    #[test]
    /// What: Status lines follow the collection's state.
    ///
    /// - Input: Fresh, loading, loaded with cursor, exhausted, empty collections
    /// - Output: None, loading, more hint, end, empty
    fn status_line_follows_state() {
        let mut c: Collection<u8> = Collection::new();
        assert!(status_line(&c).is_none());
        let t = c.begin_load(None, false).expect("ticket");
        assert_eq!(status_line(&c), Some(i18n::t("app.lists.loading")));
        c.apply_page(&t, Page::new(vec![1], Cursor::new("n")));
        assert_eq!(status_line(&c), Some(i18n::t("app.lists.more_hint")));
        let t = c.begin_load_more().expect("ticket");
        c.apply_page(&t, Page::bare(vec![2]));
        assert_eq!(status_line(&c), Some(i18n::t("app.lists.end")));
        let t = c.begin_refresh();
        c.apply_page(&t, Page::bare(Vec::new()));
        assert_eq!(status_line(&c), Some(i18n::t("app.lists.empty")));
    }
}
