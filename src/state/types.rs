//! Core value types shared by the collections, sources and runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque server-issued token marking where the next page begins.
///
/// Never parsed or compared beyond equality. Empty tokens are not
/// representable; see [`Cursor::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// What: Build a cursor from a raw server token.
    ///
    /// Inputs:
    /// - `raw`: Token as received from the backend.
    ///
    /// Output:
    /// - `Some(Cursor)` for a non-blank token; `None` for an empty or whitespace-only token.
    ///
    /// Details:
    /// - Some endpoints send `""` on the last page; that is treated as "no next page".
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Raw token, for forwarding as a query parameter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of results in server order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    /// Items exactly as returned by the server.
    pub items: Vec<T>,
    /// Token for the following page; `None` on the last page.
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Page with an explicit continuation token.
    pub const fn new(items: Vec<T>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }

    /// What: Wrap a bare item list as a terminal page.
    ///
    /// Inputs:
    /// - `items`: Items from an endpoint that answered without a pagination envelope.
    ///
    /// Output:
    /// - Page with `next_cursor = None`, so the owning collection becomes exhausted.
    pub const fn bare(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// `true` when no further page can be requested after this one.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// Entity with a stable identity used by the collection mutation helpers.
pub trait Identified {
    /// Stable identifier as issued by the backend.
    fn id(&self) -> &str;
}

/// Marketplace ("Kenz") classified listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Listing identifier.
    pub id: String,
    /// Headline shown in lists.
    pub title: String,
    /// Free-form body text.
    #[serde(default)]
    pub description: String,
    /// Asking price (or current bid) in minor currency units.
    #[serde(default)]
    pub price: i64,
    /// ISO currency code.
    #[serde(default)]
    pub currency: String,
    /// City the item is offered in.
    #[serde(default)]
    pub city: String,
    /// Category slug.
    #[serde(default)]
    pub category: String,
    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Seller account id.
    #[serde(default, alias = "seller_id")]
    pub seller_id: String,
    /// Creation time.
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    /// End of the auction, for auction-style listings.
    #[serde(default, alias = "auction_ends_at")]
    pub auction_ends_at: Option<DateTime<Utc>>,
    /// Favorite flag as reported by the server at fetch time.
    #[serde(default, alias = "is_favorite")]
    pub is_favorite: bool,
}

impl Identified for Listing {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Lifecycle of an escrow deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    /// Created, waiting for the buyer to fund.
    Pending,
    /// Funds held in escrow.
    Funded,
    /// Seller marked the item as shipped.
    Shipped,
    /// Buyer confirmed; funds released.
    Completed,
    /// Cancelled before completion.
    Cancelled,
    /// Under dispute.
    Disputed,
    /// Status this client does not know about.
    #[serde(other)]
    Other,
}

impl DealStatus {
    /// What: Map a user/config string to a status filter.
    ///
    /// Inputs:
    /// - `key`: Case-insensitive status name.
    ///
    /// Output:
    /// - Matching status, or `None` for unknown input (never `Other`).
    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "funded" => Some(Self::Funded),
            "shipped" => Some(Self::Shipped),
            "completed" | "done" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            "disputed" => Some(Self::Disputed),
            _ => None,
        }
    }

    /// Query parameter value for this status.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Funded => "funded",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Disputed => "disputed",
            Self::Other => "other",
        }
    }
}

/// Escrow deal between a buyer and a seller for one listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Deal identifier.
    pub id: String,
    /// Listing the deal is about.
    #[serde(alias = "listing_id")]
    pub listing_id: String,
    /// Buyer account id.
    #[serde(default, alias = "buyer_id")]
    pub buyer_id: String,
    /// Seller account id.
    #[serde(default, alias = "seller_id")]
    pub seller_id: String,
    /// Escrowed amount in minor units.
    #[serde(default)]
    pub amount: i64,
    /// ISO currency code.
    #[serde(default)]
    pub currency: String,
    /// Current status.
    pub status: DealStatus,
    /// Creation time.
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Deal {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Chat thread with another user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Conversation identifier.
    pub id: String,
    /// Listing the conversation was opened from, if any.
    #[serde(default, alias = "listing_id")]
    pub listing_id: Option<String>,
    /// Other participant's account id.
    #[serde(default, alias = "peer_id")]
    pub peer_id: String,
    /// Other participant's display name.
    #[serde(default, alias = "peer_name")]
    pub peer_name: String,
    /// Preview of the latest message.
    #[serde(default, alias = "last_message")]
    pub last_message: Option<String>,
    /// Messages not yet read by the current user.
    #[serde(default, alias = "unread_count")]
    pub unread_count: u32,
    /// Time of the latest activity.
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Conversation {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Single chat message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier.
    pub id: String,
    /// Owning conversation.
    #[serde(alias = "conversation_id")]
    pub conversation_id: String,
    /// Author account id.
    #[serde(default, alias = "sender_id")]
    pub sender_id: String,
    /// Message text.
    #[serde(default)]
    pub body: String,
    /// Send time.
    #[serde(default, alias = "sent_at")]
    pub sent_at: Option<DateTime<Utc>>,
}

impl Identified for Message {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Discount carried by a promotion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the subtotal, in basis points (1% = 100).
    Percentage {
        /// Discount rate in basis points.
        #[serde(alias = "basisPoints")]
        basis_points: u32,
    },
    /// Flat amount off, in minor units.
    Fixed {
        /// Amount taken off the subtotal.
        amount: i64,
    },
}

/// Store promotion applicable to an order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Promotion identifier.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// What the promotion takes off.
    pub discount: Discount,
    /// Minimum subtotal (minor units) for eligibility.
    #[serde(default, alias = "min_order")]
    pub min_order: Option<i64>,
    /// Upper bound on the discount amount (minor units).
    #[serde(default, alias = "max_discount")]
    pub max_discount: Option<i64>,
    /// Start of validity (inclusive).
    #[serde(default, alias = "starts_at")]
    pub starts_at: Option<DateTime<Utc>>,
    /// End of validity (exclusive).
    #[serde(default, alias = "ends_at")]
    pub ends_at: Option<DateTime<Utc>>,
}
