use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use super::channels::{Completion, PageOutcome};
use super::workers::spawn_page_worker;
use crate::app::favorites;
use crate::logic::lists;
use crate::sources::{
    ApiClient, ConversationsFetcher, DealFilters, DealsFetcher, FavoritesFetcher, ListingFilters,
    ListingsFetcher, MessageFilters, MessagesFetcher, PageFetcher, PageRequest, Result,
};
use crate::state::{Collection, Conversation, Deal, Listing, Message};

/// Collection shown by the browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    /// Marketplace listings.
    Listings,
    /// Favorite listings.
    Favorites,
    /// Escrow deals.
    Deals,
    /// Chat conversations.
    Conversations,
    /// Messages of the open conversation.
    Messages,
}

impl Tab {
    /// Every tab in display order.
    pub const ALL: [Self; 5] = [
        Self::Listings,
        Self::Favorites,
        Self::Deals,
        Self::Conversations,
        Self::Messages,
    ];

    /// What: Parse a tab name typed by the user.
    ///
    /// Inputs:
    /// - `name`: Case-insensitive name or common short form
    ///
    /// Output:
    /// - Matching tab or `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "listings" | "kenz" | "l" => Some(Self::Listings),
            "favorites" | "favourites" | "favs" | "f" => Some(Self::Favorites),
            "deals" | "d" => Some(Self::Deals),
            "conversations" | "chats" | "c" => Some(Self::Conversations),
            "messages" | "m" => Some(Self::Messages),
            _ => None,
        }
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listings => "listings",
            Self::Favorites => "favorites",
            Self::Deals => "deals",
            Self::Conversations => "conversations",
            Self::Messages => "messages",
        }
    }
}

/// Kind of load requested for a tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadKind {
    /// First page, only if nothing is loaded yet.
    First,
    /// Next page, subject to the load-more guard.
    More,
    /// Drop everything and load the first page again.
    Refresh,
}

/// What: Issue a ticket for `kind` and spawn the matching page worker.
///
/// Inputs:
/// - `collection`: Collection the load is for
/// - `kind`: First page, next page or refresh
/// - `fetcher`, `filters`, `limit`: Request parameters
/// - `wrap`: Outcome constructor for the collection
/// - `tx`, `cancelled`: Runtime plumbing
///
/// Output:
/// - `true` when a worker was spawned; `false` when the guard refused.
#[allow(clippy::too_many_arguments)]
fn dispatch<F>(
    collection: &mut Collection<F::Item>,
    kind: LoadKind,
    fetcher: F,
    filters: F::Filters,
    limit: Option<u32>,
    wrap: fn(Completion<F::Item>) -> PageOutcome,
    tx: &mpsc::UnboundedSender<PageOutcome>,
    cancelled: &Arc<AtomicBool>,
) -> bool
where
    F: PageFetcher + 'static,
    F::Item: 'static,
    F::Filters: 'static,
{
    let ticket = match kind {
        LoadKind::First if collection.has_loaded() => None,
        LoadKind::First => collection.begin_load(None, false),
        LoadKind::More => collection.begin_load_more(),
        LoadKind::Refresh => Some(collection.begin_refresh()),
    };
    let Some(ticket) = ticket else {
        return false;
    };
    let request = PageRequest {
        cursor: ticket.cursor.clone(),
        limit,
        filters,
    };
    spawn_page_worker(fetcher, request, ticket, wrap, tx, cancelled);
    true
}

/// Every collection the browser keeps open, with the filters that define them.
pub struct Session {
    /// Backend client shared by all fetchers.
    api: ApiClient,
    /// Page size for every request.
    limit: Option<u32>,
    /// Teardown flag shared with the workers.
    cancelled: Arc<AtomicBool>,
    /// Tab currently shown.
    active: Tab,
    /// Filters of the listings collection.
    listing_filters: ListingFilters,
    /// Filters of the deals collection.
    deal_filters: DealFilters,
    /// Conversation whose messages are loaded.
    message_filters: MessageFilters,
    /// Marketplace listings.
    pub(super) listings: Collection<Listing>,
    /// Favorite listings.
    pub(super) favorites: Collection<Listing>,
    /// Escrow deals.
    pub(super) deals: Collection<Deal>,
    /// Chat conversations.
    pub(super) conversations: Collection<Conversation>,
    /// Messages of the open conversation.
    pub(super) messages: Collection<Message>,
}

impl Session {
    /// What: Create a session with nothing loaded.
    ///
    /// Inputs:
    /// - `api`: Backend client
    /// - `limit`: Page size
    /// - `cancelled`: Teardown flag from [`super::Channels`]
    #[must_use]
    pub fn new(api: ApiClient, limit: Option<u32>, cancelled: Arc<AtomicBool>) -> Self {
        Self {
            api,
            limit,
            cancelled,
            active: Tab::Listings,
            listing_filters: ListingFilters::default(),
            deal_filters: DealFilters::default(),
            message_filters: MessageFilters::default(),
            listings: Collection::new(),
            favorites: Collection::new(),
            deals: Collection::new(),
            conversations: Collection::new(),
            messages: Collection::new(),
        }
    }

    /// Use `filters` for listings from the next load on.
    #[must_use]
    pub fn with_listing_filters(mut self, filters: ListingFilters) -> Self {
        self.listing_filters = filters;
        self
    }

    /// Use `filters` for deals from the next load on.
    #[must_use]
    pub const fn with_deal_filters(mut self, filters: DealFilters) -> Self {
        self.deal_filters = filters;
        self
    }

    /// Tab currently shown.
    #[must_use]
    pub const fn active(&self) -> Tab {
        self.active
    }

    /// Switch the shown tab.
    pub const fn set_active(&mut self, tab: Tab) {
        self.active = tab;
    }

    /// Marketplace listings.
    #[must_use]
    pub const fn listings(&self) -> &Collection<Listing> {
        &self.listings
    }

    /// Favorite listings.
    #[must_use]
    pub const fn favorites(&self) -> &Collection<Listing> {
        &self.favorites
    }

    /// Escrow deals.
    #[must_use]
    pub const fn deals(&self) -> &Collection<Deal> {
        &self.deals
    }

    /// Chat conversations.
    #[must_use]
    pub const fn conversations(&self) -> &Collection<Conversation> {
        &self.conversations
    }

    /// Messages of the open conversation.
    #[must_use]
    pub const fn messages(&self) -> &Collection<Message> {
        &self.messages
    }

    /// Active listing filters.
    #[must_use]
    pub const fn listing_filters(&self) -> &ListingFilters {
        &self.listing_filters
    }

    /// Id of the open conversation, empty when none is open.
    #[must_use]
    pub fn open_conversation_id(&self) -> &str {
        &self.message_filters.conversation_id
    }

    /// `true` once teardown has started.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// `true` when the tab's collection has a load in flight.
    #[must_use]
    pub const fn is_busy(&self, tab: Tab) -> bool {
        match tab {
            Tab::Listings => self.listings.is_busy(),
            Tab::Favorites => self.favorites.is_busy(),
            Tab::Deals => self.deals.is_busy(),
            Tab::Conversations => self.conversations.is_busy(),
            Tab::Messages => self.messages.is_busy(),
        }
    }

    /// What: Start a load for a tab.
    ///
    /// Inputs:
    /// - `tab`: Collection to load
    /// - `kind`: First page, next page or refresh
    /// - `tx`: Outcome channel
    ///
    /// Output:
    /// - `true` when a fetch was started.
    ///
    /// Details:
    /// - Messages are never requested while no conversation is open.
    pub fn request(
        &mut self,
        tab: Tab,
        kind: LoadKind,
        tx: &mpsc::UnboundedSender<PageOutcome>,
    ) -> bool {
        if self.is_cancelled() {
            return false;
        }
        let api = self.api.clone();
        let started = match tab {
            Tab::Listings => dispatch(
                &mut self.listings,
                kind,
                ListingsFetcher { api },
                self.listing_filters.clone(),
                self.limit,
                PageOutcome::Listings,
                tx,
                &self.cancelled,
            ),
            Tab::Favorites => dispatch(
                &mut self.favorites,
                kind,
                FavoritesFetcher { api },
                (),
                self.limit,
                PageOutcome::Favorites,
                tx,
                &self.cancelled,
            ),
            Tab::Deals => dispatch(
                &mut self.deals,
                kind,
                DealsFetcher { api },
                self.deal_filters.clone(),
                self.limit,
                PageOutcome::Deals,
                tx,
                &self.cancelled,
            ),
            Tab::Conversations => dispatch(
                &mut self.conversations,
                kind,
                ConversationsFetcher { api },
                (),
                self.limit,
                PageOutcome::Conversations,
                tx,
                &self.cancelled,
            ),
            Tab::Messages if self.message_filters.conversation_id.is_empty() => false,
            Tab::Messages => dispatch(
                &mut self.messages,
                kind,
                MessagesFetcher { api },
                self.message_filters.clone(),
                self.limit,
                PageOutcome::Messages,
                tx,
                &self.cancelled,
            ),
        };
        tracing::debug!(tab = tab.as_str(), ?kind, started, "load requested");
        started
    }

    /// What: Search listings with new filters.
    ///
    /// Inputs:
    /// - `filters`: Replacement listing filters
    /// - `tx`: Outcome channel
    ///
    /// Output:
    /// - `true` when the first page under the new filters was requested.
    ///
    /// Details:
    /// - A filter change is a new collection: any in-flight page is dropped.
    pub fn search_listings(
        &mut self,
        filters: ListingFilters,
        tx: &mpsc::UnboundedSender<PageOutcome>,
    ) -> bool {
        self.listing_filters = filters;
        self.request(Tab::Listings, LoadKind::Refresh, tx)
    }

    /// What: Open a conversation and load its first page of messages.
    ///
    /// Inputs:
    /// - `conversation_id`: Conversation to open
    /// - `tx`: Outcome channel
    ///
    /// Output:
    /// - `true` when the first page was requested.
    pub fn open_conversation(
        &mut self,
        conversation_id: &str,
        tx: &mpsc::UnboundedSender<PageOutcome>,
    ) -> bool {
        let conversation_id = conversation_id.trim();
        if conversation_id.is_empty() {
            return false;
        }
        self.message_filters = MessageFilters {
            conversation_id: conversation_id.to_string(),
        };
        self.active = Tab::Messages;
        self.request(Tab::Messages, LoadKind::Refresh, tx)
    }

    /// What: Reflect an accepted favorite change in the open collections.
    ///
    /// Inputs:
    /// - `id`: Listing id
    /// - `favorite`: Flag the server accepted
    ///
    /// Details:
    /// - Updates the listing's flag in the listings collection.
    /// - Unfavoriting removes the listing from favorites; favoriting prepends it when the
    ///   listing is known and not already there.
    pub fn apply_favorite_change(&mut self, id: &str, favorite: bool) {
        let known = self
            .listings
            .items()
            .iter()
            .chain(self.favorites.items())
            .find(|l| l.id == id)
            .cloned();
        if let Some(mut listing) = known {
            listing.is_favorite = favorite;
            lists::update_item(&mut self.listings, listing.clone());
            if favorite && !self.favorites.items().iter().any(|l| l.id == id) {
                lists::add_item(&mut self.favorites, listing);
            }
        }
        if !favorite {
            lists::remove_item(&mut self.favorites, id);
        }
    }

    /// What: Toggle a listing's favorite flag on the server.
    ///
    /// Inputs:
    /// - `id`: Listing id
    ///
    /// Output:
    /// - New flag on success.
    ///
    /// # Errors
    /// - The server's error; the favorites cache has been rolled back.
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let api = self.api.clone();
        let favorite = favorites::toggle_favorite(id, &api).await?;
        self.apply_favorite_change(id, favorite);
        Ok(favorite)
    }

    /// What: Tear the session down.
    ///
    /// Details:
    /// - Sets the shared flag so workers stop sending.
    /// - Invalidates every outstanding ticket.
    pub fn shutdown(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        self.listings.cancel();
        self.favorites.cancel();
        self.deals.cancel();
        self.conversations.cancel();
        self.messages.cancel();
        tracing::info!("session shut down");
    }
}
