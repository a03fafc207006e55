//! `PageFetcher` implementations backed by the HTTP endpoints.

use std::future::Future;

use super::chat::{MessageFilters, fetch_conversations, fetch_messages};
use super::client::ApiClient;
use super::kenz::{DealFilters, ListingFilters, fetch_deals, fetch_favorites, fetch_listings};
use super::{PageFetcher, PageRequest, Result};
use crate::state::{Conversation, Deal, Listing, Message, Page};

/// Marketplace listings.
#[derive(Clone, Debug)]
pub struct ListingsFetcher {
    /// Backend client.
    pub api: ApiClient,
}

/// The user's favorite listings.
#[derive(Clone, Debug)]
pub struct FavoritesFetcher {
    /// Backend client.
    pub api: ApiClient,
}

/// Escrow deals.
#[derive(Clone, Debug)]
pub struct DealsFetcher {
    /// Backend client.
    pub api: ApiClient,
}

/// Chat conversations.
#[derive(Clone, Debug)]
pub struct ConversationsFetcher {
    /// Backend client.
    pub api: ApiClient,
}

/// Messages of one conversation.
#[derive(Clone, Debug)]
pub struct MessagesFetcher {
    /// Backend client.
    pub api: ApiClient,
}

impl PageFetcher for ListingsFetcher {
    type Item = Listing;
    type Filters = ListingFilters;

    fn fetch_page(
        &self,
        request: PageRequest<ListingFilters>,
    ) -> impl Future<Output = Result<Page<Listing>>> + Send {
        async move { fetch_listings(&self.api, &request).await }
    }
}

impl PageFetcher for FavoritesFetcher {
    type Item = Listing;
    type Filters = ();

    fn fetch_page(
        &self,
        request: PageRequest<()>,
    ) -> impl Future<Output = Result<Page<Listing>>> + Send {
        async move { fetch_favorites(&self.api, &request).await }
    }
}

impl PageFetcher for DealsFetcher {
    type Item = Deal;
    type Filters = DealFilters;

    fn fetch_page(
        &self,
        request: PageRequest<DealFilters>,
    ) -> impl Future<Output = Result<Page<Deal>>> + Send {
        async move { fetch_deals(&self.api, &request).await }
    }
}

impl PageFetcher for ConversationsFetcher {
    type Item = Conversation;
    type Filters = ();

    fn fetch_page(
        &self,
        request: PageRequest<()>,
    ) -> impl Future<Output = Result<Page<Conversation>>> + Send {
        async move { fetch_conversations(&self.api, &request).await }
    }
}

impl PageFetcher for MessagesFetcher {
    type Item = Message;
    type Filters = MessageFilters;

    fn fetch_page(
        &self,
        request: PageRequest<MessageFilters>,
    ) -> impl Future<Output = Result<Page<Message>>> + Send {
        async move { fetch_messages(&self.api, &request).await }
    }
}
