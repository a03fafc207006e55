//! Backend data retrieval split into submodules.
//!
//! Every list endpoint goes through [`envelope::normalize_page`], so callers
//! only ever see a [`Page`], whichever shape the endpoint answered with.

use std::future::Future;

use crate::state::{Cursor, Page};

mod chat;
mod client;
pub mod envelope;
mod fetchers;
mod kenz;
mod promotions;

/// Result alias used at the network boundary.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Parameters of a single page request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRequest<F> {
    /// Continuation token; `None` asks for the first page.
    pub cursor: Option<Cursor>,
    /// Requested page size; `None` leaves it to the server.
    pub limit: Option<u32>,
    /// Collection-specific filters.
    pub filters: F,
}

impl<F> PageRequest<F> {
    /// What: Query pairs shared by every paginated endpoint.
    ///
    /// Output:
    /// - `cursor` and `limit` pairs for the fields that are set.
    pub(crate) fn paging_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(2);
        if let Some(cursor) = &self.cursor {
            query.push(("cursor", cursor.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

/// Fetches one page of a collection.
///
/// Implementations perform the request and normalise the response; they
/// never accumulate. The loader and the session workers are the only callers.
pub trait PageFetcher: Send + Sync {
    /// Entity the collection holds.
    type Item: Send;
    /// Filters that define the collection; changing them starts a new collection.
    type Filters: Clone + std::fmt::Debug + Default + Send + Sync;

    /// What: Fetch the page described by `request`.
    ///
    /// Inputs:
    /// - `request`: Cursor, limit and filters.
    ///
    /// Output:
    /// - `Ok(Page)` in server order; `Err` on transport, status or decoding failures.
    fn fetch_page(
        &self,
        request: PageRequest<Self::Filters>,
    ) -> impl Future<Output = Result<Page<Self::Item>>> + Send;
}

pub use chat::{MessageFilters, fetch_conversations, fetch_messages};
pub use client::{ApiClient, map_status_error};
pub use envelope::normalize_page;
pub use fetchers::{
    ConversationsFetcher, DealsFetcher, FavoritesFetcher, ListingsFetcher, MessagesFetcher,
};
pub use kenz::{
    DealFilters, ListingFilters, ListingSort, fetch_deals, fetch_favorite_ids, fetch_favorites,
    fetch_listings, set_favorite,
};
pub use promotions::fetch_promotions;
