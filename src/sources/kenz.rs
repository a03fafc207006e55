//! Kenz marketplace endpoints: listings, favorites and escrow deals.

use reqwest::Method;
use tracing::info;

use super::client::ApiClient;
use super::envelope::normalize_page;
use super::{PageRequest, Result};
use crate::state::{Deal, DealStatus, Listing, Page};

/// Sort orders the listings endpoint understands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListingSort {
    /// Most recent first (server default).
    #[default]
    Newest,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Auctions closest to their end first.
    EndingSoon,
}

impl ListingSort {
    /// Query parameter value.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::EndingSoon => "ending_soon",
        }
    }

    /// What: Parse a user-supplied sort key.
    ///
    /// Inputs:
    /// - `key`: Sort name, case-insensitive; `-` and `_` are interchangeable.
    ///
    /// Output:
    /// - Matching sort, or `None` when unknown.
    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "newest" | "recent" => Some(Self::Newest),
            "price_asc" | "cheapest" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "ending_soon" | "ending" => Some(Self::EndingSoon),
            _ => None,
        }
    }
}

/// Filters defining a listings collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingFilters {
    /// Free-text search.
    pub search: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Sort order; `None` leaves the server default.
    pub sort: Option<ListingSort>,
}

impl ListingFilters {
    /// What: Query pairs for the filters that are set.
    ///
    /// Output:
    /// - Pairs for non-blank text filters and the sort, in a stable order.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        let text = [
            ("search", &self.search),
            ("category", &self.category),
            ("city", &self.city),
        ];
        for (key, value) in text {
            if let Some(v) = value.as_deref().map(str::trim)
                && !v.is_empty()
            {
                query.push((key, v.to_string()));
            }
        }
        if let Some(sort) = self.sort {
            query.push(("sort", sort.as_param().to_string()));
        }
        query
    }
}

/// Filters defining a deals collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DealFilters {
    /// Restrict to one status.
    pub status: Option<DealStatus>,
}

/// What: Fetch one page of marketplace listings.
///
/// Inputs:
/// - `api`: Backend client.
/// - `request`: Cursor, limit and listing filters.
///
/// Output:
/// - Normalised page of listings.
///
/// # Errors
/// - Transport, status and decoding failures
pub async fn fetch_listings(
    api: &ApiClient,
    request: &PageRequest<ListingFilters>,
) -> Result<Page<Listing>> {
    let mut query = request.paging_query();
    query.extend(request.filters.to_query());
    let url = api.endpoint("kenz/listings", &query)?;
    let page: Page<Listing> = normalize_page(api.get_json(url).await?)?;
    info!(
        count = page.items.len(),
        has_next = page.next_cursor.is_some(),
        "fetched listings page"
    );
    Ok(page)
}

/// What: Fetch one page of the user's favorite listings.
///
/// Inputs:
/// - `api`: Backend client.
/// - `request`: Cursor and limit.
///
/// Output:
/// - Normalised page of listings.
///
/// # Errors
/// - Transport, status and decoding failures
pub async fn fetch_favorites(api: &ApiClient, request: &PageRequest<()>) -> Result<Page<Listing>> {
    let url = api.endpoint("kenz/favorites", &request.paging_query())?;
    let page: Page<Listing> = normalize_page(api.get_json(url).await?)?;
    info!(
        count = page.items.len(),
        has_next = page.next_cursor.is_some(),
        "fetched favorites page"
    );
    Ok(page)
}

/// What: Fetch the ids of every favorited listing.
///
/// Inputs:
/// - `api`: Backend client.
///
/// Output:
/// - All favorite ids; the endpoint may answer with an array or an envelope.
///
/// # Errors
/// - Transport, status and decoding failures
pub async fn fetch_favorite_ids(api: &ApiClient) -> Result<Vec<String>> {
    let url = api.endpoint("kenz/favorites/ids", &[])?;
    let page: Page<String> = normalize_page(api.get_json(url).await?)?;
    info!(count = page.items.len(), "fetched favorite ids");
    Ok(page.items)
}

/// What: Mark or unmark a listing as favorite on the server.
///
/// Inputs:
/// - `api`: Backend client.
/// - `listing_id`: Listing to change.
/// - `favorite`: `true` to add, `false` to remove.
///
/// Output:
/// - `Ok(())` once the server accepted the change.
///
/// # Errors
/// - Transport and status failures
pub async fn set_favorite(api: &ApiClient, listing_id: &str, favorite: bool) -> Result<()> {
    let url = api.endpoint_segments(&["kenz", "listings", listing_id, "favorite"], &[])?;
    let method = if favorite {
        Method::POST
    } else {
        Method::DELETE
    };
    api.send_empty(method, url).await?;
    info!(listing_id, favorite, "favorite updated on server");
    Ok(())
}

/// What: Fetch one page of escrow deals.
///
/// Inputs:
/// - `api`: Backend client.
/// - `request`: Cursor, limit and optional status filter.
///
/// Output:
/// - Normalised page of deals.
///
/// # Errors
/// - Transport, status and decoding failures
pub async fn fetch_deals(api: &ApiClient, request: &PageRequest<DealFilters>) -> Result<Page<Deal>> {
    let mut query = request.paging_query();
    if let Some(status) = request.filters.status {
        query.push(("status", status.as_param().to_string()));
    }
    let url = api.endpoint("kenz/deals", &query)?;
    let page: Page<Deal> = normalize_page(api.get_json(url).await?)?;
    info!(
        count = page.items.len(),
        has_next = page.next_cursor.is_some(),
        "fetched deals page"
    );
    Ok(page)
}
