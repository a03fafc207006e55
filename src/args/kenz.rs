//! Command-line listings, favorites and deals output.

use crate::app::favorites;
use crate::app::persist::{favorites_path, maybe_flush_favorites};
use crate::app::render::{deal_line, listing_line};
use crate::app::runtime::hydrate_favorites;
use crate::args::utils::print_collection;
use crate::config::Settings;
use crate::i18n;
use crate::logic::Loader;
use crate::sources::{
    ApiClient, DealFilters, DealsFetcher, FavoritesFetcher, ListingFilters, ListingsFetcher,
};

/// What: Print listings matching the filters.
///
/// Inputs:
/// - `api`: Backend client
/// - `filters`: Search, category, city and sort
/// - `limit`: Page size
/// - `pages`: Number of pages to load
///
/// Output:
/// - Exit code (`1` when loading failed).
pub async fn handle_listings(
    api: &ApiClient,
    filters: ListingFilters,
    limit: Option<u32>,
    pages: usize,
) -> i32 {
    tracing::info!(?filters, pages, "listings requested from CLI");
    let mut loader =
        Loader::new(ListingsFetcher { api: api.clone() }, filters, limit).with_label("listings");
    loader.load_pages(pages).await;
    let now = chrono::Utc::now();
    print_collection(loader.collection(), |l| listing_line(l, now))
}

/// What: Print the user's favorite listings.
///
/// Inputs:
/// - `api`: Backend client
/// - `limit`: Page size
/// - `pages`: Number of pages to load
///
/// Output:
/// - Exit code (`1` when loading failed).
pub async fn handle_favorites(api: &ApiClient, limit: Option<u32>, pages: usize) -> i32 {
    tracing::info!(pages, "favorites requested from CLI");
    let mut loader =
        Loader::new(FavoritesFetcher { api: api.clone() }, (), limit).with_label("favorites");
    loader.load_pages(pages).await;
    for listing in loader.items() {
        favorites::set(&listing.id, true);
    }
    let now = chrono::Utc::now();
    print_collection(loader.collection(), |l| listing_line(l, now))
}

/// What: Print escrow deals.
///
/// Inputs:
/// - `api`: Backend client
/// - `filters`: Optional status filter
/// - `limit`: Page size
/// - `pages`: Number of pages to load
///
/// Output:
/// - Exit code (`1` when loading failed).
pub async fn handle_deals(
    api: &ApiClient,
    filters: DealFilters,
    limit: Option<u32>,
    pages: usize,
) -> i32 {
    tracing::info!(?filters, pages, "deals requested from CLI");
    let mut loader =
        Loader::new(DealsFetcher { api: api.clone() }, filters, limit).with_label("deals");
    loader.load_pages(pages).await;
    print_collection(loader.collection(), deal_line)
}

/// What: Toggle one listing's favorite flag.
///
/// Inputs:
/// - `api`: Backend client
/// - `settings`: Decides whether the cache is persisted
/// - `listing_id`: Listing to toggle
///
/// Output:
/// - Exit code (`1` when the server rejected the change).
///
/// Details:
/// - The cache is hydrated first so the toggle direction matches the server.
pub async fn handle_toggle_favorite(api: &ApiClient, settings: &Settings, listing_id: &str) -> i32 {
    tracing::info!(listing_id, "favorite toggle requested from CLI");
    hydrate_favorites(api, settings).await;
    let code = match favorites::toggle_favorite(listing_id, api).await {
        Ok(true) => {
            println!("{}", i18n::t_fmt1("app.favorites.added", listing_id));
            0
        }
        Ok(false) => {
            println!("{}", i18n::t_fmt1("app.favorites.removed", listing_id));
            0
        }
        Err(e) => {
            eprintln!("{}", i18n::t_fmt1("app.errors.favorite_failed", e));
            1
        }
    };
    if settings.persist_favorites {
        maybe_flush_favorites(&favorites_path());
    }
    code
}
