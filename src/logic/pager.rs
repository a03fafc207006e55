//! Async driver for one cursor-paginated collection.
//!
//! A [`Loader`] pairs a [`Collection`] with the [`PageFetcher`] that fills it.
//! Every operation takes `&mut self`, so a loader cannot have two loads in
//! flight at once; the collection's ticket guard additionally turns
//! `load_more` on an exhausted or busy collection into a no-op.

use tracing::{debug, info, warn};

use crate::logic::lists;
use crate::sources::{PageFetcher, PageRequest};
use crate::state::{Collection, Cursor, Identified, LoadTicket};

/// What: Produce the message stored when a page fetch fails.
///
/// Inputs:
/// - `err`: Error returned by the fetcher.
///
/// Output:
/// - The error's own text, or the localised generic message when the text is blank.
pub fn describe_fetch_error(err: &(dyn std::error::Error + Send + Sync)) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        crate::i18n::t("app.errors.fetch_failed")
    } else {
        text
    }
}

/// Collection plus the fetcher, filters and page size that define it.
pub struct Loader<F: PageFetcher> {
    /// Page source.
    fetcher: F,
    /// Filters sent with every request.
    filters: F::Filters,
    /// Page size sent with every request.
    limit: Option<u32>,
    /// Accumulated state.
    collection: Collection<F::Item>,
    /// Name used in log records.
    label: &'static str,
}

impl<F: PageFetcher> Loader<F> {
    /// What: Create a loader with nothing loaded yet.
    ///
    /// Inputs:
    /// - `fetcher`: Page source.
    /// - `filters`: Initial filters.
    /// - `limit`: Page size, or `None` for the server default.
    pub fn new(fetcher: F, filters: F::Filters, limit: Option<u32>) -> Self {
        Self {
            fetcher,
            filters,
            limit,
            collection: Collection::new(),
            label: "collection",
        }
    }

    /// Name this loader in log records.
    #[must_use]
    pub const fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Accumulated state.
    pub const fn collection(&self) -> &Collection<F::Item> {
        &self.collection
    }

    /// Accumulated items in fetch order.
    pub fn items(&self) -> &[F::Item] {
        self.collection.items()
    }

    /// Active filters.
    pub const fn filters(&self) -> &F::Filters {
        &self.filters
    }

    /// Page source.
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// What: Load the page at `cursor`.
    ///
    /// Inputs:
    /// - `cursor`: Cursor to send; `None` for the first page.
    /// - `append`: Extend (`true`) or replace (`false`) the accumulated items.
    ///
    /// Output:
    /// - `true` when a page was fetched and applied; `false` when the guard refused the load
    ///   or the fetch failed (the error is then stored on the collection).
    pub async fn load(&mut self, cursor: Option<Cursor>, append: bool) -> bool {
        let Some(ticket) = self.collection.begin_load(cursor, append) else {
            return false;
        };
        self.run(ticket).await
    }

    /// What: Load the first page unless something is already loaded.
    ///
    /// Output:
    /// - `true` when a page was applied.
    pub async fn first_load(&mut self) -> bool {
        if self.collection.has_loaded() {
            return false;
        }
        self.load(None, false).await
    }

    /// What: Load and append the next page.
    ///
    /// Output:
    /// - `true` when a page was applied; `false` for the guarded no-op
    ///   (loading, exhausted, or no cursor) and for failures.
    pub async fn load_more(&mut self) -> bool {
        let Some(ticket) = self.collection.begin_load_more() else {
            debug!(
                label = self.label,
                exhausted = self.collection.is_exhausted(),
                "load_more skipped"
            );
            return false;
        };
        self.run(ticket).await
    }

    /// What: Drop everything and load the first page again.
    ///
    /// Output:
    /// - `true` when the first page was applied.
    pub async fn refresh(&mut self) -> bool {
        let ticket = self.collection.begin_refresh();
        self.run(ticket).await
    }

    /// What: Switch to new filters, which defines a new collection.
    ///
    /// Inputs:
    /// - `filters`: Replacement filters.
    ///
    /// Output:
    /// - `true` when the first page under the new filters was applied.
    pub async fn set_filters(&mut self, filters: F::Filters) -> bool {
        debug!(label = self.label, filters = ?filters, "filters changed");
        self.filters = filters;
        self.refresh().await
    }

    /// What: Fetch up to `pages` pages in this call.
    ///
    /// Inputs:
    /// - `pages`: Maximum number of pages fetched by this call.
    ///
    /// Output:
    /// - Number of pages applied by this call.
    ///
    /// Details:
    /// - A fresh loader starts with the first page, which counts towards `pages`.
    /// - A loaded loader continues from its cursor with up to `pages` more pages.
    /// - Stops early on exhaustion or on the first failure.
    pub async fn load_pages(&mut self, pages: usize) -> usize {
        let mut applied = 0;
        if pages == 0 {
            return applied;
        }
        if !self.collection.has_loaded() {
            if !self.load(None, false).await {
                return applied;
            }
            applied += 1;
        }
        while applied < pages && self.load_more().await {
            applied += 1;
        }
        applied
    }

    /// Invalidate any completion still owed to this loader.
    pub fn cancel(&mut self) {
        self.collection.cancel();
    }

    /// Fetch for `ticket` and hand the outcome to the collection.
    async fn run(&mut self, ticket: LoadTicket) -> bool {
        let request = PageRequest {
            cursor: ticket.cursor.clone(),
            limit: self.limit,
            filters: self.filters.clone(),
        };
        match self.fetcher.fetch_page(request).await {
            Ok(page) => {
                let count = page.items.len();
                let has_next = page.next_cursor.is_some();
                let applied = self.collection.apply_page(&ticket, page);
                info!(
                    label = self.label,
                    append = ticket.append,
                    count,
                    has_next,
                    total = self.collection.len(),
                    applied,
                    "page loaded"
                );
                applied
            }
            Err(e) => {
                let message = describe_fetch_error(e.as_ref());
                warn!(label = self.label, append = ticket.append, error = %message, "page fetch failed");
                self.collection.apply_error(&ticket, message);
                false
            }
        }
    }
}

impl<F> Loader<F>
where
    F: PageFetcher,
    F::Item: Identified,
{
    /// Remove an item by id; see [`lists::remove_item`].
    pub fn remove_item(&mut self, id: &str) -> Option<F::Item> {
        lists::remove_item(&mut self.collection, id)
    }

    /// Prepend an item; see [`lists::add_item`].
    pub fn add_item(&mut self, item: F::Item) {
        lists::add_item(&mut self.collection, item);
    }

    /// Replace an item by id; see [`lists::update_item`].
    pub fn update_item(&mut self, item: F::Item) -> bool {
        lists::update_item(&mut self.collection, item)
    }
}
