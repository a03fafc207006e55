//! Accumulating state of one cursor-paginated collection.
//!
//! The collection never performs I/O. Callers ask it for a [`LoadTicket`],
//! fetch the page themselves, and hand the result back with
//! [`Collection::apply_page`] or [`Collection::apply_error`]. A ticket is
//! only issued when the guard allows the load, and a completion is only
//! applied when its ticket is still current.

use crate::state::types::{Cursor, Page};

/// Permission to run one fetch against a collection.
///
/// Carries the generation it was issued for; a completion whose generation no
/// longer matches (after a refresh, filter change or cancel) is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    /// Collection generation the ticket belongs to.
    pub generation: u64,
    /// Cursor to send, `None` for a first page.
    pub cursor: Option<Cursor>,
    /// Append to the accumulated items instead of replacing them.
    pub append: bool,
}

/// Accumulated items, continuation cursor and load flags of one collection.
#[derive(Clone, Debug)]
pub struct Collection<T> {
    /// Items of every applied page, in fetch order.
    items: Vec<T>,
    /// Cursor returned by the most recent applied page.
    cursor: Option<Cursor>,
    /// Most recent applied page had no cursor.
    exhausted: bool,
    /// First-page load in flight.
    loading: bool,
    /// Append load in flight.
    loading_more: bool,
    /// Message of the last failed load.
    error: Option<String>,
    /// Bumped on every reset; stale tickets carry an older value.
    generation: u64,
    /// At least one page has been applied since the last reset.
    loaded: bool,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            exhausted: false,
            loading: false,
            loading_more: false,
            error: None,
            generation: 0,
            loaded: false,
        }
    }
}

impl<T> Collection<T> {
    /// Empty collection with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated items in fetch order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of accumulated items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when no items are accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cursor for the next page, if any.
    #[must_use]
    pub const fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// `true` once a page without continuation has been applied.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// First-page load in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Append load in flight.
    #[must_use]
    pub const fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Either kind of load in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.loading || self.loading_more
    }

    /// Message of the last failed load, cleared when a new load starts.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// At least one page has been applied since the last reset.
    #[must_use]
    pub const fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// What: Report whether `begin_load_more` would issue a ticket.
    ///
    /// Output:
    /// - `true` only when idle, not exhausted, and a cursor is present.
    ///
    /// Details:
    /// - Owners use this to enable or disable their "load more" control.
    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        !self.loading && !self.loading_more && !self.exhausted && self.cursor.is_some()
    }

    /// What: Start a load for the given cursor.
    ///
    /// Inputs:
    /// - `cursor`: Cursor to send; `None` requests the first page.
    /// - `append`: Whether the result extends (`true`) or replaces (`false`) the items.
    ///
    /// Output:
    /// - `Some(LoadTicket)` when the load may start; `None` when another load is in flight,
    ///   or an append was requested without a cursor.
    ///
    /// Details:
    /// - Sets the matching loading flag and clears the previous error.
    /// - Overlapping loads are refused rather than queued.
    pub fn begin_load(&mut self, cursor: Option<Cursor>, append: bool) -> Option<LoadTicket> {
        if self.is_busy() {
            tracing::debug!(
                generation = self.generation,
                append,
                "load refused: another load is in flight"
            );
            return None;
        }
        if append && cursor.is_none() {
            tracing::debug!(generation = self.generation, "append refused: no cursor");
            return None;
        }
        if append {
            self.loading_more = true;
        } else {
            self.loading = true;
        }
        self.error = None;
        Some(LoadTicket {
            generation: self.generation,
            cursor,
            append,
        })
    }

    /// What: Start the next-page load if the guard allows it.
    ///
    /// Output:
    /// - `Some(LoadTicket)` carrying the stored cursor; `None` when idle conditions are not met.
    ///
    /// Details:
    /// - No-op unless `!loading && !loading_more && !exhausted && cursor present`.
    pub fn begin_load_more(&mut self) -> Option<LoadTicket> {
        if !self.can_load_more() {
            return None;
        }
        let cursor = self.cursor.clone();
        self.begin_load(cursor, true)
    }

    /// What: Discard everything loaded so far and start a fresh first-page load.
    ///
    /// Output:
    /// - Ticket for the first page; always issued.
    ///
    /// Details:
    /// - Bumps the generation, so completions of loads started before the refresh are dropped.
    /// - Used for both explicit refresh and filter changes.
    pub fn begin_refresh(&mut self) -> LoadTicket {
        self.reset();
        self.loading = true;
        LoadTicket {
            generation: self.generation,
            cursor: None,
            append: false,
        }
    }

    /// What: Return the collection to its initial state under a new generation.
    ///
    /// Details:
    /// - Clears items, cursor, exhausted flag, error and both loading flags.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.items.clear();
        self.cursor = None;
        self.exhausted = false;
        self.loading = false;
        self.loading_more = false;
        self.error = None;
        self.loaded = false;
    }

    /// What: Invalidate in-flight loads without touching the accumulated items.
    ///
    /// Details:
    /// - Called on teardown; any completion arriving afterwards is ignored.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.loading = false;
        self.loading_more = false;
    }

    /// What: Apply a fetched page.
    ///
    /// Inputs:
    /// - `ticket`: Ticket the fetch was started with.
    /// - `page`: Page returned by the fetcher.
    ///
    /// Output:
    /// - `true` when applied; `false` when the ticket is stale and the page was dropped.
    ///
    /// Details:
    /// - Appends or replaces per the ticket, stores the new cursor and recomputes `exhausted`.
    /// - Never sorts or deduplicates.
    pub fn apply_page(&mut self, ticket: &LoadTicket, page: Page<T>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale page"
            );
            return false;
        }
        let Page { items, next_cursor } = page;
        if ticket.append {
            self.items.extend(items);
        } else {
            self.items = items;
        }
        self.exhausted = next_cursor.is_none();
        self.cursor = next_cursor;
        self.loading = false;
        self.loading_more = false;
        self.error = None;
        self.loaded = true;
        true
    }

    /// What: Record a failed fetch.
    ///
    /// Inputs:
    /// - `ticket`: Ticket the fetch was started with.
    /// - `message`: Human-readable failure description.
    ///
    /// Output:
    /// - `true` when recorded; `false` for a stale ticket.
    ///
    /// Details:
    /// - Items, cursor and exhausted flag stay as they were; both loading flags clear.
    pub fn apply_error(&mut self, ticket: &LoadTicket, message: String) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale error"
            );
            return false;
        }
        self.loading = false;
        self.loading_more = false;
        self.error = Some(message);
        true
    }

    /// Mutable access for the local mutation helpers in `logic::lists`.
    pub(crate) fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}
