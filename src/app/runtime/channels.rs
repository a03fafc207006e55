use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use crate::state::{Conversation, Deal, Listing, LoadTicket, Message, Page};

/// Result of one page fetch, tagged with the ticket it was issued for.
#[derive(Debug)]
pub struct Completion<T> {
    /// Ticket obtained when the load started.
    pub ticket: LoadTicket,
    /// Page, or the display message of the failure.
    pub result: Result<Page<T>, String>,
}

/// Page fetch completion routed back to the event loop.
#[derive(Debug)]
pub enum PageOutcome {
    /// Marketplace listings page.
    Listings(Completion<Listing>),
    /// Favorite listings page.
    Favorites(Completion<Listing>),
    /// Escrow deals page.
    Deals(Completion<Deal>),
    /// Conversations page.
    Conversations(Completion<Conversation>),
    /// Messages page of the open conversation.
    Messages(Completion<Message>),
}

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - Workers send [`PageOutcome`]s on `outcome_tx`; the event loop drains `outcome_rx`.
/// - `cancelled` is set on teardown and checked by workers and handlers.
pub struct Channels {
    /// Sender cloned into every page worker.
    pub outcome_tx: mpsc::UnboundedSender<PageOutcome>,
    /// Receiver drained by the event loop.
    pub outcome_rx: mpsc::UnboundedReceiver<PageOutcome>,
    /// Teardown flag shared with the session and workers.
    pub cancelled: Arc<AtomicBool>,
}

impl Channels {
    /// Fresh channel pair with the teardown flag cleared.
    #[must_use]
    pub fn new() -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            outcome_tx,
            outcome_rx,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// `true` once teardown has started.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::new()
    }
}
