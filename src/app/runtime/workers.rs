use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use super::channels::{Completion, PageOutcome};
use crate::logic::describe_fetch_error;
use crate::sources::{PageFetcher, PageRequest};
use crate::state::LoadTicket;

/// What: Spawn a task that fetches one page and reports it to the event loop.
///
/// Inputs:
/// - `fetcher`: Page source, moved into the task
/// - `request`: Cursor, limit and filters to send
/// - `ticket`: Ticket returned by the collection's `begin_*` call
/// - `wrap`: Tags the completion with its collection
/// - `tx`: Outcome channel
/// - `cancelled`: Teardown flag
///
/// Output:
/// - None (spawns async task)
///
/// Details:
/// - Errors are turned into display messages inside the task.
/// - Nothing is sent once teardown has started or the receiver is gone.
pub fn spawn_page_worker<F>(
    fetcher: F,
    request: PageRequest<F::Filters>,
    ticket: LoadTicket,
    wrap: fn(Completion<F::Item>) -> PageOutcome,
    tx: &mpsc::UnboundedSender<PageOutcome>,
    cancelled: &Arc<AtomicBool>,
) where
    F: PageFetcher + 'static,
    F::Item: 'static,
    F::Filters: 'static,
{
    let tx = tx.clone();
    let cancelled = Arc::clone(cancelled);
    tokio::spawn(async move {
        let result = fetcher
            .fetch_page(request)
            .await
            .map_err(|e| describe_fetch_error(e.as_ref()));
        if cancelled.load(Ordering::Relaxed) {
            tracing::debug!(generation = ticket.generation, "page worker finished after teardown");
            return;
        }
        let _ = tx.send(wrap(Completion { ticket, result }));
    });
}
