use super::channels::{Completion, PageOutcome};
use super::session::{Session, Tab};
use crate::app::favorites;
use crate::state::{Collection, Identified};

/// Where an applied completion landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Applied {
    /// Tab whose collection changed.
    pub tab: Tab,
    /// Index of the first item that was not shown before.
    pub first_new: usize,
}

/// What: Apply one completion to its collection.
///
/// Inputs:
/// - `collection`: Target collection
/// - `completion`: Ticket plus page or error message
///
/// Output:
/// - Index of the first new item when applied; `None` for stale tickets.
fn apply_completion<T>(collection: &mut Collection<T>, completion: Completion<T>) -> Option<usize> {
    let first_new = if completion.ticket.append {
        collection.len()
    } else {
        0
    };
    let applied = match completion.result {
        Ok(page) => collection.apply_page(&completion.ticket, page),
        Err(message) => collection.apply_error(&completion.ticket, message),
    };
    applied.then_some(first_new)
}

/// What: Handle a page fetch completion.
///
/// Inputs:
/// - `session`: Session owning the collections
/// - `outcome`: Completion sent by a page worker
///
/// Output:
/// - Where the completion landed, or `None` when it was dropped.
///
/// Details:
/// - Completions arriving after teardown are dropped.
/// - Completions whose ticket is stale (refresh, filter change, conversation switch) are dropped.
/// - Favorites pages also mark their listings in the favorites cache.
pub fn handle_page_outcome(session: &mut Session, outcome: PageOutcome) -> Option<Applied> {
    if session.is_cancelled() {
        tracing::debug!("dropping page completion after teardown");
        return None;
    }
    let (tab, first_new) = match outcome {
        PageOutcome::Listings(c) => (Tab::Listings, apply_completion(&mut session.listings, c)),
        PageOutcome::Favorites(c) => {
            let ids: Vec<String> = c
                .result
                .as_ref()
                .map(|page| page.items.iter().map(|l| l.id().to_string()).collect())
                .unwrap_or_default();
            let first_new = apply_completion(&mut session.favorites, c);
            if first_new.is_some() {
                for id in &ids {
                    favorites::set(id, true);
                }
            }
            (Tab::Favorites, first_new)
        }
        PageOutcome::Deals(c) => (Tab::Deals, apply_completion(&mut session.deals, c)),
        PageOutcome::Conversations(c) => (
            Tab::Conversations,
            apply_completion(&mut session.conversations, c),
        ),
        PageOutcome::Messages(c) => (Tab::Messages, apply_completion(&mut session.messages, c)),
    };
    match first_new {
        Some(first_new) => Some(Applied { tab, first_new }),
        None => {
            tracing::debug!(tab = tab.as_str(), "dropping stale page completion");
            None
        }
    }
}
