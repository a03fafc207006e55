use crate::config::Settings;
use crate::sources::{ApiClient, DealFilters, ListingFilters, Result, fetch_favorite_ids};

use super::favorites;
use super::persist::{favorites_path, load_favorites, maybe_flush_favorites};

mod channels;
mod commands;
mod event_loop;
mod handlers;
mod session;
mod workers;

pub use channels::{Channels, Completion, PageOutcome};
pub use commands::{Command, parse_command};
pub use event_loop::print_tab;
pub use handlers::{Applied, handle_page_outcome};
pub use session::{LoadKind, Session, Tab};
pub use workers::spawn_page_worker;

/// What: Seed the favorites cache before any list is shown.
///
/// Inputs:
/// - `api`: Backend client
/// - `settings`: Decides whether the on-disk copy is used
///
/// Details:
/// - The on-disk copy is loaded first so favorites show even when offline.
/// - The server's id list then replaces it; a failure keeps the on-disk copy.
pub async fn hydrate_favorites(api: &ApiClient, settings: &Settings) {
    if settings.persist_favorites {
        load_favorites(&favorites_path());
    }
    match fetch_favorite_ids(api).await {
        Ok(ids) => favorites::replace_all(ids),
        Err(e) => tracing::warn!(error = %e, "could not refresh favorite ids; using cached copy"),
    }
}

/// What: Run the interactive browser end-to-end: hydrate favorites, drive the event
/// loop, then tear down and persist.
///
/// Inputs:
/// - `api`: Backend client
/// - `settings`: Effective settings
/// - `listing_filters`: Initial listing filters from the command line
/// - `deal_filters`: Initial deal filters from the command line
///
/// Output:
/// - `Ok(())` when the user quits or stdin closes.
///
/// # Errors
/// - Returns the I/O error when stdin cannot be read; teardown and persistence still run.
pub async fn run(
    api: ApiClient,
    settings: &Settings,
    listing_filters: ListingFilters,
    deal_filters: DealFilters,
) -> Result<()> {
    hydrate_favorites(&api, settings).await;

    let Channels {
        outcome_tx,
        mut outcome_rx,
        cancelled,
    } = Channels::new();
    let mut session = Session::new(api, Some(settings.page_limit), cancelled)
        .with_listing_filters(listing_filters)
        .with_deal_filters(deal_filters);

    let persist = settings.persist_favorites;
    let path = favorites_path();
    let result = event_loop::run_loop(&mut session, &mut outcome_rx, &outcome_tx, || {
        if persist {
            maybe_flush_favorites(&path);
        }
    })
    .await;

    session.shutdown();
    if persist {
        maybe_flush_favorites(&path);
    }
    tracing::info!("browser exited");
    result.map_err(Into::into)
}
