use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::select;
use tokio::sync::mpsc;

use super::channels::PageOutcome;
use super::commands::{Command, parse_command};
use super::handlers::{Applied, handle_page_outcome};
use super::session::{LoadKind, Session, Tab};
use crate::app::favorites;
use crate::app::render::{conversation_line, deal_line, listing_line, message_line, status_line};
use crate::i18n;
use crate::sources::ListingFilters;

/// What: Print the items of a tab starting at `from`, then its status line.
///
/// Inputs:
/// - `session`: Session holding the collections
/// - `tab`: Tab to print
/// - `from`: Index of the first item to print
pub fn print_tab(session: &Session, tab: Tab, from: usize) {
    let now = chrono::Utc::now();
    let status = match tab {
        Tab::Listings => {
            for l in session.listings().items().iter().skip(from) {
                println!("{}", listing_line(l, now));
            }
            status_line(session.listings())
        }
        Tab::Favorites => {
            for l in session.favorites().items().iter().skip(from) {
                println!("{}", listing_line(l, now));
            }
            status_line(session.favorites())
        }
        Tab::Deals => {
            for d in session.deals().items().iter().skip(from) {
                println!("{}", deal_line(d));
            }
            status_line(session.deals())
        }
        Tab::Conversations => {
            for c in session.conversations().items().iter().skip(from) {
                println!("{}", conversation_line(c));
            }
            status_line(session.conversations())
        }
        Tab::Messages => {
            for m in session.messages().items().iter().skip(from) {
                println!("{}", message_line(m));
            }
            status_line(session.messages())
        }
    };
    if let Some(status) = status {
        println!("{status}");
    }
}

/// What: Switch to a tab, printing what is loaded and loading the first page if needed.
///
/// Inputs:
/// - `session`: Session
/// - `tab`: Target tab
/// - `tx`: Outcome channel
fn switch_tab(session: &mut Session, tab: Tab, tx: &mpsc::UnboundedSender<PageOutcome>) {
    session.set_active(tab);
    println!("{}", i18n::t_fmt1("app.browse.showing", tab.as_str()));
    if tab == Tab::Messages && session.open_conversation_id().is_empty() {
        println!("{}", i18n::t("app.browse.no_conversation"));
        return;
    }
    session.request(tab, LoadKind::First, tx);
    print_tab(session, tab, 0);
}

/// What: Ensure a listing's favorite flag matches `favorite`.
///
/// Inputs:
/// - `session`: Session
/// - `id`: Listing id
/// - `favorite`: Desired flag
///
/// Details:
/// - No remote call when the cache already holds the desired flag.
/// - Failures are printed; the cache has already been rolled back.
async fn set_favorite(session: &mut Session, id: &str, favorite: bool) {
    if favorites::is_favorite(id) == favorite {
        println!("{}", i18n::t_fmt1("app.browse.already", id));
        return;
    }
    match session.toggle_favorite(id).await {
        Ok(true) => println!("{}", i18n::t_fmt1("app.favorites.added", id)),
        Ok(false) => println!("{}", i18n::t_fmt1("app.favorites.removed", id)),
        Err(e) => eprintln!("{}", i18n::t_fmt1("app.errors.favorite_failed", e)),
    }
}

/// What: Execute one browser command.
///
/// Inputs:
/// - `session`: Session
/// - `command`: Parsed command
/// - `tx`: Outcome channel
///
/// Output:
/// - `false` when the browser should exit.
async fn handle_command(
    session: &mut Session,
    command: Command,
    tx: &mpsc::UnboundedSender<PageOutcome>,
) -> bool {
    let active = session.active();
    match command {
        Command::Empty => {}
        Command::Tab(tab) => switch_tab(session, tab, tx),
        Command::More => {
            if !session.request(active, LoadKind::More, tx) {
                if session.is_busy(active) {
                    println!("{}", i18n::t("app.browse.busy"));
                } else {
                    print_tab(session, active, usize::MAX);
                }
            }
        }
        Command::Refresh => {
            if !session.request(active, LoadKind::Refresh, tx) && active == Tab::Messages {
                println!("{}", i18n::t("app.browse.no_conversation"));
            }
        }
        Command::Search(text) => {
            let text = text.trim();
            let filters = ListingFilters {
                search: (!text.is_empty()).then(|| text.to_string()),
                ..session.listing_filters().clone()
            };
            session.set_active(Tab::Listings);
            session.search_listings(filters, tx);
        }
        Command::Open(id) => {
            session.open_conversation(&id, tx);
        }
        Command::Favorite(id) => set_favorite(session, &id, true).await,
        Command::Unfavorite(id) => set_favorite(session, &id, false).await,
        Command::Help => println!("{}", i18n::t("app.browse.help")),
        Command::Quit => return false,
        Command::Unknown(raw) => println!("{}", i18n::t_fmt1("app.browse.unknown", raw)),
    }
    true
}

/// What: Drive the interactive line-mode browser until `quit` or end of input.
///
/// Inputs:
/// - `session`: Session with filters applied
/// - `outcome_rx`: Receiver paired with `tx`
/// - `tx`: Outcome channel handed to page workers
/// - `on_change`: Called after each favorite toggle (persistence hook)
///
/// Output:
/// - `Ok(())` on `quit` or end of input.
///
/// Details:
/// - Page completions are applied as they arrive; only the shown tab is printed.
/// - Stdin is read line by line with tokio; input and completions are multiplexed with `select!`.
///
/// # Errors
/// - Returns the I/O error when stdin cannot be read.
pub async fn run_loop<P>(
    session: &mut Session,
    outcome_rx: &mut mpsc::UnboundedReceiver<PageOutcome>,
    tx: &mpsc::UnboundedSender<PageOutcome>,
    mut on_change: P,
) -> std::io::Result<()>
where
    P: FnMut(),
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", i18n::t("app.browse.help"));
    session.request(Tab::Listings, LoadKind::First, tx);
    loop {
        select! {
            Some(outcome) = outcome_rx.recv() => {
                if let Some(Applied { tab, first_new }) = handle_page_outcome(session, outcome)
                    && tab == session.active()
                {
                    print_tab(session, tab, first_new);
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let command = parse_command(&line);
                        let toggles = matches!(command, Command::Favorite(_) | Command::Unfavorite(_));
                        if !handle_command(session, command, tx).await {
                            break;
                        }
                        if toggles {
                            on_change();
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read stdin");
                        return Err(e);
                    }
                }
            }
        }
    }
    Ok(())
}
