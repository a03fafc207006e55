//! Command-line argument definition and processing.

use clap::Parser;

use crate::config::Settings;
use crate::sources::{ApiClient, DealFilters, ListingFilters, ListingSort};
use crate::state::DealStatus;

/// Storefront - browse marketplace listings, escrow deals and chats from the terminal
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version)]
#[command(about = "Browse marketplace listings, escrow deals and chats from the terminal", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Backend base URL (overrides settings.conf and STOREFRONT_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Locale for messages (e.g. en-US, ar)
    #[arg(long)]
    pub locale: Option<String>,

    /// Print marketplace listings and exit
    #[arg(short = 'l', long)]
    pub listings: bool,

    /// Search text for listings (implies --listings unless --browse is given)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category slug filter for listings
    #[arg(long)]
    pub category: Option<String>,

    /// City filter for listings
    #[arg(long)]
    pub city: Option<String>,

    /// Listing sort order (newest, price-asc, price-desc, ending-soon)
    #[arg(long)]
    pub sort: Option<String>,

    /// Number of pages to load for printed lists
    #[arg(short = 'p', long, default_value_t = 1)]
    pub pages: usize,

    /// Print favorite listings and exit
    #[arg(short = 'f', long)]
    pub favorites: bool,

    /// Print escrow deals and exit
    #[arg(short = 'd', long)]
    pub deals: bool,

    /// Deal status filter (pending, funded, shipped, completed, cancelled, disputed)
    #[arg(long)]
    pub deal_status: Option<String>,

    /// Print chat conversations and exit
    #[arg(short = 'c', long)]
    pub conversations: bool,

    /// Print the messages of a conversation and exit
    #[arg(short = 'm', long, value_name = "CONVERSATION_ID")]
    pub messages: Option<String>,

    /// Print current promotions and exit
    #[arg(long)]
    pub promotions: bool,

    /// Order subtotal in minor units; prints the best promotion for it (use with --promotions)
    #[arg(long, requires = "promotions")]
    pub subtotal: Option<i64>,

    /// Toggle a listing's favorite flag and exit
    #[arg(long, value_name = "LISTING_ID")]
    pub toggle_favorite: Option<String>,

    /// Print an auction countdown every second until the given RFC 3339 end time
    #[arg(long, value_name = "END_TIME")]
    pub watch_auction: Option<String>,

    /// Start the interactive browser (default when no other command is given)
    #[arg(short = 'b', long)]
    pub browse: bool,
}

impl Args {
    /// What: Listing filters built from the command line.
    ///
    /// Output:
    /// - Filters with blank values dropped; an unknown sort is logged and ignored.
    #[must_use]
    pub fn listing_filters(&self) -> ListingFilters {
        let text = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let sort = self.sort.as_deref().and_then(|raw| {
            let parsed = ListingSort::from_config_key(raw);
            if parsed.is_none() {
                tracing::warn!(sort = raw, "unknown sort order; using server default");
            }
            parsed
        });
        ListingFilters {
            search: text(self.search.as_deref()),
            category: text(self.category.as_deref()),
            city: text(self.city.as_deref()),
            sort,
        }
    }

    /// What: Deal filters built from the command line.
    ///
    /// Output:
    /// - Filters; an unknown status is logged and ignored.
    #[must_use]
    pub fn deal_filters(&self) -> DealFilters {
        let status = self.deal_status.as_deref().and_then(|raw| {
            let parsed = DealStatus::from_config_key(raw);
            if parsed.is_none() {
                tracing::warn!(status = raw, "unknown deal status; listing all deals");
            }
            parsed
        });
        DealFilters { status }
    }

    /// `true` when listings should be printed (explicitly, or via --search outside browse mode).
    #[must_use]
    pub const fn wants_listings(&self) -> bool {
        self.listings || (self.search.is_some() && !self.browse)
    }

    /// `true` when any print-and-exit command was requested.
    #[must_use]
    pub const fn has_one_shot(&self) -> bool {
        self.wants_listings()
            || self.favorites
            || self.deals
            || self.conversations
            || self.messages.is_some()
            || self.promotions
            || self.toggle_favorite.is_some()
            || self.watch_auction.is_some()
    }
}

/// What: Run every print-and-exit command that was requested.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
/// - `api`: Backend client
/// - `settings`: Effective settings
///
/// Output:
/// - `Some(exit_code)` when commands ran and the process should exit; `None` to start
///   the interactive browser.
///
/// Details:
/// - Commands run in a fixed order; the exit code is non-zero if any of them failed.
/// - `--browse` continues to the browser even after one-shot commands.
pub async fn process_args(args: &Args, api: &ApiClient, settings: &Settings) -> Option<i32> {
    use crate::args::{auction, chat, kenz, promotions};

    if !args.has_one_shot() {
        return None;
    }
    let limit = Some(settings.page_limit);
    let pages = args.pages.max(1);
    let mut code = 0;

    if let Some(id) = &args.toggle_favorite {
        code = code.max(kenz::handle_toggle_favorite(api, settings, id).await);
    }
    if args.wants_listings() {
        code = code.max(kenz::handle_listings(api, args.listing_filters(), limit, pages).await);
    }
    if args.favorites {
        code = code.max(kenz::handle_favorites(api, limit, pages).await);
    }
    if args.deals {
        code = code.max(kenz::handle_deals(api, args.deal_filters(), limit, pages).await);
    }
    if args.conversations {
        code = code.max(chat::handle_conversations(api, limit, pages).await);
    }
    if let Some(conversation_id) = &args.messages {
        code = code.max(chat::handle_messages(api, conversation_id, limit, pages).await);
    }
    if args.promotions {
        code = code.max(promotions::handle_promotions(api, args.subtotal).await);
    }
    if let Some(end) = &args.watch_auction {
        code = code.max(auction::handle_watch_auction(end).await);
    }

    if args.browse {
        tracing::info!(code, "one-shot commands done; starting browser");
        None
    } else {
        Some(code)
    }
}
