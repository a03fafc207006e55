//! Non-I/O logic split into modular submodules.

pub mod auction;
pub mod lists;
pub mod pager;
pub mod promotions;

// Re-export public APIs so callers can use crate::logic::... directly
pub use auction::{AuctionClock, remaining, watch_countdown};
pub use lists::{add_item, remove_item, update_item};
pub use pager::{Loader, describe_fetch_error};
pub use promotions::{BestPromotion, best_promotion, discount_for, is_eligible};
