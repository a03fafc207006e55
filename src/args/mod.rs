//! Command-line argument parsing and handling.

pub mod auction;
pub mod chat;
pub mod definition;
pub mod kenz;
pub mod promotions;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, process_args};
pub use utils::determine_log_level;
