//! Entity types and the pure per-collection state machine.

pub mod collection;
pub mod types;

pub use collection::{Collection, LoadTicket};
pub use types::{
    Conversation, Cursor, Deal, DealStatus, Discount, Identified, Listing, Message, Page,
    Promotion,
};
