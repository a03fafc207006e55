//! Command-line chat output.

use crate::app::render::{conversation_line, message_line};
use crate::args::utils::print_collection;
use crate::logic::Loader;
use crate::sources::{ApiClient, ConversationsFetcher, MessageFilters, MessagesFetcher};

/// What: Print the user's conversations.
///
/// Inputs:
/// - `api`: Backend client
/// - `limit`: Page size
/// - `pages`: Number of pages to load
///
/// Output:
/// - Exit code (`1` when loading failed).
pub async fn handle_conversations(api: &ApiClient, limit: Option<u32>, pages: usize) -> i32 {
    tracing::info!(pages, "conversations requested from CLI");
    let mut loader = Loader::new(ConversationsFetcher { api: api.clone() }, (), limit)
        .with_label("conversations");
    loader.load_pages(pages).await;
    print_collection(loader.collection(), conversation_line)
}

/// What: Print the messages of one conversation.
///
/// Inputs:
/// - `api`: Backend client
/// - `conversation_id`: Conversation to read
/// - `limit`: Page size
/// - `pages`: Number of pages to load
///
/// Output:
/// - Exit code (`1` when loading failed, including a blank id).
pub async fn handle_messages(
    api: &ApiClient,
    conversation_id: &str,
    limit: Option<u32>,
    pages: usize,
) -> i32 {
    tracing::info!(conversation_id, pages, "messages requested from CLI");
    let filters = MessageFilters {
        conversation_id: conversation_id.trim().to_string(),
    };
    let mut loader =
        Loader::new(MessagesFetcher { api: api.clone() }, filters, limit).with_label("messages");
    loader.load_pages(pages).await;
    print_collection(loader.collection(), message_line)
}
