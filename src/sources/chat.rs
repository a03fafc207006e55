//! Chat endpoints: conversations and their messages.

use tracing::info;

use super::client::ApiClient;
use super::envelope::normalize_page;
use super::{PageRequest, Result};
use crate::state::{Conversation, Message, Page};

/// Filters defining a messages collection: the conversation it belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageFilters {
    /// Conversation whose messages are listed.
    pub conversation_id: String,
}

/// What: Fetch one page of the user's conversations.
///
/// Inputs:
/// - `api`: Backend client.
/// - `request`: Cursor and limit.
///
/// Output:
/// - Normalised page of conversations.
///
/// # Errors
/// - Transport, status and decoding failures
pub async fn fetch_conversations(
    api: &ApiClient,
    request: &PageRequest<()>,
) -> Result<Page<Conversation>> {
    let url = api.endpoint("chat/conversations", &request.paging_query())?;
    let page: Page<Conversation> = normalize_page(api.get_json(url).await?)?;
    info!(
        count = page.items.len(),
        has_next = page.next_cursor.is_some(),
        "fetched conversations page"
    );
    Ok(page)
}

/// What: Fetch one page of messages of a conversation.
///
/// Inputs:
/// - `api`: Backend client.
/// - `request`: Cursor, limit and the conversation id.
///
/// Output:
/// - Normalised page of messages.
///
/// # Errors
/// - Returns `Err` when the conversation id is blank
/// - Transport, status and decoding failures
pub async fn fetch_messages(
    api: &ApiClient,
    request: &PageRequest<MessageFilters>,
) -> Result<Page<Message>> {
    let conversation_id = request.filters.conversation_id.trim();
    if conversation_id.is_empty() {
        return Err("no conversation selected".into());
    }
    let url = api.endpoint_segments(
        &["chat", "conversations", conversation_id, "messages"],
        &request.paging_query(),
    )?;
    let page: Page<Message> = normalize_page(api.get_json(url).await?)?;
    info!(
        conversation_id,
        count = page.items.len(),
        has_next = page.next_cursor.is_some(),
        "fetched messages page"
    );
    Ok(page)
}
