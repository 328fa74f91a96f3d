//! Conversation and message persistence.

use crate::models::chat::{
    CONVERSATION_COLLECTION, Conversation, DEFAULT_CONVERSATION_TITLE, MESSAGE_COLLECTION,
    Message,
};
use crate::store::{DocumentStore, StoreResult, create_record, filter_eq, get_records};

/// Number of most recent messages returned with each reply.
pub const HISTORY_WINDOW: usize = 20;

/// Make sure a conversation exists for `session_id`, creating one if the lookup
/// comes back empty.
///
/// Returns `true` when a conversation was created. This is check-then-create
/// without a uniqueness constraint: two concurrent first messages on the same
/// session may both create one.
pub async fn ensure_conversation(store: &dyn DocumentStore, session_id: &str) -> StoreResult<bool> {
    let existing = store
        .get_documents(
            CONVERSATION_COLLECTION,
            &filter_eq("session_id", session_id),
            Some(1),
        )
        .await?;
    if !existing.is_empty() {
        return Ok(false);
    }

    let conversation = Conversation::new(session_id, DEFAULT_CONVERSATION_TITLE);
    create_record(store, CONVERSATION_COLLECTION, &conversation).await?;
    Ok(true)
}

/// Append a message. Returns the stored document ID.
pub async fn record_message(store: &dyn DocumentStore, message: &Message) -> StoreResult<String> {
    create_record(store, MESSAGE_COLLECTION, message).await
}

/// The latest [`HISTORY_WINDOW`] messages of a session, oldest first.
///
/// Messages without `created_at` sort before timestamped ones; ties keep
/// insertion order.
pub async fn recent_messages(
    store: &dyn DocumentStore,
    session_id: &str,
) -> StoreResult<Vec<Message>> {
    let messages: Vec<Message> = get_records(
        store,
        MESSAGE_COLLECTION,
        &filter_eq("session_id", session_id),
        None,
    )
    .await?;

    Ok(latest_window(messages))
}

/// Sort by `created_at` (missing first, stable) and keep the last
/// [`HISTORY_WINDOW`] entries.
pub fn latest_window(mut messages: Vec<Message>) -> Vec<Message> {
    messages.sort_by_key(|m| m.created_at);
    let skip = messages.len().saturating_sub(HISTORY_WINDOW);
    messages.split_off(skip)
}
