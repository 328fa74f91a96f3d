//! Chat flow: persist the exchange, answer by rule, echo recent history.
//!
//! Every storage step is best-effort. Failures are logged and skipped so a
//! request with valid input always gets a reply, even with the database down.

use peer_core::conversations;
use peer_core::models::Message;
use peer_core::reply::compose_reply;
use peer_core::store::DocumentStore;
use peer_core::uuid::new_session_id;
use tracing::{debug, warn};

use crate::models::{ChatRequest, ChatResponse, MessageView};

/// Handle one chat turn.
///
/// With no store, or when reading history fails, `messages` is `None`.
pub async fn respond(store: Option<&dyn DocumentStore>, request: ChatRequest) -> ChatResponse {
    let session_id = request
        .session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(new_session_id);
    let reply = compose_reply(&request.user_text);

    let messages = match store {
        Some(store) => persist_turn(store, &session_id, &request.user_text, &reply).await,
        None => {
            debug!(%session_id, "no document store configured, replying without history");
            None
        }
    };

    ChatResponse {
        session_id,
        reply,
        messages,
    }
}

/// Write the conversation, user message and reply, then read back the window.
async fn persist_turn(
    store: &dyn DocumentStore,
    session_id: &str,
    user_text: &str,
    reply: &str,
) -> Option<Vec<MessageView>> {
    match conversations::ensure_conversation(store, session_id).await {
        Ok(true) => debug!(%session_id, "conversation created"),
        Ok(false) => {}
        Err(e) => warn!(%session_id, "ensuring conversation failed: {e}"),
    }

    if let Err(e) = conversations::record_message(store, &Message::user(session_id, user_text)).await
    {
        warn!(%session_id, "storing user message failed: {e}");
    }

    if let Err(e) = conversations::record_message(store, &Message::assistant(session_id, reply)).await
    {
        warn!(%session_id, "storing assistant message failed: {e}");
    }

    match conversations::recent_messages(store, session_id).await {
        Ok(history) => Some(history.into_iter().map(MessageView::from).collect()),
        Err(e) => {
            warn!(%session_id, "reading message history failed: {e}");
            None
        }
    }
}
