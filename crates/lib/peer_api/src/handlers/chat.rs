//! Chat request handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{ChatRequest, ChatResponse};
use crate::services::chat;

/// `POST /api/chat` — store the message and answer with a rule-based reply.
///
/// Only request validation can fail; storage problems degrade the response.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;
    body.validate()?;
    let resp = chat::respond(state.store.as_deref(), body).await;
    Ok(Json(resp))
}
