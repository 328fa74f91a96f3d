//! Root endpoint — liveness check.

use axum::Json;

use crate::models::RootResponse;

/// `GET /` — reports that the backend is up.
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: peer_core::hello::running_message().to_string(),
    })
}
