//! # peer_api
//!
//! HTTP API library for Peer.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use peer_core::store::DocumentStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{chat, diagnostics, hello};

/// Route paths.
pub mod routes {
    pub const GET_ROOT: &str = "/";
    pub const GET_TEST: &str = "/test";
    pub const POST_API_CHAT: &str = "/api/chat";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document store, or `None` when the service runs without a database.
    pub store: Option<Arc<dyn DocumentStore>>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, config: ApiConfig) -> Self {
        Self { store, config }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_ROOT, get(hello::root_handler))
        .route(routes::GET_TEST, get(diagnostics::diagnostics_handler))
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
