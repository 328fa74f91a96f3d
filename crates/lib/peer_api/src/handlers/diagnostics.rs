//! Diagnostics endpoint — backend and database status.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::models::DiagnosticsResponse;

/// Maximum number of collection names reported.
const MAX_COLLECTIONS: usize = 10;

/// Error text is cut to this many characters.
const ERROR_PREVIEW_CHARS: usize = 50;

/// `GET /test` — best-effort database connectivity report. Never fails.
pub async fn diagnostics_handler(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let mut resp = DiagnosticsResponse {
        backend: "✅ Running".into(),
        database: "❌ Not Available".into(),
        database_url: set_or_not(state.config.database_url.is_some()),
        database_name: set_or_not(state.config.database_name.is_some()),
        connection_status: "Not Connected".into(),
        collections: Vec::new(),
    };

    if let Some(store) = state.store.as_deref() {
        resp.connection_status = "Connected".into();
        match store.list_collections().await {
            Ok(mut names) => {
                names.truncate(MAX_COLLECTIONS);
                resp.collections = names;
                resp.database = "✅ Connected & Working".into();
            }
            Err(e) => {
                warn!(database = store.database_name(), "listing collections failed: {e}");
                resp.database = format!("⚠️  Connected but Error: {}", preview(&e.to_string()));
            }
        }
    }

    Json(resp)
}

fn set_or_not(present: bool) -> String {
    let status = if present { "✅ Set" } else { "❌ Not Set" };
    status.to_string()
}

fn preview(text: &str) -> String {
    text.chars().take(ERROR_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_on_char_boundaries() {
        let long = "è".repeat(80);
        assert_eq!(ERROR_PREVIEW_CHARS, preview(&long).chars().count());
        assert_eq!("short", preview("short"));
    }
}
