//! Request and response bodies of the HTTP API.

use peer_core::models::{Message, Role};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// `GET /` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// `GET /test` body. Every field is a human-readable status string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// `POST /api/chat` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Existing session; omit to start a new one.
    #[serde(default)]
    pub session_id: Option<String>,
    pub user_text: String,
}

impl ChatRequest {
    /// `user_text` must hold at least one character.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.user_text.is_empty() {
            return Err(AppError::Validation(
                "user_text: must contain at least 1 character".into(),
            ));
        }
        Ok(())
    }
}

/// A message as echoed back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageView {
    pub session_id: String,
    pub role: Role,
    pub text: String,
}

impl From<Message> for MessageView {
    fn from(m: Message) -> Self {
        Self {
            session_id: m.session_id,
            role: m.role,
            text: m.text,
        }
    }
}

/// `POST /api/chat` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
    /// Latest messages of the session, oldest first. Absent when history could
    /// not be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<MessageView>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_user_text_is_invalid() {
        let req = ChatRequest {
            session_id: None,
            user_text: String::new(),
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn whitespace_user_text_is_valid() {
        let req = ChatRequest {
            session_id: Some("s".into()),
            user_text: "  ".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn absent_messages_are_omitted() {
        let resp = ChatResponse {
            session_id: "s".into(),
            reply: "r".into(),
            messages: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("messages").is_none());
    }
}
