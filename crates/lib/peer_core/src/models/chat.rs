//! Conversation and message models.
//!
//! Both are stored as plain documents; timestamps are stamped by the store on
//! insert, so they are optional on the way in and may be missing on the way out.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collection holding one document per chat session.
pub const CONVERSATION_COLLECTION: &str = "conversation";

/// Collection holding every message, user and assistant alike.
pub const MESSAGE_COLLECTION: &str = "message";

/// Title given to conversations created on first message.
pub const DEFAULT_CONVERSATION_TITLE: &str = "Chat con Peer";

/// A chat thread, keyed by session ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub session_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Conversation {
    pub fn new(session_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            title: title.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Author of a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single immutable chat message.
///
/// Deserialization is lenient: documents missing `session_id`, `role` or `text`
/// read back as empty string, `user` and empty string respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(session_id: impl Into<String>, role: Role, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            role,
            text: text.into(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn user(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(session_id, Role::User, text)
    }

    pub fn assistant(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(session_id, Role::Assistant, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_value(Role::Assistant).unwrap();
        assert_eq!(json, serde_json::json!("assistant"));
        assert_eq!("system", Role::System.to_string());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = serde_json::from_value::<Role>(serde_json::json!("bot"));
        assert!(err.is_err());
    }

    #[test]
    fn message_without_timestamps_omits_them() {
        let json = serde_json::to_value(Message::user("s1", "ciao")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"session_id": "s1", "role": "user", "text": "ciao"})
        );
    }

    #[test]
    fn sparse_message_document_reads_with_defaults() {
        let msg: Message = serde_json::from_value(serde_json::json!({
            "created_at": "2026-01-02T03:04:05Z"
        }))
        .unwrap();
        assert_eq!("", msg.session_id);
        assert_eq!(Role::User, msg.role);
        assert_eq!("", msg.text);
        assert!(msg.created_at.is_some());
    }
}
