//! Document storage.
//!
//! The chat flow only needs two operations from its persistence layer: insert a
//! document into a named collection, and fetch documents whose top-level fields
//! equal a filter. [`DocumentStore`] captures that contract; [`PgDocumentStore`]
//! backs it with PostgreSQL JSONB tables and [`MemoryStore`] with an in-process
//! map.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// A stored document: a plain JSON object.
pub type Document = Map<String, Value>;

/// Errors raised by document stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid collection name: {0:?}")]
    InvalidCollection(String),

    #[error("Document is not a JSON object")]
    NotAnObject,
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Minimal document-database contract.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `document` into `collection` and return its new ID.
    ///
    /// `created_at` and `updated_at` are stamped with the current UTC time when
    /// the document does not already carry them.
    async fn create_document(&self, collection: &str, document: Document) -> StoreResult<String>;

    /// Fetch documents from `collection` whose fields equal every entry of
    /// `filter`, in insertion order, capped at `limit` when given.
    async fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Document>>;

    /// Names of the collections currently present.
    async fn list_collections(&self) -> StoreResult<Vec<String>>;

    /// Name of the underlying database, for diagnostics.
    fn database_name(&self) -> &str;
}

/// Serialize `record` and insert it into `collection`.
pub async fn create_record<T: Serialize + Sync>(
    store: &dyn DocumentStore,
    collection: &str,
    record: &T,
) -> StoreResult<String> {
    match serde_json::to_value(record)? {
        Value::Object(document) => store.create_document(collection, document).await,
        _ => Err(StoreError::NotAnObject),
    }
}

/// Fetch documents matching `filter` and deserialize them into `T`.
pub async fn get_records<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    filter: &Document,
    limit: Option<i64>,
) -> StoreResult<Vec<T>> {
    store
        .get_documents(collection, filter, limit)
        .await?
        .into_iter()
        .map(|doc| serde_json::from_value(Value::Object(doc)).map_err(StoreError::from))
        .collect()
}

/// Build a single-field equality filter.
pub fn filter_eq(field: &str, value: impl Into<Value>) -> Document {
    let mut filter = Document::new();
    filter.insert(field.to_string(), value.into());
    filter
}

/// Fill in `created_at` / `updated_at` when absent.
pub(crate) fn stamp_timestamps(document: &mut Document) {
    let now = Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true));
    for field in ["created_at", "updated_at"] {
        match document.get(field) {
            None | Some(Value::Null) => {
                document.insert(field.to_string(), now.clone());
            }
            Some(_) => {}
        }
    }
}

/// Collection names are interpolated into SQL, so only lowercase ASCII
/// identifiers are accepted.
pub(crate) fn validate_collection(name: &str) -> StoreResult<()> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && name.len() <= 63;
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}

/// True when every filter entry is equal to the document's field.
pub(crate) fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn collection_names_must_be_identifiers() {
        assert!(validate_collection("conversation").is_ok());
        assert!(validate_collection("message_v2").is_ok());
        assert!(validate_collection("").is_err());
        assert!(validate_collection("Message").is_err());
        assert!(validate_collection("2fa").is_err());
        assert!(validate_collection("message; DROP TABLE x").is_err());
        assert!(validate_collection(&"a".repeat(64)).is_err());
    }

    #[test]
    fn stamping_keeps_existing_timestamps() {
        let mut document = doc(json!({"created_at": "2020-01-01T00:00:00Z", "updated_at": null}));
        stamp_timestamps(&mut document);
        assert_eq!(document["created_at"], json!("2020-01-01T00:00:00Z"));
        assert!(document["updated_at"].is_string());
    }

    #[test]
    fn filter_requires_exact_equality() {
        let document = doc(json!({"session_id": "abc", "role": "user"}));
        assert!(matches_filter(&document, &filter_eq("session_id", "abc")));
        assert!(matches_filter(&document, &Document::new()));
        assert!(!matches_filter(&document, &filter_eq("session_id", "ab")));
        assert!(!matches_filter(&document, &filter_eq("title", "abc")));
    }
}
