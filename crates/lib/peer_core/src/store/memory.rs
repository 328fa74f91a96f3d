//! In-process document store.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{
    Document, DocumentStore, StoreResult, matches_filter, stamp_timestamps, validate_collection,
};
use crate::uuid::uuidv7;

const MEMORY_DATABASE_NAME: &str = "memory";

/// Document store backed by a concurrent map of collection → documents.
///
/// Documents are kept in insertion order. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, |docs| docs.len())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        mut document: Document,
    ) -> StoreResult<String> {
        validate_collection(collection)?;
        stamp_timestamps(&mut document);

        let id = uuidv7().to_string();
        document.insert("id".to_string(), Value::String(id.clone()));

        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Document>> {
        validate_collection(collection)?;
        let Some(docs) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        let cap = limit.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(0));
        Ok(docs
            .iter()
            .filter(|doc| matches_filter(doc, filter))
            .take(cap)
            .cloned()
            .collect())
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self.collections.iter().map(|e| e.key().clone()).collect();
        names.sort();
        Ok(names)
    }

    fn database_name(&self) -> &str {
        MEMORY_DATABASE_NAME
    }
}
