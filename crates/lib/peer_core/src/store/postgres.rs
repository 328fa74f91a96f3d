//! PostgreSQL-backed document store.
//!
//! Each collection is a table `(id uuid, body jsonb, created_at timestamptz)`
//! created by the embedded migrations. Filters are evaluated with JSONB
//! containment (`body @> filter`), which is exact equality for the scalar
//! fields the chat flow filters on.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use tracing::{debug, info};

use super::{Document, DocumentStore, StoreResult, stamp_timestamps, validate_collection};
use crate::uuid::uuidv7;

/// Maximum time to wait for a pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`PgDocumentStore::connect`].
#[derive(Debug, Clone)]
pub struct PgStoreConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Overrides the database named in `database_url` when set.
    pub database_name: Option<String>,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

/// Document store over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    database_name: String,
}

impl PgDocumentStore {
    /// Connect, then run the embedded migrations.
    pub async fn connect(config: &PgStoreConfig) -> StoreResult<Self> {
        let mut options = PgConnectOptions::from_str(&config.database_url)?;
        if let Some(name) = config.database_name.as_deref() {
            options = options.database(name);
        }
        let database_name = options
            .get_database()
            .unwrap_or("postgres")
            .to_string();

        info!(
            database = %database_name,
            max_connections = config.max_connections,
            "connecting to document store"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        crate::migrate::migrate(&pool).await?;

        Ok(Self {
            pool,
            database_name,
        })
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create_document(
        &self,
        collection: &str,
        mut document: Document,
    ) -> StoreResult<String> {
        validate_collection(collection)?;
        stamp_timestamps(&mut document);

        let id = uuidv7();
        document.insert("id".to_string(), Value::String(id.to_string()));

        // Collection names are validated identifiers; they cannot be bound.
        let sql = format!(r#"INSERT INTO "{collection}" (id, body) VALUES ($1, $2)"#);
        sqlx::query(&sql)
            .bind(id)
            .bind(Json(Value::Object(document)))
            .execute(&self.pool)
            .await?;

        debug!(collection, %id, "document created");
        Ok(id.to_string())
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Document>> {
        validate_collection(collection)?;

        // LIMIT NULL means no limit.
        let sql = format!(
            r#"
            SELECT body
            FROM "{collection}"
            WHERE body @> $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2
            "#
        );
        let bodies: Vec<Json<Value>> = sqlx::query_scalar(&sql)
            .bind(Json(Value::Object(filter.clone())))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(bodies
            .into_iter()
            .filter_map(|Json(body)| match body {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect())
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = current_schema()
              AND table_name NOT LIKE '\_sqlx%'
            ORDER BY table_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    fn database_name(&self) -> &str {
        &self.database_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_name_override_wins() {
        let options = PgConnectOptions::from_str("postgres://localhost:5432/fromurl")
            .unwrap()
            .database("override");
        assert_eq!(Some("override"), options.get_database());
    }

    #[tokio::test]
    async fn invalid_collection_fails_before_touching_the_pool() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:1/unused")
            .unwrap();
        let store = PgDocumentStore {
            pool,
            database_name: "unused".into(),
        };
        let err = store
            .get_documents("bad\"name", &Document::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::store::StoreError::InvalidCollection(_)));
    }
}
