//! Integration test — run the PostgreSQL document store against a live server.
//!
//! Needs `DATABASE_URL` pointing at a database the test may migrate, e.g.
//! `DATABASE_URL=postgres://localhost:5432/peer_test cargo test -- --ignored`.

use peer_core::store::postgres::PgStoreConfig;
use peer_core::store::{Document, DocumentStore, PgDocumentStore, filter_eq};
use serde_json::{Value, json};
use uuid::Uuid;

async fn connect() -> PgDocumentStore {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgDocumentStore::connect(&PgStoreConfig {
        database_url,
        database_name: None,
        max_connections: 2,
    })
    .await
    .expect("connect and migrate")
}

fn doc(value: Value) -> Document {
    value.as_object().cloned().expect("object")
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server in DATABASE_URL"]
async fn documents_round_trip_in_insertion_order() {
    let store = connect().await;
    let session = format!("pg-{}", Uuid::new_v4());

    for text in ["first", "second", "third"] {
        store
            .create_document("message", doc(json!({"session_id": session, "text": text})))
            .await
            .expect("create");
    }

    let docs = store
        .get_documents("message", &filter_eq("session_id", session.as_str()), None)
        .await
        .expect("get all");
    let texts: Vec<_> = docs.iter().map(|d| d["text"].clone()).collect();
    assert_eq!(vec![json!("first"), json!("second"), json!("third")], texts);
    assert!(docs.iter().all(|d| d["id"].is_string()));
    assert!(docs.iter().all(|d| d["created_at"].is_string()));

    let capped = store
        .get_documents("message", &filter_eq("session_id", session.as_str()), Some(2))
        .await
        .expect("get capped");
    assert_eq!(2, capped.len());
    assert_eq!(capped[0]["text"], json!("first"));

    store.close().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server in DATABASE_URL"]
async fn filter_matches_whole_values_only() {
    let store = connect().await;
    let session = format!("pg-{}", Uuid::new_v4());
    let longer = format!("{session}-other");

    store
        .create_document("conversation", doc(json!({"session_id": session, "title": "a"})))
        .await
        .expect("create");
    store
        .create_document("conversation", doc(json!({"session_id": longer, "title": "b"})))
        .await
        .expect("create");

    let docs = store
        .get_documents("conversation", &filter_eq("session_id", session.as_str()), None)
        .await
        .expect("get");
    assert_eq!(1, docs.len());
    assert_eq!(docs[0]["title"], json!("a"));

    let none = store
        .get_documents("conversation", &filter_eq("session_id", "pg-missing"), Some(1))
        .await
        .expect("get missing");
    assert!(none.is_empty());

    store.close().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server in DATABASE_URL"]
async fn collections_exclude_migration_bookkeeping() {
    let store = connect().await;

    let names = store.list_collections().await.expect("list");
    assert!(names.contains(&"conversation".to_string()));
    assert!(names.contains(&"message".to_string()));
    assert!(names.iter().all(|n| !n.starts_with("_sqlx")));

    store.close().await;
}
