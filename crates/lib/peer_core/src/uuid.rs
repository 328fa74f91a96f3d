// Identifier helpers.
//
// Document IDs are UUIDv7 so they sort by creation time alongside the
// `created_at` column. Session IDs handed to clients are random UUIDv4: they
// carry no timing information and are not meant to be ordered.

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}

/// Generate a fresh random session identifier.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}
