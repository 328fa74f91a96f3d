//! Database migration support.
//!
//! Embeds and runs SQL migrations from `peer_core/migrations/`, which create
//! the `conversation` and `message` collections.

use sqlx::PgPool;

/// Run all embedded database migrations against the given pool.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
