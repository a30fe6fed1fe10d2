//! Schema definitions and migration utilities for the Postgres backend.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the items relation (001_items.sql).
pub const ITEMS_MIGRATION: &str = include_str!("../migrations/001_items.sql");

/// Run all pending migrations against the database.
///
/// This function is idempotent - it can be run multiple times safely.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    sqlx::raw_sql(ITEMS_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::Config(format!("items migration failed: {e}")))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `items` table exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'items'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}
