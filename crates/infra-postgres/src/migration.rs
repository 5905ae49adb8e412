// Migration Runner

use sqlx::postgres::PgPool;
use tracing::info;

use plume_core::Result;

use crate::error_map::storage_error;

/// Apply pending schema migrations sequentially, tracked through a
/// `schema_version` table.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_version (
             version BIGINT PRIMARY KEY,
             applied_at TIMESTAMPTZ NOT NULL DEFAULT now()
         )",
    )
    .execute(pool)
    .await
    .map_err(|e| storage_error("create schema_version", e))?;

    let current: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM schema_version")
        .fetch_one(pool)
        .await
        .map_err(|e| storage_error("read schema version", e))?;

    info!(current, "checking schema migrations");

    if current < 1 {
        info!("applying migration 001: initial schema");
        apply_migration(pool, 1, include_str!("../migrations/001_initial_schema.sql")).await?;
    }

    Ok(())
}

/// Apply one migration file inside a transaction and record its
/// version. The file is split on semicolons, so statement bodies must
/// not contain literal ones.
async fn apply_migration(pool: &PgPool, version: i64, sql: &str) -> Result<()> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| storage_error("begin migration", e))?;

    for statement in sql.split(';') {
        let clean: String = statement
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        if !clean.is_empty() {
            sqlx::query(&clean)
                .execute(&mut *tx)
                .await
                .map_err(|e| storage_error("apply migration", e))?;
        }
    }

    sqlx::query("INSERT INTO schema_version (version) VALUES ($1)")
        .bind(version)
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("record migration", e))?;

    tx.commit()
        .await
        .map_err(|e| storage_error("commit migration", e))?;

    Ok(())
}
