// Postgres Connection Pool Lifecycle

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use plume_core::Result;

use crate::error_map::storage_error;

/// Pool settings supplied by the composition root; the connection
/// string and sizing are external inputs, not part of this layer.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Owns the physical connection pool.
pub struct DbClient {
    pool: PgPool,
}

impl DbClient {
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| storage_error("connect to database", e))?;

        info!(max_connections = config.max_connections, "database pool ready");
        Ok(Self { pool })
    }

    /// Handle to the pool for resolvers and the coordinator. The pool
    /// is internally reference-counted; this clone is cheap.
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}
