// Transaction Coordinator
//
// Guarantees at most one physical transaction per outermost call
// chain, and that the transaction handle is released on every exit
// path. A unit of work that panics drops the sqlx transaction guard,
// which rolls back on drop.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use plume_core::port::{TxManager, UnitOfWork};
use plume_core::{Context, Error, Result};

use crate::conn::{active_tx, attach_tx, SharedTx};
use crate::error_map::storage_error;

pub struct PgTxManager {
    pool: PgPool,
}

impl PgTxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TxManager for PgTxManager {
    async fn run_in_tx<'a>(&self, ctx: &Context, work: UnitOfWork<'a>) -> Result<()> {
        // Flattened nesting: an inner call participates in the outer
        // transaction and never commits or rolls back on its own.
        if active_tx(ctx).is_some() {
            debug!("joining the active transaction");
            return work(ctx.clone()).await;
        }

        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("begin transaction", e))?;
        let shared: SharedTx = Arc::new(Mutex::new(tx));
        let tx_ctx = attach_tx(ctx, Arc::clone(&shared));

        let outcome = work(tx_ctx).await;

        // The unit of work has returned and its derived context is
        // gone, so ours must be the last reference. A surviving clone
        // means the handle leaked out of its call chain; dropping it
        // rolls the transaction back.
        let tx = match Arc::try_unwrap(shared) {
            Ok(mutex) => mutex.into_inner(),
            Err(_leaked) => {
                warn!("transaction handle escaped its unit of work");
                return match outcome {
                    // Never mask the unit of work's own error.
                    Err(err) => Err(err),
                    Ok(()) => Err(Error::internal(
                        "transaction handle escaped its unit of work",
                    )),
                };
            }
        };

        match outcome {
            Ok(()) => {
                // A failed commit is left aborted by the server; no
                // retry, no reclassification.
                tx.commit()
                    .await
                    .map_err(|e| storage_error("commit transaction", e))
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    // Rollback bookkeeping must not replace the cause.
                    warn!(
                        error = %rollback_err,
                        kind = %err.kind(),
                        "rollback failed after unit of work error"
                    );
                }
                Err(err)
            }
        }
    }
}
