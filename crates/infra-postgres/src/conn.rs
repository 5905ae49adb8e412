// Connection Resolver
//
// Repositories obtain their connection here for every operation. If
// the context carries a transaction handle the statement joins that
// transaction, otherwise a connection is checked out of the pool for
// the single call's duration. Repository code never knows which mode
// is active.

use std::future::Future;
use std::sync::Arc;

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnection, PgPool, Postgres};
use tokio::sync::{Mutex, OwnedMutexGuard};

use plume_core::{Context, Error, Result, TxSlot};

use crate::error_map::storage_error;

/// One transaction owned by a single coordinator invocation. Shared
/// with the context behind a mutex because the unit of work's
/// repository calls borrow it one statement at a time.
pub(crate) type PgTx = sqlx::Transaction<'static, Postgres>;
pub(crate) type SharedTx = Arc<Mutex<PgTx>>;

/// Attach a transaction handle to `ctx`, type-erased into the context's
/// slot. Only this crate ever attaches or downcasts the slot.
pub(crate) fn attach_tx(ctx: &Context, tx: SharedTx) -> Context {
    ctx.with_transaction(tx as TxSlot)
}

/// The transaction handle attached to `ctx`, if any.
pub(crate) fn active_tx(ctx: &Context) -> Option<SharedTx> {
    let slot = ctx.transaction()?;
    Arc::clone(slot).downcast::<Mutex<PgTx>>().ok()
}

/// A resolved connection: either a pool checkout returned on drop, or
/// the context's transaction locked for one statement.
pub enum DbConn {
    Pooled(PoolConnection<Postgres>),
    Tx(OwnedMutexGuard<PgTx>),
}

impl DbConn {
    /// The raw connection to execute against; both variants are plain
    /// `PgConnection`s underneath.
    pub fn as_conn(&mut self) -> &mut PgConnection {
        match self {
            DbConn::Pooled(conn) => &mut **conn,
            DbConn::Tx(guard) => &mut **guard,
        }
    }
}

/// Resolves the connection-like handle for an execution context.
#[derive(Clone)]
pub struct ConnManager {
    pool: PgPool,
}

impl ConnManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Resolve the handle for `ctx`. A missing transaction is the
    /// autocommit path, not an error; only pool acquisition can fail.
    pub async fn conn(&self, ctx: &Context) -> Result<DbConn> {
        if let Some(tx) = active_tx(ctx) {
            return Ok(DbConn::Tx(tx.lock_owned().await));
        }
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| storage_error("acquire connection", e))?;
        Ok(DbConn::Pooled(conn))
    }
}

/// Run one statement bounded by the context's cancellation token.
///
/// Cancellation aborts the in-flight statement (its future is dropped,
/// which tears down the underlying connection state) and surfaces as a
/// database-kind error. Driver failures go through `classify`.
pub(crate) async fn run_guarded<T, F, C>(ctx: &Context, statement: F, classify: C) -> Result<T>
where
    F: Future<Output = std::result::Result<T, sqlx::Error>>,
    C: FnOnce(sqlx::Error) -> Error,
{
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(Error::database("statement cancelled by caller")),
        result = statement => result.map_err(classify),
    }
}
