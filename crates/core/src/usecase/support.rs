// Test doubles for the transaction manager port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::Context;
use crate::error::Result;
use crate::port::{TxManager, UnitOfWork};

/// Marker attached to the context in place of a real transaction
/// handle, so nesting behaviour is observable without a database.
pub struct TxMarker;

/// Runs units of work inline, mirroring the coordinator's flattened
/// nesting: an outermost call "begins" (counted) and attaches a marker
/// handle, a nested call reuses the caller's context.
#[derive(Default)]
pub struct RecordingTxManager {
    pub begins: AtomicUsize,
}

#[async_trait]
impl TxManager for RecordingTxManager {
    async fn run_in_tx<'a>(&self, ctx: &Context, work: UnitOfWork<'a>) -> Result<()> {
        if ctx.transaction().is_some() {
            return work(ctx.clone()).await;
        }
        self.begins.fetch_add(1, Ordering::SeqCst);
        work(ctx.with_transaction(Arc::new(TxMarker))).await
    }
}
