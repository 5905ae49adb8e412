// Transaction Manager Port

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::context::Context;
use crate::error::Result;

/// A caller-supplied logically atomic sequence of repository calls.
///
/// The closure receives the context to run its repository calls with:
/// for an outermost invocation that is a derived context carrying the
/// fresh transaction handle, for a nested invocation it is the caller's
/// context unchanged.
pub type UnitOfWork<'a> = Box<dyn FnOnce(Context) -> BoxFuture<'a, Result<()>> + Send + 'a>;

/// Coordinates one physical transaction per outermost call chain.
///
/// Contract:
/// - a context already carrying a transaction handle joins it; no
///   second transaction is begun, committed or rolled back;
/// - on unit-of-work success the transaction commits; a commit failure
///   is returned as a database error, with no retry;
/// - on unit-of-work error the transaction rolls back and the original
///   error is returned unchanged; a rollback failure is logged and
///   discarded, never surfaced;
/// - the transaction handle is released on every exit path, panics
///   included.
#[async_trait]
pub trait TxManager: Send + Sync {
    async fn run_in_tx<'a>(&self, ctx: &Context, work: UnitOfWork<'a>) -> Result<()>;
}
