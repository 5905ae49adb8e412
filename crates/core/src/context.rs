// Execution Context
//
// An immutable, append-only carrier threaded through every call chain.
// It can hold at most one active transaction handle (attached by the
// transaction coordinator, resolved by the connection resolver) and an
// optional cancellation token. The handle is stored type-erased so this
// crate stays storage-agnostic; only the storage adapter attaches and
// downcasts it.

use std::any::Any;
use std::sync::Arc;

use tokio::sync::watch;

/// Type-erased slot for the active transaction handle.
pub type TxSlot = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Default)]
pub struct Context {
    tx: Option<TxSlot>,
    cancel: Option<watch::Receiver<bool>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context carrying `handle` as the active transaction.
    ///
    /// Invariant: at most one handle per chain. The coordinator checks
    /// for an existing handle before attaching, so a double attach is a
    /// programming error.
    pub fn with_transaction(&self, handle: TxSlot) -> Self {
        debug_assert!(
            self.tx.is_none(),
            "a transaction handle is already attached to this context"
        );
        Self {
            tx: Some(handle),
            cancel: self.cancel.clone(),
        }
    }

    /// The attached transaction handle, if any. A missing handle is the
    /// autocommit path, not an error.
    pub fn transaction(&self) -> Option<&TxSlot> {
        self.tx.as_ref()
    }

    /// Derive a cancellable context and the handle that cancels it.
    pub fn cancellable(&self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            tx: self.tx.clone(),
            cancel: Some(rx),
        };
        (ctx, CancelHandle { tx })
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolves once cancellation is requested. Never resolves for a
    /// context without a cancellation token, so it is safe to race
    /// against any in-flight operation.
    pub async fn cancelled(&self) {
        let Some(rx) = &self.cancel else {
            return std::future::pending::<()>().await;
        };
        let mut rx = rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Cancel handle dropped without firing.
                return std::future::pending::<()>().await;
            }
        }
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("transaction", &self.tx.is_some())
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

/// Cancels the context chain it was derived with.
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn transaction_handle_is_visible_on_derived_context_only() {
        let root = Context::new();
        assert!(root.transaction().is_none());

        let handle: TxSlot = Arc::new(42_u8);
        let derived = root.with_transaction(handle);
        assert!(derived.transaction().is_some());

        // The parent chain is untouched.
        assert!(root.transaction().is_none());
    }

    #[test]
    fn attached_handle_downcasts_to_its_concrete_type() {
        let ctx = Context::new().with_transaction(Arc::new(7_i64));
        let slot = ctx.transaction().expect("handle attached");
        let value = Arc::clone(slot).downcast::<i64>().expect("i64 slot");
        assert_eq!(*value, 7);
    }

    #[tokio::test]
    async fn cancelled_resolves_after_cancel() {
        let (ctx, handle) = Context::new().cancellable();
        assert!(!ctx.is_cancelled());

        handle.cancel();
        assert!(ctx.is_cancelled());

        // Must resolve promptly once cancelled.
        tokio::time::timeout(Duration::from_secs(1), ctx.cancelled())
            .await
            .expect("cancelled() should resolve");
    }

    #[tokio::test]
    async fn cancelled_never_resolves_without_a_token() {
        let ctx = Context::new();
        let outcome =
            tokio::time::timeout(Duration::from_millis(50), ctx.cancelled()).await;
        assert!(outcome.is_err(), "plain context must never report cancellation");
    }

    #[tokio::test]
    async fn derived_context_shares_the_cancellation_token() {
        let (ctx, handle) = Context::new().cancellable();
        let derived = ctx.with_transaction(Arc::new(1_u8));
        handle.cancel();
        assert!(derived.is_cancelled());
    }
}
