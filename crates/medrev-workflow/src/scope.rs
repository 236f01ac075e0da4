//! View-scoped cancellation.
//!
//! Every fetch a view dispatches runs inside its [`ViewScope`]. When
//! the view goes away the scope is cancelled and in-flight futures are
//! dropped, so a slow response can never land in state the user has
//! already navigated away from.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::{AbortHandle, Abortable, Aborted};
use tracing::trace;

#[derive(Debug, Default)]
pub struct ViewScope {
    handles: Mutex<Vec<AbortHandle>>,
    cancelled: AtomicBool,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a future tied to this scope's lifetime. Returns
    /// `Err(Aborted)` when the scope was cancelled before the future
    /// resolved. A scope stays cancelled: once dead, nothing new runs
    /// under it.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Aborted> {
        if self.cancelled.load(Ordering::Acquire) {
            return Err(Aborted);
        }
        let (handle, registration) = AbortHandle::new_pair();
        if let Ok(mut handles) = self.handles.lock() {
            handles.retain(|tracked| !tracked.is_aborted());
            handles.push(handle.clone());
        }
        let result = Abortable::new(future, registration).await;
        // Mark the handle spent so the next run prunes it.
        handle.abort();
        result
    }

    /// Cancel everything still in flight under this scope.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        if let Ok(mut handles) = self.handles.lock() {
            trace!(count = handles.len(), "cancelling view scope");
            for handle in handles.drain(..) {
                handle.abort();
            }
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn uncancelled_future_completes_normally() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 1 }).await, Ok(1));
    }

    #[tokio::test]
    async fn cancel_aborts_pending_future() {
        let scope = ViewScope::new();
        let pending = scope.run(std::future::pending::<()>());
        scope.cancel();
        assert!(pending.await.is_err());
    }

    #[tokio::test]
    async fn completed_futures_do_not_accumulate_handles() {
        let scope = ViewScope::new();
        for n in 0..16 {
            assert_eq!(scope.run(async move { n }).await, Ok(n));
        }
        assert!(scope.handles.lock().unwrap().len() <= 1);
    }

    #[tokio::test]
    async fn dead_scope_refuses_new_work() {
        let scope = ViewScope::new();
        scope.cancel();
        assert_eq!(scope.run(async { 1 }).await, Err(Aborted));
    }
}
