//! Task spawning seam.

use std::future::Future;

use tokio::task::JoinHandle;

/// Abstraction for spawning tasks on a runtime. Every spawn returns a handle
/// so callers can await quiescence.
pub trait Spawn: Clone + Send + Sync + 'static {
    /// Spawn a future and return its join handle.
    fn spawn<F>(&self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static;
}
