//! Task handles for the non-blocking policies.
//!
//! ## Purpose
//!
//! This module provides [`TaskHandle`], returned immediately by the
//! `SequencedTask` and `ParallelTask` policies, and the spawn helper that runs
//! a dispatch on the worker pool and delivers its outcome to the handle.
//!
//! ## Design notes
//!
//! * **Oneshot**: The outcome travels over a `futures` oneshot channel.
//! * **Observation**: A handle can be awaited, blocked on, or polled without waiting.
//! * **Cancellation**: Cancelling only closes the receiving side; enqueued work still runs.
//! * **Unobserved failure**: A failure nobody receives is logged at `warn` and dropped.
//!
//! ## Invariants
//!
//! * Each handle receives at most one outcome.
//! * A task that ends without delivering an outcome surfaces as `TaskAbandoned`.
//!
//! ## Non-goals
//!
//! * This module does not interrupt running work.

// External dependencies
use futures::channel::oneshot;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

// Export dependencies from dispatch crate
use dispatch::internals::primitives::errors::DispatchError;
use dispatch::internals::primitives::range::Position;

// Internal dependencies
use crate::engine::pool::WorkerPool;

// ============================================================================
// Completion
// ============================================================================

/// Successful outcome of a task dispatch.
///
/// Task policies take ownership of the range source; it is handed back here
/// together with the end position of the generated range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed<S> {
    /// The range source, now filled.
    pub range: S,

    /// End position of the dispatched range.
    pub end: Position,
}

impl<S> Completed<S> {
    /// Take back the range source.
    pub fn into_inner(self) -> S {
        self.range
    }
}

// ============================================================================
// Task Handle
// ============================================================================

/// Handle to the outcome of a dispatch running on the worker pool.
///
/// Dropping the handle does not stop the dispatch.
///
/// Blocking on a handle from a worker of the same single-worker pool deadlocks.
#[derive(Debug)]
#[must_use = "dropping a task handle discards its outcome"]
pub struct TaskHandle<R> {
    receiver: oneshot::Receiver<Result<R, DispatchError>>,
}

impl<R> TaskHandle<R> {
    /// Create a handle and the sender that completes it.
    pub(crate) fn channel() -> (TaskSender<R>, Self) {
        let (sender, receiver) = oneshot::channel();
        (TaskSender { sender }, Self { receiver })
    }

    /// A handle that is already completed with `outcome`.
    pub fn ready(outcome: Result<R, DispatchError>) -> Self {
        let (sender, handle) = Self::channel();
        sender.complete(outcome);
        handle
    }

    /// Block the current thread until the outcome is available.
    pub fn wait(self) -> Result<R, DispatchError> {
        pollster::block_on(self)
    }

    /// Take the outcome if it is available, without blocking.
    ///
    /// Returns `None` while the dispatch is still running. Once an outcome has
    /// been taken the handle is spent and reports `TaskAbandoned`.
    pub fn try_take(&mut self) -> Option<Result<R, DispatchError>> {
        match self.receiver.try_recv() {
            Ok(Some(outcome)) => Some(outcome),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(DispatchError::TaskAbandoned)),
        }
    }

    /// Stop observing the dispatch.
    ///
    /// The dispatch keeps running; its outcome is discarded on arrival.
    pub fn cancel(mut self) {
        self.receiver.close();
    }
}

impl<R> Future for TaskHandle<R> {
    type Output = Result<R, DispatchError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(DispatchError::TaskAbandoned)))
    }
}

/// Sending side of a [`TaskHandle`].
#[derive(Debug)]
pub(crate) struct TaskSender<R> {
    sender: oneshot::Sender<Result<R, DispatchError>>,
}

impl<R> TaskSender<R> {
    /// Deliver `outcome`; log failures nobody will observe.
    pub(crate) fn complete(self, outcome: Result<R, DispatchError>) {
        match self.sender.send(outcome) {
            Ok(()) => {}
            Err(Err(err)) => log::warn!("dropping unobserved task failure: {err}"),
            Err(Ok(_)) => log::debug!("task completed after its handle was released"),
        }
    }
}

// ============================================================================
// Spawning
// ============================================================================

/// Run `job` on the pool and return a handle to its outcome.
///
/// A panicking job completes the handle with an `OperationFailure`.
pub fn spawn_task<R, F>(pool: &WorkerPool, job: F) -> TaskHandle<R>
where
    R: Send + 'static,
    F: FnOnce() -> Result<R, DispatchError> + Send + 'static,
{
    let (sender, handle) = TaskHandle::channel();
    pool.spawn(move || {
        let outcome = panic::catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "operation panicked".to_string());
            Err(DispatchError::OperationFailure {
                position: None,
                message,
            })
        });
        sender.complete(outcome);
    });
    handle
}
