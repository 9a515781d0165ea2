//! Result resolution: binding each policy to its concrete return type.
//!
//! ## Purpose
//!
//! This module implements [`PolicyDispatch`] for the four policy markers. The
//! implementation selected at compile time fixes both how the dispatch runs
//! and what it returns:
//!
//! | Policy          | Runs on          | Returns                                     |
//! |-----------------|------------------|---------------------------------------------|
//! | `Sequenced`     | calling thread   | `Result<Position, DispatchError>`           |
//! | `Parallel`      | worker pool      | `Result<Position, DispatchError>`           |
//! | `SequencedTask` | one pool worker  | `TaskHandle<Completed<S>>`                  |
//! | `ParallelTask`  | worker pool      | `TaskHandle<Completed<S>>`                  |
//!
//! ## Design notes
//!
//! * **Static**: There is no runtime policy branch; a type without an impl does not compile.
//! * **Ownership**: Task policies take the range source by value and hand it back on completion.
//! * **Early validation**: Task policies adapt the range before spawning, so range
//!   errors reach the handle without touching the pool.
//!
//! ## Non-goals
//!
//! * This module does not plan chunks (handled by the core planner).

// Export dependencies from dispatch crate
use dispatch::internals::engine::validator::Validator;
use dispatch::internals::policy::taxonomy::{
    ExecutionPolicy, Parallel, ParallelTask, Sequenced, SequencedTask,
};
use dispatch::internals::primitives::errors::DispatchError;
use dispatch::internals::primitives::operation::Operation;
use dispatch::internals::primitives::range::{Position, Positions, RangeSource};

// Internal dependencies
use crate::api::Dispatcher;
use crate::engine::executor::{parallel_pass, sequenced_pass};
use crate::engine::task::{Completed, TaskHandle, spawn_task};

/// Return type of the blocking policies.
pub type DirectResult = Result<Position, DispatchError>;

/// Return type of the task policies.
pub type DeferredResult<S> = TaskHandle<Completed<S>>;

// ============================================================================
// Policy Dispatch Trait
// ============================================================================

/// Run an operation over a range source under a policy.
///
/// `count` limits the dispatch to the first `count` positions of the range.
pub trait PolicyDispatch<S, T, G>: ExecutionPolicy {
    /// What the dispatch returns under this policy.
    type Output;

    /// Dispatch `op` over `range`.
    fn dispatch(
        self,
        dispatcher: &Dispatcher,
        range: S,
        count: Option<usize>,
        op: G,
    ) -> Self::Output;
}

/// Adapt `range` and narrow it to its first `count` positions.
fn adapt_counted<T, S>(
    range: &mut S,
    count: Option<usize>,
) -> Result<Positions<'_, T>, DispatchError>
where
    S: RangeSource<T> + ?Sized,
{
    let positions = range.positions()?;
    match count {
        None => Ok(positions),
        Some(count) => {
            let narrowed = Validator::validate_count(positions.range(), count)?;
            positions.narrow(narrowed)
        }
    }
}

// ============================================================================
// Blocking Policies
// ============================================================================

impl<S, T, G> PolicyDispatch<S, T, G> for Sequenced
where
    S: RangeSource<T>,
    G: Operation<T>,
{
    type Output = DirectResult;

    fn dispatch(
        self,
        _dispatcher: &Dispatcher,
        mut range: S,
        count: Option<usize>,
        mut op: G,
    ) -> DirectResult {
        let positions = adapt_counted::<T, S>(&mut range, count)?;
        sequenced_pass(positions, &mut op)
    }
}

impl<S, T, G> PolicyDispatch<S, T, G> for Parallel
where
    S: RangeSource<T>,
    T: Send,
    G: Operation<T> + Clone + Send + Sync,
{
    type Output = DirectResult;

    fn dispatch(
        self,
        dispatcher: &Dispatcher,
        mut range: S,
        count: Option<usize>,
        mut op: G,
    ) -> DirectResult {
        let positions = adapt_counted::<T, S>(&mut range, count)?;
        parallel_pass(dispatcher.pool(), dispatcher.config(), positions, &mut op)
    }
}

// ============================================================================
// Task Policies
// ============================================================================

/// Validate the range up front; returns a ready handle when no work is needed.
fn precheck<S, T>(range: S, count: Option<usize>) -> Result<S, DeferredResult<S>>
where
    S: RangeSource<T>,
{
    let mut range = range;
    let checked = adapt_counted::<T, S>(&mut range, count).map(|positions| positions.range());
    match checked {
        Err(err) => Err(TaskHandle::ready(Err(err))),
        Ok(bounds) if bounds.is_empty() => Err(TaskHandle::ready(Ok(Completed {
            range,
            end: bounds.end(),
        }))),
        Ok(_) => Ok(range),
    }
}

impl<S, T, G> PolicyDispatch<S, T, G> for SequencedTask
where
    S: RangeSource<T> + Send + 'static,
    T: 'static,
    G: Operation<T> + Send + 'static,
{
    type Output = DeferredResult<S>;

    fn dispatch(
        self,
        dispatcher: &Dispatcher,
        range: S,
        count: Option<usize>,
        mut op: G,
    ) -> DeferredResult<S> {
        let mut range = match precheck::<S, T>(range, count) {
            Ok(range) => range,
            Err(ready) => return ready,
        };
        spawn_task(dispatcher.pool(), move || {
            let positions = adapt_counted::<T, S>(&mut range, count)?;
            let end = sequenced_pass(positions, &mut op)?;
            Ok(Completed { range, end })
        })
    }
}

impl<S, T, G> PolicyDispatch<S, T, G> for ParallelTask
where
    S: RangeSource<T> + Send + 'static,
    T: Send + 'static,
    G: Operation<T> + Clone + Send + Sync + 'static,
{
    type Output = DeferredResult<S>;

    fn dispatch(
        self,
        dispatcher: &Dispatcher,
        range: S,
        count: Option<usize>,
        mut op: G,
    ) -> DeferredResult<S> {
        let mut range = match precheck::<S, T>(range, count) {
            Ok(range) => range,
            Err(ready) => return ready,
        };
        let worker = dispatcher.clone();
        spawn_task(dispatcher.pool(), move || {
            let positions = adapt_counted::<T, S>(&mut range, count)?;
            let end = parallel_pass(worker.pool(), worker.config(), positions, &mut op)?;
            Ok(Completed { range, end })
        })
    }
}
