//! Parallel execution engine for dispatch operations.
//!
//! ## Purpose
//!
//! This module provides the parallel pass behind the `Parallel` and
//! `ParallelTask` policies. It asks the core executor for a chunk plan and
//! runs the chunks on the worker pool, one operation clone per worker.
//!
//! ## Design notes
//!
//! * **Implementation**: Drives the core `DispatchExecutor` building blocks from rayon.
//! * **Parallelism**: Uses `map_init` so each worker invokes its own clone of the operation.
//! * **Failure**: Chunks share a stop flag; the lowest-position failure is surfaced.
//! * **Fallback**: Without the `cpu` feature, planned chunks run in order on the calling thread.
//!
//! ## Key concepts
//!
//! * **Sampling**: A prefix may be processed on the calling thread to estimate per-position cost.
//! * **Settling**: The call returns only after every started chunk has finished.
//!
//! ## Invariants
//!
//! * Every position is assigned at most once; exactly once when no failure occurs.
//! * Positions inside one chunk are visited in increasing order.
//!
//! ## Non-goals
//!
//! * This module does not order chunks relative to each other.
//! * This module does not abort chunks that have already started.

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use std::sync::atomic::AtomicBool;

// Export dependencies from dispatch crate
use dispatch::internals::engine::executor::{ChunkOutcome, DispatchConfig, DispatchExecutor};
use dispatch::internals::primitives::errors::DispatchError;
use dispatch::internals::primitives::operation::Operation;
use dispatch::internals::primitives::range::{Position, Positions};

// Internal dependencies
use crate::engine::pool::WorkerPool;

// ============================================================================
// Sequential Pass
// ============================================================================

/// Invoke-and-assign over all positions on the calling thread.
pub fn sequenced_pass<T, G>(
    positions: Positions<'_, T>,
    op: &mut G,
) -> Result<Position, DispatchError>
where
    G: Operation<T>,
{
    log::trace!("sequenced pass over {:?}", positions.range());
    DispatchExecutor::run_sequenced(positions, op)
}

// ============================================================================
// Parallel Pass
// ============================================================================

/// Invoke-and-assign over all positions using the worker pool.
///
/// Blocks until every chunk has settled and returns the range end, or the
/// failure at the lowest position.
pub fn parallel_pass<T, G>(
    pool: &WorkerPool,
    config: &DispatchConfig,
    positions: Positions<'_, T>,
    op: &mut G,
) -> Result<Position, DispatchError>
where
    T: Send,
    G: Operation<T> + Clone + Send + Sync,
{
    let range = positions.range();
    if range.is_empty() {
        return Ok(range.end());
    }

    let plan = DispatchExecutor::prepare_parallel(positions, op, config, pool.workers())?;
    let end = plan.end;
    let stop = AtomicBool::new(false);

    let outcomes = run_chunks(pool, plan.chunks, op, &stop);

    match DispatchExecutor::select_failure(outcomes) {
        Some(err) => Err(err),
        None => Ok(end),
    }
}

#[cfg(feature = "cpu")]
fn run_chunks<T, G>(
    pool: &WorkerPool,
    chunks: Vec<Positions<'_, T>>,
    op: &G,
    stop: &AtomicBool,
) -> Vec<ChunkOutcome>
where
    T: Send,
    G: Operation<T> + Clone + Send + Sync,
{
    pool.install(|| {
        chunks
            .into_par_iter()
            .map_init(
                || op.clone(),
                |worker_op, chunk| DispatchExecutor::run_chunk(chunk, worker_op, stop),
            )
            .collect()
    })
}

#[cfg(not(feature = "cpu"))]
fn run_chunks<T, G>(
    _pool: &WorkerPool,
    chunks: Vec<Positions<'_, T>>,
    op: &G,
    stop: &AtomicBool,
) -> Vec<ChunkOutcome>
where
    T: Send,
    G: Operation<T> + Clone + Send + Sync,
{
    let mut worker_op = op.clone();
    chunks
        .into_iter()
        .map(|chunk| DispatchExecutor::run_chunk(chunk, &mut worker_op, stop))
        .collect()
}
