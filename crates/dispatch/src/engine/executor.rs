//! Execution engine for dispatching an operation over positions.
//!
//! ## Purpose
//!
//! This module provides the building blocks every policy is assembled from:
//! the sequential invoke-and-assign loop, the stop-aware chunk runner used by
//! parallel workers, cost sampling for the chunk planner, and the failure
//! selection rule applied when several chunks fail.
//!
//! ## Design notes
//!
//! * **One loop**: Sequential dispatch and each parallel chunk run the same loop.
//! * **Stop flag**: A failure raises a shared flag; chunks check it only before they start.
//! * **Deterministic failure**: Among several failures the lowest position wins.
//! * **No pool**: Nothing here spawns threads (handled by the extension crate).
//!
//! ## Invariants
//!
//! * Positions inside one call are visited in increasing order, each at most once.
//! * A failing position is never assigned, and no later position of that loop is visited.
//! * A chunk that has started is never abandoned because another chunk failed.
//!
//! ## Non-goals
//!
//! * This module does not validate configuration (handled by `validator`).
//! * This module does not synchronize access to state captured by the operation.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::sync::atomic::{AtomicBool, Ordering};

// Internal dependencies
use crate::engine::planner::{ChunkCost, ChunkPlanner};
use crate::hardware::counter::CycleCounter;
use crate::hardware::timestamp::CycleCount;
use crate::primitives::errors::DispatchError;
use crate::primitives::operation::Operation;
use crate::primitives::range::{Position, PositionRange, Positions};

/// Default minimum tick cost of one chunk.
pub const DEFAULT_TARGET_CHUNK_CYCLES: CycleCount = 50_000;

// ============================================================================
// Configuration
// ============================================================================

/// Validated dispatch configuration.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Size of a dedicated worker pool; `None` uses the shared pool.
    pub workers: Option<usize>,

    /// Fixed chunk size; disables sampling when set.
    pub chunk_size: Option<usize>,

    /// Minimum tick cost of one chunk when a cost sample exists.
    pub target_chunk_cycles: CycleCount,

    /// Whether to time a prefix of the range before planning chunks.
    pub adaptive_chunking: bool,

    /// Counter used for cost sampling.
    pub counter: CycleCounter,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workers: None,
            chunk_size: None,
            target_chunk_cycles: DEFAULT_TARGET_CHUNK_CYCLES,
            adaptive_chunking: true,
            counter: CycleCounter::detect(),
        }
    }
}

impl DispatchConfig {
    /// Chunk planner for a pool of `workers` workers.
    pub fn planner(&self, workers: usize) -> ChunkPlanner {
        ChunkPlanner::new(workers, self.chunk_size, self.target_chunk_cycles)
    }

    /// Whether cost sampling will run for dispatches under this configuration.
    pub fn samples_cost(&self) -> bool {
        self.adaptive_chunking && self.chunk_size.is_none() && self.counter.is_available()
    }
}

// ============================================================================
// Chunk Outcome
// ============================================================================

/// How one chunk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// Every position of the chunk was assigned.
    Completed,

    /// The chunk stopped at a failing position.
    Failed(DispatchError),

    /// The chunk never started because a failure had already been raised.
    Skipped,
}

/// Chunks prepared for the worker pool.
#[derive(Debug)]
pub struct ParallelPlan<'a, T> {
    /// Chunk views in increasing position order.
    pub chunks: Vec<Positions<'a, T>>,

    /// End of the whole dispatched range.
    pub end: Position,
}

// ============================================================================
// Executor
// ============================================================================

/// Stateless dispatch routines shared by all policies.
pub struct DispatchExecutor;

impl DispatchExecutor {
    /// Invoke-and-assign at every position in increasing order.
    ///
    /// Stops at the first failure; later positions are never invoked.
    pub fn run_sequenced<T, G>(
        positions: Positions<'_, T>,
        op: &mut G,
    ) -> Result<Position, DispatchError>
    where
        G: Operation<T>,
    {
        let (slots, range) = positions.into_parts();
        for (position, slot) in (range.begin()..range.end()).zip(slots.iter_mut()) {
            match op.invoke() {
                Ok(value) => *slot = value,
                Err(err) => return Err(DispatchError::operation_failure(position, err)),
            }
        }
        Ok(range.end())
    }

    /// Run one chunk unless `stop` is already raised; raise it on failure.
    pub fn run_chunk<T, G>(
        positions: Positions<'_, T>,
        op: &mut G,
        stop: &AtomicBool,
    ) -> ChunkOutcome
    where
        G: Operation<T>,
    {
        if stop.load(Ordering::Acquire) {
            log::trace!("skipping chunk {:?}", positions.range());
            return ChunkOutcome::Skipped;
        }

        let range = positions.range();
        match Self::run_sequenced(positions, op) {
            Ok(_) => {
                log::trace!("chunk {range:?} completed");
                ChunkOutcome::Completed
            }
            Err(err) => {
                stop.store(true, Ordering::Release);
                log::debug!("chunk {range:?} failed: {err}");
                ChunkOutcome::Failed(err)
            }
        }
    }

    /// Process the first `sample_len` positions sequentially and time them.
    ///
    /// Returns the unprocessed remainder and the measured cost. The sampled
    /// positions count as visited; a failure inside the sample is returned as-is.
    pub fn sample<'a, T, G>(
        positions: Positions<'a, T>,
        op: &mut G,
        sample_len: usize,
        counter: &CycleCounter,
    ) -> Result<(Positions<'a, T>, ChunkCost), DispatchError>
    where
        G: Operation<T>,
    {
        let range = positions.range();
        let sample_len = sample_len.min(range.len());
        if sample_len == 0 || !counter.is_available() {
            return Ok((positions, ChunkCost::Unknown));
        }

        let (sample, rest) = positions.split_at(range.begin() + sample_len);
        let (outcome, elapsed) = counter.measure(|| Self::run_sequenced(sample, op));
        outcome?;

        let cost = match elapsed {
            Some(elapsed) => ChunkCost::from_sample(elapsed, sample_len),
            None => ChunkCost::Unknown,
        };
        log::debug!("sampled {sample_len} positions: {cost:?}");
        Ok((rest, cost))
    }

    /// Sample (when configured) and split the remainder into chunks.
    pub fn prepare_parallel<'a, T, G>(
        positions: Positions<'a, T>,
        op: &mut G,
        config: &DispatchConfig,
        workers: usize,
    ) -> Result<ParallelPlan<'a, T>, DispatchError>
    where
        G: Operation<T>,
    {
        let end = positions.range().end();
        let planner = config.planner(workers);

        let (rest, cost) = if config.samples_cost() {
            let sample_len = planner.sample_len(positions.range().len());
            Self::sample(positions, op, sample_len, &config.counter)?
        } else {
            (positions, ChunkCost::Unknown)
        };

        let bounds: Vec<PositionRange> = planner.plan(rest.range(), cost);
        log::debug!(
            "planned {} chunks over {:?} for {} workers",
            bounds.len(),
            rest.range(),
            planner.workers()
        );
        let chunks = rest.split_chunks(&bounds);
        Ok(ParallelPlan { chunks, end })
    }

    /// Pick the failure to surface: the one at the lowest position.
    ///
    /// Failures without a position sort after positioned ones; remaining ties
    /// keep the first in iteration order.
    pub fn select_failure<I>(outcomes: I) -> Option<DispatchError>
    where
        I: IntoIterator<Item = ChunkOutcome>,
    {
        let mut selected: Option<DispatchError> = None;
        for outcome in outcomes {
            let ChunkOutcome::Failed(err) = outcome else {
                continue;
            };
            let replace = match &selected {
                None => true,
                Some(current) => {
                    let key = |e: &DispatchError| e.position().unwrap_or(usize::MAX);
                    key(&err) < key(current)
                }
            };
            if replace {
                if let Some(discarded) = selected.replace(err) {
                    log::debug!("discarding concurrent failure: {discarded}");
                }
            } else {
                log::debug!("discarding concurrent failure: {err}");
            }
        }
        selected
    }
}
