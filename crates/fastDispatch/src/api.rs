//! High-level API for dispatch with parallel and task execution.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It extends the
//! `dispatch` configuration builder so that `.build()` yields a [`Dispatcher`]:
//! a validated configuration bound to a worker pool, on which every policy can
//! be used.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `dispatch` builder; every setter forwards to it.
//! * **Pool ownership**: A `workers` setting builds a dedicated rayon pool shared by clones.
//! * **Default dispatcher**: The free functions in `algorithms` use one process-wide dispatcher.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`ParallelDispatchBuilder`] via `Dispatch::new()`.
//! 2. Chain configuration methods (`.workers()`, `.chunk_size()`, etc.).
//! 3. Call `.build()` to obtain a [`Dispatcher`].

// External dependencies
use std::sync::{Arc, OnceLock};

// Export dependencies from dispatch crate
use dispatch::internals::api::DispatchBuilder;

// Internal dependencies
use crate::engine::pool::WorkerPool;
use crate::engine::resolver::PolicyDispatch;

// Publicly re-exported types
pub use crate::engine::task::{Completed, TaskHandle};
pub use dispatch::internals::api::{
    AcceleratorClock, CounterSource, CycleCount, CycleCounter, DispatchConfig, DispatchError,
    ExecutionPolicy, Generate, HostInstruction, Operation, Parallel, ParallelTask, PolicyKind,
    Position, PositionRange, Positions, RangeSource, ResultShape, Sequenced, SequencedTask,
    Subrange, TryGenerate, adapt, cycles_between, timestamp,
};

// ============================================================================
// Extended Builder
// ============================================================================

/// Builder for a [`Dispatcher`].
#[derive(Debug, Clone, Default)]
pub struct ParallelDispatchBuilder {
    /// Base builder from the dispatch crate
    pub base: DispatchBuilder,
}

impl ParallelDispatchBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a dedicated pool of `workers` threads instead of rayon's global pool.
    pub fn workers(mut self, workers: usize) -> Self {
        self.base = self.base.workers(workers);
        self
    }

    /// Use fixed-size chunks; disables cost sampling.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.base = self.base.chunk_size(chunk_size);
        self
    }

    /// Set the minimum tick cost of one chunk.
    pub fn target_chunk_cycles(mut self, cycles: CycleCount) -> Self {
        self.base = self.base.target_chunk_cycles(cycles);
        self
    }

    /// Enable or disable cost sampling before chunking.
    pub fn adaptive_chunking(mut self, enabled: bool) -> Self {
        self.base = self.base.adaptive_chunking(enabled);
        self
    }

    /// Read cycles from `counter` instead of the detected host counter.
    pub fn cycle_counter(mut self, counter: CycleCounter) -> Self {
        self.base = self.base.cycle_counter(counter);
        self
    }

    /// Read cycles from an accelerator's native counter.
    pub fn accelerator(mut self, clock: Arc<dyn AcceleratorClock>) -> Self {
        self.base = self.base.accelerator(clock);
        self
    }

    /// Validate the configuration and bind it to a worker pool.
    pub fn build(self) -> Result<Dispatcher, DispatchError> {
        let config = self.base.build()?;
        Dispatcher::new(config)
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// A validated configuration bound to a worker pool.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: DispatchConfig,
    pool: WorkerPool,
}

impl Dispatcher {
    /// Bind `config` to a pool: dedicated when `workers` is set, shared otherwise.
    pub fn new(config: DispatchConfig) -> Result<Self, DispatchError> {
        let pool = match config.workers {
            Some(workers) => WorkerPool::dedicated(workers)?,
            None => WorkerPool::shared(),
        };
        Ok(Self { config, pool })
    }

    /// The process-wide dispatcher: shared pool, detected cycle counter.
    pub fn global() -> &'static Dispatcher {
        static GLOBAL: OnceLock<Dispatcher> = OnceLock::new();
        GLOBAL.get_or_init(|| Dispatcher {
            config: DispatchConfig::default(),
            pool: WorkerPool::shared(),
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// The worker pool.
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Number of workers parallel chunks are planned for.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    // ========================================================================
    // Algorithms
    // ========================================================================

    /// Assign `f()` to every position of `range`.
    ///
    /// Returns the range end (blocking policies) or a task handle (task policies).
    pub fn generate<P, S, T, F>(&self, policy: P, range: S, f: F) -> P::Output
    where
        P: PolicyDispatch<S, T, Generate<F>>,
        F: FnMut() -> T,
    {
        policy.dispatch(self, range, None, Generate(f))
    }

    /// Assign `f()` to every position of `range`, stopping on the first failure.
    pub fn try_generate<P, S, T, E, F>(&self, policy: P, range: S, f: F) -> P::Output
    where
        P: PolicyDispatch<S, T, TryGenerate<F>>,
        F: FnMut() -> Result<T, E>,
    {
        policy.dispatch(self, range, None, TryGenerate(f))
    }

    /// Assign `f()` to the first `count` positions of `range`.
    ///
    /// Returns `begin + count`; `count` beyond the range length is `InvalidRange`.
    pub fn generate_n<P, S, T, F>(&self, policy: P, range: S, count: usize, f: F) -> P::Output
    where
        P: PolicyDispatch<S, T, Generate<F>>,
        F: FnMut() -> T,
    {
        policy.dispatch(self, range, Some(count), Generate(f))
    }

    /// Run any [`Operation`] over `range`.
    pub fn dispatch<P, S, T, G>(&self, policy: P, range: S, op: G) -> P::Output
    where
        P: PolicyDispatch<S, T, G>,
        G: Operation<T>,
    {
        policy.dispatch(self, range, None, op)
    }
}
