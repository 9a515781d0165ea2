//! High-level configuration API.
//!
//! ## Purpose
//!
//! This module provides the fluent builder used to configure dispatch:
//! worker pool size, chunking behaviour, and the cycle counter source.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Deferred**: Parameter errors are reported when `.build()` is called.
//! * **Single-assignment**: Setting a parameter twice is reported as an error.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`DispatchBuilder`] via `Dispatch::new()`.
//! 2. Chain configuration methods (`.workers()`, `.chunk_size()`, etc.).
//! 3. Call `.build()` to obtain a validated [`DispatchConfig`].

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::engine::executor::{DEFAULT_TARGET_CHUNK_CYCLES, DispatchConfig};
pub use crate::hardware::counter::{AcceleratorClock, CounterSource, CycleCounter, cycles_between};
pub use crate::hardware::timestamp::{CycleCount, HostInstruction, timestamp};
pub use crate::policy::resolver::ResultShape;
pub use crate::policy::taxonomy::{
    ExecutionPolicy, Parallel, ParallelTask, PolicyKind, Sequenced, SequencedTask,
};
pub use crate::primitives::errors::DispatchError;
pub use crate::primitives::operation::{Generate, Operation, TryGenerate};
pub use crate::primitives::range::{
    Position, PositionRange, Positions, RangeSource, Subrange, adapt,
};

/// Fluent builder for dispatch configuration.
#[derive(Debug, Clone, Default)]
pub struct DispatchBuilder {
    /// Size of a dedicated worker pool.
    pub workers: Option<usize>,

    /// Fixed chunk size.
    pub chunk_size: Option<usize>,

    /// Minimum tick cost of one chunk.
    pub target_chunk_cycles: Option<CycleCount>,

    /// Whether to sample the operation's cost before chunking.
    pub adaptive_chunking: Option<bool>,

    /// Cycle counter override.
    pub counter: Option<CycleCounter>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl DispatchBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a dedicated pool of `workers` workers instead of the shared pool.
    pub fn workers(mut self, workers: usize) -> Self {
        if self.workers.is_some() {
            self.duplicate_param = Some("workers");
        }
        self.workers = Some(workers);
        self
    }

    /// Use fixed-size chunks; disables cost sampling.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        if self.chunk_size.is_some() {
            self.duplicate_param = Some("chunk_size");
        }
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Set the minimum tick cost of one chunk.
    pub fn target_chunk_cycles(mut self, cycles: CycleCount) -> Self {
        if self.target_chunk_cycles.is_some() {
            self.duplicate_param = Some("target_chunk_cycles");
        }
        self.target_chunk_cycles = Some(cycles);
        self
    }

    /// Enable or disable cost sampling before chunking.
    pub fn adaptive_chunking(mut self, enabled: bool) -> Self {
        if self.adaptive_chunking.is_some() {
            self.duplicate_param = Some("adaptive_chunking");
        }
        self.adaptive_chunking = Some(enabled);
        self
    }

    /// Read cycles from `counter` instead of the detected host counter.
    pub fn cycle_counter(mut self, counter: CycleCounter) -> Self {
        if self.counter.is_some() {
            self.duplicate_param = Some("cycle_counter");
        }
        self.counter = Some(counter);
        self
    }

    /// Read cycles from an accelerator's native counter.
    pub fn accelerator(self, clock: Arc<dyn AcceleratorClock>) -> Self {
        self.cycle_counter(CycleCounter::with_accelerator(clock))
    }

    /// Validate the parameters and produce a configuration.
    pub fn build(self) -> Result<DispatchConfig, DispatchError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        if let Some(workers) = self.workers {
            Validator::validate_workers(workers)?;
        }
        if let Some(chunk_size) = self.chunk_size {
            Validator::validate_chunk_size(chunk_size)?;
        }
        let target_chunk_cycles = self.target_chunk_cycles.unwrap_or(DEFAULT_TARGET_CHUNK_CYCLES);
        Validator::validate_target_cycles(target_chunk_cycles)?;

        Ok(DispatchConfig {
            workers: self.workers,
            chunk_size: self.chunk_size,
            target_chunk_cycles,
            adaptive_chunking: self.adaptive_chunking.unwrap_or(true),
            counter: self.counter.unwrap_or_default(),
        })
    }
}
