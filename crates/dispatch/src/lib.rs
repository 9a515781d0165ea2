//! # dispatch — policy-driven per-position dispatch for Rust
//!
//! Apply one operation across a sequence of positions, choosing per call
//! whether the work runs sequentially or in parallel and whether the caller
//! blocks or receives a task handle.
//!
//! ## What is in this crate?
//!
//! This is the `no_std`-capable core. It owns everything that does not need a
//! thread pool:
//!
//! - the four execution policies and the static policy → result-shape mapping,
//! - the `Operation` trait invoked at every position, with closure adapters,
//! - the range adapter that turns containers into begin/end positions,
//! - the cycle counter used by chunking heuristics (x86_64 `rdtscp`/`rdtsc`,
//!   aarch64 `cntvct_el0`, or an attached accelerator clock),
//! - the chunk planner, the sequential invoke-and-assign loop, and failure selection,
//! - the configuration builder.
//!
//! Parallel and task execution live in the `fastDispatch` extension crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use dispatch::prelude::*;
//!
//! let config = Dispatch::new()
//!     .workers(4)                  // Dedicated pool of 4 workers
//!     .target_chunk_cycles(20_000) // Minimum sampled cost per chunk
//!     .build()?;
//!
//! assert_eq!(config.workers, Some(4));
//! assert_eq!(PolicyKind::Parallel.result_shape(), ResultShape::Direct);
//! assert_eq!(ParallelTask::SHAPE, ResultShape::Deferred);
//! # Result::<(), DispatchError>::Ok(())
//! ```
//!
//! ### Reading the cycle counter
//!
//! ```rust
//! use dispatch::prelude::*;
//!
//! let counter = CycleCounter::detect();
//! if let Some(first) = counter.try_read() {
//!     let second = counter.read();
//!     let _elapsed = cycles_between(first, second);
//! }
//! ```
//!
//! ## Minimal Usage (no_std)
//!
//! ```toml
//! [dependencies]
//! dispatch = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std` the crate still needs `alloc` for chunk plans and error messages.
//!
//! The `ndarray` feature accepts contiguous one-dimensional `ndarray` arrays and
//! views as ranges.
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - errors, operations and position ranges.
mod primitives;

// Layer 2: Hardware - cycle counter.
mod hardware;

// Layer 3: Policy - execution policy taxonomy and result shapes.
mod policy;

// Layer 4: Engine - planning, sequential execution, validation.
mod engine;

// High-level fluent API for dispatch configuration.
mod api;

// Standard dispatch prelude.
pub mod prelude {
    pub use crate::api::{
        AcceleratorClock, CounterSource, CycleCount, CycleCounter, DispatchBuilder as Dispatch,
        DispatchConfig, DispatchError, ExecutionPolicy, Generate, HostInstruction, Operation,
        Parallel, ParallelTask, PolicyKind, Position, PositionRange, Positions, RangeSource,
        ResultShape, Sequenced, SequencedTask, Subrange, TryGenerate, adapt, cycles_between,
        timestamp,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod hardware {
        pub use crate::hardware::*;
    }
    pub mod policy {
        pub use crate::policy::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
