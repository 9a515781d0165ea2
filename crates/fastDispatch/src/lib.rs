//! # fastDispatch — parallel and task execution for dispatch
//!
//! Apply one operation to every position of a range, choosing per call how it
//! runs:
//!
//! | Policy          | Execution                 | Caller     | Returns                    |
//! |-----------------|---------------------------|------------|----------------------------|
//! | `Sequenced`     | calling thread, in order  | blocks     | `Result<Position, _>`      |
//! | `Parallel`      | rayon worker pool, chunks | blocks     | `Result<Position, _>`      |
//! | `SequencedTask` | one pool worker, in order | continues  | `TaskHandle<Completed<S>>` |
//! | `ParallelTask`  | rayon worker pool, chunks | continues  | `TaskHandle<Completed<S>>` |
//!
//! Parallel chunk sizes come from the worker count and, where the target has a
//! cycle counter, from the measured cost of a short sequential prefix.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastDispatch::prelude::*;
//!
//! let mut values = vec![0; 10];
//!
//! // Blocking, on the calling thread
//! let end = generate(Sequenced, &mut values, || 7)?;
//! assert_eq!(end, 10);
//!
//! // Blocking, on a dedicated pool of 4 workers
//! let dispatcher = Dispatch::new().workers(4).build()?;
//! let end = dispatcher.generate(Parallel, &mut values, || 7)?;
//! assert_eq!(end, 10);
//! assert!(values.iter().all(|&v| v == 7));
//! # Result::<(), DispatchError>::Ok(())
//! ```
//!
//! ### Tasks
//!
//! Task policies take ownership of the range and hand it back on completion.
//!
//! ```rust
//! use fastDispatch::prelude::*;
//!
//! let handle = generate(ParallelTask, vec![0u64; 1_000], || 1);
//! // ... other work ...
//! let done = handle.wait()?;
//! assert_eq!(done.end, 1_000);
//! assert_eq!(done.range.iter().sum::<u64>(), 1_000);
//! # Result::<(), DispatchError>::Ok(())
//! ```
//!
//! ### Fallible operations
//!
//! ```rust
//! use fastDispatch::prelude::*;
//!
//! let mut values = vec![0; 100];
//! let mut next = 0;
//! let result = try_generate(Sequenced, &mut values, || {
//!     next += 1;
//!     if next > 50 { Err("source exhausted") } else { Ok(next) }
//! });
//!
//! match result {
//!     Ok(end) => println!("filled up to {end}"),
//!     Err(e) => eprintln!("generation failed: {e}"),
//! }
//! ```
//!
//! ### ndarray Integration
//!
//! Contiguous one-dimensional arrays are accepted as ranges directly.
//!
//! ```rust
//! use fastDispatch::prelude::*;
//! use ndarray::Array1;
//!
//! let mut samples = Array1::<f64>::zeros(256);
//! generate(Parallel, &mut samples, || 0.5)?;
//! assert_eq!(samples.sum(), 128.0);
//! # Result::<(), DispatchError>::Ok(())
//! ```
//!
//! ## Logging
//!
//! Chunk plans and sampled costs are logged at `debug`, individual chunks at
//! `trace`, and task failures nobody observed at `warn`, through the `log`
//! facade.
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![allow(non_snake_case)]

// Layer 5: Engine - worker pool, parallel execution, tasks, result resolution.
mod engine;

// Generation algorithms on the process-wide dispatcher.
mod algorithms;

// High-level fluent API for dispatch.
mod api;

// Standard fastDispatch prelude.
pub mod prelude {
    pub use crate::algorithms::{generate, generate_n, try_generate};
    pub use crate::api::{
        AcceleratorClock, Completed, CounterSource, CycleCount, CycleCounter, DispatchConfig,
        DispatchError, Dispatcher, ExecutionPolicy, Generate, HostInstruction, Operation,
        Parallel, ParallelDispatchBuilder as Dispatch, ParallelTask, PolicyKind, Position,
        PositionRange, Positions, RangeSource, ResultShape, Sequenced, SequencedTask, Subrange,
        TaskHandle, TryGenerate, adapt, cycles_between, timestamp,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
