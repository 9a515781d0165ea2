//! Layer 5: Engine
//!
//! This layer provides the parallel and task execution engine for dispatch.
//! It runs the core crate's chunk plans on a rayon worker pool and binds each
//! policy to its concrete return type.

// Worker pool wrapper (rayon or plain threads)
pub mod pool;

// Parallel chunk execution
pub mod executor;

// Task handles and spawning
pub mod task;

// Policy to return-type binding
pub mod resolver;
