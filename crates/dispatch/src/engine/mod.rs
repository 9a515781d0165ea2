//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer turns a policy, a position range and an operation into work:
//! chunk planning, the sequential invoke-and-assign loop, cost sampling and
//! failure selection. The extension crate drives these pieces from its worker
//! pool for the parallel and task policies.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Policy
//!   ↓
//! Layer 2: Hardware
//!   ↓
//! Layer 1: Primitives
//! ```

/// Dispatch routines and configuration.
pub mod executor;

/// Chunk planning.
pub mod planner;

/// Validation utilities.
pub mod validator;
