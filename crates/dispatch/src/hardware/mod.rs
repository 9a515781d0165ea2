//! Layer 2: Hardware
//!
//! # Purpose
//!
//! This layer provides the cycle counter consulted by the parallel path's
//! chunking heuristics. Instruction sequences are selected per build target;
//! accelerator contexts can take over reads entirely.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Policy
//!   ↓
//! Layer 2: Hardware ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-target tick counter instruction sequences.
pub mod timestamp;

/// Counter abstraction with accelerator delegation.
pub mod counter;
