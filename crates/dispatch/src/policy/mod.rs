//! Layer 3: Policy
//!
//! # Purpose
//!
//! This layer defines the execution policy taxonomy and the static mapping
//! from a policy to the shape of the value a dispatch returns.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Policy ← You are here
//!   ↓
//! Layer 2: Hardware
//!   ↓
//! Layer 1: Primitives
//! ```

/// Execution policy tags.
pub mod taxonomy;

/// Policy to result-shape mapping.
pub mod resolver;
