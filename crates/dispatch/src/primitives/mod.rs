//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive abstractions shared by every other layer:
//! the error type, the operation handle, and the position ranges produced by
//! the range adapter. It has zero internal dependencies within the crate.
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
//! Layer 2: Hardware
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Position ranges and the range adapter.
pub mod range;

/// Operation handles and closure adapters.
pub mod operation;
