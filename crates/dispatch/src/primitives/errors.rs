//! Error types for dispatch operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while adapting a
//! range, configuring a dispatcher, reading the cycle counter, or invoking the
//! per-position operation.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (positions, lengths, tags).
//! * **Deferred**: Builder errors are recorded during configuration and raised at `build()`.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Range errors**: `end` before `begin`, or `end` past the source length.
//! 2. **Operation failures**: The user operation failed at some position.
//! 3. **Capabilities**: A hardware capability (cycle counter) is absent on this target.
//! 4. **Policy errors**: A policy name could not be resolved to a known tag.
//! 5. **Configuration**: Invalid worker counts, chunk sizes, or cycle targets.
//!
//! ## Invariants
//!
//! * `CapabilityUnavailable` is informational; no dispatch fails because of it.
//! * `OperationFailure` positions are absolute positions in the adapted source.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not decide which of several concurrent failures is surfaced.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for dispatch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The begin/end pair does not describe a valid range of the source.
    InvalidRange {
        /// Requested begin position.
        begin: usize,
        /// Requested end position.
        end: usize,
        /// Length of the underlying source, when known.
        len: Option<usize>,
    },

    /// The operation reported a failure while producing a value.
    OperationFailure {
        /// Absolute position being assigned when the failure was raised.
        position: Option<usize>,
        /// Rendered failure from the operation.
        message: String,
    },

    /// A hardware capability has no implementation on this target.
    CapabilityUnavailable {
        /// Name of the missing capability (e.g., "cycle counter").
        capability: &'static str,
    },

    /// A policy tag did not name any of the four execution policies.
    PolicyMismatch(String),

    /// Worker count must be at least 1.
    InvalidWorkers(usize),

    /// Explicit chunk size must be at least 1.
    InvalidChunkSize(usize),

    /// Target per-chunk cycle cost must be positive.
    InvalidTargetCycles(u64),

    /// The worker pool could not be constructed.
    WorkerPool(String),

    /// A task finished without delivering its outcome, or its outcome was already taken.
    TaskAbandoned,

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl DispatchError {
    /// Build an `OperationFailure` for the given position from any displayable error.
    pub fn operation_failure<E: Display>(position: usize, err: E) -> Self {
        Self::OperationFailure {
            position: Some(position),
            message: format!("{err}"),
        }
    }

    /// Position attached to an operation failure, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::OperationFailure { position, .. } => *position,
            _ => None,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidRange {
                begin,
                end,
                len: Some(len),
            } => {
                write!(
                    f,
                    "Invalid range: [{begin}, {end}) (source has {len} positions)"
                )
            }
            Self::InvalidRange {
                begin,
                end,
                len: None,
            } => {
                write!(f, "Invalid range: [{begin}, {end}) (end precedes begin)")
            }
            Self::OperationFailure {
                position: Some(position),
                message,
            } => {
                write!(f, "Operation failed at position {position}: {message}")
            }
            Self::OperationFailure {
                position: None,
                message,
            } => write!(f, "Operation failed: {message}"),
            Self::CapabilityUnavailable { capability } => {
                write!(f, "Capability unavailable on this target: {capability}")
            }
            Self::PolicyMismatch(tag) => {
                write!(
                    f,
                    "Unknown execution policy '{tag}' (expected seq, par, seq_task or par_task)"
                )
            }
            Self::InvalidWorkers(workers) => {
                write!(f, "Invalid workers: {workers} (must be at least 1)")
            }
            Self::InvalidChunkSize(size) => {
                write!(f, "Invalid chunk_size: {size} (must be at least 1)")
            }
            Self::InvalidTargetCycles(cycles) => {
                write!(f, "Invalid target_chunk_cycles: {cycles} (must be > 0)")
            }
            Self::WorkerPool(msg) => write!(f, "Worker pool unavailable: {msg}"),
            Self::TaskAbandoned => {
                write!(f, "Task terminated before delivering its outcome")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for DispatchError {}
