//! Execution policy tags.
//!
//! ## Purpose
//!
//! This module defines the closed set of execution policies. A policy picks a
//! point on two independent axes:
//!
//! | Policy          | Placement  | Caller     |
//! |-----------------|------------|------------|
//! | `Sequenced`     | sequential | blocks     |
//! | `Parallel`      | parallel   | blocks     |
//! | `SequencedTask` | sequential | handle     |
//! | `ParallelTask`  | parallel   | handle     |
//!
//! ## Design notes
//!
//! * **Marker types**: Each policy is a zero-sized `Copy` type so dispatch is chosen at compile time.
//! * **Sealed**: [`ExecutionPolicy`] cannot be implemented outside this crate.
//! * **Runtime names**: [`PolicyKind`] mirrors the markers for logging and configuration.
//!
//! ## Invariants
//!
//! * Exactly four policies exist; the set never grows at runtime.
//! * A marker's `KIND` is a constant.
//!
//! ## Non-goals
//!
//! * This module does not execute anything (see `engine`).

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result as FmtResult};
use core::str::FromStr;

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::ToString;

// Internal dependencies
use crate::policy::resolver::ResultShape;
use crate::primitives::errors::DispatchError;

// ============================================================================
// Policy Kind
// ============================================================================

/// Runtime name of an execution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Sequential, blocking.
    Sequenced,

    /// Parallel, blocking.
    Parallel,

    /// Sequential, returns a task handle.
    SequencedTask,

    /// Parallel, returns a task handle.
    ParallelTask,
}

impl PolicyKind {
    /// Every policy, in declaration order.
    pub const ALL: [PolicyKind; 4] = [
        Self::Sequenced,
        Self::Parallel,
        Self::SequencedTask,
        Self::ParallelTask,
    ];

    /// Compose a policy from its two axes.
    pub const fn from_axes(parallel: bool, task: bool) -> Self {
        match (parallel, task) {
            (false, false) => Self::Sequenced,
            (true, false) => Self::Parallel,
            (false, true) => Self::SequencedTask,
            (true, true) => Self::ParallelTask,
        }
    }

    /// Whether positions may be processed on several workers.
    pub const fn is_parallel(self) -> bool {
        matches!(self, Self::Parallel | Self::ParallelTask)
    }

    /// Whether the caller receives a handle instead of blocking.
    pub const fn is_task(self) -> bool {
        matches!(self, Self::SequencedTask | Self::ParallelTask)
    }

    /// Canonical short name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sequenced => "seq",
            Self::Parallel => "par",
            Self::SequencedTask => "seq_task",
            Self::ParallelTask => "par_task",
        }
    }
}

impl Display for PolicyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = DispatchError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "seq" | "sequenced" => Ok(Self::Sequenced),
            "par" | "parallel" => Ok(Self::Parallel),
            "seq_task" | "sequenced_task" => Ok(Self::SequencedTask),
            "par_task" | "parallel_task" => Ok(Self::ParallelTask),
            other => Err(DispatchError::PolicyMismatch(other.to_string())),
        }
    }
}

// ============================================================================
// Policy Markers
// ============================================================================

mod sealed {
    pub trait Sealed {}
}

/// Compile-time execution policy.
pub trait ExecutionPolicy: sealed::Sealed + Copy + Send + Sync + Debug + 'static {
    /// Runtime name of this policy.
    const KIND: PolicyKind;

    /// Whether positions may be processed on several workers.
    const IS_PARALLEL: bool = Self::KIND.is_parallel();

    /// Whether the caller receives a handle instead of blocking.
    const IS_TASK: bool = Self::KIND.is_task();

    /// Shape of the value a dispatch under this policy returns.
    const SHAPE: ResultShape = Self::KIND.result_shape();

    /// Runtime name of this policy.
    fn kind(self) -> PolicyKind {
        Self::KIND
    }
}

/// Process positions in increasing order on the calling thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sequenced;

/// Process chunks of positions on the worker pool and wait for all of them.
///
/// # Preconditions
///
/// The operation is cloned once per worker and the clones run concurrently.
/// Only use this policy with operations that are stateless or internally
/// synchronized; shared state reachable from the clones is the caller's to guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Parallel;

/// Like [`Sequenced`], but on one worker and returning a task handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SequencedTask;

/// Like [`Parallel`], but returning a task handle.
///
/// # Preconditions
///
/// Same duplicability contract as [`Parallel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParallelTask;

impl Sequenced {
    /// Non-blocking variant of this policy.
    pub const fn task(self) -> SequencedTask {
        SequencedTask
    }
}

impl Parallel {
    /// Non-blocking variant of this policy.
    pub const fn task(self) -> ParallelTask {
        ParallelTask
    }
}

impl sealed::Sealed for Sequenced {}
impl sealed::Sealed for Parallel {}
impl sealed::Sealed for SequencedTask {}
impl sealed::Sealed for ParallelTask {}

impl ExecutionPolicy for Sequenced {
    const KIND: PolicyKind = PolicyKind::Sequenced;
}

impl ExecutionPolicy for Parallel {
    const KIND: PolicyKind = PolicyKind::Parallel;
}

impl ExecutionPolicy for SequencedTask {
    const KIND: PolicyKind = PolicyKind::SequencedTask;
}

impl ExecutionPolicy for ParallelTask {
    const KIND: PolicyKind = PolicyKind::ParallelTask;
}
