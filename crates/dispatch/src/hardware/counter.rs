//! Cycle counter abstraction used by the chunking heuristics.
//!
//! ## Purpose
//!
//! This module resolves, once, where cycle counts come from and then serves
//! reads from that source. The resolution order is fixed:
//!
//! 1. An attached accelerator context, which supplies its own native counter.
//! 2. The host instruction sequence detected for the build target.
//! 3. Nothing; the counter is `Unavailable` and dependent heuristics switch off.
//!
//! ## Design notes
//!
//! * **Resolved at configuration**: The source is chosen when the counter is built, never per read.
//! * **Stateless reads**: `read` takes `&self`, allocates nothing and never locks.
//! * **Absence is not an error**: Only [`CycleCounter::require`] turns absence into an error.
//!
//! ## Key concepts
//!
//! * **Wrap epoch**: Differences are taken with wrapping subtraction ([`cycles_between`]).
//! * **Same core**: Differences are meaningful only between reads on the same logical core.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

// External dependencies
use core::fmt::{Debug, Formatter, Result as FmtResult};

// Internal dependencies
use crate::hardware::timestamp::{CycleCount, HostInstruction};
use crate::primitives::errors::DispatchError;

// ============================================================================
// Accelerator Context
// ============================================================================

/// Native counter of an accelerator execution context.
///
/// Implementations must be reentrant and must not block.
pub trait AcceleratorClock: Send + Sync {
    /// Current tick count of the accelerator.
    fn timestamp(&self) -> CycleCount;

    /// Human-readable name used in logs.
    fn name(&self) -> &str {
        "accelerator"
    }
}

// ============================================================================
// Counter Source
// ============================================================================

/// Where a [`CycleCounter`] reads its ticks from.
#[derive(Clone)]
pub enum CounterSource {
    /// Delegates to an accelerator's native counter.
    Accelerator(Arc<dyn AcceleratorClock>),

    /// Uses a host instruction sequence.
    Host(HostInstruction),

    /// No counter on this target.
    Unavailable,
}

impl Debug for CounterSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Accelerator(clock) => f.debug_tuple("Accelerator").field(&clock.name()).finish(),
            Self::Host(instruction) => f.debug_tuple("Host").field(instruction).finish(),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

// ============================================================================
// Cycle Counter
// ============================================================================

/// Monotonic tick counter with a source fixed at construction.
#[derive(Debug, Clone)]
pub struct CycleCounter {
    source: CounterSource,
}

impl Default for CycleCounter {
    fn default() -> Self {
        Self::detect()
    }
}

impl CycleCounter {
    /// Use the best host sequence for this target, or `Unavailable`.
    pub fn detect() -> Self {
        let source = match HostInstruction::detect() {
            Some(instruction) => CounterSource::Host(instruction),
            None => CounterSource::Unavailable,
        };
        log::debug!("cycle counter source: {source:?}");
        Self { source }
    }

    /// Delegate every read to an accelerator's native counter.
    pub fn with_accelerator(clock: Arc<dyn AcceleratorClock>) -> Self {
        log::debug!("cycle counter delegating to {}", clock.name());
        Self {
            source: CounterSource::Accelerator(clock),
        }
    }

    /// A counter that never reads; disables cycle-based heuristics.
    pub const fn unavailable() -> Self {
        Self {
            source: CounterSource::Unavailable,
        }
    }

    /// Detect a host counter, failing with `CapabilityUnavailable` when none exists.
    pub fn require() -> Result<Self, DispatchError> {
        let counter = Self::detect();
        if counter.is_available() {
            Ok(counter)
        } else {
            Err(DispatchError::CapabilityUnavailable {
                capability: "cycle counter",
            })
        }
    }

    /// The resolved source.
    pub fn source(&self) -> &CounterSource {
        &self.source
    }

    /// Whether reads produce real tick counts.
    pub fn is_available(&self) -> bool {
        !matches!(self.source, CounterSource::Unavailable)
    }

    /// Read the counter; `0` when unavailable.
    #[inline]
    pub fn read(&self) -> CycleCount {
        match &self.source {
            CounterSource::Accelerator(clock) => clock.timestamp(),
            CounterSource::Host(instruction) => instruction.read(),
            CounterSource::Unavailable => 0,
        }
    }

    /// Read the counter, or `None` when unavailable.
    #[inline]
    pub fn try_read(&self) -> Option<CycleCount> {
        self.is_available().then(|| self.read())
    }

    /// Run `f` and report the ticks it took, if the counter is available.
    pub fn measure<R>(&self, f: impl FnOnce() -> R) -> (R, Option<CycleCount>) {
        let start = self.try_read();
        let out = f();
        let elapsed = start.map(|start| cycles_between(start, self.read()));
        (out, elapsed)
    }
}

/// Ticks elapsed from `earlier` to `later`, across at most one wrap.
#[inline]
pub const fn cycles_between(earlier: CycleCount, later: CycleCount) -> CycleCount {
    later.wrapping_sub(earlier)
}
