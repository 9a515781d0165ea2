//! Chunk planning for the parallel path.
//!
//! ## Purpose
//!
//! This module partitions a position range into contiguous chunks for the
//! worker pool. Chunk boundaries come from the worker count and, when a cycle
//! cost sample is available, from a target minimum cost per chunk.
//!
//! ## Design notes
//!
//! * **Static split**: `ceil(len / (workers * CHUNKS_PER_WORKER))` positions per chunk.
//! * **Cost floor**: With a sampled cost `c` and target `t`, chunks hold at least `ceil(t / c)` positions.
//! * **Override**: A configured chunk size replaces both rules.
//!
//! ## Key concepts
//!
//! * **Sampling**: A short prefix of `len / SAMPLE_DIVISOR` positions is timed before planning.
//! * **Chunk**: A contiguous sub-range processed by one worker without reordering.
//!
//! ## Invariants
//!
//! * Planned chunks are non-empty, contiguous, increasing, and cover the range exactly.
//! * Every chunk except possibly the last has the same length.
//!
//! ## Non-goals
//!
//! * This module does not execute chunks or talk to the worker pool.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::hardware::timestamp::CycleCount;
use crate::primitives::range::PositionRange;

/// Chunks planned per worker when no cost sample is available.
pub const CHUNKS_PER_WORKER: usize = 4;

/// One position in this many is timed before planning.
pub const SAMPLE_DIVISOR: usize = 100;

// ============================================================================
// Chunk Cost
// ============================================================================

/// Measured cost of the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkCost {
    /// No sample was taken; plan from the worker count alone.
    #[default]
    Unknown,

    /// Average ticks spent per position in the sample.
    PerPosition(CycleCount),
}

impl ChunkCost {
    /// Derive the per-position cost from a timed sample.
    pub fn from_sample(elapsed: CycleCount, positions: usize) -> Self {
        if positions == 0 {
            return Self::Unknown;
        }
        Self::PerPosition((elapsed / positions as CycleCount).max(1))
    }
}

// ============================================================================
// Chunk Planner
// ============================================================================

/// Partitions position ranges into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlanner {
    workers: usize,
    chunk_size: Option<usize>,
    target_chunk_cycles: CycleCount,
}

impl ChunkPlanner {
    /// Planner for `workers` workers; a zero worker count is treated as one.
    pub fn new(
        workers: usize,
        chunk_size: Option<usize>,
        target_chunk_cycles: CycleCount,
    ) -> Self {
        Self {
            workers: workers.max(1),
            chunk_size,
            target_chunk_cycles,
        }
    }

    /// Number of workers chunks are planned for.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Length of the timed prefix for a range of `len` positions; `0` skips sampling.
    pub fn sample_len(&self, len: usize) -> usize {
        if self.chunk_size.is_some() || len < 2 * self.workers {
            return 0;
        }
        (len / SAMPLE_DIVISOR).max(1)
    }

    /// Positions per chunk for a range of `len` positions.
    pub fn chunk_size(&self, len: usize, cost: ChunkCost) -> usize {
        if len == 0 {
            return 0;
        }
        if let Some(fixed) = self.chunk_size {
            return fixed.clamp(1, len);
        }

        let static_size = len.div_ceil(self.workers * CHUNKS_PER_WORKER).max(1);
        let size = match cost {
            ChunkCost::PerPosition(per_position) => {
                let floor = self.target_chunk_cycles.div_ceil(per_position.max(1));
                static_size.max(usize::try_from(floor).unwrap_or(usize::MAX))
            }
            ChunkCost::Unknown => static_size,
        };
        size.min(len)
    }

    /// Split `range` into chunks.
    pub fn plan(&self, range: PositionRange, cost: ChunkCost) -> Vec<PositionRange> {
        let size = self.chunk_size(range.len(), cost);
        if size == 0 {
            return Vec::new();
        }

        let mut chunks = Vec::with_capacity(range.len().div_ceil(size));
        let mut rest = range;
        while !rest.is_empty() {
            let (head, tail) = rest.split_at(rest.begin() + size);
            chunks.push(head);
            rest = tail;
        }
        chunks
    }
}
