//! Position ranges and the range adapter.
//!
//! ## Purpose
//!
//! This module turns container-like arguments into a begin/end pair of
//! positions together with mutable access to the slots those positions
//! address. It is the only place where containers are inspected; everything
//! downstream works on [`Positions`].
//!
//! ## Design notes
//!
//! * **Contiguous**: Positions address a contiguous run of slots, so chunks can be split off safely.
//! * **Absolute**: Positions are absolute within the outermost source; a `Subrange` keeps them.
//! * **Early checks**: `end < begin` is rejected at construction, bounds are checked at adaptation.
//!
//! ## Key concepts
//!
//! * **Position**: An index into a sequence; incremented by one per slot.
//! * **PositionRange**: Half-open `[begin, end)`; its length is `end - begin`.
//! * **RangeSource**: Anything that can expose its begin/end (slices, vectors, deques,
//!   subranges, and one-dimensional ndarray arrays behind the `ndarray` feature).
//!
//! ## Invariants
//!
//! * `begin <= end` for every constructed `PositionRange`.
//! * `Positions::slots().len() == Positions::range().len()`.
//!
//! ## Non-goals
//!
//! * This module does not copy non-contiguous sources (strided ndarray views are rejected).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "ndarray")]
use ndarray::{ArrayBase, DataMut, Ix1};
#[cfg(feature = "std")]
use std::collections::VecDeque;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::Range;

// Internal dependencies
use crate::primitives::errors::DispatchError;

/// An index into a sequence.
pub type Position = usize;

// ============================================================================
// Position Range
// ============================================================================

/// Half-open range `[begin, end)` of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionRange {
    begin: Position,
    end: Position,
}

impl PositionRange {
    /// Create a range, rejecting `end < begin`.
    pub fn new(begin: Position, end: Position) -> Result<Self, DispatchError> {
        if end < begin {
            return Err(DispatchError::InvalidRange {
                begin,
                end,
                len: None,
            });
        }
        Ok(Self { begin, end })
    }

    /// Empty range located at `position`.
    pub const fn empty_at(position: Position) -> Self {
        Self {
            begin: position,
            end: position,
        }
    }

    /// First position of the range.
    pub const fn begin(&self) -> Position {
        self.begin
    }

    /// One past the last position of the range.
    pub const fn end(&self) -> Position {
        self.end
    }

    /// Number of positions, `distance(begin, end)`.
    pub const fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Whether the range holds no positions.
    pub const fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Whether `other` lies entirely within this range.
    pub const fn contains_range(&self, other: &PositionRange) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// Split into `[begin, at)` and `[at, end)`; `at` is clamped into the range.
    pub fn split_at(&self, at: Position) -> (Self, Self) {
        let at = at.clamp(self.begin, self.end);
        (
            Self {
                begin: self.begin,
                end: at,
            },
            Self {
                begin: at,
                end: self.end,
            },
        )
    }
}

impl From<PositionRange> for Range<Position> {
    fn from(range: PositionRange) -> Self {
        range.begin..range.end
    }
}

// ============================================================================
// Positions
// ============================================================================

/// Mutable view over the slots addressed by a [`PositionRange`].
#[derive(Debug)]
pub struct Positions<'a, T> {
    slots: &'a mut [T],
    range: PositionRange,
}

impl<'a, T> Positions<'a, T> {
    /// Wrap `slots`, numbering the first slot `begin`.
    ///
    /// Fails when `begin + slots.len()` overflows a position.
    pub fn new(slots: &'a mut [T], begin: Position) -> Result<Self, DispatchError> {
        let Some(end) = begin.checked_add(slots.len()) else {
            return Err(DispatchError::InvalidRange {
                begin,
                end: Position::MAX,
                len: Some(slots.len()),
            });
        };
        let range = PositionRange { begin, end };
        Ok(Self { slots, range })
    }

    /// Wrap `slots`, numbering the first slot `0`.
    pub fn from_slice(slots: &'a mut [T]) -> Self {
        let range = PositionRange {
            begin: 0,
            end: slots.len(),
        };
        Self { slots, range }
    }

    /// The positions covered by this view.
    pub fn range(&self) -> PositionRange {
        self.range
    }

    /// Mutable access to the slots.
    pub fn slots(&mut self) -> &mut [T] {
        self.slots
    }

    /// Split into the raw slots and their range.
    pub fn into_parts(self) -> (&'a mut [T], PositionRange) {
        (self.slots, self.range)
    }

    /// Restrict the view to `range`, which must lie within the current range.
    pub fn narrow(self, range: PositionRange) -> Result<Positions<'a, T>, DispatchError> {
        if !self.range.contains_range(&range) {
            return Err(DispatchError::InvalidRange {
                begin: range.begin,
                end: range.end,
                len: Some(self.range.end),
            });
        }
        let Positions { slots, range: outer } = self;
        let slots = &mut slots[range.begin - outer.begin..range.end - outer.begin];
        Ok(Positions { slots, range })
    }

    /// Split into `[begin, at)` and `[at, end)`; `at` is clamped into the range.
    pub fn split_at(self, at: Position) -> (Positions<'a, T>, Positions<'a, T>) {
        let (head_range, tail_range) = self.range.split_at(at);
        let (head, tail) = self.slots.split_at_mut(head_range.len());
        (
            Positions {
                slots: head,
                range: head_range,
            },
            Positions {
                slots: tail,
                range: tail_range,
            },
        )
    }

    /// Split into consecutive views along the given chunk boundaries.
    ///
    /// `chunks` must be contiguous, increasing and cover exactly `self.range()`.
    pub fn split_chunks(self, chunks: &[PositionRange]) -> Vec<Positions<'a, T>> {
        let mut out = Vec::with_capacity(chunks.len());
        let mut rest = self.slots;
        for chunk in chunks {
            let (head, tail) = core::mem::take(&mut rest).split_at_mut(chunk.len());
            out.push(Positions {
                slots: head,
                range: *chunk,
            });
            rest = tail;
        }
        debug_assert!(rest.is_empty(), "chunks must cover the whole range");
        out
    }
}

// ============================================================================
// Range Source
// ============================================================================

/// Types that can expose their begin/end positions for dispatch.
pub trait RangeSource<T> {
    /// Extract the begin/end pair with mutable access to the addressed slots.
    fn positions(&mut self) -> Result<Positions<'_, T>, DispatchError>;
}

impl<T> RangeSource<T> for [T] {
    fn positions(&mut self) -> Result<Positions<'_, T>, DispatchError> {
        Ok(Positions::from_slice(self))
    }
}

impl<T, const N: usize> RangeSource<T> for [T; N] {
    fn positions(&mut self) -> Result<Positions<'_, T>, DispatchError> {
        Ok(Positions::from_slice(self.as_mut_slice()))
    }
}

impl<T> RangeSource<T> for Vec<T> {
    fn positions(&mut self) -> Result<Positions<'_, T>, DispatchError> {
        Ok(Positions::from_slice(self.as_mut_slice()))
    }
}

impl<T> RangeSource<T> for VecDeque<T> {
    fn positions(&mut self) -> Result<Positions<'_, T>, DispatchError> {
        Ok(Positions::from_slice(self.make_contiguous()))
    }
}

/// Contiguous one-dimensional arrays and views; strided views are rejected.
#[cfg(feature = "ndarray")]
impl<T, S> RangeSource<T> for ArrayBase<S, Ix1>
where
    S: DataMut<Elem = T>,
{
    fn positions(&mut self) -> Result<Positions<'_, T>, DispatchError> {
        let len = self.len();
        match self.as_slice_mut() {
            Some(slots) => Ok(Positions::from_slice(slots)),
            None => Err(DispatchError::InvalidRange {
                begin: 0,
                end: len,
                len: None,
            }),
        }
    }
}

impl<T, R> RangeSource<T> for &mut R
where
    R: RangeSource<T> + ?Sized,
{
    fn positions(&mut self) -> Result<Positions<'_, T>, DispatchError> {
        (**self).positions()
    }
}

/// Adapt a container into its begin/end positions.
pub fn adapt<T, S>(source: &mut S) -> Result<Positions<'_, T>, DispatchError>
where
    S: RangeSource<T> + ?Sized,
{
    source.positions()
}

// ============================================================================
// Subrange
// ============================================================================

/// An explicit `[begin, end)` window over another range source.
#[derive(Debug, Clone)]
pub struct Subrange<S> {
    source: S,
    range: PositionRange,
}

impl<S> Subrange<S> {
    /// Window `source` to `[begin, end)`.
    ///
    /// Fails immediately when `end < begin`; the bound against the source's
    /// length is checked when the subrange is adapted.
    pub fn new(source: S, begin: Position, end: Position) -> Result<Self, DispatchError> {
        let range = PositionRange::new(begin, end)?;
        Ok(Self { source, range })
    }

    /// The requested window.
    pub fn range(&self) -> PositionRange {
        self.range
    }

    /// Borrow the wrapped source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Recover the wrapped source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<T, S> RangeSource<T> for Subrange<S>
where
    S: RangeSource<T>,
{
    fn positions(&mut self) -> Result<Positions<'_, T>, DispatchError> {
        let range = self.range;
        self.source.positions()?.narrow(range)
    }
}
