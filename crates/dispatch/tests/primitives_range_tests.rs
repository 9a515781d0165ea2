#![cfg(feature = "dev")]
//! Tests for position ranges and the range adapter.
//!
//! ## Test Organization
//!
//! 1. **PositionRange** - Construction, length, splitting
//! 2. **Positions** - Narrowing and chunk splitting over real slots
//! 3. **Range Sources** - Slices, arrays, vectors, deques, references, subranges

use std::collections::VecDeque;

use dispatch::internals::primitives::errors::DispatchError;
use dispatch::internals::primitives::range::{
    PositionRange, Positions, RangeSource, Subrange, adapt,
};

// ============================================================================
// PositionRange Tests
// ============================================================================

/// Test that a well-formed range reports its bounds and length.
#[test]
fn test_position_range_basic() {
    let range = PositionRange::new(3, 10).unwrap();
    assert_eq!(range.begin(), 3);
    assert_eq!(range.end(), 10);
    assert_eq!(range.len(), 7);
    assert!(!range.is_empty());
    assert_eq!(std::ops::Range::from(range), 3..10);
}

/// Test that `end < begin` is rejected without consulting any source.
#[test]
fn test_position_range_rejects_reversed_bounds() {
    let err = PositionRange::new(5, 2).unwrap_err();
    assert_eq!(
        err,
        DispatchError::InvalidRange {
            begin: 5,
            end: 2,
            len: None
        }
    );
}

/// Test that `begin == end` is a valid, empty range.
#[test]
fn test_position_range_empty() {
    let range = PositionRange::new(4, 4).unwrap();
    assert!(range.is_empty());
    assert_eq!(range, PositionRange::empty_at(4));
}

/// Test that split points outside the range are clamped.
#[test]
fn test_position_range_split_clamps() {
    let range = PositionRange::new(10, 20).unwrap();

    let (head, tail) = range.split_at(14);
    assert_eq!((head.begin(), head.end()), (10, 14));
    assert_eq!((tail.begin(), tail.end()), (14, 20));

    let (head, tail) = range.split_at(50);
    assert_eq!(head, range);
    assert!(tail.is_empty());

    let (head, tail) = range.split_at(0);
    assert!(head.is_empty());
    assert_eq!(tail, range);
}

// ============================================================================
// Positions Tests
// ============================================================================

/// Test narrowing a view to an inner window.
#[test]
fn test_positions_narrow() {
    let mut data = [0, 1, 2, 3, 4, 5];
    let positions = Positions::from_slice(&mut data);
    let mut inner = positions.narrow(PositionRange::new(2, 5).unwrap()).unwrap();

    assert_eq!(inner.range(), PositionRange::new(2, 5).unwrap());
    assert_eq!(inner.slots(), &mut [2, 3, 4]);
}

/// Test that narrowing past the end reports the source length.
#[test]
fn test_positions_narrow_out_of_bounds() {
    let mut data = [0u8; 4];
    let positions = Positions::from_slice(&mut data);
    let err = positions
        .narrow(PositionRange::new(2, 9).unwrap())
        .unwrap_err();

    assert_eq!(
        err,
        DispatchError::InvalidRange {
            begin: 2,
            end: 9,
            len: Some(4)
        }
    );
}

/// Test splitting a view along planned chunk boundaries.
#[test]
fn test_positions_split_chunks() {
    let mut data: Vec<usize> = vec![0; 10];
    let bounds = [
        PositionRange::new(0, 4).unwrap(),
        PositionRange::new(4, 8).unwrap(),
        PositionRange::new(8, 10).unwrap(),
    ];

    let chunks = Positions::from_slice(&mut data).split_chunks(&bounds);
    assert_eq!(chunks.len(), 3);

    for (index, chunk) in chunks.into_iter().enumerate() {
        assert_eq!(chunk.range(), bounds[index]);
        let (slots, _) = chunk.into_parts();
        slots.fill(index + 1);
    }

    assert_eq!(data, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3]);
}

/// Test that splitting a view keeps absolute positions.
#[test]
fn test_positions_split_at_keeps_numbering() {
    let mut data = [0u32; 6];
    let positions = Positions::new(&mut data, 100).unwrap();
    let (head, tail) = positions.split_at(102);

    assert_eq!(head.range(), PositionRange::new(100, 102).unwrap());
    assert_eq!(tail.range(), PositionRange::new(102, 106).unwrap());
}

/// Test that numbering past the largest position is rejected.
#[test]
fn test_positions_overflowing_begin_rejected() {
    let mut data = [0u8; 4];
    let err = Positions::new(&mut data, usize::MAX - 2).unwrap_err();
    assert_eq!(
        err,
        DispatchError::InvalidRange {
            begin: usize::MAX - 2,
            end: usize::MAX,
            len: Some(4)
        }
    );

    let fits = Positions::new(&mut data, usize::MAX - 4).unwrap();
    assert_eq!(fits.range().end(), usize::MAX);
}

// ============================================================================
// Range Source Tests
// ============================================================================

/// Test the standard containers as range sources.
#[test]
fn test_range_sources_standard_containers() {
    let mut vec = vec![1.0f64; 5];
    assert_eq!(adapt(&mut vec).unwrap().range().len(), 5);

    let mut array = [0i32; 3];
    assert_eq!(adapt(&mut array).unwrap().range().len(), 3);

    let slice: &mut [i32] = &mut array[..2];
    assert_eq!(adapt(slice).unwrap().range().len(), 2);

    let mut empty: Vec<u8> = Vec::new();
    assert!(adapt(&mut empty).unwrap().range().is_empty());
}

/// Test that a wrapped deque is adapted in logical order.
#[test]
fn test_range_source_vecdeque_logical_order() {
    let mut deque: VecDeque<u32> = VecDeque::with_capacity(4);
    deque.extend([3, 4]);
    deque.push_front(2);
    deque.push_front(1);

    let positions = adapt(&mut deque).unwrap();
    assert_eq!(positions.range(), PositionRange::new(0, 4).unwrap());
    let (slots, _) = positions.into_parts();
    assert_eq!(slots.to_vec(), vec![1, 2, 3, 4]);
}

/// Test that a mutable reference adapts like the container it points to.
#[test]
fn test_range_source_through_reference() {
    let mut data = vec![0u16; 7];
    let mut reference = &mut data;
    let positions = RangeSource::<u16>::positions(&mut reference).unwrap();
    assert_eq!(positions.range(), PositionRange::new(0, 7).unwrap());
}

/// Test that a subrange exposes absolute positions of its window.
#[test]
fn test_subrange_window() {
    let mut data = vec![0; 10];
    let mut window = Subrange::new(&mut data, 2, 6).unwrap();
    {
        let positions = adapt(&mut window).unwrap();
        assert_eq!(positions.range(), PositionRange::new(2, 6).unwrap());
        let (slots, _) = positions.into_parts();
        slots.fill(9);
    }
    assert_eq!(window.range().len(), 4);
    assert_eq!(data, vec![0, 0, 9, 9, 9, 9, 0, 0, 0, 0]);
}

/// Test that a subrange beyond the source fails only when adapted.
#[test]
fn test_subrange_bounds_checked_on_adapt() {
    let mut data = vec![0; 3];
    let mut window = Subrange::new(&mut data, 1, 8).expect("begin <= end is accepted");
    let err = adapt(&mut window).unwrap_err();
    assert_eq!(
        err,
        DispatchError::InvalidRange {
            begin: 1,
            end: 8,
            len: Some(3)
        }
    );
}

/// Test that a reversed subrange is rejected immediately.
#[test]
fn test_subrange_reversed_rejected() {
    let data = vec![0; 3];
    assert!(matches!(
        Subrange::new(data, 2, 1),
        Err(DispatchError::InvalidRange { len: None, .. })
    ));
}
