#![cfg(feature = "dev")]
//! Tests for the execution policy taxonomy and result shapes.
//!
//! ## Test Organization
//!
//! 1. **Markers** - Associated constants of each policy type
//! 2. **PolicyKind** - Axes, names, parsing
//! 3. **Result Shapes** - Static policy to shape mapping

use dispatch::internals::policy::resolver::ResultShape;
use dispatch::internals::policy::taxonomy::{
    ExecutionPolicy, Parallel, ParallelTask, PolicyKind, Sequenced, SequencedTask,
};
use dispatch::internals::primitives::errors::DispatchError;

// ============================================================================
// Marker Tests
// ============================================================================

/// Test the constants carried by each marker type.
#[test]
fn test_marker_constants() {
    assert!(!Sequenced::IS_PARALLEL && !Sequenced::IS_TASK);
    assert!(Parallel::IS_PARALLEL && !Parallel::IS_TASK);
    assert!(!SequencedTask::IS_PARALLEL && SequencedTask::IS_TASK);
    assert!(ParallelTask::IS_PARALLEL && ParallelTask::IS_TASK);

    assert_eq!(Sequenced.kind(), PolicyKind::Sequenced);
    assert_eq!(ParallelTask.kind(), PolicyKind::ParallelTask);
}

/// Test converting blocking markers to their task variants.
#[test]
fn test_marker_task_variants() {
    assert_eq!(Sequenced.task(), SequencedTask);
    assert_eq!(Parallel.task(), ParallelTask);
}

// ============================================================================
// PolicyKind Tests
// ============================================================================

/// Test that every combination of axes maps to exactly one policy.
#[test]
fn test_policy_kind_axes_round_trip() {
    for kind in PolicyKind::ALL {
        assert_eq!(PolicyKind::from_axes(kind.is_parallel(), kind.is_task()), kind);
    }
}

/// Test parsing canonical and long policy names.
#[test]
fn test_policy_kind_parse() {
    assert_eq!("seq".parse::<PolicyKind>(), Ok(PolicyKind::Sequenced));
    assert_eq!("par".parse::<PolicyKind>(), Ok(PolicyKind::Parallel));
    assert_eq!("seq_task".parse::<PolicyKind>(), Ok(PolicyKind::SequencedTask));
    assert_eq!("parallel_task".parse::<PolicyKind>(), Ok(PolicyKind::ParallelTask));

    for kind in PolicyKind::ALL {
        assert_eq!(kind.to_string().parse::<PolicyKind>(), Ok(kind));
    }
}

/// Test that an unknown tag is reported as a policy mismatch.
#[test]
fn test_policy_kind_parse_unknown() {
    let err = "vectorized".parse::<PolicyKind>().unwrap_err();
    assert_eq!(err, DispatchError::PolicyMismatch("vectorized".to_string()));
    assert!(err.to_string().contains("vectorized"));
}

// ============================================================================
// Result Shape Tests
// ============================================================================

/// Test that blocking policies return directly and task policies defer.
#[test]
fn test_result_shapes() {
    assert_eq!(Sequenced::SHAPE, ResultShape::Direct);
    assert_eq!(Parallel::SHAPE, ResultShape::Direct);
    assert_eq!(SequencedTask::SHAPE, ResultShape::Deferred);
    assert_eq!(ParallelTask::SHAPE, ResultShape::Deferred);

    for kind in PolicyKind::ALL {
        let expected = if kind.is_task() {
            ResultShape::Deferred
        } else {
            ResultShape::Direct
        };
        assert_eq!(kind.result_shape(), expected);
    }
}

/// Test that the shape mapping is usable in constant context.
#[test]
fn test_result_shape_is_const() {
    const SHAPE: ResultShape = PolicyKind::ParallelTask.result_shape();
    assert_eq!(SHAPE, ResultShape::Deferred);
}
