#![cfg(feature = "dev")]
//! Tests for the worker pool and parallel pass internals.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use dispatch::internals::engine::executor::DispatchConfig;
use dispatch::internals::hardware::counter::CycleCounter;
use dispatch::internals::primitives::operation::{Generate, TryGenerate};
use dispatch::internals::primitives::range::Positions;
use fastDispatch::internals::engine::executor::{parallel_pass, sequenced_pass};
use fastDispatch::internals::engine::pool::WorkerPool;
use fastDispatch::internals::engine::task::{TaskHandle, spawn_task};

// ============================================================================
// Worker Pool Tests
// ============================================================================

/// Test that a dedicated pool reports its size.
#[test]
fn test_dedicated_pool_size() {
    let pool = WorkerPool::dedicated(3).unwrap();
    assert!(pool.is_dedicated());
    assert_eq!(pool.workers(), 3);
    assert_eq!(pool.install(|| 5 + 5), 10);
}

/// Test that the shared pool plans for at least one worker.
#[test]
fn test_shared_pool() {
    let pool = WorkerPool::shared();
    assert!(!pool.is_dedicated());
    assert!(pool.workers() >= 1);
}

/// Test that spawned work runs.
#[test]
fn test_pool_spawn() {
    let pool = WorkerPool::dedicated(1).unwrap();
    let ran = Arc::new(AtomicBool::new(false));
    let handle = spawn_task(&pool, {
        let ran = ran.clone();
        move || {
            ran.store(true, Ordering::Release);
            Ok(17)
        }
    });
    assert_eq!(handle.wait(), Ok(17));
    assert!(ran.load(Ordering::Acquire));
}

// ============================================================================
// Parallel Pass Tests
// ============================================================================

/// Test the parallel pass over an offset view without a cycle counter.
#[test]
fn test_parallel_pass_without_counter() {
    let pool = WorkerPool::dedicated(4).unwrap();
    let config = DispatchConfig {
        counter: CycleCounter::unavailable(),
        ..DispatchConfig::default()
    };
    let calls = Arc::new(AtomicUsize::new(0));

    let mut data = vec![0u16; 333];
    let positions = Positions::new(&mut data, 40).unwrap();
    let end = parallel_pass(&pool, &config, positions, &mut Generate({
        let calls = calls.clone();
        move || {
            calls.fetch_add(1, Ordering::Relaxed);
            1u16
        }
    }))
    .unwrap();

    assert_eq!(end, 373);
    assert_eq!(calls.load(Ordering::Relaxed), 333);
    assert!(data.iter().all(|&v| v == 1));
}

/// Test that a failure reports its absolute position.
#[test]
fn test_parallel_pass_absolute_failure_position() {
    let pool = WorkerPool::dedicated(1).unwrap();
    let config = DispatchConfig {
        chunk_size: Some(1_000),
        ..DispatchConfig::default()
    };
    let calls = Arc::new(AtomicUsize::new(0));

    let mut data = vec![0u8; 100];
    let positions = Positions::new(&mut data, 500).unwrap();
    let err = parallel_pass(&pool, &config, positions, &mut TryGenerate({
        let calls = calls.clone();
        move || {
            if calls.fetch_add(1, Ordering::Relaxed) == 10 { Err("late") } else { Ok(1u8) }
        }
    }))
    .unwrap_err();

    assert_eq!(err.position(), Some(510));
}

/// Test the sequenced pass helper.
#[test]
fn test_sequenced_pass() {
    let mut data = [0i8; 4];
    let end = sequenced_pass(Positions::from_slice(&mut data), &mut Generate(|| -1i8)).unwrap();
    assert_eq!(end, 4);
    assert_eq!(data, [-1; 4]);
}

// ============================================================================
// Task Handle Tests
// ============================================================================

/// Test an already-completed handle.
#[test]
fn test_ready_handle() {
    let mut handle = TaskHandle::ready(Ok("done"));
    assert_eq!(handle.try_take(), Some(Ok("done")));
}
