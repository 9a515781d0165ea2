#![cfg(feature = "dev")]
//! Tests for the cycle counter abstraction.
//!
//! ## Test Organization
//!
//! 1. **Host Counter** - Detection and monotonic reads on the build target
//! 2. **Accelerator Counter** - Delegation to an attached clock
//! 3. **Unavailable Counter** - Capability reporting and zero reads
//! 4. **Arithmetic** - Elapsed ticks across a wrap

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dispatch::internals::hardware::counter::{
    AcceleratorClock, CounterSource, CycleCounter, cycles_between,
};
use dispatch::internals::hardware::timestamp::{CycleCount, HostInstruction, timestamp};
use dispatch::internals::primitives::errors::DispatchError;

/// Clock that advances by a fixed step on every read.
struct SteppingClock {
    ticks: AtomicU64,
    step: u64,
}

impl SteppingClock {
    fn starting_at(start: u64, step: u64) -> Arc<Self> {
        Arc::new(Self {
            ticks: AtomicU64::new(start),
            step,
        })
    }
}

impl AcceleratorClock for SteppingClock {
    fn timestamp(&self) -> CycleCount {
        self.ticks.fetch_add(self.step, Ordering::Relaxed)
    }

    fn name(&self) -> &str {
        "stepping"
    }
}

// ============================================================================
// Host Counter Tests
// ============================================================================

/// Test that detection matches the build target.
#[test]
fn test_host_detection_matches_target() {
    let detected = HostInstruction::detect();

    if cfg!(target_arch = "x86_64") {
        assert!(matches!(
            detected,
            Some(HostInstruction::Rdtscp | HostInstruction::Rdtsc)
        ));
    } else if cfg!(target_arch = "aarch64") {
        assert_eq!(detected, Some(HostInstruction::Cntvct));
    } else {
        assert_eq!(detected, None);
        assert!(timestamp().is_none());
    }

    // Detection is cached; a second call agrees.
    assert_eq!(HostInstruction::detect(), detected);
}

/// Test that consecutive reads on one thread never go backwards.
#[test]
fn test_host_reads_are_monotonic() {
    let counter = CycleCounter::detect();
    if !counter.is_available() {
        return;
    }

    let mut previous = counter.read();
    for _ in 0..10_000 {
        let current = counter.read();
        assert!(current >= previous, "counter went backwards: {previous} -> {current}");
        previous = current;
    }
}

/// Test that two back-to-back reads yield a small non-negative difference.
#[test]
fn test_host_back_to_back_reads() {
    let counter = CycleCounter::detect();
    let (Some(first), Some(second)) = (counter.try_read(), counter.try_read()) else {
        return;
    };
    assert!(second >= first);
    assert!(cycles_between(first, second) < 1 << 40);
}

/// Test that two back-to-back reads with the non-serializing sequence never go backwards.
#[cfg(target_arch = "x86_64")]
#[test]
fn test_rdtsc_back_to_back_reads() {
    assert!(!HostInstruction::Rdtsc.is_serializing());

    let first = HostInstruction::Rdtsc.read();
    let second = HostInstruction::Rdtsc.read();
    assert!(second >= first, "rdtsc went backwards: {first} -> {second}");
}

/// Test that the serializing sequence can be named directly whatever the CPU supports.
#[cfg(target_arch = "x86_64")]
#[test]
fn test_rdtscp_read_without_detection() {
    let first = HostInstruction::Rdtscp.read();
    let second = HostInstruction::Rdtscp.read();
    assert!(first > 0);
    assert!(second >= first);
}

/// Test that sequences foreign to the build target read as zero.
#[cfg(not(target_arch = "x86_64"))]
#[test]
fn test_foreign_sequences_read_zero() {
    assert_eq!(HostInstruction::Rdtsc.read(), 0);
    assert_eq!(HostInstruction::Rdtscp.read(), 0);
}

/// Test that the serializing flag follows the instruction.
#[test]
fn test_host_instruction_serializing() {
    assert!(HostInstruction::Rdtscp.is_serializing());
    assert!(HostInstruction::Cntvct.is_serializing());
    assert!(!HostInstruction::Rdtsc.is_serializing());
    assert_eq!(HostInstruction::Rdtscp.name(), "rdtscp");
}

// ============================================================================
// Accelerator Counter Tests
// ============================================================================

/// Test that an attached accelerator takes priority and receives every read.
#[test]
fn test_accelerator_delegation() {
    let clock = SteppingClock::starting_at(1_000, 5);
    let counter = CycleCounter::with_accelerator(clock.clone());

    assert!(matches!(counter.source(), CounterSource::Accelerator(_)));
    assert!(counter.is_available());
    assert_eq!(counter.read(), 1_000);
    assert_eq!(counter.read(), 1_005);
    assert_eq!(counter.try_read(), Some(1_010));
    assert_eq!(clock.ticks.load(Ordering::Relaxed), 1_015);
}

/// Test measuring a closure against an accelerator clock.
#[test]
fn test_accelerator_measure() {
    let counter = CycleCounter::with_accelerator(SteppingClock::starting_at(0, 250));
    let (value, elapsed) = counter.measure(|| 42);
    assert_eq!(value, 42);
    assert_eq!(elapsed, Some(250));
}

/// Test the debug rendering of an accelerator source.
#[test]
fn test_accelerator_debug_uses_name() {
    let counter = CycleCounter::with_accelerator(SteppingClock::starting_at(0, 1));
    assert_eq!(format!("{:?}", counter.source()), "Accelerator(\"stepping\")");
}

// ============================================================================
// Unavailable Counter Tests
// ============================================================================

/// Test that an unavailable counter reads zero and measures nothing.
#[test]
fn test_unavailable_counter() {
    let counter = CycleCounter::unavailable();
    assert!(!counter.is_available());
    assert_eq!(counter.read(), 0);
    assert_eq!(counter.try_read(), None);

    let (value, elapsed) = counter.measure(|| "done");
    assert_eq!(value, "done");
    assert_eq!(elapsed, None);
}

/// Test that requiring a counter reports the missing capability when absent.
#[test]
fn test_require_counter() {
    match CycleCounter::require() {
        Ok(counter) => assert!(counter.is_available()),
        Err(err) => assert_eq!(
            err,
            DispatchError::CapabilityUnavailable {
                capability: "cycle counter"
            }
        ),
    }
}

// ============================================================================
// Arithmetic Tests
// ============================================================================

/// Test that elapsed ticks stay correct across a counter wrap.
#[test]
fn test_cycles_between_wraps() {
    assert_eq!(cycles_between(10, 25), 15);
    assert_eq!(cycles_between(u64::MAX - 9, 90), 100);

    let counter = CycleCounter::with_accelerator(SteppingClock::starting_at(u64::MAX - 10, 100));
    let (_, elapsed) = counter.measure(|| ());
    assert_eq!(elapsed, Some(100));
}
