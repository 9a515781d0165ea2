//! Per-target instruction sequences for reading the host tick counter.
//!
//! ## Purpose
//!
//! This module isolates every architecture-specific counter read behind the
//! [`HostInstruction`] enum. Exactly one `arch` implementation is compiled per
//! build target; targets without a known sequence compile the explicit
//! "unavailable" implementation instead of failing the build.
//!
//! ## Design notes
//!
//! * **x86_64**: `rdtscp` when CPUID leaf `0x8000_0001` advertises it, plain `rdtsc` otherwise.
//! * **aarch64**: `isb` followed by `mrs cntvct_el0`; the virtual counter is always present.
//! * **Other targets**: No sequence; detection returns `None`.
//! * **Caching**: Detection runs once per process and is stored in an atomic byte.
//!
//! ## Invariants
//!
//! * Reads never allocate, block, or take locks.
//! * Two reads on the same logical core within one wrap epoch are non-decreasing.
//!
//! ## Non-goals
//!
//! * This module does not calibrate ticks against wall-clock time.
//! * This module does not guarantee precision on virtualised or frequency-scaled hardware.

// External dependencies
use core::sync::atomic::{AtomicU8, Ordering};

/// A raw tick count.
pub type CycleCount = u64;

// ============================================================================
// Host Instruction
// ============================================================================

/// Instruction sequence used to read the host tick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostInstruction {
    /// `rdtscp` on x86_64; waits for earlier instructions to retire.
    Rdtscp,

    /// `rdtsc` on x86_64; may be reordered with surrounding instructions.
    Rdtsc,

    /// `isb; mrs cntvct_el0` on aarch64.
    Cntvct,
}

impl HostInstruction {
    /// Whether the sequence orders itself after preceding instructions.
    pub const fn is_serializing(self) -> bool {
        !matches!(self, Self::Rdtsc)
    }

    /// Mnemonic of the sequence.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rdtscp => "rdtscp",
            Self::Rdtsc => "rdtsc",
            Self::Cntvct => "cntvct_el0",
        }
    }

    /// Most precise sequence available on this build target and CPU.
    pub fn detect() -> Option<Self> {
        match DETECTED.load(Ordering::Relaxed) {
            UNKNOWN => {
                let found = arch::detect();
                DETECTED.store(encode(found), Ordering::Relaxed);
                found
            }
            code => decode(code),
        }
    }

    /// Read the counter with this sequence.
    ///
    /// `Rdtscp` on a CPU without it reads with `rdtsc` instead. A sequence
    /// foreign to the build target reads as `0`; such values are never
    /// produced by [`HostInstruction::detect`].
    #[inline]
    pub fn read(self) -> CycleCount {
        match self {
            #[cfg(target_arch = "x86_64")]
            Self::Rdtscp if Self::detect() == Some(Self::Rdtscp) => arch::rdtscp(),
            #[cfg(target_arch = "x86_64")]
            Self::Rdtscp => arch::rdtsc(),
            #[cfg(target_arch = "x86_64")]
            Self::Rdtsc => arch::rdtsc(),
            #[cfg(target_arch = "aarch64")]
            Self::Cntvct => arch::cntvct(),
            #[allow(unreachable_patterns)]
            _ => 0,
        }
    }
}

/// Read the host counter with the detected sequence, if the target has one.
#[inline]
pub fn timestamp() -> Option<CycleCount> {
    HostInstruction::detect().map(HostInstruction::read)
}

// ============================================================================
// Detection Cache
// ============================================================================

const UNKNOWN: u8 = 0;
const ABSENT: u8 = 1;

static DETECTED: AtomicU8 = AtomicU8::new(UNKNOWN);

fn encode(found: Option<HostInstruction>) -> u8 {
    match found {
        None => ABSENT,
        Some(HostInstruction::Rdtscp) => 2,
        Some(HostInstruction::Rdtsc) => 3,
        Some(HostInstruction::Cntvct) => 4,
    }
}

fn decode(code: u8) -> Option<HostInstruction> {
    match code {
        2 => Some(HostInstruction::Rdtscp),
        3 => Some(HostInstruction::Rdtsc),
        4 => Some(HostInstruction::Cntvct),
        _ => None,
    }
}

// ============================================================================
// Architecture Implementations
// ============================================================================

#[cfg(target_arch = "x86_64")]
mod arch {
    use super::{CycleCount, HostInstruction};
    use core::arch::x86_64::{__cpuid, __rdtscp, _rdtsc};

    const EXTENDED_FEATURES: u32 = 0x8000_0001;
    const RDTSCP_BIT: u32 = 1 << 27;

    #[allow(unused_unsafe)]
    pub(super) fn detect() -> Option<HostInstruction> {
        // SAFETY: cpuid is available on every x86_64 processor.
        let max_extended = unsafe { __cpuid(0x8000_0000) }.eax;
        if max_extended >= EXTENDED_FEATURES {
            let edx = unsafe { __cpuid(EXTENDED_FEATURES) }.edx;
            if edx & RDTSCP_BIT != 0 {
                return Some(HostInstruction::Rdtscp);
            }
        }
        Some(HostInstruction::Rdtsc)
    }

    /// Callers must have seen `detect()` return `Rdtscp`.
    #[inline]
    #[allow(unused_unsafe)]
    pub(super) fn rdtscp() -> CycleCount {
        let mut aux = 0u32;
        // SAFETY: `HostInstruction::read` only calls this once the cached
        // CPUID probe has reported rdtscp support.
        unsafe { __rdtscp(&mut aux) }
    }

    #[inline]
    #[allow(unused_unsafe)]
    pub(super) fn rdtsc() -> CycleCount {
        // SAFETY: rdtsc is available on every x86_64 processor.
        unsafe { _rdtsc() }
    }
}

#[cfg(target_arch = "aarch64")]
mod arch {
    use super::{CycleCount, HostInstruction};

    pub(super) fn detect() -> Option<HostInstruction> {
        Some(HostInstruction::Cntvct)
    }

    #[inline]
    pub(super) fn cntvct() -> CycleCount {
        let value: u64;
        // SAFETY: cntvct_el0 is readable from EL0 on every supported OS.
        unsafe {
            core::arch::asm!(
                "isb",
                "mrs {value}, cntvct_el0",
                value = out(reg) value,
                options(nostack, preserves_flags),
            );
        }
        value
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
mod arch {
    use super::HostInstruction;

    pub(super) fn detect() -> Option<HostInstruction> {
        None
    }
}
