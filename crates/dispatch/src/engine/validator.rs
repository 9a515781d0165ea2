//! Validation for dispatch configuration and range arguments.
//!
//! ## Purpose
//!
//! This module checks builder parameters and the position counts passed to
//! counted algorithms before any position is touched.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Side-effect free**: Validators only inspect their arguments.
//!
//! ## Non-goals
//!
//! * This module does not check ranges against their sources (handled by the range adapter).

// Internal dependencies
use crate::hardware::timestamp::CycleCount;
use crate::primitives::errors::DispatchError;
use crate::primitives::range::PositionRange;

/// Validation utility for dispatch configuration.
///
/// All methods return `Result<_, DispatchError>` and fail upon the first
/// violation.
pub struct Validator;

impl Validator {
    /// Validate the size of a dedicated worker pool.
    pub fn validate_workers(workers: usize) -> Result<(), DispatchError> {
        if workers == 0 {
            return Err(DispatchError::InvalidWorkers(workers));
        }
        Ok(())
    }

    /// Validate a fixed chunk size.
    pub fn validate_chunk_size(chunk_size: usize) -> Result<(), DispatchError> {
        if chunk_size == 0 {
            return Err(DispatchError::InvalidChunkSize(chunk_size));
        }
        Ok(())
    }

    /// Validate the minimum per-chunk cost.
    pub fn validate_target_cycles(cycles: CycleCount) -> Result<(), DispatchError> {
        if cycles == 0 {
            return Err(DispatchError::InvalidTargetCycles(cycles));
        }
        Ok(())
    }

    /// Validate that no builder parameter was set twice.
    pub fn validate_no_duplicates(duplicate: Option<&'static str>) -> Result<(), DispatchError> {
        match duplicate {
            Some(parameter) => Err(DispatchError::DuplicateParameter { parameter }),
            None => Ok(()),
        }
    }

    /// Validate a position count against a range and return the counted prefix.
    pub fn validate_count(
        range: PositionRange,
        count: usize,
    ) -> Result<PositionRange, DispatchError> {
        if count > range.len() {
            return Err(DispatchError::InvalidRange {
                begin: range.begin(),
                end: range.begin().saturating_add(count),
                len: Some(range.end()),
            });
        }
        Ok(range.split_at(range.begin() + count).0)
    }
}
