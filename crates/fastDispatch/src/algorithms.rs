//! Generation algorithms on the process-wide dispatcher.
//!
//! ## Purpose
//!
//! This module provides free-function spellings of the [`Dispatcher`]
//! algorithms. They run on [`Dispatcher::global`]: rayon's global pool with
//! the detected cycle counter and default chunking.
//!
//! ## Key concepts
//!
//! * **Policy first**: Every algorithm takes the execution policy as its first argument.
//! * **Return shape**: Blocking policies return the range end; task policies return a handle.
//!
//! ## Invariants
//!
//! * The operation is invoked exactly once per position when no failure occurs.
//!
//! ## Non-goals
//!
//! * This module does not configure pools; build a [`Dispatcher`] for that.

// Export dependencies from dispatch crate
use dispatch::internals::primitives::operation::{Generate, TryGenerate};

// Internal dependencies
use crate::api::Dispatcher;
use crate::engine::resolver::PolicyDispatch;

/// Assign `f()` to every position of `range` under `policy`.
///
/// ```rust
/// use fastDispatch::prelude::*;
///
/// let mut values = vec![0; 10];
/// let end = generate(Sequenced, &mut values, || 7)?;
/// assert_eq!(end, 10);
/// assert!(values.iter().all(|&v| v == 7));
/// # Result::<(), DispatchError>::Ok(())
/// ```
pub fn generate<P, S, T, F>(policy: P, range: S, f: F) -> P::Output
where
    P: PolicyDispatch<S, T, Generate<F>>,
    F: FnMut() -> T,
{
    Dispatcher::global().generate(policy, range, f)
}

/// Assign `f()` to every position of `range`, stopping on the first failure.
///
/// ```rust
/// use fastDispatch::prelude::*;
///
/// let mut values = vec![0u32; 4];
/// let mut calls = 0;
/// let result = try_generate(Sequenced, &mut values, || {
///     calls += 1;
///     if calls == 3 { Err("exhausted") } else { Ok(calls) }
/// });
/// assert_eq!(result.unwrap_err().position(), Some(2));
/// assert_eq!(values, [1, 2, 0, 0]);
/// ```
pub fn try_generate<P, S, T, E, F>(policy: P, range: S, f: F) -> P::Output
where
    P: PolicyDispatch<S, T, TryGenerate<F>>,
    F: FnMut() -> Result<T, E>,
{
    Dispatcher::global().try_generate(policy, range, f)
}

/// Assign `f()` to the first `count` positions of `range`.
pub fn generate_n<P, S, T, F>(policy: P, range: S, count: usize, f: F) -> P::Output
where
    P: PolicyDispatch<S, T, Generate<F>>,
    F: FnMut() -> T,
{
    Dispatcher::global().generate_n(policy, range, count, f)
}
