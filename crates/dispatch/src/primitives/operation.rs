//! Operation handles invoked once per position.
//!
//! ## Purpose
//!
//! This module defines [`Operation`], the zero-argument callable a dispatch
//! invokes at every position, and the two closure adapters that implement it.
//!
//! ## Design notes
//!
//! * **Named adapters**: `Generate` and `TryGenerate` give closures a nameable type for policy bounds.
//! * **Duplicable**: Parallel policies require `Clone + Send + Sync`; each worker invokes its own clone.
//!
//! ## Invariants
//!
//! * `invoke` is called exactly once per visited position.
//!
//! ## Non-goals
//!
//! * This module does not guard state shared between clones (caller's responsibility).

// External dependencies
use core::convert::Infallible;
use core::fmt::Display;

/// A zero-argument callable producing the value assigned at a position.
pub trait Operation<T> {
    /// Failure raised by the operation.
    type Error: Display;

    /// Produce the value for the next position.
    fn invoke(&mut self) -> Result<T, Self::Error>;
}

/// Adapter for closures that always succeed.
#[derive(Debug, Clone, Copy)]
pub struct Generate<F>(pub F);

impl<T, F> Operation<T> for Generate<F>
where
    F: FnMut() -> T,
{
    type Error = Infallible;

    #[inline]
    fn invoke(&mut self) -> Result<T, Infallible> {
        Ok((self.0)())
    }
}

/// Adapter for closures that may fail.
#[derive(Debug, Clone, Copy)]
pub struct TryGenerate<F>(pub F);

impl<T, E, F> Operation<T> for TryGenerate<F>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    type Error = E;

    #[inline]
    fn invoke(&mut self) -> Result<T, E> {
        (self.0)()
    }
}
