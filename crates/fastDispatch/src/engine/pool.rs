//! Worker pool backing the parallel and task policies.
//!
//! ## Purpose
//!
//! This module wraps the pool that chunk work and tasks are submitted to:
//! either rayon's global pool or a dedicated `rayon::ThreadPool` sized by the
//! `workers` configuration.
//!
//! ## Design notes
//!
//! * **Shared by default**: Without a `workers` setting, work runs on rayon's global pool.
//! * **Cheap clones**: A dedicated pool is held in an `Arc` and shared by every clone.
//! * **Fallback**: Without the `cpu` feature, chunks run on the calling thread and
//!   tasks on a plain `std::thread`.
//!
//! ## Non-goals
//!
//! * This module does not decide chunk sizes (handled by the core planner).
//! * This module does not catch panics of submitted work (handled by `task`).

// Feature-gated imports
#[cfg(feature = "cpu")]
use std::sync::Arc;

// Export dependencies from dispatch crate
use dispatch::internals::primitives::errors::DispatchError;

/// Handle to the pool that executes chunks and tasks.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    /// Dedicated pool; `None` uses rayon's global pool.
    #[cfg(feature = "cpu")]
    pool: Option<Arc<rayon::ThreadPool>>,

    /// Worker count used for planning when rayon is unavailable.
    #[cfg(not(feature = "cpu"))]
    workers: usize,
}

#[cfg(feature = "cpu")]
impl WorkerPool {
    /// Use rayon's global pool.
    pub fn shared() -> Self {
        Self { pool: None }
    }

    /// Build a dedicated pool of `workers` threads.
    pub fn dedicated(workers: usize) -> Result<Self, DispatchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("dispatch-worker-{index}"))
            .panic_handler(|_| log::error!("dispatch worker panicked outside a task"))
            .build()
            .map_err(|err| DispatchError::WorkerPool(err.to_string()))?;
        log::debug!("built dedicated pool with {workers} workers");
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    /// Number of workers chunks are planned for.
    pub fn workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Whether this handle owns a dedicated pool.
    pub fn is_dedicated(&self) -> bool {
        self.pool.is_some()
    }

    /// Run `op` inside the pool and wait for it.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Submit `job` to the pool without waiting.
    pub fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match &self.pool {
            Some(pool) => pool.spawn(job),
            None => rayon::spawn(job),
        }
    }
}

#[cfg(not(feature = "cpu"))]
impl WorkerPool {
    /// Use one worker per available core.
    pub fn shared() -> Self {
        let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
        Self { workers }
    }

    /// Plan for `workers` workers.
    pub fn dedicated(workers: usize) -> Result<Self, DispatchError> {
        Ok(Self { workers })
    }

    /// Number of workers chunks are planned for.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Whether this handle owns a dedicated pool.
    pub fn is_dedicated(&self) -> bool {
        false
    }

    /// Run `op` on the calling thread.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        op()
    }

    /// Run `job` on a detached thread.
    pub fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        std::thread::spawn(job);
    }
}
