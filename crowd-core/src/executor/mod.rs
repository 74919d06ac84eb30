//! Fixed-size worker pool with ordered chunked distribution.
//!
//! A [`TaskPool`] owns its worker threads for its whole lifetime. Work is
//! queued on one shared FIFO guarded by a mutex; idle workers block on a
//! condition variable. Dropping the pool drains the queue, wakes every worker
//! and joins them, so no thread outlives the pool.
//!
//! The pool is constructed explicitly and passed to whatever needs it; there
//! is no process-wide instance.

mod error;
mod handle;
mod partition;
mod pool;

pub use self::{
    error::{PoolError, PoolErrorCode},
    handle::TaskHandle,
    pool::{DEFAULT_ITEMS_PER_WORKER, PoolConfig, TaskPool},
};

pub(crate) use self::partition::chunk_ranges;
