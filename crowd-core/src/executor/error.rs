//! Failures reported by the task pool.

use thiserror::Error;

/// Errors raised while spawning workers or collecting task results.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum PoolError {
    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker {worker}: {message}")]
    Spawn {
        /// Index of the worker that could not be started.
        worker: usize,
        /// Message reported by the operating system.
        message: String,
    },
    /// A task panicked while running on a worker.
    #[error("task panicked: {message}")]
    TaskPanicked {
        /// Panic payload rendered as text when it was a string.
        message: String,
    },
    /// The task was dropped before it produced a result.
    #[error("task result was lost before completion")]
    ResultLost,
}

impl PoolError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> PoolErrorCode {
        match self {
            Self::Spawn { .. } => PoolErrorCode::Spawn,
            Self::TaskPanicked { .. } => PoolErrorCode::TaskPanicked,
            Self::ResultLost => PoolErrorCode::ResultLost,
        }
    }
}

/// Machine-readable error codes for [`PoolError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum PoolErrorCode {
    /// The operating system refused to start a worker thread.
    Spawn,
    /// A task panicked while running on a worker.
    TaskPanicked,
    /// The task was dropped before it produced a result.
    ResultLost,
}

impl PoolErrorCode {
    /// Returns the symbolic identifier for logging and metrics surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spawn => "POOL_SPAWN",
            Self::TaskPanicked => "POOL_TASK_PANICKED",
            Self::ResultLost => "POOL_RESULT_LOST",
        }
    }
}
