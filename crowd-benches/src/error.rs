//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! setup functions can propagate failures with `?`.

use crowd_core::{CrowdError, GraphError, PoolError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph construction failed.
    #[error("synthetic graph construction failed: {0}")]
    Graph(#[from] GraphError),
    /// An observer query or scan failed.
    #[error("observer query failed: {0}")]
    Crowd(#[from] CrowdError),
    /// The task pool could not be started.
    #[error("task pool failed: {0}")]
    Pool(#[from] PoolError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
