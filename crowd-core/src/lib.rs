//! Crowd core library: `(m, k)`-observer detection over directed and
//! undirected graphs, plus the worker pool used for whole-graph passes.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod batch;
mod builder;
#[cfg(feature = "cache")]
mod cache;
mod clique;
mod error;
mod executor;
mod graph;
mod independence;
mod observer;
mod prune;
#[cfg(test)]
mod test_utils;

#[cfg(feature = "cache")]
pub use crate::cache::PathCacheConfig;
pub use crate::{
    batch::scan_observers,
    builder::{CrowdBuilder, EdgeWeighting},
    clique::{CliqueId, CliqueRegistry},
    error::{CrowdError, CrowdErrorCode, GraphError, GraphErrorCode, Result},
    executor::{
        DEFAULT_ITEMS_PER_WORKER, PoolConfig, PoolError, PoolErrorCode, TaskHandle, TaskPool,
    },
    graph::{Direction, Edge, Graph, GraphBuilder, GraphSource, PathLength, PathMetric},
    independence::is_independent,
    observer::{Crowd, ObserverParams},
    prune::{PruneConfig, PruneOutcome, prune},
};
