//! Whole-graph observer scans over a [`TaskPool`].

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    Result,
    executor::TaskPool,
    graph::GraphSource,
    observer::{Crowd, ObserverParams},
};

/// Returns every observer in the graph wrapped by `crowd`, in ascending order.
///
/// The vertex range is split over the pool; small graphs run inline on the
/// calling thread.
///
/// # Errors
/// Returns the first failure in vertex order, either from an observer
/// evaluation or from the pool.
///
/// # Examples
/// ```
/// use std::{num::NonZeroUsize, sync::Arc};
///
/// use crowd_core::{CrowdBuilder, Direction, GraphBuilder, ObserverParams, TaskPool, scan_observers};
///
/// let mut graph = GraphBuilder::new(4, Direction::Undirected);
/// graph.add_edge(0, 1).add_edge(1, 2).add_edge(2, 3);
/// let crowd = Arc::new(CrowdBuilder::new().build(graph.build()?));
/// let pool = TaskPool::with_workers(NonZeroUsize::new(2).expect("non-zero"))?;
///
/// let observers = scan_observers(&pool, &crowd, ObserverParams::new(3, 2)?)?;
/// assert_eq!(observers, vec![1, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.scan_observers",
    err,
    skip(pool, crowd),
    fields(graph = %crowd.name(), vertices = crowd.vertex_count()),
)]
pub fn scan_observers<G>(
    pool: &TaskPool,
    crowd: &Arc<Crowd<G>>,
    params: ObserverParams,
) -> Result<Vec<usize>>
where
    G: GraphSource + Send + Sync + 'static,
{
    let chunks = pool.try_distribute_graph(Arc::clone(crowd), move |crowd, range| {
        range
            .filter_map(|vertex| match crowd.is_observer(vertex, params) {
                Ok(true) => Some(Ok(vertex)),
                Ok(false) => None,
                Err(error) => Some(Err(error)),
            })
            .collect::<Result<Vec<_>>>()
    })?;
    let observers: Vec<usize> = chunks.into_iter().flatten().collect();
    info!(observers = observers.len(), "observer scan complete");
    Ok(observers)
}

