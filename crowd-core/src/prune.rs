//! Iterative low-degree pruning.
//!
//! Removing a vertex lowers its neighbours' degrees, so culling repeats until
//! every surviving vertex meets the threshold.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    Result,
    error::CrowdError,
    executor::TaskPool,
    graph::{Graph, GraphSource},
};

/// Thresholds applied by [`prune`].
///
/// # Examples
/// ```
/// use crowd_core::PruneConfig;
///
/// let config = PruneConfig::default().with_min_degree(3);
/// assert_eq!(config.min_degree(), 3);
/// assert_eq!(config.min_edge_weight(), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PruneConfig {
    min_degree: usize,
    min_edge_weight: f64,
}

impl PruneConfig {
    /// Default minimum total degree a vertex must keep.
    pub const DEFAULT_MIN_DEGREE: usize = 2;
    /// Default minimum weight an edge must carry.
    pub const DEFAULT_MIN_EDGE_WEIGHT: f64 = 1.0;

    /// Creates a configuration with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum total degree (in plus out, self-loops ignored).
    #[must_use]
    pub fn with_min_degree(mut self, min_degree: usize) -> Self {
        self.min_degree = min_degree;
        self
    }

    /// Sets the minimum edge weight. Unweighted edges weigh `1.0`.
    #[must_use]
    pub fn with_min_edge_weight(mut self, min_edge_weight: f64) -> Self {
        self.min_edge_weight = min_edge_weight;
        self
    }

    /// Returns the minimum total degree.
    #[must_use]
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Returns the minimum edge weight.
    #[must_use]
    pub fn min_edge_weight(&self) -> f64 {
        self.min_edge_weight
    }
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            min_degree: Self::DEFAULT_MIN_DEGREE,
            min_edge_weight: Self::DEFAULT_MIN_EDGE_WEIGHT,
        }
    }
}

/// Result of [`prune`].
#[derive(Clone, Debug)]
pub struct PruneOutcome {
    graph: Graph,
    retained: Vec<usize>,
    iterations: usize,
}

impl PruneOutcome {
    /// Returns the pruned graph. Its vertex ids are dense.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Maps each vertex of the pruned graph to its id in the input graph.
    #[must_use]
    pub fn retained(&self) -> &[usize] {
        &self.retained
    }

    /// Returns how many culling rounds removed at least one vertex.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Splits the outcome into the graph and the retained-id mapping.
    #[must_use]
    pub fn into_parts(self) -> (Graph, Vec<usize>) {
        (self.graph, self.retained)
    }
}

/// Drops light edges, then repeatedly removes vertices whose total degree is
/// below `config.min_degree()` until none remain.
///
/// Degrees are computed in parallel vertex chunks on `pool`.
///
/// # Errors
/// Returns [`CrowdError::Pool`] when a degree chunk fails.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use crowd_core::{Direction, GraphBuilder, GraphSource, PruneConfig, TaskPool, prune};
///
/// // A triangle with a pendant vertex 3 hanging off vertex 0.
/// let mut graph = GraphBuilder::new(4, Direction::Undirected);
/// graph.add_edge(0, 1).add_edge(1, 2).add_edge(2, 0).add_edge(0, 3);
/// let pool = TaskPool::with_workers(NonZeroUsize::new(1).expect("non-zero"))?;
///
/// let outcome = prune(&pool, &graph.build()?, PruneConfig::default())?;
/// assert_eq!(outcome.retained(), &[0, 1, 2]);
/// assert_eq!(outcome.graph().vertex_count(), 3);
/// assert_eq!(outcome.iterations(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.prune",
    err,
    skip(pool, graph),
    fields(graph = %graph.name(), vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn prune(pool: &TaskPool, graph: &Graph, config: PruneConfig) -> Result<PruneOutcome> {
    let min_weight = config.min_edge_weight;
    let mut current = Arc::new(graph.filter_edges(|edge| edge.weight() >= min_weight));
    debug!(
        edges = current.edge_count(),
        "dropped edges below the minimum weight"
    );
    let mut retained: Vec<usize> = (0..current.vertex_count()).collect();
    let mut iterations = 0;

    while !current.is_empty() {
        let keep = degree_mask(pool, &current, config.min_degree)?;
        if keep.iter().all(|&kept| kept) {
            break;
        }
        iterations += 1;
        let (next, kept_ids) = current.retain_vertices(&keep);
        retained = kept_ids.into_iter().map(|id| retained[id]).collect();
        info!(
            iteration = iterations,
            vertices = next.vertex_count(),
            edges = next.edge_count(),
            "pruned low-degree vertices"
        );
        current = Arc::new(next);
    }

    Ok(PruneOutcome {
        graph: Arc::unwrap_or_clone(current),
        retained,
        iterations,
    })
}

fn degree_mask(pool: &TaskPool, graph: &Arc<Graph>, min_degree: usize) -> Result<Vec<bool>> {
    let chunks = pool.try_distribute_graph(Arc::clone(graph), move |graph, range| {
        range
            .map(|vertex| {
                graph
                    .degree(vertex)
                    .map(|degree| degree >= min_degree)
                    .map_err(|error| CrowdError::graph(graph.name(), error))
            })
            .collect::<Result<Vec<bool>>>()
    })?;
    Ok(chunks.into_iter().flatten().collect())
}
