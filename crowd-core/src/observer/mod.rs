//! The `(m, k)`-observer predicate and the engine that evaluates it.
//!
//! A vertex is an `(m, k)`-observer when at least `k` of its in-neighbours are
//! pairwise `m`-independent: with the vertex's own edges removed, every pair
//! of those informants is at least `m` apart in both directions. Informants
//! that can no longer reach each other at all are infinitely far apart.

mod decision;
mod params;

pub use self::params::ObserverParams;

use std::sync::Arc;

use tracing::instrument;

#[cfg(feature = "cache")]
use crate::cache::{PathCache, PathCacheConfig};
use crate::{
    Result,
    error::{CrowdError, GraphError},
    graph::{GraphSource, PathLength, PathMetric},
    independence::IndependenceTester,
};

/// Observer engine bound to one read-only graph.
///
/// Cheap to share: wrap it in an [`Arc`] to evaluate many vertices
/// concurrently, for example through [`crate::scan_observers`]. Each
/// evaluation keeps its clique bookkeeping private.
///
/// `Crowd` itself implements [`GraphSource`], delegating to the wrapped graph
/// and routing path queries through the engine's cache.
///
/// # Examples
/// ```
/// use crowd_core::{CrowdBuilder, Direction, GraphBuilder};
///
/// let mut builder = GraphBuilder::new(5, Direction::Directed);
/// builder
///     .add_edge(0, 1)
///     .add_edge(1, 2)
///     .add_edge(2, 3)
///     .add_edge(3, 4)
///     .add_edge(4, 3)
///     .add_edge(0, 4);
/// let crowd = CrowdBuilder::new().build(builder.build()?);
///
/// assert!(crowd.is_mk_observer(3, 5, 2)?);
/// assert!(!crowd.is_mk_observer(3, 1, 3)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Crowd<G> {
    graph: Arc<G>,
    metric: PathMetric,
    #[cfg(feature = "cache")]
    cache: Option<PathCache>,
}

impl<G> Crowd<G>
where
    G: GraphSource,
{
    pub(crate) fn new(graph: Arc<G>, metric: PathMetric) -> Self {
        Self {
            graph,
            metric,
            #[cfg(feature = "cache")]
            cache: None,
        }
    }

    #[cfg(feature = "cache")]
    pub(crate) fn with_cache(mut self, config: Option<PathCacheConfig>) -> Self {
        self.cache = config.map(PathCache::new);
        self
    }

    /// Returns the wrapped graph.
    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Returns a shared handle to the wrapped graph.
    #[must_use]
    pub fn shared_graph(&self) -> Arc<G> {
        Arc::clone(&self.graph)
    }

    /// Returns the cost model used for path queries.
    #[must_use]
    pub fn metric(&self) -> PathMetric {
        self.metric
    }

    /// Returns the path-cache settings, when caching is enabled.
    #[cfg(feature = "cache")]
    #[must_use]
    pub fn path_cache_config(&self) -> Option<PathCacheConfig> {
        self.cache.as_ref().map(PathCache::config)
    }

    /// Returns the number of cached path lengths.
    #[cfg(feature = "cache")]
    #[must_use]
    pub fn cached_paths(&self) -> usize {
        self.cache.as_ref().map_or(0, PathCache::len)
    }

    /// Decides whether `vertex` is an `(m, k)`-observer.
    ///
    /// Parameters are validated before the graph is touched.
    ///
    /// # Errors
    /// Returns [`CrowdError::InvalidParameter`] when `m < 1` or `k <= 1`,
    /// [`CrowdError::VertexOutOfBounds`] for an unknown vertex, and
    /// [`CrowdError::Graph`] when the graph rejects a query.
    #[instrument(
        name = "core.is_observer",
        level = "debug",
        err,
        skip(self),
        fields(graph = %self.graph.name()),
    )]
    pub fn is_mk_observer(&self, vertex: usize, m: u32, k: u32) -> Result<bool> {
        let params = ObserverParams::new(m, k)?;
        self.is_observer_unchecked(vertex, params)
    }

    /// Decides whether `vertex` is an observer for pre-validated parameters.
    ///
    /// # Errors
    /// Returns [`CrowdError::VertexOutOfBounds`] for an unknown vertex and
    /// [`CrowdError::Graph`] when the graph rejects a query.
    pub fn is_observer(&self, vertex: usize, params: ObserverParams) -> Result<bool> {
        self.is_mk_observer(vertex, params.m(), params.k())
    }

    fn is_observer_unchecked(&self, vertex: usize, params: ObserverParams) -> Result<bool> {
        self.check_vertex(vertex)?;
        decision::decide(&self.tester(), self.graph.as_ref(), vertex, params)
            .map_err(|error| self.graph_error(error))
    }

    /// Returns whether `a` and `b` are `m`-independent with `excluded`'s
    /// edges removed, using this engine's cost model and cache.
    ///
    /// # Errors
    /// Returns [`CrowdError::Graph`] for an unknown vertex.
    pub fn is_independent(&self, a: usize, b: usize, excluded: usize, m: u32) -> Result<bool> {
        self.tester()
            .test(a, b, excluded, m)
            .map_err(|error| self.graph_error(error))
    }

    fn tester(&self) -> IndependenceTester<'_, G> {
        self.tester_for(self.metric)
    }

    fn tester_for(&self, metric: PathMetric) -> IndependenceTester<'_, G> {
        let tester = IndependenceTester::new(self.graph.as_ref(), metric);
        #[cfg(feature = "cache")]
        let tester = tester.with_cache(self.cache.as_ref());
        tester
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        let vertex_count = self.graph.vertex_count();
        if vertex < vertex_count {
            Ok(())
        } else {
            Err(CrowdError::VertexOutOfBounds {
                vertex,
                vertex_count,
            })
        }
    }

    fn graph_error(&self, error: GraphError) -> CrowdError {
        CrowdError::graph(self.graph.name(), error)
    }
}

impl<G> GraphSource for Crowd<G>
where
    G: GraphSource,
{
    fn name(&self) -> &str {
        self.graph.name()
    }

    fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    fn is_weighted(&self) -> bool {
        self.graph.is_weighted()
    }

    fn in_neighbours(&self, vertex: usize) -> core::result::Result<Vec<usize>, GraphError> {
        self.graph.in_neighbours(vertex)
    }

    fn shortest_path_excluding(
        &self,
        source: usize,
        target: usize,
        excluded: usize,
        metric: PathMetric,
    ) -> core::result::Result<PathLength, GraphError> {
        self.tester_for(metric).distance(source, target, excluded)
    }
}

#[cfg(test)]
mod tests;

#[cfg(test)]
mod property;
