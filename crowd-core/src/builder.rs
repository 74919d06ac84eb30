//! Builder for configuring [`Crowd`] observer engines.

use std::sync::Arc;

#[cfg(feature = "cache")]
use crate::cache::PathCacheConfig;
use crate::{
    graph::{GraphSource, PathMetric},
    observer::Crowd,
};

/// How edge costs enter path lengths.
///
/// # Examples
/// ```
/// use crowd_core::{EdgeWeighting, PathMetric};
///
/// assert_eq!(EdgeWeighting::default(), EdgeWeighting::Unit);
/// assert_eq!(EdgeWeighting::Weighted.metric(), PathMetric::Weighted);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum EdgeWeighting {
    /// Every edge is one hop.
    #[default]
    Unit,
    /// Edges cost their weight when the graph carries weights.
    Weighted,
}

impl EdgeWeighting {
    /// Returns the path metric this weighting selects.
    #[must_use]
    pub fn metric(self) -> PathMetric {
        match self {
            Self::Unit => PathMetric::Hops,
            Self::Weighted => PathMetric::Weighted,
        }
    }
}

/// Configures and constructs [`Crowd`] engines.
///
/// # Examples
/// ```
/// use crowd_core::{CrowdBuilder, Direction, EdgeWeighting, GraphBuilder, PathMetric};
///
/// let mut graph = GraphBuilder::new(2, Direction::Directed);
/// graph.add_weighted_edge(0, 1, 0.5);
/// let crowd = CrowdBuilder::new()
///     .with_weighting(EdgeWeighting::Weighted)
///     .build(graph.build()?);
/// assert_eq!(crowd.metric(), PathMetric::Weighted);
/// # Ok::<(), crowd_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct CrowdBuilder {
    weighting: EdgeWeighting,
    #[cfg(feature = "cache")]
    path_cache: Option<PathCacheConfig>,
}

impl CrowdBuilder {
    /// Creates a builder with unit weighting and no path cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects how edge costs enter path lengths.
    #[must_use]
    pub fn with_weighting(mut self, weighting: EdgeWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Returns the configured weighting.
    #[must_use]
    pub fn weighting(&self) -> EdgeWeighting {
        self.weighting
    }

    /// Memoises exclusion path lengths across queries on the built engine.
    ///
    /// # Examples
    /// ```
    /// use crowd_core::{CrowdBuilder, PathCacheConfig};
    ///
    /// let builder = CrowdBuilder::new().with_path_cache(PathCacheConfig::default());
    /// assert!(builder.path_cache().is_some());
    /// ```
    #[cfg(feature = "cache")]
    #[must_use]
    pub fn with_path_cache(mut self, config: PathCacheConfig) -> Self {
        self.path_cache = Some(config);
        self
    }

    /// Returns the path-cache settings, if caching was requested.
    #[cfg(feature = "cache")]
    #[must_use]
    pub fn path_cache(&self) -> Option<PathCacheConfig> {
        self.path_cache
    }

    /// Builds an engine that owns `graph`.
    #[must_use]
    pub fn build<G: GraphSource>(&self, graph: G) -> Crowd<G> {
        self.build_shared(Arc::new(graph))
    }

    /// Builds an engine over a graph that is shared with other owners.
    #[must_use]
    pub fn build_shared<G: GraphSource>(&self, graph: Arc<G>) -> Crowd<G> {
        let crowd = Crowd::new(graph, self.weighting.metric());
        #[cfg(feature = "cache")]
        let crowd = crowd.with_cache(self.path_cache);
        crowd
    }
}
