//! Pairwise m-independence with respect to an excluded vertex.

use crate::{
    error::GraphError,
    graph::{GraphSource, PathLength, PathMetric},
};

#[cfg(feature = "cache")]
use crate::cache::PathCache;

/// Returns whether `a` and `b` are `m`-independent once every edge incident to
/// `excluded` is removed.
///
/// Both directions are checked because distances in a directed graph are
/// asymmetric. A direction with no path counts as infinitely long.
///
/// # Errors
/// Returns [`GraphError::VertexOutOfBounds`] for an unknown vertex.
///
/// # Examples
/// ```
/// use crowd_core::{Direction, GraphBuilder, PathMetric, is_independent};
///
/// let mut builder = GraphBuilder::new(4, Direction::Undirected);
/// builder.add_edge(0, 1).add_edge(1, 2).add_edge(2, 3);
/// let graph = builder.build()?;
///
/// // With vertex 2's edges gone, 1 and 3 cannot reach each other at all.
/// assert!(is_independent(&graph, 1, 3, 2, 5, PathMetric::Hops)?);
/// // 0 and 1 stay one hop apart.
/// assert!(!is_independent(&graph, 0, 1, 2, 2, PathMetric::Hops)?);
/// # Ok::<(), crowd_core::GraphError>(())
/// ```
pub fn is_independent<G>(
    graph: &G,
    a: usize,
    b: usize,
    excluded: usize,
    m: u32,
    metric: PathMetric,
) -> Result<bool, GraphError>
where
    G: GraphSource + ?Sized,
{
    IndependenceTester::new(graph, metric).test(a, b, excluded, m)
}

/// Independence checks bound to one graph and cost model, optionally
/// memoising path lengths.
pub(crate) struct IndependenceTester<'a, G: ?Sized> {
    graph: &'a G,
    metric: PathMetric,
    #[cfg(feature = "cache")]
    cache: Option<&'a PathCache>,
}

impl<'a, G> IndependenceTester<'a, G>
where
    G: GraphSource + ?Sized,
{
    pub(crate) fn new(graph: &'a G, metric: PathMetric) -> Self {
        Self {
            graph,
            metric,
            #[cfg(feature = "cache")]
            cache: None,
        }
    }

    #[cfg(feature = "cache")]
    pub(crate) fn with_cache(mut self, cache: Option<&'a PathCache>) -> Self {
        self.cache = cache;
        self
    }

    pub(crate) fn test(&self, a: usize, b: usize, excluded: usize, m: u32) -> Result<bool, GraphError> {
        Ok(self.distance(a, b, excluded)?.at_least(m) && self.distance(b, a, excluded)?.at_least(m))
    }

    pub(crate) fn distance(
        &self,
        source: usize,
        target: usize,
        excluded: usize,
    ) -> Result<PathLength, GraphError> {
        let compute = || {
            self.graph
                .shortest_path_excluding(source, target, excluded, self.metric)
        };
        #[cfg(feature = "cache")]
        if let Some(cache) = self.cache {
            return cache.get_or_compute(self.metric, source, target, excluded, compute);
        }
        compute()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_utils::five_node_graph;

    #[rstest]
    #[case(2, 4, 3, 5, true)]
    #[case(0, 1, 3, 2, false)]
    #[case(1, 4, 3, 1, true)]
    #[case(0, 2, 3, 2, true)]
    #[case(0, 2, 3, 3, false)]
    fn directed_independence(
        #[case] a: usize,
        #[case] b: usize,
        #[case] excluded: usize,
        #[case] m: u32,
        #[case] expected: bool,
    ) {
        let graph = five_node_graph();
        let independent =
            is_independent(&graph, a, b, excluded, m, PathMetric::Hops).expect("vertices exist");
        assert_eq!(independent, expected);
    }

    #[rstest]
    fn independence_is_symmetric_in_its_arguments() {
        let graph = five_node_graph();
        for (a, b) in [(0, 1), (0, 2), (1, 4), (2, 4)] {
            for m in 1..4 {
                let forward = is_independent(&graph, a, b, 3, m, PathMetric::Hops)
                    .expect("vertices exist");
                let backward = is_independent(&graph, b, a, 3, m, PathMetric::Hops)
                    .expect("vertices exist");
                assert_eq!(forward, backward, "pair ({a}, {b}) at m={m}");
            }
        }
    }

    #[rstest]
    fn unknown_vertex_is_reported() {
        let graph = five_node_graph();
        let err = is_independent(&graph, 0, 8, 3, 1, PathMetric::Hops)
            .expect_err("vertex 8 is unknown");
        assert!(matches!(err, GraphError::VertexOutOfBounds { vertex: 8, .. }));
    }
}
