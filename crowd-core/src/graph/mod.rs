//! Graph adapter: the contract the observer engine consumes, plus the
//! adjacency-list [`Graph`] that implements it.
//!
//! Path queries never mutate the shared graph. A query that excludes a vertex
//! walks the shared adjacency lists and skips every edge incident to that
//! vertex, so any number of queries may run concurrently over one `Graph`.

mod adjacency;
mod builder;
mod path;

pub use self::{
    adjacency::{Direction, Edge, Graph},
    builder::GraphBuilder,
    path::{PathLength, PathMetric},
};

use crate::error::GraphError;

/// Abstraction over a graph whose vertices are dense ids `0..vertex_count()`.
///
/// # Examples
/// ```
/// use crowd_core::{Direction, GraphBuilder, GraphSource, PathLength, PathMetric};
///
/// let mut builder = GraphBuilder::new(3, Direction::Directed);
/// builder.add_edge(0, 1).add_edge(1, 2).add_edge(0, 2);
/// let graph = builder.build()?;
///
/// assert_eq!(graph.in_neighbours(2)?, vec![0, 1]);
/// // Removing vertex 1's edges leaves only the direct hop 0 -> 2.
/// assert_eq!(
///     graph.shortest_path_excluding(0, 2, 1, PathMetric::Hops)?,
///     PathLength::Finite(1.0),
/// );
/// assert_eq!(
///     graph.shortest_path_excluding(2, 0, 1, PathMetric::Hops)?,
///     PathLength::Unreachable,
/// );
/// # Ok::<(), crowd_core::GraphError>(())
/// ```
pub trait GraphSource {
    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns whether the graph contains no vertices.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Returns whether edges are directed.
    fn is_directed(&self) -> bool;

    /// Returns whether edges carry explicit weights.
    ///
    /// Unweighted graphs are traversed with unit edge costs regardless of the
    /// requested [`PathMetric`].
    fn is_weighted(&self) -> bool {
        false
    }

    /// Returns the distinct in-neighbours of `vertex` in ascending order.
    ///
    /// For undirected graphs every adjacent vertex is an in-neighbour. A
    /// self-loop makes the vertex its own in-neighbour.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfBounds`] for an unknown vertex.
    fn in_neighbours(&self, vertex: usize) -> Result<Vec<usize>, GraphError>;

    /// Computes the shortest path length from `source` to `target` after
    /// removing every edge incident to `excluded`.
    ///
    /// Directed graphs are walked along edge orientation. Absence of a path is
    /// reported as [`PathLength::Unreachable`], never as an error.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfBounds`] when any of the three vertices
    /// is unknown.
    fn shortest_path_excluding(
        &self,
        source: usize,
        target: usize,
        excluded: usize,
        metric: PathMetric,
    ) -> Result<PathLength, GraphError>;
}
