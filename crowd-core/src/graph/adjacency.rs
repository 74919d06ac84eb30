//! Adjacency-list graph with stable dense vertex ids.

use std::sync::Arc;

use tracing::instrument;

use crate::error::GraphError;

use super::{
    GraphSource,
    path::{self, PathLength, PathMetric},
};

/// Edge orientation of a [`Graph`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Edges are followed from source to target only.
    #[default]
    Directed,
    /// Edges are followed in both directions.
    Undirected,
}

/// A single edge. Unweighted edges carry a weight of `1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    source: usize,
    target: usize,
    weight: f64,
}

impl Edge {
    pub(crate) fn new(source: usize, target: usize, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the tail vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the head vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns the traversal cost.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }

    /// Returns whether the edge touches `vertex` at either end.
    #[must_use]
    pub fn touches(&self, vertex: usize) -> bool {
        self.source == vertex || self.target == vertex
    }

    fn is_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Read-only graph over vertices `0..vertex_count`.
///
/// Instances are immutable once built; derived graphs (an exclusion copy, a
/// pruned graph) are new values. Share one across threads with
/// [`std::sync::Arc`].
///
/// # Examples
/// ```
/// use crowd_core::{Direction, GraphBuilder, GraphSource};
///
/// let mut builder = GraphBuilder::new(3, Direction::Undirected);
/// builder.add_edge(0, 1).add_edge(1, 2);
/// let graph = builder.build()?;
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.in_neighbours(1)?, vec![0, 2]);
/// # Ok::<(), crowd_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Graph {
    name: Arc<str>,
    direction: Direction,
    weighted: bool,
    edges: Vec<Edge>,
    // Edge indices leaving each vertex (incident edges when undirected).
    outgoing: Vec<Vec<usize>>,
    // Edge indices entering each vertex (incident edges when undirected).
    incoming: Vec<Vec<usize>>,
    labels: Option<Arc<[Arc<str>]>>,
}

impl Graph {
    pub(crate) fn from_parts(
        name: Arc<str>,
        direction: Direction,
        vertex_count: usize,
        edges: Vec<Edge>,
        weighted: bool,
        labels: Option<Arc<[Arc<str>]>>,
    ) -> Self {
        let mut outgoing = vec![Vec::new(); vertex_count];
        let mut incoming = vec![Vec::new(); vertex_count];
        for (index, edge) in edges.iter().enumerate() {
            outgoing[edge.source].push(index);
            incoming[edge.target].push(index);
            if direction == Direction::Undirected && !edge.is_loop() {
                outgoing[edge.target].push(index);
                incoming[edge.source].push(index);
            }
        }
        Self {
            name,
            direction,
            weighted,
            edges,
            outgoing,
            incoming,
            labels,
        }
    }

    /// Returns the edge orientation.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns every edge in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the label attached to `vertex`, if the graph carries labels.
    #[must_use]
    pub fn label(&self, vertex: usize) -> Option<&str> {
        self.labels
            .as_deref()
            .and_then(|labels| labels.get(vertex))
            .map(AsRef::as_ref)
    }

    /// Returns the first vertex carrying `label`.
    #[must_use]
    pub fn vertex_by_label(&self, label: &str) -> Option<usize> {
        self.labels
            .as_deref()?
            .iter()
            .position(|candidate| candidate.as_ref() == label)
    }

    /// Returns the total degree of `vertex`: incoming plus outgoing edges for
    /// directed graphs, incident edges for undirected ones. Self-loops are not
    /// counted.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfBounds`] for an unknown vertex.
    pub fn degree(&self, vertex: usize) -> Result<usize, GraphError> {
        self.check_vertex(vertex)?;
        let non_loops = |indices: &[usize]| {
            indices
                .iter()
                .filter(|&&index| !self.edges[index].is_loop())
                .count()
        };
        Ok(match self.direction {
            Direction::Directed => {
                non_loops(&self.outgoing[vertex]) + non_loops(&self.incoming[vertex])
            }
            Direction::Undirected => non_loops(&self.outgoing[vertex]),
        })
    }

    /// Builds an independent copy with every edge incident to `vertex`
    /// removed. Vertex ids and labels are unchanged.
    ///
    /// Path queries through [`GraphSource::shortest_path_excluding`] give the
    /// same answers on the original graph without materialising this copy.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfBounds`] for an unknown vertex.
    #[instrument(level = "debug", skip(self), fields(graph = %self.name))]
    pub fn without_edges_of(&self, vertex: usize) -> Result<Self, GraphError> {
        self.check_vertex(vertex)?;
        Ok(self.filter_edges(|edge| !edge.touches(vertex)))
    }

    /// Builds a copy keeping only the edges accepted by `keep`.
    #[must_use]
    pub fn filter_edges(&self, keep: impl Fn(&Edge) -> bool) -> Self {
        let edges = self.edges.iter().copied().filter(|edge| keep(edge)).collect();
        Self::from_parts(
            Arc::clone(&self.name),
            self.direction,
            self.vertex_count(),
            edges,
            self.weighted,
            self.labels.clone(),
        )
    }

    /// Builds a compacted copy containing only the vertices for which
    /// `retain[v]` is `true`, together with the mapping from new ids to the
    /// ids in `self`. Edges touching a dropped vertex are dropped too.
    ///
    /// Vertices missing from a short `retain` slice are dropped.
    #[must_use]
    pub fn retain_vertices(&self, retain: &[bool]) -> (Self, Vec<usize>) {
        let mut remap = vec![None; self.vertex_count()];
        let mut kept = Vec::new();
        for (vertex, slot) in remap.iter_mut().enumerate() {
            if retain.get(vertex).copied().unwrap_or(false) {
                *slot = Some(kept.len());
                kept.push(vertex);
            }
        }
        let edges = self
            .edges
            .iter()
            .filter_map(|edge| {
                let source = remap[edge.source]?;
                let target = remap[edge.target]?;
                Some(Edge::new(source, target, edge.weight))
            })
            .collect();
        let labels = self.labels.as_deref().map(|labels| {
            kept.iter()
                .map(|&vertex| Arc::clone(&labels[vertex]))
                .collect::<Arc<[_]>>()
        });
        let graph = Self::from_parts(
            Arc::clone(&self.name),
            self.direction,
            kept.len(),
            edges,
            self.weighted,
            labels,
        );
        (graph, kept)
    }

    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfBounds {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    /// Yields `(neighbour, weight)` for every edge leaving `vertex` in
    /// traversal orientation, skipping edges that touch `excluded`.
    pub(super) fn successors(
        &self,
        vertex: usize,
        excluded: usize,
    ) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.outgoing[vertex].iter().filter_map(move |&index| {
            let edge = &self.edges[index];
            if edge.touches(excluded) {
                return None;
            }
            let next = if edge.source == vertex {
                edge.target
            } else {
                edge.source
            };
            Some((next, edge.weight))
        })
    }

    fn other_endpoints<'a>(
        &'a self,
        vertex: usize,
        indices: &'a [usize],
    ) -> impl Iterator<Item = usize> + 'a {
        indices.iter().map(move |&index| {
            let edge = &self.edges[index];
            if edge.target == vertex {
                edge.source
            } else {
                edge.target
            }
        })
    }
}

impl GraphSource for Graph {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    fn is_directed(&self) -> bool {
        self.direction == Direction::Directed
    }

    fn is_weighted(&self) -> bool {
        self.weighted
    }

    fn in_neighbours(&self, vertex: usize) -> Result<Vec<usize>, GraphError> {
        self.check_vertex(vertex)?;
        let mut neighbours: Vec<usize> = self
            .other_endpoints(vertex, &self.incoming[vertex])
            .collect();
        neighbours.sort_unstable();
        neighbours.dedup();
        Ok(neighbours)
    }

    fn shortest_path_excluding(
        &self,
        source: usize,
        target: usize,
        excluded: usize,
        metric: PathMetric,
    ) -> Result<PathLength, GraphError> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;
        self.check_vertex(excluded)?;
        Ok(match metric {
            PathMetric::Weighted if self.weighted => {
                path::weighted_distance(self, source, target, excluded)
            }
            PathMetric::Hops | PathMetric::Weighted => {
                path::hop_distance(self, source, target, excluded)
            }
        })
    }
}
