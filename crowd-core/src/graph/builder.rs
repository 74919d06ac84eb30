//! Validated construction of [`Graph`] values.

use std::sync::Arc;

use crate::error::GraphError;

use super::adjacency::{Direction, Edge, Graph};

const DEFAULT_NAME: &str = "graph";

/// Collects edges and labels, then validates them into an immutable
/// [`Graph`].
///
/// # Examples
/// ```
/// use crowd_core::{Direction, GraphBuilder, GraphSource};
///
/// let mut builder = GraphBuilder::new(2, Direction::Directed);
/// builder.with_name("pair").add_weighted_edge(0, 1, 2.5);
/// let graph = builder.build()?;
/// assert_eq!(graph.name(), "pair");
/// assert!(graph.is_weighted());
/// # Ok::<(), crowd_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    name: Arc<str>,
    direction: Direction,
    vertex_count: usize,
    edges: Vec<Edge>,
    weighted: bool,
    labels: Option<Vec<Arc<str>>>,
}

impl GraphBuilder {
    /// Starts a graph over vertices `0..vertex_count`.
    #[must_use]
    pub fn new(vertex_count: usize, direction: Direction) -> Self {
        Self {
            name: Arc::from(DEFAULT_NAME),
            direction,
            vertex_count,
            edges: Vec::new(),
            weighted: false,
            labels: None,
        }
    }

    /// Sets the diagnostic name.
    pub fn with_name(&mut self, name: impl Into<Arc<str>>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Attaches one label per vertex, in vertex order.
    pub fn with_labels<I, S>(&mut self, labels: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Adds an edge with unit cost.
    pub fn add_edge(&mut self, source: usize, target: usize) -> &mut Self {
        self.edges.push(Edge::new(source, target, 1.0));
        self
    }

    /// Adds an edge with an explicit cost and marks the graph as weighted.
    pub fn add_weighted_edge(&mut self, source: usize, target: usize, weight: f64) -> &mut Self {
        self.weighted = true;
        self.edges.push(Edge::new(source, target, weight));
        self
    }

    /// Returns the number of edges added so far.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Validates the collected edges and produces the graph.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfBounds`] when an endpoint is not below
    /// the vertex count, [`GraphError::InvalidWeight`] for a negative or
    /// non-finite weight, and [`GraphError::LabelCountMismatch`] when labels
    /// do not cover every vertex exactly once.
    pub fn build(&self) -> Result<Graph, GraphError> {
        for edge in &self.edges {
            for vertex in [edge.source(), edge.target()] {
                if vertex >= self.vertex_count {
                    return Err(GraphError::VertexOutOfBounds {
                        vertex,
                        vertex_count: self.vertex_count,
                    });
                }
            }
            if !edge.weight().is_finite() || edge.weight() < 0.0 {
                return Err(GraphError::InvalidWeight {
                    source_vertex: edge.source(),
                    target_vertex: edge.target(),
                    weight: edge.weight(),
                });
            }
        }
        let labels = match &self.labels {
            Some(labels) if labels.len() != self.vertex_count => {
                return Err(GraphError::LabelCountMismatch {
                    labels: labels.len(),
                    vertex_count: self.vertex_count,
                });
            }
            Some(labels) => Some(Arc::from(labels.as_slice())),
            None => None,
        };
        Ok(Graph::from_parts(
            Arc::clone(&self.name),
            self.direction,
            self.vertex_count,
            self.edges.clone(),
            self.weighted,
            labels,
        ))
    }
}
