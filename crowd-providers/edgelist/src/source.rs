//! Edge-list backed [`GraphSource`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use crowd_core::{Direction, Graph, GraphBuilder, GraphError, GraphSource, PathLength, PathMetric};
use tracing::{field, info, instrument};

use crate::errors::EdgeListError;
use crate::parse::parse_edges;

/// How an edge list is interpreted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EdgeListOptions {
    direction: Direction,
}

impl EdgeListOptions {
    /// Reads lines as directed `source -> target` edges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the edge orientation.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Graph loaded from `source target [weight]` lines.
///
/// Vertex tokens become dense ids in first-seen order and are kept as labels.
/// Lines naming the same vertex twice are dropped after their token is
/// interned. Repeated edges collapse into one edge whose weight is the sum of
/// the repeats.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use crowd_core::GraphSource;
/// use crowd_providers_edgelist::{EdgeListOptions, EdgeListSource};
///
/// let input = "# follower followee\nalice bob\ncarol bob\n";
/// let source = EdgeListSource::try_from_reader("demo", Cursor::new(input), EdgeListOptions::new())?;
/// let bob = source.vertex_by_label("bob").expect("bob is interned");
/// assert_eq!(source.in_neighbours(bob)?, vec![0, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct EdgeListSource {
    graph: Arc<Graph>,
}

impl EdgeListSource {
    /// Parses an edge list from `reader`.
    ///
    /// # Errors
    /// Returns [`EdgeListError::Parse`] for a malformed line,
    /// [`EdgeListError::EmptyInput`] when no edge survives parsing,
    /// [`EdgeListError::Io`] when reading fails, and
    /// [`EdgeListError::Graph`] if graph validation rejects the result.
    #[instrument(
        name = "providers.edgelist.load",
        err,
        skip(name, reader),
        fields(graph = field::Empty, vertices = field::Empty, edges = field::Empty),
    )]
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<Arc<str>>,
        reader: R,
        options: EdgeListOptions,
    ) -> Result<Self, EdgeListError> {
        let name = name.into();
        let parsed = parse_edges(reader, options.direction())?;
        if parsed.edges.is_empty() {
            return Err(EdgeListError::EmptyInput);
        }

        let mut builder = GraphBuilder::new(parsed.labels.len(), options.direction());
        builder.with_name(Arc::clone(&name)).with_labels(parsed.labels);
        for (source, target, weight) in parsed.edges {
            if parsed.weighted {
                builder.add_weighted_edge(source, target, weight);
            } else {
                builder.add_edge(source, target);
            }
        }
        let graph = builder.build()?;

        let span = tracing::Span::current();
        span.record("graph", field::display(&name));
        span.record("vertices", graph.vertex_count());
        span.record("edges", graph.edge_count());
        info!(weighted = graph.is_weighted(), "edge list loaded");
        Ok(Self {
            graph: Arc::new(graph),
        })
    }

    /// Opens `path` and parses it as an edge list.
    ///
    /// # Errors
    /// Returns [`EdgeListError::Io`] when the file cannot be opened, otherwise
    /// the errors of [`EdgeListSource::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<Arc<str>>,
        path: impl AsRef<Path>,
        options: EdgeListOptions,
    ) -> Result<Self, EdgeListError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file), options)
    }

    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the graph behind a shared handle, ready for a
    /// [`crowd_core::CrowdBuilder::build_shared`] call.
    #[must_use]
    pub fn shared_graph(&self) -> Arc<Graph> {
        Arc::clone(&self.graph)
    }

    /// Returns the token that introduced `vertex`.
    #[must_use]
    pub fn label(&self, vertex: usize) -> Option<&str> {
        self.graph.label(vertex)
    }

    /// Looks up the dense id assigned to `label`.
    #[must_use]
    pub fn vertex_by_label(&self, label: &str) -> Option<usize> {
        self.graph.vertex_by_label(label)
    }
}

impl GraphSource for EdgeListSource {
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

    fn in_neighbours(&self, vertex: usize) -> Result<Vec<usize>, GraphError> {
        self.graph.in_neighbours(vertex)
    }

    fn shortest_path_excluding(
        &self,
        source: usize,
        target: usize,
        excluded: usize,
        metric: PathMetric,
    ) -> Result<PathLength, GraphError> {
        self.graph
            .shortest_path_excluding(source, target, excluded, metric)
    }
}
