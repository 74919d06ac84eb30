//! Shared test utilities for `crowd-core`.

use crowd_test_support::ci::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::graph::{Direction, Graph, GraphBuilder};

/// Builds a proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: ProptestRunProfile::load(default_cases).cases(),
        ..ProptestConfig::default()
    }
}

/// `0 -> 1 -> 2 -> 3`, `3 <-> 4` and `0 -> 4`.
///
/// Vertex 3 has exactly two in-neighbours, `2` and `4`, which cannot reach
/// each other once 3's edges are removed.
#[must_use]
pub(crate) fn five_node_graph() -> Graph {
    let mut builder = GraphBuilder::new(5, Direction::Directed);
    builder
        .with_name("five-node")
        .add_edge(0, 1)
        .add_edge(1, 2)
        .add_edge(2, 3)
        .add_edge(3, 4)
        .add_edge(4, 3)
        .add_edge(0, 4);
    builder.build().expect("five-node graph must build")
}

/// Builds a directed graph from `(source, target)` pairs.
#[must_use]
pub(crate) fn directed(vertex_count: usize, edges: &[(usize, usize)]) -> Graph {
    let mut builder = GraphBuilder::new(vertex_count, Direction::Directed);
    for &(source, target) in edges {
        builder.add_edge(source, target);
    }
    builder.build().expect("test graph must build")
}

/// Builds an undirected graph from `(source, target)` pairs.
#[must_use]
pub(crate) fn undirected(vertex_count: usize, edges: &[(usize, usize)]) -> Graph {
    let mut builder = GraphBuilder::new(vertex_count, Direction::Undirected);
    for &(source, target) in edges {
        builder.add_edge(source, target);
    }
    builder.build().expect("test graph must build")
}
