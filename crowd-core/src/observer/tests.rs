//! Unit tests for the observer engine.

use crowd_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use tracing_subscriber::layer::SubscriberExt;

use crate::{
    CrowdBuilder, CrowdError, Direction, EdgeWeighting, GraphBuilder, GraphSource, ObserverParams,
    PathMetric,
    graph::Graph,
    test_utils::{directed, five_node_graph, undirected},
};

use super::Crowd;

#[fixture]
fn five_node() -> Crowd<Graph> {
    CrowdBuilder::new().build(five_node_graph())
}

#[rstest]
fn five_node_vertex_three_observes_pairs_at_any_length(five_node: Crowd<Graph>) {
    for m in 1..=5 {
        assert!(
            five_node.is_mk_observer(3, m, 2).expect("query is valid"),
            "k=2, m={m}"
        );
    }
}

#[rstest]
fn five_node_vertex_three_has_only_two_informants(five_node: Crowd<Graph>) {
    for k in 3..=5 {
        for m in 1..=5 {
            assert!(
                !five_node.is_mk_observer(3, m, k).expect("query is valid"),
                "k={k}, m={m}"
            );
        }
    }
}

#[rstest]
fn undirected_path_middle_vertex_is_a_pair_observer() {
    let crowd = CrowdBuilder::new().build(undirected(4, &[(0, 1), (1, 2), (2, 3)]));
    for m in 1..=5 {
        assert!(crowd.is_mk_observer(2, m, 2).expect("query is valid"));
        for k in 3..=5 {
            assert!(!crowd.is_mk_observer(2, m, k).expect("query is valid"));
        }
    }
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(0, 2)]
#[case(3, 0)]
fn invalid_parameters_are_rejected(five_node: Crowd<Graph>, #[case] m: u32, #[case] k: u32) {
    let err = five_node
        .is_mk_observer(3, m, k)
        .expect_err("parameters must be rejected");
    assert_eq!(err, CrowdError::InvalidParameter { m, k });
    assert_eq!(err.code().as_str(), "CROWD_INVALID_PARAMETER");
}

#[rstest]
fn parameters_are_checked_before_the_vertex(five_node: Crowd<Graph>) {
    let err = five_node
        .is_mk_observer(99, 0, 0)
        .expect_err("parameters must be rejected");
    assert!(matches!(err, CrowdError::InvalidParameter { .. }));
}

#[rstest]
fn unknown_vertex_is_rejected(five_node: Crowd<Graph>) {
    let err = five_node
        .is_mk_observer(5, 1, 2)
        .expect_err("vertex 5 is unknown");
    assert_eq!(
        err,
        CrowdError::VertexOutOfBounds {
            vertex: 5,
            vertex_count: 5,
        }
    );
}

#[rstest]
fn too_few_in_neighbours_is_never_an_observer() {
    // Vertex 0 has a single in-neighbour.
    let crowd = CrowdBuilder::new().build(directed(2, &[(1, 0)]));
    let params = ObserverParams::new(1, 2).expect("params are valid");
    assert!(!crowd.is_observer(0, params).expect("query is valid"));
}

#[rstest]
fn self_loop_counts_as_an_independent_informant() {
    // With vertex 2's edges removed, 2 and 0 cannot reach each other.
    let crowd = CrowdBuilder::new().build(directed(3, &[(2, 2), (0, 2)]));
    assert!(crowd.is_mk_observer(2, 1, 2).expect("query is valid"));
    assert!(crowd.is_mk_observer(2, 5, 2).expect("query is valid"));
    assert!(!crowd.is_mk_observer(2, 1, 3).expect("query is valid"));
}

#[rstest]
fn three_mutually_distant_informants_form_a_clique() {
    // Vertex 0 hears from 1, 2 and 3, which share no other edges.
    let crowd = CrowdBuilder::new().build(directed(4, &[(1, 0), (2, 0), (3, 0)]));
    assert!(crowd.is_mk_observer(0, 9, 3).expect("query is valid"));
    assert!(!crowd.is_mk_observer(0, 9, 4).expect("query is valid"));
}

#[rstest]
fn adjacent_informants_break_the_clique() {
    // 1 -> 2 keeps informants 1 and 2 one hop apart.
    let crowd = CrowdBuilder::new().build(directed(4, &[(1, 0), (2, 0), (3, 0), (1, 2)]));
    assert!(crowd.is_mk_observer(0, 1, 3).expect("query is valid"));
    assert!(!crowd.is_mk_observer(0, 2, 3).expect("query is valid"));
    assert!(crowd.is_mk_observer(0, 2, 2).expect("query is valid"));
}

fn weighted_pair() -> Graph {
    // Informants 1 and 2 sit half a unit apart.
    let mut builder = GraphBuilder::new(3, Direction::Directed);
    builder
        .add_weighted_edge(1, 0, 1.0)
        .add_weighted_edge(2, 0, 1.0)
        .add_weighted_edge(1, 2, 0.5)
        .add_weighted_edge(2, 1, 0.5);
    builder.build().expect("weighted graph must build")
}

#[rstest]
#[case(EdgeWeighting::Unit, true)]
#[case(EdgeWeighting::Weighted, false)]
fn weighting_decides_fractional_distances(
    #[case] weighting: EdgeWeighting,
    #[case] expected: bool,
) {
    let crowd = CrowdBuilder::new()
        .with_weighting(weighting)
        .build(weighted_pair());
    assert_eq!(crowd.is_mk_observer(0, 1, 2).expect("query is valid"), expected);
}

#[rstest]
fn independence_uses_the_engine_metric() {
    let crowd = CrowdBuilder::new()
        .with_weighting(EdgeWeighting::Weighted)
        .build(weighted_pair());
    assert!(!crowd.is_independent(1, 2, 0, 1).expect("vertices exist"));
    assert!(crowd.is_independent(1, 2, 1, 1).expect("vertices exist"));
}

#[cfg(feature = "cache")]
#[rstest]
fn path_cache_keeps_verdicts_and_fills_up() {
    use crate::PathCacheConfig;

    let cached = CrowdBuilder::new()
        .with_path_cache(PathCacheConfig::default())
        .build(five_node_graph());
    let plain = CrowdBuilder::new().build(five_node_graph());
    assert_eq!(plain.cached_paths(), 0);
    assert!(plain.path_cache_config().is_none());

    for k in 2..=4 {
        for m in 1..=4 {
            assert_eq!(
                cached.is_mk_observer(3, m, k).expect("query is valid"),
                plain.is_mk_observer(3, m, k).expect("query is valid"),
            );
        }
    }
    // Vertex 3 has one pair of informants: two directions, one metric.
    assert_eq!(cached.cached_paths(), 2);
}

#[rstest]
fn crowd_delegates_graph_queries(five_node: Crowd<Graph>) {
    assert_eq!(five_node.name(), "five-node");
    assert_eq!(five_node.vertex_count(), 5);
    assert!(five_node.is_directed());
    assert!(!five_node.is_weighted());
    assert_eq!(five_node.in_neighbours(3).expect("vertex exists"), vec![2, 4]);
    assert_eq!(
        five_node
            .shortest_path_excluding(0, 3, 4, PathMetric::Hops)
            .expect("vertices exist"),
        five_node
            .graph()
            .shortest_path_excluding(0, 3, 4, PathMetric::Hops)
            .expect("vertices exist"),
    );
}

#[rstest]
fn observer_span_records_query(five_node: Crowd<Graph>) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        five_node.is_mk_observer(3, 2, 2).expect("query is valid");
        let _ = five_node.is_mk_observer(3, 0, 2);
    });

    let span = layer
        .span_named("core.is_observer")
        .expect("observer span must be recorded");
    assert_eq!(span.field("graph"), Some("five-node"));
    assert_eq!(span.field("vertex"), Some("3"));
    assert_eq!(span.field("m"), Some("2"));
    assert_eq!(span.field("k"), Some("2"));

    let errors: Vec<_> = layer
        .events()
        .into_iter()
        .filter(|event| event.level == tracing::Level::ERROR)
        .collect();
    assert_eq!(errors.len(), 1, "the invalid query must log its error");
}
