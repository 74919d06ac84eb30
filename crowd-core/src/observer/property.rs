//! Property tests for the observer predicate over generated graphs.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use test_strategy::Arbitrary;

use crate::{
    CrowdBuilder, CrowdError, Direction, GraphBuilder, GraphSource, PathMetric, graph::Graph,
    is_independent, test_utils::suite_proptest_config,
};

/// Shape of the generated graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
enum Topology {
    /// Independent coin flips per ordered pair.
    #[weight(3)]
    Random,
    /// Many spokes into vertex 0 plus sparse cross links.
    #[weight(2)]
    Star,
    /// Undirected random graph.
    #[weight(2)]
    Undirected,
}

#[derive(Clone, Debug)]
struct GeneratedGraph {
    graph: Graph,
    vertex: usize,
}

fn generate(topology: Topology, seed: u64) -> GeneratedGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let vertex_count = rng.gen_range(2..=9);
    let direction = match topology {
        Topology::Undirected => Direction::Undirected,
        Topology::Random | Topology::Star => Direction::Directed,
    };
    let mut builder = GraphBuilder::new(vertex_count, direction);
    match topology {
        Topology::Random | Topology::Undirected => {
            let density = rng.gen_range(0.1..0.6);
            for source in 0..vertex_count {
                for target in 0..vertex_count {
                    if source != target && rng.gen_bool(density) {
                        builder.add_edge(source, target);
                    }
                }
            }
        }
        Topology::Star => {
            for spoke in 1..vertex_count {
                builder.add_edge(spoke, 0);
            }
            for _ in 0..rng.gen_range(0..vertex_count) {
                let source = rng.gen_range(1..vertex_count);
                let target = rng.gen_range(1..vertex_count);
                builder.add_edge(source, target);
            }
        }
    }
    let vertex = match topology {
        Topology::Star => 0,
        Topology::Random | Topology::Undirected => rng.gen_range(0..vertex_count),
    };
    GeneratedGraph {
        graph: builder.build().expect("generated edges are in range"),
        vertex,
    }
}

fn generated_graph() -> impl Strategy<Value = GeneratedGraph> {
    (any::<Topology>(), any::<u64>()).prop_map(|(topology, seed)| generate(topology, seed))
}

/// `(m, k)` pairs with `m == 0` or `k <= 1`.
fn invalid_parameters() -> impl Strategy<Value = (u32, u32)> {
    prop_oneof![(Just(0_u32), 0_u32..4), (1_u32..4, 0_u32..=1)]
}

proptest! {
    #![proptest_config(suite_proptest_config(96))]

    #[test]
    fn invalid_parameters_fail_for_every_vertex(
        generated in generated_graph(),
        (m, k) in invalid_parameters(),
    ) {
        let crowd = CrowdBuilder::new().build(generated.graph);
        let result = crowd.is_mk_observer(generated.vertex, m, k);
        prop_assert_eq!(result, Err(CrowdError::InvalidParameter { m, k }));
    }

    #[test]
    fn fewer_in_neighbours_than_k_is_false(generated in generated_graph(), m in 1_u32..5) {
        let neighbours = generated
            .graph
            .in_neighbours(generated.vertex)
            .expect("vertex exists")
            .len();
        let k = (u32::try_from(neighbours).expect("small graph") + 1).max(2);
        let crowd = CrowdBuilder::new().build(generated.graph);
        prop_assert!(!crowd.is_mk_observer(generated.vertex, m, k).expect("query is valid"));
    }

    #[test]
    fn pair_observer_iff_some_pair_is_independent(
        generated in generated_graph(),
        m in 1_u32..5,
    ) {
        let GeneratedGraph { graph, vertex } = generated;
        let neighbours = graph.in_neighbours(vertex).expect("vertex exists");
        let mut any_independent = false;
        for (position, &a) in neighbours.iter().enumerate() {
            for &b in &neighbours[..position] {
                any_independent |= is_independent(&graph, a, b, vertex, m, PathMetric::Hops)
                    .expect("vertices exist");
            }
        }
        let crowd = CrowdBuilder::new().build(graph);
        prop_assert_eq!(
            crowd.is_mk_observer(vertex, m, 2).expect("query is valid"),
            any_independent
        );
    }

    #[test]
    fn verdict_is_monotone_in_m_and_k(generated in generated_graph()) {
        let crowd = CrowdBuilder::new().build(generated.graph);
        let vertex = generated.vertex;
        for k in 2_u32..6 {
            for m in 1_u32..5 {
                if !crowd.is_mk_observer(vertex, m, k).expect("query is valid") {
                    continue;
                }
                if k > 2 {
                    prop_assert!(crowd.is_mk_observer(vertex, m, k - 1).expect("query is valid"));
                }
                if m > 1 {
                    prop_assert!(crowd.is_mk_observer(vertex, m - 1, k).expect("query is valid"));
                }
            }
        }
    }

    #[test]
    fn neighbour_order_does_not_change_the_verdict(
        generated in generated_graph(),
        m in 1_u32..4,
        k in 2_u32..4,
    ) {
        // Reversing the vertex numbering reverses pair enumeration order. For
        // k <= 3 the search is exact: when the last pair of an independent
        // triangle is visited, the other two pairs are already registered.
        let GeneratedGraph { graph, vertex } = generated;
        let last = graph.vertex_count() - 1;
        let mut builder = GraphBuilder::new(graph.vertex_count(), graph.direction());
        for edge in graph.edges() {
            builder.add_edge(last - edge.source(), last - edge.target());
        }
        let mirrored = builder.build().expect("mirrored edges are in range");

        let forward = CrowdBuilder::new().build(graph);
        let backward = CrowdBuilder::new().build(mirrored);
        prop_assert_eq!(
            forward.is_mk_observer(vertex, m, k).expect("query is valid"),
            backward.is_mk_observer(last - vertex, m, k).expect("query is valid"),
        );
    }
}
