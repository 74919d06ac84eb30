//! Seeded synthetic graphs for benchmarking.

use crowd_core::{Direction, Graph, GraphBuilder, GraphSource};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Random out-degree graph configuration.
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of vertices to generate.
    pub vertex_count: usize,
    /// Edges drawn from every vertex to uniformly chosen targets.
    pub out_degree: usize,
    /// Edge orientation.
    pub direction: Direction,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Builds a graph in which every vertex links to `out_degree` random
/// other vertices. Repeated draws become parallel edges.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] for fewer than two vertices and
/// [`BenchSetupError::Graph`] if graph validation fails.
pub fn generate(config: &SyntheticGraphConfig) -> Result<Graph, BenchSetupError> {
    if config.vertex_count < 2 {
        return Err(BenchSetupError::ZeroValue {
            context: "vertex_count beyond a single vertex",
        });
    }
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut builder = GraphBuilder::new(config.vertex_count, config.direction);
    builder.with_name(format!("synthetic-{}", config.vertex_count));
    for source in 0..config.vertex_count {
        for _ in 0..config.out_degree {
            // Drawing from n - 1 slots and skipping `source` keeps loops out.
            let draw = rng.gen_range(0..config.vertex_count - 1);
            let target = if draw >= source { draw + 1 } else { draw };
            builder.add_edge(source, target);
        }
    }
    Ok(builder.build()?)
}

/// Returns the vertex with the most in-neighbours, the costliest observer
/// query in the graph.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] if a neighbour lookup fails.
pub fn busiest_vertex(graph: &Graph) -> Result<usize, BenchSetupError> {
    let mut best = (0, 0);
    for vertex in 0..graph.vertex_count() {
        let count = graph.in_neighbours(vertex)?.len();
        if count > best.1 {
            best = (vertex, count);
        }
    }
    Ok(best.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn config(seed: u64) -> SyntheticGraphConfig {
        SyntheticGraphConfig {
            vertex_count: 64,
            out_degree: 3,
            direction: Direction::Directed,
            seed,
        }
    }

    #[rstest]
    fn generation_is_deterministic_per_seed() -> Result<(), BenchSetupError> {
        let first = generate(&config(7))?;
        let second = generate(&config(7))?;
        assert_eq!(first.edges(), second.edges());
        assert_eq!(first.edge_count(), 64 * 3);
        Ok(())
    }

    #[rstest]
    fn generation_never_emits_self_loops() -> Result<(), BenchSetupError> {
        let graph = generate(&config(11))?;
        assert!(graph.edges().iter().all(|edge| edge.source() != edge.target()));
        Ok(())
    }

    #[rstest]
    fn tiny_graphs_are_rejected() {
        let mut tiny = config(1);
        tiny.vertex_count = 1;
        assert!(matches!(
            generate(&tiny),
            Err(BenchSetupError::ZeroValue { .. })
        ));
    }

    #[rstest]
    fn busiest_vertex_has_maximal_in_degree() -> Result<(), BenchSetupError> {
        let graph = generate(&config(3))?;
        let busiest = busiest_vertex(&graph)?;
        let best = graph.in_neighbours(busiest)?.len();
        for vertex in 0..graph.vertex_count() {
            assert!(graph.in_neighbours(vertex)?.len() <= best);
        }
        Ok(())
    }
}
