//! Clique-growth search for `k` pairwise independent informants.

use tracing::{debug, trace};

use crate::{
    clique::{CliqueId, CliqueRegistry},
    error::GraphError,
    graph::GraphSource,
    independence::IndependenceTester,
};

use super::params::ObserverParams;

/// Decides whether `vertex` has `k` in-neighbours that are pairwise
/// `m`-independent with `vertex`'s edges removed.
///
/// Pairs `(a, b)` are visited with `b` earlier than `a` in ascending
/// neighbour order. Every independent pair seeds a two-member clique that is
/// merged with equally sized cliques already registered under `a` and `b`;
/// a merge counts when the union is exactly one member larger than either
/// parent. This grows witnesses greedily and is not a maximum-clique search.
pub(super) fn decide<G>(
    tester: &IndependenceTester<'_, G>,
    graph: &G,
    vertex: usize,
    params: ObserverParams,
) -> Result<bool, GraphError>
where
    G: GraphSource + ?Sized,
{
    let neighbours = graph.in_neighbours(vertex)?;
    let (m, k) = (params.m(), params.informants());

    // Unreachable while k > 1 is enforced.
    if neighbours.len() == 1 && k == 1 && m == 1 {
        return Ok(true);
    }
    if neighbours.len() < k {
        debug!(vertex, neighbours = neighbours.len(), k, "too few in-neighbours");
        return Ok(false);
    }

    let mut registry = CliqueRegistry::default();
    for (position, &a) in neighbours.iter().enumerate() {
        for &b in &neighbours[..position] {
            if !tester.test(a, b, vertex, m)? {
                continue;
            }
            if k <= 2 {
                trace!(vertex, a, b, "independent pair satisfies k");
                return Ok(true);
            }
            if grow(&mut registry, a, b, k) {
                return Ok(true);
            }
        }
    }
    debug!(vertex, cliques = registry.len(), "no clique reached k");
    Ok(false)
}

/// Registers `{a, b}` and merges it into larger cliques. Returns `true` once a
/// merge reaches `k` members.
fn grow(registry: &mut CliqueRegistry, a: usize, b: usize, k: usize) -> bool {
    let seed = registry.register_pair(a, b);
    let combinations: Vec<(CliqueId, CliqueId)> = registry
        .cliques_of(a)
        .iter()
        .flat_map(|&left| {
            registry
                .cliques_of(b)
                .iter()
                .map(move |&right| (left, right))
        })
        .collect();

    for (left, right) in combinations {
        if left == seed || right == seed {
            continue;
        }
        let size = registry.size(left);
        if size != registry.size(right) {
            continue;
        }
        let union = registry.union(left, right);
        if union.len() != size + 1 {
            continue;
        }
        if union.len() >= k {
            trace!(members = ?union, "clique reached k");
            return true;
        }
        registry.insert(union);
    }
    false
}
