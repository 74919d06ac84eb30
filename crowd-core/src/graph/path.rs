//! Vertex-excluded single-pair shortest paths.

use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, VecDeque},
    fmt,
};

use super::{GraphSource, adjacency::Graph};

/// Cost model used by path queries.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PathMetric {
    /// Every edge costs one hop; breadth-first search.
    #[default]
    Hops,
    /// Edges cost their weight; Dijkstra's algorithm. Falls back to hops on
    /// graphs without weights.
    Weighted,
}

/// Length of a shortest path, or the absence of one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathLength {
    /// A path exists with the given total cost.
    Finite(f64),
    /// No path exists.
    Unreachable,
}

impl PathLength {
    /// Returns whether the endpoints lie at least `minimum` apart.
    ///
    /// An unreachable target is infinitely far away and always qualifies.
    /// Finite costs are compared as real values; fractional weighted
    /// distances are never truncated.
    ///
    /// # Examples
    /// ```
    /// use crowd_core::PathLength;
    ///
    /// assert!(PathLength::Finite(2.0).at_least(2));
    /// assert!(!PathLength::Finite(1.5).at_least(2));
    /// assert!(PathLength::Unreachable.at_least(u32::MAX));
    /// ```
    #[must_use]
    pub fn at_least(self, minimum: u32) -> bool {
        match self {
            Self::Finite(cost) => cost >= f64::from(minimum),
            Self::Unreachable => true,
        }
    }

    /// Returns the cost when a path exists.
    #[must_use]
    pub fn finite(self) -> Option<f64> {
        match self {
            Self::Finite(cost) => Some(cost),
            Self::Unreachable => None,
        }
    }

    /// Returns whether a path exists.
    #[must_use]
    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

impl fmt::Display for PathLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(cost) => write!(f, "{cost}"),
            Self::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Breadth-first hop count from `source` to `target`, ignoring edges that
/// touch `excluded`.
pub(super) fn hop_distance(
    graph: &Graph,
    source: usize,
    target: usize,
    excluded: usize,
) -> PathLength {
    if source == target {
        return PathLength::Finite(0.0);
    }
    let mut hops: Vec<Option<u32>> = vec![None; graph.vertex_count()];
    hops[source] = Some(0);
    let mut frontier = VecDeque::from([source]);
    while let Some(vertex) = frontier.pop_front() {
        let Some(depth) = hops[vertex] else { continue };
        for (next, _) in graph.successors(vertex, excluded) {
            if hops[next].is_some() {
                continue;
            }
            if next == target {
                return PathLength::Finite(f64::from(depth + 1));
            }
            hops[next] = Some(depth + 1);
            frontier.push_back(next);
        }
    }
    PathLength::Unreachable
}

#[derive(Clone, Copy, Debug)]
struct Frontier {
    cost: f64,
    vertex: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

/// Dijkstra distance from `source` to `target`, ignoring edges that touch
/// `excluded`. Weights are validated non-negative at build time.
pub(super) fn weighted_distance(
    graph: &Graph,
    source: usize,
    target: usize,
    excluded: usize,
) -> PathLength {
    let mut best = vec![f64::INFINITY; graph.vertex_count()];
    best[source] = 0.0;
    let mut heap = BinaryHeap::from([Reverse(Frontier {
        cost: 0.0,
        vertex: source,
    })]);
    while let Some(Reverse(Frontier { cost, vertex })) = heap.pop() {
        if vertex == target {
            return PathLength::Finite(cost);
        }
        if cost > best[vertex] {
            continue;
        }
        for (next, weight) in graph.successors(vertex, excluded) {
            let candidate = cost + weight;
            if candidate < best[next] {
                best[next] = candidate;
                heap.push(Reverse(Frontier {
                    cost: candidate,
                    vertex: next,
                }));
            }
        }
    }
    PathLength::Unreachable
}
