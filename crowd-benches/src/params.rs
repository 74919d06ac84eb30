//! Benchmark parameter types.

use std::fmt;

/// Parameters for a single observer query.
#[derive(Clone, Debug)]
pub struct ObserverBenchParams {
    /// Number of vertices in the graph.
    pub vertex_count: usize,
    /// Minimum independent path length.
    pub m: u32,
    /// Minimum informant count.
    pub k: u32,
}

impl fmt::Display for ObserverBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={},k={}", self.vertex_count, self.m, self.k)
    }
}

/// Parameters for a pooled observer scan.
#[derive(Clone, Debug)]
pub struct ScanBenchParams {
    /// Number of vertices in the graph.
    pub vertex_count: usize,
    /// Worker threads in the pool.
    pub workers: usize,
}

impl fmt::Display for ScanBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},workers={}", self.vertex_count, self.workers)
    }
}
