//! Pooled pass benchmarks.
//!
//! Measures `scan_observers` and `prune` across worker counts so the cost of
//! chunk distribution shows up against the single-worker baseline.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]
#![allow(
    clippy::excessive_nesting,
    reason = "Criterion bench_with_input + b.iter pattern requires deep nesting"
)]

use std::num::NonZeroUsize;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use crowd_benches::{
    params::ScanBenchParams,
    source::{SyntheticGraphConfig, generate},
};
use crowd_core::{
    CrowdBuilder, Direction, ObserverParams, PoolConfig, PruneConfig, TaskPool, prune,
    scan_observers,
};

/// Seed used for all synthetic graph generation in this benchmark.
const SEED: u64 = 7;

/// Random out-edges per vertex.
const OUT_DEGREE: usize = 3;

/// Graph size shared by every run.
const VERTEX_COUNT: usize = 1_000;

/// Worker counts to benchmark.
const WORKER_COUNTS: &[usize] = &[1, 2, 4];

fn pool(worker_count: usize) -> TaskPool {
    let workers = NonZeroUsize::new(worker_count).expect("worker counts are non-zero");
    TaskPool::with_config(PoolConfig::new(workers).with_items_per_worker(0))
        .expect("task pool must start")
}

fn observer_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("observer_scan");
    group.sample_size(10);

    let graph = generate(&SyntheticGraphConfig {
        vertex_count: VERTEX_COUNT,
        out_degree: OUT_DEGREE,
        direction: Direction::Undirected,
        seed: SEED,
    })
    .expect("synthetic graph generation must succeed");
    let crowd = Arc::new(CrowdBuilder::new().build(graph));
    let params = ObserverParams::new(3, 3).expect("thresholds must be valid");

    for &workers in WORKER_COUNTS {
        let pool = pool(workers);
        let bench_params = ScanBenchParams {
            vertex_count: VERTEX_COUNT,
            workers,
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(&bench_params),
            &params,
            |b, &params| {
                b.iter(|| scan_observers(&pool, &crowd, params).expect("scan must succeed"));
            },
        );
    }
    group.finish();
}

fn iterative_prune(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterative_prune");
    group.sample_size(10);

    let graph = generate(&SyntheticGraphConfig {
        vertex_count: VERTEX_COUNT,
        out_degree: 1,
        direction: Direction::Undirected,
        seed: SEED,
    })
    .expect("synthetic graph generation must succeed");
    let config = PruneConfig::new().with_min_degree(3);

    for &workers in WORKER_COUNTS {
        let pool = pool(workers);
        let bench_params = ScanBenchParams {
            vertex_count: VERTEX_COUNT,
            workers,
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(&bench_params),
            &config,
            |b, &config| {
                b.iter(|| prune(&pool, &graph, config).expect("prune must succeed"));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, observer_scan, iterative_prune);
criterion_main!(benches);
