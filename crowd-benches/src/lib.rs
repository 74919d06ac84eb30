//! Benchmark support crate for crowd.
//!
//! Provides seeded synthetic graphs and parameter types used by the Criterion
//! benchmarks for single observer queries and pooled scans.

pub mod error;
pub mod params;
pub mod source;
