//! Shared test utilities used across crowd crates.

pub mod ci;
pub mod tracing;
