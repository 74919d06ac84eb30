//! Command-line interface for the (m,k)-observer engine.
//!
//! Every command loads an edge-list file. `observe` checks one vertex, `scan`
//! checks every vertex on a worker pool, and `prune` strips low-degree
//! vertices until the graph is stable.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GraphArgs, ObserveCommand, ObserveSummary,
    PruneCommand, PruneSummary, QueryArgs, ScanCommand, ScanSummary, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
