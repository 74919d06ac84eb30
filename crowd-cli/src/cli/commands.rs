//! Command implementations and argument parsing for the crowd CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use crowd_core::{
    CrowdBuilder, CrowdError, Direction, EdgeWeighting, GraphSource, ObserverParams, PoolError,
    PruneConfig, TaskPool, prune, scan_observers,
};
use crowd_providers_edgelist::{EdgeListError, EdgeListOptions, EdgeListSource};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "crowd", about = "Find (m,k)-observers in an edge-list graph.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Decide whether one vertex is an (m,k)-observer.
    Observe(ObserveCommand),
    /// List every (m,k)-observer in the graph.
    Scan(ScanCommand),
    /// Iteratively remove low-degree vertices and light edges.
    Prune(PruneCommand),
}

/// Edge-list input shared by every command.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Edge list with one `source target [weight]` line per edge.
    pub path: PathBuf,

    /// Follow edges in both directions.
    #[arg(long)]
    pub undirected: bool,

    /// Override name for the graph (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Observer thresholds.
#[derive(Debug, Args, Clone, Copy)]
pub struct QueryArgs {
    /// Minimum length of every path between two informants.
    #[arg(short)]
    pub m: u32,

    /// Minimum number of mutually independent informants.
    #[arg(short)]
    pub k: u32,

    /// Measure paths by summed edge weight instead of hop count.
    #[arg(long)]
    pub weighted: bool,
}

/// Options accepted by the `observe` command.
#[derive(Debug, Args, Clone)]
pub struct ObserveCommand {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Vertex label from the edge list, or its numeric id.
    #[arg(long)]
    pub vertex: String,

    #[command(flatten)]
    pub query: QueryArgs,
}

/// Options accepted by the `scan` command.
#[derive(Debug, Args, Clone)]
pub struct ScanCommand {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Worker threads (defaults to the available parallelism).
    #[arg(long)]
    pub workers: Option<NonZeroUsize>,
}

/// Options accepted by the `prune` command.
#[derive(Debug, Args, Clone)]
pub struct PruneCommand {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Vertices with a lower degree are removed.
    #[arg(long = "min-degree", default_value_t = PruneConfig::DEFAULT_MIN_DEGREE)]
    pub min_degree: usize,

    /// Edges with a lower weight are removed before pruning starts.
    #[arg(long = "min-edge-weight", default_value_t = PruneConfig::DEFAULT_MIN_EDGE_WEIGHT)]
    pub min_edge_weight: f64,

    /// Worker threads (defaults to the available parallelism).
    #[arg(long)]
    pub workers: Option<NonZeroUsize>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The edge-list file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// `--vertex` matched neither a label nor a numeric id.
    #[error("`{vertex}` is not a vertex label or id in graph `{graph}`")]
    UnknownVertex {
        /// Raw value passed to `--vertex`.
        vertex: String,
        /// Name of the loaded graph.
        graph: String,
    },
    /// Edge-list ingestion failed.
    #[error(transparent)]
    EdgeList(#[from] EdgeListError),
    /// The worker pool could not be started.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The observer engine rejected the query.
    #[error(transparent)]
    Core(#[from] CrowdError),
}

impl CliError {
    /// Returns the stable code of the underlying library error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::EdgeList(error) => Some(error.code().as_str()),
            Self::Pool(error) => Some(error.code().as_str()),
            Self::Core(error) => Some(error.code().as_str()),
            Self::Io { .. } | Self::UnknownVertex { .. } => None,
        }
    }
}

/// Verdict for a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserveSummary {
    pub graph: String,
    pub vertex: String,
    pub m: u32,
    pub k: u32,
    pub observer: bool,
}

/// Every observer found by a scan, as labels in vertex order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub graph: String,
    pub m: u32,
    pub k: u32,
    pub observers: Vec<String>,
}

/// Size of the pruned graph and the labels it kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneSummary {
    pub graph: String,
    pub vertices: usize,
    pub edges: usize,
    pub iterations: usize,
    pub retained: Vec<String>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionSummary {
    Observe(ObserveSummary),
    Scan(ScanSummary),
    Prune(PruneSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the graph or running the command fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use crowd_cli::cli::{
/// #     Cli, Command, ExecutionSummary, GraphArgs, ObserveCommand, QueryArgs, run_cli,
/// # };
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "a b\nb c\nc d\n")?;
/// let cli = Cli {
///     command: Command::Observe(ObserveCommand {
///         graph: GraphArgs {
///             path: file.path().to_path_buf(),
///             undirected: true,
///             name: None,
///         },
///         vertex: "c".into(),
///         query: QueryArgs { m: 3, k: 2, weighted: false },
///     }),
/// };
/// let ExecutionSummary::Observe(summary) = run_cli(cli)? else {
///     panic!("observe yields an observe summary");
/// };
/// assert!(summary.observer);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    let summary = match cli.command {
        Command::Observe(command) => {
            span.record("command", field::display("observe"));
            ExecutionSummary::Observe(run_observe(command)?)
        }
        Command::Scan(command) => {
            span.record("command", field::display("scan"));
            ExecutionSummary::Scan(run_scan(command)?)
        }
        Command::Prune(command) => {
            span.record("command", field::display("prune"));
            ExecutionSummary::Prune(run_prune(command)?)
        }
    };
    Ok(summary)
}

#[instrument(
    name = "cli.observe",
    err,
    skip(command),
    fields(vertex = %command.vertex, m = command.query.m, k = command.query.k),
)]
pub(super) fn run_observe(command: ObserveCommand) -> Result<ObserveSummary, CliError> {
    let ObserveCommand {
        graph,
        vertex,
        query,
    } = command;
    let source = load_graph(&graph)?;
    let id = resolve_vertex(&source, &vertex)?;
    let crowd = CrowdBuilder::new()
        .with_weighting(weighting(query))
        .build_shared(source.shared_graph());
    let observer = crowd.is_observer(id, ObserverParams::new(query.m, query.k)?)?;
    info!(graph = source.name(), vertex = id, observer, "observe completed");
    Ok(ObserveSummary {
        graph: source.name().to_owned(),
        vertex: vertex_label(&source, id),
        m: query.m,
        k: query.k,
        observer,
    })
}

#[instrument(
    name = "cli.scan",
    err,
    skip(command),
    fields(m = command.query.m, k = command.query.k, workers = field::Empty),
)]
pub(super) fn run_scan(command: ScanCommand) -> Result<ScanSummary, CliError> {
    let ScanCommand {
        graph,
        query,
        workers,
    } = command;
    let params = ObserverParams::new(query.m, query.k)?;
    let source = load_graph(&graph)?;
    let pool = start_pool(workers)?;
    Span::current().record("workers", pool.worker_count());
    let crowd = Arc::new(
        CrowdBuilder::new()
            .with_weighting(weighting(query))
            .build_shared(source.shared_graph()),
    );
    let observers = scan_observers(&pool, &crowd, params)?;
    info!(
        graph = source.name(),
        observers = observers.len(),
        "scan completed"
    );
    Ok(ScanSummary {
        graph: source.name().to_owned(),
        m: query.m,
        k: query.k,
        observers: observers
            .into_iter()
            .map(|id| vertex_label(&source, id))
            .collect(),
    })
}

#[instrument(
    name = "cli.prune",
    err,
    skip(command),
    fields(min_degree = command.min_degree, min_edge_weight = command.min_edge_weight),
)]
pub(super) fn run_prune(command: PruneCommand) -> Result<PruneSummary, CliError> {
    let PruneCommand {
        graph,
        min_degree,
        min_edge_weight,
        workers,
    } = command;
    let source = load_graph(&graph)?;
    let pool = start_pool(workers)?;
    let config = PruneConfig::new()
        .with_min_degree(min_degree)
        .with_min_edge_weight(min_edge_weight);
    let outcome = prune(&pool, source.graph(), config)?;
    info!(
        graph = source.name(),
        vertices = outcome.graph().vertex_count(),
        iterations = outcome.iterations(),
        "prune completed"
    );
    Ok(PruneSummary {
        graph: source.name().to_owned(),
        vertices: outcome.graph().vertex_count(),
        edges: outcome.graph().edge_count(),
        iterations: outcome.iterations(),
        retained: outcome
            .retained()
            .iter()
            .map(|&id| vertex_label(&source, id))
            .collect(),
    })
}

fn load_graph(args: &GraphArgs) -> Result<EdgeListSource, CliError> {
    let name = derive_graph_name(&args.path, args.name.as_deref());
    let direction = if args.undirected {
        Direction::Undirected
    } else {
        Direction::Directed
    };
    let reader = open_edge_list(&args.path)?;
    let source = EdgeListSource::try_from_reader(
        name,
        reader,
        EdgeListOptions::new().with_direction(direction),
    )?;
    Ok(source)
}

#[instrument(name = "cli.open_edge_list", err, fields(path = field::Empty))]
pub(super) fn open_edge_list(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_graph_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "graph".to_owned())
}

/// Labels win over numeric ids so a graph whose tokens are numbers still
/// resolves by token.
pub(super) fn resolve_vertex(source: &EdgeListSource, raw: &str) -> Result<usize, CliError> {
    if let Some(id) = source.vertex_by_label(raw) {
        return Ok(id);
    }
    raw.parse().map_err(|_| CliError::UnknownVertex {
        vertex: raw.to_owned(),
        graph: source.name().to_owned(),
    })
}

fn vertex_label(source: &EdgeListSource, id: usize) -> String {
    source
        .label(id)
        .map_or_else(|| id.to_string(), ToOwned::to_owned)
}

fn weighting(query: QueryArgs) -> EdgeWeighting {
    if query.weighted {
        EdgeWeighting::Weighted
    } else {
        EdgeWeighting::Unit
    }
}

fn start_pool(workers: Option<NonZeroUsize>) -> Result<TaskPool, PoolError> {
    match workers {
        Some(workers) => TaskPool::with_workers(workers),
        None => TaskPool::new(),
    }
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Observe(observe) => {
            writeln!(writer, "graph: {}", observe.graph)?;
            let verdict = if observe.observer { "is" } else { "is not" };
            writeln!(
                writer,
                "{} {verdict} a ({},{})-observer",
                observe.vertex, observe.m, observe.k
            )?;
        }
        ExecutionSummary::Scan(scan) => {
            writeln!(writer, "graph: {}", scan.graph)?;
            writeln!(
                writer,
                "({},{})-observers: {}",
                scan.m,
                scan.k,
                scan.observers.len()
            )?;
            for label in &scan.observers {
                writeln!(writer, "{label}")?;
            }
        }
        ExecutionSummary::Prune(pruned) => {
            writeln!(writer, "graph: {}", pruned.graph)?;
            writeln!(writer, "vertices: {}", pruned.vertices)?;
            writeln!(writer, "edges: {}", pruned.edges)?;
            writeln!(writer, "iterations: {}", pruned.iterations)?;
            for label in &pruned.retained {
                writeln!(writer, "{label}")?;
            }
        }
    }
    Ok(())
}
