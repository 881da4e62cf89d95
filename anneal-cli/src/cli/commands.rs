//! Command implementation and argument parsing for the anneal CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anneal_core::{
    AnnealBuilder, AnnealError, DEFAULT_MAX_EDGES, Graph, GraphError, SearchOutcome,
    TraversalMode,
};
use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Verdict line printed when at least one candidate survives every filter.
pub const VERDICT_YES: &str = "YES, this is a valid Hamiltonian path";

/// Verdict line printed when the survivor set is empty.
pub const VERDICT_NO: &str = "NO, this is not a valid Hamiltonian path";

/// Command-line options parsed by [`clap`].
#[derive(Clone, Debug, Parser)]
#[command(
    name = "anneal",
    about = "Search for a Hamiltonian path with a simulated DNA computation."
)]
pub struct Cli {
    /// Path to a JSON document mapping each vertex id to its successor ids.
    pub graph: PathBuf,

    /// Identifier of the vertex the path must start at.
    pub start: String,

    /// Identifier of the vertex the path must end at.
    pub end: String,

    /// Seed for reproducible strand assignment (defaults to OS entropy).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Refuse to enumerate graphs with more distinct edge strands than this.
    #[arg(
        long = "max-edges",
        default_value_t = DEFAULT_MAX_EDGES,
        value_parser = clap::value_parser!(usize),
    )]
    pub max_edges: usize,

    /// Whether survivors must form an open path or a closed cycle.
    #[arg(long, value_enum, default_value_t = ModeArg::Path)]
    pub mode: ModeArg,
}

/// Traversal semantics selectable on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    /// Survivors must visit every vertex exactly once.
    Path,
    /// Survivors must additionally return to the start vertex.
    Cycle,
}

impl From<ModeArg> for TraversalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Path => Self::Path,
            ModeArg::Cycle => Self::Cycle,
        }
    }
}

/// Errors surfaced while executing the CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening the graph document.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating-system error.
        #[source]
        source: io::Error,
    },
    /// The graph document failed to load or validate.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Core configuration or search failed.
    #[error(transparent)]
    Core(#[from] AnnealError),
}

impl CliError {
    /// Returns the stable machine-readable code of the underlying failure,
    /// when one exists.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => None,
            Self::Graph(err) => Some(err.code().as_str()),
            Self::Core(err) => Some(err.code().as_str()),
        }
    }
}

/// The rendered outcome of one CLI invocation.
#[derive(Clone, Debug)]
pub struct Report {
    /// Requested start vertex id.
    pub start: String,
    /// Requested end vertex id.
    pub end: String,
    /// Full search record produced by the core pipeline.
    pub outcome: SearchOutcome,
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the graph cannot be loaded or the search fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use anneal_cli::cli::{Cli, ModeArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), r#"{"A": ["B"], "B": ["C"], "C": []}"#)?;
/// let cli = Cli {
///     graph: file.path().to_path_buf(),
///     start: "A".to_owned(),
///     end: "C".to_owned(),
///     seed: Some(7),
///     max_edges: 6,
///     mode: ModeArg::Path,
/// };
/// let report = run_cli(cli)?;
/// assert!(report.outcome.is_hamiltonian());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(graph = field::Empty, mode = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<Report, CliError> {
    let span = Span::current();
    span.record("graph", field::display(cli.graph.display()));
    let mode_label = match cli.mode {
        ModeArg::Path => "path",
        ModeArg::Cycle => "cycle",
    };
    span.record("mode", field::display(mode_label));

    let anneal = AnnealBuilder::new()
        .with_max_edges(cli.max_edges)
        .with_mode(cli.mode.into());
    let anneal = match cli.seed {
        Some(seed) => anneal.with_seed(seed),
        None => anneal,
    }
    .build()?;

    let reader = open_graph_reader(&cli.graph)?;
    let graph = Graph::from_reader(reader)?;
    let outcome = anneal.run(&graph, &cli.start, &cli.end)?;

    info!(
        vertices = graph.vertex_count(),
        edges = outcome.edge_count(),
        hamiltonian = outcome.is_hamiltonian(),
        "search completed"
    );
    Ok(Report {
        start: cli.start,
        end: cli.end,
        outcome,
    })
}

#[instrument(name = "cli.open_graph", err, fields(path = field::Empty))]
fn open_graph_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Renders `report` to `writer` in the narrated text format.
///
/// The output carries the progress narration, the vertex encodings in 5'→3'
/// notation, the verdict line, and each surviving path in both raw-strand
/// and vertex-id notation.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_report(report: &Report, mut writer: impl Write) -> io::Result<()> {
    let outcome = &report.outcome;
    let trace = outcome.trace();

    writeln!(
        writer,
        "searching for a hamiltonian path from `{}` to `{}`",
        report.start, report.end
    )?;
    writeln!(writer, "encoded {} vertex strands:", outcome.encodings().len())?;
    for (vertex, strand) in outcome.encodings() {
        writeln!(writer, "  {vertex}: 5'-{strand}-3'")?;
    }
    writeln!(writer, "synthesised {} edge strands", outcome.edge_count())?;
    writeln!(writer, "distinct validated assemblies: {}", trace.validated)?;
    writeln!(writer, "after endpoint filter: {}", trace.after_endpoints)?;
    writeln!(writer, "after length filter: {}", trace.after_length)?;
    writeln!(writer, "after coverage filter: {}", trace.after_coverage)?;

    if outcome.is_hamiltonian() {
        writeln!(writer, "{VERDICT_YES}")?;
        for solution in outcome.solutions() {
            writeln!(writer, "strands:  {}", solution.raw())?;
            writeln!(writer, "vertices: {}", solution.vertex_sequence())?;
        }
    } else {
        writeln!(writer, "{VERDICT_NO}")?;
    }
    Ok(())
}
