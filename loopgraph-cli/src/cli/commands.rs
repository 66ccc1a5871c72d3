//! Command implementations and argument parsing for the loopgraph CLI.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use loopgraph_core::{
    DEFAULT_MAX_ATTEMPTS, LoopgraphBuilder, LoopgraphError, MutualEdges, RenderConfig,
    SamplingStrategy,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

use super::session::{GenerationReport, Session};

const DEFAULT_NODES: &str = "5";
const DEFAULT_EDGES: &str = "7";
const DEFAULT_OUTPUT: &str = "graph.svg";
const DEFAULT_CANVAS: f64 = 600.0;
const DEFAULT_LAYOUT_RADIUS: f64 = 150.0;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "loopgraph",
    about = "Generate random connected graphs with self-loops and draw them."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate one graph and write it to the output file.
    Generate(GenerateCommand),
    /// Read `<nodes> <edges>` lines from stdin and redraw the output file for
    /// each accepted request.
    Interactive(InteractiveCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of vertices.
    #[arg(long, default_value = DEFAULT_NODES, allow_hyphen_values = true)]
    pub nodes: String,

    /// Number of edges, self-loops included.
    #[arg(long, default_value = DEFAULT_EDGES, allow_hyphen_values = true)]
    pub edges: String,

    /// Output and pipeline settings.
    #[command(flatten)]
    pub options: RenderOptions,
}

/// Options accepted by the `interactive` command.
#[derive(Debug, Args, Clone)]
pub struct InteractiveCommand {
    /// Output and pipeline settings.
    #[command(flatten)]
    pub options: RenderOptions,
}

/// Settings shared by every command.
#[derive(Debug, Args, Clone)]
pub struct RenderOptions {
    /// File the drawing is written to.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Seed for reproducible graphs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How a plain edge listed at both ends is drawn.
    #[arg(long = "mutual-edges", value_enum, default_value_t = MutualEdgeArg::Each)]
    pub mutual_edges: MutualEdgeArg,

    /// How edges beyond the spanning tree are sampled.
    #[arg(long, value_enum, default_value_t = StrategyArg::Pool)]
    pub strategy: StrategyArg,

    /// Sample budget for the rejection strategy.
    #[arg(long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u64,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = DEFAULT_CANVAS)]
    pub width: f64,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = DEFAULT_CANVAS)]
    pub height: f64,

    /// Radius of the circle the vertices sit on.
    #[arg(long, default_value_t = DEFAULT_LAYOUT_RADIUS)]
    pub radius: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: OutputFormat::Svg,
            seed: None,
            mutual_edges: MutualEdgeArg::Each,
            strategy: StrategyArg::Pool,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            width: DEFAULT_CANVAS,
            height: DEFAULT_CANVAS,
            radius: DEFAULT_LAYOUT_RADIUS,
        }
    }
}

/// Encodings the drawing can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone SVG document.
    Svg,
    /// Adjacency lists and drawing primitives as JSON.
    Json,
}

impl OutputFormat {
    /// Returns the lowercase label used in log fields.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}

/// Command-line spelling of [`MutualEdges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MutualEdgeArg {
    /// Draw a segment and arrowhead for each direction.
    Each,
    /// Draw a mutual pair once.
    Once,
}

impl From<MutualEdgeArg> for MutualEdges {
    fn from(value: MutualEdgeArg) -> Self {
        match value {
            MutualEdgeArg::Each => Self::EachDirection,
            MutualEdgeArg::Once => Self::Once,
        }
    }
}

/// Command-line spelling of [`SamplingStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Sample without replacement from the free edge slots.
    Pool,
    /// Resample random pairs until the edge count is met.
    Rejection,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing the drawing failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Encoding the JSON drawing failed.
    #[error("failed to encode `{path}` as JSON: {source}")]
    Json {
        /// Path being written.
        path: PathBuf,
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// Reading requests or writing status lines failed.
    #[error("failed to access the terminal: {source}")]
    Stream {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// An interactive line did not hold exactly two fields.
    #[error("expected `<nodes> <edges>` (got `{line}`)")]
    MalformedLine {
        /// The offending line, trimmed.
        line: String,
    },
    /// Core validation, generation or configuration failed.
    #[error(transparent)]
    Core(#[from] LoopgraphError),
}

impl CliError {
    /// Returns `true` when an interactive session may carry on after this
    /// error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedLine { .. }
                | Self::Core(LoopgraphError::Request(_) | LoopgraphError::Generation(_))
        )
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// A single `generate` run.
    Generated(GenerationReport),
    /// An `interactive` session that reached end of input.
    Session {
        /// Requests that produced a drawing.
        accepted: usize,
        /// Requests rejected with an error message.
        rejected: usize,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// `interactive` reads from the process stdin and writes status lines to
/// stdout.
///
/// # Errors
/// Returns [`CliError`] when configuration, validation or output fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use loopgraph_cli::cli::{
/// #     Cli, Command, ExecutionSummary, GenerateCommand, RenderOptions, run_cli,
/// # };
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         nodes: "5".into(),
///         edges: "4".into(),
///         options: RenderOptions {
///             output: dir.path().join("tree.svg"),
///             seed: Some(1),
///             ..RenderOptions::default()
///         },
///     }),
/// };
/// let ExecutionSummary::Generated(report) = run_cli(cli)? else {
///     panic!("generate returns a single report");
/// };
/// assert_eq!(report.loops, 0);
/// assert!(report.output.exists());
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Generate(command) => {
            Span::current().record("command", field::display("generate"));
            run_generate(command)
        }
        Command::Interactive(command) => {
            Span::current().record("command", field::display("interactive"));
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_interactive(command, stdin.lock(), stdout.lock())
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(nodes = %command.nodes, edges = %command.edges, output = field::Empty),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let GenerateCommand {
        nodes,
        edges,
        options,
    } = command;
    Span::current().record("output", field::display(options.output.display()));
    let mut session = build_session(&options)?;
    let report = session.submit(&nodes, &edges)?;
    Ok(ExecutionSummary::Generated(report))
}

/// Runs an interactive session over `input`, writing one status block or
/// `error: <message>` line per request to `output`.
///
/// Blank lines are skipped. Lines are decoded leniently, so bytes that are
/// not UTF-8 reject only their own request. Rejected requests are reported
/// and the session continues; I/O failures end it.
///
/// # Errors
/// Returns [`CliError`] when the configuration is invalid, the drawing
/// cannot be written, or the streams fail.
#[instrument(
    name = "cli.interactive",
    err,
    skip(command, input, output),
    fields(accepted = field::Empty, rejected = field::Empty),
)]
pub fn run_interactive(
    command: InteractiveCommand,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<ExecutionSummary, CliError> {
    let mut session = build_session(&command.options)?;
    let mut accepted = 0;
    let mut rejected = 0;
    let mut raw = Vec::new();

    loop {
        raw.clear();
        let read = input
            .read_until(b'\n', &mut raw)
            .map_err(|source| CliError::Stream { source })?;
        if read == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD and fail number parsing downstream.
        let text = String::from_utf8_lossy(&raw);
        let line = text.trim();
        if line.is_empty() {
            continue;
        }
        match submit_line(&mut session, line) {
            Ok(report) => {
                accepted += 1;
                render_report(&report, &mut output).map_err(|source| CliError::Stream { source })?;
            }
            Err(err) if err.is_recoverable() => {
                rejected += 1;
                warn!(error = %err, line, "request rejected");
                writeln!(output, "error: {err}").map_err(|source| CliError::Stream { source })?;
            }
            Err(err) => return Err(err),
        }
        output
            .flush()
            .map_err(|source| CliError::Stream { source })?;
    }

    let span = Span::current();
    span.record("accepted", accepted);
    span.record("rejected", rejected);
    info!(accepted, rejected, "session finished");
    Ok(ExecutionSummary::Session { accepted, rejected })
}

fn submit_line(session: &mut Session, line: &str) -> Result<GenerationReport, CliError> {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(nodes), Some(edges), None) => session.submit(nodes, edges),
        _ => Err(CliError::MalformedLine {
            line: line.to_owned(),
        }),
    }
}

pub(super) fn build_session(options: &RenderOptions) -> Result<Session, CliError> {
    let strategy = match options.strategy {
        StrategyArg::Pool => SamplingStrategy::CandidatePool,
        StrategyArg::Rejection => SamplingStrategy::Rejection {
            max_attempts: options.max_attempts,
        },
    };
    let render = RenderConfig::default()
        .with_canvas(options.width, options.height)
        .with_layout_radius(options.radius)
        .with_mutual_edges(options.mutual_edges.into());

    let mut builder = LoopgraphBuilder::new()
        .with_strategy(strategy)
        .with_render_config(render);
    if let Some(seed) = options.seed {
        builder = builder.with_seed(seed);
    }
    let loopgraph = builder.build()?;
    Ok(Session::new(
        loopgraph,
        options.output.clone(),
        options.format,
    ))
}

/// Writes the status block for one accepted request.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
pub fn render_report(report: &GenerationReport, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "output: {}", report.output.display())?;
    writeln!(writer, "vertices: {}", report.nodes)?;
    writeln!(writer, "edges: {}", report.edges)?;
    writeln!(writer, "elapsed: {:.3} ms", report.elapsed_millis())?;
    writeln!(writer, "loops: {}", report.loops)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use loopgraph_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Session { accepted: 3, rejected: 1 };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "accepted: 3\nrejected: 1\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Generated(report) => render_report(report, writer),
        ExecutionSummary::Session { accepted, rejected } => {
            writeln!(writer, "accepted: {accepted}")?;
            writeln!(writer, "rejected: {rejected}")
        }
    }
}
