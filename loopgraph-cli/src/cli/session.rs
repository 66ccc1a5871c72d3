//! Interactive session state: one reusable rendering surface and the two
//! status values shown after every request.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use loopgraph_core::{
    AdjacencyMap, GraphOutcome, GraphRequest, Loopgraph, LoopgraphError, Scene, svg,
};
use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::{Span, debug, field, info, instrument};

use super::commands::{CliError, OutputFormat};

/// Outcome of one accepted request, as reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// File the surface was written to.
    pub output: PathBuf,
    /// Vertex count of the generated graph.
    pub nodes: usize,
    /// Edge count of the generated graph, self-loops included.
    pub edges: usize,
    /// Number of self-loops.
    pub loops: usize,
    /// Time spent generating and rendering.
    pub elapsed: Duration,
}

impl GenerationReport {
    /// Returns the elapsed time in fractional milliseconds.
    #[must_use]
    pub const fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

/// Latest values of the elapsed-time and loop-count displays.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusLabels {
    /// Build time of the last accepted request.
    pub elapsed: Option<Duration>,
    /// Loop count of the last accepted request.
    pub loops: Option<usize>,
}

/// The output file a session draws into.
///
/// Created on the first accepted request and rewritten by every later one.
#[derive(Debug)]
pub struct RenderSurface {
    path: PathBuf,
    format: OutputFormat,
    redraws: usize,
}

impl RenderSurface {
    fn create(path: &Path, format: OutputFormat) -> Self {
        info!(path = %path.display(), format = format.label(), "rendering surface created");
        Self {
            path: path.to_path_buf(),
            format,
            redraws: 0,
        }
    }

    /// Returns the file backing this surface.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns how many times the surface has been drawn.
    #[must_use]
    pub const fn redraws(&self) -> usize {
        self.redraws
    }

    #[instrument(name = "cli.surface.draw", err, skip(self, outcome), fields(path = %self.path.display()))]
    fn draw(&mut self, outcome: &GraphOutcome) -> Result<(), CliError> {
        let file = File::create(&self.path).map_err(|source| CliError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        match self.format {
            OutputFormat::Svg => svg::write_svg(outcome.scene(), &mut writer).map_err(|source| {
                CliError::Io {
                    path: self.path.clone(),
                    source,
                }
            })?,
            OutputFormat::Json => {
                let document = JsonDocument {
                    nodes: outcome.request().nodes().get(),
                    edges: outcome.request().edges(),
                    loops: outcome.loop_count(),
                    elapsed_ms: outcome.elapsed_millis(),
                    adjacency: outcome.graph(),
                    scene: outcome.scene(),
                };
                serde_json::to_writer_pretty(&mut writer, &document).map_err(|source| {
                    CliError::Json {
                        path: self.path.clone(),
                        source,
                    }
                })?;
            }
        }
        writer.flush().map_err(|source| CliError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.redraws += 1;
        debug!(redraws = self.redraws, "surface redrawn");
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    nodes: usize,
    edges: usize,
    loops: usize,
    elapsed_ms: f64,
    adjacency: &'a AdjacencyMap,
    scene: &'a Scene,
}

/// Owns the configured pipeline, the random source, at most one rendering
/// surface, and the status labels.
///
/// Seeded sessions draw their graphs from one seeded stream, so a replayed
/// sequence of requests yields the same sequence of graphs.
#[derive(Debug)]
pub struct Session {
    loopgraph: Loopgraph,
    rng: SmallRng,
    output: PathBuf,
    format: OutputFormat,
    surface: Option<RenderSurface>,
    status: StatusLabels,
}

impl Session {
    /// Creates a session that will draw into `output`.
    #[must_use]
    pub fn new(loopgraph: Loopgraph, output: PathBuf, format: OutputFormat) -> Self {
        let rng = loopgraph.rng();
        Self {
            loopgraph,
            rng,
            output,
            format,
            surface: None,
            status: StatusLabels::default(),
        }
    }

    /// Returns the live surface, if a request has been accepted yet.
    #[must_use]
    pub const fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    /// Returns the current status labels.
    #[must_use]
    pub const fn status(&self) -> &StatusLabels {
        &self.status
    }

    /// Validates the two counts, generates and renders a graph, draws it on
    /// the session surface, and updates the status labels.
    ///
    /// Rejected requests leave the surface and labels untouched.
    ///
    /// # Errors
    /// Returns [`CliError::Core`] for invalid input or failed generation and
    /// [`CliError::Io`] or [`CliError::Json`] when the surface cannot be
    /// written.
    #[instrument(
        name = "cli.session.submit",
        err,
        skip(self),
        fields(loops = field::Empty, redraws = field::Empty),
    )]
    pub fn submit(&mut self, nodes: &str, edges: &str) -> Result<GenerationReport, CliError> {
        let request = GraphRequest::parse(nodes, edges).map_err(LoopgraphError::from)?;
        let outcome = self.loopgraph.run_with_rng(&request, &mut self.rng)?;

        let surface = self
            .surface
            .get_or_insert_with(|| RenderSurface::create(&self.output, self.format));
        surface.draw(&outcome)?;

        self.status = StatusLabels {
            elapsed: Some(outcome.elapsed()),
            loops: Some(outcome.loop_count()),
        };

        let span = Span::current();
        span.record("loops", outcome.loop_count());
        span.record("redraws", surface.redraws());
        info!(
            elapsed_ms = outcome.elapsed_millis(),
            loops = outcome.loop_count(),
            "request completed"
        );

        Ok(GenerationReport {
            output: surface.path().to_path_buf(),
            nodes: request.nodes().get(),
            edges: request.edges(),
            loops: outcome.loop_count(),
            elapsed: outcome.elapsed(),
        })
    }
}
