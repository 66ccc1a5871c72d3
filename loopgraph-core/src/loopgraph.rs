//! Generation and rendering orchestration.
//!
//! Provides the [`Loopgraph`] entry point that runs a validated request
//! through the generator and the renderer and times the pair.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use crate::{
    Result,
    adjacency::AdjacencyMap,
    generator::{GraphGenerator, SamplingStrategy},
    render::{GraphRenderer, RenderConfig, Scene},
    request::GraphRequest,
};

/// Everything produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOutcome {
    request: GraphRequest,
    graph: AdjacencyMap,
    scene: Scene,
    elapsed: Duration,
}

impl GraphOutcome {
    /// Returns the request that produced this outcome.
    #[must_use]
    pub const fn request(&self) -> &GraphRequest {
        &self.request
    }

    /// Returns the generated adjacency map.
    #[must_use]
    pub const fn graph(&self) -> &AdjacencyMap {
        &self.graph
    }

    /// Returns the rendered scene.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the number of self-loops in the graph.
    #[must_use]
    pub const fn loop_count(&self) -> usize {
        self.scene.loop_count()
    }

    /// Returns the time spent generating and rendering.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the elapsed time in fractional milliseconds.
    #[must_use]
    pub const fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

/// Entry point for generating and drawing graphs.
///
/// # Examples
/// ```
/// use loopgraph_core::{GraphRequest, LoopgraphBuilder};
///
/// let loopgraph = LoopgraphBuilder::new()
///     .with_seed(3)
///     .build()
///     .expect("builder must succeed");
/// let request = GraphRequest::new(5, 4).expect("request is valid");
/// let outcome = loopgraph.run(&request).expect("run must succeed");
/// assert_eq!(outcome.loop_count(), 0);
/// assert_eq!(outcome.graph().edge_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Loopgraph {
    generator: GraphGenerator,
    renderer: GraphRenderer,
    seed: Option<u64>,
}

impl Loopgraph {
    pub(crate) const fn new(
        strategy: SamplingStrategy,
        render: RenderConfig,
        seed: Option<u64>,
    ) -> Self {
        Self {
            generator: GraphGenerator::new(strategy),
            renderer: GraphRenderer::new(render),
            seed,
        }
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the generator used by this instance.
    #[must_use]
    pub const fn generator(&self) -> &GraphGenerator {
        &self.generator
    }

    /// Returns the renderer used by this instance.
    #[must_use]
    pub const fn renderer(&self) -> &GraphRenderer {
        &self.renderer
    }

    /// Creates the random source for [`Self::run`]: seeded when a seed is
    /// configured, otherwise from operating system entropy.
    #[must_use]
    pub fn rng(&self) -> SmallRng {
        self.seed
            .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64)
    }

    /// Generates and renders a graph for `request`.
    ///
    /// Every call with a seeded instance produces the same graph.
    ///
    /// # Errors
    /// Returns [`crate::LoopgraphError::Generation`] when generation fails.
    pub fn run(&self, request: &GraphRequest) -> Result<GraphOutcome> {
        let mut rng = self.rng();
        self.run_with_rng(request, &mut rng)
    }

    /// Generates and renders a graph for `request` using `rng`.
    ///
    /// # Errors
    /// Returns [`crate::LoopgraphError::Generation`] when generation fails.
    #[instrument(
        name = "core.run",
        err,
        skip(self, request, rng),
        fields(
            nodes = request.nodes().get(),
            edges = request.edges(),
            strategy = self.generator.strategy().label(),
        ),
    )]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        request: &GraphRequest,
        rng: &mut R,
    ) -> Result<GraphOutcome> {
        let started = Instant::now();
        let graph = self.generator.generate(request, rng)?;
        let scene = self.renderer.render(&graph);
        let elapsed = started.elapsed();

        info!(
            loops = scene.loop_count(),
            elapsed_ms = elapsed.as_secs_f64() * 1_000.0,
            "graph built"
        );
        Ok(GraphOutcome {
            request: *request,
            graph,
            scene,
            elapsed,
        })
    }
}
