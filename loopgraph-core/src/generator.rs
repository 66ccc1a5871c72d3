//! Random connected graph generation.
//!
//! Generation always starts from a uniformly random recursive spanning tree,
//! which fixes connectivity with exactly `nodes - 1` edges. The remaining
//! edges are drawn according to the configured [`SamplingStrategy`].

use rand::{Rng, seq::index};
use tracing::{debug, info, instrument};

use crate::{adjacency::AdjacencyMap, error::GenerationError, request::GraphRequest};

/// Default attempt budget for [`SamplingStrategy::Rejection`].
pub const DEFAULT_MAX_ATTEMPTS: u64 = 1_000_000;

/// Selects how edges beyond the spanning tree are chosen.
///
/// # Examples
/// ```
/// use loopgraph_core::SamplingStrategy;
///
/// assert_eq!(SamplingStrategy::default(), SamplingStrategy::CandidatePool);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// Draw the extra edges without replacement from every free slot: each
    /// unordered pair not already in the tree and each vertex's self-loop.
    /// Always terminates.
    #[default]
    CandidatePool,
    /// Resample uniform ordered pairs and discard duplicates until the edge
    /// count is met, giving up after `max_attempts` samples.
    Rejection {
        /// Sample budget before [`GenerationError::AttemptsExhausted`].
        max_attempts: u64,
    },
}

impl SamplingStrategy {
    /// Returns a short label used in log fields.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CandidatePool => "candidate_pool",
            Self::Rejection { .. } => "rejection",
        }
    }
}

/// A free edge slot in the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    Loop(usize),
    Pair(usize, usize),
}

/// Builds random connected graphs for validated requests.
///
/// # Examples
/// ```
/// use loopgraph_core::{GraphGenerator, GraphRequest, SamplingStrategy};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let request = GraphRequest::new(6, 9).expect("request is valid");
/// let generator = GraphGenerator::new(SamplingStrategy::CandidatePool);
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = generator.generate(&request, &mut rng).expect("pool sampling terminates");
/// assert_eq!(graph.edge_count(), 9);
/// assert!(graph.is_connected());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphGenerator {
    strategy: SamplingStrategy,
}

impl GraphGenerator {
    /// Creates a generator using `strategy` for the extra edges.
    #[must_use]
    pub const fn new(strategy: SamplingStrategy) -> Self {
        Self { strategy }
    }

    /// Returns the configured sampling strategy.
    #[must_use]
    pub const fn strategy(&self) -> SamplingStrategy {
        self.strategy
    }

    /// Generates a connected graph with exactly `request.edges()` edges.
    ///
    /// Self-loops are drawn like any other extra edge, so a two-vertex,
    /// two-edge request puts its loop on a random vertex, not always vertex 0.
    ///
    /// # Errors
    /// Returns [`GenerationError::AttemptsExhausted`] when the rejection
    /// sampler runs out of attempts. The candidate pool never fails.
    #[instrument(
        name = "core.generate",
        err,
        skip(self, request, rng),
        fields(
            nodes = request.nodes().get(),
            edges = request.edges(),
            strategy = self.strategy.label(),
        ),
    )]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        request: &GraphRequest,
        rng: &mut R,
    ) -> Result<AdjacencyMap, GenerationError> {
        let nodes = request.nodes().get();
        let mut graph = AdjacencyMap::with_nodes(nodes);
        let parents = grow_spanning_tree(&mut graph, rng);
        debug!(tree_edges = nodes - 1, "spanning tree built");

        match self.strategy {
            SamplingStrategy::CandidatePool => {
                add_from_pool(&mut graph, &parents, request.extra_edges(), rng);
            }
            SamplingStrategy::Rejection { max_attempts } => {
                add_by_rejection(&mut graph, request.edges(), max_attempts, rng)?;
            }
        }

        info!(loops = graph.loop_count(), "graph generated");
        Ok(graph)
    }
}

/// Attaches each vertex `i > 0` to a uniform parent in `[0, i)`.
///
/// Returns the parent table, indexed by child; entry 0 is unused.
fn grow_spanning_tree<R: Rng + ?Sized>(graph: &mut AdjacencyMap, rng: &mut R) -> Vec<usize> {
    let nodes = graph.node_count();
    let mut parents = vec![0; nodes];
    for (child, slot) in parents.iter_mut().enumerate().skip(1) {
        let parent = rng.gen_range(0..child);
        *slot = parent;
        graph.push_plain(child, parent);
    }
    parents
}

fn add_from_pool<R: Rng + ?Sized>(
    graph: &mut AdjacencyMap,
    parents: &[usize],
    extra: usize,
    rng: &mut R,
) {
    if extra == 0 {
        return;
    }
    let nodes = graph.node_count();
    let pool = nodes + triangle(nodes);
    let tree_edges = nodes - 1;
    // Tree edges sit inside the index space, so over-draw by their count and
    // skip them; the sample is fully shuffled, so the survivors are uniform.
    let amount = (extra + tree_edges).min(pool);

    let chosen = index::sample(rng, pool, amount)
        .into_iter()
        .map(|slot| decode_candidate(slot, nodes))
        .filter(|candidate| match *candidate {
            Candidate::Pair(low, high) => parents.get(high) != Some(&low),
            Candidate::Loop(_) => true,
        })
        .take(extra);

    for candidate in chosen {
        match candidate {
            Candidate::Loop(vertex) => graph.push_loop(vertex),
            Candidate::Pair(low, high) => graph.push_plain(low, high),
        }
    }
}

fn add_by_rejection<R: Rng + ?Sized>(
    graph: &mut AdjacencyMap,
    requested: usize,
    max_attempts: u64,
    rng: &mut R,
) -> Result<(), GenerationError> {
    let nodes = graph.node_count();
    let mut added = nodes - 1;
    let mut attempts = 0_u64;
    while added < requested {
        if attempts >= max_attempts {
            return Err(GenerationError::AttemptsExhausted {
                attempts,
                added,
                requested,
            });
        }
        attempts += 1;
        let from = rng.gen_range(0..nodes);
        let to = rng.gen_range(0..nodes);
        if from == to {
            if !graph.has_loop(from) {
                graph.push_loop(from);
                added += 1;
            }
        } else if !graph.contains(from, to) && !graph.contains(to, from) {
            graph.push_plain(from, to);
            added += 1;
        }
    }
    debug!(attempts, "rejection sampling finished");
    Ok(())
}

/// Maps a pool slot to its candidate.
///
/// Slots `[0, nodes)` are self-loops. The rest enumerate pairs `(low, high)`
/// with `low < high`, ordered by `high` and then `low`.
fn decode_candidate(slot: usize, nodes: usize) -> Candidate {
    if slot < nodes {
        return Candidate::Loop(slot);
    }
    let offset = slot - nodes;
    let (low, high) = decode_pair(offset);
    Candidate::Pair(low, high)
}

fn decode_pair(offset: usize) -> (usize, usize) {
    // The float estimate may be off by one for large offsets; the loops fix it.
    let estimate = ((offset as f64).mul_add(8.0, 1.0).sqrt() + 1.0) / 2.0;
    let mut high = (estimate as usize).max(1);
    while triangle(high) > offset {
        high -= 1;
    }
    while triangle(high + 1) <= offset {
        high += 1;
    }
    (offset - triangle(high), high)
}

/// Number of pairs `(low, high)` with `low < high < n`.
const fn triangle(n: usize) -> usize {
    if n % 2 == 0 {
        (n / 2) * n.saturating_sub(1)
    } else {
        n * (n / 2)
    }
}
