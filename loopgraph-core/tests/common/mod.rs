use loopgraph_core::{AdjacencyMap, GraphGenerator, GraphRequest, SamplingStrategy};
use rand::{SeedableRng, rngs::SmallRng};

/// Generates a graph for a request that is known to be valid.
#[must_use]
pub fn generate(strategy: SamplingStrategy, nodes: i64, edges: i64, seed: u64) -> AdjacencyMap {
    let request = GraphRequest::new(nodes, edges)
        .unwrap_or_else(|err| panic!("request {nodes}/{edges} must be valid: {err}"));
    let mut rng = SmallRng::seed_from_u64(seed);
    GraphGenerator::new(strategy)
        .generate(&request, &mut rng)
        .unwrap_or_else(|err| panic!("generation must succeed: {err}"))
}

#[must_use]
pub fn rejection() -> SamplingStrategy {
    SamplingStrategy::Rejection {
        max_attempts: loopgraph_core::DEFAULT_MAX_ATTEMPTS,
    }
}
