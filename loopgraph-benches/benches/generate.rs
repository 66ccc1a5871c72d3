//! Graph generation benchmarks.
//!
//! Compares the candidate-pool and rejection strategies across vertex counts
//! and fill levels. Rejection is skipped for complete graphs, where it spends
//! most of its time resampling duplicates.
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use loopgraph_benches::{
    error::BenchSetupError,
    params::{Density, GraphBenchParams},
};
use loopgraph_core::{DEFAULT_MAX_ATTEMPTS, GraphGenerator, SamplingStrategy};

/// Seed used for every generated graph.
const SEED: u64 = 42;

/// Vertex counts to benchmark.
const NODE_COUNTS: &[u32] = &[100, 500, 1_000];

const DENSITIES: &[Density] = &[Density::Tree, Density::Half, Density::Complete];

fn generate_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);

    let strategies = [
        SamplingStrategy::CandidatePool,
        SamplingStrategy::Rejection {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        },
    ];

    for &nodes in NODE_COUNTS {
        for &density in DENSITIES {
            let params = GraphBenchParams { nodes, density };
            let request = params.request()?;
            for strategy in strategies {
                if density == Density::Complete && strategy != SamplingStrategy::CandidatePool {
                    continue;
                }
                let generator = GraphGenerator::new(strategy);
                group.bench_with_input(
                    BenchmarkId::new(strategy.label(), params),
                    &request,
                    |b, request| {
                        b.iter(|| {
                            let mut rng = SmallRng::seed_from_u64(SEED);
                            generator.generate(request, &mut rng)
                        });
                    },
                );
            }
        }
    }

    group.finish();
    Ok(())
}

fn generate(c: &mut Criterion) {
    if let Err(err) = generate_impl(c) {
        panic!("generate benchmark setup failed: {err}");
    }
}

criterion_group!(benches, generate);
criterion_main!(benches);
