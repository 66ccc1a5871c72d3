//! Scene rendering and SVG serialisation benchmarks.
//!
//! Graphs are generated once per size; only rendering is timed.
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use loopgraph_benches::{
    error::BenchSetupError,
    params::{Density, GraphBenchParams},
};
use loopgraph_core::{LoopgraphBuilder, svg};

const SEED: u64 = 42;

const NODE_COUNTS: &[u32] = &[50, 200, 800];

fn render_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("render");
    group.sample_size(30);

    let loopgraph = LoopgraphBuilder::new().with_seed(SEED).build()?;
    for &nodes in NODE_COUNTS {
        let params = GraphBenchParams {
            nodes,
            density: Density::Half,
        };
        let outcome = loopgraph.run(&params.request()?)?;
        let graph = outcome.graph();

        group.bench_with_input(BenchmarkId::new("scene", params), graph, |b, graph| {
            b.iter(|| loopgraph.renderer().render(graph));
        });
        group.bench_with_input(
            BenchmarkId::new("svg", params),
            outcome.scene(),
            |b, scene| {
                b.iter(|| svg::to_svg_string(scene));
            },
        );
    }

    group.finish();
    Ok(())
}

fn render(c: &mut Criterion) {
    if let Err(err) = render_impl(c) {
        panic!("render benchmark setup failed: {err}");
    }
}

criterion_group!(benches, render);
criterion_main!(benches);
