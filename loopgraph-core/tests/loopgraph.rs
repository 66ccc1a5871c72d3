//! Tests for the `Loopgraph` orchestration API.

use loopgraph_core::{
    GraphRequest, LoopgraphBuilder, LoopgraphError, MutualEdges, Primitive, RenderConfig,
    SamplingStrategy, svg,
};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use loopgraph_test_support::tracing::RecordingLayer;

#[rstest]
fn builder_defaults() {
    let builder = LoopgraphBuilder::new();
    assert_eq!(builder.strategy(), SamplingStrategy::CandidatePool);
    assert_eq!(builder.render_config(), &RenderConfig::default());
    assert_eq!(builder.seed(), None);

    let loopgraph = builder.build().expect("defaults valid");
    assert_eq!(loopgraph.generator().strategy(), SamplingStrategy::CandidatePool);
    assert_eq!(
        loopgraph.renderer().config().mutual_edges(),
        MutualEdges::EachDirection
    );
}

#[rstest]
#[case::zero_width(RenderConfig::default().with_canvas(0.0, 600.0), "RENDER_CONFIG_NON_POSITIVE")]
#[case::nan_radius(RenderConfig::default().with_layout_radius(f64::NAN), "RENDER_CONFIG_NON_POSITIVE")]
#[case::overflow(RenderConfig::default().with_canvas(200.0, 600.0), "RENDER_CONFIG_LAYOUT_OVERFLOW")]
fn builder_rejects_invalid_render_config(#[case] config: RenderConfig, #[case] detail: &str) {
    let err = LoopgraphBuilder::new()
        .with_render_config(config)
        .build()
        .expect_err("config must be rejected");
    assert!(matches!(err, LoopgraphError::RenderConfig(_)));
    assert_eq!(err.detail_code(), detail);
}

#[rstest]
fn seeded_runs_are_reproducible() {
    let loopgraph = LoopgraphBuilder::new()
        .with_seed(2024)
        .build()
        .expect("configuration must be valid");
    let request = GraphRequest::new(9, 20).expect("request is valid");
    let first = loopgraph.run(&request).expect("run must succeed");
    let second = loopgraph.run(&request).expect("run must succeed");
    assert_eq!(first.graph(), second.graph());
    assert_eq!(first.scene(), second.scene());
    assert_eq!(svg::to_svg_string(first.scene()), svg::to_svg_string(second.scene()));
}

#[rstest]
fn outcome_loop_count_matches_graph() {
    let loopgraph = LoopgraphBuilder::new()
        .with_seed(8)
        .build()
        .expect("configuration must be valid");
    let request = GraphRequest::new(2, 3).expect("request is valid");
    let outcome = loopgraph.run(&request).expect("run must succeed");
    assert_eq!(outcome.loop_count(), 2);
    assert_eq!(outcome.graph().loop_count(), 2);
    assert_eq!(outcome.request(), &request);
    assert!(outcome.elapsed_millis() >= 0.0);

    let loops = outcome
        .scene()
        .primitives()
        .iter()
        .filter(|p| matches!(p, Primitive::Loop { .. }))
        .count();
    assert_eq!(loops, 2);
}

#[rstest]
#[case::each_direction(MutualEdges::EachDirection, 2)]
#[case::once(MutualEdges::Once, 1)]
fn mutual_edge_policy_controls_segment_count(
    #[case] policy: MutualEdges,
    #[case] segments_per_edge: usize,
) {
    let loopgraph = LoopgraphBuilder::new()
        .with_seed(1)
        .with_render_config(RenderConfig::default().with_mutual_edges(policy))
        .build()
        .expect("configuration must be valid");
    let request = GraphRequest::new(4, 6).expect("request is valid");
    let outcome = loopgraph.run(&request).expect("run must succeed");
    let segments = outcome
        .scene()
        .primitives()
        .iter()
        .filter(|p| matches!(p, Primitive::Segment { .. }))
        .count();
    assert_eq!(
        segments,
        outcome.graph().plain_edge_count() * segments_per_edge
    );
}

#[rstest]
fn run_with_rng_follows_the_supplied_stream() {
    let loopgraph = LoopgraphBuilder::new()
        .build()
        .expect("configuration must be valid");
    let request = GraphRequest::new(7, 12).expect("request is valid");
    let mut a = SmallRng::seed_from_u64(17);
    let mut b = SmallRng::seed_from_u64(17);
    let first = loopgraph
        .run_with_rng(&request, &mut a)
        .expect("run must succeed");
    let second = loopgraph
        .run_with_rng(&request, &mut b)
        .expect("run must succeed");
    assert_eq!(first.graph(), second.graph());
}

#[rstest]
fn rejection_failure_surfaces_as_generation_error() {
    let loopgraph = LoopgraphBuilder::new()
        .with_seed(4)
        .with_strategy(SamplingStrategy::Rejection { max_attempts: 0 })
        .build()
        .expect("configuration must be valid");
    let request = GraphRequest::new(3, 3).expect("request is valid");
    let err = loopgraph
        .run(&request)
        .expect_err("zero attempts cannot add an edge");
    assert!(matches!(err, LoopgraphError::Generation(_)));
    assert_eq!(err.detail_code(), "GENERATION_ATTEMPTS_EXHAUSTED");
}

#[rstest]
fn run_records_span_fields_and_completion_event() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let loopgraph = LoopgraphBuilder::new()
        .with_seed(3)
        .build()
        .expect("configuration must be valid");
    let request = GraphRequest::new(5, 7).expect("request is valid");

    tracing::subscriber::with_default(subscriber, || {
        loopgraph.run(&request).expect("run must succeed");
    });

    let run = layer.span("core.run").expect("core.run span recorded");
    assert_eq!(run.fields.get("nodes").map(String::as_str), Some("5"));
    assert_eq!(run.fields.get("edges").map(String::as_str), Some("7"));
    assert_eq!(
        run.fields.get("strategy").map(String::as_str),
        Some("candidate_pool")
    );
    assert!(layer.span("core.generate").is_some());
    assert!(layer.span("core.render").is_some());
    assert!(layer.has_event(Level::INFO, "graph built"));
}

#[rstest]
fn failed_run_emits_error_event() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let loopgraph = LoopgraphBuilder::new()
        .with_seed(3)
        .with_strategy(SamplingStrategy::Rejection { max_attempts: 0 })
        .build()
        .expect("configuration must be valid");
    let request = GraphRequest::new(3, 3).expect("request is valid");

    tracing::subscriber::with_default(subscriber, || {
        let _ = loopgraph.run(&request);
    });

    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::ERROR)
    );
    assert!(!layer.has_event(Level::INFO, "graph built"));
}
