//! Behavioural tests for graph generation across both sampling strategies.

mod common;

use std::collections::BTreeSet;

use common::{generate, rejection};
use loopgraph_core::{
    GenerationError, GraphGenerator, GraphRequest, RequestError, SamplingStrategy, count_loops,
};
use loopgraph_test_support::graph::{
    is_connected_ignoring_loops, is_symmetric_without_duplicates, looped_vertices, plain_edges,
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

#[rstest]
#[case::pool(SamplingStrategy::CandidatePool)]
#[case::rejection(rejection())]
fn single_vertex_with_one_edge_is_a_self_loop(#[case] strategy: SamplingStrategy) {
    let graph = generate(strategy, 1, 1, 0);
    assert_eq!(graph.as_lists(), &[vec![0]]);
    assert_eq!(count_loops(&graph), 1);
}

#[rstest]
#[case::pool(SamplingStrategy::CandidatePool)]
#[case::rejection(rejection())]
fn single_vertex_without_edges_is_empty(#[case] strategy: SamplingStrategy) {
    let graph = generate(strategy, 1, 0, 0);
    assert_eq!(graph.as_lists(), &[Vec::<usize>::new()]);
    assert!(graph.is_connected());
}

#[rstest]
#[case::pool(SamplingStrategy::CandidatePool)]
#[case::rejection(rejection())]
fn two_vertices_with_two_edges_carry_one_loop(
    #[case] strategy: SamplingStrategy,
    #[values(0, 1, 2, 3, 4, 5, 6, 7)] seed: u64,
) {
    let graph = generate(strategy, 2, 2, seed);
    assert!(graph.contains(0, 1));
    assert!(graph.contains(1, 0));
    assert_eq!(count_loops(&graph), 1);
    assert_eq!(graph.edge_count(), 2);
}

#[rstest]
#[case::pool(SamplingStrategy::CandidatePool)]
#[case::rejection(rejection())]
fn two_vertex_loop_lands_on_either_vertex(#[case] strategy: SamplingStrategy) {
    let hosts: BTreeSet<usize> = (0..32)
        .flat_map(|seed| looped_vertices(generate(strategy, 2, 2, seed).as_lists()))
        .collect();
    assert_eq!(hosts.into_iter().collect::<Vec<_>>(), vec![0, 1]);
}

#[rstest]
#[case::pool(SamplingStrategy::CandidatePool)]
#[case::rejection(rejection())]
fn two_vertices_with_three_edges_loop_both(#[case] strategy: SamplingStrategy) {
    let graph = generate(strategy, 2, 3, 11);
    let lists = graph.as_lists();
    assert_eq!(looped_vertices(lists).into_iter().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(plain_edges(lists).into_iter().collect::<Vec<_>>(), vec![(0, 1)]);
}

#[rstest]
#[case::pool(SamplingStrategy::CandidatePool)]
#[case::rejection(rejection())]
fn tree_requests_have_no_loops(
    #[case] strategy: SamplingStrategy,
    #[values(1, 2, 3)] seed: u64,
) {
    let graph = generate(strategy, 5, 4, seed);
    assert_eq!(count_loops(&graph), 0);
    assert_eq!(plain_edges(graph.as_lists()).len(), 4);
    assert!(is_connected_ignoring_loops(graph.as_lists()));
}

#[rstest]
fn excessive_request_never_reaches_the_generator() {
    let err = GraphRequest::new(5, 11).expect_err("5 vertices cannot hold 11 edges");
    assert!(matches!(
        err,
        RequestError::ExcessiveEdges {
            nodes: 5,
            edges: 11,
            maximum: 10,
        }
    ));
}

#[rstest]
fn rejection_reports_attempts_when_budget_runs_out() {
    let request = GraphRequest::new(8, 28).expect("complete graph request is valid");
    let generator = GraphGenerator::new(SamplingStrategy::Rejection { max_attempts: 3 });
    let mut rng = SmallRng::seed_from_u64(5);
    let err = generator
        .generate(&request, &mut rng)
        .expect_err("three samples cannot add 21 edges");
    match err {
        GenerationError::AttemptsExhausted {
            attempts,
            added,
            requested,
        } => {
            assert_eq!(attempts, 3);
            assert!((7..=10).contains(&added));
            assert_eq!(requested, 28);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case::pool(SamplingStrategy::CandidatePool)]
#[case::rejection(rejection())]
fn same_seed_gives_same_graph(#[case] strategy: SamplingStrategy) {
    let first = generate(strategy, 12, 30, 99);
    let second = generate(strategy, 12, 30, 99);
    assert_eq!(first, second);
}

fn request_strategy() -> impl Strategy<Value = (i64, i64)> {
    (1_i64..=24).prop_flat_map(|nodes| {
        let upper =
            i64::try_from(loopgraph_core::max_edges(nodes.unsigned_abs())).unwrap_or(i64::MAX);
        (Just(nodes), (nodes - 1)..=upper)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn pool_graphs_hold_every_invariant((nodes, edges) in request_strategy(), seed in any::<u64>()) {
        let graph = generate(SamplingStrategy::CandidatePool, nodes, edges, seed);
        let lists = graph.as_lists();
        prop_assert_eq!(lists.len(), usize::try_from(nodes).expect("positive"));
        prop_assert_eq!(graph.edge_count(), usize::try_from(edges).expect("non-negative"));
        prop_assert!(is_symmetric_without_duplicates(lists));
        prop_assert!(is_connected_ignoring_loops(lists));
        prop_assert!(count_loops(&graph) <= lists.len());
        prop_assert_eq!(count_loops(&graph), looped_vertices(lists).len());
    }

    #[test]
    fn rejection_graphs_hold_every_invariant((nodes, edges) in request_strategy(), seed in any::<u64>()) {
        let graph = generate(rejection(), nodes, edges, seed);
        let lists = graph.as_lists();
        prop_assert_eq!(graph.edge_count(), usize::try_from(edges).expect("non-negative"));
        prop_assert!(is_symmetric_without_duplicates(lists));
        prop_assert!(is_connected_ignoring_loops(lists));
    }
}
