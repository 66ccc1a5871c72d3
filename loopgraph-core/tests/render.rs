//! Property tests for layout and scene construction.

mod common;

use common::generate;
use loopgraph_core::{
    CircularLayout, GraphRenderer, MutualEdges, Point, Primitive, RenderConfig, SamplingStrategy,
    count_loops, svg,
};
use proptest::prelude::*;

fn kinds(primitives: &[Primitive]) -> (usize, usize, usize, usize) {
    primitives
        .iter()
        .fold((0, 0, 0, 0), |(nodes, segments, arrows, loops), p| match p {
            Primitive::Node { .. } => (nodes + 1, segments, arrows, loops),
            Primitive::Segment { .. } => (nodes, segments + 1, arrows, loops),
            Primitive::Arrowhead { .. } => (nodes, segments, arrows + 1, loops),
            Primitive::Loop { .. } => (nodes, segments, arrows, loops + 1),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn layout_is_deterministic_and_on_the_circle(count in 1_usize..64, radius in 1.0_f64..400.0) {
        let layout = CircularLayout::new(Point::new(300.0, 300.0), radius);
        let first = layout.positions(count);
        prop_assert_eq!(&first, &layout.positions(count));
        for (index, point) in first.iter().enumerate() {
            prop_assert_eq!(*point, layout.position(index, count));
            let distance = (point.x - 300.0).hypot(point.y - 300.0);
            prop_assert!((distance - radius).abs() < 1e-6);
        }
    }

    #[test]
    fn scene_matches_the_graph(nodes in 1_i64..16, extra in 0_i64..8, seed in any::<u64>()) {
        let bound = i64::try_from(loopgraph_core::max_edges(nodes.unsigned_abs()))
            .expect("small bounds fit i64");
        let edges = (nodes - 1 + extra).min(bound);
        let graph = generate(SamplingStrategy::CandidatePool, nodes, edges, seed);

        let each = GraphRenderer::new(RenderConfig::default()).render(&graph);
        let (node_marks, segments, arrows, loops) = kinds(each.primitives());
        prop_assert_eq!(node_marks, graph.node_count());
        prop_assert_eq!(segments, arrows);
        prop_assert_eq!(segments, graph.plain_edge_count() * 2);
        prop_assert_eq!(loops, count_loops(&graph));
        prop_assert_eq!(each.loop_count(), count_loops(&graph));

        let once = GraphRenderer::new(RenderConfig::default().with_mutual_edges(MutualEdges::Once))
            .render(&graph);
        let (_, segments, arrows, _) = kinds(once.primitives());
        prop_assert_eq!(segments, graph.plain_edge_count());
        prop_assert_eq!(arrows, segments);

        let text = svg::to_svg_string(&each);
        prop_assert_eq!(text.matches("<circle").count(), graph.node_count());
        prop_assert_eq!(text.matches("<path").count(), loops);
    }
}
