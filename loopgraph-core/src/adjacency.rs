//! Adjacency storage for generated graphs.
//!
//! Each vertex keeps its neighbours in discovery order. Plain edges are stored
//! in both endpoint lists; a self-loop is a vertex listing itself once.

use serde::Serialize;

use crate::error::GenerationError;

/// Vertex index to ordered neighbour list.
///
/// # Examples
/// ```
/// use loopgraph_core::AdjacencyMap;
///
/// let graph = AdjacencyMap::from_lists(vec![vec![0, 1], vec![0]])
///     .expect("neighbours are in range");
/// assert_eq!(graph.loop_count(), 1);
/// assert_eq!(graph.plain_edge_count(), 1);
/// assert!(graph.is_connected());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdjacencyMap {
    lists: Vec<Vec<usize>>,
}

impl AdjacencyMap {
    /// Creates a graph of `nodes` isolated vertices.
    #[must_use]
    pub fn with_nodes(nodes: usize) -> Self {
        Self {
            lists: vec![Vec::new(); nodes],
        }
    }

    /// Builds a graph from explicit neighbour lists.
    ///
    /// Lists are taken as-is: a plain edge must appear in both endpoint lists
    /// to be treated as mutual.
    ///
    /// # Errors
    /// Returns [`GenerationError::NeighbourOutOfRange`] when a list mentions a
    /// vertex that does not exist.
    pub fn from_lists(lists: Vec<Vec<usize>>) -> Result<Self, GenerationError> {
        let nodes = lists.len();
        for (vertex, neighbours) in lists.iter().enumerate() {
            if let Some(&neighbour) = neighbours.iter().find(|&&n| n >= nodes) {
                return Err(GenerationError::NeighbourOutOfRange {
                    vertex,
                    neighbour,
                    nodes,
                });
            }
        }
        Ok(Self { lists })
    }

    /// Returns the number of vertices.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.lists.len()
    }

    /// Returns the neighbours of `vertex` in discovery order, or an empty
    /// slice for an unknown vertex.
    #[must_use]
    pub fn neighbours(&self, vertex: usize) -> &[usize] {
        self.lists.get(vertex).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates over `(vertex, neighbours)` pairs in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.lists
            .iter()
            .enumerate()
            .map(|(vertex, neighbours)| (vertex, neighbours.as_slice()))
    }

    /// Returns the raw neighbour lists.
    #[must_use]
    pub fn as_lists(&self) -> &[Vec<usize>] {
        &self.lists
    }

    /// Returns `true` when `from` lists `to` as a neighbour.
    #[must_use]
    pub fn contains(&self, from: usize, to: usize) -> bool {
        self.neighbours(from).contains(&to)
    }

    /// Returns `true` when `vertex` carries a self-loop.
    #[must_use]
    pub fn has_loop(&self, vertex: usize) -> bool {
        self.contains(vertex, vertex)
    }

    /// Counts self-references over all vertices.
    #[must_use]
    pub fn loop_count(&self) -> usize {
        count_loops(self)
    }

    /// Counts plain edges, treating each mutual pair of entries as one edge.
    ///
    /// Entries without a mirror (possible only through [`Self::from_lists`])
    /// count as one edge each.
    #[must_use]
    pub fn plain_edge_count(&self) -> usize {
        self.iter()
            .flat_map(|(vertex, neighbours)| {
                neighbours
                    .iter()
                    .filter(move |&&neighbour| neighbour != vertex)
                    .map(move |&neighbour| (vertex, neighbour))
            })
            .filter(|&(vertex, neighbour)| vertex < neighbour || !self.contains(neighbour, vertex))
            .count()
    }

    /// Counts all edges: plain edges plus self-loops.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.plain_edge_count() + self.loop_count()
    }

    /// Returns `true` when every vertex reaches every other through plain
    /// edges. Self-loops play no part. The empty graph is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        if self.lists.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.lists.len()];
        let mut stack = vec![0_usize];
        let mut reached = 0_usize;
        while let Some(vertex) = stack.pop() {
            let Some(flag) = seen.get_mut(vertex) else {
                continue;
            };
            if *flag {
                continue;
            }
            *flag = true;
            reached += 1;
            stack.extend(
                self.neighbours(vertex)
                    .iter()
                    .copied()
                    .filter(|&neighbour| neighbour != vertex),
            );
        }
        reached == self.lists.len()
    }

    pub(crate) fn push_plain(&mut self, from: usize, to: usize) {
        if let Some(list) = self.lists.get_mut(from) {
            list.push(to);
        }
        if let Some(list) = self.lists.get_mut(to) {
            list.push(from);
        }
    }

    pub(crate) fn push_loop(&mut self, vertex: usize) {
        if let Some(list) = self.lists.get_mut(vertex) {
            list.push(vertex);
        }
    }
}

/// Counts adjacency entries whose neighbour is the vertex itself.
///
/// This is the statistic reported next to the drawing; it is computed from
/// the adjacency map alone and does not depend on rendering.
///
/// # Examples
/// ```
/// use loopgraph_core::{AdjacencyMap, count_loops};
///
/// let graph = AdjacencyMap::from_lists(vec![vec![0, 1], vec![1, 0]])
///     .expect("neighbours are in range");
/// assert_eq!(count_loops(&graph), 2);
/// ```
#[must_use]
pub fn count_loops(graph: &AdjacencyMap) -> usize {
    graph
        .iter()
        .map(|(vertex, neighbours)| neighbours.iter().filter(|&&n| n == vertex).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn from_lists_rejects_unknown_neighbour() {
        let err = AdjacencyMap::from_lists(vec![vec![1], vec![2]])
            .expect_err("vertex 2 does not exist");
        assert_eq!(
            err,
            GenerationError::NeighbourOutOfRange {
                vertex: 1,
                neighbour: 2,
                nodes: 2,
            }
        );
    }

    #[rstest]
    fn one_sided_entry_counts_as_an_edge() {
        // Vertex 1 never lists vertex 0.
        let graph = AdjacencyMap::from_lists(vec![vec![0, 1], vec![]]).expect("valid lists");
        assert_eq!(graph.plain_edge_count(), 1);
        assert_eq!(graph.loop_count(), 1);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.is_connected());
    }

    #[rstest]
    #[case::empty(vec![], true)]
    #[case::single(vec![vec![]], true)]
    #[case::loops_only(vec![vec![0], vec![1]], false)]
    #[case::path(vec![vec![1], vec![0, 2], vec![1]], true)]
    #[case::split(vec![vec![1], vec![0], vec![3], vec![2]], false)]
    fn connectivity_ignores_loops(#[case] lists: Vec<Vec<usize>>, #[case] expected: bool) {
        let graph = AdjacencyMap::from_lists(lists).expect("valid lists");
        assert_eq!(graph.is_connected(), expected);
    }

    #[rstest]
    fn push_helpers_keep_discovery_order() {
        let mut graph = AdjacencyMap::with_nodes(3);
        graph.push_plain(1, 0);
        graph.push_loop(1);
        graph.push_plain(2, 1);
        assert_eq!(graph.neighbours(1), &[0, 1, 2]);
        assert_eq!(graph.neighbours(0), &[1]);
        assert!(graph.has_loop(1));
        assert!(!graph.has_loop(0));
        assert_eq!(graph.edge_count(), 3);
    }

    #[rstest]
    fn neighbours_of_unknown_vertex_is_empty() {
        let graph = AdjacencyMap::with_nodes(2);
        assert!(graph.neighbours(7).is_empty());
    }
}
