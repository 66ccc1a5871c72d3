//! Invariant checks over raw neighbour lists.
//!
//! The helpers take `&[Vec<usize>]` so they stay independent of the core
//! crate's types; pass `AdjacencyMap::as_lists()`.

use std::collections::{BTreeSet, HashSet};

/// Unordered plain edge, stored as `(low, high)`.
pub type PlainEdge = (usize, usize);

/// Returns every plain edge once, as a sorted set of `(low, high)` pairs.
#[must_use]
pub fn plain_edges(lists: &[Vec<usize>]) -> BTreeSet<PlainEdge> {
    lists
        .iter()
        .enumerate()
        .flat_map(|(vertex, neighbours)| {
            neighbours
                .iter()
                .filter(move |&&neighbour| neighbour != vertex)
                .map(move |&neighbour| (vertex.min(neighbour), vertex.max(neighbour)))
        })
        .collect()
}

/// Returns the vertices carrying at least one self-loop.
#[must_use]
pub fn looped_vertices(lists: &[Vec<usize>]) -> BTreeSet<usize> {
    lists
        .iter()
        .enumerate()
        .filter(|(vertex, neighbours)| neighbours.contains(vertex))
        .map(|(vertex, _)| vertex)
        .collect()
}

/// Returns `true` when each plain edge is listed exactly once at each end.
///
/// # Examples
/// ```
/// use loopgraph_test_support::graph::is_symmetric_without_duplicates;
///
/// assert!(is_symmetric_without_duplicates(&[vec![1], vec![0, 1]]));
/// assert!(!is_symmetric_without_duplicates(&[vec![1, 1], vec![0, 0]]));
/// assert!(!is_symmetric_without_duplicates(&[vec![1], vec![]]));
/// ```
#[must_use]
pub fn is_symmetric_without_duplicates(lists: &[Vec<usize>]) -> bool {
    let mut seen = HashSet::new();
    for (vertex, neighbours) in lists.iter().enumerate() {
        for &neighbour in neighbours {
            if !seen.insert((vertex, neighbour)) {
                return false;
            }
            if neighbour == vertex {
                continue;
            }
            let mirrored = lists
                .get(neighbour)
                .is_some_and(|list| list.iter().filter(|&&n| n == vertex).count() == 1);
            if !mirrored {
                return false;
            }
        }
    }
    true
}

/// Returns `true` when all vertices are reachable from vertex 0 through plain
/// edges, found with a union-find pass.
///
/// # Examples
/// ```
/// use loopgraph_test_support::graph::is_connected_ignoring_loops;
///
/// assert!(is_connected_ignoring_loops(&[vec![1], vec![0, 2], vec![1]]));
/// assert!(!is_connected_ignoring_loops(&[vec![0], vec![1]]));
/// ```
#[must_use]
pub fn is_connected_ignoring_loops(lists: &[Vec<usize>]) -> bool {
    let mut parent: Vec<usize> = (0..lists.len()).collect();
    let mut components = lists.len();
    for (low, high) in plain_edges(lists) {
        let (a, b) = (find(&mut parent, low), find(&mut parent, high));
        if a != b {
            if let Some(slot) = parent.get_mut(a) {
                *slot = b;
            }
            components -= 1;
        }
    }
    components <= 1
}

fn find(parent: &mut [usize], mut vertex: usize) -> usize {
    while let Some(&next) = parent.get(vertex) {
        if next == vertex {
            break;
        }
        let grand = parent.get(next).copied().unwrap_or(next);
        if let Some(slot) = parent.get_mut(vertex) {
            *slot = grand;
        }
        vertex = next;
    }
    vertex
}
