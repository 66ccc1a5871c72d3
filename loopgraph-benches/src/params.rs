//! Benchmark parameter types.

use std::fmt;

use loopgraph_core::{GraphRequest, RequestError, max_edges};

/// How densely a benchmark graph is filled beyond its spanning tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Density {
    /// Spanning tree only.
    Tree,
    /// Half of the slots between a tree and a complete graph.
    Half,
    /// Edge count at the validation bound. Below three vertices that bound
    /// also counts a loop on every vertex.
    Complete,
}

impl Density {
    const fn label(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Half => "half",
            Self::Complete => "complete",
        }
    }
}

/// Parameters for a generation or rendering benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of vertices.
    pub nodes: u32,
    /// Fill level beyond the spanning tree.
    pub density: Density,
}

impl GraphBenchParams {
    /// Returns the edge count implied by the density.
    #[must_use]
    pub fn edges(&self) -> u64 {
        let nodes = u64::from(self.nodes);
        let tree = nodes.saturating_sub(1);
        let complete = max_edges(nodes);
        match self.density {
            Density::Tree => tree,
            Density::Half => tree + (complete - tree) / 2,
            Density::Complete => complete,
        }
    }

    /// Builds the validated request for these parameters.
    ///
    /// # Errors
    /// Returns [`RequestError`] when the edge count does not fit an `i64`
    /// or fails validation.
    pub fn request(&self) -> Result<GraphRequest, RequestError> {
        let edges = self.edges();
        let edges = i64::try_from(edges).map_err(|_| RequestError::ExcessiveEdges {
            nodes: u64::from(self.nodes),
            edges,
            maximum: max_edges(u64::from(self.nodes)),
        })?;
        GraphRequest::new(i64::from(self.nodes), edges)
    }
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},{}", self.nodes, self.density.label())
    }
}
