//! Validation of vertex and edge count requests.
//!
//! A [`GraphRequest`] is the only way into the generator, so every bound the
//! generator relies on is checked here, before any work starts.

use std::num::NonZeroUsize;

use tracing::{debug, instrument};

use crate::error::{RequestError, RequestField};

/// Largest vertex count a request may ask for.
///
/// Every vertex owns a neighbour list that is allocated up front, so this
/// keeps an accepted request from exhausting memory before generation starts.
pub const MAX_NODES: u64 = 1 << 20;

/// Largest edge count a request may ask for.
pub const MAX_EDGES: u64 = 1 << 22;

/// A validated request for a connected graph with `nodes` vertices and
/// exactly `edges` edges, self-loops included.
///
/// # Examples
/// ```
/// use loopgraph_core::GraphRequest;
///
/// let request = GraphRequest::parse("5", "7").expect("request is valid");
/// assert_eq!(request.nodes().get(), 5);
/// assert_eq!(request.edges(), 7);
/// assert_eq!(request.extra_edges(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphRequest {
    nodes: NonZeroUsize,
    edges: usize,
}

impl GraphRequest {
    /// Parses and validates the two counts from user-supplied text.
    ///
    /// Surrounding whitespace is ignored. Both fields must parse before any
    /// range check runs.
    ///
    /// # Errors
    /// Returns [`RequestError::InvalidNumber`] when either field is not an
    /// integer, otherwise the errors of [`Self::new`].
    ///
    /// # Examples
    /// ```
    /// use loopgraph_core::{GraphRequest, RequestError};
    ///
    /// let err = GraphRequest::parse("five", "7").expect_err("text is not a number");
    /// assert!(matches!(err, RequestError::InvalidNumber { .. }));
    /// ```
    #[instrument(name = "core.request.parse", level = "debug", err)]
    pub fn parse(nodes: &str, edges: &str) -> Result<Self, RequestError> {
        let nodes = parse_field(RequestField::Nodes, nodes)?;
        let edges = parse_field(RequestField::Edges, edges)?;
        Self::new(nodes, edges)
    }

    /// Validates a vertex/edge count pair.
    ///
    /// # Errors
    /// * [`RequestError::NonPositiveNodes`] when `nodes <= 0`.
    /// * [`RequestError::NegativeEdges`] when `edges < 0`.
    /// * [`RequestError::InsufficientEdges`] when `edges < nodes - 1`.
    /// * [`RequestError::ExcessiveEdges`] when `edges > max_edges(nodes)`.
    /// * [`RequestError::CapacityExceeded`] when `nodes > MAX_NODES`,
    ///   `edges > MAX_EDGES`, or the candidate slots do not fit `usize`.
    ///
    /// # Examples
    /// ```
    /// use loopgraph_core::{GraphRequest, RequestError};
    ///
    /// let err = GraphRequest::new(5, 11).expect_err("5 vertices hold at most 10 edges");
    /// assert!(matches!(err, RequestError::ExcessiveEdges { maximum: 10, .. }));
    /// ```
    pub fn new(nodes: i64, edges: i64) -> Result<Self, RequestError> {
        let node_count =
            u64::try_from(nodes).map_err(|_| RequestError::NonPositiveNodes { got: nodes })?;
        if node_count == 0 {
            return Err(RequestError::NonPositiveNodes { got: nodes });
        }
        let edge_count =
            u64::try_from(edges).map_err(|_| RequestError::NegativeEdges { got: edges })?;

        let required = node_count - 1;
        if edge_count < required {
            return Err(RequestError::InsufficientEdges {
                nodes: node_count,
                edges: edge_count,
                required,
            });
        }

        let maximum = max_edges(node_count);
        if edge_count > maximum {
            return Err(RequestError::ExcessiveEdges {
                nodes: node_count,
                edges: edge_count,
                maximum,
            });
        }

        let capacity = RequestError::CapacityExceeded {
            nodes: node_count,
            edges: edge_count,
        };
        if node_count > MAX_NODES
            || edge_count > MAX_EDGES
            || usize::try_from(candidate_slots(node_count)).is_err()
        {
            return Err(capacity);
        }
        let nodes = usize::try_from(node_count)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| capacity.clone())?;
        let edges = usize::try_from(edge_count).map_err(|_| capacity)?;

        debug!(nodes = nodes.get(), edges, "request accepted");
        Ok(Self { nodes, edges })
    }

    /// Returns the number of vertices.
    #[must_use]
    pub const fn nodes(&self) -> NonZeroUsize {
        self.nodes
    }

    /// Returns the total number of edges, self-loops included.
    #[must_use]
    pub const fn edges(&self) -> usize {
        self.edges
    }

    /// Returns the number of edges beyond the spanning tree.
    #[must_use]
    pub const fn extra_edges(&self) -> usize {
        self.edges - (self.nodes.get() - 1)
    }
}

/// Largest edge count accepted for `nodes` vertices.
///
/// From three vertices up this is the simple-graph maximum `n(n-1)/2`, with
/// self-loops excluded from the bound. One and two vertices cannot reach
/// past their spanning tree without self-loops, so for them every loop slot
/// counts as well: one vertex takes one edge, two vertices take three.
///
/// Saturates at `u64::MAX` for vertex counts whose bound does not fit.
///
/// # Examples
/// ```
/// use loopgraph_core::max_edges;
///
/// assert_eq!(max_edges(1), 1);
/// assert_eq!(max_edges(2), 3);
/// assert_eq!(max_edges(5), 10);
/// ```
#[must_use]
pub fn max_edges(nodes: u64) -> u64 {
    let pairs = u128::from(nodes) * u128::from(nodes.saturating_sub(1)) / 2;
    let bound = if nodes <= 2 {
        pairs + u128::from(nodes)
    } else {
        pairs
    };
    u64::try_from(bound).unwrap_or(u64::MAX)
}

/// Number of distinct edges a graph on `nodes` vertices can hold: every
/// unordered pair of distinct vertices plus one self-loop per vertex.
fn candidate_slots(nodes: u64) -> u128 {
    u128::from(nodes) * u128::from(nodes.saturating_sub(1)) / 2 + u128::from(nodes)
}

fn parse_field(field: RequestField, raw: &str) -> Result<i64, RequestError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| RequestError::InvalidNumber {
            field,
            input: raw.to_owned(),
        })
}
