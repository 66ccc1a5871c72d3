//! Error types for the loopgraph core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::request::{MAX_EDGES, MAX_NODES};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Names the input field that failed to parse.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RequestField {
    /// The vertex count.
    Nodes,
    /// The edge count.
    Edges,
}

impl RequestField {
    /// Returns the lowercase field label used in messages and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nodes => "nodes",
            Self::Edges => "edges",
        }
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection raised while validating a vertex/edge count request.
///
/// Validation happens before any generation work, so none of these errors
/// leave partial state behind.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RequestError {
    /// The supplied text is not an integer.
    #[error("{field} must be an integer (got `{input}`)")]
    InvalidNumber {
        /// Field whose text failed to parse.
        field: RequestField,
        /// Raw text supplied by the caller.
        input: String,
    },
    /// The vertex count must be positive.
    #[error("the number of vertices must be positive (got {got})")]
    NonPositiveNodes {
        /// Vertex count supplied by the caller.
        got: i64,
    },
    /// The edge count must not be negative.
    #[error("the number of edges must not be negative (got {got})")]
    NegativeEdges {
        /// Edge count supplied by the caller.
        got: i64,
    },
    /// Too few edges to connect every vertex.
    #[error("{edges} edges cannot connect {nodes} vertices; at least {required} are needed")]
    InsufficientEdges {
        /// Requested vertex count.
        nodes: u64,
        /// Requested edge count.
        edges: u64,
        /// Minimum edge count that keeps the graph connected.
        required: u64,
    },
    /// More edges than the vertex count can hold.
    #[error("{edges} edges is too many for {nodes} vertices; at most {maximum} are allowed")]
    ExcessiveEdges {
        /// Requested vertex count.
        nodes: u64,
        /// Requested edge count.
        edges: u64,
        /// Largest edge count accepted for this vertex count.
        maximum: u64,
    },
    /// The request is larger than the generator will allocate for.
    #[error(
        "{nodes} vertices and {edges} edges exceed the supported size of \
         {max_nodes} vertices and {max_edges} edges",
        max_nodes = MAX_NODES,
        max_edges = MAX_EDGES
    )]
    CapacityExceeded {
        /// Requested vertex count.
        nodes: u64,
        /// Requested edge count.
        edges: u64,
    },
}

define_error_codes! {
    /// Stable codes describing [`RequestError`] variants.
    enum RequestErrorCode for RequestError {
        /// The supplied text is not an integer.
        InvalidNumber => InvalidNumber { .. } => "REQUEST_INVALID_NUMBER",
        /// The vertex count must be positive.
        NonPositiveNodes => NonPositiveNodes { .. } => "REQUEST_NON_POSITIVE_NODES",
        /// The edge count must not be negative.
        NegativeEdges => NegativeEdges { .. } => "REQUEST_NEGATIVE_EDGES",
        /// Too few edges to connect every vertex.
        InsufficientEdges => InsufficientEdges { .. } => "REQUEST_INSUFFICIENT_EDGES",
        /// More edges than the vertex count can hold.
        ExcessiveEdges => ExcessiveEdges { .. } => "REQUEST_EXCESSIVE_EDGES",
        /// The vertex count does not fit the host address space.
        CapacityExceeded => CapacityExceeded { .. } => "REQUEST_CAPACITY_EXCEEDED",
    }
}

/// Failure raised while generating a graph for a validated request.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GenerationError {
    /// The rejection sampler ran out of attempts before reaching the edge count.
    #[error(
        "rejection sampling gave up after {attempts} attempts with {added} of {requested} edges placed"
    )]
    AttemptsExhausted {
        /// Number of samples drawn before giving up.
        attempts: u64,
        /// Edges placed so far, spanning tree included.
        added: usize,
        /// Edge count requested by the caller.
        requested: usize,
    },
    /// An adjacency list referenced a vertex outside the graph.
    #[error("vertex {vertex} lists neighbour {neighbour} but the graph has {nodes} vertices")]
    NeighbourOutOfRange {
        /// Vertex owning the offending list.
        vertex: usize,
        /// Neighbour index that is out of range.
        neighbour: usize,
        /// Number of vertices in the graph.
        nodes: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// The rejection sampler ran out of attempts.
        AttemptsExhausted => AttemptsExhausted { .. } => "GENERATION_ATTEMPTS_EXHAUSTED",
        /// An adjacency list referenced a vertex outside the graph.
        NeighbourOutOfRange => NeighbourOutOfRange { .. } => "GENERATION_NEIGHBOUR_OUT_OF_RANGE",
    }
}

/// Invalid rendering configuration.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RenderConfigError {
    /// A size parameter was zero, negative, or not finite.
    #[error("{parameter} must be a positive finite number (got {value})")]
    NonPositive {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
    /// The circular layout does not fit on the canvas.
    #[error(
        "layout radius {radius} plus node radius {node_radius} does not fit a {width}x{height} canvas"
    )]
    LayoutOverflow {
        /// Configured layout radius.
        radius: f64,
        /// Configured node radius.
        node_radius: f64,
        /// Canvas width.
        width: f64,
        /// Canvas height.
        height: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`RenderConfigError`] variants.
    enum RenderConfigErrorCode for RenderConfigError {
        /// A size parameter was zero, negative, or not finite.
        NonPositive => NonPositive { .. } => "RENDER_CONFIG_NON_POSITIVE",
        /// The circular layout does not fit on the canvas.
        LayoutOverflow => LayoutOverflow { .. } => "RENDER_CONFIG_LAYOUT_OVERFLOW",
    }
}

/// Error type produced when configuring or running [`crate::Loopgraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LoopgraphError {
    /// The vertex/edge request was rejected.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// Graph generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The rendering configuration is invalid.
    #[error(transparent)]
    RenderConfig(#[from] RenderConfigError),
}

define_error_codes! {
    /// Stable codes describing [`LoopgraphError`] variants.
    enum LoopgraphErrorCode for LoopgraphError {
        /// The vertex/edge request was rejected.
        Request => Request { .. } => "LOOPGRAPH_REQUEST",
        /// Graph generation failed.
        Generation => Generation { .. } => "LOOPGRAPH_GENERATION",
        /// The rendering configuration is invalid.
        RenderConfig => RenderConfig { .. } => "LOOPGRAPH_RENDER_CONFIG",
    }
}

impl LoopgraphError {
    /// Returns the code of the wrapped error, e.g. `REQUEST_EXCESSIVE_EDGES`.
    #[must_use]
    pub const fn detail_code(&self) -> &'static str {
        match self {
            Self::Request(error) => error.code().as_str(),
            Self::Generation(error) => error.code().as_str(),
            Self::RenderConfig(error) => error.code().as_str(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, LoopgraphError>;
