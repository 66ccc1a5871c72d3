//! Loopgraph core library.
//!
//! Generates random connected graphs with optional self-loops, places the
//! vertices on a circle, and renders edges, arrowheads and loop curves as
//! backend-neutral primitives with SVG output.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adjacency;
mod builder;
mod error;
mod generator;
mod layout;
mod loopgraph;
mod render;
mod request;
pub mod svg;

pub use crate::{
    adjacency::{AdjacencyMap, count_loops},
    builder::LoopgraphBuilder,
    error::{
        GenerationError, GenerationErrorCode, LoopgraphError, LoopgraphErrorCode,
        RenderConfigError, RenderConfigErrorCode, RequestError, RequestErrorCode, RequestField,
        Result,
    },
    generator::{DEFAULT_MAX_ATTEMPTS, GraphGenerator, SamplingStrategy},
    layout::{CircularLayout, Point},
    loopgraph::{GraphOutcome, Loopgraph},
    render::{GraphRenderer, MutualEdges, Primitive, RenderConfig, Scene, arrow_base},
    request::{GraphRequest, MAX_EDGES, MAX_NODES, max_edges},
};
