//! Benchmark setup error type.

use loopgraph_core::{LoopgraphError, RequestError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// The benchmark asked for an invalid vertex/edge pair.
    #[error("invalid benchmark request: {0}")]
    Request(#[from] RequestError),
    /// Building or running the pipeline failed.
    #[error("pipeline failed: {0}")]
    Pipeline(#[from] LoopgraphError),
}
