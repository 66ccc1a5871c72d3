//! Shared test utilities used across loopgraph crates.

pub mod graph;
pub mod tracing;
