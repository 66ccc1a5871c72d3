//! Benchmark support crate for loopgraph.
//!
//! Provides parameter types and setup helpers used by the Criterion
//! benchmarks for graph generation and scene rendering.

pub mod error;
pub mod params;
