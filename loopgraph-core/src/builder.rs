//! Builder utilities for configuring [`Loopgraph`] runs.
//!
//! Collects the sampling strategy, render configuration and optional seed, and
//! validates them before a [`Loopgraph`] is constructed.

use crate::{
    Result, generator::SamplingStrategy, loopgraph::Loopgraph, render::RenderConfig,
};

/// Configures and constructs [`Loopgraph`] instances.
///
/// # Examples
/// ```
/// use loopgraph_core::{LoopgraphBuilder, SamplingStrategy};
///
/// let loopgraph = LoopgraphBuilder::new()
///     .with_seed(42)
///     .with_strategy(SamplingStrategy::CandidatePool)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(loopgraph.seed(), Some(42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoopgraphBuilder {
    strategy: SamplingStrategy,
    render: RenderConfig,
    seed: Option<u64>,
}

impl LoopgraphBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use loopgraph_core::{LoopgraphBuilder, SamplingStrategy};
    ///
    /// let builder = LoopgraphBuilder::new();
    /// assert_eq!(builder.strategy(), SamplingStrategy::CandidatePool);
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how extra edges are sampled.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured sampling strategy.
    #[must_use]
    pub const fn strategy(&self) -> SamplingStrategy {
        self.strategy
    }

    /// Replaces the render configuration.
    #[must_use]
    pub const fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.render = config;
        self
    }

    /// Returns the configured render parameters.
    #[must_use]
    pub const fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Fixes the random seed so [`Loopgraph::run`] is reproducible.
    ///
    /// # Examples
    /// ```
    /// use loopgraph_core::LoopgraphBuilder;
    ///
    /// let builder = LoopgraphBuilder::new().with_seed(7);
    /// assert_eq!(builder.seed(), Some(7));
    /// ```
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs a [`Loopgraph`] instance.
    ///
    /// # Errors
    /// Returns [`crate::LoopgraphError::RenderConfig`] when the render
    /// configuration is invalid.
    ///
    /// # Examples
    /// ```
    /// use loopgraph_core::{LoopgraphBuilder, RenderConfig};
    ///
    /// let err = LoopgraphBuilder::new()
    ///     .with_render_config(RenderConfig::default().with_canvas(100.0, 100.0))
    ///     .build()
    ///     .expect_err("the default layout does not fit 100x100");
    /// assert_eq!(err.detail_code(), "RENDER_CONFIG_LAYOUT_OVERFLOW");
    /// ```
    pub fn build(self) -> Result<Loopgraph> {
        self.render.validate()?;
        Ok(Loopgraph::new(self.strategy, self.render, self.seed))
    }
}
