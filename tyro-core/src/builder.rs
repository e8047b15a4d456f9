//! Builder utilities for configuring strategy runs.
//!
//! Validates the edge budget and collects the settings shared by every
//! strategy before constructing a [`StrategyRunner`].

use std::num::NonZeroUsize;

use crate::{
    Result,
    centrality::Metric,
    error::TyroError,
    runner::StrategyRunner,
    strategy::{AttachmentConfig, NonConvergence, SearchLimits},
};

/// Configures and constructs [`StrategyRunner`] instances.
///
/// # Examples
/// ```
/// use tyro_core::{Metric, RunnerBuilder};
///
/// let runner = RunnerBuilder::new()
///     .with_edge_budget(4)
///     .with_metric(Metric::Closeness)
///     .with_seed(7)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(runner.config().edge_budget.get(), 4);
/// assert_eq!(runner.config().seed, Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct RunnerBuilder {
    edge_budget: usize,
    recompute_every_round: bool,
    export: bool,
    metric: Metric,
    seed: Option<u64>,
    search: SearchLimits,
}

impl Default for RunnerBuilder {
    fn default() -> Self {
        Self {
            edge_budget: 3,
            recompute_every_round: false,
            export: false,
            metric: Metric::Betweenness,
            seed: None,
            search: SearchLimits::default(),
        }
    }
}

impl RunnerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use tyro_core::RunnerBuilder;
    ///
    /// let builder = RunnerBuilder::new();
    /// assert_eq!(builder.edge_budget(), 3);
    /// assert!(!builder.recompute_every_round());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of edges the newcomer may gain.
    #[must_use]
    pub fn with_edge_budget(mut self, budget: usize) -> Self {
        self.edge_budget = budget;
        self
    }

    /// Returns the configured edge budget.
    #[must_use]
    pub fn edge_budget(&self) -> usize {
        self.edge_budget
    }

    /// Recompute centralities after every round instead of tolerating stale
    /// values.
    #[must_use]
    pub fn with_recompute_every_round(mut self, enabled: bool) -> Self {
        self.recompute_every_round = enabled;
        self
    }

    /// Returns whether centralities are recomputed after every round.
    #[must_use]
    pub fn recompute_every_round(&self) -> bool {
        self.recompute_every_round
    }

    /// Export metrics after every round.
    #[must_use]
    pub fn with_export(mut self, enabled: bool) -> Self {
        self.export = enabled;
        self
    }

    /// Sets the metric scored by the global strategy.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Seeds the random strategy for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the resolution search cut-offs.
    #[must_use]
    pub fn with_search_limits(mut self, limits: SearchLimits) -> Self {
        self.search = limits;
        self
    }

    /// Chooses what the community strategy does when the resolution search
    /// cannot hit its target.
    ///
    /// # Examples
    /// ```
    /// use tyro_core::{NonConvergence, RunnerBuilder};
    ///
    /// let runner = RunnerBuilder::new()
    ///     .with_non_convergence(NonConvergence::Fail)
    ///     .build()
    ///     .expect("configuration is valid");
    /// assert_eq!(runner.config().search.on_non_convergence, NonConvergence::Fail);
    /// ```
    #[must_use]
    pub fn with_non_convergence(mut self, policy: NonConvergence) -> Self {
        self.search.on_non_convergence = policy;
        self
    }

    /// Validates the configuration and constructs a [`StrategyRunner`].
    ///
    /// # Errors
    /// Returns [`TyroError::InvalidEdgeBudget`] when the edge budget is zero.
    ///
    /// # Examples
    /// ```
    /// use tyro_core::{RunnerBuilder, TyroErrorCode};
    ///
    /// let err = RunnerBuilder::new().with_edge_budget(0).build().unwrap_err();
    /// assert_eq!(err.code(), TyroErrorCode::InvalidEdgeBudget);
    /// ```
    pub fn build(self) -> Result<StrategyRunner> {
        let edge_budget = NonZeroUsize::new(self.edge_budget).ok_or(
            TyroError::InvalidEdgeBudget {
                got: self.edge_budget,
            },
        )?;

        Ok(StrategyRunner::new(AttachmentConfig {
            edge_budget,
            recompute_every_round: self.recompute_every_round,
            export: self.export,
            metric: self.metric,
            seed: self.seed,
            search: self.search,
        }))
    }
}
