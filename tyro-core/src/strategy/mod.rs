//! Attachment strategies for the newcomer.
//!
//! Each strategy implements [`AttachmentStrategy`] and is configured once, at
//! construction, from an [`AttachmentConfig`]. [`StrategyKind::build`] maps a
//! kind to its boxed implementation.

mod broker_connect;
mod broker_express;
mod centre_periphery;
mod community;
mod global;
mod local;
mod random;
mod resolution;


use std::{fmt, num::NonZeroUsize, str::FromStr};

pub use self::{
    broker_connect::BrokerConnectStrategy,
    broker_express::BrokerExpressStrategy,
    centre_periphery::CentrePeripheryStrategy,
    community::CommunityStrategy,
    global::GlobalStrategy,
    local::LocalStrategy,
    random::RandomStrategy,
    resolution::{
        NonConvergence, ResolutionSearch, SearchLimits, SearchOutcome, SearchResult, SearchState,
        Transition, search_resolution,
    },
};
use crate::{
    centrality::Metric,
    error::StrategyError,
    graph::VertexId,
    session::Session,
};

/// Policy choosing the vertices the newcomer connects to.
pub trait AttachmentStrategy {
    /// Stable lowercase name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Connects `newcomer` to the chosen targets through `session`.
    ///
    /// Consumes the strategy, so it runs at most once.
    ///
    /// # Errors
    /// Returns a [`StrategyError`] when the graph rejects an edge or, for the
    /// community strategy, when the resolution search fails.
    fn execute(self: Box<Self>, session: &mut Session<'_>, newcomer: VertexId)
    -> Result<(), StrategyError>;
}

/// Settings shared by every strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentConfig {
    /// Maximum number of edges the newcomer may gain.
    pub edge_budget: NonZeroUsize,
    /// Recompute centralities after every round.
    pub recompute_every_round: bool,
    /// Export metrics after every round.
    pub export: bool,
    /// Score used by the global strategy.
    pub metric: Metric,
    /// Seed for the random strategy; entropy when `None`.
    pub seed: Option<u64>,
    /// Cut-offs for the community resolution search.
    pub search: SearchLimits,
}

impl AttachmentConfig {
    /// Defaults for `edge_budget`: stale centralities, no export, betweenness.
    #[must_use]
    pub fn new(edge_budget: NonZeroUsize) -> Self {
        Self {
            edge_budget,
            recompute_every_round: false,
            export: false,
            metric: Metric::Betweenness,
            seed: None,
            search: SearchLimits::default(),
        }
    }

    /// Post-round bookkeeping common to every strategy.
    pub(crate) fn finish_round(
        &self,
        session: &mut Session<'_>,
        round: usize,
        newcomer: VertexId,
        target: VertexId,
    ) {
        if self.recompute_every_round {
            session.recompute();
        }
        if self.export {
            session.export(round, newcomer, target);
        }
    }
}

/// Available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Greedy on a single metric with radius-bounded coverage suppression.
    Global,
    /// Greedy walk outward from the best-connected hub.
    Local,
    /// Greedy on a composite brokerage score with logarithmic suppression.
    BrokerConnect,
    /// Pairs of far-apart vertices per round.
    BrokerExpress,
    /// Centre first, then the furthest uncovered vertices.
    CentrePeriphery,
    /// One representative per detected community.
    Community,
    /// Uniformly random distinct vertices.
    Random,
}

impl StrategyKind {
    /// Every strategy in a stable order.
    pub const ALL: [Self; 7] = [
        Self::Global,
        Self::Local,
        Self::BrokerConnect,
        Self::BrokerExpress,
        Self::CentrePeriphery,
        Self::Community,
        Self::Random,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Local => "local",
            Self::BrokerConnect => "broker-connect",
            Self::BrokerExpress => "broker-express",
            Self::CentrePeriphery => "centre-periphery",
            Self::Community => "community",
            Self::Random => "random",
        }
    }

    /// Builds the strategy with `config`.
    #[must_use]
    pub fn build(self, config: AttachmentConfig) -> Box<dyn AttachmentStrategy> {
        match self {
            Self::Global => Box::new(GlobalStrategy::new(config)),
            Self::Local => Box::new(LocalStrategy::new(config)),
            Self::BrokerConnect => Box::new(BrokerConnectStrategy::new(config)),
            Self::BrokerExpress => Box::new(BrokerExpressStrategy::new(config)),
            Self::CentrePeriphery => Box::new(CentrePeripheryStrategy::new(config)),
            Self::Community => Box::new(CommunityStrategy::new(config)),
            Self::Random => Box::new(RandomStrategy::new(config)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy `{0}`")]
pub struct UnknownStrategy(pub String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownStrategy(s.to_owned()))
    }
}
