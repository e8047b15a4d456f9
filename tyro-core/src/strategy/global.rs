//! Greedy selection over the whole graph with coverage suppression.

use tracing::{info, instrument};

use super::{AttachmentConfig, AttachmentStrategy};
use crate::{
    centrality::VertexCentrality,
    coverage::{CoverageSet, expand_avoiding},
    error::StrategyError,
    graph::VertexId,
    selector::{TieBreak, select_extremal},
    session::Session,
};

/// Connects to the best-scoring uncovered vertex each round, then covers it
/// and every vertex within `radius - 1` hops.
///
/// The radius is read once, before the first edge. The loop ends early when
/// coverage empties.
#[derive(Debug, Clone, Copy)]
pub struct GlobalStrategy {
    config: AttachmentConfig,
}

impl GlobalStrategy {
    /// Creates the strategy; it scores vertices by `config.metric`.
    #[must_use]
    pub const fn new(config: AttachmentConfig) -> Self {
        Self { config }
    }
}

impl AttachmentStrategy for GlobalStrategy {
    fn name(&self) -> &'static str {
        "global"
    }

    #[instrument(
        name = "strategy.global",
        skip_all,
        fields(newcomer = %newcomer, budget = self.config.edge_budget.get(), metric = self.config.metric.as_str()),
    )]
    fn execute(
        self: Box<Self>,
        session: &mut Session<'_>,
        newcomer: VertexId,
    ) -> Result<(), StrategyError> {
        let metric = self.config.metric;
        let radius = session.snapshot().metrics().radius;
        greedy_coverage(
            session,
            newcomer,
            &self.config,
            radius.saturating_sub(1),
            |values| metric.value(values),
        )
    }
}

/// Select-connect-suppress loop shared by the global and broker-connect
/// strategies. Returns once the budget is spent or coverage is empty.
pub(super) fn greedy_coverage<F>(
    session: &mut Session<'_>,
    newcomer: VertexId,
    config: &AttachmentConfig,
    depth: usize,
    score: F,
) -> Result<(), StrategyError>
where
    F: Fn(&VertexCentrality) -> f64,
{
    let mut coverage = CoverageSet::initialize(session.graph(), newcomer);
    let mut round = 0;

    while session.remaining_budget() > 0 && !coverage.is_empty() {
        let snapshot = session.snapshot();
        let Some(target) = select_extremal(
            coverage.iter(),
            |vertex| snapshot.get(vertex).map(&score),
            TieBreak::LastWins,
        ) else {
            info!(uncovered = coverage.len(), "no scored candidate remains");
            break;
        };

        session.connect(newcomer, target)?;
        round += 1;
        coverage.remove(target);
        coverage.remove_all(expand_avoiding(session.graph(), target, depth, newcomer));
        config.finish_round(session, round, newcomer, target);
    }

    info!(
        edges_added = round,
        uncovered = coverage.len(),
        "attachment finished"
    );
    Ok(())
}
