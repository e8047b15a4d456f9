//! Greedy selection on a composite brokerage score.

use tracing::instrument;

use super::{AttachmentConfig, AttachmentStrategy, global::greedy_coverage};
use crate::{error::StrategyError, graph::VertexId, session::Session};

/// Like [`super::GlobalStrategy`] but scores by betweenness + closeness +
/// eigenvector centrality and suppresses only `round(ln(radius))` hops.
#[derive(Debug, Clone, Copy)]
pub struct BrokerConnectStrategy {
    config: AttachmentConfig,
}

impl BrokerConnectStrategy {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(config: AttachmentConfig) -> Self {
        Self { config }
    }
}

/// `round(ln(radius))`, zero for radii up to one.
pub(super) fn suppression_depth(radius: usize) -> usize {
    if radius <= 1 {
        return 0;
    }
    let depth = (radius as f64).ln().round();
    // ln of a usize stays far below usize::MAX.
    depth as usize
}

impl AttachmentStrategy for BrokerConnectStrategy {
    fn name(&self) -> &'static str {
        "broker-connect"
    }

    #[instrument(
        name = "strategy.broker_connect",
        skip_all,
        fields(newcomer = %newcomer, budget = self.config.edge_budget.get()),
    )]
    fn execute(
        self: Box<Self>,
        session: &mut Session<'_>,
        newcomer: VertexId,
    ) -> Result<(), StrategyError> {
        let radius = session.snapshot().metrics().radius;
        greedy_coverage(
            session,
            newcomer,
            &self.config,
            suppression_depth(radius),
            |values| values.betweenness + values.closeness + values.eigenvector,
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::suppression_depth;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(2, 1)]
    #[case(4, 1)]
    #[case(5, 2)]
    #[case(12, 2)]
    #[case(13, 3)]
    fn depth_is_rounded_log_of_radius(#[case] radius: usize, #[case] expected: usize) {
        assert_eq!(suppression_depth(radius), expected);
    }
}
