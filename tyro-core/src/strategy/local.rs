//! Greedy walk outward from the strongest hub.

use tracing::{info, instrument, warn};

use super::{AttachmentConfig, AttachmentStrategy};
use crate::{
    coverage::{CoverageSet, expand_avoiding},
    error::StrategyError,
    graph::VertexId,
    selector::{TieBreak, select_extremal},
    session::Session,
};

/// Connects to the highest-betweenness vertex, then keeps choosing the best
/// vertex from a frontier that grows with each target's neighbourhood.
///
/// The frontier holds vertices within `max(radius - 1, 1)` hops of a target
/// that the newcomer has not yet connected to.
#[derive(Debug, Clone, Copy)]
pub struct LocalStrategy {
    config: AttachmentConfig,
}

impl LocalStrategy {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(config: AttachmentConfig) -> Self {
        Self { config }
    }
}

impl AttachmentStrategy for LocalStrategy {
    fn name(&self) -> &'static str {
        "local"
    }

    #[instrument(
        name = "strategy.local",
        skip_all,
        fields(newcomer = %newcomer, budget = self.config.edge_budget.get()),
    )]
    fn execute(
        self: Box<Self>,
        session: &mut Session<'_>,
        newcomer: VertexId,
    ) -> Result<(), StrategyError> {
        let candidates: Vec<VertexId> = session
            .graph()
            .vertices()
            .filter(|&vertex| vertex != newcomer)
            .collect();
        let snapshot = session.snapshot();
        let depth = snapshot.metrics().radius.saturating_sub(1).max(1);
        let Some(hub) = select_extremal(
            candidates,
            |vertex| snapshot.get(vertex).map(|values| values.betweenness),
            TieBreak::LastWins,
        ) else {
            warn!("graph has no candidate besides the newcomer");
            return Ok(());
        };

        session.connect(newcomer, hub)?;
        let mut round = 1;
        let mut frontier = CoverageSet::empty();
        frontier.extend(expand_avoiding(session.graph(), hub, depth, newcomer));
        self.config.finish_round(session, round, newcomer, hub);

        while session.remaining_budget() > 0 && !frontier.is_empty() {
            let snapshot = session.snapshot();
            let Some(target) = select_extremal(
                frontier.iter(),
                |vertex| snapshot.get(vertex).map(|values| values.betweenness),
                TieBreak::LastWins,
            ) else {
                info!(frontier = frontier.len(), "no scored candidate remains");
                break;
            };

            session.connect(newcomer, target)?;
            round += 1;
            frontier.remove(target);
            let reached = expand_avoiding(session.graph(), target, depth, newcomer);
            frontier.extend(
                reached
                    .into_iter()
                    .filter(|&vertex| !session.is_connected(vertex)),
            );
            self.config.finish_round(session, round, newcomer, target);
        }

        info!(
            edges_added = round,
            frontier = frontier.len(),
            "attachment finished"
        );
        Ok(())
    }
}
