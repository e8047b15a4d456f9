//! Centre first, then the periphery as seen from the newcomer.

use tracing::{debug, info, instrument, warn};

use super::{AttachmentConfig, AttachmentStrategy};
use crate::{
    coverage::CoverageSet,
    error::StrategyError,
    graph::VertexId,
    selector::{TieBreak, select_extremal},
    session::Session,
};

/// Connects to the highest-betweenness vertex, then repeatedly to the
/// uncovered vertex furthest from the newcomer.
///
/// Distances are recomputed on the current graph every periphery round.
/// Several vertices at the furthest distance are separated by fresh
/// betweenness, the first in ascending vertex order winning ties. Vertices
/// the newcomer cannot reach are never chosen.
#[derive(Debug, Clone, Copy)]
pub struct CentrePeripheryStrategy {
    config: AttachmentConfig,
}

impl CentrePeripheryStrategy {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(config: AttachmentConfig) -> Self {
        Self { config }
    }
}

fn most_between<I>(session: &mut Session<'_>, candidates: I) -> Option<VertexId>
where
    I: IntoIterator<Item = VertexId>,
{
    let snapshot = session.recompute();
    select_extremal(
        candidates,
        |vertex| snapshot.get(vertex).map(|values| values.betweenness),
        TieBreak::FirstWins,
    )
}

impl AttachmentStrategy for CentrePeripheryStrategy {
    fn name(&self) -> &'static str {
        "centre-periphery"
    }

    #[instrument(
        name = "strategy.centre_periphery",
        skip_all,
        fields(newcomer = %newcomer, budget = self.config.edge_budget.get()),
    )]
    fn execute(
        self: Box<Self>,
        session: &mut Session<'_>,
        newcomer: VertexId,
    ) -> Result<(), StrategyError> {
        let mut uncovered = CoverageSet::initialize(session.graph(), newcomer);
        let pool: Vec<VertexId> = uncovered.iter().collect();
        let Some(centre) = most_between(session, pool) else {
            warn!("graph has no candidate besides the newcomer");
            return Ok(());
        };

        session.connect(newcomer, centre)?;
        uncovered.remove(centre);
        let mut round = 1;
        debug!(%centre, "centre connected");
        self.config.finish_round(session, round, newcomer, centre);

        while session.remaining_budget() > 0 && !uncovered.is_empty() {
            let distances = session.shortest_paths_from(newcomer);
            let Some(furthest) = uncovered
                .iter()
                .filter_map(|vertex| distances.get(vertex))
                .max()
            else {
                warn!(
                    uncovered = uncovered.len(),
                    "no uncovered vertex is reachable from the newcomer"
                );
                break;
            };
            let candidates: Vec<VertexId> = uncovered
                .iter()
                .filter(|&vertex| distances.get(vertex) == Some(furthest))
                .collect();

            let target = match candidates.as_slice() {
                [only] => *only,
                _ => {
                    let Some(best) = most_between(session, candidates) else {
                        break;
                    };
                    best
                }
            };

            session.connect(newcomer, target)?;
            uncovered.remove(target);
            round += 1;
            debug!(%target, distance = furthest, "periphery connected");
            self.config.finish_round(session, round, newcomer, target);
        }

        info!(
            edges_added = round,
            uncovered = uncovered.len(),
            "attachment finished"
        );
        Ok(())
    }
}
