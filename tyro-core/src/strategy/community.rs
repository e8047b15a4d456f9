//! One representative per detected community.

use tracing::{info, instrument};

use super::{AttachmentConfig, AttachmentStrategy, resolution::search_resolution};
use crate::{
    community::CommunityId,
    error::StrategyError,
    graph::VertexId,
    selector::{TieBreak, select_extremal},
    session::Session,
};

/// Tunes the community resolution until there are `edge_budget + 1`
/// communities, then connects to the highest-betweenness member of each
/// community other than the newcomer's, largest communities first.
///
/// Representatives are the first maximum in ascending vertex order, unlike
/// the last-wins rule of the greedy strategies.
#[derive(Debug, Clone, Copy)]
pub struct CommunityStrategy {
    config: AttachmentConfig,
}

impl CommunityStrategy {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(config: AttachmentConfig) -> Self {
        Self { config }
    }
}

impl AttachmentStrategy for CommunityStrategy {
    fn name(&self) -> &'static str {
        "community"
    }

    #[instrument(
        name = "strategy.community",
        skip_all,
        fields(newcomer = %newcomer, budget = self.config.edge_budget.get()),
    )]
    fn execute(
        self: Box<Self>,
        session: &mut Session<'_>,
        newcomer: VertexId,
    ) -> Result<(), StrategyError> {
        let target_count = self.config.edge_budget.get() + 1;
        let result = {
            let probe: &Session<'_> = session;
            search_resolution(
                |resolution| probe.partition(resolution),
                target_count,
                self.config.search,
            )?
        };
        session.record_resolution(result.outcome);
        let partition = result.partition;
        let own = partition.community_of(newcomer);

        let snapshot = session.snapshot();
        let representatives: Vec<(CommunityId, VertexId)> = partition
            .by_descending_size()
            .into_iter()
            .filter(|&community| Some(community) != own)
            .filter_map(|community| {
                let members = partition
                    .members(community)
                    .filter(|&vertex| vertex != newcomer);
                select_extremal(
                    members,
                    |vertex| snapshot.get(vertex).map(|values| values.betweenness),
                    TieBreak::FirstWins,
                )
                .map(|representative| (community, representative))
            })
            .collect();

        let mut round = 0;
        for (community, representative) in representatives {
            if session.remaining_budget() == 0 {
                break;
            }
            session.connect(newcomer, representative)?;
            round += 1;
            info!(
                community = community.get(),
                %representative,
                "community representative connected"
            );
            self.config.finish_round(session, round, newcomer, representative);
        }

        info!(
            edges_added = round,
            communities = partition.community_count(),
            resolution = result.outcome.resolution(),
            exact = result.outcome.is_exact(),
            "attachment finished"
        );
        Ok(())
    }
}
