//! Uniformly random distinct targets.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use super::{AttachmentConfig, AttachmentStrategy};
use crate::{error::StrategyError, graph::VertexId, session::Session};

/// Connects to uniformly sampled vertices, resampling the newcomer and
/// vertices it is already connected to.
///
/// Uses a `SmallRng` seeded from `config.seed`, or from entropy when unset.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    config: AttachmentConfig,
    rng: SmallRng,
}

impl RandomStrategy {
    /// Creates the strategy.
    #[must_use]
    pub fn new(config: AttachmentConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
        Self { config, rng }
    }
}

impl AttachmentStrategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    #[instrument(
        name = "strategy.random",
        skip_all,
        fields(newcomer = %newcomer, budget = self.config.edge_budget.get(), seed = ?self.config.seed),
    )]
    fn execute(
        mut self: Box<Self>,
        session: &mut Session<'_>,
        newcomer: VertexId,
    ) -> Result<(), StrategyError> {
        let vertex_count = session.graph().vertex_count();
        let mut round = 0;

        while session.remaining_budget() > 0 {
            let newcomer_present = usize::from(session.graph().contains(newcomer));
            let eligible = vertex_count
                .saturating_sub(newcomer_present)
                .saturating_sub(session.targets().len());
            if eligible == 0 {
                info!("every vertex is already connected");
                break;
            }

            let target = loop {
                let sample = VertexId::new(self.rng.gen_range(0..vertex_count));
                if sample != newcomer && !session.is_connected(sample) {
                    break sample;
                }
            };

            session.connect(newcomer, target)?;
            round += 1;
            self.config.finish_round(session, round, newcomer, target);
        }

        info!(edges_added = round, "attachment finished");
        Ok(())
    }
}
