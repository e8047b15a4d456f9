//! Pairs of distant vertices per round.

use std::collections::VecDeque;

use tracing::{debug, info, instrument, warn};

use super::{AttachmentConfig, AttachmentStrategy};
use crate::{
    coverage::{CoverageSet, expand_avoiding},
    error::StrategyError,
    graph::{Graph, VertexId},
    selector::{TieBreak, select_extremal},
    session::Session,
};

/// Connects, per round, the uncovered vertex of highest degree and the last
/// vertex a breadth-first search from it reaches.
///
/// Each round spends two budget units; with one unit left only the start
/// vertex is connected. Both vertices and their immediate neighbours then
/// leave coverage. The run stops when no uncovered vertex has a positive
/// degree.
///
/// With export enabled each edge yields its own [`crate::RoundRecord`], and
/// the two records of a pair carry the same round number.
#[derive(Debug, Clone, Copy)]
pub struct BrokerExpressStrategy {
    config: AttachmentConfig,
}

impl BrokerExpressStrategy {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(config: AttachmentConfig) -> Self {
        Self { config }
    }
}

impl AttachmentStrategy for BrokerExpressStrategy {
    fn name(&self) -> &'static str {
        "broker-express"
    }

    #[instrument(
        name = "strategy.broker_express",
        skip_all,
        fields(newcomer = %newcomer, budget = self.config.edge_budget.get()),
    )]
    fn execute(
        self: Box<Self>,
        session: &mut Session<'_>,
        newcomer: VertexId,
    ) -> Result<(), StrategyError> {
        let mut coverage = CoverageSet::initialize(session.graph(), newcomer);
        let mut round = 0;

        while session.remaining_budget() > 0 && !coverage.is_empty() {
            let graph = session.graph();
            let Some(start) = select_extremal(
                coverage.iter(),
                |vertex| {
                    let degree = graph.degree(vertex);
                    (degree > 0).then_some(degree as f64)
                },
                TieBreak::FirstWins,
            ) else {
                warn!(
                    uncovered = coverage.len(),
                    "no uncovered vertex has a positive degree"
                );
                break;
            };
            let end = last_visited(graph, start, newcomer, |vertex| {
                vertex != start && !session.is_connected(vertex)
            });
            debug!(%start, end = ?end, "pair selected");

            round += 1;
            session.connect(newcomer, start)?;
            let mut chosen = vec![start];
            self.config.finish_round(session, round, newcomer, start);

            if session.remaining_budget() > 0
                && let Some(end) = end
            {
                session.connect(newcomer, end)?;
                chosen.push(end);
                self.config.finish_round(session, round, newcomer, end);
            }

            for vertex in chosen {
                coverage.remove(vertex);
                coverage.remove_all(expand_avoiding(session.graph(), vertex, 1, newcomer));
            }
        }

        info!(
            rounds = round,
            edges_added = session.targets().len(),
            uncovered = coverage.len(),
            "attachment finished"
        );
        Ok(())
    }
}

/// Breadth-first search from `start` that never enters `barrier`; returns the
/// last visited vertex accepted by `eligible`.
fn last_visited<F>(graph: &Graph, start: VertexId, barrier: VertexId, eligible: F) -> Option<VertexId>
where
    F: Fn(VertexId) -> bool,
{
    let mut visited = vec![false; graph.vertex_count()];
    visited[start.index()] = true;
    if graph.contains(barrier) {
        visited[barrier.index()] = true;
    }

    let mut last = None;
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if eligible(current) {
            last = Some(current);
        }
        for &neighbour in graph.neighbors(current) {
            if !visited[neighbour.index()] {
                visited[neighbour.index()] = true;
                queue.push_back(neighbour);
            }
        }
    }
    last
}
