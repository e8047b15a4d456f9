//! Mutable state shared by a strategy run.
//!
//! A [`Session`] owns the graph while a strategy executes. Every edge the
//! newcomer gains goes through [`Session::connect`], which enforces the edge
//! budget and marks the centrality snapshot stale.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::{
    centrality::{CentralityOracle, CentralitySnapshot, Distances, GraphMetrics, VertexCentrality},
    community::{CommunityOracle, Partition},
    error::StrategyError,
    graph::{Graph, VertexId},
    strategy::SearchOutcome,
};

/// Metrics exported after one strategy round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRecord {
    /// Name of the strategy that produced the round.
    pub strategy: &'static str,
    /// One-based round number. Strategies that add two edges per round
    /// export one record per edge under the same number.
    pub round: usize,
    /// Vertex connected to the newcomer in this round.
    pub target: VertexId,
    /// Edges the newcomer holds after the round.
    pub edges_added: usize,
    /// Newcomer centrality on the graph after the round.
    pub newcomer: VertexCentrality,
    /// Graph-level statistics after the round.
    pub metrics: GraphMetrics,
}

/// Side-effecting consumer of exported rounds.
///
/// Sinks never influence strategy decisions.
pub trait MetricsSink {
    /// Receives one exported round.
    fn record(&mut self, record: &RoundRecord);
}

/// Emits every round as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl MetricsSink for TracingSink {
    fn record(&mut self, record: &RoundRecord) {
        info!(
            strategy = record.strategy,
            round = record.round,
            target = %record.target,
            edges_added = record.edges_added,
            betweenness = record.newcomer.betweenness,
            closeness = record.newcomer.closeness,
            eccentricity = record.newcomer.eccentricity,
            eigenvector = record.newcomer.eigenvector,
            average_path_length = record.metrics.average_path_length,
            diameter = record.metrics.diameter,
            radius = record.metrics.radius,
            "round exported"
        );
    }
}

/// Keeps exported rounds in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<RoundRecord>,
}

impl MemorySink {
    /// Returns the rounds recorded so far.
    #[must_use]
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }
}

impl MetricsSink for MemorySink {
    fn record(&mut self, record: &RoundRecord) {
        self.records.push(record.clone());
    }
}

/// Graph, oracles and bookkeeping for one strategy run.
pub struct Session<'a> {
    strategy: &'static str,
    graph: Graph,
    centrality: &'a dyn CentralityOracle,
    communities: &'a dyn CommunityOracle,
    sink: &'a mut dyn MetricsSink,
    snapshot: CentralitySnapshot,
    stale: bool,
    budget: usize,
    targets: Vec<VertexId>,
    connected: HashSet<VertexId>,
    rounds: Vec<RoundRecord>,
    resolution: Option<SearchOutcome>,
}

/// State handed back once a strategy finishes.
#[derive(Debug, Clone)]
pub struct SessionParts {
    /// Graph including the newcomer's edges.
    pub graph: Graph,
    /// Targets in connection order.
    pub targets: Vec<VertexId>,
    /// Exported rounds.
    pub rounds: Vec<RoundRecord>,
    /// Resolution search result, for strategies that run one.
    pub resolution: Option<SearchOutcome>,
}

impl<'a> Session<'a> {
    /// Starts a session over `graph` allowing at most `budget` newcomer edges.
    ///
    /// The snapshot starts stale and is computed on first use unless the
    /// session is seeded through [`Self::with_baseline`].
    pub fn new(
        strategy: &'static str,
        graph: Graph,
        centrality: &'a dyn CentralityOracle,
        communities: &'a dyn CommunityOracle,
        sink: &'a mut dyn MetricsSink,
        budget: usize,
    ) -> Self {
        Self {
            strategy,
            graph,
            centrality,
            communities,
            sink,
            snapshot: CentralitySnapshot::default(),
            stale: true,
            budget,
            targets: Vec::new(),
            connected: HashSet::new(),
            rounds: Vec::new(),
            resolution: None,
        }
    }

    /// Seeds the session with a snapshot of the graph before the newcomer
    /// joined, so the first [`Self::snapshot`] call needs no computation.
    ///
    /// The newcomer has no entry in `baseline` until a recompute.
    #[must_use]
    pub fn with_baseline(mut self, baseline: CentralitySnapshot) -> Self {
        self.snapshot = baseline;
        self.stale = false;
        self
    }

    /// Returns the graph in its current state.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the number of edges the newcomer may still gain.
    #[must_use]
    pub fn remaining_budget(&self) -> usize {
        self.budget.saturating_sub(self.targets.len())
    }

    /// Returns the connected targets in order.
    #[must_use]
    pub fn targets(&self) -> &[VertexId] {
        &self.targets
    }

    /// Returns whether `vertex` already received an edge from the newcomer.
    #[must_use]
    pub fn is_connected(&self, vertex: VertexId) -> bool {
        self.connected.contains(&vertex)
    }

    /// Returns whether the snapshot predates the latest edge.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Returns the snapshot, computing it first when none exists yet.
    ///
    /// After the first computation the snapshot is returned as is, even when
    /// stale; strategies that need fresh values call [`Self::recompute`].
    pub fn snapshot(&mut self) -> &CentralitySnapshot {
        if self.snapshot.is_empty() && !self.graph.is_empty() {
            self.recompute();
        }
        &self.snapshot
    }

    /// Recomputes centrality for the current graph.
    pub fn recompute(&mut self) -> &CentralitySnapshot {
        self.snapshot = self.centrality.compute(&self.graph);
        self.stale = false;
        &self.snapshot
    }

    /// Hop distances from `source` on the current graph.
    #[must_use]
    pub fn shortest_paths_from(&self, source: VertexId) -> Distances {
        self.centrality.shortest_paths_from(&self.graph, source)
    }

    /// Partitions the current graph at `resolution`.
    #[must_use]
    pub fn partition(&self, resolution: f64) -> Option<Partition> {
        self.communities.partition(&self.graph, resolution)
    }

    /// Adds the edge `newcomer -- target`.
    ///
    /// # Errors
    /// Returns [`StrategyError::BudgetExhausted`] when the budget is spent and
    /// [`StrategyError::Graph`] when the graph rejects the edge (self-loop,
    /// duplicate or unknown vertex).
    pub fn connect(&mut self, newcomer: VertexId, target: VertexId) -> Result<(), StrategyError> {
        if self.targets.len() >= self.budget {
            return Err(StrategyError::BudgetExhausted {
                budget: self.budget,
            });
        }
        self.graph.add_edge(newcomer, target)?;
        self.targets.push(target);
        self.connected.insert(target);
        self.stale = true;
        debug!(
            strategy = self.strategy,
            %target,
            edges_added = self.targets.len(),
            "newcomer connected"
        );
        Ok(())
    }

    /// Exports the state after `round`, recomputing stale centralities first.
    pub fn export(&mut self, round: usize, newcomer: VertexId, target: VertexId) {
        if self.stale {
            self.recompute();
        }
        let record = RoundRecord {
            strategy: self.strategy,
            round,
            target,
            edges_added: self.targets.len(),
            newcomer: self.snapshot.get(newcomer).copied().unwrap_or_default(),
            metrics: self.snapshot.metrics(),
        };
        self.sink.record(&record);
        self.rounds.push(record);
    }

    /// Stores the resolution search result for the run report.
    pub fn record_resolution(&mut self, outcome: SearchOutcome) {
        self.resolution = Some(outcome);
    }

    /// Ends the session, returning the graph and bookkeeping.
    #[must_use]
    pub fn into_parts(self) -> SessionParts {
        SessionParts {
            graph: self.graph,
            targets: self.targets,
            rounds: self.rounds,
            resolution: self.resolution,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{ExactCentrality, GraphError, Louvain, test_utils::path_graph};

    fn session_over<'a>(graph: Graph, sink: &'a mut MemorySink, budget: usize) -> Session<'a> {
        Session::new("test", graph, &ExactCentrality, &Louvain::DEFAULT, sink, budget)
    }

    #[rstest]
    fn connect_enforces_budget() {
        let mut graph = path_graph(4);
        let newcomer = graph.add_vertex("newcomer");
        let mut sink = MemorySink::default();
        let mut session = session_over(graph, &mut sink, 2);

        session.connect(newcomer, VertexId::new(0)).expect("first edge");
        session.connect(newcomer, VertexId::new(1)).expect("second edge");
        assert_eq!(session.remaining_budget(), 0);
        assert_eq!(
            session.connect(newcomer, VertexId::new(2)),
            Err(StrategyError::BudgetExhausted { budget: 2 })
        );
        assert_eq!(session.targets(), [VertexId::new(0), VertexId::new(1)]);
    }

    #[rstest]
    fn connect_rejects_self_loops_and_duplicates() {
        let mut graph = path_graph(3);
        let newcomer = graph.add_vertex("newcomer");
        let mut sink = MemorySink::default();
        let mut session = session_over(graph, &mut sink, 5);

        assert_eq!(
            session.connect(newcomer, newcomer),
            Err(StrategyError::Graph(GraphError::SelfLoop { vertex: newcomer }))
        );
        session.connect(newcomer, VertexId::new(0)).expect("first edge");
        assert!(matches!(
            session.connect(newcomer, VertexId::new(0)),
            Err(StrategyError::Graph(GraphError::DuplicateEdge { .. }))
        ));
        assert_eq!(session.targets().len(), 1);
    }

    #[rstest]
    fn connect_marks_snapshot_stale() {
        let mut graph = path_graph(3);
        let newcomer = graph.add_vertex("newcomer");
        let mut sink = MemorySink::default();
        let mut session = session_over(graph, &mut sink, 1);

        assert_eq!(session.snapshot().len(), 4);
        assert!(!session.is_stale());
        session.connect(newcomer, VertexId::new(1)).expect("edge is new");
        assert!(session.is_stale());
        session.recompute();
        assert!(!session.is_stale());
    }

    #[rstest]
    fn baseline_is_served_without_recomputing() {
        let host = path_graph(3);
        let baseline = ExactCentrality.compute(&host);
        let mut graph = host;
        let newcomer = graph.add_vertex("newcomer");
        let mut sink = MemorySink::default();
        let mut session = session_over(graph, &mut sink, 1).with_baseline(baseline.clone());

        assert!(!session.is_stale());
        assert_eq!(session.snapshot(), &baseline);
        assert!(session.snapshot().get(newcomer).is_none());
        session.connect(newcomer, VertexId::new(1)).expect("edge is new");
        assert_eq!(session.recompute().len(), 4);
    }

    #[rstest]
    fn export_records_fresh_newcomer_metrics() {
        let mut graph = path_graph(3);
        let newcomer = graph.add_vertex("newcomer");
        let mut sink = MemorySink::default();
        {
            let mut session = session_over(graph, &mut sink, 1);
            session.connect(newcomer, VertexId::new(1)).expect("edge is new");
            session.export(1, newcomer, VertexId::new(1));
            let parts = session.into_parts();
            assert_eq!(parts.rounds.len(), 1);
            assert_eq!(parts.graph.degree(newcomer), 1);
        }
        let record = &sink.records()[0];
        assert_eq!(record.round, 1);
        assert_eq!(record.edges_added, 1);
        assert!(record.newcomer.closeness > 0.0);
        assert_eq!(record.metrics.diameter, 2);
    }
}
