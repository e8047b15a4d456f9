//! Lifecycle of a single strategy run.
//!
//! Loads a graph, measures it, adds the newcomer, executes one strategy and
//! measures again.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    Result,
    centrality::{CentralityOracle, ExactCentrality, GraphMetrics, VertexCentrality},
    community::Louvain,
    error::{GraphSourceError, TyroError},
    graph::VertexId,
    session::{MetricsSink, RoundRecord, Session, TracingSink},
    source::GraphSource,
    strategy::{AttachmentConfig, SearchOutcome, StrategyKind},
};

/// Label given to the vertex added for every run.
pub const NEWCOMER_LABEL: &str = "Newcomer";

/// Before/after measurements of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Strategy that was executed.
    pub strategy: StrategyKind,
    /// Name reported by the graph source.
    pub graph_source: Arc<str>,
    /// Identifier assigned to the newcomer.
    pub newcomer: VertexId,
    /// Vertices connected to the newcomer, in order.
    pub targets: Vec<VertexId>,
    /// Graph statistics before the newcomer was added.
    pub baseline: GraphMetrics,
    /// Graph statistics after the strategy ran.
    pub final_metrics: GraphMetrics,
    /// Newcomer centrality after the strategy ran.
    pub newcomer_centrality: VertexCentrality,
    /// Rounds exported while the strategy ran.
    pub rounds: Vec<RoundRecord>,
    /// Resolution search result for the community strategy.
    pub resolution: Option<SearchOutcome>,
}

/// Runs attachment strategies over graph sources.
///
/// # Examples
/// ```
/// use tyro_core::{Graph, RunnerBuilder, StaticGraph, StrategyKind};
///
/// let mut graph = Graph::new();
/// let ids: Vec<_> = (0..5).map(|i| graph.add_vertex(i.to_string())).collect();
/// for pair in ids.windows(2) {
///     graph.add_edge(pair[0], pair[1])?;
/// }
///
/// let runner = RunnerBuilder::new().with_edge_budget(2).build()?;
/// let report = runner.run(&StaticGraph::new("path", graph), StrategyKind::CentrePeriphery)?;
/// assert_eq!(report.targets, [ids[2], ids[0]]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct StrategyRunner {
    config: AttachmentConfig,
    centrality: ExactCentrality,
    communities: Louvain,
}

impl StrategyRunner {
    pub(crate) fn new(config: AttachmentConfig) -> Self {
        Self {
            config,
            centrality: ExactCentrality,
            communities: Louvain::default(),
        }
    }

    /// Returns the configuration every strategy is built with.
    #[must_use]
    pub fn config(&self) -> &AttachmentConfig {
        &self.config
    }

    /// Runs `kind` over the graph from `source`, exporting rounds as
    /// `tracing` events when export is enabled.
    ///
    /// # Errors
    /// Returns [`TyroError::EmptyGraph`] for a graph without vertices,
    /// [`TyroError::GraphSource`] when loading fails and
    /// [`TyroError::Strategy`] when the strategy fails.
    pub fn run<S: GraphSource + ?Sized>(&self, source: &S, kind: StrategyKind) -> Result<RunReport> {
        self.run_with_sink(source, kind, &mut TracingSink)
    }

    /// Like [`Self::run`] but exports rounds to `sink`.
    ///
    /// # Errors
    /// See [`Self::run`].
    #[instrument(
        name = "core.run",
        err,
        skip(self, source, sink),
        fields(
            graph_source = %source.name(),
            strategy = %kind,
            edge_budget = self.config.edge_budget.get(),
        ),
    )]
    pub fn run_with_sink<S: GraphSource + ?Sized>(
        &self,
        source: &S,
        kind: StrategyKind,
        sink: &mut dyn MetricsSink,
    ) -> Result<RunReport> {
        let graph_source: Arc<str> = Arc::from(source.name());
        let mut graph = match source.load_graph() {
            Ok(graph) if !graph.is_empty() => graph,
            Ok(_) | Err(GraphSourceError::EmptyGraph) => {
                warn!(graph_source = %graph_source, "graph source is empty, returning error");
                return Err(TyroError::EmptyGraph { graph_source });
            }
            Err(error) => {
                return Err(TyroError::GraphSource {
                    graph_source,
                    error,
                });
            }
        };

        let host = self.centrality.compute(&graph);
        let baseline = host.metrics();
        info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            radius = baseline.radius,
            diameter = baseline.diameter,
            "baseline measured"
        );

        let newcomer = graph.add_vertex(NEWCOMER_LABEL);
        let strategy = kind.build(self.config);
        let name = strategy.name();
        let mut session = Session::new(
            name,
            graph,
            &self.centrality,
            &self.communities,
            sink,
            self.config.edge_budget.get(),
        )
        .with_baseline(host);
        strategy
            .execute(&mut session, newcomer)
            .map_err(|error| TyroError::Strategy {
                strategy: name,
                error,
            })?;
        let parts = session.into_parts();

        let after = self.centrality.compute(&parts.graph);
        let newcomer_centrality = after.get(newcomer).copied().unwrap_or_default();
        info!(
            edges_added = parts.targets.len(),
            betweenness = newcomer_centrality.betweenness,
            closeness = newcomer_centrality.closeness,
            "run completed"
        );

        Ok(RunReport {
            strategy: kind,
            graph_source,
            newcomer,
            targets: parts.targets,
            baseline,
            final_metrics: after.metrics(),
            newcomer_centrality,
            rounds: parts.rounds,
            resolution: parts.resolution,
        })
    }
}
