//! Tyro core library: strategies for attaching a newcomer to a graph.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod centrality;
mod community;
mod coverage;
mod error;
mod graph;
mod runner;
mod selector;
mod session;
mod source;
mod strategy;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::RunnerBuilder,
    centrality::{
        CentralityOracle, CentralitySnapshot, Distances, ExactCentrality, GraphMetrics, Metric,
        VertexCentrality,
    },
    community::{CommunityId, CommunityOracle, Louvain, NonContiguousCommunityIds, Partition},
    coverage::{CoverageSet, expand, expand_avoiding},
    error::{
        GraphError, GraphErrorCode, GraphSourceError, GraphSourceErrorCode, Result, StrategyError,
        StrategyErrorCode, TyroError, TyroErrorCode,
    },
    graph::{Graph, VertexId},
    runner::{NEWCOMER_LABEL, RunReport, StrategyRunner},
    selector::{TieBreak, select_extremal},
    session::{MemorySink, MetricsSink, RoundRecord, Session, SessionParts, TracingSink},
    source::{GraphSource, StaticGraph},
    strategy::{
        AttachmentConfig, AttachmentStrategy, BrokerConnectStrategy, BrokerExpressStrategy,
        CentrePeripheryStrategy, CommunityStrategy, GlobalStrategy, LocalStrategy,
        NonConvergence, RandomStrategy, ResolutionSearch, SearchLimits, SearchOutcome,
        SearchResult, SearchState, StrategyKind, Transition, UnknownStrategy, search_resolution,
    },
};
