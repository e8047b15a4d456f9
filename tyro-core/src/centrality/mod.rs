//! Centrality snapshots and the oracle that produces them.
//!
//! A [`CentralitySnapshot`] is only valid for the graph state it was computed
//! on. Vertices created after the snapshot (the newcomer, typically) have no
//! entry, and callers must treat a missing entry as "no score".

mod exact;

#[cfg(test)]
mod tests;

pub use self::exact::ExactCentrality;

use crate::graph::{Graph, VertexId};

/// Per-vertex centrality values produced by a [`CentralityOracle`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexCentrality {
    /// Normalised betweenness in `[0, 1]`.
    pub betweenness: f64,
    /// Reachable vertices divided by the sum of their distances.
    pub closeness: f64,
    /// Largest finite distance to any other vertex.
    pub eccentricity: f64,
    /// Eigenvector centrality scaled so the maximum is `1`.
    pub eigenvector: f64,
}

/// Selects a single centrality value from [`VertexCentrality`].
///
/// # Examples
/// ```
/// use tyro_core::{Metric, VertexCentrality};
///
/// let values = VertexCentrality { betweenness: 0.5, ..VertexCentrality::default() };
/// assert_eq!(Metric::Betweenness.value(&values), 0.5);
/// assert_eq!(Metric::Closeness.value(&values), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Betweenness centrality.
    #[default]
    Betweenness,
    /// Closeness centrality.
    Closeness,
    /// Eccentricity.
    Eccentricity,
    /// Eigenvector centrality.
    Eigenvector,
}

impl Metric {
    /// Reads the selected value.
    #[must_use]
    pub const fn value(self, centrality: &VertexCentrality) -> f64 {
        match self {
            Self::Betweenness => centrality.betweenness,
            Self::Closeness => centrality.closeness,
            Self::Eccentricity => centrality.eccentricity,
            Self::Eigenvector => centrality.eigenvector,
        }
    }

    /// Stable lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Betweenness => "betweenness",
            Self::Closeness => "closeness",
            Self::Eccentricity => "eccentricity",
            Self::Eigenvector => "eigenvector",
        }
    }
}

/// Graph-level distance statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraphMetrics {
    /// Mean hop count over all ordered pairs of mutually reachable vertices.
    pub average_path_length: f64,
    /// Largest eccentricity.
    pub diameter: usize,
    /// Smallest eccentricity over vertices that reach at least one other vertex.
    pub radius: usize,
}

/// Centrality values for every vertex of one graph state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentralitySnapshot {
    vertices: Vec<VertexCentrality>,
    metrics: GraphMetrics,
}

impl CentralitySnapshot {
    /// Builds a snapshot from per-vertex values indexed by [`VertexId::index`].
    #[must_use]
    pub fn new(vertices: Vec<VertexCentrality>, metrics: GraphMetrics) -> Self {
        Self { vertices, metrics }
    }

    /// Returns the values recorded for `vertex`, if it existed when computed.
    #[must_use]
    pub fn get(&self, vertex: VertexId) -> Option<&VertexCentrality> {
        self.vertices.get(vertex.index())
    }

    /// Returns the `metric` value for `vertex`, if recorded.
    #[must_use]
    pub fn score(&self, vertex: VertexId, metric: Metric) -> Option<f64> {
        self.get(vertex).map(|values| metric.value(values))
    }

    /// Returns the graph-level statistics.
    #[must_use]
    pub fn metrics(&self) -> GraphMetrics {
        self.metrics
    }

    /// Returns the number of vertices covered by the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns whether the snapshot covers no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Hop distances from a single source vertex.
///
/// `None` marks an unreachable vertex (infinite distance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distances {
    hops: Vec<Option<usize>>,
}

impl Distances {
    /// Wraps per-vertex hop counts indexed by [`VertexId::index`].
    #[must_use]
    pub fn new(hops: Vec<Option<usize>>) -> Self {
        Self { hops }
    }

    /// Returns the hop count to `vertex`, or `None` when unreachable.
    #[must_use]
    pub fn get(&self, vertex: VertexId) -> Option<usize> {
        self.hops.get(vertex.index()).copied().flatten()
    }

    /// Iterates over reachable vertices and their distances.
    pub fn reachable(&self) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.hops
            .iter()
            .enumerate()
            .filter_map(|(index, hops)| hops.map(|value| (VertexId::new(index), value)))
    }
}

/// Computes centrality values and distances for the current graph state.
///
/// Implementations must be deterministic for a given graph.
pub trait CentralityOracle {
    /// Computes per-vertex centralities and graph-level statistics.
    fn compute(&self, graph: &Graph) -> CentralitySnapshot;

    /// Computes hop distances from `source` to every vertex.
    fn shortest_paths_from(&self, graph: &Graph, source: VertexId) -> Distances;
}
