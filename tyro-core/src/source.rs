//! Graph source abstractions for the Tyro runner.

use crate::{error::GraphSourceError, graph::Graph};

/// Abstraction over anything that can produce a fresh [`Graph`] for one run.
///
/// Each call to [`GraphSource::load_graph`] yields an independent graph so a
/// single source can feed several strategy runs without shared state.
///
/// # Examples
/// ```
/// use tyro_core::{Graph, GraphSource, GraphSourceError};
///
/// struct Pair;
///
/// impl GraphSource for Pair {
///     fn name(&self) -> &str { "pair" }
///     fn load_graph(&self) -> Result<Graph, GraphSourceError> {
///         let mut graph = Graph::new();
///         let a = graph.add_vertex("a");
///         let b = graph.add_vertex("b");
///         graph.add_edge(a, b)?;
///         Ok(graph)
///     }
/// }
///
/// let graph = Pair.load_graph()?;
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(Pair.name(), "pair");
/// # Ok::<(), GraphSourceError>(())
/// ```
pub trait GraphSource {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Builds the graph.
    ///
    /// # Errors
    /// Returns [`GraphSourceError`] when the graph cannot be assembled.
    fn load_graph(&self) -> Result<Graph, GraphSourceError>;
}

/// A [`GraphSource`] backed by an in-memory graph that is cloned per load.
///
/// # Examples
/// ```
/// use tyro_core::{Graph, GraphSource, StaticGraph};
///
/// let mut graph = Graph::new();
/// graph.add_vertex("solo");
/// let source = StaticGraph::new("solo", graph);
/// assert_eq!(source.load_graph()?.vertex_count(), 1);
/// # Ok::<(), tyro_core::GraphSourceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StaticGraph {
    name: String,
    graph: Graph,
}

impl StaticGraph {
    /// Wraps `graph` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, graph: Graph) -> Self {
        Self {
            name: name.into(),
            graph,
        }
    }
}

impl GraphSource for StaticGraph {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_graph(&self) -> Result<Graph, GraphSourceError> {
        if self.graph.is_empty() {
            return Err(GraphSourceError::EmptyGraph);
        }
        Ok(self.graph.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_graph_returns_independent_copies() {
        let mut graph = Graph::new();
        let a = graph.add_vertex("a");
        let b = graph.add_vertex("b");
        graph.add_edge(a, b).expect("edge must insert");
        let source = StaticGraph::new("pair", graph);

        let mut first = source.load_graph().expect("load must succeed");
        first.add_vertex("extra");
        let second = source.load_graph().expect("load must succeed");

        assert_eq!(first.vertex_count(), 3);
        assert_eq!(second.vertex_count(), 2);
    }

    #[test]
    fn static_graph_rejects_empty_graphs() {
        let source = StaticGraph::new("empty", Graph::new());
        let err = source.load_graph().expect_err("empty graph must fail");
        assert_eq!(err, GraphSourceError::EmptyGraph);
    }
}
