//! Shared fixtures for `tyro-core` integration tests.

use tyro_core::{Graph, GraphError, GraphSource, GraphSourceError, StaticGraph, VertexId};

fn numbered(count: usize) -> Graph {
    let mut graph = Graph::with_capacity(count);
    for index in 0..count {
        graph.add_vertex(index.to_string());
    }
    graph
}

fn link(graph: &mut Graph, left: usize, right: usize) {
    graph
        .add_edge(VertexId::new(left), VertexId::new(right))
        .expect("fixture edges must be valid");
}

#[must_use]
pub fn path(count: usize) -> StaticGraph {
    let mut graph = numbered(count);
    for index in 1..count {
        link(&mut graph, index - 1, index);
    }
    StaticGraph::new(format!("path-{count}"), graph)
}

#[must_use]
pub fn cycle(count: usize) -> StaticGraph {
    let mut graph = numbered(count);
    for index in 0..count {
        link(&mut graph, index, (index + 1) % count);
    }
    StaticGraph::new(format!("cycle-{count}"), graph)
}

/// Two triangles joined by a bridge `2 -- 3`.
#[must_use]
pub fn barbell() -> StaticGraph {
    let mut graph = numbered(6);
    for (left, right) in [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)] {
        link(&mut graph, left, right);
    }
    StaticGraph::new("barbell", graph)
}

/// Source whose load always fails with a graph error.
pub struct BrokenSource;

impl GraphSource for BrokenSource {
    fn name(&self) -> &str {
        "broken"
    }

    fn load_graph(&self) -> Result<Graph, GraphSourceError> {
        Err(GraphError::SelfLoop {
            vertex: VertexId::new(0),
        }
        .into())
    }
}
