//! Shared test utilities for `tyro-core`.

use proptest::test_runner::Config as ProptestConfig;
use tyro_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::graph::{Graph, VertexId};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `TYRO_PBT_CASES` and
/// `TYRO_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

fn with_vertices(count: usize) -> Graph {
    let mut graph = Graph::with_capacity(count);
    for index in 0..count {
        graph.add_vertex(index.to_string());
    }
    graph
}

fn connect(graph: &mut Graph, left: usize, right: usize) {
    graph
        .add_edge(VertexId::new(left), VertexId::new(right))
        .expect("fixture edges must be valid");
}

/// Path `0 - 1 - ... - (count - 1)`.
#[must_use]
pub(crate) fn path_graph(count: usize) -> Graph {
    let mut graph = with_vertices(count);
    for index in 1..count {
        connect(&mut graph, index - 1, index);
    }
    graph
}

/// Cycle over `count` vertices (`count >= 3`).
#[must_use]
pub(crate) fn cycle_graph(count: usize) -> Graph {
    let mut graph = path_graph(count);
    connect(&mut graph, count - 1, 0);
    graph
}

/// Star with hub `0` and `count - 1` leaves.
#[must_use]
pub(crate) fn star_graph(count: usize) -> Graph {
    let mut graph = with_vertices(count);
    for leaf in 1..count {
        connect(&mut graph, 0, leaf);
    }
    graph
}

/// `cliques` disjoint complete graphs of `size` vertices each, numbered
/// consecutively.
#[must_use]
pub(crate) fn disjoint_cliques(cliques: usize, size: usize) -> Graph {
    let mut graph = with_vertices(cliques * size);
    for clique in 0..cliques {
        let base = clique * size;
        for left in 0..size {
            for right in (left + 1)..size {
                connect(&mut graph, base + left, base + right);
            }
        }
    }
    graph
}

/// Disjoint cliques joined into a ring by one edge between consecutive
/// cliques (last vertex of clique `i` to first vertex of clique `i + 1`).
#[must_use]
pub(crate) fn ring_of_cliques(cliques: usize, size: usize) -> Graph {
    let mut graph = disjoint_cliques(cliques, size);
    if cliques > 1 {
        for clique in 0..cliques {
            let next = (clique + 1) % cliques;
            let tail = clique * size + size - 1;
            let head = next * size;
            if !graph.contains_edge(VertexId::new(tail), VertexId::new(head)) {
                connect(&mut graph, tail, head);
            }
        }
    }
    graph
}
