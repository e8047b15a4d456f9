//! Unit tests for the exact centrality oracle.

use rstest::rstest;

use super::{CentralityOracle, ExactCentrality, Metric};
use crate::graph::VertexId;
use crate::test_utils::{cycle_graph, path_graph, star_graph};

const EPSILON: f64 = 1e-12;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

#[rstest]
fn path_of_five_centres_on_middle_vertex() {
    let graph = path_graph(5);
    let snapshot = ExactCentrality.compute(&graph);

    // Middle vertex separates 2 * 2 pairs out of 6 pairs not involving it.
    let middle = snapshot.get(VertexId::new(2)).expect("vertex present");
    assert_close(middle.betweenness, 4.0 / 6.0);
    assert_close(
        snapshot.get(VertexId::new(1)).expect("vertex present").betweenness,
        3.0 / 6.0,
    );
    assert_close(
        snapshot.get(VertexId::new(0)).expect("vertex present").betweenness,
        0.0,
    );
    assert_close(middle.closeness, 4.0 / 6.0);
    assert_close(middle.eccentricity, 2.0);

    let metrics = snapshot.metrics();
    assert_eq!(metrics.radius, 2);
    assert_eq!(metrics.diameter, 4);
    assert_close(metrics.average_path_length, 2.0);
}

#[rstest]
#[case(4)]
#[case(7)]
#[case(10)]
fn cycles_are_vertex_transitive(#[case] size: usize) {
    let graph = cycle_graph(size);
    let snapshot = ExactCentrality.compute(&graph);
    let first = *snapshot.get(VertexId::new(0)).expect("vertex present");
    for vertex in graph.vertices() {
        let values = snapshot.get(vertex).expect("vertex present");
        assert_close(values.betweenness, first.betweenness);
        assert_close(values.closeness, first.closeness);
        assert_close(values.eigenvector, 1.0);
    }
    assert_eq!(snapshot.metrics().radius, size / 2);
    assert_eq!(snapshot.metrics().diameter, size / 2);
}

#[rstest]
fn star_hub_dominates_every_metric() {
    let graph = star_graph(6);
    let snapshot = ExactCentrality.compute(&graph);
    let hub = VertexId::new(0);
    for metric in [Metric::Betweenness, Metric::Closeness, Metric::Eigenvector] {
        let hub_score = snapshot.score(hub, metric).expect("hub present");
        for leaf in graph.vertices().skip(1) {
            let leaf_score = snapshot.score(leaf, metric).expect("leaf present");
            assert!(
                hub_score > leaf_score,
                "{} of hub must exceed leaf {leaf}",
                metric.as_str()
            );
        }
    }
    assert_close(snapshot.score(hub, Metric::Betweenness).expect("hub"), 1.0);
}

#[rstest]
fn isolated_vertices_are_ignored_by_radius() {
    let mut graph = path_graph(3);
    let loner = graph.add_vertex("loner");
    let snapshot = ExactCentrality.compute(&graph);
    let values = snapshot.get(loner).expect("loner present");

    assert_close(values.closeness, 0.0);
    assert_close(values.eigenvector, 0.0);
    assert_close(values.eccentricity, 0.0);
    assert_eq!(snapshot.metrics().radius, 1);
    assert_eq!(snapshot.metrics().diameter, 2);
}

#[rstest]
fn vertices_added_after_compute_have_no_entry() {
    let mut graph = path_graph(3);
    let snapshot = ExactCentrality.compute(&graph);
    let late = graph.add_vertex("late");
    assert!(snapshot.get(late).is_none());
    assert_eq!(snapshot.len(), 3);
}

#[rstest]
fn shortest_paths_mark_unreachable_vertices() {
    let mut graph = path_graph(4);
    let loner = graph.add_vertex("loner");
    let distances = ExactCentrality.shortest_paths_from(&graph, VertexId::new(0));

    assert_eq!(distances.get(VertexId::new(3)), Some(3));
    assert_eq!(distances.get(loner), None);
    assert_eq!(distances.reachable().count(), 4);
}

#[rstest]
fn shortest_paths_from_unknown_source_reach_nothing() {
    let graph = path_graph(3);
    let distances = ExactCentrality.shortest_paths_from(&graph, VertexId::new(42));
    assert_eq!(distances.reachable().count(), 0);
}

#[rstest]
fn empty_graph_yields_empty_snapshot() {
    let snapshot = ExactCentrality.compute(&crate::Graph::new());
    assert!(snapshot.is_empty());
}
