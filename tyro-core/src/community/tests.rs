//! Unit tests for partitions and the Louvain oracle.

use rstest::rstest;

use super::{CommunityId, CommunityOracle, Louvain, NonContiguousCommunityIds, Partition};
use crate::graph::VertexId;
use crate::test_utils::{disjoint_cliques, path_graph, ring_of_cliques};

fn ids(values: &[usize]) -> Vec<CommunityId> {
    values.iter().copied().map(CommunityId::new).collect()
}

#[rstest]
#[case::missing_zero(&[1, 2, 2], NonContiguousCommunityIds::MissingZero)]
#[case::gap(&[0, 2, 0], NonContiguousCommunityIds::Gap)]
fn partition_rejects_non_contiguous_ids(
    #[case] values: &[usize],
    #[case] expected: NonContiguousCommunityIds,
) {
    assert_eq!(Partition::try_from_assignments(ids(values)), Err(expected));
}

#[rstest]
fn partition_orders_by_size_then_id() {
    let partition =
        Partition::try_from_assignments(ids(&[0, 1, 2, 1, 2, 3, 3, 3])).expect("ids are valid");
    assert_eq!(partition.community_count(), 4);
    assert_eq!(partition.sizes(), [1, 2, 2, 3]);
    assert_eq!(partition.by_descending_size(), ids(&[3, 1, 2, 0]));
    assert_eq!(
        partition.members(CommunityId::new(2)).collect::<Vec<_>>(),
        [VertexId::new(2), VertexId::new(4)]
    );
}

#[rstest]
fn empty_partition_has_no_communities() {
    let partition = Partition::try_from_assignments(Vec::new()).expect("empty is valid");
    assert_eq!(partition.community_count(), 0);
    assert!(partition.by_descending_size().is_empty());
}

#[rstest]
#[case::zero(0.0)]
#[case::negative(-1.0)]
#[case::nan(f64::NAN)]
#[case::infinite(f64::INFINITY)]
fn degenerate_resolutions_have_no_partition(#[case] resolution: f64) {
    let graph = path_graph(4);
    assert!(Louvain::default().partition(&graph, resolution).is_none());
}

#[rstest]
#[case(0.5)]
#[case(1.0)]
#[case(4.0)]
fn disjoint_cliques_never_merge(#[case] resolution: f64) {
    let graph = disjoint_cliques(3, 4);
    let partition = Louvain::default()
        .partition(&graph, resolution)
        .expect("resolution is valid");

    assert_eq!(partition.community_count(), 3);
    for clique in 0..3 {
        let first = partition.community_of(VertexId::new(clique * 4));
        for member in 1..4 {
            assert_eq!(partition.community_of(VertexId::new(clique * 4 + member)), first);
        }
    }
}

#[rstest]
fn isolated_vertex_keeps_its_own_community() {
    let mut graph = disjoint_cliques(2, 3);
    let loner = graph.add_vertex("loner");
    let partition = Louvain::default()
        .partition(&graph, 1.0)
        .expect("resolution is valid");
    assert_eq!(partition.community_count(), 3);
    let loner_community = partition.community_of(loner).expect("loner is assigned");
    assert_eq!(partition.members(loner_community).count(), 1);
}

#[rstest]
fn higher_resolution_yields_fewer_communities() {
    let graph = ring_of_cliques(6, 5);
    let oracle = Louvain::default();
    let count = |resolution: f64| {
        oracle
            .partition(&graph, resolution)
            .expect("resolution is valid")
            .community_count()
    };

    let fine = count(0.05);
    let standard = count(1.0);
    let coarse = count(20.0);

    assert_eq!(fine, graph.vertex_count());
    assert!(standard < fine);
    assert!(coarse < fine);
    assert!(coarse <= standard);
}

#[rstest]
fn partition_is_deterministic() {
    let graph = ring_of_cliques(5, 4);
    let oracle = Louvain::default();
    let first = oracle.partition(&graph, 1.0).expect("resolution is valid");
    let second = oracle.partition(&graph, 1.0).expect("resolution is valid");
    assert_eq!(first, second);
    assert!(first.modularity() > 0.0);
}
