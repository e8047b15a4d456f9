//! Multi-level modularity optimisation with a resolution parameter.
//!
//! The gain of moving vertex `i` into community `D` is
//! `resolution * k_i,D - k_i * tot_D / 2m`, so larger resolutions favour
//! merging and produce fewer communities. Every loop walks vertices and
//! neighbours in index order and a vertex only moves on a strictly larger
//! gain, which makes the result deterministic.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use super::{CommunityId, CommunityOracle, Partition};
use crate::graph::Graph;

const MIN_RESOLUTION: f64 = 1e-9;

/// Deterministic Louvain community detection.
///
/// Returns `None` for non-finite resolutions and for resolutions close to zero,
/// where every vertex would form its own community.
///
/// # Examples
/// ```
/// use tyro_core::{CommunityOracle, Graph, Louvain};
///
/// let mut graph = Graph::new();
/// let ids: Vec<_> = (0..6).map(|i| graph.add_vertex(i.to_string())).collect();
/// for (a, b) in [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)] {
///     graph.add_edge(ids[a], ids[b])?;
/// }
///
/// let partition = Louvain::default().partition(&graph, 1.0).expect("resolution is valid");
/// assert_eq!(partition.community_count(), 2);
/// assert!(Louvain::default().partition(&graph, 0.0).is_none());
/// # Ok::<(), tyro_core::GraphError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Louvain {
    max_passes: usize,
    max_levels: usize,
}

impl Default for Louvain {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Louvain {
    /// Oracle with 64 local-moving sweeps per level and 32 levels.
    pub const DEFAULT: Self = Self::new(64, 32);

    /// Creates an oracle bounded to `max_passes` local-moving sweeps per level
    /// and `max_levels` aggregation levels. Zero values are raised to one.
    #[must_use]
    pub const fn new(max_passes: usize, max_levels: usize) -> Self {
        Self {
            max_passes: if max_passes == 0 { 1 } else { max_passes },
            max_levels: if max_levels == 0 { 1 } else { max_levels },
        }
    }
}

impl CommunityOracle for Louvain {
    #[instrument(
        name = "core.louvain",
        skip_all,
        fields(vertices = graph.vertex_count(), resolution = resolution),
    )]
    fn partition(&self, graph: &Graph, resolution: f64) -> Option<Partition> {
        if !resolution.is_finite() || resolution < MIN_RESOLUTION {
            debug!(resolution, "partition undefined for degenerate resolution");
            return None;
        }

        let mut level = WeightedGraph::from_graph(graph);
        let mut membership: Vec<usize> = (0..graph.vertex_count()).collect();

        for _ in 0..self.max_levels {
            let Some(communities) = level.local_moving(resolution, self.max_passes) else {
                break;
            };
            let (renumbered, count) = renumber(&communities);
            for slot in &mut membership {
                *slot = renumbered[*slot];
            }
            level = level.aggregate(&renumbered, count);
        }

        let (assignments, _) = renumber(&membership);
        let modularity = modularity(graph, &assignments, resolution);
        let ids = assignments.into_iter().map(CommunityId::new).collect();
        Partition::try_from_assignments(ids)
            .ok()
            .map(|partition| partition.with_modularity(modularity))
    }
}

/// Relabels community ids contiguously in order of first appearance.
fn renumber(communities: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: BTreeMap<usize, usize> = BTreeMap::new();
    let relabelled = communities
        .iter()
        .map(|community| {
            let next = mapping.len();
            *mapping.entry(*community).or_insert(next)
        })
        .collect();
    (relabelled, mapping.len())
}

fn modularity(graph: &Graph, assignments: &[usize], resolution: f64) -> f64 {
    let edges = graph.edge_count() as f64;
    if edges == 0.0 {
        return 0.0;
    }
    let count = assignments.iter().copied().max().map_or(0, |max| max + 1);
    let mut internal = vec![0.0; count];
    let mut degree = vec![0.0; count];
    for vertex in graph.vertices() {
        let community = assignments[vertex.index()];
        degree[community] += graph.degree(vertex) as f64;
        for neighbour in graph.neighbors(vertex) {
            if assignments[neighbour.index()] == community {
                internal[community] += 0.5;
            }
        }
    }
    internal
        .iter()
        .zip(&degree)
        .map(|(links, total)| resolution * links / edges - (total / (2.0 * edges)).powi(2))
        .sum()
}

/// Weighted graph used between aggregation levels. Edge weights are stored on
/// both endpoints; `self_loops` carries the internal weight of merged nodes.
#[derive(Debug, Clone)]
struct WeightedGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
}

impl WeightedGraph {
    fn from_graph(graph: &Graph) -> Self {
        let adjacency = graph
            .vertices()
            .map(|vertex| {
                graph
                    .neighbors(vertex)
                    .iter()
                    .map(|neighbour| (neighbour.index(), 1.0))
                    .collect()
            })
            .collect();
        Self {
            adjacency,
            self_loops: vec![0.0; graph.vertex_count()],
        }
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn strength(&self, node: usize) -> f64 {
        self.adjacency[node].iter().map(|(_, weight)| weight).sum::<f64>()
            + 2.0 * self.self_loops[node]
    }

    /// Moves nodes between neighbouring communities until no move improves
    /// the gain. Returns `None` when nothing moved.
    fn local_moving(&self, resolution: f64, max_passes: usize) -> Option<Vec<usize>> {
        let nodes = self.node_count();
        let strengths: Vec<f64> = (0..nodes).map(|node| self.strength(node)).collect();
        let total: f64 = strengths.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let mut community: Vec<usize> = (0..nodes).collect();
        let mut totals = strengths.clone();
        let mut links_to = vec![0.0; nodes];
        let mut touched: Vec<usize> = Vec::new();
        let mut moved_any = false;

        for _ in 0..max_passes {
            let mut moved = false;
            for node in 0..nodes {
                let current = community[node];
                let strength = strengths[node];

                for &(neighbour, weight) in &self.adjacency[node] {
                    if neighbour == node {
                        continue;
                    }
                    let target = community[neighbour];
                    if links_to[target] == 0.0 && !touched.contains(&target) {
                        touched.push(target);
                    }
                    links_to[target] += weight;
                }

                totals[current] -= strength;
                let gain = |target: usize| {
                    resolution * links_to[target] - strength * totals[target] / total
                };

                let mut best = current;
                let mut best_gain = gain(current);
                for &target in &touched {
                    let candidate = gain(target);
                    if candidate > best_gain {
                        best = target;
                        best_gain = candidate;
                    }
                }

                totals[best] += strength;
                community[node] = best;
                if best != current {
                    moved = true;
                    moved_any = true;
                }

                for &target in &touched {
                    links_to[target] = 0.0;
                }
                touched.clear();
            }
            if !moved {
                break;
            }
        }

        moved_any.then_some(community)
    }

    fn aggregate(&self, communities: &[usize], count: usize) -> Self {
        let mut links: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); count];
        let mut self_loops = vec![0.0; count];
        for (node, edges) in self.adjacency.iter().enumerate() {
            let source = communities[node];
            self_loops[source] += self.self_loops[node];
            for &(neighbour, weight) in edges {
                let target = communities[neighbour];
                if target == source {
                    self_loops[source] += weight / 2.0;
                } else {
                    *links[source].entry(target).or_insert(0.0) += weight;
                }
            }
        }
        Self {
            adjacency: links
                .into_iter()
                .map(|edges| edges.into_iter().collect())
                .collect(),
            self_loops,
        }
    }
}
