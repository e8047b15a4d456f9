//! Exact centrality computation for unweighted, undirected graphs.
//!
//! Betweenness follows Brandes' accumulation over one breadth-first pass per
//! source. The passes are grouped into fixed-size chunks that may run in
//! parallel; chunk results are merged in chunk order so floating-point sums
//! are identical with or without the `parallel` feature.

use std::collections::VecDeque;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use super::{CentralityOracle, CentralitySnapshot, Distances, GraphMetrics, VertexCentrality};
use crate::graph::{Graph, VertexId};

const SOURCE_CHUNK: usize = 64;
const EIGENVECTOR_MAX_ITERATIONS: usize = 100;
const EIGENVECTOR_TOLERANCE: f64 = 1e-9;

/// Deterministic oracle computing exact centralities by breadth-first search.
///
/// # Examples
/// ```
/// use tyro_core::{CentralityOracle, ExactCentrality, Graph};
///
/// let mut graph = Graph::new();
/// let ids: Vec<_> = (0..3).map(|i| graph.add_vertex(i.to_string())).collect();
/// graph.add_edge(ids[0], ids[1])?;
/// graph.add_edge(ids[1], ids[2])?;
///
/// let snapshot = ExactCentrality::default().compute(&graph);
/// let middle = snapshot.get(ids[1]).expect("vertex is covered");
/// assert_eq!(middle.betweenness, 1.0);
/// assert_eq!(snapshot.metrics().radius, 1);
/// assert_eq!(snapshot.metrics().diameter, 2);
/// # Ok::<(), tyro_core::GraphError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactCentrality;

impl CentralityOracle for ExactCentrality {
    #[instrument(
        name = "core.centrality",
        skip_all,
        fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
    )]
    fn compute(&self, graph: &Graph) -> CentralitySnapshot {
        let vertex_count = graph.vertex_count();
        if vertex_count == 0 {
            return CentralitySnapshot::default();
        }

        let passes = run_source_passes(graph);
        let eigenvector = eigenvector_centrality(graph);
        let scale = betweenness_scale(vertex_count);

        let vertices = (0..vertex_count)
            .map(|index| {
                let closeness = if passes.distance_sum[index] == 0 {
                    0.0
                } else {
                    passes.reachable[index] as f64 / passes.distance_sum[index] as f64
                };
                VertexCentrality {
                    betweenness: passes.betweenness[index] * scale,
                    closeness,
                    eccentricity: passes.eccentricity[index] as f64,
                    eigenvector: eigenvector[index],
                }
            })
            .collect();

        CentralitySnapshot::new(vertices, graph_metrics(&passes))
    }

    fn shortest_paths_from(&self, graph: &Graph, source: VertexId) -> Distances {
        let mut hops = vec![None; graph.vertex_count()];
        if !graph.contains(source) {
            return Distances::new(hops);
        }
        hops[source.index()] = Some(0);
        let mut queue = VecDeque::from([source]);
        while let Some(current) = queue.pop_front() {
            let next = hops[current.index()].map_or(0, |value| value + 1);
            for &neighbour in graph.neighbors(current) {
                if hops[neighbour.index()].is_none() {
                    hops[neighbour.index()] = Some(next);
                    queue.push_back(neighbour);
                }
            }
        }
        Distances::new(hops)
    }
}

/// Brandes counts each unordered pair twice on undirected graphs; the scale
/// also divides by the number of pairs excluding the vertex itself.
fn betweenness_scale(vertex_count: usize) -> f64 {
    if vertex_count <= 2 {
        return 0.0;
    }
    let pairs = (vertex_count - 1) * (vertex_count - 2);
    1.0 / pairs as f64
}

#[derive(Debug, Clone)]
struct SourcePasses {
    betweenness: Vec<f64>,
    eccentricity: Vec<usize>,
    distance_sum: Vec<usize>,
    reachable: Vec<usize>,
}

impl SourcePasses {
    fn zeroed(vertex_count: usize) -> Self {
        Self {
            betweenness: vec![0.0; vertex_count],
            eccentricity: vec![0; vertex_count],
            distance_sum: vec![0; vertex_count],
            reachable: vec![0; vertex_count],
        }
    }

    fn merge(&mut self, other: &Self) {
        for (total, value) in self.betweenness.iter_mut().zip(&other.betweenness) {
            *total += value;
        }
        for (total, value) in self.eccentricity.iter_mut().zip(&other.eccentricity) {
            *total = (*total).max(*value);
        }
        for (total, value) in self.distance_sum.iter_mut().zip(&other.distance_sum) {
            *total += value;
        }
        for (total, value) in self.reachable.iter_mut().zip(&other.reachable) {
            *total += value;
        }
    }
}

fn run_source_passes(graph: &Graph) -> SourcePasses {
    let sources: Vec<usize> = (0..graph.vertex_count()).collect();

    #[cfg(feature = "parallel")]
    let chunks: Vec<SourcePasses> = sources
        .par_chunks(SOURCE_CHUNK)
        .map(|chunk| run_chunk(graph, chunk))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let chunks: Vec<SourcePasses> = sources
        .chunks(SOURCE_CHUNK)
        .map(|chunk| run_chunk(graph, chunk))
        .collect();

    let mut total = SourcePasses::zeroed(graph.vertex_count());
    for chunk in &chunks {
        total.merge(chunk);
    }
    total
}

fn run_chunk(graph: &Graph, sources: &[usize]) -> SourcePasses {
    let vertex_count = graph.vertex_count();
    let mut passes = SourcePasses::zeroed(vertex_count);
    let mut scratch = BrandesScratch::new(vertex_count);
    for &source in sources {
        scratch.run(graph, source, &mut passes);
    }
    passes
}

/// Buffers reused across the single-source passes of one chunk.
struct BrandesScratch {
    stack: Vec<usize>,
    predecessors: Vec<Vec<usize>>,
    sigma: Vec<f64>,
    distance: Vec<Option<usize>>,
    delta: Vec<f64>,
    queue: VecDeque<usize>,
}

impl BrandesScratch {
    fn new(vertex_count: usize) -> Self {
        Self {
            stack: Vec::with_capacity(vertex_count),
            predecessors: vec![Vec::new(); vertex_count],
            sigma: vec![0.0; vertex_count],
            distance: vec![None; vertex_count],
            delta: vec![0.0; vertex_count],
            queue: VecDeque::with_capacity(vertex_count),
        }
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.queue.clear();
        self.predecessors.iter_mut().for_each(Vec::clear);
        self.sigma.fill(0.0);
        self.distance.fill(None);
        self.delta.fill(0.0);
    }

    fn run(&mut self, graph: &Graph, source: usize, passes: &mut SourcePasses) {
        self.reset();
        self.sigma[source] = 1.0;
        self.distance[source] = Some(0);
        self.queue.push_back(source);

        let mut eccentricity = 0;
        let mut distance_sum = 0;
        let mut reachable = 0;

        while let Some(current) = self.queue.pop_front() {
            self.stack.push(current);
            let current_distance = self.distance[current].unwrap_or(0);
            if current != source {
                eccentricity = eccentricity.max(current_distance);
                distance_sum += current_distance;
                reachable += 1;
            }
            for neighbour in graph.neighbors(VertexId::new(current)) {
                let next = neighbour.index();
                if self.distance[next].is_none() {
                    self.distance[next] = Some(current_distance + 1);
                    self.queue.push_back(next);
                }
                if self.distance[next] == Some(current_distance + 1) {
                    self.sigma[next] += self.sigma[current];
                    self.predecessors[next].push(current);
                }
            }
        }

        while let Some(vertex) = self.stack.pop() {
            for &predecessor in &self.predecessors[vertex] {
                if self.sigma[vertex] > 0.0 {
                    self.delta[predecessor] +=
                        (self.sigma[predecessor] / self.sigma[vertex]) * (1.0 + self.delta[vertex]);
                }
            }
            if vertex != source {
                passes.betweenness[vertex] += self.delta[vertex];
            }
        }

        passes.eccentricity[source] = eccentricity;
        passes.distance_sum[source] = distance_sum;
        passes.reachable[source] = reachable;
    }
}

fn graph_metrics(passes: &SourcePasses) -> GraphMetrics {
    let total_distance: usize = passes.distance_sum.iter().sum();
    let total_pairs: usize = passes.reachable.iter().sum();
    let average_path_length = if total_pairs == 0 {
        0.0
    } else {
        total_distance as f64 / total_pairs as f64
    };
    let diameter = passes.eccentricity.iter().copied().max().unwrap_or(0);
    let radius = passes
        .eccentricity
        .iter()
        .zip(&passes.reachable)
        .filter(|(_, reachable)| **reachable > 0)
        .map(|(eccentricity, _)| *eccentricity)
        .min()
        .unwrap_or(0);
    GraphMetrics {
        average_path_length,
        diameter,
        radius,
    }
}

/// Power iteration on `A + I`, which shares its dominant eigenvector with `A`
/// but does not oscillate on bipartite graphs. Isolated vertices score zero.
fn eigenvector_centrality(graph: &Graph) -> Vec<f64> {
    let vertex_count = graph.vertex_count();
    let mut current = vec![1.0; vertex_count];
    let mut next = vec![0.0; vertex_count];

    for _ in 0..EIGENVECTOR_MAX_ITERATIONS {
        for vertex in graph.vertices() {
            let index = vertex.index();
            next[index] = current[index]
                + graph
                    .neighbors(vertex)
                    .iter()
                    .map(|neighbour| current[neighbour.index()])
                    .sum::<f64>();
        }
        let max = next.iter().copied().fold(0.0_f64, f64::max);
        if max <= 0.0 {
            break;
        }
        let mut change = 0.0_f64;
        for (value, previous) in next.iter_mut().zip(&current) {
            *value /= max;
            change = change.max((*value - previous).abs());
        }
        std::mem::swap(&mut current, &mut next);
        if change < EIGENVECTOR_TOLERANCE {
            break;
        }
    }

    for vertex in graph.vertices() {
        if graph.degree(vertex) == 0 {
            current[vertex.index()] = 0.0;
        }
    }
    current
}
