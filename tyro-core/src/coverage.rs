//! Coverage bookkeeping and bounded neighbourhood expansion.
//!
//! A [`CoverageSet`] holds the vertices the newcomer has not yet served.
//! Strategies remove a chosen target together with its bounded neighbourhood,
//! computed by [`expand`] or [`expand_avoiding`], so later rounds favour
//! structurally distant vertices.

use std::collections::BTreeSet;

use crate::graph::{Graph, VertexId};

/// Ordered set of vertices not yet served by the newcomer.
///
/// Iteration is in ascending [`VertexId`] order, which fixes the traversal
/// order seen by tie-breaking selectors.
///
/// # Examples
/// ```
/// use tyro_core::{CoverageSet, Graph};
///
/// let mut graph = Graph::new();
/// let a = graph.add_vertex("a");
/// let b = graph.add_vertex("b");
/// let newcomer = graph.add_vertex("newcomer");
///
/// let mut coverage = CoverageSet::initialize(&graph, newcomer);
/// assert_eq!(coverage.len(), 2);
/// coverage.remove(a);
/// assert!(coverage.contains(b));
/// assert!(!coverage.contains(a));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageSet {
    uncovered: BTreeSet<VertexId>,
}

impl CoverageSet {
    /// Returns every vertex of `graph` except `exclude`.
    #[must_use]
    pub fn initialize(graph: &Graph, exclude: VertexId) -> Self {
        Self {
            uncovered: graph.vertices().filter(|&vertex| vertex != exclude).collect(),
        }
    }

    /// Returns an empty set, for strategies that grow their pool.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds `vertex` to the set.
    pub fn insert(&mut self, vertex: VertexId) -> bool {
        self.uncovered.insert(vertex)
    }

    /// Removes `vertex`, returning whether it was present.
    pub fn remove(&mut self, vertex: VertexId) -> bool {
        self.uncovered.remove(&vertex)
    }

    /// Removes every vertex yielded by `vertices`.
    pub fn remove_all<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = VertexId>,
    {
        for vertex in vertices {
            self.uncovered.remove(&vertex);
        }
    }

    /// Returns whether `vertex` is still uncovered.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.uncovered.contains(&vertex)
    }

    /// Iterates over the uncovered vertices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.uncovered.iter().copied()
    }

    /// Returns the number of uncovered vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.uncovered.len()
    }

    /// Returns whether every vertex has been covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uncovered.is_empty()
    }
}

impl Extend<VertexId> for CoverageSet {
    fn extend<T: IntoIterator<Item = VertexId>>(&mut self, iter: T) {
        self.uncovered.extend(iter);
    }
}

/// Returns the vertices within `depth` hops of `root`, excluding `root`.
///
/// The traversal is level-synchronous: each hop processes the whole frontier
/// before advancing, and every vertex is visited at most once. A depth of zero
/// or an unknown root yields the empty set.
///
/// # Examples
/// ```
/// use tyro_core::{Graph, VertexId, expand};
///
/// let mut graph = Graph::new();
/// let ids: Vec<_> = (0..4).map(|i| graph.add_vertex(i.to_string())).collect();
/// for pair in ids.windows(2) {
///     graph.add_edge(pair[0], pair[1])?;
/// }
///
/// assert!(expand(&graph, ids[0], 0).is_empty());
/// assert_eq!(expand(&graph, ids[0], 2), [ids[1], ids[2]].into_iter().collect());
/// # Ok::<(), tyro_core::GraphError>(())
/// ```
#[must_use]
pub fn expand(graph: &Graph, root: VertexId, depth: usize) -> BTreeSet<VertexId> {
    neighbourhood(graph, root, depth, None)
}

/// Like [`expand`] but never enters `barrier`, so vertices only reachable
/// through it are left out.
#[must_use]
pub fn expand_avoiding(
    graph: &Graph,
    root: VertexId,
    depth: usize,
    barrier: VertexId,
) -> BTreeSet<VertexId> {
    neighbourhood(graph, root, depth, Some(barrier))
}

fn neighbourhood(
    graph: &Graph,
    root: VertexId,
    depth: usize,
    barrier: Option<VertexId>,
) -> BTreeSet<VertexId> {
    let mut reached = BTreeSet::new();
    if depth == 0 || !graph.contains(root) {
        return reached;
    }

    let mut visited = vec![false; graph.vertex_count()];
    visited[root.index()] = true;
    if let Some(blocked) = barrier.filter(|blocked| graph.contains(*blocked)) {
        visited[blocked.index()] = true;
    }

    let mut frontier = vec![root];
    for _ in 0..depth {
        let mut next = Vec::new();
        for &current in &frontier {
            for &neighbour in graph.neighbors(current) {
                if !visited[neighbour.index()] {
                    visited[neighbour.index()] = true;
                    reached.insert(neighbour);
                    next.push(neighbour);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    reached
}
