//! Undirected graph store used by the attachment engine.
//!
//! Vertices receive dense identifiers in insertion order and neighbour lists
//! keep insertion order too. Every traversal in the crate iterates in that
//! order, which is what makes the tie-break policies reproducible.

use std::fmt;

use crate::error::GraphError;

/// Dense identifier of a vertex within a [`Graph`].
///
/// # Examples
/// ```
/// use tyro_core::VertexId;
///
/// let id = VertexId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    /// Creates an identifier from a dense index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the dense index backing the identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Simple, loop-free, undirected graph with labelled vertices.
///
/// # Examples
/// ```
/// use tyro_core::Graph;
///
/// let mut graph = Graph::new();
/// let a = graph.add_vertex("a");
/// let b = graph.add_vertex("b");
/// graph.add_edge(a, b)?;
/// assert_eq!(graph.degree(a), 1);
/// assert_eq!(graph.neighbors(b), &[a]);
/// assert!(graph.add_edge(b, a).is_err());
/// # Ok::<(), tyro_core::GraphError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    labels: Vec<String>,
    adjacency: Vec<Vec<VertexId>>,
    edge_count: usize,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `vertices` vertices.
    #[must_use]
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            labels: Vec::with_capacity(vertices),
            adjacency: Vec::with_capacity(vertices),
            edge_count: 0,
        }
    }

    /// Adds an isolated vertex and returns its identifier.
    pub fn add_vertex(&mut self, label: impl Into<String>) -> VertexId {
        let id = VertexId::new(self.adjacency.len());
        self.labels.push(label.into());
        self.adjacency.push(Vec::new());
        id
    }

    /// Adds the undirected edge `left -- right`.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when either endpoint is missing,
    /// [`GraphError::SelfLoop`] when both endpoints are equal, and
    /// [`GraphError::DuplicateEdge`] when the edge already exists.
    pub fn add_edge(&mut self, left: VertexId, right: VertexId) -> Result<(), GraphError> {
        self.ensure_contains(left)?;
        self.ensure_contains(right)?;
        if left == right {
            return Err(GraphError::SelfLoop { vertex: left });
        }
        if self.contains_edge(left, right) {
            return Err(GraphError::DuplicateEdge { left, right });
        }
        self.adjacency[left.index()].push(right);
        self.adjacency[right.index()].push(left);
        self.edge_count += 1;
        Ok(())
    }

    /// Returns whether `left -- right` is an edge of the graph.
    #[must_use]
    pub fn contains_edge(&self, left: VertexId, right: VertexId) -> bool {
        let (probe, needle) = if self.degree(left) <= self.degree(right) {
            (left, right)
        } else {
            (right, left)
        };
        self.neighbors(probe).contains(&needle)
    }

    /// Returns whether `vertex` belongs to the graph.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        vertex.index() < self.adjacency.len()
    }

    /// Returns the neighbours of `vertex` in insertion order.
    ///
    /// Unknown vertices have no neighbours.
    #[must_use]
    pub fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        self.adjacency
            .get(vertex.index())
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the number of edges incident to `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.neighbors(vertex).len()
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterates over all vertices in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexId> + use<> {
        (0..self.adjacency.len()).map(VertexId::new)
    }

    /// Returns the label attached to `vertex`.
    #[must_use]
    pub fn label(&self, vertex: VertexId) -> Option<&str> {
        self.labels.get(vertex.index()).map(String::as_str)
    }

    fn ensure_contains(&self, vertex: VertexId) -> Result<(), GraphError> {
        if self.contains(vertex) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex { vertex })
        }
    }
}
