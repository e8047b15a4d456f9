//! Community partitions and the oracle that produces them.
//!
//! Provides [`Partition`], which validates that community identifiers are
//! contiguous from zero, and the [`CommunityOracle`] seam used by the
//! community attachment strategy.

mod louvain;

#[cfg(test)]
mod tests;

pub use self::louvain::Louvain;

use std::collections::HashSet;

use thiserror::Error;

use crate::graph::{Graph, VertexId};

/// Identifier assigned to a community.
///
/// # Examples
/// ```
/// use tyro_core::CommunityId;
///
/// let id = CommunityId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommunityId(usize);

impl CommunityId {
    /// Creates a new community identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

/// Error returned when community identifiers are not contiguous from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NonContiguousCommunityIds {
    /// The assignments do not include community `0`.
    #[error("community identifiers must include 0")]
    MissingZero,
    /// The assignments skip identifiers.
    #[error("community identifiers must be contiguous without gaps")]
    Gap,
}

/// Assignment of every vertex to a community.
///
/// # Examples
/// ```
/// use tyro_core::{CommunityId, Partition, VertexId};
///
/// let partition = Partition::try_from_assignments(vec![
///     CommunityId::new(0),
///     CommunityId::new(1),
///     CommunityId::new(1),
/// ])?;
/// assert_eq!(partition.community_count(), 2);
/// assert_eq!(partition.community_of(VertexId::new(2)), Some(CommunityId::new(1)));
/// assert_eq!(partition.by_descending_size(), [CommunityId::new(1), CommunityId::new(0)]);
/// # Ok::<(), tyro_core::NonContiguousCommunityIds>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    assignments: Vec<CommunityId>,
    community_count: usize,
    modularity: f64,
}

impl Partition {
    /// Attempts to build a partition from per-vertex assignments indexed by
    /// [`VertexId::index`].
    ///
    /// An empty `assignments` vector is accepted and yields
    /// `community_count == 0`.
    ///
    /// # Errors
    /// Returns [`NonContiguousCommunityIds::MissingZero`] when community `0`
    /// is absent and [`NonContiguousCommunityIds::Gap`] when identifiers skip
    /// values.
    pub fn try_from_assignments(
        assignments: Vec<CommunityId>,
    ) -> Result<Self, NonContiguousCommunityIds> {
        if assignments.is_empty() {
            return Ok(Self {
                assignments,
                community_count: 0,
                modularity: 0.0,
            });
        }

        let seen: HashSet<usize> = assignments.iter().map(|id| id.get()).collect();
        if !seen.contains(&0) {
            return Err(NonContiguousCommunityIds::MissingZero);
        }
        let max_id = seen.iter().copied().max().unwrap_or(0);
        if seen.len() != max_id + 1 {
            return Err(NonContiguousCommunityIds::Gap);
        }

        Ok(Self {
            assignments,
            community_count: seen.len(),
            modularity: 0.0,
        })
    }

    /// Attaches the modularity score the oracle achieved.
    #[must_use]
    pub fn with_modularity(mut self, modularity: f64) -> Self {
        self.modularity = modularity;
        self
    }

    /// Returns the modularity score recorded by the oracle.
    #[must_use]
    pub fn modularity(&self) -> f64 {
        self.modularity
    }

    /// Returns the community of `vertex`.
    #[must_use]
    pub fn community_of(&self, vertex: VertexId) -> Option<CommunityId> {
        self.assignments.get(vertex.index()).copied()
    }

    /// Returns the number of distinct communities.
    #[must_use]
    pub fn community_count(&self) -> usize {
        self.community_count
    }

    /// Returns the member count of every community, indexed by id.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.community_count];
        for id in &self.assignments {
            sizes[id.get()] += 1;
        }
        sizes
    }

    /// Returns community ids ordered by descending size, ties by ascending id.
    #[must_use]
    pub fn by_descending_size(&self) -> Vec<CommunityId> {
        let sizes = self.sizes();
        let mut order: Vec<CommunityId> = (0..self.community_count).map(CommunityId::new).collect();
        order.sort_by(|left, right| sizes[right.get()].cmp(&sizes[left.get()]));
        order
    }

    /// Iterates over the members of `community` in ascending vertex order.
    pub fn members(&self, community: CommunityId) -> impl Iterator<Item = VertexId> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(move |(_, id)| **id == community)
            .map(|(index, _)| VertexId::new(index))
    }
}

/// Partitions a graph into communities at a given resolution.
///
/// Higher resolutions yield fewer, larger communities. Implementations return
/// `None` when the resolution is degenerate and no partition is defined.
pub trait CommunityOracle {
    /// Partitions `graph` at `resolution`.
    fn partition(&self, graph: &Graph, resolution: f64) -> Option<Partition>;
}
