//! Adaptive search for a community-detection resolution.
//!
//! [`ResolutionSearch`] is a pure state machine: [`ResolutionSearch::advance`]
//! takes the community count observed at the current resolution and returns
//! the next state. [`search_resolution`] drives it against an oracle under
//! [`SearchLimits`].

use tracing::{debug, warn};

use crate::{community::Partition, error::StrategyError};

/// Direction of the most recent resolution change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No comparison has been made yet.
    Starting,
    /// The last step raised the resolution to reduce the community count.
    Increasing,
    /// The last step lowered the resolution to raise the community count.
    Decreasing,
}

/// Result of feeding one observation to a [`ResolutionSearch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// The observed count equals the target.
    Converged,
    /// Query the oracle again with the returned state.
    Next(ResolutionSearch),
}

/// Resolution, step size and direction of the search.
///
/// # Examples
/// ```
/// use tyro_core::{ResolutionSearch, SearchState, Transition};
///
/// let start = ResolutionSearch::new();
/// let Transition::Next(next) = start.advance(Some(8), 3) else {
///     unreachable!("count differs from target");
/// };
/// assert_eq!(next.state, SearchState::Increasing);
/// assert_eq!(next.resolution, 1.5);
/// assert_eq!(start.advance(Some(3), 3), Transition::Converged);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionSearch {
    /// Direction of the previous step.
    pub state: SearchState,
    /// Resolution to query next.
    pub resolution: f64,
    /// Magnitude of the next step.
    pub increment: f64,
}

impl Default for ResolutionSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionSearch {
    /// Initial state: resolution `1.0`, increment `0.5`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SearchState::Starting,
            resolution: 1.0,
            increment: 0.5,
        }
    }

    /// Applies one observation.
    ///
    /// `None` means the oracle had no partition at this resolution, which is
    /// treated as too many communities without changing direction. A reversal
    /// of direction halves the increment.
    #[must_use]
    pub fn advance(self, observed: Option<usize>, target: usize) -> Transition {
        let Some(count) = observed else {
            return Transition::Next(Self {
                state: self.state,
                resolution: self.resolution + self.increment,
                increment: self.increment / 2.0,
            });
        };

        if count == target {
            return Transition::Converged;
        }

        let next = if count > target {
            let increment = if self.state == SearchState::Decreasing {
                self.increment / 2.0
            } else {
                self.increment
            };
            Self {
                state: SearchState::Increasing,
                resolution: self.resolution + increment,
                increment,
            }
        } else {
            let increment = if self.state == SearchState::Increasing {
                self.increment / 2.0
            } else {
                self.increment
            };
            Self {
                state: SearchState::Decreasing,
                resolution: self.resolution - increment,
                increment,
            }
        };
        Transition::Next(next)
    }
}

/// Behaviour when the search stops without hitting the target count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonConvergence {
    /// Use the partition whose count was closest to the target.
    #[default]
    BestEffort,
    /// Fail with [`StrategyError::ResolutionNotConverged`].
    Fail,
}

/// Cut-offs for [`search_resolution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    /// Maximum number of oracle calls.
    pub max_iterations: usize,
    /// The search stops once the increment drops below this value.
    pub min_increment: f64,
    /// What to do when a cut-off is hit.
    pub on_non_convergence: NonConvergence,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_iterations: 64,
            min_increment: 1e-6,
            on_non_convergence: NonConvergence::BestEffort,
        }
    }
}

/// How the resolution search ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    /// The target count was reached.
    Exact {
        /// Resolution that produced the target count.
        resolution: f64,
        /// Oracle calls performed.
        iterations: usize,
    },
    /// A cut-off was hit and the closest partition was used.
    BestEffort {
        /// Resolution that produced the closest count.
        resolution: f64,
        /// Community count of the closest partition.
        communities: usize,
        /// Community count that was sought.
        target: usize,
        /// Oracle calls performed.
        iterations: usize,
    },
}

impl SearchOutcome {
    /// Resolution of the partition that was used.
    #[must_use]
    pub const fn resolution(&self) -> f64 {
        match self {
            Self::Exact { resolution, .. } | Self::BestEffort { resolution, .. } => *resolution,
        }
    }

    /// Returns whether the target count was reached.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact { .. })
    }
}

/// Partition chosen by [`search_resolution`] and how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Partition used for target selection.
    pub partition: Partition,
    /// How the search ended.
    pub outcome: SearchOutcome,
}

/// Searches for a resolution at which `partition_at` yields `target`
/// communities.
///
/// # Errors
/// Returns [`StrategyError::NoPartition`] when the oracle never produced a
/// partition, and [`StrategyError::ResolutionNotConverged`] when a cut-off is
/// hit under [`NonConvergence::Fail`].
pub fn search_resolution<F>(
    mut partition_at: F,
    target: usize,
    limits: SearchLimits,
) -> Result<SearchResult, StrategyError>
where
    F: FnMut(f64) -> Option<Partition>,
{
    let mut search = ResolutionSearch::new();
    let mut closest: Option<(usize, f64, Partition)> = None;
    let mut iterations = 0;

    while iterations < limits.max_iterations {
        iterations += 1;
        let observed = partition_at(search.resolution);
        let count = observed.as_ref().map(Partition::community_count);
        debug!(
            iteration = iterations,
            resolution = search.resolution,
            increment = search.increment,
            communities = ?count,
            target,
            "resolution probed"
        );

        let transition = search.advance(count, target);
        if let Some(partition) = observed {
            if transition == Transition::Converged {
                return Ok(SearchResult {
                    partition,
                    outcome: SearchOutcome::Exact {
                        resolution: search.resolution,
                        iterations,
                    },
                });
            }
            let distance = partition.community_count().abs_diff(target);
            if closest.as_ref().is_none_or(|(best, _, _)| distance < *best) {
                closest = Some((distance, search.resolution, partition));
            }
        }

        match transition {
            Transition::Converged => break,
            Transition::Next(next) => search = next,
        }
        if search.increment < limits.min_increment {
            break;
        }
    }

    let Some((_, resolution, partition)) = closest else {
        return Err(StrategyError::NoPartition {
            attempts: iterations,
        });
    };
    let communities = partition.community_count();
    match limits.on_non_convergence {
        NonConvergence::Fail => Err(StrategyError::ResolutionNotConverged {
            target,
            closest: communities,
            resolution,
        }),
        NonConvergence::BestEffort => {
            warn!(
                target,
                communities,
                resolution,
                iterations,
                "resolution search stopped early; using closest partition"
            );
            Ok(SearchResult {
                partition,
                outcome: SearchOutcome::BestEffort {
                    resolution,
                    communities,
                    target,
                    iterations,
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rstest::rstest;

    use super::*;
    use crate::community::{CommunityId, CommunityOracle, Louvain};
    use crate::test_utils::{disjoint_cliques, path_graph};

    /// Partition with `count` singleton communities.
    fn partition_of(count: usize) -> Partition {
        Partition::try_from_assignments((0..count).map(CommunityId::new).collect())
            .expect("ids are contiguous")
    }

    /// Count falls as `8 / resolution`, undefined at non-positive values.
    fn inverse_oracle(resolution: f64) -> Option<Partition> {
        if resolution <= 0.0 {
            return None;
        }
        let count = (8.0 / resolution).round().max(1.0);
        Some(partition_of(count as usize))
    }

    #[rstest]
    fn too_many_communities_raises_resolution() {
        let Transition::Next(next) = ResolutionSearch::new().advance(Some(10), 3) else {
            panic!("expected another step");
        };
        assert_eq!(next.state, SearchState::Increasing);
        assert_eq!(next.resolution, 1.5);
        assert_eq!(next.increment, 0.5);
    }

    #[rstest]
    fn too_few_communities_lowers_resolution() {
        let Transition::Next(next) = ResolutionSearch::new().advance(Some(1), 3) else {
            panic!("expected another step");
        };
        assert_eq!(next.state, SearchState::Decreasing);
        assert_eq!(next.resolution, 0.5);
        assert_eq!(next.increment, 0.5);
    }

    #[rstest]
    #[case::increasing_to_decreasing(SearchState::Increasing, 1, 1.75)]
    #[case::decreasing_to_increasing(SearchState::Decreasing, 10, 2.25)]
    fn reversal_halves_increment(
        #[case] state: SearchState,
        #[case] observed: usize,
        #[case] expected: f64,
    ) {
        let search = ResolutionSearch {
            state,
            resolution: 2.0,
            increment: 0.5,
        };
        let Transition::Next(next) = search.advance(Some(observed), 3) else {
            panic!("expected another step");
        };
        assert_eq!(next.increment, 0.25);
        assert_eq!(next.resolution, expected);
    }

    #[rstest]
    #[case::starting(SearchState::Starting)]
    #[case::decreasing(SearchState::Decreasing)]
    fn undefined_partition_steps_up_without_changing_state(#[case] state: SearchState) {
        let search = ResolutionSearch {
            state,
            resolution: 0.0,
            increment: 0.5,
        };
        let Transition::Next(next) = search.advance(None, 3) else {
            panic!("expected another step");
        };
        assert_eq!(next.state, state);
        assert_eq!(next.resolution, 0.5);
        assert_eq!(next.increment, 0.25);
    }

    #[rstest]
    fn reachable_target_converges_exactly() {
        let result = search_resolution(inverse_oracle, 3, SearchLimits::default())
            .expect("target is reachable");
        assert_eq!(result.partition.community_count(), 3);
        assert!(result.outcome.is_exact());
        let resolution = result.outcome.resolution();
        assert!(resolution > 0.0 && resolution <= 5.0);
    }

    #[rstest]
    fn louvain_reaches_clique_count_immediately() {
        let graph = disjoint_cliques(3, 4);
        let result = search_resolution(
            |resolution| Louvain::default().partition(&graph, resolution),
            3,
            SearchLimits::default(),
        )
        .expect("three cliques give three communities");
        assert_eq!(
            result.outcome,
            SearchOutcome::Exact {
                resolution: 1.0,
                iterations: 1
            }
        );
    }

    #[rstest]
    fn unreachable_target_stops_at_cutoff_with_closest_partition() {
        let graph = path_graph(5);
        let calls = Cell::new(0_usize);
        let limits = SearchLimits::default();
        let result = search_resolution(
            |resolution| {
                calls.set(calls.get() + 1);
                Louvain::default().partition(&graph, resolution)
            },
            100,
            limits,
        )
        .expect("best effort accepts the closest partition");

        assert!(calls.get() <= limits.max_iterations);
        let SearchOutcome::BestEffort {
            communities,
            target,
            ..
        } = result.outcome
        else {
            panic!("target above vertex count cannot converge");
        };
        assert_eq!(target, 100);
        assert!(communities <= graph.vertex_count());
        assert_eq!(result.partition.community_count(), communities);
    }

    #[rstest]
    fn unreachable_target_fails_when_requested() {
        let limits = SearchLimits {
            max_iterations: 10,
            on_non_convergence: NonConvergence::Fail,
            ..SearchLimits::default()
        };
        let error = search_resolution(|_| Some(partition_of(4)), 3, limits)
            .expect_err("count never changes");
        assert_eq!(
            error,
            StrategyError::ResolutionNotConverged {
                target: 3,
                closest: 4,
                resolution: 1.0,
            }
        );
    }

    #[rstest]
    fn oracle_without_partitions_reports_attempts() {
        let limits = SearchLimits {
            max_iterations: 5,
            min_increment: 0.0,
            ..SearchLimits::default()
        };
        let error = search_resolution(|_| None, 3, limits).expect_err("nothing to choose");
        assert_eq!(error, StrategyError::NoPartition { attempts: 5 });
    }

    #[rstest]
    fn closest_count_keeps_earliest_on_ties() {
        let counts = [5_usize, 1, 5, 1];
        let calls = Cell::new(0_usize);
        let limits = SearchLimits {
            max_iterations: counts.len(),
            min_increment: 0.0,
            ..SearchLimits::default()
        };
        let result = search_resolution(
            |_| {
                let index = calls.get();
                calls.set(index + 1);
                counts.get(index).map(|count| partition_of(*count))
            },
            3,
            limits,
        )
        .expect("best effort");
        assert_eq!(result.partition.community_count(), 5);
        assert_eq!(result.outcome.resolution(), 1.0);
    }
}
