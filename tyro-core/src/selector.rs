//! Extremal selection over scored candidates.

use crate::graph::VertexId;

/// Rule applied when a candidate's score equals the best seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The most recently examined candidate wins (`>=`).
    #[default]
    LastWins,
    /// The first candidate with the best score is kept (`>`).
    FirstWins,
}

impl TieBreak {
    const fn prefers(self, score: f64, best: f64) -> bool {
        match self {
            Self::LastWins => score >= best,
            Self::FirstWins => score > best,
        }
    }
}

/// Returns the candidate maximising `score`, or `None` when no candidate has
/// a score.
///
/// A `None` or NaN score disqualifies the candidate. Ties are resolved by
/// `tie_break` in the iteration order of `candidates`.
///
/// # Examples
/// ```
/// use tyro_core::{TieBreak, VertexId, select_extremal};
///
/// let candidates = (0..3).map(VertexId::new);
/// let flat = |_: VertexId| Some(1.0);
/// assert_eq!(select_extremal(candidates.clone(), flat, TieBreak::LastWins), Some(VertexId::new(2)));
/// assert_eq!(select_extremal(candidates, flat, TieBreak::FirstWins), Some(VertexId::new(0)));
/// ```
pub fn select_extremal<I, F>(candidates: I, mut score: F, tie_break: TieBreak) -> Option<VertexId>
where
    I: IntoIterator<Item = VertexId>,
    F: FnMut(VertexId) -> Option<f64>,
{
    let mut best: Option<(VertexId, f64)> = None;
    for candidate in candidates {
        let Some(value) = score(candidate).filter(|value| !value.is_nan()) else {
            continue;
        };
        let replace = match best {
            None => true,
            Some((_, current)) => tie_break.prefers(value, current),
        };
        if replace {
            best = Some((candidate, value));
        }
    }
    best.map(|(vertex, _)| vertex)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn scores(values: &'static [Option<f64>]) -> impl Fn(VertexId) -> Option<f64> {
        move |vertex| values.get(vertex.index()).copied().flatten()
    }

    #[rstest]
    #[case::last_wins(TieBreak::LastWins, Some(3))]
    #[case::first_wins(TieBreak::FirstWins, Some(1))]
    fn ties_follow_policy(#[case] tie_break: TieBreak, #[case] expected: Option<usize>) {
        let values: &'static [Option<f64>] = &[Some(0.5), Some(2.0), Some(1.0), Some(2.0)];
        let picked = select_extremal((0..4).map(VertexId::new), scores(values), tie_break);
        assert_eq!(picked, expected.map(VertexId::new));
    }

    #[rstest]
    #[case::last_wins(TieBreak::LastWins)]
    #[case::first_wins(TieBreak::FirstWins)]
    fn missing_and_nan_scores_are_disqualified(#[case] tie_break: TieBreak) {
        let values: &'static [Option<f64>] = &[None, Some(f64::NAN), Some(-1.0), None];
        let picked = select_extremal((0..4).map(VertexId::new), scores(values), tie_break);
        assert_eq!(picked, Some(VertexId::new(2)));
    }

    #[rstest]
    fn no_candidates_selects_nothing() {
        let picked = select_extremal(std::iter::empty(), |_| Some(1.0), TieBreak::LastWins);
        assert_eq!(picked, None);
        let unscored = select_extremal((0..3).map(VertexId::new), |_| None, TieBreak::FirstWins);
        assert_eq!(unscored, None);
    }

    #[rstest]
    fn order_of_iteration_decides_ties() {
        let reversed = (0..4).rev().map(VertexId::new);
        let picked = select_extremal(reversed, |_| Some(0.0), TieBreak::LastWins);
        assert_eq!(picked, Some(VertexId::new(0)));
    }
}
