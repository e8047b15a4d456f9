use thiserror::Error;

/// Errors raised when validating generator parameters.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum SyntheticError {
    /// The generator needs more vertices.
    #[error("at least {minimum} vertices are required (got {got})")]
    TooFewVertices {
        /// Smallest accepted vertex count.
        minimum: usize,
        /// Requested vertex count.
        got: usize,
    },
    /// Barabási–Albert needs at least one link per step.
    #[error("links per step must be greater than zero")]
    ZeroLinks,
    /// Watts–Strogatz base degree must be even, positive and below the
    /// vertex count.
    #[error("base degree {degree} must be even, positive and below {vertices}")]
    InvalidBaseDegree {
        /// Requested base degree.
        degree: usize,
        /// Requested vertex count.
        vertices: usize,
    },
    /// A probability fell outside `[0, 1]`.
    #[error("{name} must lie in [0, 1] (got {value})")]
    InvalidProbability {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), SyntheticError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SyntheticError::InvalidProbability { name, value })
    }
}

pub(crate) fn check_vertices(minimum: usize, got: usize) -> Result<(), SyntheticError> {
    if got < minimum {
        return Err(SyntheticError::TooFewVertices { minimum, got });
    }
    Ok(())
}
