use thiserror::Error;

/// Errors raised while reading an edge list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EdgeListError {
    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A data line did not name two endpoints.
    #[error("line {line}: expected two endpoints but found `{content}`")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// Offending line with surrounding whitespace removed.
        content: String,
    },
    /// The input contained no edges.
    #[error("edge list contains no edges")]
    Empty,
}
