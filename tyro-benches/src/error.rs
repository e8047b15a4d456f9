//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use tyro_core::{GraphSourceError, TyroError};
use tyro_providers_synthetic::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Generator parameters were rejected.
    #[error("synthetic graph configuration failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Loading the generated graph failed.
    #[error("graph generation failed: {0}")]
    GraphSource(#[from] GraphSourceError),
    /// Runner configuration failed.
    #[error("runner configuration failed: {0}")]
    Core(#[from] TyroError),
}
