//! Benchmark support crate for Tyro.
//!
//! Provides graph fixtures and parameter types used by the Criterion
//! benchmarks for strategy runs and the centrality and community oracles.

pub mod error;
pub mod fixtures;
pub mod params;
