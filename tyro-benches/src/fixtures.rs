//! Seeded graphs shared by the benchmarks.

use tyro_core::{Graph, GraphSource};
use tyro_providers_synthetic::{BarabasiAlbert, BarabasiAlbertConfig};

use crate::error::BenchSetupError;

/// Seed used for every generated graph.
pub const SEED: u64 = 42;

/// Links per step for the preferential-attachment fixtures.
pub const LINKS_PER_STEP: usize = 3;

/// Preferential-attachment source with `vertices` vertices.
///
/// # Errors
/// Returns [`BenchSetupError::Synthetic`] when `vertices` is below two.
///
/// # Examples
/// ```
/// use tyro_benches::fixtures::scale_free;
/// use tyro_core::GraphSource;
///
/// let source = scale_free(30).expect("valid size");
/// assert_eq!(source.load_graph().expect("graph").vertex_count(), 30);
/// ```
pub fn scale_free(vertices: usize) -> Result<BarabasiAlbert, BenchSetupError> {
    Ok(BarabasiAlbert::new(BarabasiAlbertConfig {
        vertices,
        max_links_per_step: LINKS_PER_STEP,
        exact_links: true,
        seed: SEED,
    })?)
}

/// Loads the graph from [`scale_free`].
///
/// # Errors
/// See [`scale_free`].
pub fn scale_free_graph(vertices: usize) -> Result<Graph, BenchSetupError> {
    Ok(scale_free(vertices)?.load_graph()?)
}
