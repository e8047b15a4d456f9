//! Preferential-attachment graphs.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tyro_core::{Graph, GraphError, GraphSource, GraphSourceError, VertexId};

use crate::errors::{SyntheticError, check_vertices};

/// Parameters for [`BarabasiAlbert`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarabasiAlbertConfig {
    /// Vertices in the generated graph.
    pub vertices: usize,
    /// Upper bound on the links each new vertex brings.
    pub max_links_per_step: usize,
    /// Give every new vertex exactly `max_links_per_step` links (capped by
    /// the vertices present) instead of a uniform draw from `1..=max`.
    pub exact_links: bool,
    /// RNG seed.
    pub seed: u64,
}

/// Barabási–Albert generator.
///
/// Starts from a single vertex; every later vertex links to distinct
/// existing vertices drawn with probability proportional to their degree.
///
/// # Examples
///
/// ```
/// use tyro_core::GraphSource;
/// use tyro_providers_synthetic::{BarabasiAlbert, BarabasiAlbertConfig};
///
/// let source = BarabasiAlbert::new(BarabasiAlbertConfig {
///     vertices: 50,
///     max_links_per_step: 3,
///     exact_links: false,
///     seed: 7,
/// })?;
/// let graph = source.load_graph()?;
/// assert_eq!(graph.vertex_count(), 50);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct BarabasiAlbert {
    config: BarabasiAlbertConfig,
    name: String,
}

impl BarabasiAlbert {
    /// Validates `config`.
    ///
    /// # Errors
    /// Returns [`SyntheticError::TooFewVertices`] below two vertices and
    /// [`SyntheticError::ZeroLinks`] when `max_links_per_step` is zero.
    pub fn new(config: BarabasiAlbertConfig) -> Result<Self, SyntheticError> {
        check_vertices(2, config.vertices)?;
        if config.max_links_per_step == 0 {
            return Err(SyntheticError::ZeroLinks);
        }
        let name = format!("barabasi-albert-{}", config.vertices);
        Ok(Self { config, name })
    }

    /// Returns the validated parameters.
    #[must_use]
    pub fn config(&self) -> &BarabasiAlbertConfig {
        &self.config
    }

    fn generate(&self) -> Result<Graph, GraphError> {
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let mut graph = Graph::with_capacity(self.config.vertices);
        graph.add_vertex("0");
        for step in 1..self.config.vertices {
            let links = if self.config.exact_links {
                self.config.max_links_per_step
            } else {
                rng.gen_range(1..=self.config.max_links_per_step)
            };
            let targets = preferential_targets(&graph, links.min(step), &mut rng);
            let vertex = graph.add_vertex(step.to_string());
            for target in targets {
                graph.add_edge(vertex, target)?;
            }
        }
        Ok(graph)
    }
}

/// Draws `count` distinct vertices weighted by degree, isolated ones
/// counting as degree one.
fn preferential_targets(graph: &Graph, count: usize, rng: &mut SmallRng) -> Vec<VertexId> {
    let mut weights: Vec<usize> = graph.vertices().map(|v| graph.degree(v).max(1)).collect();
    let mut total: usize = weights.iter().sum();
    let mut chosen = Vec::with_capacity(count);
    while chosen.len() < count && total > 0 {
        let mut ticket = rng.gen_range(0..total);
        for (index, weight) in weights.iter_mut().enumerate() {
            if ticket < *weight {
                chosen.push(VertexId::new(index));
                total -= *weight;
                *weight = 0;
                break;
            }
            ticket -= *weight;
        }
    }
    chosen
}

impl GraphSource for BarabasiAlbert {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_graph(&self) -> Result<Graph, GraphSourceError> {
        Ok(self.generate()?)
    }
}
