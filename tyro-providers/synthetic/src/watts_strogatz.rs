//! Small-world graphs.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tyro_core::{Graph, GraphError, GraphSource, GraphSourceError, VertexId};

use crate::errors::{SyntheticError, check_probability, check_vertices};

/// Parameters for [`WattsStrogatz`].
#[derive(Clone, Debug, PartialEq)]
pub struct WattsStrogatzConfig {
    /// Vertices on the ring.
    pub vertices: usize,
    /// Lattice degree before rewiring; even.
    pub base_degree: usize,
    /// Probability of rewiring each lattice edge.
    pub rewire_probability: f64,
    /// RNG seed.
    pub seed: u64,
}

/// Watts–Strogatz generator.
///
/// Builds a ring lattice where each vertex links to its `base_degree / 2`
/// successors, then moves the far end of each lattice edge, with
/// `rewire_probability`, to a uniformly drawn vertex that is neither the
/// near end nor already adjacent to it.
#[derive(Clone, Debug)]
pub struct WattsStrogatz {
    config: WattsStrogatzConfig,
    name: String,
}

impl WattsStrogatz {
    /// Validates `config`.
    ///
    /// # Errors
    /// Returns [`SyntheticError::TooFewVertices`] below three vertices,
    /// [`SyntheticError::InvalidBaseDegree`] for an odd, zero or too large
    /// degree and [`SyntheticError::InvalidProbability`] for a rewiring
    /// probability outside `[0, 1]`.
    pub fn new(config: WattsStrogatzConfig) -> Result<Self, SyntheticError> {
        check_vertices(3, config.vertices)?;
        let degree = config.base_degree;
        if degree == 0 || degree % 2 != 0 || degree >= config.vertices {
            return Err(SyntheticError::InvalidBaseDegree {
                degree,
                vertices: config.vertices,
            });
        }
        check_probability("rewire_probability", config.rewire_probability)?;
        let name = format!("watts-strogatz-{}", config.vertices);
        Ok(Self { config, name })
    }

    /// Returns the validated parameters.
    #[must_use]
    pub fn config(&self) -> &WattsStrogatzConfig {
        &self.config
    }

    fn generate(&self) -> Result<Graph, GraphError> {
        let n = self.config.vertices;
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let lattice: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (1..=self.config.base_degree / 2).map(move |j| (i, (i + j) % n)))
            .collect();
        let mut edges: BTreeSet<(usize, usize)> =
            lattice.iter().map(|&(a, b)| ordered(a, b)).collect();
        let mut degree = vec![self.config.base_degree; n];

        for (near, far) in lattice {
            if !rng.gen_bool(self.config.rewire_probability) {
                continue;
            }
            // Near end already touches everything else.
            if degree[near] + 1 >= n {
                continue;
            }
            let replacement = loop {
                let candidate = rng.gen_range(0..n);
                if candidate != near && !edges.contains(&ordered(near, candidate)) {
                    break candidate;
                }
            };
            edges.remove(&ordered(near, far));
            degree[far] -= 1;
            edges.insert(ordered(near, replacement));
            degree[replacement] += 1;
        }

        let mut graph = Graph::with_capacity(n);
        for index in 0..n {
            graph.add_vertex(index.to_string());
        }
        for (a, b) in edges {
            graph.add_edge(VertexId::new(a), VertexId::new(b))?;
        }
        Ok(graph)
    }
}

const fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

impl GraphSource for WattsStrogatz {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_graph(&self) -> Result<Graph, GraphSourceError> {
        Ok(self.generate()?)
    }
}
