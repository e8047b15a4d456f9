//! Uniform random graphs.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::debug;
use tyro_core::{Graph, GraphError, GraphSource, GraphSourceError};

use crate::errors::{SyntheticError, check_probability, check_vertices};

/// Parameters for [`ErdosRenyi`].
#[derive(Clone, Debug, PartialEq)]
pub struct ErdosRenyiConfig {
    /// Vertices drawn before isolated ones are removed.
    pub vertices: usize,
    /// Probability of wiring each pair.
    pub wiring_probability: f64,
    /// RNG seed.
    pub seed: u64,
}

/// `G(n, p)` generator that drops vertices left without edges.
///
/// Surviving vertices keep their original index as label, so the graph may
/// hold fewer than `vertices` vertices. Loading fails with
/// [`GraphSourceError::EmptyGraph`] when no pair was wired.
#[derive(Clone, Debug)]
pub struct ErdosRenyi {
    config: ErdosRenyiConfig,
    name: String,
}

impl ErdosRenyi {
    /// Validates `config`.
    ///
    /// # Errors
    /// Returns [`SyntheticError::TooFewVertices`] below two vertices and
    /// [`SyntheticError::InvalidProbability`] for a wiring probability
    /// outside `[0, 1]`.
    pub fn new(config: ErdosRenyiConfig) -> Result<Self, SyntheticError> {
        check_vertices(2, config.vertices)?;
        check_probability("wiring_probability", config.wiring_probability)?;
        let name = format!("erdos-renyi-{}", config.vertices);
        Ok(Self { config, name })
    }

    /// Returns the validated parameters.
    #[must_use]
    pub fn config(&self) -> &ErdosRenyiConfig {
        &self.config
    }

    fn generate(&self) -> Result<Graph, GraphError> {
        let n = self.config.vertices;
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let mut pairs = Vec::new();
        let mut wired = vec![false; n];
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen_bool(self.config.wiring_probability) {
                    pairs.push((i, j));
                    wired[i] = true;
                    wired[j] = true;
                }
            }
        }

        let mut graph = Graph::with_capacity(n);
        let mut ids = vec![None; n];
        for (index, slot) in ids.iter_mut().enumerate() {
            if wired[index] {
                *slot = Some(graph.add_vertex(index.to_string()));
            }
        }
        debug!(
            drawn = n,
            isolated = n - graph.vertex_count(),
            "isolated vertices removed"
        );
        for (i, j) in pairs {
            if let (Some(a), Some(b)) = (ids[i], ids[j]) {
                graph.add_edge(a, b)?;
            }
        }
        Ok(graph)
    }
}

impl GraphSource for ErdosRenyi {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_graph(&self) -> Result<Graph, GraphSourceError> {
        let graph = self.generate()?;
        if graph.is_empty() {
            return Err(GraphSourceError::EmptyGraph);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use tyro_core::VertexId;

    use super::*;

    #[test]
    fn no_wiring_yields_empty_source() {
        let source = ErdosRenyi::new(ErdosRenyiConfig {
            vertices: 10,
            wiring_probability: 0.0,
            seed: 1,
        })
        .expect("parameters are valid");
        assert_eq!(source.load_graph(), Err(GraphSourceError::EmptyGraph));
    }

    #[test]
    fn full_wiring_yields_complete_graph() {
        let graph = ErdosRenyi::new(ErdosRenyiConfig {
            vertices: 6,
            wiring_probability: 1.0,
            seed: 1,
        })
        .expect("parameters are valid")
        .load_graph()
        .expect("complete graph is not empty");
        assert_eq!(graph.edge_count(), 15);
        assert!(graph.vertices().all(|v| graph.degree(v) == 5));
        assert_eq!(graph.label(VertexId::new(5)), Some("5"));
    }
}
