//! Benchmark parameter types rendered as Criterion benchmark ids.

use std::fmt;

use tyro_core::StrategyKind;

/// Parameters for one strategy run benchmark.
#[derive(Clone, Copy, Debug)]
pub struct StrategyBenchParams {
    /// Strategy under test.
    pub strategy: StrategyKind,
    /// Vertices in the host graph.
    pub vertices: usize,
    /// Newcomer edge budget.
    pub edge_budget: usize,
}

impl fmt::Display for StrategyBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/n={},k={}",
            self.strategy, self.vertices, self.edge_budget
        )
    }
}

/// Parameters for an oracle benchmark.
#[derive(Clone, Copy, Debug)]
pub struct OracleBenchParams {
    /// Vertices in the graph.
    pub vertices: usize,
}

impl fmt::Display for OracleBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(StrategyKind::BrokerExpress, 200, 3, "broker-express/n=200,k=3")]
    #[case(StrategyKind::Global, 50, 1, "global/n=50,k=1")]
    fn strategy_params_render_as_ids(
        #[case] strategy: StrategyKind,
        #[case] vertices: usize,
        #[case] edge_budget: usize,
        #[case] expected: &str,
    ) {
        let params = StrategyBenchParams {
            strategy,
            vertices,
            edge_budget,
        };
        assert_eq!(params.to_string(), expected);
    }

    #[rstest]
    fn oracle_params_render_as_ids() {
        assert_eq!(OracleBenchParams { vertices: 10 }.to_string(), "n=10");
    }
}
