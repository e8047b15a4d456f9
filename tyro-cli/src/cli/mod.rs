//! Command-line interface for running newcomer attachment strategies.
//!
//! `tyro run` loads a graph from an edge list or a synthetic generator and
//! runs one or more strategies against it, printing before/after metrics.

mod commands;

pub use commands::{
    BarabasiAlbertArgs, Cli, CliError, Command, EdgesArgs, ErdosRenyiArgs, GraphSourceArgs,
    MetricName, RunCommand, RunSummary, StrategyName, WattsStrogatzArgs, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
