//! Small helpers shared across CLI tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

use super::{CliError, EdgesArgs, GraphSourceArgs, MetricName, RunCommand, StrategyName};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_edge_list(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// `run` with default knobs over `source`.
pub(super) fn run_over(source: GraphSourceArgs, strategies: &[StrategyName]) -> RunCommand {
    RunCommand {
        strategies: strategies.to_vec(),
        edge_budget: 2,
        metric: MetricName::Betweenness,
        recompute_every_round: false,
        export: false,
        seed: Some(5),
        strict_resolution: false,
        source,
    }
}

pub(super) fn edges(path: PathBuf) -> GraphSourceArgs {
    GraphSourceArgs::Edges(EdgesArgs { path, name: None })
}

pub(super) fn expect_error<T: std::fmt::Debug>(result: Result<T, CliError>, context: &str) -> CliError {
    match result {
        Ok(value) => panic!("{context}: unexpected success {value:?}"),
        Err(err) => err,
    }
}
