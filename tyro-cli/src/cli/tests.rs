//! Unit tests for argument parsing, graph loading and summary rendering.

use std::path::Path;

use clap::Parser;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tyro_core::{StrategyError, StrategyKind, TyroError, VertexId};
use tyro_providers_edgelist::EdgeListError;
use tyro_providers_synthetic::SyntheticError;
use tyro_test_support::tracing::RecordingLayer;

use super::commands::{derive_graph_source_name, run_command, selected_strategies};
use super::test_helpers::{edges, expect_error, run_over, temp_dir, write_edge_list};
use super::{
    Cli, CliError, Command, GraphSourceArgs, MetricName, StrategyName, WattsStrogatzArgs,
    render_summary, run_cli,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const PATH_OF_FIVE: &str = "# path\n0 1\n1 2\n2 3\n3 4\n";

#[rstest]
#[case::override_name("/tmp/facebook.txt", Some("override"), "override")]
#[case::stem_with_extension("/tmp/facebook_combined.txt", None, "facebook_combined")]
#[case::stem_without_extension("/tmp/karate", None, "karate")]
#[case::missing_stem("", None, "edges")]
fn derive_graph_source_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    assert_eq!(
        derive_graph_source_name(Path::new(raw_path), override_name),
        expected
    );
}

#[rstest]
fn no_strategy_flag_selects_every_strategy() {
    assert_eq!(selected_strategies(&[]), StrategyKind::ALL);
}

#[rstest]
fn repeated_strategies_run_once_in_given_order() {
    let kinds = selected_strategies(&[
        StrategyName::Random,
        StrategyName::Global,
        StrategyName::Random,
    ]);
    assert_eq!(kinds, [StrategyKind::Random, StrategyKind::Global]);
}

#[rstest]
fn parses_run_with_generator() -> TestResult {
    let cli = Cli::try_parse_from([
        "tyro",
        "run",
        "--strategy",
        "broker-express",
        "--strategy",
        "centre-periphery",
        "--edge-budget",
        "4",
        "--metric",
        "eigenvector",
        "--strict-resolution",
        "watts-strogatz",
        "--vertices",
        "20",
        "--base-degree",
        "4",
    ])?;
    let Command::Run(run) = cli.command;
    assert_eq!(
        run.strategies,
        [StrategyName::BrokerExpress, StrategyName::CentrePeriphery]
    );
    assert_eq!(run.edge_budget, 4);
    assert_eq!(run.metric, MetricName::Eigenvector);
    assert!(run.strict_resolution);
    assert!(!run.export);
    match run.source {
        GraphSourceArgs::WattsStrogatz(WattsStrogatzArgs {
            vertices,
            base_degree,
            rewire_probability,
            ..
        }) => {
            assert_eq!((vertices, base_degree), (20, 4));
            assert!((rewire_probability - 0.5).abs() < f64::EPSILON);
        }
        other => panic!("unexpected source: {other:?}"),
    }
    Ok(())
}

#[rstest]
fn rejects_unknown_strategy_names() {
    let err = Cli::try_parse_from(["tyro", "run", "--strategy", "hybrid", "edges", "g.txt"])
        .expect_err("hybrid is not a strategy");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[rstest]
fn run_edges_success() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "path.txt", PATH_OF_FIVE)?;
    let summary = run_command(run_over(edges(path), &[StrategyName::CentrePeriphery]))?;

    assert_eq!(summary.graph_source, "path");
    assert_eq!(summary.reports.len(), 1);
    let report = &summary.reports[0];
    assert_eq!(report.strategy, StrategyKind::CentrePeriphery);
    assert_eq!(report.targets, [VertexId::new(2), VertexId::new(0)]);
    Ok(())
}

#[rstest]
fn run_every_strategy_against_one_graph() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "path.txt", PATH_OF_FIVE)?;
    let summary = run_cli(Cli {
        command: Command::Run(run_over(edges(path), &[])),
    })?;

    let kinds: Vec<_> = summary.reports.iter().map(|report| report.strategy).collect();
    assert_eq!(kinds, StrategyKind::ALL);
    for report in &summary.reports {
        assert!(report.targets.len() <= 2, "{} overspent", report.strategy);
        assert_eq!(report.baseline.diameter, 4);
    }
    Ok(())
}

#[rstest]
fn run_reports_missing_file() {
    let dir = temp_dir();
    let path = dir.path().join("absent.txt");
    let err = expect_error(
        run_command(run_over(edges(path.clone()), &[StrategyName::Global])),
        "missing file",
    );
    match err {
        CliError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn run_reports_malformed_edge_list() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "broken.txt", "0 1\nlonely\n")?;
    let err = expect_error(
        run_command(run_over(edges(path), &[StrategyName::Global])),
        "malformed edge list",
    );
    assert!(matches!(
        err,
        CliError::EdgeList(EdgeListError::Malformed { line: 2, .. })
    ));
    Ok(())
}

#[rstest]
fn run_rejects_zero_edge_budget() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "path.txt", PATH_OF_FIVE)?;
    let mut command = run_over(edges(path), &[StrategyName::Global]);
    command.edge_budget = 0;
    let err = expect_error(run_command(command), "zero budget");
    assert!(matches!(
        err,
        CliError::Core(TyroError::InvalidEdgeBudget { got: 0 })
    ));
    Ok(())
}

#[rstest]
fn run_rejects_invalid_generator_parameters() {
    let source = GraphSourceArgs::WattsStrogatz(WattsStrogatzArgs {
        vertices: 10,
        base_degree: 3,
        rewire_probability: 0.1,
        seed: 1,
    });
    let err = expect_error(
        run_command(run_over(source, &[StrategyName::Local])),
        "odd base degree",
    );
    assert!(matches!(
        err,
        CliError::Synthetic(SyntheticError::InvalidBaseDegree { degree: 3, vertices: 10 })
    ));
}

#[rstest]
fn strict_resolution_surfaces_strategy_failure() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "pair.txt", "a b\nb c\n")?;
    let mut command = run_over(edges(path), &[StrategyName::Community]);
    command.edge_budget = 10;
    command.strict_resolution = true;
    let err = expect_error(run_command(command), "unreachable community count");
    assert!(matches!(
        err,
        CliError::Core(TyroError::Strategy {
            strategy: "community",
            error: StrategyError::ResolutionNotConverged { target: 11, .. },
        })
    ));
    Ok(())
}

#[rstest]
fn run_records_cli_tracing() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "path.txt", PATH_OF_FIVE)?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let command = run_over(edges(path), &[StrategyName::Global, StrategyName::Local]);

    tracing::subscriber::with_default(subscriber, || run_command(command))?;

    let span = layer.span("cli.execute").expect("cli.execute span must exist");
    assert_eq!(span.field("source"), Some("edges"));
    assert_eq!(span.field("edge_budget"), Some("2"));
    assert_eq!(span.field("strategies"), Some("2"));
    assert_eq!(
        layer
            .spans()
            .iter()
            .filter(|span| span.name == "core.run")
            .count(),
        2
    );
    let completed = layer
        .event("command completed")
        .expect("completion event must exist");
    assert_eq!(completed.level, Level::INFO);
    assert_eq!(completed.field("graph_source"), Some("path"));
    assert_eq!(completed.field("runs"), Some("2"));
    Ok(())
}

#[rstest]
fn render_summary_lists_each_strategy() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "path.txt", PATH_OF_FIVE)?;
    let summary = run_command(run_over(
        edges(path),
        &[StrategyName::CentrePeriphery, StrategyName::Community],
    ))?;

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;

    assert!(text.starts_with("graph source: path\n"));
    assert!(text.contains("strategy: centre-periphery\ntargets (2): v2 v0\n"));
    assert!(text.contains("baseline: average_path_length=2.0000 diameter=4 radius=2\n"));
    assert!(text.contains("strategy: community\n"));
    assert!(text.contains("resolution: "));
    assert_eq!(text.matches("newcomer: ").count(), 2);
    Ok(())
}
