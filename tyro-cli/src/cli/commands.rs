//! Command implementations and argument parsing for the `tyro` CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use tyro_core::{
    GraphMetrics, GraphSource, Metric, NonConvergence, RunReport, RunnerBuilder, SearchOutcome,
    StrategyKind, StrategyRunner, TyroError,
};
use tyro_providers_edgelist::{EdgeListError, EdgeListSource};
use tyro_providers_synthetic::{
    BarabasiAlbert, BarabasiAlbertConfig, ErdosRenyi, ErdosRenyiConfig, SyntheticError,
    WattsStrogatz, WattsStrogatzConfig,
};

const DEFAULT_EDGE_BUDGET: usize = 3;
const DEFAULT_SEED: u64 = 42;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "tyro",
    about = "Attach a newcomer to a graph and measure how it moves."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run attachment strategies against one graph.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Strategy to run; repeat to run several. Runs every strategy when omitted.
    #[arg(long = "strategy", value_enum)]
    pub strategies: Vec<StrategyName>,

    /// Maximum number of edges the newcomer may gain.
    #[arg(long = "edge-budget", default_value_t = DEFAULT_EDGE_BUDGET)]
    pub edge_budget: usize,

    /// Score used by the global strategy.
    #[arg(long, value_enum, default_value_t = MetricName::Betweenness)]
    pub metric: MetricName,

    /// Recompute centralities after every round.
    #[arg(long)]
    pub recompute_every_round: bool,

    /// Emit a structured log event per round.
    #[arg(long)]
    pub export: bool,

    /// Seed for the random strategy.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fail the community strategy instead of accepting the closest partition.
    #[arg(long)]
    pub strict_resolution: bool,

    /// Graph to attach the newcomer to.
    #[command(subcommand)]
    pub source: GraphSourceArgs,
}

/// Graph sources supported by `run`.
#[derive(Debug, Subcommand, Clone)]
pub enum GraphSourceArgs {
    /// Read an edge list with one `source target` pair per line.
    Edges(EdgesArgs),
    /// Generate a preferential-attachment graph.
    BarabasiAlbert(BarabasiAlbertArgs),
    /// Generate a small-world graph.
    WattsStrogatz(WattsStrogatzArgs),
    /// Generate a uniform random graph without isolated vertices.
    ErdosRenyi(ErdosRenyiArgs),
}

impl GraphSourceArgs {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Edges(_) => "edges",
            Self::BarabasiAlbert(_) => "barabasi-albert",
            Self::WattsStrogatz(_) => "watts-strogatz",
            Self::ErdosRenyi(_) => "erdos-renyi",
        }
    }
}

/// Edge-list arguments.
#[derive(Debug, Args, Clone)]
pub struct EdgesArgs {
    /// Path to the edge list.
    pub path: PathBuf,

    /// Override name for the graph source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Barabási–Albert arguments.
#[derive(Debug, Args, Clone)]
pub struct BarabasiAlbertArgs {
    /// Number of vertices.
    #[arg(long, default_value_t = 100)]
    pub vertices: usize,

    /// Upper bound on links per new vertex.
    #[arg(long = "max-links", default_value_t = 3)]
    pub max_links_per_step: usize,

    /// Give every new vertex exactly `--max-links` links.
    #[arg(long)]
    pub exact_links: bool,

    /// Generator seed.
    #[arg(long = "graph-seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Watts–Strogatz arguments.
#[derive(Debug, Args, Clone)]
pub struct WattsStrogatzArgs {
    /// Number of vertices.
    #[arg(long, default_value_t = 100)]
    pub vertices: usize,

    /// Even lattice degree before rewiring.
    #[arg(long = "base-degree", default_value_t = 2)]
    pub base_degree: usize,

    /// Probability of rewiring each lattice edge.
    #[arg(long = "rewire-probability", default_value_t = 0.5)]
    pub rewire_probability: f64,

    /// Generator seed.
    #[arg(long = "graph-seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Erdős–Rényi arguments.
#[derive(Debug, Args, Clone)]
pub struct ErdosRenyiArgs {
    /// Number of vertices drawn before isolated ones are removed.
    #[arg(long, default_value_t = 100)]
    pub vertices: usize,

    /// Probability of wiring each pair.
    #[arg(long = "wiring-probability", default_value_t = 0.05)]
    pub wiring_probability: f64,

    /// Generator seed.
    #[arg(long = "graph-seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Strategy names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyName {
    /// Greedy on a single metric.
    Global,
    /// Walk outward from the best-connected hub.
    Local,
    /// Greedy on a composite brokerage score.
    BrokerConnect,
    /// Pairs of far-apart vertices.
    BrokerExpress,
    /// Centre first, then the periphery.
    CentrePeriphery,
    /// One representative per community.
    Community,
    /// Uniformly random vertices.
    Random,
}

impl From<StrategyName> for StrategyKind {
    fn from(name: StrategyName) -> Self {
        match name {
            StrategyName::Global => Self::Global,
            StrategyName::Local => Self::Local,
            StrategyName::BrokerConnect => Self::BrokerConnect,
            StrategyName::BrokerExpress => Self::BrokerExpress,
            StrategyName::CentrePeriphery => Self::CentrePeriphery,
            StrategyName::Community => Self::Community,
            StrategyName::Random => Self::Random,
        }
    }
}

/// Metric names accepted by `--metric`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricName {
    /// Betweenness centrality.
    Betweenness,
    /// Closeness centrality.
    Closeness,
    /// Eccentricity.
    Eccentricity,
    /// Eigenvector centrality.
    Eigenvector,
}

impl From<MetricName> for Metric {
    fn from(name: MetricName) -> Self {
        match name {
            MetricName::Betweenness => Self::Betweenness,
            MetricName::Closeness => Self::Closeness,
            MetricName::Eccentricity => Self::Eccentricity,
            MetricName::Eigenvector => Self::Eigenvector,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening an input file failed.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Edge-list parsing failed.
    #[error(transparent)]
    EdgeList(#[from] EdgeListError),
    /// Generator parameters were rejected.
    #[error(transparent)]
    Synthetic(#[from] SyntheticError),
    /// Configuring or running a strategy failed.
    #[error(transparent)]
    Core(#[from] TyroError),
}

/// Outcome of one `run` invocation.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Name reported by the graph source.
    pub graph_source: String,
    /// One report per strategy, in the order they ran.
    pub reports: Vec<RunReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the graph or running a strategy fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use tyro_cli::cli::{Cli, Command, EdgesArgs, GraphSourceArgs, MetricName, RunCommand,
/// #     StrategyName, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "a b\nb c\nc d\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         strategies: vec![StrategyName::Global],
///         edge_budget: 1,
///         metric: MetricName::Betweenness,
///         recompute_every_round: false,
///         export: false,
///         seed: None,
///         strict_resolution: false,
///         source: GraphSourceArgs::Edges(EdgesArgs {
///             path: file.path().to_path_buf(),
///             name: Some("chain".into()),
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.graph_source, "chain");
/// assert_eq!(summary.reports[0].targets.len(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<RunSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(edge_budget = field::Empty, source = field::Empty, strategies = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<RunSummary, CliError> {
    let runner = build_runner(&command)?;
    let kinds = selected_strategies(&command.strategies);

    let span = Span::current();
    span.record("edge_budget", command.edge_budget);
    span.record("source", field::display(command.source.kind()));
    span.record("strategies", kinds.len());

    let source = open_source(command.source)?;
    let reports = kinds
        .into_iter()
        .map(|kind| runner.run(source.as_ref(), kind))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        graph_source = source.name(),
        runs = reports.len(),
        "command completed"
    );
    Ok(RunSummary {
        graph_source: source.name().to_owned(),
        reports,
    })
}

fn build_runner(command: &RunCommand) -> Result<StrategyRunner, CliError> {
    let mut builder = RunnerBuilder::new()
        .with_edge_budget(command.edge_budget)
        .with_metric(command.metric.into())
        .with_recompute_every_round(command.recompute_every_round)
        .with_export(command.export);
    if let Some(seed) = command.seed {
        builder = builder.with_seed(seed);
    }
    if command.strict_resolution {
        builder = builder.with_non_convergence(NonConvergence::Fail);
    }
    Ok(builder.build()?)
}

pub(super) fn selected_strategies(names: &[StrategyName]) -> Vec<StrategyKind> {
    if names.is_empty() {
        return StrategyKind::ALL.to_vec();
    }
    let mut kinds: Vec<StrategyKind> = Vec::with_capacity(names.len());
    for kind in names.iter().copied().map(StrategyKind::from) {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}

#[instrument(name = "cli.open_source", err, skip(args), fields(kind = args.kind()))]
pub(super) fn open_source(args: GraphSourceArgs) -> Result<Box<dyn GraphSource>, CliError> {
    Ok(match args {
        GraphSourceArgs::Edges(EdgesArgs { path, name }) => {
            let chosen = derive_graph_source_name(&path, name.as_deref());
            let reader = open_edge_list(&path)?;
            Box::new(EdgeListSource::try_from_reader(chosen, reader)?)
        }
        GraphSourceArgs::BarabasiAlbert(args) => {
            Box::new(BarabasiAlbert::new(BarabasiAlbertConfig {
                vertices: args.vertices,
                max_links_per_step: args.max_links_per_step,
                exact_links: args.exact_links,
                seed: args.seed,
            })?)
        }
        GraphSourceArgs::WattsStrogatz(args) => Box::new(WattsStrogatz::new(WattsStrogatzConfig {
            vertices: args.vertices,
            base_degree: args.base_degree,
            rewire_probability: args.rewire_probability,
            seed: args.seed,
        })?),
        GraphSourceArgs::ErdosRenyi(args) => Box::new(ErdosRenyi::new(ErdosRenyiConfig {
            vertices: args.vertices,
            wiring_probability: args.wiring_probability,
            seed: args.seed,
        })?),
    })
}

#[instrument(name = "cli.open_edge_list", err, fields(path = field::Empty))]
pub(super) fn open_edge_list(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_graph_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "edges".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` as one block per strategy.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &RunSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "graph source: {}", summary.graph_source)?;
    for report in &summary.reports {
        writeln!(writer)?;
        writeln!(writer, "strategy: {}", report.strategy)?;
        let targets: Vec<String> = report.targets.iter().map(ToString::to_string).collect();
        writeln!(
            writer,
            "targets ({}): {}",
            targets.len(),
            targets.join(" ")
        )?;
        write_metrics(&mut writer, "baseline", &report.baseline)?;
        write_metrics(&mut writer, "final", &report.final_metrics)?;
        let newcomer = &report.newcomer_centrality;
        writeln!(
            writer,
            "newcomer: betweenness={:.4} closeness={:.4} eccentricity={} eigenvector={:.4}",
            newcomer.betweenness, newcomer.closeness, newcomer.eccentricity, newcomer.eigenvector
        )?;
        match report.resolution {
            Some(SearchOutcome::Exact {
                resolution,
                iterations,
            }) => writeln!(
                writer,
                "resolution: {resolution:.6} (exact after {iterations} iterations)"
            )?,
            Some(SearchOutcome::BestEffort {
                resolution,
                communities,
                target,
                iterations,
            }) => writeln!(
                writer,
                "resolution: {resolution:.6} ({communities} of {target} communities after {iterations} iterations)"
            )?,
            None => {}
        }
    }
    Ok(())
}

fn write_metrics(writer: &mut impl Write, label: &str, metrics: &GraphMetrics) -> io::Result<()> {
    writeln!(
        writer,
        "{label}: average_path_length={:.4} diameter={} radius={}",
        metrics.average_path_length, metrics.diameter, metrics.radius
    )
}
