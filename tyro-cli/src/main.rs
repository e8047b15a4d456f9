//! Entry point for the `tyro` binary.
//!
//! Parses arguments, runs the requested strategies, prints the summary to
//! stdout and maps failures to a non-zero exit code with a structured error
//! event carrying the stable error code.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tracing::{error, field};
use tyro_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let core = err.downcast_ref::<CliError>().and_then(|cli_error| match cli_error {
            CliError::Core(core) => Some(core),
            _ => None,
        });
        let code = core.map(|core| field::display(core.code().as_str()));
        let strategy_code = core
            .and_then(|core| core.strategy_code())
            .map(|code| field::display(code.as_str()));
        let graph_source_code = core
            .and_then(|core| core.graph_source_code())
            .map(|code| field::display(code.as_str()));

        error!(
            error = %format!("{err:#}"),
            code,
            strategy_code,
            graph_source_code,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
