//! `normativa` command-line entry point.
//!
//! Composition root: parses arguments, installs the tracing subscriber (and
//! OTLP export when configured), builds one [`sdk::Client`] and runs a single
//! subcommand against it. Results are printed to stdout as JSON; logs and
//! errors go to stderr. Any failure yields a non-zero exit status.

mod cli;
mod commands;
mod observability;

use std::process::ExitCode;

use clap::Parser;
use model::ApiError;
use tracing::error;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = match observability::init(cli.log_format) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = match commands::client(&cli) {
        Ok(client) => commands::run(&client, cli.command).await,
        Err(e) => Err(e),
    };

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    };
    telemetry.shutdown();
    code
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ApiError>() {
        Some(api) => {
            error!(kind = api.kind(), status = ?api.status(), "request failed");
            eprintln!("error: {err:#}");
            if let Some(after) = api.retry_after() {
                eprintln!("hint: rate limited, retry in {}s", after.as_secs());
            }
        }
        None => eprintln!("error: {err:#}"),
    }
}
