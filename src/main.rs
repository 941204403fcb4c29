mod cli;
mod commands;
mod report;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::report::report_error;

const ENV_LOG: &str = "PIXTRACE_LOG";

fn init_logging() {
    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}
