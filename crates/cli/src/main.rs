//! envcraft CLI - inspect and document layered `.env` configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Locate the schema file and run the selected command.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Loading, validation, or rendering logic (see `crates/config`).
//!
//! Invariants:
//! - Logs go to stderr so command output on stdout stays clean.
//! - Every error path exits through `ExitCodeExt::exit_code`.

mod args;
mod commands;
mod dispatch;
mod error;
mod locate;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
