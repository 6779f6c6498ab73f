//! CLI module for docgate
//!
//! Provides the command-line interface:
//! - start: load configuration and serve the HTTP gateway
//! - check: validate configuration and print the effective settings

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, run_command, start};
pub use errors::{CliError, CliResult};

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}
