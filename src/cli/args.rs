//! CLI argument definitions using clap
//!
//! Commands:
//! - docgate start --config <path>
//! - docgate check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docgate - HTTP gateway for document-store CRUD
#[derive(Parser, Debug)]
#[command(name = "docgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the gateway server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./docgate.json")]
        config: PathBuf,
    },

    /// Validate configuration and print the effective settings
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./docgate.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
