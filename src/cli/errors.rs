//! CLI-specific error types
//!
//! All CLI errors are fatal; main prints them and exits non-zero.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Server failed to start or serve
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}
