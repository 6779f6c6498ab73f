//! CLI command implementations

use std::path::Path;

use tracing::info;

use crate::config::GatewayConfig;
use crate::http_server::HttpServer;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Dispatch the parsed command.
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Start { config } => start(&config),
        Command::Check { config } => check(&config),
    }
}

/// Load configuration, falling back to defaults when no file exists.
fn load_config(path: &Path) -> CliResult<GatewayConfig> {
    if path.exists() {
        Ok(GatewayConfig::load(path)?)
    } else {
        let config = GatewayConfig::default();
        config.validate().map_err(CliError::Config)?;
        Ok(config)
    }
}

/// Start the gateway server.
pub fn start(config_path: &Path) -> CliResult<()> {
    init_tracing();

    let config = load_config(config_path)?;
    info!(
        database = %config.store.database,
        collection = %config.store.collection,
        policy = ?config.provisioning.policy,
        "starting gateway"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(HttpServer::new(config).start())?;
    Ok(())
}

/// Validate configuration and print the effective settings.
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    // Validation already ran in load; show what the server would use,
    // minus the credential.
    let rendered = serde_json::to_string_pretty(&redacted(config))
        .map_err(|e| CliError::Config(crate::config::ConfigError::Parse(e)))?;
    println!("{}", rendered);
    Ok(())
}

/// Blank out credential fields before rendering a config.
fn redacted(mut config: GatewayConfig) -> GatewayConfig {
    if !config.store.password.is_empty() {
        config.store.password = "<redacted>".to_string();
    }
    config
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docgate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
