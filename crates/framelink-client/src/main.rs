//! framelink CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use framelink_client::cli::{Cli, Command};
use framelink_client::config::ClientConfig;
use framelink_client::error::ClientResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path)?
    } else {
        ClientConfig::load().unwrap_or_default()
    };

    match &cli.command {
        Some(Command::Serve(args)) => framelink_client::commands::serve::run(args).await,
        None => framelink_client::commands::send::run(&cli, &config).await,
    }
}
