//! Main entry point for the sgraph command line.

use anyhow::Context;
use clap::Parser;
use sgraph_cli::{Cli, SGraphApp};
use sgraph_common::logging::init_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config().context("failed to load configuration")?;

    // Dropping the guard flushes the log file
    let _guard = init_logging(&config.logging).context("failed to initialize logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting sgraph");

    match SGraphApp::new(config).run(cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "command failed");
            Err(e.into())
        }
    }
}
