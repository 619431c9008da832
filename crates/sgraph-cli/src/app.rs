//! Command dispatch for one invocation.

use crate::cli::Command;
use crate::error::CliResult;
use sgraph_commands::{about, config, graph, list, report, summary, CommandOutput, Data};
use sgraph_config::Config;
use tracing::{debug, info};

/// One run of the command line application.
pub struct SGraphApp {
    config: Config,
}

impl SGraphApp {
    /// Creates the application for an already loaded configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn load(self) -> CliResult<Data> {
        Ok(Data::load(self.config).await?)
    }

    /// Runs `command` to completion.
    ///
    /// `config` needs no sales table; every other command loads it first.
    pub async fn run(self, command: Command) -> CliResult<CommandOutput> {
        debug!(?command, "dispatching command");
        let output = match command {
            Command::Config => config::view(&self.config)?,
            Command::About => about::about(&self.load().await?),
            Command::List { level } => list::list(&self.load().await?, level),
            Command::Summary { scope } => {
                let scope = scope.to_scope()?;
                summary::summary(&self.load().await?, &scope).await?
            }
            Command::Graph {
                scope,
                format,
                output,
            } => {
                let scope = scope.to_scope()?;
                graph::graph(&self.load().await?, &scope, format.into(), output).await?
            }
            Command::Report {
                scope,
                formats,
                output,
            } => {
                let scope = scope.to_scope()?;
                report::report(&self.load().await?, &scope, &formats, output).await?
            }
        };
        info!("command finished");
        Ok(output)
    }
}
