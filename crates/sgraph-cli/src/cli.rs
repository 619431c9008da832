//! Command line arguments.

use crate::error::{CliError, CliResult};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sgraph_commands::GraphFormat;
use sgraph_common::{HierarchyLevel, Scope};
use sgraph_config::{Config, ConfigLoader, ExportFormat};
use std::path::PathBuf;

/// Sales hierarchy aggregation and graph export.
#[derive(Debug, Parser)]
#[command(name = "sgraph", version, about)]
pub struct Cli {
    /// Configuration file (YAML or TOML).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `sgraph_graphs=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Sales CSV, overriding `data.csv_path`.
    #[arg(long, global = true)]
    pub csv: Option<PathBuf>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show version and table information.
    About,
    /// List entity names per hierarchy level.
    List {
        /// Only list this level.
        #[arg(long, value_parser = parse_level)]
        level: Option<HierarchyLevel>,
    },
    /// Print the performance summary of a scope.
    Summary {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Print or write the hierarchy graph of a scope.
    Graph {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = GraphFormatArg::Dot)]
        format: GraphFormatArg,
        /// Write to this file instead of standard output.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write report exports of a scope.
    Report {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Export format; repeat for several. Defaults to `report.export_format`.
        #[arg(long = "format", value_parser = parse_export_format)]
        formats: Vec<ExportFormat>,
        /// Output directory, overriding `report.output_dir`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration.
    Config,
}

/// Selection of the records a command runs over.
#[derive(Debug, Clone, Default, Args)]
pub struct ScopeArgs {
    /// A single employee.
    #[arg(long, conflicts_with_all = ["level", "name", "all"])]
    pub employee: Option<String>,

    /// Hierarchy level of `--name`.
    #[arg(long, requires = "name", value_parser = parse_level)]
    pub level: Option<HierarchyLevel>,

    /// Entity name at `--level`.
    #[arg(long, requires = "level")]
    pub name: Option<String>,

    /// Every record.
    #[arg(long, conflicts_with_all = ["level", "name"])]
    pub all: bool,
}

impl ScopeArgs {
    /// Turns the flags into a [`Scope`].
    pub fn to_scope(&self) -> CliResult<Scope> {
        match (&self.employee, self.level, &self.name, self.all) {
            (Some(employee), None, None, false) => Ok(Scope::employee(employee.clone())),
            (None, Some(level), Some(name), false) => Ok(Scope::entity(level, name.clone())),
            (None, None, None, true) => Ok(Scope::All),
            _ => Err(CliError::Usage(
                "select a scope with --employee NAME, --level LEVEL --name NAME, or --all"
                    .to_string(),
            )),
        }
    }
}

/// Graph output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormatArg {
    /// Graphviz DOT.
    Dot,
    /// JSON graph structure.
    Json,
}

impl From<GraphFormatArg> for GraphFormat {
    fn from(arg: GraphFormatArg) -> Self {
        match arg {
            GraphFormatArg::Dot => Self::Dot,
            GraphFormatArg::Json => Self::Json,
        }
    }
}

fn parse_level(raw: &str) -> Result<HierarchyLevel, String> {
    raw.parse().map_err(|e: sgraph_common::SGraphError| e.to_string())
}

fn parse_export_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse().map_err(|e: sgraph_common::SGraphError| e.to_string())
}

impl Cli {
    /// Loads the configuration and applies the command line overrides.
    pub fn load_config(&self) -> CliResult<Config> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    /// Applies `--csv` and `--log-level` and revalidates.
    pub fn apply_overrides(&self, config: &mut Config) -> CliResult<()> {
        if let Some(csv) = &self.csv {
            config.data.csv_path.clone_from(csv);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        config
            .validate()
            .map_err(sgraph_common::SGraphError::from)?;
        Ok(())
    }
}
