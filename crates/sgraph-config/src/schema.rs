//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use sgraph_common::logging::LoggingConfig;
use sgraph_common::{AchievementThresholds, ExpensePolicy, SGraphError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure for SGraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input table configuration.
    pub data: DataConfig,
    /// Report and export configuration.
    pub report: ReportConfig,
    /// Target achievement band thresholds, in percent.
    pub thresholds: AchievementThresholds,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Input table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the sales CSV.
    pub csv_path: PathBuf,
    /// Field delimiter of the CSV.
    pub delimiter: char,
}

/// Report and export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Currency symbol printed in front of amounts.
    pub currency_symbol: String,
    /// Default export format of the `report` command.
    pub export_format: ExportFormat,
    /// Directory exports are written to.
    pub output_dir: PathBuf,
    /// How salary is charged against a scope's sales.
    pub expense_policy: ExpensePolicy,
}

/// Export format of a generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Markdown performance summary.
    #[default]
    Markdown,
    /// PNG report card.
    Png,
    /// JSON document with the summary and hierarchy graph.
    Json,
    /// Graphviz DOT hierarchy diagram.
    Dot,
}

impl ExportFormat {
    /// File extension used for exports of this format.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Png => "png",
            Self::Json => "json",
            Self::Dot => "dot",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Markdown => "markdown",
            Self::Png => "png",
            Self::Json => "json",
            Self::Dot => "dot",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = SGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "png" => Ok(Self::Png),
            "json" => Ok(Self::Json),
            "dot" | "graphviz" => Ok(Self::Dot),
            other => Err(SGraphError::config(format!("unknown export format '{other}'"))),
        }
    }
}
