//! Shared command data and result types.

use sgraph_common::Result as SGraphResult;
use sgraph_config::Config;
use sgraph_graphs::{EmployeeTable, ReportManager, TableLoader};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Application data accessible in all commands.
#[derive(Debug, Clone)]
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Report manager over the loaded table.
    pub manager: ReportManager,
}

impl Data {
    /// Wraps an already loaded table.
    pub fn new(config: Config, table: EmployeeTable) -> Self {
        let manager = ReportManager::from_config(Arc::new(table), &config);
        Self {
            config: Arc::new(config),
            manager,
        }
    }

    /// Loads the table named by `config.data` and wraps it.
    pub async fn load(config: Config) -> SGraphResult<Self> {
        let loader = TableLoader::new(config.data.delimiter)?;
        let table = loader.load(&config.data.csv_path).await?;
        info!(
            path = %config.data.csv_path.display(),
            records = table.len(),
            "sales table ready"
        );
        Ok(Self::new(config, table))
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = &'a Data;

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Text for standard output.
    Text(String),
    /// Files written to disk.
    Written(Vec<PathBuf>),
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text.trim_end()),
            Self::Written(paths) => {
                for (i, path) in paths.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "Wrote {}", path.display())?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_display() {
        assert_eq!(CommandOutput::Text("hello\n\n".to_string()).to_string(), "hello");
        let written = CommandOutput::Written(vec![PathBuf::from("a.md"), PathBuf::from("b.dot")]);
        assert_eq!(written.to_string(), "Wrote a.md\nWrote b.dot");
    }
}
