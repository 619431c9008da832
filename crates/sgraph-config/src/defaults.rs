//! Default values for every configuration section.

use crate::schema::*;
use sgraph_common::logging::LoggingConfig;
use sgraph_common::{AchievementThresholds, ExpensePolicy};
use std::path::PathBuf;

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            report: ReportConfig::default(),
            thresholds: AchievementThresholds::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data.csv"),
            delimiter: ',',
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            export_format: ExportFormat::Markdown,
            output_dir: PathBuf::from("reports"),
            expense_policy: ExpensePolicy::MeanSalary,
        }
    }
}
