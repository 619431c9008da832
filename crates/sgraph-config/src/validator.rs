//! Runtime validation of a loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;
use sgraph_common::AchievementThresholds;

/// Upper bound accepted for any achievement threshold, in percent.
pub const MAX_THRESHOLD: f64 = 1000.0;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Check that the thresholds are finite, in range and strictly descending.
pub fn validate_thresholds(t: &AchievementThresholds) -> Vec<String> {
    let mut problems = Vec::new();
    for (name, value) in [("high", t.high), ("medium", t.medium), ("low", t.low)] {
        if !value.is_finite() || !(0.0..=MAX_THRESHOLD).contains(&value) {
            problems.push(format!(
                "thresholds.{name} must be between 0 and {MAX_THRESHOLD}, got {value}"
            ));
        }
    }
    if !(t.high > t.medium && t.medium > t.low) {
        problems.push(format!(
            "thresholds must satisfy high > medium > low, got {} / {} / {}",
            t.high, t.medium, t.low
        ));
    }
    problems
}

/// Check a log filter: either a bare level or a `target=level` directive list.
pub fn validate_log_level(level: &str) -> Result<(), String> {
    let trimmed = level.trim();
    if trimmed.is_empty() {
        return Err("logging.level cannot be empty".to_string());
    }
    for directive in trimmed.split(',') {
        let level_part = directive.rsplit('=').next().unwrap_or(directive).trim();
        if !LOG_LEVELS.contains(&level_part.to_ascii_lowercase().as_str()) {
            return Err(format!("logging.level has unknown level '{level_part}'"));
        }
    }
    Ok(())
}

impl Config {
    /// Validates the configuration, reporting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.data.csv_path.as_os_str().is_empty() {
            problems.push("data.csv_path cannot be empty".to_string());
        }

        if !self.data.delimiter.is_ascii() || self.data.delimiter.is_ascii_alphanumeric() {
            problems.push(format!(
                "data.delimiter must be a single ASCII punctuation or whitespace character, got {:?}",
                self.data.delimiter
            ));
        }

        if self.report.currency_symbol.trim().is_empty() {
            problems.push("report.currency_symbol cannot be empty".to_string());
        }

        problems.extend(validate_thresholds(&self.thresholds));

        if let Err(problem) = validate_log_level(&self.logging.level) {
            problems.push(problem);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_thresholds_must_descend() {
        let t = AchievementThresholds {
            high: 50.0,
            medium: 50.0,
            low: 30.0,
        };
        assert_eq!(validate_thresholds(&t).len(), 1);

        let t = AchievementThresholds {
            high: f64::NAN,
            medium: 50.0,
            low: -1.0,
        };
        // NaN and the negative bound, plus the ordering check
        assert_eq!(validate_thresholds(&t).len(), 3);
    }

    #[test]
    fn test_log_level_directives() {
        assert!(validate_log_level("info").is_ok());
        assert!(validate_log_level("sgraph_graphs=trace,warn").is_ok());
        assert!(validate_log_level("DEBUG").is_ok());
        assert!(validate_log_level("").is_err());
        assert!(validate_log_level("loud").is_err());
    }

    #[test]
    fn test_all_problems_reported() {
        let mut config = Config::default();
        config.report.currency_symbol = " ".to_string();
        config.data.delimiter = 'x';
        config.logging.level = "chatty".to_string();

        match config.validate() {
            Err(ConfigError::ValidationError(problems)) => assert_eq!(problems.len(), 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
