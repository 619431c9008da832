//! Configuration loading utilities

use crate::schema::Config;
use sgraph_common::{Result as SGraphResult, SGraphError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SGRAPH_CONFIG_PATH";

/// Files tried, in order, when no configuration path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["config.yaml", "config.yml", "config.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {}", .0.join("; "))]
    ValidationError(Vec<String>),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParseError { var: String, message: String },
}

impl From<ConfigError> for SGraphError {
    fn from(err: ConfigError) -> Self {
        SGraphError::config_with_source("could not load configuration", err)
    }
}

/// Reads a delimiter override verbatim so that whitespace delimiters survive.
///
/// The escape `\t` is accepted for shells where a literal tab is awkward.
fn parse_delimiter(value: &str) -> Result<char, ConfigError> {
    if value == "\\t" {
        return Ok('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) => Ok(delimiter),
        _ => Err(ConfigError::EnvParseError {
            var: "SGRAPH_DELIMITER".to_string(),
            message: format!("expected a single character, got {value:?}"),
        }),
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides.
    ///
    /// Files ending in `.toml` are parsed as TOML, everything else as YAML.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(path, &content)?;
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse configuration text, picking the format from the file extension.
    pub fn parse(path: &Path, content: &str) -> Result<Config, ConfigError> {
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Ok(toml::from_str(content)?)
        } else if content.trim().is_empty() {
            Ok(Config::default())
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    /// Load configuration from the environment and the default file locations.
    pub fn load() -> SGraphResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
        {
            return Ok(Self::load_config(path)?);
        }

        debug!("no configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SGraphResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply `SGRAPH_*` environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T>(var: &str, value: &str) -> Result<T, ConfigError>
        where
            T: std::str::FromStr,
            T::Err: std::fmt::Display,
        {
            value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
                var: var.to_string(),
                message: e.to_string(),
            })
        }

        if let Some(path) = lookup("SGRAPH_CSV_PATH") {
            config.data.csv_path = PathBuf::from(path);
        }

        if let Some(delimiter) = lookup("SGRAPH_DELIMITER") {
            config.data.delimiter = parse_delimiter(&delimiter)?;
        }

        if let Some(symbol) = lookup("SGRAPH_CURRENCY_SYMBOL") {
            config.report.currency_symbol = symbol;
        }

        if let Some(format) = lookup("SGRAPH_EXPORT_FORMAT") {
            config.report.export_format = parsed("SGRAPH_EXPORT_FORMAT", &format)?;
        }

        if let Some(dir) = lookup("SGRAPH_OUTPUT_DIR") {
            config.report.output_dir = PathBuf::from(dir);
        }

        if let Some(policy) = lookup("SGRAPH_EXPENSE_POLICY") {
            config.report.expense_policy = parsed("SGRAPH_EXPENSE_POLICY", &policy)?;
        }

        if let Some(high) = lookup("SGRAPH_THRESHOLD_HIGH") {
            config.thresholds.high = parsed("SGRAPH_THRESHOLD_HIGH", &high)?;
        }

        if let Some(medium) = lookup("SGRAPH_THRESHOLD_MEDIUM") {
            config.thresholds.medium = parsed("SGRAPH_THRESHOLD_MEDIUM", &medium)?;
        }

        if let Some(low) = lookup("SGRAPH_THRESHOLD_LOW") {
            config.thresholds.low = parsed("SGRAPH_THRESHOLD_LOW", &low)?;
        }

        if let Some(level) = lookup("SGRAPH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("SGRAPH_LOG_FILE") {
            config.logging.file_path = Some(PathBuf::from(file));
        }

        Ok(())
    }

    /// Serialize a configuration to YAML.
    pub fn to_yaml(config: &Config) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(config)?)
    }
}
