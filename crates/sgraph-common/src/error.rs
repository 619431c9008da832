//! Error types and utilities for SGraph

use crate::types::HierarchyLevel;
use thiserror::Error;

/// Result type alias for SGraph operations
pub type Result<T> = std::result::Result<T, SGraphError>;

/// Main error type for SGraph operations
#[derive(Error, Debug)]
pub enum SGraphError {
    /// A numeric field could not be normalized into a finite number
    #[error("invalid value {value:?} for field '{field}' in row {row}")]
    InvalidRecord {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// A record has no value at one of the hierarchy levels
    #[error("row {row} has no value for hierarchy level {level}")]
    MissingHierarchyField { row: usize, level: HierarchyLevel },

    /// The input table lacks a required column
    #[error("input is missing required column '{0}'")]
    MissingColumn(String),

    /// A selection named an entity that does not occur in the table
    #[error("no {level} named '{name}' in the loaded table")]
    UnknownEntity { level: HierarchyLevel, name: String },

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Rendering and export errors
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SGraphError {
    /// Create an invalid record error
    pub fn invalid_record(row: usize, field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidRecord {
            row,
            field,
            value: value.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}
