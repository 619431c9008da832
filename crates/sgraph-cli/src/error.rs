//! Application-wide error types using thiserror.

use sgraph_common::SGraphError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Error from loading, aggregation or rendering.
    #[error(transparent)]
    Core(#[from] SGraphError),

    /// A command failed.
    #[error("Command failed: {0}")]
    Command(#[source] sgraph_commands::Error),

    /// The arguments do not describe a usable request.
    #[error("Usage error: {0}")]
    Usage(String),
}

impl From<sgraph_commands::Error> for CliError {
    fn from(err: sgraph_commands::Error) -> Self {
        match err.downcast::<SGraphError>() {
            Ok(core) => Self::Core(*core),
            Err(other) => Self::Command(other),
        }
    }
}

/// Result type for the command line application.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sgraph_common::HierarchyLevel;

    #[test]
    fn test_core_errors_are_unwrapped() {
        let boxed: sgraph_commands::Error = Box::new(SGraphError::UnknownEntity {
            level: HierarchyLevel::Asm,
            name: "M9".to_string(),
        });
        let err = CliError::from(boxed);
        assert!(matches!(err, CliError::Core(SGraphError::UnknownEntity { .. })));
        assert_eq!(err.to_string(), "no ASM named 'M9' in the loaded table");
    }

    #[test]
    fn test_other_errors_stay_boxed() {
        let boxed: sgraph_commands::Error = "boom".into();
        assert!(matches!(CliError::from(boxed), CliError::Command(_)));
    }
}
