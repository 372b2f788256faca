//! Error handling for the CLI application

use thiserror::Error;

/// CLI-specific failures
#[derive(Error, Debug)]
pub enum CliError {
    /// File not found or inaccessible
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid file pattern
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Corpus contained sentences that could not be read
    #[error("{count} malformed sentence(s) found")]
    MalformedInput {
        /// Number of rejected sentences
        count: usize,
    },
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::FileNotFound("a.conllu".to_string()).to_string(),
            "File not found: a.conllu"
        );
        assert_eq!(
            CliError::InvalidPattern("[x".to_string()).to_string(),
            "Invalid file pattern: [x"
        );
        assert_eq!(
            CliError::MalformedInput { count: 3 }.to_string(),
            "3 malformed sentence(s) found"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = CliError::ConfigError("bad".to_string()).into();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }
}
