//! Engine error types

use covington_core::ParseError;
use thiserror::Error;

/// Errors raised while orchestrating parsing over corpora
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error from the transition system
    #[error("parse error: {0}")]
    Core(#[from] ParseError),

    /// Unreadable corpus content
    #[error("corpus error at line {line}: {reason}")]
    Corpus {
        /// 1-based input line where the problem starts
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Thread pool could not be created
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// Configuration file is not valid TOML
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl EngineError {
    /// Corpus error at `line`
    pub fn corpus(line: usize, reason: impl Into<String>) -> Self {
        EngineError::Corpus {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_error_display() {
        let err = EngineError::corpus(12, "head column is not a number");
        assert_eq!(
            err.to_string(),
            "corpus error at line 12: head column is not a number"
        );
    }

    #[test]
    fn test_core_error_converts() {
        let err: EngineError = ParseError::UnknownLabel("nmod".into()).into();
        assert!(matches!(err, EngineError::Core(ParseError::UnknownLabel(_))));
        assert!(err.to_string().contains("nmod"));
    }
}
