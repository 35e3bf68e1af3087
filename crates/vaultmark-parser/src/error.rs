//! Parser error types

use std::io;
use thiserror::Error;

/// Parser error type
#[derive(Debug, Error)]
pub enum ParserError {
    /// IO error reading file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// File exceeds size limit
    #[error("File too large: {size} bytes (max {max} bytes)")]
    FileTooLarge {
        /// Actual file size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Invalid file path
    #[error("Invalid file path: {0}")]
    InvalidPath(String),
}

/// Specialized Result type for parser operations
pub type ParserResult<T> = Result<T, ParserError>;

impl ParserError {
    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Check if this error is fatal (should stop a vault scan)
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_include_sizes() {
        let err = ParserError::FileTooLarge {
            size: 2048,
            max: 1024,
        };
        let msg = err.to_string();
        assert!(msg.contains("2048"));
        assert!(msg.contains("1024"));
    }

    #[test]
    fn io_errors_are_fatal() {
        let err = ParserError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(err.is_fatal());
        assert!(!ParserError::invalid_path("..").is_fatal());
    }
}
