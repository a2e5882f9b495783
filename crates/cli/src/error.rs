//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file not found
    #[error("{kind} file not found: {path}")]
    FileNotFound { kind: &'static str, path: String },

    /// Prediction request could not be parsed
    #[error("Failed to parse prediction request: {message}")]
    RequestParse { message: String },

    /// Prediction request is structurally wrong
    #[error("Invalid prediction request: {message}")]
    RequestInvalid { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn file_not_found(kind: &'static str, path: impl Into<String>) -> Self {
        Self::FileNotFound {
            kind,
            path: path.into(),
        }
    }

    pub fn request_parse(message: impl Into<String>) -> Self {
        Self::RequestParse {
            message: message.into(),
        }
    }

    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::RequestInvalid {
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
