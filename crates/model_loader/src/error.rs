//! Model Loader error types

use std::path::Path;

use thiserror::Error;

/// Model Loader specific error
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Library could not be resolved or produced no instance
    #[error("failed to load vehicle model library '{path}': {message}")]
    Load { path: String, message: String },

    /// Required entry point missing
    #[error("vehicle model library '{path}' has no '{symbol}' entry point: {message}")]
    Symbol {
        path: String,
        symbol: String,
        message: String,
    },
}

impl LoaderError {
    /// Create load error
    pub fn load(path: &Path, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create symbol error
    pub fn symbol(path: &Path, symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Symbol {
            path: path.display().to_string(),
            symbol: symbol.into(),
            message: message.into(),
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, LoaderError>;
