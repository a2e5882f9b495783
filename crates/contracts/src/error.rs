//! Layered error definitions
//!
//! Categorized by source: config / parameter / model

use thiserror::Error;

/// Configuration error shared by every crate that reads parameters
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Parameter Errors =====
    /// Required parameter not supplied by the provider
    #[error("missing parameter '{key}'")]
    MissingParameter { key: String },

    /// Parameter present but of the wrong type
    #[error("parameter '{key}' has invalid value: expected {expected}, found {found}")]
    InvalidParameter {
        key: String,
        expected: &'static str,
        found: String,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create missing parameter error
    pub fn missing_parameter(key: impl Into<String>) -> Self {
        Self::MissingParameter { key: key.into() }
    }

    /// Create invalid parameter error
    pub fn invalid_parameter(
        key: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            key: key.into(),
            expected,
            found: found.into(),
        }
    }
}

/// Failure reported by a vehicle model implementation
///
/// Opaque to the accessor: it is propagated, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("vehicle model error: {message}")]
pub struct ModelError {
    pub message: String,
}

impl ModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
