//! Accessor error types

use contracts::{ContractError, ModelError};
use model_loader::LoaderError;
use thiserror::Error;

use crate::validation::ValidationError;

/// Accessor error
#[derive(Debug, Error)]
pub enum AccessorError {
    // ===== Initialization Errors =====
    /// Parameters missing, mistyped or inconsistent
    #[error("configuration error: {0}")]
    Config(#[from] ContractError),

    /// Library could not be resolved or produced no instance
    #[error("failed to load vehicle model library '{path}': {message}")]
    Load { path: String, message: String },

    /// Library lacks a required entry point
    #[error("vehicle model library '{path}' has no '{symbol}' entry point: {message}")]
    Symbol {
        path: String,
        symbol: String,
        message: String,
    },

    /// Second `initialize` on the same accessor
    #[error("vehicle model accessor is already initialized")]
    Reinitialization,

    // ===== Prediction Errors =====
    /// Prediction requested before `initialize` succeeded
    #[error("vehicle model accessor is not initialized")]
    NotInitialized,

    /// Request outside the kinematic envelope; the model was not called
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Model returned an error
    #[error(transparent)]
    Backend(#[from] ModelError),
}

impl AccessorError {
    /// True for errors raised while setting the accessor up
    pub fn is_initialization(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Load { .. } | Self::Symbol { .. } | Self::Reinitialization
        )
    }
}

impl From<LoaderError> for AccessorError {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::Load { path, message } => Self::Load { path, message },
            LoaderError::Symbol {
                path,
                symbol,
                message,
            } => Self::Symbol {
                path,
                symbol,
                message,
            },
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, AccessorError>;
