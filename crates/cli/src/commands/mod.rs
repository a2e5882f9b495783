//! Command implementations.

mod info;
mod predict;
mod validate;

pub use info::run_info;
pub use predict::run_predict;
pub use validate::run_validate;

use std::path::Path;

use anyhow::{Context, Result};
use config_loader::ParameterStore;

use crate::error::CliError;

/// Load a parameter file, failing early if it does not exist
fn load_params(path: &Path) -> Result<ParameterStore> {
    if !path.exists() {
        return Err(CliError::file_not_found("Parameter", path.display().to_string()).into());
    }
    ParameterStore::load_from_path(path)
        .with_context(|| format!("Failed to load parameters from {}", path.display()))
}
