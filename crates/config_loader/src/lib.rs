//! # Config Loader
//!
//! Parameter loading module.
//!
//! Responsibilities:
//! - Parse TOML/JSON parameter files into a `ParameterStore`
//! - Serve parameters through the `ParameterServer` contract
//! - Load and validate the accessor configuration (`AccessorConfig`)
//!
//! # Example
//!
//! ```no_run
//! use config_loader::{load_accessor_config, ParameterStore};
//! use std::path::Path;
//!
//! let params = ParameterStore::load_from_path(Path::new("vehicle_model.toml")).unwrap();
//! let config = load_accessor_config(&params).unwrap();
//! println!("Model library: {}", config.lib_path.display());
//! ```

mod limits;
mod parser;
mod validator;

pub use limits::{load_accessor_config, load_kinematic_limits, AccessorConfig};
pub use parser::ConfigFormat;
pub use validator::validate_limits;

use std::collections::BTreeMap;
use std::path::Path;

use contracts::{ContractError, ParamValue, ParameterServer};

/// In-memory parameter provider
///
/// Keys of nested tables are flattened with `/`, so a backend namespaces its
/// own parameters under a table named after it. Lookups ignore a leading `/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterStore {
    params: BTreeMap<String, ParamValue>,
}

impl ParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load parameters from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    pub fn load_from_path(path: &Path) -> Result<Self, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load parameters from string
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<Self, ContractError> {
        Ok(Self {
            params: parser::parse(content, format)?,
        })
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        self.params
            .insert(key.trim_start_matches('/').to_string(), value.into());
    }

    /// Remove a parameter
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.params.remove(key.trim_start_matches('/'))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// All keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }
}

impl ParameterStore {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }
}

impl ParameterServer for ParameterStore {
    fn get_param(&self, key: &str) -> Option<ParamValue> {
        self.params.get(key.trim_start_matches('/')).cloned()
    }
}
