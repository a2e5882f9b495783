//! Parameter file parsing
//!
//! Supports TOML (primary) and JSON. Nested tables are flattened into
//! `/`-separated keys.

use std::collections::BTreeMap;

use contracts::{ContractError, ParamValue};
use serde::Deserialize;

/// Parameter file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Document node: either a leaf value or a nested namespace
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNode {
    Value(ParamValue),
    Table(BTreeMap<String, RawNode>),
}

/// Parse TOML parameters
pub fn parse_toml(content: &str) -> Result<BTreeMap<String, ParamValue>, ContractError> {
    let root: BTreeMap<String, RawNode> =
        toml::from_str(content).map_err(|e| ContractError::ConfigParse {
            message: format!("TOML parse error: {e}"),
            source: Some(Box::new(e)),
        })?;
    Ok(flatten(root))
}

/// Parse JSON parameters
pub fn parse_json(content: &str) -> Result<BTreeMap<String, ParamValue>, ContractError> {
    let root: BTreeMap<String, RawNode> =
        serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
            message: format!("JSON parse error: {e}"),
            source: Some(Box::new(e)),
        })?;
    Ok(flatten(root))
}

/// Parse according to format
pub fn parse(
    content: &str,
    format: ConfigFormat,
) -> Result<BTreeMap<String, ParamValue>, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

fn flatten(root: BTreeMap<String, RawNode>) -> BTreeMap<String, ParamValue> {
    let mut out = BTreeMap::new();
    flatten_into(&mut out, None, root);
    out
}

fn flatten_into(
    out: &mut BTreeMap<String, ParamValue>,
    prefix: Option<&str>,
    table: BTreeMap<String, RawNode>,
) {
    for (key, node) in table {
        let full_key = match prefix {
            Some(prefix) => format!("{prefix}/{key}"),
            None => key,
        };
        match node {
            RawNode::Value(value) => {
                out.insert(full_key, value);
            }
            RawNode::Table(nested) => flatten_into(out, Some(&full_key), nested),
        }
    }
}
