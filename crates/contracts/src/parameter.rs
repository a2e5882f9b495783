//! ParameterServer trait - configuration provider abstraction
//!
//! The accessor reads its own limits through this trait and then hands the same
//! provider to the loaded vehicle model, which reads its model-specific
//! parameters independently.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single parameter value
///
/// Untagged so that TOML and JSON documents map onto it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Numeric view; integers widen to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Configuration provider
///
/// Looks parameters up by key. A provider may fail to supply any key; callers
/// decide whether that is fatal.
///
/// # Example
///
/// ```ignore
/// let path = params.get_string("vehicle_model_lib_path");
/// let max_rate = params.get_f64("max_steering_angle_rate");
/// ```
pub trait ParameterServer: Send + Sync {
    /// Look up a raw parameter value
    fn get_param(&self, key: &str) -> Option<ParamValue>;

    /// Numeric parameter (integers are accepted)
    fn get_f64(&self, key: &str) -> Option<f64> {
        self.get_param(key).and_then(|v| v.as_f64())
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_param(key).and_then(|v| v.as_i64())
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_param(key).and_then(|v| v.as_bool())
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.get_param(key)
            .and_then(|v| v.as_str().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapParams(HashMap<String, ParamValue>);

    impl ParameterServer for MapParams {
        fn get_param(&self, key: &str) -> Option<ParamValue> {
            self.0.get(key).cloned()
        }
    }

    #[test]
    fn test_typed_helpers() {
        let mut map = HashMap::new();
        map.insert("rate".to_string(), ParamValue::Int(2));
        map.insert("path".to_string(), ParamValue::from("/tmp/libmodel.so"));
        map.insert("flag".to_string(), ParamValue::Bool(true));
        let params = MapParams(map);

        assert_eq!(params.get_f64("rate"), Some(2.0));
        assert_eq!(params.get_i64("rate"), Some(2));
        assert_eq!(params.get_string("path").as_deref(), Some("/tmp/libmodel.so"));
        assert_eq!(params.get_bool("flag"), Some(true));
        assert_eq!(params.get_f64("path"), None);
        assert_eq!(params.get_f64("missing"), None);
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<ParamValue> = serde_json::from_str(r#"[1, 1.5, "a", false, [2]]"#).unwrap();
        assert_eq!(values[0], ParamValue::Int(1));
        assert_eq!(values[1], ParamValue::Float(1.5));
        assert_eq!(values[2], ParamValue::String("a".into()));
        assert_eq!(values[3], ParamValue::Bool(false));
        assert_eq!(values[4], ParamValue::List(vec![ParamValue::Int(2)]));
        assert_eq!(values[4].to_string(), "[2]");
    }
}
