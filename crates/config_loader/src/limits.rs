//! Accessor configuration loading
//!
//! Reads the vehicle model library path and every kinematic limit from a
//! `ParameterServer`. All-or-nothing: the first missing or mistyped key aborts
//! the load and no partial configuration is ever returned.

use std::path::PathBuf;

use contracts::{ContractError, KinematicLimits, ParameterServer, VEHICLE_MODEL_LIB_PATH_KEY};
use serde::Serialize;

use crate::validator;

/// Everything the accessor needs before it can load a model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessorConfig {
    /// Shared library implementing the vehicle model
    pub lib_path: PathBuf,

    /// Kinematic envelope enforced on every request
    pub limits: KinematicLimits,
}

/// Load the accessor configuration
///
/// # Errors
/// - `MissingParameter` if any key is absent
/// - `InvalidParameter` if a key has the wrong type
/// - `ConfigValidation` if the limits are inconsistent
pub fn load_accessor_config(params: &dyn ParameterServer) -> Result<AccessorConfig, ContractError> {
    let lib_path = read_string(params, VEHICLE_MODEL_LIB_PATH_KEY)?;
    let limits = load_kinematic_limits(params)?;
    Ok(AccessorConfig {
        lib_path: PathBuf::from(lib_path),
        limits,
    })
}

/// Load and check the kinematic limits only
pub fn load_kinematic_limits(
    params: &dyn ParameterServer,
) -> Result<KinematicLimits, ContractError> {
    let mut values = [0.0; 11];
    for (slot, key) in values.iter_mut().zip(KinematicLimits::PARAM_KEYS) {
        *slot = read_f64(params, key)?;
    }

    let limits = KinematicLimits::from_ordered(values);
    validator::validate_limits(&limits)?;
    Ok(limits)
}

fn read_f64(params: &dyn ParameterServer, key: &str) -> Result<f64, ContractError> {
    let value = params
        .get_param(key)
        .ok_or_else(|| ContractError::missing_parameter(key))?;
    value
        .as_f64()
        .ok_or_else(|| ContractError::invalid_parameter(key, "number", value.to_string()))
}

fn read_string(params: &dyn ParameterServer, key: &str) -> Result<String, ContractError> {
    let value = params
        .get_param(key)
        .ok_or_else(|| ContractError::missing_parameter(key))?;
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(ContractError::invalid_parameter(
            key,
            "non-empty string",
            value.to_string(),
        )),
    }
}
