//! Prediction request file format.
//!
//! ```json
//! {
//!   "initial_state": { "steering_angle": 0.1 },
//!   "timestep": 0.1,
//!   "controls": [{ "target_acceleration": 1.0, "target_steering_angle": 0.2 }]
//! }
//! ```
//!
//! Exactly one of `horizon` (constant controls) or `controls` must be present.

use std::path::Path;

use contracts::{VehicleControlInput, VehicleState};
use serde::Deserialize;

use crate::error::{CliError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequest {
    #[serde(default)]
    initial_state: VehicleState,
    timestep: f64,
    #[serde(default)]
    horizon: Option<f64>,
    #[serde(default)]
    controls: Option<Vec<VehicleControlInput>>,
}

/// What the model should be asked
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionMode {
    Constant { horizon: f64 },
    Controls(Vec<VehicleControlInput>),
}

/// Parsed prediction request
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub initial_state: VehicleState,
    pub timestep: f64,
    pub mode: PredictionMode,
}

impl PredictionRequest {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::file_not_found("Request", path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawRequest =
            serde_json::from_str(content).map_err(|e| CliError::request_parse(e.to_string()))?;

        let mode = match (raw.horizon, raw.controls) {
            (Some(horizon), None) => PredictionMode::Constant { horizon },
            (None, Some(controls)) => PredictionMode::Controls(controls),
            (Some(_), Some(_)) => {
                return Err(CliError::request_invalid(
                    "`horizon` and `controls` are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(CliError::request_invalid(
                    "one of `horizon` or `controls` is required",
                ))
            }
        };

        Ok(Self {
            initial_state: raw.initial_state,
            timestep: raw.timestep,
            mode,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self.mode {
            PredictionMode::Constant { .. } => "constant",
            PredictionMode::Controls(_) => "controls",
        }
    }
}
