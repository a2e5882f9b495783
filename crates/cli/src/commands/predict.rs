//! `predict` command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use config_loader::load_accessor_config;
use contracts::{ParameterServer, VehicleState, VEHICLE_MODEL_LIB_PATH_KEY};
use serde::Serialize;
use tracing::info;
use vehicle_model::{validate_constant_request, validate_controls_request, VehicleModelAccessor};

use crate::cli::PredictArgs;
use crate::request::{PredictionMode, PredictionRequest};

#[derive(Serialize)]
struct PredictionOutput<'a> {
    kind: &'static str,
    timestep: f64,
    states: &'a [VehicleState],
}

/// Execute the `predict` command
pub fn run_predict(args: &PredictArgs) -> Result<()> {
    info!(
        params = %args.params.display(),
        request = %args.request.display(),
        "Loading prediction request"
    );

    let mut store = super::load_params(&args.params)?;
    if let Some(ref lib_path) = args.lib_path {
        info!(lib_path = %lib_path.display(), "Overriding model library from CLI");
        store.insert(VEHICLE_MODEL_LIB_PATH_KEY, lib_path.display().to_string());
    }

    let request = PredictionRequest::load(&args.request)
        .with_context(|| format!("Failed to load request from {}", args.request.display()))?;

    // Dry run - check the request against the limits without loading the model
    if args.dry_run {
        let config = load_accessor_config(&store).context("Invalid parameters")?;
        let limits = &config.limits;
        match &request.mode {
            PredictionMode::Constant { horizon } => validate_constant_request(
                &request.initial_state,
                request.timestep,
                *horizon,
                limits,
            )?,
            PredictionMode::Controls(controls) => validate_controls_request(
                &request.initial_state,
                controls,
                request.timestep,
                limits,
            )?,
        }
        info!(kind = request.kind(), "Dry run mode - request is valid, exiting");
        println!("✓ Request is valid ({})", request.kind());
        return Ok(());
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let params: Arc<dyn ParameterServer> = Arc::new(store);
    let accessor = VehicleModelAccessor::from_parameters(params)
        .context("Failed to initialize vehicle model")?;
    info!(
        lib_path = %accessor.config()?.lib_path.display(),
        source = accessor.model_source()?,
        "Vehicle model ready"
    );

    let states = match &request.mode {
        PredictionMode::Constant { horizon } => {
            accessor.predict_constant(request.initial_state, request.timestep, *horizon)?
        }
        PredictionMode::Controls(controls) => {
            accessor.predict_with_controls(request.initial_state, controls, request.timestep)?
        }
    };

    info!(states = states.len(), "Prediction complete");

    let output = PredictionOutput {
        kind: request.kind(),
        timestep: request.timestep,
        states: &states,
    };
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize prediction")?;
    println!("{}", json);

    Ok(())
}
