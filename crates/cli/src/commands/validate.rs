//! `validate` command implementation.

use anyhow::{Context, Result};
use config_loader::{load_accessor_config, AccessorConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    params_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ParamsSummary>,
}

#[derive(Serialize)]
struct ParamsSummary {
    lib_path: String,
    parameter_count: usize,
    steering_angle_range: [f64; 2],
    max_steering_angle_rate: f64,
    acceleration_range: [f64; 2],
    trailer_angle_range: [f64; 2],
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(params = %args.params.display(), "Validating parameters");

    let result = validate_params(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Parameter validation failed")
    }
}

fn validate_params(args: &ValidateArgs) -> ValidationResult {
    let params_path = args.params.display().to_string();
    let invalid = |params_path: String, error: String| ValidationResult {
        valid: false,
        params_path,
        error: Some(error),
        warnings: None,
        summary: None,
    };

    let store = match super::load_params(&args.params) {
        Ok(store) => store,
        Err(e) => return invalid(params_path, format!("{:#}", e)),
    };

    match load_accessor_config(&store) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            ValidationResult {
                valid: true,
                params_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ParamsSummary {
                    lib_path: config.lib_path.display().to_string(),
                    parameter_count: store.len(),
                    steering_angle_range: [
                        config.limits.min_steering_angle,
                        config.limits.max_steering_angle,
                    ],
                    max_steering_angle_rate: config.limits.max_steering_angle_rate,
                    acceleration_range: [
                        config.limits.forward_deceleration_limit,
                        config.limits.forward_acceleration_limit,
                    ],
                    trailer_angle_range: [
                        config.limits.min_trailer_angle,
                        config.limits.max_trailer_angle,
                    ],
                }),
            }
        }
        Err(e) => invalid(params_path, e.to_string()),
    }
}

/// Collect parameter warnings (non-fatal issues)
fn collect_warnings(config: &AccessorConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if !config.lib_path.exists() {
        warnings.push(format!(
            "Model library {} does not exist on this host",
            config.lib_path.display()
        ));
    }

    if config.limits.max_steering_angle_rate == 0.0 {
        warnings.push("max_steering_angle_rate is 0 - any steering change is rejected".to_string());
    }

    if config.limits.min_steering_angle == config.limits.max_steering_angle {
        warnings.push("Steering angle range is a single value".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Parameters are valid: {}", result.params_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Library: {}", summary.lib_path);
            println!("  Parameters: {}", summary.parameter_count);
            println!(
                "  Steering angle: [{}, {}] rad",
                summary.steering_angle_range[0], summary.steering_angle_range[1]
            );
            println!("  Steering rate: <= {} rad/s", summary.max_steering_angle_rate);
            println!(
                "  Acceleration: [{}, {}] m/s²",
                summary.acceleration_range[0], summary.acceleration_range[1]
            );
            println!(
                "  Trailer angle: [{}, {}] rad",
                summary.trailer_angle_range[0], summary.trailer_angle_range[1]
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Parameters are invalid: {}", result.params_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
