//! Kinematic limit consistency checks
//!
//! Rules:
//! - every limit is finite
//! - min_steering_angle <= max_steering_angle
//! - min_trailer_angle <= max_trailer_angle
//! - max_steering_angle_rate >= 0
//! - forward_deceleration_limit <= forward_acceleration_limit
//!
//! Speed and reverse limits only need to be finite; no request check reads them.

use contracts::{ContractError, KinematicLimits};

/// Validate KinematicLimits
///
/// Returns the first error encountered, or Ok(()).
pub fn validate_limits(limits: &KinematicLimits) -> Result<(), ContractError> {
    validate_finite(limits)?;
    validate_ranges(limits)?;
    validate_steering_rate(limits)?;
    Ok(())
}

fn validate_finite(limits: &KinematicLimits) -> Result<(), ContractError> {
    for (key, value) in limits.entries() {
        if !value.is_finite() {
            return Err(ContractError::config_validation(
                key,
                format!("limit must be finite, got {value}"),
            ));
        }
    }
    Ok(())
}

fn validate_ranges(limits: &KinematicLimits) -> Result<(), ContractError> {
    let ranges = [
        (
            "min_steering_angle / max_steering_angle",
            limits.min_steering_angle,
            limits.max_steering_angle,
        ),
        (
            "min_trailer_angle / max_trailer_angle",
            limits.min_trailer_angle,
            limits.max_trailer_angle,
        ),
        (
            "forward_deceleration_limit / forward_acceleration_limit",
            limits.forward_deceleration_limit,
            limits.forward_acceleration_limit,
        ),
    ];

    for (field, lower, upper) in ranges {
        if lower > upper {
            return Err(ContractError::config_validation(
                field,
                format!("lower bound ({lower}) must be <= upper bound ({upper})"),
            ));
        }
    }
    Ok(())
}

fn validate_steering_rate(limits: &KinematicLimits) -> Result<(), ContractError> {
    let rate = limits.max_steering_angle_rate;
    if rate < 0.0 {
        return Err(ContractError::config_validation(
            "max_steering_angle_rate",
            format!("must be >= 0, got {rate}"),
        ));
    }
    Ok(())
}
