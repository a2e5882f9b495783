//! Input validation
//!
//! Checks prediction requests against the configured `KinematicLimits` before
//! anything reaches a vehicle model. Every check fails fast and reports the
//! first violation in sequence order.
//!
//! All functions here are pure: no logging, no metrics, no state.

use std::fmt;

use contracts::{KinematicLimits, VehicleControlInput, VehicleState};
use thiserror::Error;

/// Validated quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SteeringAngle,
    TrailerAngle,
    TargetAcceleration,
    TargetSteeringAngle,
    SteeringAngleRate,
    Timestep,
    Horizon,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SteeringAngle => "steering_angle",
            Self::TrailerAngle => "trailer_angle",
            Self::TargetAcceleration => "target_acceleration",
            Self::TargetSteeringAngle => "target_steering_angle",
            Self::SteeringAngleRate => "steering_angle_rate",
            Self::Timestep => "timestep",
            Self::Horizon => "horizon",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The bound a value failed to satisfy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Value must be >= this
    Min(f64),
    /// Value must be <= this
    Max(f64),
    /// Value must be > 0
    Positive,
    /// Value must not be NaN or infinite
    Finite,
}

/// A single out-of-envelope value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundViolation {
    pub field: Field,
    pub value: f64,
    pub bound: Bound,
}

impl BoundViolation {
    pub fn new(field: Field, value: f64, bound: Bound) -> Self {
        Self {
            field,
            value,
            bound,
        }
    }

    /// How far the value lies outside the bound (NaN for `Finite`)
    pub fn margin(&self) -> f64 {
        match self.bound {
            Bound::Min(min) => min - self.value,
            Bound::Max(max) => self.value - max,
            Bound::Positive => -self.value,
            Bound::Finite => f64::NAN,
        }
    }
}

impl fmt::Display for BoundViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound {
            Bound::Min(min) => write!(
                f,
                "{} = {} is below minimum {} by {}",
                self.field,
                self.value,
                min,
                self.margin()
            ),
            Bound::Max(max) => write!(
                f,
                "{} = {} exceeds maximum {} by {}",
                self.field,
                self.value,
                max,
                self.margin()
            ),
            Bound::Positive => write!(f, "{} = {} must be > 0", self.field, self.value),
            Bound::Finite => write!(f, "{} = {} is not finite", self.field, self.value),
        }
    }
}

/// Rejected prediction request
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    /// Initial vehicle state out of envelope
    #[error("invalid initial state: {0}")]
    InitialState(BoundViolation),

    /// Control input out of envelope
    #[error("invalid control input [{index}]: {violation}")]
    ControlInput {
        index: usize,
        violation: BoundViolation,
    },

    /// Timestep / horizon mismatch
    #[error("invalid prediction window: {0}")]
    Window(BoundViolation),
}

impl ValidationError {
    pub fn violation(&self) -> &BoundViolation {
        match self {
            Self::InitialState(v) | Self::Window(v) => v,
            Self::ControlInput { violation, .. } => violation,
        }
    }

    pub fn field(&self) -> Field {
        self.violation().field
    }

    /// Index of the offending control input, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::ControlInput { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Validate the initial vehicle state
///
/// Checks steering angle and trailer angle against their configured ranges.
pub fn validate_initial_state(
    state: &VehicleState,
    limits: &KinematicLimits,
) -> Result<(), ValidationError> {
    check_range(
        Field::SteeringAngle,
        state.steering_angle,
        limits.min_steering_angle,
        limits.max_steering_angle,
    )
    .map_err(ValidationError::InitialState)?;
    check_range(
        Field::TrailerAngle,
        state.trailer_angle,
        limits.min_trailer_angle,
        limits.max_trailer_angle,
    )
    .map_err(ValidationError::InitialState)?;
    Ok(())
}

/// Validate a control sequence
///
/// Walks `controls` in order. The steering rate of element `i` is measured
/// against element `i - 1`, or against the initial state's steering angle for
/// element 0, so rate violations across a transition are caught.
///
/// # Errors
/// The first violation found, tagged with its index.
pub fn validate_control_inputs(
    initial_state: &VehicleState,
    controls: &[VehicleControlInput],
    timestep: f64,
    limits: &KinematicLimits,
) -> Result<(), ValidationError> {
    check_timestep(timestep).map_err(ValidationError::Window)?;
    check_finite(Field::SteeringAngle, initial_state.steering_angle)
        .map_err(ValidationError::InitialState)?;

    let mut last_steer = initial_state.steering_angle;
    for (index, control) in controls.iter().enumerate() {
        validate_control(control, last_steer, timestep, limits)
            .map_err(|violation| ValidationError::ControlInput { index, violation })?;
        last_steer = control.target_steering_angle;
    }
    Ok(())
}

/// Validate the sampling window of a constant-control prediction
///
/// `timestep` must be positive and must not exceed `horizon`.
pub fn validate_prediction_window(timestep: f64, horizon: f64) -> Result<(), ValidationError> {
    check_timestep(timestep).map_err(ValidationError::Window)?;
    check_finite(Field::Horizon, horizon).map_err(ValidationError::Window)?;
    if timestep > horizon {
        return Err(ValidationError::Window(BoundViolation::new(
            Field::Timestep,
            timestep,
            Bound::Max(horizon),
        )));
    }
    Ok(())
}

/// Validate a constant-control prediction request
///
/// The window is checked before the initial state.
pub fn validate_constant_request(
    initial_state: &VehicleState,
    timestep: f64,
    horizon: f64,
    limits: &KinematicLimits,
) -> Result<(), ValidationError> {
    validate_prediction_window(timestep, horizon)?;
    validate_initial_state(initial_state, limits)
}

/// Validate a control-sequence prediction request
///
/// The initial state is checked before any control input.
pub fn validate_controls_request(
    initial_state: &VehicleState,
    controls: &[VehicleControlInput],
    timestep: f64,
    limits: &KinematicLimits,
) -> Result<(), ValidationError> {
    validate_initial_state(initial_state, limits)?;
    validate_control_inputs(initial_state, controls, timestep, limits)
}

fn validate_control(
    control: &VehicleControlInput,
    last_steer: f64,
    timestep: f64,
    limits: &KinematicLimits,
) -> Result<(), BoundViolation> {
    // deceleration limit is the signed lower bound
    check_range(
        Field::TargetAcceleration,
        control.target_acceleration,
        limits.forward_deceleration_limit,
        limits.forward_acceleration_limit,
    )?;
    check_range(
        Field::TargetSteeringAngle,
        control.target_steering_angle,
        limits.min_steering_angle,
        limits.max_steering_angle,
    )?;

    let rate = (control.target_steering_angle - last_steer).abs() / timestep;
    if rate > limits.max_steering_angle_rate {
        return Err(BoundViolation::new(
            Field::SteeringAngleRate,
            rate,
            Bound::Max(limits.max_steering_angle_rate),
        ));
    }
    Ok(())
}

fn check_timestep(timestep: f64) -> Result<(), BoundViolation> {
    check_finite(Field::Timestep, timestep)?;
    if timestep <= 0.0 {
        return Err(BoundViolation::new(Field::Timestep, timestep, Bound::Positive));
    }
    Ok(())
}

fn check_finite(field: Field, value: f64) -> Result<(), BoundViolation> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BoundViolation::new(field, value, Bound::Finite))
    }
}

fn check_range(field: Field, value: f64, min: f64, max: f64) -> Result<(), BoundViolation> {
    check_finite(field, value)?;
    if value < min {
        return Err(BoundViolation::new(field, value, Bound::Min(min)));
    }
    if value > max {
        return Err(BoundViolation::new(field, value, Bound::Max(max)));
    }
    Ok(())
}
