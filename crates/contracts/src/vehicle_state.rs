//! VehicleState / VehicleControlInput - prediction inputs and outputs

use serde::{Deserialize, Serialize};

/// Kinematic state of the host vehicle
///
/// Plain value type: produced by callers or by a model's prediction step and
/// copied freely between components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleState {
    /// Global x position (m)
    pub x_pos: f64,

    /// Global y position (m)
    pub y_pos: f64,

    /// Heading in the global frame (rad)
    pub orientation: f64,

    /// Longitudinal velocity (m/s)
    pub longitudinal_vel: f64,

    /// Lateral velocity (m/s)
    pub lateral_vel: f64,

    /// Yaw rate (rad/s)
    pub yaw_rate: f64,

    /// Front wheel rotation rate (rad/s)
    pub front_wheel_rotation_rate: f64,

    /// Rear wheel rotation rate (rad/s)
    pub rear_wheel_rotation_rate: f64,

    /// Front wheel steering angle (rad)
    pub steering_angle: f64,

    /// Trailer articulation angle (rad)
    pub trailer_angle: f64,
}

/// A single control command
///
/// Control inputs are always handled as an ordered slice: element `i` applies
/// `i * timestep` after the previous one, and the initial state's steering
/// angle precedes element 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleControlInput {
    /// Commanded acceleration (m/s^2), negative when braking
    pub target_acceleration: f64,

    /// Commanded steering angle (rad)
    pub target_steering_angle: f64,
}

impl VehicleControlInput {
    pub fn new(target_acceleration: f64, target_steering_angle: f64) -> Self {
        Self {
            target_acceleration,
            target_steering_angle,
        }
    }
}
