//! KinematicLimits - Config Loader output
//!
//! Physical envelope every prediction request is checked against.

use serde::{Deserialize, Serialize};

/// Parameter key of the vehicle model library path
pub const VEHICLE_MODEL_LIB_PATH_KEY: &str = "vehicle_model_lib_path";

/// Kinematic limits of the host vehicle
///
/// Loaded once at initialization and read-only afterwards.
/// `forward_deceleration_limit` is signed: it is the lower bound on
/// commanded acceleration and is normally negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicLimits {
    /// Maximum forward speed (m/s)
    pub max_forward_speed: f64,
    /// Maximum reverse speed (m/s)
    pub max_reverse_speed: f64,
    /// Upper bound on commanded forward acceleration (m/s^2)
    pub forward_acceleration_limit: f64,
    /// Lower bound on commanded forward acceleration (m/s^2)
    pub forward_deceleration_limit: f64,
    /// Reverse acceleration limit (m/s^2)
    pub reverse_acceleration_limit: f64,
    /// Reverse deceleration limit (m/s^2)
    pub reverse_deceleration_limit: f64,
    /// Maximum steering angle (rad)
    pub max_steering_angle: f64,
    /// Minimum steering angle (rad)
    pub min_steering_angle: f64,
    /// Maximum steering angle rate (rad/s)
    pub max_steering_angle_rate: f64,
    /// Maximum trailer articulation angle (rad)
    pub max_trailer_angle: f64,
    /// Minimum trailer articulation angle (rad)
    pub min_trailer_angle: f64,
}

impl KinematicLimits {
    /// Parameter keys in load order
    pub const PARAM_KEYS: [&'static str; 11] = [
        "max_forward_speed",
        "max_reverse_speed",
        "forward_acceleration_limit",
        "forward_deceleration_limit",
        "reverse_acceleration_limit",
        "reverse_deceleration_limit",
        "max_steering_angle",
        "min_steering_angle",
        "max_steering_angle_rate",
        "max_trailer_angle",
        "min_trailer_angle",
    ];

    /// Build from values ordered as [`Self::PARAM_KEYS`]
    pub fn from_ordered(values: [f64; 11]) -> Self {
        let [
            max_forward_speed,
            max_reverse_speed,
            forward_acceleration_limit,
            forward_deceleration_limit,
            reverse_acceleration_limit,
            reverse_deceleration_limit,
            max_steering_angle,
            min_steering_angle,
            max_steering_angle_rate,
            max_trailer_angle,
            min_trailer_angle,
        ] = values;
        Self {
            max_forward_speed,
            max_reverse_speed,
            forward_acceleration_limit,
            forward_deceleration_limit,
            reverse_acceleration_limit,
            reverse_deceleration_limit,
            max_steering_angle,
            min_steering_angle,
            max_steering_angle_rate,
            max_trailer_angle,
            min_trailer_angle,
        }
    }

    /// Values paired with their parameter keys, in load order
    pub fn entries(&self) -> [(&'static str, f64); 11] {
        let keys = Self::PARAM_KEYS;
        [
            (keys[0], self.max_forward_speed),
            (keys[1], self.max_reverse_speed),
            (keys[2], self.forward_acceleration_limit),
            (keys[3], self.forward_deceleration_limit),
            (keys[4], self.reverse_acceleration_limit),
            (keys[5], self.reverse_deceleration_limit),
            (keys[6], self.max_steering_angle),
            (keys[7], self.min_steering_angle),
            (keys[8], self.max_steering_angle_rate),
            (keys[9], self.max_trailer_angle),
            (keys[10], self.min_trailer_angle),
        ]
    }
}
