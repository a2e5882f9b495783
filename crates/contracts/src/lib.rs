//! # Contracts
//!
//! Frozen interface contracts shared by the accessor, the loader and every
//! vehicle model plugin. Business crates depend on this crate only, never the
//! other way around.
//!
//! ## Units
//! - Distances in meters, velocities in m/s, accelerations in m/s^2
//! - Angles in radians, angular rates in rad/s
//! - Time in seconds (f64)

mod error;
mod limits;
mod motion_model;
mod parameter;
mod vehicle_state;

pub use error::*;
pub use limits::*;
pub use motion_model::*;
pub use parameter::*;
pub use vehicle_state::*;
