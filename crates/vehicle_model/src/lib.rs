//! # Vehicle Model
//!
//! Validating accessor for pluggable vehicle motion models.
//!
//! The accessor reads a library path and a kinematic envelope from a
//! parameter server, loads the model library, and checks every prediction
//! request against the envelope before the model sees it.
//!
//! ## Usage
//!
//! ```ignore
//! use vehicle_model::VehicleModelAccessor;
//!
//! let accessor = VehicleModelAccessor::from_parameters(params)?;
//! let trajectory = accessor.predict_with_controls(state, &controls, 0.1)?;
//! ```

pub mod accessor;
pub mod error;
pub mod validation;

pub use accessor::VehicleModelAccessor;
pub use error::{AccessorError, Result};
pub use validation::{
    validate_constant_request, validate_control_inputs, validate_controls_request,
    validate_initial_state, validate_prediction_window, Bound, BoundViolation, Field,
    ValidationError,
};
