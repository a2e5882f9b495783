//! VehicleMotionModel trait - vehicle model plugin contract
//!
//! Every vehicle model, whether linked in-process or loaded from a shared
//! library, implements this trait. Shared libraries additionally export the
//! `create` / `destroy` entry points generated by [`export_vehicle_model!`].

use std::sync::Arc;

use crate::{ModelError, ParameterServer, VehicleControlInput, VehicleState};

/// Vehicle model trait
///
/// Implementations must tolerate concurrent `predict_*` calls: the accessor
/// shares one instance across threads without additional locking.
///
/// # Example
///
/// ```ignore
/// #[derive(Default)]
/// struct ConstantVelocityModel;
///
/// impl VehicleMotionModel for ConstantVelocityModel {
///     fn set_parameter_server(&mut self, _params: Arc<dyn ParameterServer>) {}
///     // ... predict_constant / predict_with_controls ...
/// }
///
/// contracts::export_vehicle_model!(ConstantVelocityModel);
/// ```
pub trait VehicleMotionModel: Send + Sync {
    /// Hand over the configuration provider
    ///
    /// Called exactly once, right after construction and before any
    /// prediction. The model loads its own parameters here.
    fn set_parameter_server(&mut self, params: Arc<dyn ParameterServer>);

    /// Predict motion assuming the last control input is held
    ///
    /// # Arguments
    /// * `initial_state` - Starting state of the vehicle
    /// * `timestep` - Time between returned states (s)
    /// * `horizon` - Total projection time (s)
    ///
    /// # Returns
    /// States sampled every `timestep` up to `horizon`
    fn predict_constant(
        &self,
        initial_state: VehicleState,
        timestep: f64,
        horizon: f64,
    ) -> Result<Vec<VehicleState>, ModelError>;

    /// Predict motion for an explicit control sequence
    ///
    /// # Arguments
    /// * `initial_state` - Starting state of the vehicle
    /// * `controls` - Control inputs separated by `timestep`
    /// * `timestep` - Time between control inputs and returned states (s)
    ///
    /// # Returns
    /// One state per control input
    fn predict_with_controls(
        &self,
        initial_state: VehicleState,
        controls: &[VehicleControlInput],
        timestep: f64,
    ) -> Result<Vec<VehicleState>, ModelError>;
}

/// Instance type that crosses the shared library boundary
///
/// A thin pointer to this box is what `create` returns and `destroy` consumes.
pub type BoxedModel = Box<dyn VehicleMotionModel>;

/// Signature of the exported construction entry point
#[allow(improper_ctypes_definitions)]
pub type CreateModelFn = unsafe extern "C" fn() -> *mut BoxedModel;

/// Signature of the exported destruction entry point
#[allow(improper_ctypes_definitions)]
pub type DestroyModelFn = unsafe extern "C" fn(*mut BoxedModel);

/// Exported symbol name of [`CreateModelFn`]
pub const CREATE_SYMBOL: &str = "create";

/// Exported symbol name of [`DestroyModelFn`]
pub const DESTROY_SYMBOL: &str = "destroy";

/// Export `create` / `destroy` entry points for a vehicle model type
///
/// The type must implement [`VehicleMotionModel`] and [`Default`]. The
/// generated `destroy` frees the instance with the allocator of the library
/// that created it, which is why hosts must never drop the instance
/// themselves.
#[macro_export]
macro_rules! export_vehicle_model {
    ($model:ty) => {
        #[no_mangle]
        #[allow(improper_ctypes_definitions)]
        pub extern "C" fn create() -> *mut $crate::BoxedModel {
            let model: $crate::BoxedModel = ::std::boxed::Box::new(<$model>::default());
            ::std::boxed::Box::into_raw(::std::boxed::Box::new(model))
        }

        /// # Safety
        /// `model` must come from `create` of this library and must not be
        /// used afterwards.
        #[no_mangle]
        #[allow(improper_ctypes_definitions)]
        pub unsafe extern "C" fn destroy(model: *mut $crate::BoxedModel) {
            if !model.is_null() {
                drop(unsafe { ::std::boxed::Box::from_raw(model) });
            }
        }
    };
}
