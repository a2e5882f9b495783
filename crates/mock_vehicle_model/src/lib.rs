//! # Mock Vehicle Model
//!
//! Reference vehicle model plugin. Built as a `cdylib` it exports the
//! `create` / `destroy` entry points the accessor loads; linked as an `rlib`
//! the same type serves in-process tests.
//!
//! The model does no dynamics: it shifts the initial state along `x_pos` by
//! `x_offset` so that callers can confirm their request reached the model.
//!
//! ## Parameters
//!
//! - `mock_vehicle_model/x_offset` (float, default 5.0)
//!
//! The library also exports `mock_vehicle_model_dropped_instances`, the number
//! of instances released so far, so hosts can check that `destroy` ran.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use contracts::{ModelError, ParameterServer, VehicleControlInput, VehicleMotionModel, VehicleState};
use tracing::debug;

/// Parameter key of the x offset
pub const X_OFFSET_KEY: &str = "mock_vehicle_model/x_offset";

/// Offset used when the parameter is absent
pub const DEFAULT_X_OFFSET: f64 = 5.0;

/// Upper bound on states produced by one constant-control prediction
const MAX_CONSTANT_STATES: usize = 100_000;

/// Exported symbol name of [`mock_vehicle_model_dropped_instances`]
pub const DROPPED_INSTANCES_SYMBOL: &str = "mock_vehicle_model_dropped_instances";

static DROPPED_INSTANCES: AtomicUsize = AtomicUsize::new(0);

/// Instances dropped in this copy of the library
#[no_mangle]
pub extern "C" fn mock_vehicle_model_dropped_instances() -> usize {
    DROPPED_INSTANCES.load(Ordering::SeqCst)
}

/// Mock vehicle model
#[derive(Debug)]
pub struct MockVehicleModel {
    x_offset: f64,
    prediction_count: AtomicUsize,
}

impl Default for MockVehicleModel {
    fn default() -> Self {
        Self {
            x_offset: DEFAULT_X_OFFSET,
            prediction_count: AtomicUsize::new(0),
        }
    }
}

impl MockVehicleModel {
    pub fn x_offset(&self) -> f64 {
        self.x_offset
    }

    /// Number of predict calls served
    pub fn prediction_count(&self) -> usize {
        self.prediction_count.load(Ordering::SeqCst)
    }

    fn shifted(&self, state: VehicleState) -> VehicleState {
        VehicleState {
            x_pos: state.x_pos + self.x_offset,
            ..state
        }
    }
}

impl Drop for MockVehicleModel {
    fn drop(&mut self) {
        DROPPED_INSTANCES.fetch_add(1, Ordering::SeqCst);
    }
}

impl VehicleMotionModel for MockVehicleModel {
    fn set_parameter_server(&mut self, params: Arc<dyn ParameterServer>) {
        if let Some(offset) = params.get_f64(X_OFFSET_KEY) {
            self.x_offset = offset;
        }
        debug!(x_offset = self.x_offset, "mock vehicle model configured");
    }

    fn predict_constant(
        &self,
        initial_state: VehicleState,
        timestep: f64,
        horizon: f64,
    ) -> Result<Vec<VehicleState>, ModelError> {
        self.prediction_count.fetch_add(1, Ordering::SeqCst);

        let steps = (horizon / timestep).floor();
        if !steps.is_finite() || steps < 1.0 || steps > MAX_CONSTANT_STATES as f64 {
            return Err(ModelError::new(format!(
                "cannot sample horizon {horizon}s every {timestep}s"
            )));
        }

        Ok(vec![self.shifted(initial_state); steps as usize])
    }

    fn predict_with_controls(
        &self,
        initial_state: VehicleState,
        controls: &[VehicleControlInput],
        _timestep: f64,
    ) -> Result<Vec<VehicleState>, ModelError> {
        self.prediction_count.fetch_add(1, Ordering::SeqCst);
        Ok(vec![self.shifted(initial_state); controls.len()])
    }
}

contracts::export_vehicle_model!(MockVehicleModel);

#[cfg(test)]
mod tests {
    use contracts::ParamValue;

    use super::*;

    struct OffsetParams(f64);

    impl ParameterServer for OffsetParams {
        fn get_param(&self, key: &str) -> Option<ParamValue> {
            (key == X_OFFSET_KEY).then_some(ParamValue::Float(self.0))
        }
    }

    fn state() -> VehicleState {
        VehicleState {
            x_pos: 1.0,
            y_pos: 2.0,
            steering_angle: 0.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_offset() {
        let model = MockVehicleModel::default();
        let states = model
            .predict_with_controls(state(), &[VehicleControlInput::default()], 0.1)
            .unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].x_pos, 6.0);
        assert_eq!(states[0].y_pos, 2.0);
        assert_eq!(model.prediction_count(), 1);
    }

    #[test]
    fn test_offset_from_parameters() {
        let mut model = MockVehicleModel::default();
        model.set_parameter_server(Arc::new(OffsetParams(-1.0)));
        assert_eq!(model.x_offset(), -1.0);

        let states = model.predict_constant(state(), 0.5, 2.0).unwrap();
        assert_eq!(states.len(), 4);
        assert!(states.iter().all(|s| s.x_pos == 0.0));
    }

    #[test]
    fn test_constant_rejects_degenerate_window() {
        let model = MockVehicleModel::default();
        assert!(model.predict_constant(state(), 0.0, 1.0).is_err());
        assert!(model.predict_constant(state(), 2.0, 1.0).is_err());
    }

    #[test]
    fn test_exported_entry_points() {
        let raw = create();
        assert!(!raw.is_null());
        // SAFETY: `raw` came from `create` above and is destroyed once.
        unsafe {
            let states = (*raw)
                .predict_with_controls(state(), &[VehicleControlInput::default(); 3], 0.1)
                .unwrap();
            assert_eq!(states.len(), 3);
            let before = mock_vehicle_model_dropped_instances();
            destroy(raw);
            assert!(mock_vehicle_model_dropped_instances() > before);
        }
    }
}
