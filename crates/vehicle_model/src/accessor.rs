//! Vehicle model accessor
//!
//! Owns one loaded vehicle model together with the kinematic limits it was
//! configured with, and fronts every prediction with input validation.
//!
//! Lifecycle:
//! 1. `new` - empty accessor, no model
//! 2. `initialize` - read config, load the library, hand the model its
//!    parameters (once only)
//! 3. `predict_*` - validate, then delegate to the model
//! 4. drop - model instance is destroyed, then its library is unloaded
//!
//! Initialization is serialized by a mutex. Once it has succeeded the state
//! is read through a `OnceLock`, so predictions never take a lock.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Instant;

use config_loader::{load_accessor_config, AccessorConfig};
use contracts::{
    KinematicLimits, ModelError, ParameterServer, VehicleControlInput, VehicleState,
};
use model_loader::{DylibModelLoader, LoadedModel, ModelLoader};
use observability::{
    record_backend_latency_ms, record_control_sequence_len, record_model_load,
    record_validation_rejection, PredictionCounters, PredictionKind, PredictionOutcome,
    PredictionSummary,
};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{AccessorError, Result};
use crate::validation::{validate_constant_request, validate_controls_request, ValidationError};

/// State that exists only after a successful `initialize`
struct ModelState {
    config: AccessorConfig,
    model: LoadedModel,
}

/// Validating front end for a pluggable vehicle motion model
///
/// Safe to share across threads; predictions may run concurrently.
pub struct VehicleModelAccessor<L: ModelLoader = DylibModelLoader> {
    loader: L,
    init_lock: Mutex<()>,
    state: OnceLock<ModelState>,
    counters: PredictionCounters,
}

impl VehicleModelAccessor<DylibModelLoader> {
    /// Create and initialize an accessor that loads shared libraries
    pub fn from_parameters(params: Arc<dyn ParameterServer>) -> Result<Self> {
        Self::with_parameters(DylibModelLoader::new(), params)
    }
}

impl<L: ModelLoader> VehicleModelAccessor<L> {
    /// Create an uninitialized accessor
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            init_lock: Mutex::new(()),
            state: OnceLock::new(),
            counters: PredictionCounters::new(),
        }
    }

    /// Create an accessor and initialize it in one step
    pub fn with_parameters(loader: L, params: Arc<dyn ParameterServer>) -> Result<Self> {
        let accessor = Self::new(loader);
        accessor.initialize(params)?;
        Ok(accessor)
    }

    /// Configure the accessor and load its vehicle model
    ///
    /// Reads the library path and all kinematic limits from `params`, loads
    /// the library and passes `params` on to the new model instance.
    ///
    /// # Errors
    /// - `Reinitialization` if a previous call succeeded; the existing model
    ///   stays in place
    /// - `Config` if a parameter is missing, mistyped or inconsistent; the
    ///   loader is not invoked
    /// - `Load` / `Symbol` if the library cannot be used
    ///
    /// Any failure leaves the accessor uninitialized, so a later call may retry.
    #[instrument(name = "vehicle_model_initialize", skip_all)]
    pub fn initialize(&self, params: Arc<dyn ParameterServer>) -> Result<()> {
        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.state.get().is_some() {
            warn!("initialize called on an initialized accessor");
            return Err(AccessorError::Reinitialization);
        }

        let config = load_accessor_config(params.as_ref()).map_err(|e| {
            error!(error = %e, "accessor configuration rejected");
            AccessorError::from(e)
        })?;
        info!(lib_path = %config.lib_path.display(), "accessor configuration loaded");

        let mut model = match self.loader.load(&config.lib_path) {
            Ok(model) => {
                record_model_load(true);
                model
            }
            Err(e) => {
                record_model_load(false);
                error!(error = %e, "vehicle model load failed");
                return Err(e.into());
            }
        };
        model.model_mut().set_parameter_server(params);

        let source = model.source().to_string();
        if self.state.set(ModelState { config, model }).is_err() {
            return Err(AccessorError::Reinitialization);
        }

        info!(source = %source, "vehicle model accessor initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    /// Kinematic limits in force
    pub fn limits(&self) -> Result<&KinematicLimits> {
        Ok(&self.state()?.config.limits)
    }

    /// Configuration the accessor was initialized with
    pub fn config(&self) -> Result<&AccessorConfig> {
        Ok(&self.state()?.config)
    }

    /// Where the model came from (library path or mock label)
    pub fn model_source(&self) -> Result<&str> {
        Ok(self.state()?.model.source())
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Request counts since construction
    pub fn stats(&self) -> PredictionSummary {
        self.counters.summary()
    }

    /// Predict while holding the initial state's controls constant
    ///
    /// Checks the sampling window and the initial state, then returns the
    /// model's trajectory unchanged.
    #[instrument(name = "vehicle_model_predict_constant", skip(self, initial_state))]
    pub fn predict_constant(
        &self,
        initial_state: VehicleState,
        timestep: f64,
        horizon: f64,
    ) -> Result<Vec<VehicleState>> {
        const KIND: PredictionKind = PredictionKind::Constant;
        let state = self.state()?;

        if let Err(e) =
            validate_constant_request(&initial_state, timestep, horizon, &state.config.limits)
        {
            return Err(self.reject(KIND, e));
        }

        debug!("delegating constant-control prediction");
        let started = Instant::now();
        let result = state
            .model
            .model()
            .predict_constant(initial_state, timestep, horizon);
        record_backend_latency_ms(KIND, started.elapsed().as_secs_f64() * 1000.0);

        self.finish(KIND, result)
    }

    /// Predict the response to a sequence of control inputs
    ///
    /// Checks the initial state, then every control in order; the first
    /// violation is reported with its index and the model is not called.
    #[instrument(
        name = "vehicle_model_predict_with_controls",
        skip(self, initial_state, controls),
        fields(controls = controls.len())
    )]
    pub fn predict_with_controls(
        &self,
        initial_state: VehicleState,
        controls: &[VehicleControlInput],
        timestep: f64,
    ) -> Result<Vec<VehicleState>> {
        const KIND: PredictionKind = PredictionKind::Controls;
        let state = self.state()?;

        if let Err(e) =
            validate_controls_request(&initial_state, controls, timestep, &state.config.limits)
        {
            return Err(self.reject(KIND, e));
        }

        record_control_sequence_len(controls.len());
        debug!("delegating control-sequence prediction");
        let started = Instant::now();
        let result = state
            .model
            .model()
            .predict_with_controls(initial_state, controls, timestep);
        record_backend_latency_ms(KIND, started.elapsed().as_secs_f64() * 1000.0);

        self.finish(KIND, result)
    }

    fn state(&self) -> Result<&ModelState> {
        self.state.get().ok_or(AccessorError::NotInitialized)
    }

    fn reject(&self, kind: PredictionKind, err: ValidationError) -> AccessorError {
        warn!(
            kind = kind.as_str(),
            field = err.field().as_str(),
            index = ?err.index(),
            error = %err,
            "prediction request rejected"
        );
        record_validation_rejection(err.field().as_str());
        self.counters.record(kind, PredictionOutcome::Rejected);
        AccessorError::Validation(err)
    }

    fn finish(
        &self,
        kind: PredictionKind,
        result: std::result::Result<Vec<VehicleState>, ModelError>,
    ) -> Result<Vec<VehicleState>> {
        match result {
            Ok(states) => {
                self.counters.record(kind, PredictionOutcome::Success);
                debug!(states = states.len(), "prediction complete");
                Ok(states)
            }
            Err(e) => {
                self.counters.record(kind, PredictionOutcome::BackendError);
                error!(kind = kind.as_str(), error = %e, "vehicle model returned an error");
                Err(AccessorError::Backend(e))
            }
        }
    }
}

impl<L: ModelLoader> Drop for VehicleModelAccessor<L> {
    fn drop(&mut self) {
        if let Some(state) = self.state.get() {
            debug!(source = state.model.source(), "releasing vehicle model");
        }
    }
}
