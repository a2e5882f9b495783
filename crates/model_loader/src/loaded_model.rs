//! LoadedModel - Model Loader output
//!
//! A vehicle model instance together with whatever keeps it alive. For shared
//! library models that is the library itself: the instance is destroyed
//! through the library's own `destroy` entry point, and only after that may the
//! library be unloaded.

use std::fmt;
use std::ptr::NonNull;

use contracts::{BoxedModel, DestroyModelFn, VehicleMotionModel};
use libloading::Library;

/// Owned vehicle model handle
pub struct LoadedModel {
    source: String,
    inner: ModelInstance,
}

enum ModelInstance {
    /// Created by a shared library's `create`
    Library(LibraryModel),
    /// Linked into the current binary
    InProcess(BoxedModel),
}

struct LibraryModel {
    instance: NonNull<BoxedModel>,
    destroy: DestroyModelFn,
    /// Dropped only after `Drop::drop` has released `instance`
    _library: Library,
}

// SAFETY: the pointee is a `Box<dyn VehicleMotionModel>`, which is Send + Sync
// by the trait bound; `Library` is Send + Sync.
unsafe impl Send for LibraryModel {}
unsafe impl Sync for LibraryModel {}

impl Drop for LibraryModel {
    fn drop(&mut self) {
        // SAFETY: `instance` came from the `create` of the library still held in
        // `_library`, and is released exactly once.
        unsafe { (self.destroy)(self.instance.as_ptr()) };
    }
}

impl LoadedModel {
    /// Wrap a model linked into the current binary
    pub fn in_process(source: impl Into<String>, model: BoxedModel) -> Self {
        Self {
            source: source.into(),
            inner: ModelInstance::InProcess(model),
        }
    }

    /// Pair a library-created instance with its library
    ///
    /// # Safety
    /// `instance` must have been returned by the `create` entry point of
    /// `library`, and `destroy` must be that library's `destroy` entry point.
    pub(crate) unsafe fn from_library(
        source: impl Into<String>,
        library: Library,
        instance: NonNull<BoxedModel>,
        destroy: DestroyModelFn,
    ) -> Self {
        Self {
            source: source.into(),
            inner: ModelInstance::Library(LibraryModel {
                instance,
                destroy,
                _library: library,
            }),
        }
    }

    /// Where the model came from (library path or mock label)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the model lives in a dynamically loaded library
    pub fn is_dynamic(&self) -> bool {
        matches!(self.inner, ModelInstance::Library(_))
    }

    pub fn model(&self) -> &dyn VehicleMotionModel {
        match &self.inner {
            // SAFETY: the instance is valid until `LibraryModel::drop`.
            ModelInstance::Library(lib) => &**unsafe { lib.instance.as_ref() },
            ModelInstance::InProcess(model) => &**model,
        }
    }

    pub fn model_mut(&mut self) -> &mut dyn VehicleMotionModel {
        match &mut self.inner {
            // SAFETY: as above; `&mut self` guarantees exclusive access.
            ModelInstance::Library(lib) => &mut **unsafe { lib.instance.as_mut() },
            ModelInstance::InProcess(model) => &mut **model,
        }
    }
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel")
            .field("source", &self.source)
            .field("dynamic", &self.is_dynamic())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use contracts::{ModelError, ParameterServer, VehicleControlInput, VehicleState};

    use super::*;

    struct DropFlagModel {
        configured: bool,
        dropped: Arc<AtomicBool>,
    }

    impl Drop for DropFlagModel {
        fn drop(&mut self) {
            self.dropped.store(true, Ordering::SeqCst);
        }
    }

    impl VehicleMotionModel for DropFlagModel {
        fn set_parameter_server(&mut self, _params: Arc<dyn ParameterServer>) {
            self.configured = true;
        }

        fn predict_constant(
            &self,
            initial_state: VehicleState,
            _timestep: f64,
            _horizon: f64,
        ) -> Result<Vec<VehicleState>, ModelError> {
            if self.configured {
                Ok(vec![initial_state])
            } else {
                Err(ModelError::new("not configured"))
            }
        }

        fn predict_with_controls(
            &self,
            initial_state: VehicleState,
            controls: &[VehicleControlInput],
            _timestep: f64,
        ) -> Result<Vec<VehicleState>, ModelError> {
            Ok(vec![initial_state; controls.len()])
        }
    }

    #[test]
    fn test_in_process_model_access() {
        let dropped = Arc::new(AtomicBool::new(false));
        let mut loaded = LoadedModel::in_process(
            "mock",
            Box::new(DropFlagModel {
                configured: false,
                dropped: dropped.clone(),
            }),
        );
        assert!(!loaded.is_dynamic());
        assert_eq!(loaded.source(), "mock");
        assert!(loaded
            .model()
            .predict_constant(VehicleState::default(), 0.1, 1.0)
            .is_err());

        struct NoParams;
        impl ParameterServer for NoParams {
            fn get_param(&self, _key: &str) -> Option<contracts::ParamValue> {
                None
            }
        }
        loaded.model_mut().set_parameter_server(Arc::new(NoParams));
        assert_eq!(
            loaded
                .model()
                .predict_constant(VehicleState::default(), 0.1, 1.0)
                .unwrap()
                .len(),
            1
        );

        drop(loaded);
        assert!(dropped.load(Ordering::SeqCst));
    }
}
