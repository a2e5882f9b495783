//! Shared library vehicle model loader
//!
//! Opens the configured library with `libloading`, binds the exported
//! `create` / `destroy` entry points and constructs one model instance.

use std::path::Path;
use std::ptr::NonNull;

use contracts::{CreateModelFn, DestroyModelFn, CREATE_SYMBOL, DESTROY_SYMBOL};
use libloading::Library;
use tracing::{info, instrument};

use crate::error::{LoaderError, Result};
use crate::loaded_model::LoadedModel;
use crate::loader::ModelLoader;

/// Loader for vehicle models built as shared libraries
///
/// The library must export both entry points; the usual way is
/// `contracts::export_vehicle_model!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DylibModelLoader;

impl DylibModelLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ModelLoader for DylibModelLoader {
    #[instrument(name = "dylib_model_load", skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<LoadedModel> {
        info!("opening vehicle model library");

        // SAFETY: opening a library runs its initializers; the path comes from
        // the operator-controlled configuration.
        let library =
            unsafe { Library::new(path) }.map_err(|e| LoaderError::load(path, e.to_string()))?;

        // SAFETY: the symbol types are the ones `export_vehicle_model!` generates.
        let create: CreateModelFn = unsafe { library.get::<CreateModelFn>(CREATE_SYMBOL.as_bytes()) }
            .map(|symbol| *symbol)
            .map_err(|e| LoaderError::symbol(path, CREATE_SYMBOL, e.to_string()))?;
        let destroy: DestroyModelFn =
            unsafe { library.get::<DestroyModelFn>(DESTROY_SYMBOL.as_bytes()) }
                .map(|symbol| *symbol)
                .map_err(|e| LoaderError::symbol(path, DESTROY_SYMBOL, e.to_string()))?;

        // SAFETY: `create` takes no arguments and hands ownership to the caller.
        let instance = NonNull::new(unsafe { create() })
            .ok_or_else(|| LoaderError::load(path, "create returned a null instance"))?;

        // SAFETY: `instance` and `destroy` both come from `library`.
        let model =
            unsafe { LoadedModel::from_library(path.display().to_string(), library, instance, destroy) };

        info!("vehicle model instance created");
        Ok(model)
    }
}
