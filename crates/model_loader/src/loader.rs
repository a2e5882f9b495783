//! Model loader abstraction
//!
//! Defines the loader trait, supporting the real shared-library loader and
//! in-process mocks.

use std::path::Path;

use crate::error::Result;
use crate::loaded_model::LoadedModel;

/// Model loader trait
///
/// Turns a configured library path into an owned model instance.
pub trait ModelLoader: Send + Sync {
    /// Load the vehicle model at `path`
    ///
    /// # Errors
    /// - `LoaderError::Load` if the library cannot be resolved
    /// - `LoaderError::Symbol` if `create` or `destroy` is missing
    fn load(&self, path: &Path) -> Result<LoadedModel>;
}
