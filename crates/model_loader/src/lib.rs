//! # Model Loader
//!
//! Vehicle model plugin loading.
//!
//! Responsibilities:
//! - Resolve a configured shared library
//! - Bind its `create` / `destroy` entry points
//! - Hand out the constructed instance paired with its library (`LoadedModel`)
//! - Provide an in-process mock loader for tests

pub mod dylib_loader;
pub mod error;
pub mod loaded_model;
pub mod loader;
pub mod mock_loader;

pub use contracts::{BoxedModel, VehicleMotionModel};
pub use dylib_loader::DylibModelLoader;
pub use error::{LoaderError, Result};
pub use loaded_model::LoadedModel;
pub use loader::ModelLoader;
pub use mock_loader::{MockLoaderConfig, MockModelLoader, ModelFactory};
