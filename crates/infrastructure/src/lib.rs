//! Stencil Infrastructure - Binding sources
//!
//! This crate fills a variable store from the outside world: process
//! environment variables, serializable objects, and JSON or YAML files.

pub mod error;
pub mod serialization;
pub mod sources;

pub use error::{InfrastructureError, InfrastructureResult};
pub use serialization::{DocumentFormat, parse_document};
pub use sources::{
    DEFAULT_ENV_PREFIX, DEFAULT_PATH_SEPARATOR, EnvironmentSource, ObjectFlattener,
    PropertyFilterContext, add_bindings_file, load_bindings_file,
};
