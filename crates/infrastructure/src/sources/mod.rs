//! Sources that populate a [`VariableStore`](stencil_domain::VariableStore).

mod document;
mod environment;
mod object;

pub use document::{add_bindings_file, load_bindings_file};
pub use environment::{DEFAULT_ENV_PREFIX, EnvironmentSource};
pub use object::{DEFAULT_PATH_SEPARATOR, ObjectFlattener, PropertyFilterContext};
