//! Bindings from JSON and YAML files.

use std::fs;
use std::path::Path;

use stencil_domain::{Value, VariableStore};

use super::object::ObjectFlattener;
use crate::error::InfrastructureResult;
use crate::serialization::{DocumentFormat, parse_document};

/// Reads a JSON or YAML file and flattens it into bindings.
///
/// # Errors
///
/// Fails if the extension is unsupported, the file cannot be read, or it
/// does not parse.
pub fn load_bindings_file(
    path: &Path,
    flattener: &ObjectFlattener,
) -> InfrastructureResult<Vec<(String, Value)>> {
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let document = parse_document(&content, format)?;
    let bindings = flattener.flatten_json(&document);

    tracing::debug!(
        path = %path.display(),
        %format,
        count = bindings.len(),
        "loaded bindings file"
    );
    Ok(bindings)
}

/// Loads a bindings file straight into `store`, returning how many were added.
///
/// # Errors
///
/// Fails as [`load_bindings_file`] does, or on a name the store rejects.
pub fn add_bindings_file(
    store: &mut VariableStore,
    path: &Path,
    flattener: &ObjectFlattener,
) -> InfrastructureResult<usize> {
    let bindings = load_bindings_file(path, flattener)?;
    let count = bindings.len();
    store.extend(bindings)?;
    Ok(count)
}
