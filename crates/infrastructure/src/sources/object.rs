//! Bindings from the fields of an arbitrary serializable object graph.
//!
//! Nested fields become dotted paths: `{ "other": { "codes": true } }`
//! yields the binding `other.codes = true`.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as Json;
use stencil_domain::{Value, VariableStore};

use crate::error::InfrastructureResult;

/// Default separator between path segments.
pub const DEFAULT_PATH_SEPARATOR: &str = ".";

/// The property being considered by a property filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyFilterContext<'a> {
    /// The property name, or the element index for arrays.
    pub name: &'a str,
    /// The path of the containing object; empty at the root.
    pub parent_path: &'a str,
    /// The property value.
    pub value: &'a Json,
}

type LeafPredicate = dyn Fn(&Json) -> bool + Send + Sync;
type PathJoin = dyn Fn(&str, &str) -> String + Send + Sync;
type PropertyFilter = dyn Fn(&PropertyFilterContext<'_>) -> bool + Send + Sync;

/// Flattens an object graph into name/value bindings.
#[derive(Clone)]
pub struct ObjectFlattener {
    is_leaf: Arc<LeafPredicate>,
    join: Arc<PathJoin>,
    filter: Option<Arc<PropertyFilter>>,
}

impl ObjectFlattener {
    /// Creates a flattener joining paths with `.` and treating scalars and
    /// empty containers as leaves.
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_leaf: Arc::new(is_default_leaf),
            join: separator_join(DEFAULT_PATH_SEPARATOR),
            filter: None,
        }
    }

    /// Joins path segments with `separator`.
    #[must_use]
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.join = separator_join(separator);
        self
    }

    /// Joins a non-empty parent path and a segment with a custom rule.
    #[must_use]
    pub fn with_path_join<F>(mut self, join: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.join = Arc::new(join);
        self
    }

    /// Decides which values are bound directly instead of walked into.
    #[must_use]
    pub fn with_leaf_predicate<F>(mut self, is_leaf: F) -> Self
    where
        F: Fn(&Json) -> bool + Send + Sync + 'static,
    {
        self.is_leaf = Arc::new(is_leaf);
        self
    }

    /// Skips properties (and everything beneath them) for which `filter` returns false.
    #[must_use]
    pub fn with_property_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&PropertyFilterContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Flattens any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be represented as JSON.
    pub fn flatten<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> InfrastructureResult<Vec<(String, Value)>> {
        let json = serde_json::to_value(value)?;
        Ok(self.flatten_json(&json))
    }

    /// Flattens a JSON document. A scalar root has no name and yields nothing.
    #[must_use]
    pub fn flatten_json(&self, json: &Json) -> Vec<(String, Value)> {
        let mut bindings = Vec::new();
        self.walk(json, "", &mut bindings);
        bindings
    }

    /// Flattens `value` and adds every binding to `store`.
    ///
    /// # Errors
    ///
    /// Fails on serialization errors and on duplicate names the store rejects.
    pub fn add_to<T: Serialize + ?Sized>(
        &self,
        store: &mut VariableStore,
        value: &T,
    ) -> InfrastructureResult<usize> {
        let bindings = self.flatten(value)?;
        let count = bindings.len();
        store.extend(bindings)?;
        tracing::debug!(count, "added variables from object");
        Ok(count)
    }

    fn walk(&self, json: &Json, path: &str, out: &mut Vec<(String, Value)>) {
        match json {
            Json::Object(map) => {
                for (key, child) in map {
                    self.visit(key, child, path, out);
                }
            }
            Json::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    self.visit(&index.to_string(), child, path, out);
                }
            }
            _ => {}
        }
    }

    fn visit(&self, name: &str, child: &Json, parent_path: &str, out: &mut Vec<(String, Value)>) {
        if let Some(filter) = &self.filter {
            let context = PropertyFilterContext {
                name,
                parent_path,
                value: child,
            };
            if !filter(&context) {
                return;
            }
        }

        let child_path = if parent_path.is_empty() {
            name.to_string()
        } else {
            (self.join)(parent_path, name)
        };

        if (self.is_leaf)(child) {
            out.push((child_path, leaf_value(child)));
        } else {
            self.walk(child, &child_path, out);
        }
    }
}

impl Default for ObjectFlattener {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectFlattener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectFlattener")
            .field("has_filter", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

fn separator_join(separator: &str) -> Arc<PathJoin> {
    let separator = separator.to_string();
    Arc::new(move |parent, segment| format!("{parent}{separator}{segment}"))
}

fn is_default_leaf(json: &Json) -> bool {
    match json {
        Json::Object(map) => map.is_empty(),
        Json::Array(items) => items.is_empty(),
        _ => true,
    }
}

/// Converts a leaf to a value; non-scalar leaves are bound as their JSON text.
fn leaf_value(json: &Json) -> Value {
    Value::from_json_scalar(json).unwrap_or_else(|| Value::Text(json.to_string()))
}
