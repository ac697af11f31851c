//! Bindings from process environment variables.

use std::fmt;
use std::sync::Arc;

use stencil_application::ValidatesNames;
use stencil_domain::{DomainResult, VariableStore};

/// Default prefix applied to every imported environment variable.
pub const DEFAULT_ENV_PREFIX: &str = "ENV_";

type KeyFilter = dyn Fn(&str) -> bool + Send + Sync;

/// Imports environment variables as text bindings named `prefix + KEY`.
#[derive(Clone)]
pub struct EnvironmentSource {
    prefix: String,
    filter: Arc<KeyFilter>,
    filter_invalid_names: bool,
}

impl EnvironmentSource {
    /// Creates a source with the `ENV_` prefix, no key filter, and invalid
    /// names skipped.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_ENV_PREFIX.to_string(),
            filter: Arc::new(|_| true),
            filter_invalid_names: true,
        }
    }

    /// Sets the prefix prepended to each key. May be empty.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Only imports keys for which `filter` returns true.
    #[must_use]
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.filter = Arc::new(filter);
        self
    }

    /// Imports names the validator rejects instead of skipping them.
    ///
    /// The replacer build then fails with the rejected names.
    #[must_use]
    pub const fn disable_invalid_name_filter(mut self) -> Self {
        self.filter_invalid_names = false;
        self
    }

    /// Imports the current process environment into `store`.
    ///
    /// Entries that are not valid UTF-8 are skipped. Keys are imported in
    /// sorted order.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate name if the store rejects duplicates.
    pub fn add_to(
        &self,
        store: &mut VariableStore,
        validator: Option<&dyn ValidatesNames>,
    ) -> DomainResult<usize> {
        let mut vars: Vec<(String, String)> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        vars.sort();
        self.add_from(vars, store, validator)
    }

    /// Imports the given key/value pairs into `store`, returning how many were added.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate name if the store rejects duplicates.
    pub fn add_from<I>(
        &self,
        vars: I,
        store: &mut VariableStore,
        validator: Option<&dyn ValidatesNames>,
    ) -> DomainResult<usize>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut added = 0;

        for (key, value) in vars {
            if !(self.filter)(&key) {
                continue;
            }

            let name = format!("{}{key}", self.prefix);
            if self.filter_invalid_names
                && let Some(validator) = validator
                && !validator.validate_name(&name).is_valid()
            {
                tracing::debug!(name, "skipping environment variable with invalid name");
                continue;
            }

            store.add(name, value)?;
            added += 1;
        }

        tracing::debug!(added, prefix = %self.prefix, "imported environment variables");
        Ok(added)
    }
}

impl Default for EnvironmentSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvironmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentSource")
            .field("prefix", &self.prefix)
            .field("filter_invalid_names", &self.filter_invalid_names)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stencil_application::RegexTransformer;
    use stencil_domain::{DomainError, Value};

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_prefix() {
        let mut store = VariableStore::new();
        let added = EnvironmentSource::new()
            .add_from(vars(&[("HOME", "/home/al")]), &mut store, None)
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(store.get("ENV_HOME"), Some(&Value::from("/home/al")));
    }

    #[test]
    fn test_filter_and_empty_prefix() {
        let mut store = VariableStore::new();
        EnvironmentSource::new()
            .with_prefix("")
            .with_filter(|key| key.starts_with("ALS_"))
            .add_from(
                vars(&[("ALS_NAME", "Als"), ("PATH", "/bin")]),
                &mut store,
                None,
            )
            .unwrap();

        assert_eq!(store.names(), vec!["ALS_NAME"]);
    }

    #[test]
    fn test_invalid_names_skipped_by_default() {
        let transformer = RegexTransformer::default();
        let mut store = VariableStore::new();
        let added = EnvironmentSource::new()
            .add_from(
                vars(&[("GOOD", "1"), ("BAD-NAME", "2"), ("ProgramFiles(x86)", "3")]),
                &mut store,
                Some(&transformer),
            )
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(store.names(), vec!["ENV_GOOD"]);
    }

    #[test]
    fn test_invalid_name_filter_can_be_disabled() {
        let transformer = RegexTransformer::default();
        let mut store = VariableStore::new();
        EnvironmentSource::new()
            .disable_invalid_name_filter()
            .add_from(vars(&[("BAD-NAME", "2")]), &mut store, Some(&transformer))
            .unwrap();

        assert!(store.contains("ENV_BAD-NAME"));
    }

    #[test]
    fn test_duplicate_reported() {
        let mut store = VariableStore::new();
        store.add("ENV_X", "already").unwrap();
        let err = EnvironmentSource::new()
            .add_from(vars(&[("X", "1")]), &mut store, None)
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateVariable("ENV_X".into()));
    }

    #[test]
    fn test_process_environment_is_read() {
        let mut store = VariableStore::new();
        let added = EnvironmentSource::new()
            .with_prefix("")
            .add_to(&mut store, None)
            .unwrap();
        assert_eq!(added, store.len());
        assert!(store.len() >= 1);
    }
}
