//! Variable store
//!
//! Holds the ordered set of name/value bindings consumed by the resolution
//! engine. Lookup is by key; insertion order is kept for enumeration only.

use indexmap::IndexMap;

use crate::error::{DomainError, DomainResult};
use crate::value::Value;

/// What happens when a name that is already bound is added again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InsertPolicy {
    /// Fail with [`DomainError::DuplicateVariable`].
    #[default]
    Reject,
    /// Discard the earlier binding; the later one wins.
    Overwrite,
}

/// Ordered mapping of variable names to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    bindings: IndexMap<String, Value>,
    policy: InsertPolicy,
}

impl VariableStore {
    /// Creates an empty store that rejects duplicate names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given insertion policy.
    #[must_use]
    pub fn with_policy(policy: InsertPolicy) -> Self {
        Self {
            bindings: IndexMap::new(),
            policy,
        }
    }

    /// Returns the active insertion policy.
    #[must_use]
    pub const fn policy(&self) -> InsertPolicy {
        self.policy
    }

    /// Changes the insertion policy for subsequent additions.
    pub fn set_policy(&mut self, policy: InsertPolicy) {
        self.policy = policy;
    }

    /// Binds `value` to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] for an empty name and
    /// [`DomainError::DuplicateVariable`] if the name is already bound under
    /// [`InsertPolicy::Reject`].
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Value>) -> DomainResult<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::InvalidArgument(
                "variable name cannot be empty".to_string(),
            ));
        }

        if self.bindings.contains_key(&name) {
            match self.policy {
                InsertPolicy::Reject => return Err(DomainError::DuplicateVariable(name)),
                InsertPolicy::Overwrite => {
                    self.bindings.shift_remove(&name);
                }
            }
        }

        self.bindings.insert(name, value.into());
        Ok(())
    }

    /// Adds every binding from `bindings`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by [`VariableStore::add`].
    pub fn extend<I, K, V>(&mut self, bindings: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in bindings {
            self.add(name, value)?;
        }
        Ok(())
    }

    /// Gets the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Returns true if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Iterates bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns all bound names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.bindings.keys().map(String::as_str).collect()
    }

    /// Read-only view of the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &IndexMap<String, Value> {
        &self.bindings
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
