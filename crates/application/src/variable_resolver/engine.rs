//! Variable replacement engine
//!
//! Resolves placeholders recursively: a bound value may itself contain
//! placeholders, which are expanded with the same resolver before the
//! result is substituted.

use std::sync::Arc;

use indexmap::IndexMap;
use stencil_domain::{Value, VariableStore};

use super::config::{NotFoundPolicy, ReplacerConfig, ValueFormatter, VariableLookup};
use super::path::ResolutionPath;
use super::transformer::{NameResolver, Transformer};
use crate::error::ApplicationResult;

/// An immutable, configured placeholder replacer.
///
/// Safe to share between threads: every call to
/// [`VariableReplacer::replace_variables`] uses its own resolution path.
#[derive(Debug, Clone)]
pub struct VariableReplacer {
    variables: VariableStore,
    transformer: Arc<dyn Transformer>,
    formatter: ValueFormatter,
    not_found: NotFoundPolicy,
    lookup: VariableLookup,
    max_depth: usize,
}

impl VariableReplacer {
    pub(crate) fn new(
        variables: VariableStore,
        transformer: Arc<dyn Transformer>,
        formatter: ValueFormatter,
        not_found: NotFoundPolicy,
        lookup: VariableLookup,
        max_depth: usize,
    ) -> Self {
        Self {
            variables,
            transformer,
            formatter,
            not_found,
            lookup,
            max_depth,
        }
    }

    /// Replaces every placeholder in `source`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::CyclicDependency`] when a variable
    /// refers back to itself, [`crate::ApplicationError::ResolutionTooDeep`]
    /// when nesting exceeds the configured depth,
    /// [`crate::ApplicationError::VariableNotFound`] when the not-found policy
    /// fails, and [`crate::ApplicationError::MatchTimeout`] when matching
    /// exceeds its budget.
    pub fn replace_variables(&self, source: &str) -> ApplicationResult<String> {
        tracing::debug!(len = source.len(), "replacing variables");

        let mut resolver = Resolver {
            replacer: self,
            path: ResolutionPath::with_max_depth(self.max_depth),
        };
        let result = self.transformer.transform(source, &mut resolver);

        if let Err(e) = &result {
            tracing::debug!(error = %e, "variable replacement failed");
        }
        result
    }

    /// Read-only view of the bindings.
    #[must_use]
    pub const fn variables(&self) -> &IndexMap<String, Value> {
        self.variables.as_map()
    }

    /// Returns the active transformer.
    #[must_use]
    pub fn transformer(&self) -> &dyn Transformer {
        self.transformer.as_ref()
    }

    /// Returns a configuration equivalent to this replacer, with its own copy
    /// of the bindings.
    #[must_use]
    pub fn config(&self) -> ReplacerConfig {
        ReplacerConfig {
            variables: self.variables.clone(),
            transformer: Some(Arc::clone(&self.transformer)),
            formatter: Some(self.formatter.clone()),
            not_found: self.not_found.clone(),
            lookup: self.lookup.clone(),
            max_depth: self.max_depth,
        }
    }

    /// Builds a new replacer from a copy of this one, further configured by `configure`.
    ///
    /// The original replacer is never affected.
    ///
    /// # Errors
    ///
    /// Propagates errors from `configure` and from [`ReplacerConfig::build`].
    pub fn clone_and_configure<F>(&self, configure: F) -> ApplicationResult<Self>
    where
        F: FnOnce(ReplacerConfig) -> ApplicationResult<ReplacerConfig>,
    {
        configure(self.config())?.build()
    }
}

/// Per-call resolver closed over the replacer and the call's resolution path.
struct Resolver<'a> {
    replacer: &'a VariableReplacer,
    path: ResolutionPath,
}

impl NameResolver for Resolver<'_> {
    fn resolve(&mut self, name: &str) -> ApplicationResult<String> {
        let replacer = self.replacer;

        let Some((key, value)) = replacer.lookup.find(&replacer.variables, name) else {
            tracing::trace!(name, "variable not found");
            return replacer.not_found.apply(name);
        };

        let formatted = replacer.formatter.format(&value);

        // Track the bound key so differently spelled references still meet.
        self.path.push(&key)?;
        tracing::trace!(
            name = %key,
            kind = value.kind(),
            depth = self.path.depth(),
            "expanding variable"
        );
        let expanded = replacer.transformer.transform(&formatted, self);
        self.path.pop();

        expanded
    }
}
