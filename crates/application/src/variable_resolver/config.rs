//! Replacer configuration
//!
//! [`ReplacerConfig`] collects bindings and policies. [`ReplacerConfig::build`]
//! validates it once and produces an immutable [`VariableReplacer`].

use std::fmt;
use std::sync::Arc;

use stencil_domain::{DomainResult, InsertPolicy, Value, VariableNameProblem, VariableStore};

use super::engine::VariableReplacer;
use super::path::DEFAULT_MAX_DEPTH;
use super::regex_transformer::RegexTransformer;
use super::transformer::{CommandProcessor, Transformer};
use crate::error::{ApplicationError, ApplicationResult};

/// Prefix of the marker substituted for unknown variables by default.
pub const NOT_FOUND_MARKER: &str = "NOTFOUND:";

type NotFoundFn = dyn Fn(&str) -> ApplicationResult<String> + Send + Sync;
type FormatFn = dyn Fn(&Value) -> String + Send + Sync;
type LookupFn = dyn Fn(&VariableStore, &str) -> Option<(String, Value)> + Send + Sync;

/// What to substitute when a placeholder names an unbound variable.
#[derive(Clone, Default)]
pub enum NotFoundPolicy {
    /// Substitute `NOTFOUND:<name>`.
    #[default]
    Marker,
    /// Fail the call with [`ApplicationError::VariableNotFound`].
    Fail,
    /// Produce the replacement, or an error, with a custom function.
    Custom(Arc<NotFoundFn>),
}

impl NotFoundPolicy {
    /// Creates a custom policy.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> ApplicationResult<String> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Applies the policy to an unbound `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::VariableNotFound`] under [`NotFoundPolicy::Fail`],
    /// or whatever a custom policy returns.
    pub fn apply(&self, name: &str) -> ApplicationResult<String> {
        match self {
            Self::Marker => Ok(format!("{NOT_FOUND_MARKER}{name}")),
            Self::Fail => Err(ApplicationError::VariableNotFound(name.to_string())),
            Self::Custom(f) => f(name),
        }
    }
}

impl fmt::Debug for NotFoundPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marker => f.write_str("Marker"),
            Self::Fail => f.write_str("Fail"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How the default formatter renders [`Value::Null`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NullFormat {
    /// Null renders as an empty string.
    #[default]
    Empty,
    /// Null renders as the literal text `null`.
    Literal,
}

/// Turns a bound value into text before nested placeholders are expanded.
#[derive(Clone)]
pub enum ValueFormatter {
    /// Generic string conversion with the given null rendering.
    Display(NullFormat),
    /// A custom formatting function.
    Custom(Arc<FormatFn>),
}

impl ValueFormatter {
    /// Creates a custom formatter.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Formats `value`.
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        match self {
            Self::Display(NullFormat::Empty) if value.is_null() => String::new(),
            Self::Display(_) => value.to_string(),
            Self::Custom(f) => f(value),
        }
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::Display(NullFormat::default())
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(null) => f.debug_tuple("Display").field(null).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How a placeholder name is looked up in the variable store.
#[derive(Clone, Default)]
pub enum VariableLookup {
    /// Exact, case-sensitive key lookup.
    #[default]
    Exact,
    /// Exact lookup first, then the first binding whose name matches ignoring ASCII case.
    CaseInsensitive,
    /// A custom lookup function returning the bound key and its value.
    Custom(Arc<LookupFn>),
}

impl VariableLookup {
    /// Creates a custom lookup.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&VariableStore, &str) -> Option<(String, Value)> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Looks `name` up in `store`, returning the bound key and its value.
    #[must_use]
    pub fn find(&self, store: &VariableStore, name: &str) -> Option<(String, Value)> {
        let exact = || {
            store
                .as_map()
                .get_key_value(name)
                .map(|(key, value)| (key.clone(), value.clone()))
        };

        match self {
            Self::Exact => exact(),
            Self::CaseInsensitive => exact().or_else(|| {
                store
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(key, value)| (key.to_string(), value.clone()))
            }),
            Self::Custom(f) => f(store, name),
        }
    }
}

impl fmt::Debug for VariableLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("Exact"),
            Self::CaseInsensitive => f.write_str("CaseInsensitive"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Everything needed to build a [`VariableReplacer`].
#[derive(Debug, Clone)]
pub struct ReplacerConfig {
    /// The bindings placeholders resolve against.
    pub variables: VariableStore,

    /// Finds and replaces placeholders. Required.
    pub transformer: Option<Arc<dyn Transformer>>,

    /// Renders bound values as text. Required.
    pub formatter: Option<ValueFormatter>,

    /// Behaviour for unbound names.
    pub not_found: NotFoundPolicy,

    /// How names are looked up.
    pub lookup: VariableLookup,

    /// Maximum number of nested expansions in one call.
    pub max_depth: usize,
}

impl Default for ReplacerConfig {
    fn default() -> Self {
        Self {
            variables: VariableStore::new(),
            transformer: Some(Arc::new(RegexTransformer::default())),
            formatter: Some(ValueFormatter::default()),
            not_found: NotFoundPolicy::default(),
            lookup: VariableLookup::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ReplacerConfig {
    /// Creates a configuration with the default transformer and formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to `name`.
    ///
    /// # Errors
    ///
    /// Fails immediately on a duplicate name under [`InsertPolicy::Reject`].
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> DomainResult<&mut Self> {
        self.variables.add(name, value)?;
        Ok(self)
    }

    /// Binds every pair in `variables`.
    ///
    /// # Errors
    ///
    /// Fails at the first duplicate name under [`InsertPolicy::Reject`].
    pub fn add_variables<I, K, V>(&mut self, variables: I) -> DomainResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.variables.extend(variables)?;
        Ok(self)
    }

    /// Uses `transformer` to find placeholders.
    #[must_use]
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    /// Uses the regex transformer with custom delimiters and commands.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidArgument`] for empty delimiters.
    pub fn with_default_transformer(
        self,
        prefix: &str,
        suffix: &str,
        commands: CommandProcessor,
    ) -> ApplicationResult<Self> {
        let transformer = RegexTransformer::builder()
            .prefix(prefix)
            .suffix(suffix)
            .commands(commands)
            .build()?;
        Ok(self.with_transformer(transformer))
    }

    /// Uses `formatter` to render values.
    #[must_use]
    pub fn with_value_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Uses `policy` for unbound names.
    #[must_use]
    pub fn when_variable_not_found(mut self, policy: NotFoundPolicy) -> Self {
        self.not_found = policy;
        self
    }

    /// Fails the call when a referenced variable is unbound.
    #[must_use]
    pub fn fail_if_variable_not_found(self) -> Self {
        self.when_variable_not_found(NotFoundPolicy::Fail)
    }

    /// Uses `lookup` to find bound values.
    #[must_use]
    pub fn with_lookup(mut self, lookup: VariableLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Limits how deeply variables may expand into other variables.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the policy for subsequently added duplicate names.
    #[must_use]
    pub fn with_insert_policy(mut self, policy: InsertPolicy) -> Self {
        self.variables.set_policy(policy);
        self
    }

    /// Validates the configuration and produces the replacer.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidArgument`] if the transformer or
    /// formatter is missing or `max_depth` is zero, and [`ApplicationError::InvalidVariableNames`]
    /// listing every bound name the transformer rejects.
    pub fn build(self) -> ApplicationResult<VariableReplacer> {
        let transformer = self.transformer.ok_or_else(|| {
            ApplicationError::InvalidArgument("a transformer is required".to_string())
        })?;
        let formatter = self.formatter.ok_or_else(|| {
            ApplicationError::InvalidArgument("a value formatter is required".to_string())
        })?;

        if self.max_depth == 0 {
            return Err(ApplicationError::InvalidArgument(
                "max_depth must be at least 1".to_string(),
            ));
        }

        validate_names(transformer.as_ref(), &self.variables)?;

        tracing::debug!(
            variables = self.variables.len(),
            transformer = %transformer.description(),
            "built variable replacer"
        );

        Ok(VariableReplacer::new(
            self.variables,
            transformer,
            formatter,
            self.not_found,
            self.lookup,
            self.max_depth,
        ))
    }
}

/// Checks every bound name against the transformer, collecting all failures.
fn validate_names(
    transformer: &dyn Transformer,
    variables: &VariableStore,
) -> ApplicationResult<()> {
    let Some(validator) = transformer.name_validator() else {
        return Ok(());
    };

    let problems: Vec<VariableNameProblem> = variables
        .names()
        .into_iter()
        .filter_map(|name| {
            validator
                .validate_name(name)
                .message()
                .map(|message| VariableNameProblem::new(name, message))
        })
        .collect();

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ApplicationError::InvalidVariableNames {
            transformer: transformer.description(),
            problems,
        })
    }
}
