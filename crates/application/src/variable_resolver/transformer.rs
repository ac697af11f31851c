//! Transformer abstraction
//!
//! A transformer finds placeholders in a string and replaces each one with
//! the text produced by a [`NameResolver`]. The only required capability is
//! [`Transformer::transform`]; name validation is optional.

use std::fmt;
use std::sync::Arc;

use stencil_domain::NameValidation;

use crate::error::ApplicationResult;

/// Resolves a variable name to its fully expanded text.
pub trait NameResolver {
    /// Returns the replacement text for `name`.
    ///
    /// # Errors
    ///
    /// Fails when the not-found policy fails, a cycle is detected, or a nested
    /// transform fails.
    fn resolve(&mut self, name: &str) -> ApplicationResult<String>;
}

impl<F> NameResolver for F
where
    F: FnMut(&str) -> ApplicationResult<String>,
{
    fn resolve(&mut self, name: &str) -> ApplicationResult<String> {
        self(name)
    }
}

/// Optional capability: reports whether a variable name can ever be matched.
pub trait ValidatesNames {
    /// Checks a single candidate name.
    fn validate_name(&self, name: &str) -> NameValidation;
}

/// Replaces placeholders in a source string.
pub trait Transformer: fmt::Debug + Send + Sync {
    /// Replaces every placeholder in `source` using `resolver`.
    ///
    /// # Errors
    ///
    /// Propagates resolver failures and matcher failures such as
    /// [`crate::ApplicationError::MatchTimeout`].
    fn transform(&self, source: &str, resolver: &mut dyn NameResolver) -> ApplicationResult<String>;

    /// Human-readable description used in error messages.
    fn description(&self) -> String;

    /// Returns the name validator if this transformer supports one.
    fn name_validator(&self) -> Option<&dyn ValidatesNames> {
        None
    }
}

/// Post-processes resolved text for a placeholder's command token.
///
/// Called with `(command, resolved_text)`.
pub type CommandProcessor = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// A command processor that returns the resolved text unchanged.
#[must_use]
pub fn identity_commands() -> CommandProcessor {
    Arc::new(|_command, value| value.to_string())
}
