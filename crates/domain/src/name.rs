//! Variable name validation results

use std::fmt;

/// Outcome of checking a variable name against a transformer's syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidation {
    /// The name can be referenced by a placeholder.
    Valid,
    /// The name can never be referenced; carries the reason.
    Invalid(String),
}

impl NameValidation {
    /// Creates a failed validation with the given reason.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Returns true if the name passed validation.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

/// A variable name that failed validation, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNameProblem {
    /// The offending variable name.
    pub name: String,
    /// Why the name was rejected.
    pub message: String,
}

impl VariableNameProblem {
    /// Creates a new problem entry.
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for VariableNameProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable '{}': {}", self.name, self.message)
    }
}
