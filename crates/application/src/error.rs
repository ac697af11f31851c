//! Application error types

use std::time::Duration;

use stencil_domain::{DomainError, VariableNameProblem};
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A domain error occurred while populating bindings.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A required piece of configuration is missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more bound names can never be referenced by the active transformer.
    #[error("{}", invalid_names_message(transformer, problems))]
    InvalidVariableNames {
        /// Description of the transformer that rejected the names.
        transformer: String,
        /// Every offending name with its reason.
        problems: Vec<VariableNameProblem>,
    },

    /// A referenced variable has no binding and the not-found policy fails.
    #[error("variable '{0}' not found")]
    VariableNotFound(String),

    /// A variable refers back to itself, directly or through other variables.
    #[error("cyclic dependency detected on path: {}", path.join(" -> "))]
    CyclicDependency {
        /// Names in visitation order, with the repeated name at both ends.
        path: Vec<String>,
    },

    /// Nested expansion went deeper than the configured limit.
    #[error("expanding '{name}' exceeds the maximum resolution depth of {max_depth}")]
    ResolutionTooDeep {
        /// The variable that would have exceeded the limit.
        name: String,
        /// The configured limit.
        max_depth: usize,
    },

    /// Placeholder matching exceeded its time budget.
    #[error("placeholder matching exceeded its budget of {budget:?}")]
    MatchTimeout {
        /// The configured matching budget.
        budget: Duration,
    },
}

fn invalid_names_message(transformer: &str, problems: &[VariableNameProblem]) -> String {
    let mut message = format!("{transformer} cannot match the following variable names\n");
    for problem in problems {
        message.push('\n');
        message.push_str(&problem.to_string());
    }
    message
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cyclic_dependency_message() {
        let err = ApplicationError::CyclicDependency {
            path: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(err.to_string(), "cyclic dependency detected on path: A -> B -> A");
    }

    #[test]
    fn test_invalid_names_message_lists_every_problem() {
        let err = ApplicationError::InvalidVariableNames {
            transformer: "regex transformer".into(),
            problems: vec![
                VariableNameProblem::new("a b", "bad"),
                VariableNameProblem::new("c-d", "worse"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "regex transformer cannot match the following variable names\n\n\
             Variable 'a b': bad\n\
             Variable 'c-d': worse"
        );
    }

    #[test]
    fn test_domain_error_converts() {
        let err: ApplicationError = DomainError::DuplicateVariable("x".into()).into();
        assert_eq!(err.to_string(), "domain error: variable already added: x");
    }
}
