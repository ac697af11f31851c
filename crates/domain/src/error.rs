//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while populating a variable store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A variable with the same name is already bound and the store rejects duplicates.
    #[error("variable already added: {0}")]
    DuplicateVariable(String),

    /// A required argument is missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
