//! Infrastructure error types

use std::io;
use std::path::PathBuf;

use stencil_domain::DomainError;

/// Errors raised while loading bindings from external sources.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Reading a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON conversion failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Adding a binding failed.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The file extension does not name a supported document format.
    #[error("unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Result type alias for infrastructure operations.
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
