//! Stencil Domain - Core binding types
//!
//! This crate defines the values, bindings and validation results the
//! placeholder resolution engine works with.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod name;
pub mod store;
pub mod value;

pub use error::{DomainError, DomainResult};
pub use name::{NameValidation, VariableNameProblem};
pub use store::{InsertPolicy, VariableStore};
pub use value::Value;
