//! Stencil Application - Placeholder resolution engine
//!
//! This crate defines:
//! - The transformer abstraction and its regex and delimited implementations
//! - Recursive variable resolution with cycle detection
//! - Replacer configuration and application-level error handling

pub mod error;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult};
pub use variable_resolver::{
    DelimitedTransformer, NotFoundPolicy, NullFormat, RegexTransformer, ReplacerConfig,
    Transformer, ValidatesNames, ValueFormatter, VariableLookup, VariableReplacer,
};
