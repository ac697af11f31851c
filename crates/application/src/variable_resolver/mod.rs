//! Variable resolution module
//!
//! Provides placeholder matching and recursive resolution of `$(variable)`
//! syntax in strings.
//!
//! # Usage
//!
//! ```
//! use stencil_application::variable_resolver::ReplacerConfig;
//!
//! let mut config = ReplacerConfig::new();
//! config
//!     .add_variable("FirstName", "Al")?
//!     .add_variable("LastName", "Jones")?
//!     .add_variable("FullName", "$(FirstName) $(LastName)")?;
//!
//! let replacer = config.build()?;
//! assert_eq!(replacer.replace_variables("Hello $(FullName).")?, "Hello Al Jones.");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod commands;
pub mod config;
pub mod delimited;
pub mod engine;
pub mod path;
pub mod regex_transformer;
pub mod transformer;

pub use commands::{CommandInfo, available_commands, standard_commands};
pub use config::{
    NOT_FOUND_MARKER, NotFoundPolicy, NullFormat, ReplacerConfig, ValueFormatter, VariableLookup,
};
pub use delimited::DelimitedTransformer;
pub use engine::VariableReplacer;
pub use path::ResolutionPath;
pub use regex_transformer::{Placeholder, RegexTransformer, RegexTransformerBuilder};
pub use transformer::{
    CommandProcessor, NameResolver, Transformer, ValidatesNames, identity_commands,
};
