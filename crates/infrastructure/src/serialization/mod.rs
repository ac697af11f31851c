//! Parsing of binding documents.
//!
//! Both formats are parsed into a `serde_json::Value` tree so the same
//! flattening rules apply to JSON and YAML input.

mod document;

pub use document::*;
