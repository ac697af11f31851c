//! Symmetric-delimiter transformer
//!
//! Placeholders are written `%NAME%`; a doubled delimiter `%%` produces a
//! literal `%`. Commands and name validation are not supported.

use super::transformer::{NameResolver, Transformer};
use crate::error::ApplicationResult;

/// Default delimiter character.
pub const DEFAULT_DELIMITER: char = '%';

/// Transformer for placeholders enclosed by the same character on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedTransformer {
    delimiter: char,
}

impl DelimitedTransformer {
    /// Creates a transformer using `delimiter` on both sides of a name.
    #[must_use]
    pub const fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Returns the delimiter character.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl Default for DelimitedTransformer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Transformer for DelimitedTransformer {
    fn transform(
        &self,
        source: &str,
        resolver: &mut dyn NameResolver,
    ) -> ApplicationResult<String> {
        let mut result = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(open) = rest.find(self.delimiter) {
            result.push_str(&rest[..open]);
            let after_open = &rest[open + self.delimiter.len_utf8()..];

            let Some(close) = after_open.find(self.delimiter) else {
                // Unclosed: keep the remainder verbatim
                result.push_str(&rest[open..]);
                return Ok(result);
            };

            let name = &after_open[..close];
            if name.is_empty() {
                result.push(self.delimiter);
            } else {
                result.push_str(&resolver.resolve(name)?);
            }
            rest = &after_open[close + self.delimiter.len_utf8()..];
        }

        result.push_str(rest);
        Ok(result)
    }

    fn description(&self) -> String {
        format!(
            "delimited transformer for {0}NAME{0}",
            self.delimiter
        )
    }
}
