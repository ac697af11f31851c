//! Regex-based placeholder transformer
//!
//! Matches placeholders of the form `PREFIX NAME [":" COMMAND] SUFFIX`,
//! `$(name)` and `$(name:trim)` with the default delimiters.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::{Regex, RegexBuilder};
use stencil_domain::NameValidation;

use super::transformer::{
    CommandProcessor, NameResolver, Transformer, ValidatesNames, identity_commands,
};
use crate::error::{ApplicationError, ApplicationResult};

/// Default placeholder prefix.
pub const DEFAULT_PREFIX: &str = "$(";

/// Default placeholder suffix.
pub const DEFAULT_SUFFIX: &str = ")";

/// Default time budget for matching placeholders in one string.
pub const DEFAULT_MATCH_BUDGET: Duration = Duration::from_secs(10);

/// Compiled size limit for placeholder patterns.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

#[allow(clippy::expect_used)]
static VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.]+$").expect("variable name pattern is valid"));

/// A placeholder found in a source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The referenced variable name.
    pub name: String,

    /// The optional command token after `:`.
    pub command: Option<String>,

    /// Byte range of the whole placeholder in the source.
    pub span: Range<usize>,
}

/// Builder for [`RegexTransformer`].
pub struct RegexTransformerBuilder {
    prefix: String,
    suffix: String,
    commands: CommandProcessor,
    match_budget: Duration,
}

impl RegexTransformerBuilder {
    /// Sets the placeholder prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the placeholder suffix.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sets the processor applied to placeholders carrying a command.
    #[must_use]
    pub fn commands(mut self, commands: CommandProcessor) -> Self {
        self.commands = commands;
        self
    }

    /// Sets the time budget for matching placeholders in one string.
    #[must_use]
    pub const fn match_budget(mut self, budget: Duration) -> Self {
        self.match_budget = budget;
        self
    }

    /// Compiles the placeholder pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidArgument`] if either delimiter is
    /// empty or the pattern cannot be compiled.
    pub fn build(self) -> ApplicationResult<RegexTransformer> {
        if self.prefix.is_empty() {
            return Err(ApplicationError::InvalidArgument(
                "placeholder prefix cannot be empty".to_string(),
            ));
        }
        if self.suffix.is_empty() {
            return Err(ApplicationError::InvalidArgument(
                "placeholder suffix cannot be empty".to_string(),
            ));
        }

        let pattern = RegexBuilder::new(&format!(
            r"{}([\w.]+)(?::([\w-]+))?{}",
            regex::escape(&self.prefix),
            regex::escape(&self.suffix)
        ))
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| ApplicationError::InvalidArgument(format!("placeholder pattern: {e}")))?;

        Ok(RegexTransformer {
            prefix: self.prefix,
            suffix: self.suffix,
            pattern,
            commands: self.commands,
            match_budget: self.match_budget,
        })
    }
}

impl Default for RegexTransformerBuilder {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            commands: identity_commands(),
            match_budget: DEFAULT_MATCH_BUDGET,
        }
    }
}

/// The default transformer: delimited placeholders matched with a regex.
#[derive(Clone)]
pub struct RegexTransformer {
    prefix: String,
    suffix: String,
    pattern: Regex,
    commands: CommandProcessor,
    match_budget: Duration,
}

impl RegexTransformer {
    /// Returns a builder starting from the default delimiters.
    #[must_use]
    pub fn builder() -> RegexTransformerBuilder {
        RegexTransformerBuilder::default()
    }

    /// Returns the placeholder prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the placeholder suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the matching budget.
    #[must_use]
    pub const fn match_budget(&self) -> Duration {
        self.match_budget
    }

    /// Finds every placeholder in `source`, left to right, without overlap.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MatchTimeout`] once the time spent matching
    /// reaches the budget.
    pub fn find_placeholders(&self, source: &str) -> ApplicationResult<Vec<Placeholder>> {
        let mut found = Vec::new();
        let mut spent = Duration::ZERO;
        let mut matches = self.pattern.captures_iter(source);

        loop {
            let started = Instant::now();
            let next = matches.next();
            spent += started.elapsed();

            if spent >= self.match_budget {
                return Err(ApplicationError::MatchTimeout {
                    budget: self.match_budget,
                });
            }

            let Some(captures) = next else {
                break;
            };
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            found.push(Placeholder {
                name: name.as_str().to_string(),
                command: captures.get(2).map(|m| m.as_str().to_string()),
                span: whole.range(),
            });
        }

        Ok(found)
    }

    /// Returns true if `source` contains at least one placeholder.
    #[must_use]
    pub fn has_placeholders(&self, source: &str) -> bool {
        self.pattern.is_match(source)
    }

    /// Extracts the referenced variable names in order of appearance.
    ///
    /// # Errors
    ///
    /// See [`RegexTransformer::find_placeholders`].
    pub fn variable_names(&self, source: &str) -> ApplicationResult<Vec<String>> {
        Ok(self
            .find_placeholders(source)?
            .into_iter()
            .map(|p| p.name)
            .collect())
    }
}

impl Default for RegexTransformer {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            pattern: DEFAULT_PATTERN.clone(),
            commands: identity_commands(),
            match_budget: DEFAULT_MATCH_BUDGET,
        }
    }
}

#[allow(clippy::expect_used)]
static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\(([\w.]+)(?::([\w-]+))?\)").expect("default placeholder pattern is valid")
});

impl fmt::Debug for RegexTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexTransformer")
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("pattern", &self.pattern.as_str())
            .field("match_budget", &self.match_budget)
            .finish_non_exhaustive()
    }
}

impl Transformer for RegexTransformer {
    fn transform(
        &self,
        source: &str,
        resolver: &mut dyn NameResolver,
    ) -> ApplicationResult<String> {
        let placeholders = self.find_placeholders(source)?;

        if placeholders.is_empty() {
            return Ok(source.to_string());
        }

        let mut result = String::with_capacity(source.len());
        let mut last_end = 0;

        for placeholder in &placeholders {
            // Append text before this placeholder
            result.push_str(&source[last_end..placeholder.span.start]);

            let resolved = resolver.resolve(&placeholder.name)?;
            match &placeholder.command {
                Some(command) => result.push_str(&(self.commands)(command, &resolved)),
                None => result.push_str(&resolved),
            }

            last_end = placeholder.span.end;
        }

        result.push_str(&source[last_end..]);
        Ok(result)
    }

    fn description(&self) -> String {
        format!("regex transformer for {}NAME{}", self.prefix, self.suffix)
    }

    fn name_validator(&self) -> Option<&dyn ValidatesNames> {
        Some(self)
    }
}

impl ValidatesNames for RegexTransformer {
    fn validate_name(&self, name: &str) -> NameValidation {
        if name.is_empty() {
            NameValidation::invalid("variable names cannot be empty")
        } else if VALID_NAME.is_match(name) {
            NameValidation::Valid
        } else {
            NameValidation::invalid("variable names may only contain word characters and dots")
        }
    }
}
