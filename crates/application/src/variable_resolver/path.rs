//! Resolution path tracking for cycle detection
//!
//! One path exists per top-level replace call and is shared by the whole
//! recursive resolution tree.

use crate::error::{ApplicationError, ApplicationResult};

/// Default limit on nested expansion depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Ordered stack of variable names currently being expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPath {
    names: Vec<String>,
    max_depth: usize,
}

impl ResolutionPath {
    /// Creates an empty path limited to [`DEFAULT_MAX_DEPTH`] names.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Creates an empty path holding at most `max_depth` names.
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self {
            names: Vec::new(),
            max_depth,
        }
    }

    /// Returns the depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Enters `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::CyclicDependency`] if `name` is already on
    /// the path. The reported path runs from the first occurrence of `name`
    /// to the top of the stack, with `name` appended again.
    ///
    /// Returns [`ApplicationError::ResolutionTooDeep`] if the path already
    /// holds `max_depth` names.
    pub fn push(&mut self, name: &str) -> ApplicationResult<()> {
        if let Some(first) = self.names.iter().position(|n| n == name) {
            let mut path = self.names[first..].to_vec();
            path.push(name.to_string());
            return Err(ApplicationError::CyclicDependency { path });
        }

        if self.names.len() >= self.max_depth {
            return Err(ApplicationError::ResolutionTooDeep {
                name: name.to_string(),
                max_depth: self.max_depth,
            });
        }

        self.names.push(name.to_string());
        Ok(())
    }

    /// Leaves the innermost name.
    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    /// Returns the number of names being expanded.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.names.len()
    }

    /// Returns true when nothing is being expanded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the names from outermost to innermost.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for ResolutionPath {
    fn default() -> Self {
        Self::new()
    }
}
