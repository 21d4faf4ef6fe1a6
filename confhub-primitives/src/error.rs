//! Shared error definitions for confhub primitives.

use thiserror::Error;

/// Result alias used by primitive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while interpreting or combining config documents.
#[derive(Debug, Error)]
pub enum Error {
    /// The parsed root was not a mapping.
    #[error("document root must be a mapping, found {found}")]
    NotAMapping {
        /// Kind of YAML node found at the root.
        found: &'static str,
    },

    /// An entry of the `includes` field could not be interpreted.
    #[error("invalid include directive at index {index}: {reason}")]
    InvalidInclude {
        /// Position of the directive within the `includes` field.
        index: usize,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Merge recursion went deeper than [`MAX_MERGE_DEPTH`](crate::MAX_MERGE_DEPTH).
    #[error("merge exceeded maximum nesting depth of {limit}")]
    MergeDepthExceeded {
        /// Depth limit that was hit.
        limit: usize,
    },
}

impl Error {
    /// Convenience constructor for invalid include directives.
    #[must_use]
    pub fn invalid_include(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInclude {
            index,
            reason: reason.into(),
        }
    }
}
