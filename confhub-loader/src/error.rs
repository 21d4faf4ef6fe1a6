//! Error types for config loading.

use confhub_primitives::Error as DocumentError;
use confhub_stores::StoreError;
use thiserror::Error;

/// Result alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that abort a load. No partial document is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The store failed to supply a document.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Fetched text was not well-formed YAML.
    #[error("failed to parse `{document}`: {source}")]
    Parse {
        /// Name of the offending document.
        document: String,
        /// Parser error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but its root is not a mapping.
    #[error("invalid document `{document}`: {source}")]
    InvalidDocument {
        /// Name of the offending document.
        document: String,
        /// Underlying document error.
        #[source]
        source: DocumentError,
    },

    /// The document's `includes` field could not be interpreted.
    #[error("invalid includes in `{document}`: {source}")]
    InvalidInclude {
        /// Name of the document declaring the includes.
        document: String,
        /// Underlying directive error.
        #[source]
        source: DocumentError,
    },

    /// Merging an included document failed.
    #[error("failed to merge includes into `{document}`: {source}")]
    Merge {
        /// Name of the document being assembled.
        document: String,
        /// Underlying merge error.
        #[source]
        source: DocumentError,
    },
}

impl LoadError {
    /// Returns `true` when the failure is a missing document.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_not_found())
    }
}
