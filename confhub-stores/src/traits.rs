//! Shared store backend trait and error types.

use std::fmt;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Result alias used by store backends.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type shared by store backend implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested key or path holds no value.
    #[error("config `{key}` not found")]
    NotFound {
        /// Key or path that was requested.
        key: String,
    },

    /// Local filesystem failure other than a missing file.
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Backend settings are missing or invalid.
    #[error("store not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// Transport-level failures (connect, timeout, protocol).
    #[error("store transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The store answered with an unexpected status or body.
    #[error("store response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl StoreError {
    /// Convenience constructor for missing keys.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for unexpected responses.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }

    /// Returns `true` when the store reported the key as absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Concrete store variant behind a [`StoreBackend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Files under a local root directory.
    LocalFile,
    /// Consul key-value store.
    Consul,
    /// Nacos configuration center.
    Nacos,
}

impl BackendKind {
    /// Maps a mode string onto a backend kind.
    ///
    /// `"nacos"` and `"consul"` select the remote stores; any other value,
    /// including `None`, selects [`BackendKind::LocalFile`].
    #[must_use]
    pub fn from_mode(mode: Option<&str>) -> Self {
        match mode {
            Some("nacos") => Self::Nacos,
            Some("consul") => Self::Consul,
            _ => Self::LocalFile,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LocalFile => "local-file",
            Self::Consul => "consul",
            Self::Nacos => "nacos",
        })
    }
}

/// Source of raw configuration text, keyed by name.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Returns which store variant this backend talks to.
    fn kind(&self) -> BackendKind;

    /// Fetches the raw text stored under `name`.
    ///
    /// Absent keys must surface as [`StoreError::NotFound`], distinct from
    /// transport failures.
    async fn load_file(&self, name: &str) -> StoreResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_strings_map_to_kinds() {
        assert_eq!(BackendKind::from_mode(Some("nacos")), BackendKind::Nacos);
        assert_eq!(BackendKind::from_mode(Some("consul")), BackendKind::Consul);
        assert_eq!(BackendKind::from_mode(Some("anything-else")), BackendKind::LocalFile);
        assert_eq!(BackendKind::from_mode(Some("Consul")), BackendKind::LocalFile);
        assert_eq!(BackendKind::from_mode(None), BackendKind::LocalFile);
    }

    #[test]
    fn not_found_is_distinguished() {
        assert!(StoreError::not_found("app.yaml").is_not_found());
        assert!(!StoreError::transport("refused").is_not_found());
    }
}
