//! Store backed by files under a local directory.

use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::traits::{BackendKind, StoreBackend, StoreError, StoreResult};

/// Directory, relative to the working directory, that holds config files.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Reads documents as UTF-8 files relative to a fixed root directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Creates a store rooted at `<working-directory>/config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the working directory cannot be resolved.
    pub fn from_current_dir() -> StoreResult<Self> {
        let cwd = env::current_dir().map_err(|source| StoreError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        Ok(Self::with_root(cwd.join(DEFAULT_CONFIG_DIR)))
    }

    /// Creates a store rooted at an explicit directory.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory documents are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `name` under the root; leading separators are dropped so absolute
    /// names stay inside the root.
    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name.trim_start_matches(['/', '\\']))
    }
}

#[async_trait]
impl StoreBackend for LocalFileStore {
    fn kind(&self) -> BackendKind {
        BackendKind::LocalFile
    }

    async fn load_file(&self, name: &str) -> StoreResult<String> {
        let path = self.resolve(name);
        debug!(path = %path.display(), "reading local config file");

        let read = fs::read_to_string(&path).await;
        read.map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::not_found(name),
            _ => StoreError::Io { path, source },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_root() -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("confhub-local-{}", Uuid::new_v4()));
        path
    }

    #[tokio::test]
    async fn reads_files_relative_to_root() {
        let root = temp_root();
        std::fs::create_dir_all(root.join("dev")).unwrap();
        std::fs::write(root.join("dev/app.yaml"), "name: svc\n").unwrap();

        let store = LocalFileStore::with_root(&root);
        assert_eq!(store.load_file("dev/app.yaml").await.unwrap(), "name: svc\n");
        assert_eq!(store.kind(), BackendKind::LocalFile);

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let store = LocalFileStore::with_root(temp_root());
        let err = store.load_file("absent.yaml").await.expect_err("missing file");
        assert!(matches!(err, StoreError::NotFound { ref key } if key == "absent.yaml"));
    }

    #[tokio::test]
    async fn directory_is_io_error() {
        let root = temp_root();
        std::fs::create_dir_all(root.join("nested")).unwrap();

        let store = LocalFileStore::with_root(&root);
        let err = store.load_file("nested").await.expect_err("directory");
        assert!(matches!(err, StoreError::Io { .. }));

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn empty_file_is_returned_as_is() {
        let root = temp_root();
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("empty.yaml"), "").unwrap();

        let store = LocalFileStore::with_root(&root);
        assert_eq!(store.load_file("empty.yaml").await.unwrap(), "");

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn absolute_names_stay_under_root() {
        let root = temp_root();
        let outside = temp_root();
        std::fs::create_dir_all(root.join("etc")).unwrap();
        std::fs::create_dir_all(&outside).unwrap();
        std::fs::write(root.join("etc/app.yaml"), "scope: inside\n").unwrap();
        std::fs::write(outside.join("secret.yaml"), "scope: outside\n").unwrap();

        let store = LocalFileStore::with_root(&root);
        assert_eq!(store.load_file("/etc/app.yaml").await.unwrap(), "scope: inside\n");

        let escaped = outside.join("secret.yaml");
        let err = store
            .load_file(&escaped.to_string_lossy())
            .await
            .expect_err("absolute path outside root");
        assert!(err.is_not_found());
        assert!(store.resolve(&escaped.to_string_lossy()).starts_with(&root));

        let _ = std::fs::remove_dir_all(root);
        let _ = std::fs::remove_dir_all(outside);
    }

    #[test]
    fn default_root_is_config_under_cwd() {
        let store = LocalFileStore::from_current_dir().unwrap();
        assert!(store.root().ends_with(DEFAULT_CONFIG_DIR));
    }
}
