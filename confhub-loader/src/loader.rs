//! Parse, include resolution, and merge.

use std::fmt;
use std::sync::Arc;

use confhub_primitives::{
    ConfigDocument, TextTransform, Value, deep_merge, document_from_value, take_includes,
};
use confhub_stores::{BackendKind, StoreBackend};
use tracing::debug;

use crate::error::{LoadError, LoadResult};

/// Loads config documents through a bound [`StoreBackend`].
///
/// The loader holds no state besides the backend, so clones share the backend
/// and concurrent loads never observe each other.
#[derive(Clone)]
pub struct ConfigLoader {
    backend: Arc<dyn StoreBackend>,
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("backend", &self.backend.kind())
            .finish()
    }
}

impl ConfigLoader {
    /// Creates a loader bound to `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Returns the kind of the bound backend.
    #[must_use]
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Loads `name` and resolves its top-level `includes`.
    ///
    /// Each directive's `file` is fetched and parsed with the same
    /// `transform`, its `params` overlaid on top, and the result placed under
    /// the directive's `key`. That fragment is merged as the base beneath the
    /// loaded document, so the loaded document wins at colliding keys.
    /// Directives are applied in declaration order. Included documents keep
    /// their own `includes` field unresolved.
    ///
    /// # Errors
    ///
    /// Fails with the first store, parse, include, or merge error encountered
    /// for the document or any of its includes.
    pub async fn load(
        &self,
        name: &str,
        transform: Option<&dyn TextTransform>,
    ) -> LoadResult<ConfigDocument> {
        let mut config = self.load_document(name, transform).await?;

        let directives = take_includes(&mut config).map_err(|source| LoadError::InvalidInclude {
            document: name.to_owned(),
            source,
        })?;

        for directive in directives {
            debug!(
                document = name,
                file = directive.file(),
                key = directive.key(),
                "resolving include"
            );
            let included = self.load_document(directive.file(), transform).await?;
            let fragment = directive.into_fragment(included);
            config = deep_merge(fragment, config).map_err(|source| LoadError::Merge {
                document: name.to_owned(),
                source,
            })?;
        }

        Ok(config)
    }

    async fn load_document(
        &self,
        name: &str,
        transform: Option<&dyn TextTransform>,
    ) -> LoadResult<ConfigDocument> {
        debug!(backend = %self.backend.kind(), document = name, "fetching config");
        let raw = self.backend.load_file(name).await?;
        let text = match transform {
            Some(transform) => transform.apply(&raw),
            None => raw,
        };

        let value: Value = serde_yaml::from_str(&text).map_err(|source| LoadError::Parse {
            document: name.to_owned(),
            source,
        })?;

        document_from_value(value).map_err(|source| LoadError::InvalidDocument {
            document: name.to_owned(),
            source,
        })
    }
}
