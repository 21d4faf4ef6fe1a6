//! Backend selection by mode string.

use std::sync::Arc;

use tracing::info;

use crate::consul::{ConsulConfig, ConsulStore};
use crate::local_file::LocalFileStore;
use crate::nacos::{NacosConfig, NacosStore};
use crate::settings;
use crate::traits::{BackendKind, StoreBackend, StoreResult};

/// Constructs the backend named by `mode`, reading its settings from the
/// process environment.
///
/// `"nacos"` selects [`NacosStore`], `"consul"` selects [`ConsulStore`], and
/// anything else (including `None`) selects [`LocalFileStore`] rooted at
/// `<working-directory>/config`.
///
/// # Errors
///
/// Fails with [`StoreError::Configuration`](crate::StoreError::Configuration)
/// when required settings are missing or invalid.
pub fn select_backend(mode: Option<&str>) -> StoreResult<Arc<dyn StoreBackend>> {
    select_backend_with(mode, settings::process_env)
}

/// Same as [`select_backend`], with settings read through `lookup`.
///
/// # Errors
///
/// Fails with [`StoreError::Configuration`](crate::StoreError::Configuration)
/// when required settings are missing or invalid.
pub fn select_backend_with<F>(mode: Option<&str>, lookup: F) -> StoreResult<Arc<dyn StoreBackend>>
where
    F: Fn(&str) -> Option<String>,
{
    let kind = BackendKind::from_mode(mode);
    info!(mode = mode.unwrap_or(""), backend = %kind, "selecting config store");

    let backend: Arc<dyn StoreBackend> = match kind {
        BackendKind::Nacos => Arc::new(NacosStore::new(NacosConfig::from_lookup(lookup)?)?),
        BackendKind::Consul => Arc::new(ConsulStore::new(ConsulConfig::from_lookup(lookup)?)?),
        BackendKind::LocalFile => Arc::new(LocalFileStore::from_current_dir()?),
    };
    Ok(backend)
}
