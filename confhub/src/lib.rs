//! confhub facade.
//!
//! Depend on this crate via `cargo add confhub`. It bundles the internal crates
//! behind feature flags so downstream users can pull in only the store
//! backends, or the full loader.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use confhub_primitives as primitives;

/// Store backends (enabled by `stores` feature).
#[cfg(feature = "stores")]
pub use confhub_stores as stores;

/// Config loader and include resolution (enabled by `loader` feature).
#[cfg(feature = "loader")]
pub use confhub_loader as loader;

#[cfg(feature = "loader")]
pub use confhub_loader::{
    AppAndLoggerConfig, ConfigLoader, LoadError, LoadResult, load_app_and_logger_config,
    load_app_and_logger_config_with,
};
#[cfg(feature = "stores")]
pub use confhub_stores::{BackendKind, StoreBackend, StoreError, select_backend};
pub use confhub_primitives::{ConfigDocument, TextTransform, deep_merge};
