//! Store backends that supply raw configuration text.
//!
//! Every backend implements the [`StoreBackend`](traits::StoreBackend) trait so
//! the loader never depends on a concrete store. [`select_backend`] picks one
//! from a mode string and reads its settings from the environment.

#![warn(missing_docs, clippy::pedantic)]

pub mod consul;
pub mod local_file;
pub mod nacos;
pub mod selector;
pub mod traits;

mod http_client;
mod settings;

pub use consul::{ConsulConfig, ConsulStore};
pub use local_file::LocalFileStore;
pub use nacos::{NacosConfig, NacosStore};
pub use selector::{select_backend, select_backend_with};
pub use traits::{BackendKind, StoreBackend, StoreError, StoreResult};
