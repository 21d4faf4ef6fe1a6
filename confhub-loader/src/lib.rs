//! Store-agnostic config loading.
//!
//! [`ConfigLoader`] fetches a document through any
//! [`StoreBackend`](confhub_stores::StoreBackend), parses it as YAML, and
//! resolves the document's top-level `includes` directives by splicing each
//! included document under its target key.

#![warn(missing_docs, clippy::pedantic)]

mod composite;
mod error;
mod loader;

pub use composite::{
    AppAndLoggerConfig, load_app_and_logger_config, load_app_and_logger_config_with,
};
pub use error::{LoadError, LoadResult};
pub use loader::ConfigLoader;
