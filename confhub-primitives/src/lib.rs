//! Core primitives shared by the confhub crates.
//!
//! Defines the [`ConfigDocument`] tree produced by parsing YAML, the
//! [`IncludeDirective`] read from a document's reserved `includes` field, the
//! right-biased [`deep_merge`] used to combine documents, and the
//! [`TextTransform`] hook applied to raw text before parsing.

#![warn(missing_docs, clippy::pedantic)]

mod document;
mod error;
mod include;
mod merge;
mod transform;

pub use document::{ConfigDocument, INCLUDES_KEY, document_from_value};
pub use error::{Error, Result};
pub use include::{IncludeDirective, take_includes};
pub use merge::{MAX_MERGE_DEPTH, deep_merge};
pub use transform::{PlaceholderTransform, ReplaceTransform, TextTransform};

/// Re-export of the YAML value model backing [`ConfigDocument`].
pub use serde_yaml::{Mapping, Value};
