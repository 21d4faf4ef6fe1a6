//! Include directives read from the reserved `includes` field.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::document::kind_of;
use crate::{ConfigDocument, Error, INCLUDES_KEY, Result};

/// Reference from one document to another, spliced in under `key`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct IncludeDirective {
    file: String,
    key: String,
    #[serde(default)]
    params: Option<Mapping>,
}

impl IncludeDirective {
    /// Creates a directive splicing `file` under `key` with no parameters.
    #[must_use]
    pub fn new(file: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            key: key.into(),
            params: None,
        }
    }

    /// Sets the parameters overlaid onto the included document.
    #[must_use]
    pub fn with_params(mut self, params: Mapping) -> Self {
        self.params = Some(params);
        self
    }

    /// Returns the name of the document to include.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the key the included document is placed under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the parameter overlay, if any.
    #[must_use]
    pub fn params(&self) -> Option<&Mapping> {
        self.params.as_ref()
    }

    /// Overlays the parameters onto `included` (parameters win, no deep
    /// merge) and wraps the result as `{ key: included }`.
    #[must_use]
    pub fn into_fragment(self, mut included: ConfigDocument) -> ConfigDocument {
        if let Some(params) = self.params {
            for (name, value) in params {
                included.insert(name, value);
            }
        }
        let mut fragment = Mapping::new();
        fragment.insert(Value::String(self.key), Value::Mapping(included));
        fragment
    }
}

/// Removes the `includes` field from `document` and returns its directives in
/// declaration order.
///
/// A single mapping is treated as a one-element sequence; a missing or `null`
/// field yields no directives.
///
/// # Errors
///
/// Returns [`Error::InvalidInclude`] when the field is neither a mapping nor a
/// sequence, or when an entry lacks a string `file`/`key` or carries
/// non-mapping `params`.
pub fn take_includes(document: &mut ConfigDocument) -> Result<Vec<IncludeDirective>> {
    let Some(raw) = document.shift_remove(INCLUDES_KEY) else {
        return Ok(Vec::new());
    };

    let entries = match raw {
        Value::Null => Vec::new(),
        Value::Sequence(items) => items,
        single @ Value::Mapping(_) => vec![single],
        other => {
            return Err(Error::invalid_include(
                0,
                format!(
                    "expected a mapping or a sequence of mappings, found {}",
                    kind_of(&other)
                ),
            ));
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_yaml::from_value(entry)
                .map_err(|err| Error::invalid_include(index, err.to_string()))
        })
        .collect()
}
