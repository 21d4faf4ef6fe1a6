//! Config document model.

use serde_yaml::{Mapping, Value};

use crate::{Error, Result};

/// Parsed configuration tree: an insertion-ordered mapping whose values are
/// scalars, nested mappings, or sequences.
pub type ConfigDocument = Mapping;

/// Reserved top-level key holding include directives.
pub const INCLUDES_KEY: &str = "includes";

/// Converts a parsed YAML value into a [`ConfigDocument`].
///
/// An empty document (`null`) becomes an empty mapping.
///
/// # Errors
///
/// Returns [`Error::NotAMapping`] when the root is a scalar or a sequence.
pub fn document_from_value(value: Value) -> Result<ConfigDocument> {
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(Error::NotAMapping {
            found: kind_of(&other),
        }),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_becomes_empty_document() {
        let doc = document_from_value(Value::Null).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn rejects_sequence_root() {
        let value: Value = serde_yaml::from_str("- a\n- b\n").unwrap();
        let err = document_from_value(value).expect_err("sequence root");
        assert!(matches!(err, Error::NotAMapping { found: "sequence" }));
    }
}
