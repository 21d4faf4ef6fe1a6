//! Right-biased deep merge of config documents.

use std::mem;

use serde_yaml::Value;

use crate::{ConfigDocument, Error, Result};

/// Maximum mapping depth [`deep_merge`] will descend before failing.
pub const MAX_MERGE_DEPTH: usize = 128;

/// Merges `incoming` into `base`.
///
/// Keys only present in `base` are carried through in their original order.
/// For each key of `incoming`:
/// - a sequence is appended to `base`'s sequence at that key (treated as empty
///   when absent or not a sequence);
/// - a mapping is merged recursively when `base` also holds a mapping there;
/// - anything else replaces `base`'s value.
///
/// # Errors
///
/// Returns [`Error::MergeDepthExceeded`] when nested mappings go deeper than
/// [`MAX_MERGE_DEPTH`].
pub fn deep_merge(base: ConfigDocument, incoming: ConfigDocument) -> Result<ConfigDocument> {
    merge_at(base, incoming, 0)
}

fn merge_at(
    mut base: ConfigDocument,
    incoming: ConfigDocument,
    depth: usize,
) -> Result<ConfigDocument> {
    if depth >= MAX_MERGE_DEPTH {
        return Err(Error::MergeDepthExceeded {
            limit: MAX_MERGE_DEPTH,
        });
    }

    for (key, value) in incoming {
        let Some(slot) = base.get_mut(&key) else {
            base.insert(key, value);
            continue;
        };

        match (slot, value) {
            (Value::Sequence(prior), Value::Sequence(items)) => prior.extend(items),
            (Value::Mapping(prior), Value::Mapping(next)) => {
                let merged = merge_at(mem::take(prior), next, depth + 1)?;
                *prior = merged;
            }
            (slot, value) => *slot = value,
        }
    }

    Ok(base)
}
