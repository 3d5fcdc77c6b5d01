//! Expansion of flat dotted keys into single-branch trees

use super::{ConfigTree, METADATA_SUFFIX, VALUE_KEY};
use crate::{Error, Result};

/// Expand a flat key such as `host.name` into a nested tree.
///
/// Keys are implicitly suffixed with `.value`, so `host.name = bob`
/// becomes `{host: {name: {value: bob}}}`. Keys containing `_metadata`
/// are stored as-is: `host.name_metadata.unit = ms` lands at
/// `{host: {name_metadata: {unit: ms}}}`.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] for an empty key or any key with a
/// zero-length segment (`a..b`, `.a`, `a.`).
pub fn expand_key(key: &str, value: &str) -> Result<ConfigTree> {
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(Error::InvalidKey {
            key: key.to_string(),
        });
    }

    let (last, parents) = if key.contains(METADATA_SUFFIX) {
        let Some((last, parents)) = segments.split_last() else {
            return Err(Error::InvalidKey {
                key: key.to_string(),
            });
        };
        (*last, parents)
    } else {
        (VALUE_KEY, segments.as_slice())
    };

    let mut tree = ConfigTree::new();
    tree.insert(last, value);
    for segment in parents.iter().rev() {
        let mut parent = ConfigTree::new();
        parent.insert(*segment, tree);
        tree = parent;
    }
    Ok(tree)
}
