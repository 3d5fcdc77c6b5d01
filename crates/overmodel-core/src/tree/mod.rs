//! The configuration tree
//!
//! A [`ConfigTree`] maps keys to either a nested tree or a scalar string.
//! Model files produce one tree each, the [`deep_merge`] folds them into a
//! single configuration, and the template resolver reads it back through
//! [`ConfigTree::value_at`].
//!
//! Leaf values live under an explicit `value` key: the flat model key
//! `host.name` is stored at `host.name.value`, and its metadata (keys such
//! as `host.name_metadata.unit`) sits in the sibling branch
//! `host.name_metadata`. [`ConfigTree::leaf`] reassembles both into a
//! [`Leaf`].

mod key;
mod merge;

pub use key::expand_key;
pub use merge::deep_merge;

use std::collections::BTreeMap;

use serde::Serialize;

/// Key under which a leaf's value is stored.
pub const VALUE_KEY: &str = "value";

/// Suffix of the sibling key holding a leaf's metadata.
pub const METADATA_SUFFIX: &str = "_metadata";

/// A node of the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigNode {
    Scalar(String),
    Tree(ConfigTree),
}

impl ConfigNode {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&ConfigTree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::Scalar(_) => None,
        }
    }
}

impl From<ConfigTree> for ConfigNode {
    fn from(tree: ConfigTree) -> Self {
        Self::Tree(tree)
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for ConfigNode {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

/// A nested mapping of string keys to [`ConfigNode`]s.
///
/// Keys are kept sorted so serialized output is stable; lookups never
/// depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigTree {
    entries: BTreeMap<String, ConfigNode>,
}

/// A resolved leaf: its value and the metadata recorded next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub value: String,
    pub metadata: BTreeMap<String, String>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigNode> {
        self.entries.get_mut(key)
    }

    /// Insert a node, replacing whatever the key held before.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<ConfigNode>) {
        self.entries.insert(key.into(), node.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigNode)> {
        self.entries.iter()
    }

    /// Walk a dotted path level by level.
    ///
    /// Returns `None` as soon as a segment is missing or a scalar is hit
    /// before the path ends.
    pub fn node_at(&self, path: &str) -> Option<&ConfigNode> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut node = self.entries.get(first)?;
        for segment in segments {
            node = node.as_tree()?.entries.get(segment)?;
        }
        Some(node)
    }

    /// The scalar stored at `<path>.value`, if any.
    pub fn value_at(&self, path: &str) -> Option<&str> {
        self.node_at(path)?
            .as_tree()?
            .get(VALUE_KEY)?
            .as_scalar()
    }

    /// The leaf at `path` together with its `<last>_metadata` siblings.
    pub fn leaf(&self, path: &str) -> Option<Leaf> {
        let value = self.value_at(path)?.to_string();

        let metadata_path = format!("{path}{METADATA_SUFFIX}");
        let metadata: BTreeMap<String, String> = self
            .node_at(&metadata_path)
            .and_then(ConfigNode::as_tree)
            .map(|tree| {
                tree.iter()
                    .filter_map(|(key, node)| Some((key.clone(), node.as_scalar()?.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Some(Leaf { value, metadata })
    }
}

impl FromIterator<(String, ConfigNode)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (String, ConfigNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
