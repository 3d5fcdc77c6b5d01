//! Deep merge of configuration trees

use super::{ConfigNode, ConfigTree};

/// Merge trees left to right into a new tree; later trees win.
///
/// Where both sides hold a nested tree the merge recurses. Any other
/// combination (scalar over scalar, scalar over tree, tree over scalar)
/// replaces the earlier node outright.
pub fn deep_merge<'a>(trees: impl IntoIterator<Item = &'a ConfigTree>) -> ConfigTree {
    let mut target = ConfigTree::new();
    for tree in trees {
        merge_into(&mut target, tree);
    }
    target
}

fn merge_into(base: &mut ConfigTree, other: &ConfigTree) {
    for (key, other_node) in other.iter() {
        if let (Some(ConfigNode::Tree(base_tree)), ConfigNode::Tree(other_tree)) =
            (base.get_mut(key), other_node)
        {
            merge_into(base_tree, other_tree);
            continue;
        }
        base.insert(key.clone(), other_node.clone());
    }
}
