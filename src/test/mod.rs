
use crate::node::NodeId;
use crate::tree::Tree;

/// Links `0..n` as a list of right children, the shape ascending inserts give a plain BST. Built
/// directly so that long lists don't cost a quadratic number of inserts. Heights are left at 1.
pub(crate) fn right_spine(n: i64) -> Tree {
    let mut tree = Tree::new();
    let mut parent: Option<NodeId> = None;
    for value in 0..n {
        let id = tree.nodes.alloc(value);
        match parent {
            Some(parent) => tree.nodes[parent].right = Some(id),
            None => tree.root = Some(id),
        }
        parent = Some(id);
    }
    tree
}
