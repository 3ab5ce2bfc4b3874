//! The plain, unbalanced Binary Search Tree.
//!
//! # Examples
//!
//! ```
//! use treeviz::{Bst, SearchTree, Step};
//!
//! let mut bst = Bst::new();
//!
//! // The first value becomes the root.
//! let steps = bst.insert(10);
//! assert!(matches!(steps[..], [Step::Insert { parent_id: None, .. }]));
//!
//! // Later values walk down from the root first.
//! let steps = bst.insert(5);
//! assert!(matches!(steps[..], [Step::Visit { value: 10, .. }, Step::Insert { value: 5, .. }]));
//!
//! // Inserting a value twice finds the existing node instead.
//! let steps = bst.insert(5);
//! assert!(matches!(steps.last(), Some(Step::Found { value: 5, .. })));
//! assert_eq!(bst.tree().values(), vec![5, 10]);
//! ```

use std::cmp::Ordering;

use crate::node::Value;
use crate::step::Step;
use crate::tree::{finish_delete, SearchTree, Tree};

/// A Binary Search Tree without any balancing. Its shape depends entirely on insertion order.
#[derive(Clone, Debug, Default)]
pub struct Bst {
    pub(crate) tree: Tree,
}

impl Bst {
    /// Generates a new, empty `Bst`.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }
}

impl SearchTree for Bst {
    fn tree(&self) -> &Tree {
        &self.tree
    }

    fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    fn insert(&mut self, value: Value) -> Vec<Step> {
        let mut steps = Vec::new();
        let Some(mut current) = self.tree.root else {
            let id = self.tree.nodes.alloc(value);
            self.tree.root = Some(id);
            steps.push(Step::Insert {
                node_id: id,
                value,
                parent_id: None,
            });
            return steps;
        };

        let mut path = Vec::new();
        loop {
            let node = &self.tree.nodes[current];
            steps.push(Step::visit(node));
            path.push(current);

            let (slot, go_left) = match value.cmp(&node.value) {
                Ordering::Less => (node.left, true),
                Ordering::Greater => (node.right, false),
                Ordering::Equal => {
                    steps.push(Step::found(current, value));
                    return steps;
                }
            };

            match slot {
                Some(next) => current = next,
                None => {
                    let id = self.tree.nodes.alloc(value);
                    let parent = &mut self.tree.nodes[current];
                    if go_left {
                        parent.left = Some(id);
                    } else {
                        parent.right = Some(id);
                    }
                    steps.push(Step::Insert {
                        node_id: id,
                        value,
                        parent_id: Some(current),
                    });
                    break;
                }
            }
        }

        // Only the ancestors of the new leaf can have grown.
        for id in path.into_iter().rev() {
            self.tree.fix_height(id);
        }

        if cfg!(debug_assertions) {
            assert!(self.tree.is_search_tree());
        }
        log::debug!("bst insert {value}: {} steps", steps.len());
        steps
    }

    fn delete(&mut self, value: Value) -> Vec<Step> {
        let mut steps = Vec::new();
        let root = self.tree.root;
        let mut fix_height = |tree: &mut Tree, id, _: &mut Vec<Step>| {
            tree.fix_height(id);
            id
        };
        self.tree.root = self.tree.remove(root, value, &mut steps, &mut fix_height);
        finish_delete(value, &mut steps);

        log::debug!("bst delete {value}: {} steps", steps.len());
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;

    fn bst_of(values: &[Value]) -> Bst {
        let mut bst = Bst::new();
        for value in values {
            bst.insert(*value);
        }
        bst
    }

    fn value_at(bst: &Bst, id: Option<NodeId>) -> Option<Value> {
        id.and_then(|id| bst.tree().node(id)).map(|n| n.value())
    }

    #[test]
    fn test_insert_shape() {
        let bst = bst_of(&[10, 5, 15]);
        let root = bst.tree().root_node().unwrap();

        assert_eq!(root.value(), 10);
        assert_eq!(value_at(&bst, root.left()), Some(5));
        assert_eq!(value_at(&bst, root.right()), Some(15));
    }

    #[test]
    fn test_insert_reports_parent() {
        let mut bst = bst_of(&[10, 5]);
        let root = bst.tree().root().unwrap();
        let five = bst.tree().node(root).unwrap().left().unwrap();

        let steps = bst.insert(7);
        let Some(Step::Insert {
            node_id,
            value: 7,
            parent_id,
        }) = steps.last().cloned()
        else {
            panic!("expected an insert step, got {steps:?}");
        };
        assert_eq!(parent_id, Some(five));
        assert_eq!(bst.tree().node(five).unwrap().right(), Some(node_id));
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_insert_duplicate_is_a_no_op() {
        let mut bst = bst_of(&[10, 5, 15]);
        let steps = bst.insert(15);

        assert!(matches!(
            steps[..],
            [
                Step::Visit { value: 10, .. },
                Step::Visit { value: 15, .. },
                Step::Found { value: 15, .. }
            ]
        ));
        assert_eq!(bst.tree().len(), 3);
    }

    #[test]
    fn test_delete_no_children() {
        let mut bst = bst_of(&[10, 5, 15]);
        let steps = bst.delete(5);

        assert!(matches!(
            steps[..],
            [
                Step::Visit { value: 10, .. },
                Step::Visit { value: 5, .. },
                Step::Found { value: 5, .. },
                Step::Delete { value: 5, .. }
            ]
        ));
        assert_eq!(bst.tree().root_node().unwrap().left(), None);
        assert_eq!(bst.tree().values(), vec![10, 15]);
    }

    #[test]
    fn test_delete_no_left_child() {
        let mut bst = bst_of(&[1, 2]);
        bst.delete(1);

        assert_eq!(bst.tree().root_node().map(|n| n.value()), Some(2));
        assert_eq!(bst.tree().len(), 1);
    }

    #[test]
    fn test_delete_no_right_child() {
        let mut bst = bst_of(&[2, 1]);
        bst.delete(2);

        assert_eq!(bst.tree().root_node().map(|n| n.value()), Some(1));
        assert_eq!(bst.tree().len(), 1);
    }

    #[test]
    fn test_delete_two_children_takes_the_successor() {
        let mut bst = bst_of(&[10, 5, 20, 15, 25, 17]);
        let root = bst.tree().root().unwrap();
        let twenty = bst.tree().node(root).unwrap().right().unwrap();
        let fifteen = bst.tree().node(twenty).unwrap().left().unwrap();

        let steps = bst.delete(10);

        // The root keeps its id but now holds 15, and 15's old node is the one unlinked.
        assert_eq!(bst.tree().root(), Some(root));
        assert_eq!(value_at(&bst, Some(root)), Some(15));
        assert!(bst.tree().node(fifteen).is_none());
        assert_eq!(value_at(&bst, bst.tree().node(twenty).unwrap().left()), Some(17));
        assert_eq!(bst.tree().values(), vec![5, 15, 17, 20, 25]);

        let deletes: Vec<_> = steps
            .iter()
            .filter_map(|step| match step {
                Step::Delete { node_id, value } => Some((*node_id, *value)),
                _ => None,
            })
            .collect();
        assert_eq!(deletes, vec![(root, 10), (fifteen, 15)]);
    }

    #[test]
    fn test_delete_absent_reports_not_found() {
        let mut bst = bst_of(&[10, 5]);
        let root = bst.tree().root().unwrap();
        let five = bst.tree().node(root).unwrap().left().unwrap();

        let steps = bst.delete(7);
        assert_eq!(
            steps.last(),
            Some(&Step::NotFound {
                value: 7,
                path: vec![root, five]
            })
        );
        assert_eq!(bst.tree().len(), 2);

        assert_eq!(
            Bst::new().delete(1),
            vec![Step::NotFound {
                value: 1,
                path: vec![]
            }]
        );
    }

    /// Assert the heights of the root, left child, and right child of a tree.
    macro_rules! assert_heights {
        ($bst:ident, $height:expr, $left_height:expr, $right_height:expr) => {{
            let tree = $bst.tree();
            match tree.root_node() {
                Some(n) => {
                    assert_eq!(n.height(), $height);
                    assert_eq!(tree.height_of(n.left()), $left_height);
                    assert_eq!(tree.height_of(n.right()), $right_height);
                }
                None => assert_eq!(0, $height),
            }
        }};
    }

    #[test]
    fn test_height() {
        let mut bst = Bst::new();
        assert_heights!(bst, 0, 0, 0);

        bst.insert(1);
        assert_heights!(bst, 1, 0, 0);

        // Insert a value to the right making it taller.
        bst.insert(2);
        assert_heights!(bst, 2, 0, 1);

        // A plain BST never rebalances so this keeps growing.
        bst.insert(3);
        assert_heights!(bst, 3, 0, 2);

        bst.insert(0);
        assert_heights!(bst, 3, 1, 2);

        bst.delete(2);
        assert_heights!(bst, 2, 1, 1);
        assert!(bst.tree().heights_are_consistent());
    }
}
