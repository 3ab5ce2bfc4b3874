//! A self-balancing Binary Search Tree (specifically, an AVL tree).
//!
//! `insert` and `delete` follow the same walks as [`Bst`](crate::Bst) and emit the same steps.
//! On the way back up, every ancestor has its height recomputed and is rotated if one subtree
//! became two levels taller than the other. Each single rotation adds a `visit` step on the node
//! that ends up on top, so a renderer can highlight the pivot.
//!
//! See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
//!
//! # Examples
//!
//! ```
//! use treeviz::{Avl, SearchTree};
//!
//! let mut avl = Avl::new();
//! for value in [10, 20, 30] {
//!     avl.insert(value);
//! }
//!
//! // Ascending inserts would make a plain BST a linked list. Here 20 was rotated up.
//! let root = avl.tree().root_node().unwrap();
//! assert_eq!(root.value(), 20);
//! assert_eq!(root.height(), 2);
//! ```

use std::cmp::Ordering;

use crate::node::{NodeId, Value};
use crate::step::Step;
use crate::tree::{finish_delete, SearchTree, Tree};

/// A Binary Search Tree that keeps `|height(left) - height(right)| <= 1` at every node.
#[derive(Clone, Debug, Default)]
pub struct Avl {
    tree: Tree,
}

impl Avl {
    /// Generates a new, empty `Avl`.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    fn assert_invariants(&self) {
        if cfg!(debug_assertions) {
            assert!(self.tree.is_search_tree());
            assert!(self.tree.heights_are_consistent());
            assert!(self.tree.is_balanced());
        }
    }
}

impl SearchTree for Avl {
    fn tree(&self) -> &Tree {
        &self.tree
    }

    fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    fn insert(&mut self, value: Value) -> Vec<Step> {
        let mut steps = Vec::new();
        let root = self.tree.root;
        self.tree.root = Some(insert_at(&mut self.tree, root, None, value, &mut steps));

        self.assert_invariants();
        log::debug!("avl insert {value}: {} steps", steps.len());
        steps
    }

    fn delete(&mut self, value: Value) -> Vec<Step> {
        let mut steps = Vec::new();
        let root = self.tree.root;
        self.tree.root = self.tree.remove(root, value, &mut steps, &mut rebalance_after_delete);
        finish_delete(value, &mut steps);

        self.assert_invariants();
        log::debug!("avl delete {value}: {} steps", steps.len());
        steps
    }
}

/// Inserts `value` below `node` (whose parent is `parent`) and returns the subtree's new root.
fn insert_at(
    tree: &mut Tree,
    node: Option<NodeId>,
    parent: Option<NodeId>,
    value: Value,
    steps: &mut Vec<Step>,
) -> NodeId {
    let Some(id) = node else {
        let id = tree.nodes.alloc(value);
        steps.push(Step::Insert {
            node_id: id,
            value,
            parent_id: parent,
        });
        return id;
    };

    let current = &tree.nodes[id];
    steps.push(Step::visit(current));
    let (left, right) = (current.left, current.right);
    match value.cmp(&current.value) {
        Ordering::Less => {
            tree.nodes[id].left = Some(insert_at(tree, left, Some(id), value, steps));
        }
        Ordering::Greater => {
            tree.nodes[id].right = Some(insert_at(tree, right, Some(id), value, steps));
        }
        Ordering::Equal => {
            steps.push(Step::found(id, value));
            return id;
        }
    }

    tree.fix_height(id);

    // The new value sits below whichever child grew, so comparing against that child tells us
    // whether the imbalance is on the outside (single rotation) or the inside (double rotation).
    let node = &tree.nodes[id];
    match (tree.balance_factor(Some(id)), node.left, node.right) {
        (balance, Some(left), _) if balance > 1 => {
            if value > tree.nodes[left].value {
                tree.nodes[id].left = Some(rotate_left(tree, left, steps));
            }
            rotate_right(tree, id, steps)
        }
        (balance, _, Some(right)) if balance < -1 => {
            if value < tree.nodes[right].value {
                tree.nodes[id].right = Some(rotate_right(tree, right, steps));
            }
            rotate_left(tree, id, steps)
        }
        _ => id,
    }
}

/// Recomputes the height of `id` and rotates it if a delete left it unbalanced.
///
/// There is no inserted value to compare against here, so the case is picked from the balance
/// factor of the taller child instead: a child leaning the other way needs a double rotation.
fn rebalance_after_delete(tree: &mut Tree, id: NodeId, steps: &mut Vec<Step>) -> NodeId {
    tree.fix_height(id);

    let node = &tree.nodes[id];
    match (tree.balance_factor(Some(id)), node.left, node.right) {
        (balance, Some(left), _) if balance > 1 => {
            if tree.balance_factor(Some(left)) < 0 {
                tree.nodes[id].left = Some(rotate_left(tree, left, steps));
            }
            rotate_right(tree, id, steps)
        }
        (balance, _, Some(right)) if balance < -1 => {
            if tree.balance_factor(Some(right)) > 0 {
                tree.nodes[id].right = Some(rotate_right(tree, right, steps));
            }
            rotate_left(tree, id, steps)
        }
        _ => id,
    }
}

/// Rotate `id` to the right. This moves the left child up vertically and `id` down vertically.
/// Returns the new subtree root, or `id` itself when there is no left child to lift.
///
/// # Diagram
///
/// ```text
///      old_root                  new_root
///      /     \                   /     \
///  new_root   z    rotate ->    x    old_root
///   /  \                               /  \
///  x    y                             y    z
/// ```
fn rotate_right(tree: &mut Tree, id: NodeId, steps: &mut Vec<Step>) -> NodeId {
    let Some(pivot) = tree.nodes[id].left else {
        return id;
    };

    tree.nodes[id].left = tree.nodes[pivot].right;
    tree.nodes[pivot].right = Some(id);
    tree.fix_height(id);
    tree.fix_height(pivot);

    let new_root = &tree.nodes[pivot];
    log::trace!("rotated {} right, {} is on top", tree.nodes[id].value, new_root.value);
    steps.push(Step::visit(new_root));
    pivot
}

/// Mirror image of [`rotate_right`]: lifts the right child above `id`.
fn rotate_left(tree: &mut Tree, id: NodeId, steps: &mut Vec<Step>) -> NodeId {
    let Some(pivot) = tree.nodes[id].right else {
        return id;
    };

    tree.nodes[id].right = tree.nodes[pivot].left;
    tree.nodes[pivot].left = Some(id);
    tree.fix_height(id);
    tree.fix_height(pivot);

    let new_root = &tree.nodes[pivot];
    log::trace!("rotated {} left, {} is on top", tree.nodes[id].value, new_root.value);
    steps.push(Step::visit(new_root));
    pivot
}
