//! The node structure shared by both variants and the operations that don't depend on balancing.
//!
//! [`Tree`] owns the nodes and answers read-only questions (search, min/max, traversals). The
//! [`SearchTree`] trait is what [`Bst`](crate::Bst) and [`Avl`](crate::Avl) implement: they only
//! differ in how `insert` and `delete` reshape the tree, so everything else is provided.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::node::{Arena, Node, NodeId, Value};
use crate::step::{visited_path, Step};

/// The three depth-first traversal orders.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Left subtree, node, right subtree.
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InOrder => "inorder",
            Self::PreOrder => "preorder",
            Self::PostOrder => "postorder",
        })
    }
}

impl FromStr for Order {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inorder" => Ok(Self::InOrder),
            "preorder" => Ok(Self::PreOrder),
            "postorder" => Ok(Self::PostOrder),
            _ => Err(crate::Error::InvalidCommand(format!(
                "unknown traversal `{s}`"
            ))),
        }
    }
}

/// Nodes plus the id of the root.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    pub(crate) nodes: Arena,
    pub(crate) root: Option<NodeId>,
}

/// Work left on the traversal stack.
#[derive(Copy, Clone)]
enum Pending {
    /// Not reached yet: emits its `visit` and schedules its subtree.
    Reach(NodeId),
    /// Reached earlier, emits its `found` now.
    Process(NodeId),
}

impl Tree {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// The id of the root node.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Looks up a node that is currently linked into this tree.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// The root node itself.
    pub fn root_node(&self) -> Option<&Node> {
        self.root.map(|id| &self.nodes[id])
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node. Ids handed out before the clear are never handed out again.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Height of the whole tree, 0 when empty.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// All nodes, smallest key first.
    pub fn in_order(&self) -> Vec<&Node> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes[id].left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            let node = &self.nodes[id];
            out.push(node);
            current = node.right;
        }
        out
    }

    /// All keys, ascending.
    pub fn values(&self) -> Vec<Value> {
        self.in_order().into_iter().map(Node::value).collect()
    }

    /// Whether a node holds `value`. Does not record any steps.
    pub fn contains(&self, value: Value) -> bool {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => return true,
                Ordering::Greater => node.right,
            };
        }
        false
    }

    /// Walks towards `value`, visiting each node on the way. Ends with `found` on a match or
    /// `notFound` carrying the visited path.
    pub fn search(&self, value: Value) -> Vec<Step> {
        let mut steps = Vec::new();
        let mut path = Vec::new();
        let mut current = self.root;

        while let Some(id) = current {
            let node = &self.nodes[id];
            path.push(id);
            steps.push(Step::visit(node));
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => {
                    steps.push(Step::found(id, value));
                    return steps;
                }
                Ordering::Greater => node.right,
            };
        }

        steps.push(Step::NotFound { value, path });
        steps
    }

    /// Walks left from the root. The last node visited is reported as `found`.
    pub fn find_min(&self) -> Vec<Step> {
        self.walk_to_edge(|node| node.left)
    }

    /// Walks right from the root. The last node visited is reported as `found`.
    pub fn find_max(&self) -> Vec<Step> {
        self.walk_to_edge(|node| node.right)
    }

    fn walk_to_edge(&self, next: impl Fn(&Node) -> Option<NodeId>) -> Vec<Step> {
        let mut steps = Vec::new();
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            steps.push(Step::visit(node));
            current = next(node);
            if current.is_none() {
                steps.push(Step::found(id, node.value));
            }
        }
        steps
    }

    /// A full traversal. Every node contributes a `visit` when it is reached and a `found` at the
    /// point the given order processes it.
    pub fn traverse(&self, order: Order) -> Vec<Step> {
        let mut steps = Vec::with_capacity(self.len() * 2);
        let mut stack: Vec<Pending> = self.root.map(Pending::Reach).into_iter().collect();

        // Children are pushed right first so the left subtree comes off the stack first.
        while let Some(pending) = stack.pop() {
            let id = match pending {
                Pending::Reach(id) => id,
                Pending::Process(id) => {
                    steps.push(Step::found(id, self.nodes[id].value));
                    continue;
                }
            };
            let node = &self.nodes[id];
            steps.push(Step::visit(node));
            let (left, right) = (node.left.map(Pending::Reach), node.right.map(Pending::Reach));
            let next = match order {
                Order::InOrder => [right, Some(Pending::Process(id)), left],
                Order::PreOrder => {
                    steps.push(Step::found(id, node.value));
                    [right, left, None]
                }
                Order::PostOrder => [Some(Pending::Process(id)), right, left],
            };
            stack.extend(next.into_iter().flatten());
        }
        steps
    }

    pub(crate) fn height_of(&self, node: Option<NodeId>) -> usize {
        node.map_or(0, |id| self.nodes[id].height)
    }

    /// Adjusts the height of `id` to be the max of its children's heights + 1.
    pub(crate) fn fix_height(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let height = self.height_of(node.left).max(self.height_of(node.right)) + 1;
        self.nodes[id].height = height;
    }

    /// `height(left) - height(right)`, 0 for a missing node.
    pub(crate) fn balance_factor(&self, node: Option<NodeId>) -> isize {
        let Some(id) = node else {
            return 0;
        };
        let node = &self.nodes[id];
        self.height_of(node.left) as isize - self.height_of(node.right) as isize
    }

    /// Removes `value` from the subtree rooted at `node` and returns the subtree's new root.
    ///
    /// A node with two children takes the value of its in-order successor, which is then removed
    /// from the right subtree instead. On the way back up every surviving ancestor is handed to
    /// `fix_up`, which returns the root of the (possibly rotated) subtree.
    pub(crate) fn remove<F>(
        &mut self,
        node: Option<NodeId>,
        value: Value,
        steps: &mut Vec<Step>,
        fix_up: &mut F,
    ) -> Option<NodeId>
    where
        F: FnMut(&mut Tree, NodeId, &mut Vec<Step>) -> NodeId,
    {
        // Every ancestor of the removed node, and whether we went left from it.
        let mut path: Vec<(NodeId, bool)> = Vec::new();
        let mut target = value;
        let mut current = node;

        let mut replacement = None;
        while let Some(id) = current {
            let node = &self.nodes[id];
            steps.push(Step::visit(node));
            let (left, right) = (node.left, node.right);

            match target.cmp(&node.value) {
                Ordering::Less => {
                    path.push((id, true));
                    current = left;
                }
                Ordering::Greater => {
                    path.push((id, false));
                    current = right;
                }
                Ordering::Equal => {
                    steps.push(Step::found(id, target));
                    steps.push(Step::Delete {
                        node_id: id,
                        value: target,
                    });
                    match (left, right) {
                        (None, None) => {
                            self.nodes.remove(id);
                        }
                        (Some(child), None) | (None, Some(child)) => {
                            self.nodes.remove(id);
                            replacement = Some(fix_up(self, child, steps));
                        }
                        (Some(_), Some(right)) => {
                            target = self.nodes[self.leftmost(right)].value;
                            self.nodes[id].value = target;
                            path.push((id, false));
                            current = Some(right);
                            continue;
                        }
                    }
                    break;
                }
            }
        }

        let mut subtree = replacement;
        for (id, went_left) in path.into_iter().rev() {
            if went_left {
                self.nodes[id].left = subtree;
            } else {
                self.nodes[id].right = subtree;
            }
            subtree = Some(fix_up(self, id, steps));
        }
        subtree
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    /// Checks the ordering invariant: every key in a left subtree is smaller than its ancestor and
    /// every key in a right subtree is larger.
    pub fn is_search_tree(&self) -> bool {
        self.values().windows(2).all(|pair| pair[0] < pair[1])
    }

    /// Checks that every cached height equals `1 + max(child heights)`.
    pub fn heights_are_consistent(&self) -> bool {
        self.checked_height(self.root).is_some()
    }

    fn checked_height(&self, node: Option<NodeId>) -> Option<usize> {
        let Some(id) = node else {
            return Some(0);
        };
        let node = &self.nodes[id];
        let left = self.checked_height(node.left)?;
        let right = self.checked_height(node.right)?;
        let height = left.max(right) + 1;
        (node.height == height).then_some(height)
    }

    /// Checks the AVL invariant at every node. Relies on cached heights being consistent.
    pub fn is_balanced(&self) -> bool {
        self.in_order()
            .iter()
            .all(|node| self.balance_factor(Some(node.id)).abs() <= 1)
    }
}

/// Ends the trace of a delete that removed nothing with a `notFound`, like a search miss.
pub(crate) fn finish_delete(value: Value, steps: &mut Vec<Step>) {
    if !steps.iter().any(|step| matches!(step, Step::Delete { .. })) {
        let path = visited_path(steps);
        steps.push(Step::NotFound { value, path });
    }
}

/// A tree that records an animation trace for everything it does.
///
/// Implementors decide how `insert` and `delete` reshape the tree; the read operations only look
/// at the structure and are the same for every variant.
pub trait SearchTree {
    /// The underlying nodes.
    fn tree(&self) -> &Tree;

    /// Mutable access for layout and resets.
    fn tree_mut(&mut self) -> &mut Tree;

    /// Inserts `value`. Inserting a value that is already present changes nothing and reports it
    /// as `found`.
    fn insert(&mut self, value: Value) -> Vec<Step>;

    /// Deletes `value`. Deleting a value that is absent changes nothing and ends with `notFound`.
    fn delete(&mut self, value: Value) -> Vec<Step>;

    /// See [`Tree::search`].
    fn search(&self, value: Value) -> Vec<Step> {
        self.tree().search(value)
    }

    /// See [`Tree::find_min`].
    fn find_min(&self) -> Vec<Step> {
        self.tree().find_min()
    }

    /// See [`Tree::find_max`].
    fn find_max(&self) -> Vec<Step> {
        self.tree().find_max()
    }

    /// See [`Tree::traverse`].
    fn traverse(&self, order: Order) -> Vec<Step> {
        self.tree().traverse(order)
    }

    /// Empties the tree.
    fn clear(&mut self) {
        self.tree_mut().clear();
    }
}
