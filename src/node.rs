//! Nodes and the arena that owns them.
//!
//! Trees never hold references to each other's nodes. A parent refers to its children by
//! [`NodeId`], and the `Arena` maps ids back to nodes. Ids are handed out in increasing order
//! and are never reused by the same arena, not even after a clear, so a renderer can key its
//! visual elements by id without worrying about stale matches.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// The key type stored in the trees.
pub type Value = i64;

/// A stable handle to a node of one tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The raw integer behind this id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single tree node.
///
/// `x` and `y` are written by [`layout`](crate::layout::layout) and are only meaningful after
/// the most recent structural change has been laid out.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) value: Value,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) x: f64,
    pub(crate) y: f64,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
}

impl Node {
    fn new(id: NodeId, value: Value) -> Self {
        Self {
            id,
            value,
            left: None,
            right: None,
            x: 0.0,
            y: 0.0,
            height: 1,
        }
    }

    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The key stored in this node.
    pub fn value(&self) -> Value {
        self.value
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// The laid out `(x, y)` position.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Height of the subtree rooted here.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Nodes addressed by [`NodeId`].
///
/// Only linked nodes are stored, so memory follows the size of the tree rather than the number of
/// inserts. `next` is the id the next allocation gets and only ever grows.
#[derive(Clone, Debug)]
pub(crate) struct Arena {
    nodes: BTreeMap<NodeId, Node>,
    next: u32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub(crate) fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            next: 1,
        }
    }

    /// Allocates a fresh leaf holding `value`.
    pub(crate) fn alloc(&mut self, value: Value) -> NodeId {
        let id = NodeId(self.next);
        self.next = self.next.checked_add(1).expect("more than u32::MAX nodes allocated");
        self.nodes.insert(id, Node::new(id, value));
        id
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Unlinks a node from the arena. Its parent must already have dropped the id.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
            .unwrap_or_else(|| panic!("node {id} is not linked into this tree"))
    }
}

impl IndexMut<NodeId> for Arena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.get_mut(id)
            .unwrap_or_else(|| panic!("node {id} is not linked into this tree"))
    }
}
