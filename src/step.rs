//! Animation steps.
//!
//! Every engine call returns its whole trace up front as a `Vec<Step>`. Nothing here knows about
//! timers; [`Playback`](crate::playback::Playback) (or any other replayer) walks the trace later.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeId, Value};

/// One observable event of a tree operation.
///
/// Serializes as an internally tagged object, e.g. `{"type":"visit","nodeId":3,"value":10}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    /// Arrived at a node. Also used to mark the pivot that ends up on top of a rotation.
    Visit {
        /// The node arrived at.
        node_id: NodeId,
        /// Its key.
        value: Value,
    },
    /// The node being looked for, or the point where a traversal processes a node.
    Found {
        /// The matching node.
        node_id: NodeId,
        /// Its key.
        value: Value,
    },
    /// The walk fell off the tree.
    NotFound {
        /// The key that was looked for.
        value: Value,
        /// Every visited id, in visit order.
        path: Vec<NodeId>,
    },
    /// A node was created.
    Insert {
        /// The new node.
        node_id: NodeId,
        /// Its key.
        value: Value,
        /// The node it hangs under, `None` for a new root.
        parent_id: Option<NodeId>,
    },
    /// The node holding `value` is being removed.
    Delete {
        /// The node losing its key.
        node_id: NodeId,
        /// The key being removed.
        value: Value,
    },
    /// The whole tree was cleared.
    Reset,
}

impl Step {
    pub(crate) fn visit(node: &Node) -> Self {
        Self::Visit {
            node_id: node.id,
            value: node.value,
        }
    }

    pub(crate) fn found(node_id: NodeId, value: Value) -> Self {
        Self::Found { node_id, value }
    }

    /// The node this step is about, if it is about a single node.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::Visit { node_id, .. }
            | Self::Found { node_id, .. }
            | Self::Insert { node_id, .. }
            | Self::Delete { node_id, .. } => Some(*node_id),
            Self::NotFound { .. } | Self::Reset => None,
        }
    }

    /// Whether applying this step should refresh node positions from the tree.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Insert { .. } | Self::Delete { .. } | Self::Reset)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visit { value, .. } => write!(f, "Visiting node {value}"),
            Self::Found { value, .. } => write!(f, "Found node {value}!"),
            Self::NotFound { value, .. } => write!(f, "Node {value} not found."),
            Self::Insert { value, .. } => write!(f, "Inserted {value}"),
            Self::Delete { value, .. } => write!(f, "Deleted {value}"),
            Self::Reset => f.write_str("Tree cleared"),
        }
    }
}

/// Ids of the `visit` steps of a trace, in order.
pub(crate) fn visited_path(steps: &[Step]) -> Vec<NodeId> {
    steps
        .iter()
        .filter_map(|step| match step {
            Step::Visit { node_id, .. } => Some(*node_id),
            _ => None,
        })
        .collect()
}
