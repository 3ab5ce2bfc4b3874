//! The ordered record of keys that lets either variant be rebuilt from scratch.
//!
//! Switching between [`Variant::Bst`] and [`Variant::Avl`] never converts one tree into the
//! other. The target tree is emptied and every key in [`History`] is inserted again, in the order
//! it was first inserted, so both variants always hold the same keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::node::Value;
use crate::tree::SearchTree;

/// Which tree the session is currently showing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Plain, unbalanced BST.
    #[default]
    Bst,
    /// Self-balancing AVL tree.
    Avl,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bst => "BST",
            Self::Avl => "AVL",
        })
    }
}

impl FromStr for Variant {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bst" => Ok(Self::Bst),
            "avl" => Ok(Self::Avl),
            _ => Err(crate::Error::InvalidCommand(format!("unknown tree variant `{s}`"))),
        }
    }
}

/// Distinct keys currently in the tree, in the order they were first inserted.
///
/// This is not an undo log: deleting a key removes it, and re-inserting it later appends it at
/// the end again.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    keys: Vec<Value>,
}

impl History {
    /// Generates a new, empty `History`.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Appends `value` unless it is already recorded. Returns whether it was appended.
    pub fn record_insert(&mut self, value: Value) -> bool {
        if self.contains(value) {
            return false;
        }
        self.keys.push(value);
        true
    }

    /// Forgets `value`. Returns whether it was recorded.
    pub fn record_delete(&mut self, value: Value) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| *k != value);
        self.keys.len() != before
    }

    /// Whether `value` is recorded.
    pub fn contains(&self, value: Value) -> bool {
        self.keys.contains(&value)
    }

    /// The recorded keys, oldest first.
    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    /// Number of recorded keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Empties `target` and inserts every recorded key into it, discarding the steps.
    pub fn replay_into(&self, target: &mut dyn SearchTree) {
        target.clear();
        for value in &self.keys {
            target.insert(*value);
        }
        log::debug!("replayed {} keys", self.keys.len());
    }
}

impl FromIterator<Value> for History {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut history = Self::new();
        for value in iter {
            history.record_insert(value);
        }
        history
    }
}
