//! This crate computes animation traces for Binary Search Trees (BSTs), mostly for educational
//! purposes. Every operation returns the list of [`Step`]s it took, so a renderer can replay
//! them one at a time and show *how* the tree answered.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. A plain [`Bst`] keeps whatever shape the insertion order
//! gives it, so inserting sorted keys produces a list. An [`Avl`] tree rotates after every change
//! to keep the heights of sibling subtrees within one of each other, which bounds the height by
//! `O(lg N)`.
//!
//! ## Pieces
//!
//! - [`Tree`] holds the nodes in an arena addressed by [`NodeId`]. Ids are never reused, so a
//!   renderer can key its shapes on them.
//! - [`Bst`] and [`Avl`] implement [`SearchTree`] and record a trace for everything they do.
//! - [`layout()`] gives every node an `x` from its in-order rank and a `y` from its depth.
//! - [`History`] remembers the keys so either variant can be rebuilt from scratch.
//! - [`Playback`] replays a trace step by step.
//! - [`Session`] ties all of the above together behind [`Command`]s.
//!
//! ```
//! use treeviz::{Avl, SearchTree, Step};
//!
//! let mut avl = Avl::new();
//! for value in [10, 20, 30] {
//!     avl.insert(value);
//! }
//! assert_eq!(avl.tree().root_node().unwrap().value(), 20);
//!
//! let steps = avl.search(30);
//! assert!(matches!(steps.last(), Some(Step::Found { value: 30, .. })));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod bst;
pub mod command;
pub mod config;
mod error;
pub mod history;
pub mod layout;
mod node;
pub mod playback;
pub mod session;
pub mod step;
pub mod tree;

#[cfg(test)]
mod test;

pub use avl::Avl;
pub use bst::Bst;
pub use command::Command;
pub use config::Config;
pub use error::{Error, Result};
pub use history::{History, Variant};
pub use layout::{layout, Canvas, LayoutConfig};
pub use node::{Node, NodeId, Value};
pub use playback::{Markers, Playback, Speed};
pub use session::Session;
pub use step::Step;
pub use tree::{Order, SearchTree, Tree};
