//! Text commands, one per line, as typed at the CLI.
//!
//! ```text
//! insert 10    delete 10    search 10
//! min          max
//! inorder      preorder     postorder
//! reset        random
//! bst          avl
//! ```
//!
//! Verbs are case-insensitive.

use std::fmt;
use std::str::FromStr;

use crate::history::Variant;
use crate::node::Value;
use crate::tree::Order;
use crate::Error;

/// One user action against a [`Session`](crate::Session).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Insert a key.
    Insert(Value),
    /// Delete a key.
    Delete(Value),
    /// Search for a key.
    Search(Value),
    /// Walk to the smallest key.
    Min,
    /// Walk to the largest key.
    Max,
    /// Visit every node.
    Traverse(Order),
    /// Empty the tree and forget its history.
    Reset,
    /// Replace the tree with a random one.
    Random,
    /// Show the other variant.
    Switch(Variant),
}

impl Command {
    /// The verb, lowercase.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Delete(_) => "delete",
            Self::Search(_) => "search",
            Self::Min => "min",
            Self::Max => "max",
            Self::Traverse(Order::InOrder) => "inorder",
            Self::Traverse(Order::PreOrder) => "preorder",
            Self::Traverse(Order::PostOrder) => "postorder",
            Self::Reset => "reset",
            Self::Random => "random",
            Self::Switch(Variant::Bst) => "bst",
            Self::Switch(Variant::Avl) => "avl",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(v) | Self::Delete(v) | Self::Search(v) => {
                write!(f, "{} {v}", self.verb())
            }
            _ => f.write_str(self.verb()),
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(Error::InvalidCommand("empty command".into()));
        };
        let verb = verb.to_ascii_lowercase();
        let argument = words.next();
        if let Some(extra) = words.next() {
            return Err(Error::InvalidCommand(format!(
                "unexpected `{extra}` after `{verb}`"
            )));
        }

        let value = || -> Result<Value, Error> {
            let arg = argument
                .ok_or_else(|| Error::InvalidCommand(format!("`{verb}` needs an integer")))?;
            arg.parse()
                .map_err(|_| Error::InvalidCommand(format!("`{arg}` is not an integer")))
        };

        let command = match verb.as_str() {
            "insert" => Self::Insert(value()?),
            "delete" => Self::Delete(value()?),
            "search" => Self::Search(value()?),
            _ if argument.is_some() => {
                return Err(Error::InvalidCommand(format!("`{verb}` takes no argument")));
            }
            "min" => Self::Min,
            "max" => Self::Max,
            "reset" => Self::Reset,
            "random" => Self::Random,
            other => {
                if let Ok(order) = other.parse::<Order>() {
                    Self::Traverse(order)
                } else if let Ok(variant) = other.parse::<Variant>() {
                    Self::Switch(variant)
                } else {
                    return Err(Error::InvalidCommand(format!("unknown command `{other}`")));
                }
            }
        };
        Ok(command)
    }
}
