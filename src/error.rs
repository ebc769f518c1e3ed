use std::{error::Error, fmt};

use crate::node::NodeId;

/// Errors that can occur when querying or manipulating a tree.
#[derive(Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A child position was not valid for the node's current child count.
    IndexOutOfRange { index: usize, len: usize },
    /// Adding the child (first id) under the parent (second id) would make
    /// the parent reachable from itself.
    Cycle(NodeId, NodeId),
}

impl Error for TreeError {}

impl fmt::Debug for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::IndexOutOfRange { index, len } => {
                write!(f, "IndexOutOfRange({} of {})", index, len)
            }
            TreeError::Cycle(child, parent) => write!(f, "Cycle({} -> {})", child, parent),
        }
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::IndexOutOfRange { index, len } => {
                write!(f, "Index {} is out of range for {} children", index, len)
            }
            TreeError::Cycle(child, parent) => {
                write!(f, "Operation would create a cycle: {} -> {}", child, parent)
            }
        }
    }
}
