use thiserror::Error;

use crate::node::NodeId;

/// Errors raised while building markup in a [`MemoryDocument`](crate::MemoryDocument).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    /// The parent handle does not belong to this document.
    #[error("node {node} does not exist in this document")]
    UnknownNode { node: NodeId },

    /// Tag names must be non-empty.
    #[error("element tag name must not be empty")]
    EmptyTag,
}
