//! Error types for the transform pass

use thiserror::Error;

use crate::parser::ast::NodeKind;

/// Misuse of the transform context by a rule
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("the root node cannot be replaced")]
    ReplaceRoot,

    #[error("the root node cannot be removed")]
    RemoveRoot,

    /// A rule tried to change a node that an earlier call already removed
    #[error("the current node has already been removed")]
    NodeRemoved,

    /// Transform was started on something other than a root
    #[error("expected a Root node, found {0}")]
    NotRoot(NodeKind),
}
