//! Shared state for one transform pass

use std::rc::Rc;

use crate::parser::ast::{NodeKind, TemplateNode};

use super::{NodeTransform, TransformError, TransformOptions};

/// Structural change requested by a rule, applied by the traversal as soon as
/// the rule returns
pub(crate) enum PendingChange {
    Replace(TemplateNode),
    Remove,
}

/// State threaded through the traversal by `&mut`.
///
/// Rules receive the node being visited directly; everything about its
/// position in the tree, and the only way to replace or remove it, goes
/// through here.
pub struct TransformContext {
    pub(crate) rules: Rc<[Box<dyn NodeTransform>]>,
    options: TransformOptions,
    pub(crate) current: Option<NodeKind>,
    pub(crate) parent: Option<NodeKind>,
    pub(crate) child_index: usize,
    pub(crate) depth: usize,
    pub(crate) pending: Option<PendingChange>,
}

impl TransformContext {
    pub(crate) fn new(rules: Vec<Box<dyn NodeTransform>>, options: TransformOptions) -> Self {
        Self {
            rules: rules.into(),
            options,
            current: None,
            parent: None,
            child_index: 0,
            depth: 0,
            pending: None,
        }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Kind of the node being visited; `None` once it has been removed
    pub fn current(&self) -> Option<NodeKind> {
        self.current
    }

    /// Kind of the current node's parent; `None` at the root
    pub fn parent(&self) -> Option<NodeKind> {
        self.parent
    }

    /// Position of the current node in its parent's children
    pub fn child_index(&self) -> usize {
        self.child_index
    }

    /// Nesting depth of the current node, the root being 0
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of registered rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Put `node` in the current node's slot. Rules after the caller see the
    /// new node, and it is the one whose children get visited.
    pub fn replace_node(&mut self, node: TemplateNode) -> Result<(), TransformError> {
        if self.parent.is_none() {
            return Err(TransformError::ReplaceRoot);
        }
        if self.current.is_none() {
            return Err(TransformError::NodeRemoved);
        }
        tracing::trace!(index = self.child_index, kind = %node.kind(), "replacing node");
        self.current = Some(node.kind());
        self.pending = Some(PendingChange::Replace(node));
        Ok(())
    }

    /// Delete the current node from its parent. No further rules run on it
    /// and its subtree is not visited.
    pub fn remove_node(&mut self) -> Result<(), TransformError> {
        if self.parent.is_none() {
            return Err(TransformError::RemoveRoot);
        }
        if self.current.is_none() {
            return Err(TransformError::NodeRemoved);
        }
        tracing::trace!(index = self.child_index, "removing node");
        self.current = None;
        self.pending = Some(PendingChange::Remove);
        Ok(())
    }
}
