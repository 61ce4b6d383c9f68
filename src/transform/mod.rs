//! Transform pass turning a template AST into render expressions
//!
//! The traversal is depth-first. On entry every registered rule sees the
//! node in order and may hand back an exit action; once all children are
//! done, the node's exit actions run last-registered first. Rules that need
//! their children's expressions do their work at exit.

pub mod config;
pub mod context;
pub mod error;
pub mod rules;

use std::rc::Rc;

pub use config::{MultiRootPolicy, TransformOptions};
pub use context::TransformContext;
pub use error::TransformError;
pub use rules::{default_rules, ElementTransform, RootTransform, TextTransform};

use crate::parser::ast::{NodeKind, TemplateNode};

use context::PendingChange;

/// Deferred work a rule runs after the node's children have been visited
pub type OnExit =
    Box<dyn FnOnce(&mut TemplateNode, &mut TransformContext) -> Result<(), TransformError>>;

/// A pluggable transform rule
pub trait NodeTransform {
    /// Called when the traversal enters `node`. Structural changes go through
    /// [`TransformContext::replace_node`] and [`TransformContext::remove_node`].
    fn on_enter(
        &self,
        node: &mut TemplateNode,
        ctx: &mut TransformContext,
    ) -> Result<Option<OnExit>, TransformError>;
}

impl<F> NodeTransform for F
where
    F: Fn(&mut TemplateNode, &mut TransformContext) -> Result<Option<OnExit>, TransformError>,
{
    fn on_enter(
        &self,
        node: &mut TemplateNode,
        ctx: &mut TransformContext,
    ) -> Result<Option<OnExit>, TransformError> {
        self(node, ctx)
    }
}

/// Attach expressions to `root` using the default rules and options
pub fn transform(root: &mut TemplateNode) -> Result<(), TransformError> {
    transform_with_options(root, TransformOptions::default())
}

pub fn transform_with_options(
    root: &mut TemplateNode,
    options: TransformOptions,
) -> Result<(), TransformError> {
    transform_with(root, options, default_rules())
}

/// Run `rules`, in order, over the tree rooted at `root`
pub fn transform_with(
    root: &mut TemplateNode,
    options: TransformOptions,
    rules: Vec<Box<dyn NodeTransform>>,
) -> Result<(), TransformError> {
    if root.kind() != NodeKind::Root {
        return Err(TransformError::NotRoot(root.kind()));
    }

    let mut ctx = TransformContext::new(rules, options);
    traverse_node(root, &mut ctx)?;

    tracing::debug!(
        rules = ctx.rule_count(),
        generated = root.js_node().map(|j| j.type_name()),
        "transformed template"
    );
    Ok(())
}

/// What happened to a node during its visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Kept,
    Removed,
}

fn traverse_node(node: &mut TemplateNode, ctx: &mut TransformContext) -> Result<Visit, TransformError> {
    ctx.current = Some(node.kind());
    tracing::trace!(kind = %node.kind(), depth = ctx.depth, index = ctx.child_index, "enter");

    let rules = Rc::clone(&ctx.rules);
    let mut exits = Vec::new();
    for rule in rules.iter() {
        if let Some(on_exit) = rule.on_enter(node, ctx)? {
            exits.push(on_exit);
        }
        match ctx.pending.take() {
            Some(PendingChange::Replace(replacement)) => *node = replacement,
            Some(PendingChange::Remove) => return Ok(Visit::Removed),
            None => {}
        }
    }

    let (parent, child_index) = (ctx.parent, ctx.child_index);
    let kind = node.kind();
    if let Some(children) = node.children_mut() {
        traverse_children(children, kind, ctx)?;
    }
    ctx.parent = parent;
    ctx.child_index = child_index;
    ctx.current = Some(kind);

    for on_exit in exits.into_iter().rev() {
        on_exit(node, ctx)?;
        // Changes requested at exit apply to this node, never a later sibling
        match ctx.pending.take() {
            Some(PendingChange::Replace(replacement)) => *node = replacement,
            Some(PendingChange::Remove) => return Ok(Visit::Removed),
            None => {}
        }
    }
    Ok(Visit::Kept)
}

fn traverse_children(
    children: &mut Vec<TemplateNode>,
    parent: NodeKind,
    ctx: &mut TransformContext,
) -> Result<(), TransformError> {
    let mut i = 0;
    while i < children.len() {
        ctx.parent = Some(parent);
        ctx.child_index = i;
        ctx.depth += 1;
        let visit = traverse_node(&mut children[i], ctx);
        ctx.depth -= 1;

        match visit? {
            Visit::Kept => i += 1,
            // The next sibling moves into this slot
            Visit::Removed => {
                children.remove(i);
            }
        }
    }
    Ok(())
}
