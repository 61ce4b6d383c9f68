//! Built-in transform rules
//!
//! Each rule matches on node kind and leaves everything else alone.

use crate::js::{self, JsNode};
use crate::parser::ast::{ElementNode, NodeKind, RootNode, TemplateNode};

use super::{
    MultiRootPolicy, NodeTransform, OnExit, TransformContext, TransformError, TransformOptions,
};

/// The standard rule list: text, element, root
pub fn default_rules() -> Vec<Box<dyn NodeTransform>> {
    vec![
        Box::new(TextTransform),
        Box::new(ElementTransform),
        Box::new(RootTransform),
    ]
}

/// Text becomes a string literal of its content
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTransform;

impl NodeTransform for TextTransform {
    fn on_enter(
        &self,
        node: &mut TemplateNode,
        _ctx: &mut TransformContext,
    ) -> Result<Option<OnExit>, TransformError> {
        if let TemplateNode::Text(text) = node {
            text.js_node = Some(js::string_literal(text.content.as_str()));
        }
        Ok(None)
    }
}

/// Elements become a builder call: `h('tag')`, `h('tag', child)` or
/// `h('tag', [children])`. Runs at exit, once the children have expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementTransform;

impl NodeTransform for ElementTransform {
    fn on_enter(
        &self,
        node: &mut TemplateNode,
        _ctx: &mut TransformContext,
    ) -> Result<Option<OnExit>, TransformError> {
        if node.kind() != NodeKind::Element {
            return Ok(None);
        }
        let on_exit: OnExit = Box::new(
            |node: &mut TemplateNode, ctx: &mut TransformContext| -> Result<(), TransformError> {
                if let TemplateNode::Element(element) = node {
                    element.js_node = Some(create_vnode_call(element, &ctx.options().builder));
                }
                Ok(())
            },
        );
        Ok(Some(on_exit))
    }
}

/// The root becomes the render function, returning its first top-level
/// node's expression (or all of them, see [`MultiRootPolicy`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct RootTransform;

impl NodeTransform for RootTransform {
    fn on_enter(
        &self,
        node: &mut TemplateNode,
        _ctx: &mut TransformContext,
    ) -> Result<Option<OnExit>, TransformError> {
        if node.kind() != NodeKind::Root {
            return Ok(None);
        }
        let on_exit: OnExit = Box::new(
            |node: &mut TemplateNode, ctx: &mut TransformContext| -> Result<(), TransformError> {
                if let TemplateNode::Root(root) = node {
                    root.js_node = Some(create_render_function(root, ctx.options()));
                }
                Ok(())
            },
        );
        Ok(Some(on_exit))
    }
}

/// Expressions of the children that produced one, in source order. Comments
/// and interpolations have none and are skipped.
fn child_expressions(children: &[TemplateNode]) -> Vec<JsNode> {
    children
        .iter()
        .filter_map(|child| child.js_node().cloned())
        .collect()
}

fn create_vnode_call(element: &ElementNode, builder: &str) -> JsNode {
    let mut arguments = vec![js::string_literal(element.tag.as_str())];
    let mut children = child_expressions(&element.children);
    match children.len() {
        0 => {}
        1 => arguments.extend(children.pop()),
        _ => arguments.push(js::array_expression(children)),
    }
    js::call_expression(builder, arguments)
}

fn create_render_function(root: &RootNode, options: &TransformOptions) -> JsNode {
    let mut roots = child_expressions(&root.children);

    let returned = match (options.multi_root, roots.len()) {
        (_, 0) => None,
        (MultiRootPolicy::Array, n) if n > 1 => Some(js::array_expression(roots)),
        (MultiRootPolicy::FirstOnly, n) => {
            if n > 1 {
                tracing::warn!(
                    roots = n,
                    "template has several root nodes, rendering only the first"
                );
            }
            Some(roots.swap_remove(0))
        }
        (MultiRootPolicy::Array, _) => roots.pop(),
    };

    let body = returned.map(js::return_statement).into_iter().collect();
    js::function_declaration(options.render_function.as_str(), vec![], body)
}
