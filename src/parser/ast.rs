//! Abstract Syntax Tree types for templates

use std::fmt;

use crate::js::JsNode;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Node type tag, without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Element,
    Text,
    Interpolation,
    Comment,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Element => "Element",
            NodeKind::Text => "Text",
            NodeKind::Interpolation => "Interpolation",
            NodeKind::Comment => "Comment",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute on a start tag. The value never includes its quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub span: Span,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            span: 0..0,
        }
    }
}

/// Top of the tree; children are the template's top-level siblings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RootNode {
    pub children: Vec<TemplateNode>,
    pub span: Span,
    pub js_node: Option<JsNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    /// Always empty when `self_closing` is set
    pub children: Vec<TemplateNode>,
    pub self_closing: bool,
    pub span: Span,
    pub js_node: Option<JsNode>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: vec![],
            children: vec![],
            self_closing: false,
            span: 0..0,
            js_node: None,
        }
    }

    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Look up an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub content: String,
    pub span: Span,
    pub js_node: Option<JsNode>,
}

/// `{{ expression }}`; the expression is kept as raw text
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationNode {
    pub expression: String,
    pub span: Span,
    pub js_node: Option<JsNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub content: String,
    pub span: Span,
    pub js_node: Option<JsNode>,
}

/// A node of the template AST
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    Root(RootNode),
    Element(ElementNode),
    Text(TextNode),
    Interpolation(InterpolationNode),
    Comment(CommentNode),
}

impl TemplateNode {
    pub fn root(children: Vec<TemplateNode>) -> Self {
        TemplateNode::Root(RootNode {
            children,
            ..RootNode::default()
        })
    }

    pub fn element(element: ElementNode) -> Self {
        TemplateNode::Element(element)
    }

    pub fn text(content: impl Into<String>) -> Self {
        TemplateNode::Text(TextNode {
            content: content.into(),
            span: 0..0,
            js_node: None,
        })
    }

    pub fn interpolation(expression: impl Into<String>) -> Self {
        TemplateNode::Interpolation(InterpolationNode {
            expression: expression.into(),
            span: 0..0,
            js_node: None,
        })
    }

    pub fn comment(content: impl Into<String>) -> Self {
        TemplateNode::Comment(CommentNode {
            content: content.into(),
            span: 0..0,
            js_node: None,
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            TemplateNode::Root(_) => NodeKind::Root,
            TemplateNode::Element(_) => NodeKind::Element,
            TemplateNode::Text(_) => NodeKind::Text,
            TemplateNode::Interpolation(_) => NodeKind::Interpolation,
            TemplateNode::Comment(_) => NodeKind::Comment,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            TemplateNode::Root(n) => &n.span,
            TemplateNode::Element(n) => &n.span,
            TemplateNode::Text(n) => &n.span,
            TemplateNode::Interpolation(n) => &n.span,
            TemplateNode::Comment(n) => &n.span,
        }
    }

    /// Child sequence for container nodes, `None` for leaves
    pub fn children(&self) -> Option<&[TemplateNode]> {
        match self {
            TemplateNode::Root(n) => Some(&n.children),
            TemplateNode::Element(n) => Some(&n.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<TemplateNode>> {
        match self {
            TemplateNode::Root(n) => Some(&mut n.children),
            TemplateNode::Element(n) => Some(&mut n.children),
            _ => None,
        }
    }

    /// Generated expression attached by the transform pass
    pub fn js_node(&self) -> Option<&JsNode> {
        match self {
            TemplateNode::Root(n) => n.js_node.as_ref(),
            TemplateNode::Element(n) => n.js_node.as_ref(),
            TemplateNode::Text(n) => n.js_node.as_ref(),
            TemplateNode::Interpolation(n) => n.js_node.as_ref(),
            TemplateNode::Comment(n) => n.js_node.as_ref(),
        }
    }

    pub fn set_js_node(&mut self, js_node: JsNode) {
        let slot = match self {
            TemplateNode::Root(n) => &mut n.js_node,
            TemplateNode::Element(n) => &mut n.js_node,
            TemplateNode::Text(n) => &mut n.js_node,
            TemplateNode::Interpolation(n) => &mut n.js_node,
            TemplateNode::Comment(n) => &mut n.js_node,
        };
        *slot = Some(js_node);
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            TemplateNode::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TemplateNode::Text(t) => Some(&t.content),
            _ => None,
        }
    }

    /// Short description shown next to the node type in [`dump`](Self::dump)
    fn description(&self) -> &str {
        match self {
            TemplateNode::Root(_) => "",
            TemplateNode::Element(e) => &e.tag,
            TemplateNode::Text(t) => &t.content,
            TemplateNode::Interpolation(i) => &i.expression,
            TemplateNode::Comment(c) => &c.content,
        }
    }

    /// Render the tree as one `Type: description` line per node, children
    /// indented by two dashes per level.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        out.push_str(&"-".repeat(depth * 2));
        out.push_str(self.kind().as_str());
        let desc = self.description();
        if !desc.is_empty() {
            out.push_str(": ");
            out.push_str(desc);
        }
        out.push('\n');
        for child in self.children().unwrap_or_default() {
            child.dump_into(out, depth + 1);
        }
    }
}
