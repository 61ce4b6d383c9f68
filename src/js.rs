//! Expression AST for generated render functions
//!
//! Transform rules build these nodes and attach them to the template nodes
//! they were derived from; the code generator prints them back out as source.

use std::fmt;

/// A name in generated code (function names, callees, parameters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `function <id>(<params>) { <body> }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub id: Identifier,
    pub params: Vec<JsNode>,
    pub body: Vec<JsNode>,
}

/// `return <argument>`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub argument: Box<JsNode>,
}

/// `<callee>(<arguments>)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Identifier,
    pub arguments: Vec<JsNode>,
}

/// A string literal. The value is emitted verbatim between quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
}

/// `[<elements>]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    pub elements: Vec<JsNode>,
}

/// Node of the expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum JsNode {
    FunctionDeclaration(FunctionDeclaration),
    ReturnStatement(ReturnStatement),
    CallExpression(CallExpression),
    StringLiteral(StringLiteral),
    Identifier(Identifier),
    ArrayExpression(ArrayExpression),
}

impl JsNode {
    /// Short name of the node type, used in traces and test failures
    pub fn type_name(&self) -> &'static str {
        match self {
            JsNode::FunctionDeclaration(_) => "FunctionDeclaration",
            JsNode::ReturnStatement(_) => "ReturnStatement",
            JsNode::CallExpression(_) => "CallExpression",
            JsNode::StringLiteral(_) => "StringLiteral",
            JsNode::Identifier(_) => "Identifier",
            JsNode::ArrayExpression(_) => "ArrayExpression",
        }
    }

    pub fn as_call(&self) -> Option<&CallExpression> {
        match self {
            JsNode::CallExpression(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            JsNode::StringLiteral(lit) => Some(&lit.value),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDeclaration> {
        match self {
            JsNode::FunctionDeclaration(func) => Some(func),
            _ => None,
        }
    }
}

pub fn string_literal(value: impl Into<String>) -> JsNode {
    JsNode::StringLiteral(StringLiteral {
        value: value.into(),
    })
}

pub fn identifier(name: impl Into<String>) -> JsNode {
    JsNode::Identifier(Identifier::new(name))
}

pub fn array_expression(elements: Vec<JsNode>) -> JsNode {
    JsNode::ArrayExpression(ArrayExpression { elements })
}

pub fn call_expression(callee: impl Into<String>, arguments: Vec<JsNode>) -> JsNode {
    JsNode::CallExpression(CallExpression {
        callee: Identifier::new(callee),
        arguments,
    })
}

pub fn return_statement(argument: JsNode) -> JsNode {
    JsNode::ReturnStatement(ReturnStatement {
        argument: Box::new(argument),
    })
}

pub fn function_declaration(
    name: impl Into<String>,
    params: Vec<JsNode>,
    body: Vec<JsNode>,
) -> JsNode {
    JsNode::FunctionDeclaration(FunctionDeclaration {
        id: Identifier::new(name),
        params,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_expression_helper() {
        let call = call_expression("h", vec![string_literal("div")]);
        let call = call.as_call().unwrap();
        assert_eq!(call.callee.as_str(), "h");
        assert_eq!(call.arguments[0].as_string_literal(), Some("div"));
    }

    #[test]
    fn test_function_declaration_helper() {
        let func = function_declaration("render", vec![], vec![return_statement(identifier("x"))]);
        let func = func.as_function().unwrap();
        assert_eq!(func.id.to_string(), "render");
        assert!(func.params.is_empty());
        assert_eq!(func.body[0].type_name(), "ReturnStatement");
    }
}
