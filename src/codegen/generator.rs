//! Source printer for expression trees

use crate::js::{ArrayExpression, CallExpression, FunctionDeclaration, JsNode};

use super::config::CodegenConfig;

/// Text buffer with indentation tracking
pub struct CodeWriter<'a> {
    config: &'a CodegenConfig,
    code: String,
    indent_level: usize,
}

impl<'a> CodeWriter<'a> {
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self {
            config,
            code: String::new(),
            indent_level: 0,
        }
    }

    /// Append raw text to the current line
    pub fn push(&mut self, text: &str) {
        self.code.push_str(text);
    }

    /// Start a new line at the current indentation
    pub fn newline(&mut self) {
        self.code.push('\n');
        let width = self.config.indent_width * self.indent_level;
        self.code.extend(std::iter::repeat(' ').take(width));
    }

    /// Start a new line one level deeper
    pub fn indent(&mut self) {
        self.indent_level += 1;
        self.newline();
    }

    /// Start a new line one level shallower
    pub fn deindent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.newline();
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Consume the writer and return the accumulated text
    pub fn finish(self) -> String {
        self.code
    }
}

/// Print `node` as source text with the default configuration
pub fn generate(node: &JsNode) -> String {
    generate_with_config(node, &CodegenConfig::default())
}

/// Print `node` as source text
pub fn generate_with_config(node: &JsNode, config: &CodegenConfig) -> String {
    let mut writer = CodeWriter::new(config);
    gen_node(node, &mut writer);
    let code = writer.finish();
    tracing::debug!(node = node.type_name(), bytes = code.len(), "generated code");
    code
}

fn gen_node(node: &JsNode, writer: &mut CodeWriter) {
    match node {
        JsNode::FunctionDeclaration(func) => gen_function_declaration(func, writer),
        JsNode::ReturnStatement(ret) => {
            writer.push("return ");
            gen_node(&ret.argument, writer);
        }
        JsNode::CallExpression(call) => gen_call_expression(call, writer),
        JsNode::StringLiteral(lit) => {
            let quote = writer.config.quote.as_char();
            writer.code.push(quote);
            writer.push(&lit.value);
            writer.code.push(quote);
        }
        JsNode::Identifier(id) => writer.push(id.as_str()),
        JsNode::ArrayExpression(array) => gen_array_expression(array, writer),
    }
}

fn gen_function_declaration(func: &FunctionDeclaration, writer: &mut CodeWriter) {
    writer.push("function ");
    writer.push(func.id.as_str());
    writer.push("(");
    gen_node_list(&func.params, writer);
    writer.push(") {");

    if func.body.is_empty() {
        writer.newline();
    } else {
        writer.indent();
        for (i, statement) in func.body.iter().enumerate() {
            if i > 0 {
                writer.newline();
            }
            gen_node(statement, writer);
        }
        writer.deindent();
    }
    writer.push("}");
}

fn gen_call_expression(call: &CallExpression, writer: &mut CodeWriter) {
    writer.push(call.callee.as_str());
    writer.push("(");
    gen_node_list(&call.arguments, writer);
    writer.push(")");
}

fn gen_array_expression(array: &ArrayExpression, writer: &mut CodeWriter) {
    writer.push("[");
    gen_node_list(&array.elements, writer);
    writer.push("]");
}

/// Comma-separated, no trailing separator
fn gen_node_list(nodes: &[JsNode], writer: &mut CodeWriter) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            writer.push(", ");
        }
        gen_node(node, writer);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::codegen::QuoteStyle;
    use crate::js::{
        array_expression, call_expression, function_declaration, identifier, return_statement,
        string_literal,
    };

    #[test]
    fn test_writer_indentation() {
        let config = CodegenConfig::default();
        let mut writer = CodeWriter::new(&config);
        writer.push("a");
        writer.indent();
        writer.push("b");
        writer.indent();
        writer.push("c");
        writer.deindent();
        writer.push("d");
        writer.deindent();
        writer.deindent();
        writer.push("e");
        assert_eq!(writer.indent_level(), 0);
        assert_eq!(writer.finish(), "a\n  b\n    c\n  d\n\ne");
    }

    #[test]
    fn test_string_literal_is_not_escaped() {
        assert_eq!(generate(&string_literal("it's")), "'it's'");
    }

    #[test]
    fn test_call_with_arguments() {
        let call = call_expression("h", vec![string_literal("p"), string_literal("Vue")]);
        assert_eq!(generate(&call), "h('p', 'Vue')");
    }

    #[test]
    fn test_call_without_arguments() {
        assert_eq!(generate(&call_expression("h", vec![])), "h()");
    }

    #[test]
    fn test_array_expression() {
        let array = array_expression(vec![identifier("a"), identifier("b"), identifier("c")]);
        assert_eq!(generate(&array), "[a, b, c]");
        assert_eq!(generate(&array_expression(vec![])), "[]");
    }

    #[test]
    fn test_function_declaration() {
        let func = function_declaration(
            "render",
            vec![identifier("ctx"), identifier("cache")],
            vec![return_statement(call_expression(
                "h",
                vec![string_literal("div")],
            ))],
        );
        assert_eq!(
            generate(&func),
            "function render(ctx, cache) {\n  return h('div')\n}"
        );
    }

    #[test]
    fn test_function_with_several_statements() {
        let func = function_declaration(
            "f",
            vec![],
            vec![identifier("a"), return_statement(identifier("b"))],
        );
        assert_eq!(generate(&func), "function f() {\n  a\n  return b\n}");
    }

    #[test]
    fn test_empty_function_body() {
        let func = function_declaration("render", vec![], vec![]);
        assert_eq!(generate(&func), "function render() {\n}");
    }

    #[test]
    fn test_nested_function_indents_twice() {
        let inner = function_declaration("inner", vec![], vec![return_statement(identifier("x"))]);
        let outer = function_declaration("outer", vec![], vec![inner]);
        assert_eq!(
            generate(&outer),
            "function outer() {\n  function inner() {\n    return x\n  }\n}"
        );
    }

    #[test]
    fn test_config_quote_and_indent() {
        let config = CodegenConfig::new()
            .with_indent_width(4)
            .with_quote(QuoteStyle::Double);
        let func = function_declaration(
            "render",
            vec![],
            vec![return_statement(string_literal("x"))],
        );
        assert_eq!(
            generate_with_config(&func, &config),
            "function render() {\n    return \"x\"\n}"
        );
    }

    #[test]
    fn test_literal_and_identifier_differ() {
        assert_ne!(generate(&string_literal("h")), generate(&identifier("h")));
        // A single child and a one-element array print differently
        let single = call_expression("h", vec![string_literal("p"), string_literal("a")]);
        let array = call_expression(
            "h",
            vec![
                string_literal("p"),
                array_expression(vec![string_literal("a")]),
            ],
        );
        assert_ne!(generate(&single), generate(&array));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let tree = function_declaration(
            "render",
            vec![],
            vec![return_statement(call_expression(
                "h",
                vec![
                    string_literal("div"),
                    array_expression(vec![
                        call_expression("h", vec![string_literal("p"), string_literal("Vue")]),
                        call_expression("h", vec![string_literal("p")]),
                    ]),
                ],
            ))],
        );
        assert_eq!(generate(&tree), generate(&tree));
    }
}
