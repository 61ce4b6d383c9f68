//! Template Compiler - compiles HTML-like templates into render functions
//!
//! The pipeline has three stages: the parser builds a template AST, the
//! transform pass attaches an expression tree to it, and the code generator
//! prints that tree as source text.
//!
//! # Example
//!
//! ```rust
//! use template_compiler::compile;
//!
//! let output = compile("<div><p>Vue</p></div>").unwrap();
//! assert_eq!(output.code, "function render() {\n  return h('div', h('p', 'Vue'))\n}");
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod js;
pub mod parser;
pub mod transform;

pub use codegen::{generate, generate_with_config, CodegenConfig, QuoteStyle};
pub use config::{CompileConfig, ConfigError};
pub use error::ParseError;
pub use js::JsNode;
pub use parser::{parse, parse_with_options, ParseOutput, ParserOptions, TemplateNode};
pub use transform::{
    transform, transform_with, transform_with_options, MultiRootPolicy, NodeTransform, OnExit,
    TransformContext, TransformError, TransformOptions,
};

use thiserror::Error;

/// Errors that can occur during the compile pipeline
#[derive(Debug, Error)]
pub enum CompileError {
    /// Parser diagnostics, in strict mode only
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("transform produced no render function")]
    MissingRenderFunction,
}

impl From<Vec<ParseError>> for CompileError {
    fn from(errors: Vec<ParseError>) -> Self {
        CompileError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Generated code plus the diagnostics the parser recovered from
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOutput {
    pub code: String,
    pub diagnostics: Vec<ParseError>,
}

/// Compile template source with default configuration
///
/// Malformed templates still compile; what the parser recovered from is
/// returned in [`CompileOutput::diagnostics`].
///
/// # Example
///
/// ```rust
/// use template_compiler::compile;
///
/// let output = compile("<div><p>text</div>").unwrap();
/// assert_eq!(output.diagnostics.len(), 1);
/// assert!(output.code.contains("h('div', h('p', 'text'))"));
/// ```
pub fn compile(source: &str) -> Result<CompileOutput, CompileError> {
    compile_with_config(source, CompileConfig::default())
}

/// Compile template source with custom configuration
///
/// # Example
///
/// ```rust
/// use template_compiler::{compile_with_config, CompileConfig, TransformOptions};
///
/// let config = CompileConfig::new()
///     .with_transform(TransformOptions::new().with_builder("createVNode"));
///
/// let output = compile_with_config("<br/>", config).unwrap();
/// assert!(output.code.contains("createVNode('br')"));
/// ```
pub fn compile_with_config(
    source: &str,
    config: CompileConfig,
) -> Result<CompileOutput, CompileError> {
    let ParseOutput {
        mut ast,
        diagnostics,
    } = parse_with_options(source, &config.parser);

    if config.strict && !diagnostics.is_empty() {
        return Err(CompileError::Parse(diagnostics));
    }

    transform_with_options(&mut ast, config.transform)?;

    let render = ast.js_node().ok_or(CompileError::MissingRenderFunction)?;
    let code = generate_with_config(render, &config.codegen);

    tracing::debug!(
        source_bytes = source.len(),
        code_bytes = code.len(),
        diagnostics = diagnostics.len(),
        "compiled template"
    );

    Ok(CompileOutput { code, diagnostics })
}
