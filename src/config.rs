//! Pipeline configuration
//!
//! Bundles the per-stage options and loads them from TOML:
//!
//! ```toml
//! strict = true
//!
//! [parser]
//! whitespace = "condense"
//! max_depth = 128
//!
//! [transform]
//! builder = "createVNode"
//! render_function = "render"
//! multi_root = "array"
//!
//! [codegen]
//! indent_width = 4
//! quote = "double"
//! ```
//!
//! Every table and key is optional; missing ones keep their defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::codegen::{CodegenConfig, QuoteStyle};
use crate::parser::{ParserOptions, WhitespaceMode};
use crate::transform::{MultiRootPolicy, TransformOptions};

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration for the complete compile pipeline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompileConfig {
    pub parser: ParserOptions,
    pub transform: TransformOptions,
    pub codegen: CodegenConfig,
    /// Fail compilation when the parser reports any diagnostic
    pub strict: bool,
}

/// TOML structure for deserializing configurations
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    strict: Option<bool>,
    parser: Option<TomlParser>,
    transform: Option<TomlTransform>,
    codegen: Option<TomlCodegen>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlParser {
    whitespace: Option<TomlWhitespace>,
    max_depth: Option<usize>,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
enum TomlWhitespace {
    Preserve,
    Condense,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTransform {
    builder: Option<String>,
    render_function: Option<String>,
    multi_root: Option<TomlMultiRoot>,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
enum TomlMultiRoot {
    FirstOnly,
    Array,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlCodegen {
    indent_width: Option<usize>,
    quote: Option<TomlQuote>,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
enum TomlQuote {
    Single,
    Double,
}

impl From<TomlWhitespace> for WhitespaceMode {
    fn from(mode: TomlWhitespace) -> Self {
        match mode {
            TomlWhitespace::Preserve => WhitespaceMode::Preserve,
            TomlWhitespace::Condense => WhitespaceMode::Condense,
        }
    }
}

impl From<TomlMultiRoot> for MultiRootPolicy {
    fn from(policy: TomlMultiRoot) -> Self {
        match policy {
            TomlMultiRoot::FirstOnly => MultiRootPolicy::FirstOnly,
            TomlMultiRoot::Array => MultiRootPolicy::Array,
        }
    }
}

impl From<TomlQuote> for QuoteStyle {
    fn from(quote: TomlQuote) -> Self {
        match quote {
            TomlQuote::Single => QuoteStyle::Single,
            TomlQuote::Double => QuoteStyle::Double,
        }
    }
}

impl CompileConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = CompileConfig::default();

        if let Some(strict) = parsed.strict {
            config.strict = strict;
        }
        if let Some(parser) = parsed.parser {
            if let Some(whitespace) = parser.whitespace {
                config.parser.whitespace = whitespace.into();
            }
            if let Some(max_depth) = parser.max_depth {
                config.parser.max_depth = max_depth;
            }
        }
        if let Some(transform) = parsed.transform {
            if let Some(builder) = transform.builder {
                config.transform.builder = builder;
            }
            if let Some(render_function) = transform.render_function {
                config.transform.render_function = render_function;
            }
            if let Some(multi_root) = transform.multi_root {
                config.transform.multi_root = multi_root.into();
            }
        }
        if let Some(codegen) = parsed.codegen {
            if let Some(width) = codegen.indent_width {
                config.codegen.indent_width = width;
            }
            if let Some(quote) = codegen.quote {
                config.codegen.quote = quote.into();
            }
        }

        Ok(config)
    }

    /// Set the parser options
    pub fn with_parser(mut self, options: ParserOptions) -> Self {
        self.parser = options;
        self
    }

    /// Set the transform options
    pub fn with_transform(mut self, options: TransformOptions) -> Self {
        self.transform = options;
        self
    }

    /// Set the code generation configuration
    pub fn with_codegen(mut self, config: CodegenConfig) -> Self {
        self.codegen = config;
        self
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = CompileConfig::from_str("").expect("Should parse");
        assert_eq!(config, CompileConfig::default());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
strict = true

[parser]
whitespace = "condense"
max_depth = 64

[transform]
builder = "createVNode"
render_function = "renderApp"
multi_root = "array"

[codegen]
indent_width = 4
quote = "double"
"#;
        let config = CompileConfig::from_str(toml_str).expect("Should parse");
        assert!(config.strict);
        assert_eq!(config.parser.whitespace, WhitespaceMode::Condense);
        assert_eq!(config.parser.max_depth, 64);
        assert_eq!(config.transform.builder, "createVNode");
        assert_eq!(config.transform.render_function, "renderApp");
        assert_eq!(config.transform.multi_root, MultiRootPolicy::Array);
        assert_eq!(config.codegen.indent_width, 4);
        assert_eq!(config.codegen.quote, QuoteStyle::Double);
    }

    #[test]
    fn test_partial_table_keeps_other_defaults() {
        let config = CompileConfig::from_str("[transform]\nbuilder = \"jsx\"\n").expect("Should parse");
        assert_eq!(config.transform.builder, "jsx");
        assert_eq!(config.transform.render_function, "render");
        assert_eq!(config.codegen, CodegenConfig::default());
        assert!(!config.strict);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = CompileConfig::from_str("[codegen]\nindent = 4\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        assert!(CompileConfig::from_str("[codegen]\nquote = \"backtick\"\n").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CompileConfig::from_file(Path::new("/nonexistent/template-compiler.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_builder_pattern() {
        let config = CompileConfig::new()
            .with_strict(true)
            .with_codegen(CodegenConfig::new().with_indent_width(8))
            .with_transform(TransformOptions::new().with_builder("el"))
            .with_parser(ParserOptions::new().with_whitespace(WhitespaceMode::Condense));
        assert!(config.strict);
        assert_eq!(config.codegen.indent_width, 8);
        assert_eq!(config.transform.builder, "el");
        assert_eq!(config.parser.whitespace, WhitespaceMode::Condense);
    }
}
