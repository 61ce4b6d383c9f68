//! Configuration for the template parser

/// What to do with whitespace in text content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespaceMode {
    /// Keep text exactly as written
    #[default]
    Preserve,
    /// Drop whitespace-only text that spans lines and collapse other
    /// whitespace runs to a single space
    Condense,
}

/// Default limit on element nesting
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration options for parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    pub whitespace: WhitespaceMode,

    /// Deepest element nesting parsed as a tree. Elements below it are kept
    /// as childless leaves and reported.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            whitespace: WhitespaceMode::Preserve,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserOptions {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the whitespace handling mode
    pub fn with_whitespace(mut self, whitespace: WhitespaceMode) -> Self {
        self.whitespace = whitespace;
        self
    }

    /// Set the maximum element nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
