//! Parse cursor and per-call parser state

use crate::error::ParseError;

use super::ast::Span;
use super::mode::TextMode;
use super::ParserOptions;

/// State for a single parse call, threaded through the grammar by `&mut`.
///
/// The remaining input is always read from `offset`; nothing in the grammar
/// keeps a copy of it across node boundaries.
pub(crate) struct ParseContext<'src> {
    source: &'src str,
    offset: usize,
    pub mode: TextMode,
    /// Tags of the elements currently open, innermost last
    pub ancestors: Vec<String>,
    pub diagnostics: Vec<ParseError>,
    pub options: &'src ParserOptions,
}

impl<'src> ParseContext<'src> {
    pub fn new(source: &'src str, options: &'src ParserOptions) -> Self {
        Self {
            source,
            offset: 0,
            mode: TextMode::Data,
            ancestors: vec![],
            diagnostics: vec![],
            options,
        }
    }

    /// Unconsumed input
    pub fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consume `len` bytes of input
    pub fn advance_by(&mut self, len: usize) {
        self.offset = (self.offset + len).min(self.source.len());
    }

    /// Consume everything that is left
    pub fn advance_to_end(&mut self) {
        self.offset = self.source.len();
    }

    /// Span from `start` to the current position
    pub fn span_from(&self, start: usize) -> Span {
        start..self.offset
    }

    /// Whether the remaining input opens the end tag of `tag`
    pub fn starts_with_end_tag(&self, tag: &str) -> bool {
        let rest = self.rest();
        let Some(after) = rest.strip_prefix("</") else {
            return false;
        };
        match after.get(..tag.len()) {
            Some(name) if name.eq_ignore_ascii_case(tag) => after[tag.len()..]
                .chars()
                .next()
                .map_or(true, |c| is_tag_space(c) || c == '/' || c == '>'),
            _ => false,
        }
    }

    pub fn report(&mut self, error: ParseError) {
        tracing::warn!(span = ?error.span(), "{}", error);
        self.diagnostics.push(error);
    }
}

/// Whitespace that separates parts of a tag
pub(crate) fn is_tag_space(c: char) -> bool {
    matches!(c, '\t' | '\r' | '\n' | '\x0C' | ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_rest() {
        let options = ParserOptions::default();
        let mut ctx = ParseContext::new("<div>  x", &options);
        ctx.advance_by(5);
        assert_eq!(ctx.rest(), "  x");
        assert_eq!(ctx.span_from(2), 2..5);
        ctx.advance_by(10);
        assert!(ctx.is_eof());
    }

    #[test]
    fn test_end_tag_needs_name_boundary() {
        let options = ParserOptions::default();
        let ctx = ParseContext::new("</pre>", &options);
        assert!(ctx.starts_with_end_tag("pre"));
        assert!(ctx.starts_with_end_tag("PRE"));
        assert!(!ctx.starts_with_end_tag("p"));
    }

    #[test]
    fn test_end_tag_at_eof() {
        let options = ParserOptions::default();
        let ctx = ParseContext::new("</p", &options);
        assert!(ctx.starts_with_end_tag("p"));
    }
}
