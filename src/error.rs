//! Parse diagnostics
//!
//! The parser never aborts: every problem it recovers from is recorded as a
//! [`ParseError`] next to the best-effort tree.

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::ast::Span;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `</tag>` with no open element of that name
    #[error("unmatched closing tag `</{tag}>`")]
    UnmatchedClosingTag { tag: String, span: Span },

    #[error("unterminated comment")]
    UnterminatedComment { span: Span },

    #[error("unterminated CDATA section")]
    UnterminatedCdata { span: Span },

    #[error("unterminated interpolation")]
    UnterminatedInterpolation { span: Span },

    /// Element content ended without `</tag>`
    #[error("missing closing tag for `<{tag}>`")]
    MissingClosingTag { tag: String, span: Span },

    /// Quoted attribute value with no closing quote; the rest of the tag's
    /// attributes are dropped
    #[error("missing closing quote for attribute `{attribute}`")]
    MissingAttributeQuote { attribute: String, span: Span },

    /// Start tag cut off before its `>`
    #[error("unterminated start tag `<{tag}`")]
    UnterminatedStartTag { tag: String, span: Span },

    /// Element opened below the nesting limit; kept without children
    #[error("`<{tag}>` is nested deeper than {limit} elements")]
    NestingTooDeep {
        tag: String,
        limit: usize,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::UnmatchedClosingTag { span, .. }
            | ParseError::UnterminatedComment { span }
            | ParseError::UnterminatedCdata { span }
            | ParseError::UnterminatedInterpolation { span }
            | ParseError::MissingClosingTag { span, .. }
            | ParseError::MissingAttributeQuote { span, .. }
            | ParseError::UnterminatedStartTag { span, .. }
            | ParseError::NestingTooDeep { span, .. } => span,
        }
    }

    /// Short hint shown under the highlighted source
    fn label(&self) -> String {
        match self {
            ParseError::UnmatchedClosingTag { .. } => "no open element to close".to_string(),
            ParseError::UnterminatedComment { .. } => "expected `-->`".to_string(),
            ParseError::UnterminatedCdata { .. } => "expected `]]>`".to_string(),
            ParseError::UnterminatedInterpolation { .. } => "expected `}}`".to_string(),
            ParseError::MissingClosingTag { tag, .. } => format!("`<{}>` opened here", tag),
            ParseError::MissingAttributeQuote { .. } => "quote opened here".to_string(),
            ParseError::UnterminatedStartTag { .. } => "expected `>` or `/>`".to_string(),
            ParseError::NestingTooDeep { .. } => "content parsed as siblings".to_string(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let span = self.span().clone();
        let result = Report::build(ReportKind::Warning, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.label())
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        if let Err(e) = result {
            return format!("{}: {} ({})", filename, self, e);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
