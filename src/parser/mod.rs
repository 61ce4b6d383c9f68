//! Parser for UI templates

pub mod ast;
pub mod config;
mod context;
mod grammar;
pub mod lexer;
pub mod mode;

pub use ast::*;
pub use config::{ParserOptions, WhitespaceMode, DEFAULT_MAX_DEPTH};
pub use grammar::{parse, parse_with_options, ParseOutput};
pub use mode::TextMode;
