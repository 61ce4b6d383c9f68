//! Tag lexer using logos
//!
//! Only the inside of `<tag ...>` and `</tag>` is tokenized here; content
//! between tags is scanned by the grammar according to the current text mode.
//! Attribute values use their own token set, entered with [`Lexer::morph`]
//! after an `=` and left again once the value has been read.

use logos::{Lexer, Logos};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[\t\r\n\f ]+")]
pub enum TagToken {
    /// `<name`
    #[regex(r"<[a-zA-Z][^\t\r\n\f />]*", |lex| lex.slice()[1..].to_string())]
    StartTagOpen(String),

    /// `</name`
    #[regex(r"</[a-zA-Z][^\t\r\n\f />]*", |lex| lex.slice()[2..].to_string())]
    EndTagOpen(String),

    #[token(">")]
    TagClose,

    #[token("/>")]
    SelfClose,

    #[token("=")]
    Equals,

    /// Attribute name
    #[regex(r"[^\t\r\n\f />=<][^\t\r\n\f />=]*", |lex| lex.slice().to_string())]
    Name(String),
}

/// Outcome of scanning a quoted attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum QuotedValue {
    Closed(String),
    /// No matching quote before end of input; nothing past the quote was consumed
    Unterminated,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[\t\r\n\f ]+")]
pub enum ValueToken {
    #[token("\"", |lex| quoted(lex, '"'))]
    #[token("'", |lex| quoted(lex, '\''))]
    Quoted(QuotedValue),

    #[regex(r#"[^\t\r\n\f >"'][^\t\r\n\f >]*"#, |lex| lex.slice().to_string())]
    Unquoted(String),

    /// `name=>`: the value is missing and the tag ends here
    #[token(">")]
    TagClose,
}

fn quoted(lex: &mut Lexer<ValueToken>, quote: char) -> QuotedValue {
    let rest = lex.remainder();
    match rest.find(quote) {
        Some(end) => {
            let value = rest[..end].to_string();
            lex.bump(end + quote.len_utf8());
            QuotedValue::Closed(value)
        }
        None => QuotedValue::Unterminated,
    }
}
