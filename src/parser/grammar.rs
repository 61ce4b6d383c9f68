//! Recursive-descent template parser
//!
//! At each step the next node kind is decided by looking at the first few
//! characters of the remaining input under the current [`TextMode`]. Elements
//! recurse into [`parse_children`] with their tag pushed on the ancestor
//! stack, which alone decides where their content ends.

use logos::Logos;

use crate::error::ParseError;
use crate::parser::ast::*;
use crate::parser::context::ParseContext;
use crate::parser::lexer::{QuotedValue, TagToken, ValueToken};
use crate::parser::mode::TextMode;
use crate::parser::{ParserOptions, WhitespaceMode};

/// Best-effort tree plus everything the parser had to recover from
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// Always a [`TemplateNode::Root`]
    pub ast: TemplateNode,
    pub diagnostics: Vec<ParseError>,
}

impl ParseOutput {
    /// Top-level nodes of the template
    pub fn children(&self) -> &[TemplateNode] {
        self.ast.children().unwrap_or_default()
    }
}

/// Parse template text with default options
pub fn parse(source: &str) -> ParseOutput {
    parse_with_options(source, &ParserOptions::default())
}

/// Parse template text into a template AST. Never fails; malformed markup is
/// reported through [`ParseOutput::diagnostics`].
pub fn parse_with_options(source: &str, options: &ParserOptions) -> ParseOutput {
    let mut ctx = ParseContext::new(source, options);
    let children = parse_children(&mut ctx);

    tracing::debug!(
        nodes = children.len(),
        diagnostics = ctx.diagnostics.len(),
        "parsed template"
    );

    ParseOutput {
        ast: TemplateNode::Root(RootNode {
            children,
            span: 0..source.len(),
            js_node: None,
        }),
        diagnostics: ctx.diagnostics,
    }
}

fn parse_children(ctx: &mut ParseContext<'_>) -> Vec<TemplateNode> {
    let mut nodes = vec![];

    // Mode and input are re-read every iteration: each node advances the cursor
    while !is_end(ctx) {
        let mode = ctx.mode;
        let rest = ctx.rest();

        if mode.allows_markup() && rest.starts_with('<') {
            if rest.starts_with("<!--") {
                nodes.push(parse_comment(ctx));
                continue;
            }
            if rest.starts_with("<![CDATA[") {
                nodes.extend(parse_cdata(ctx));
                continue;
            }
            if rest.starts_with("</") {
                let start = ctx.offset();
                if let Some(tag) = consume_end_tag(ctx) {
                    let span = ctx.span_from(start);
                    ctx.report(ParseError::UnmatchedClosingTag { tag, span });
                    continue;
                }
            } else if rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                if let Some(element) = parse_element(ctx) {
                    nodes.push(element);
                    continue;
                }
            }
        }

        if mode.allows_interpolation() && rest.starts_with("{{") {
            nodes.push(parse_interpolation(ctx));
            continue;
        }

        let text = parse_text(ctx);
        if mode == TextMode::Data && ctx.options.whitespace == WhitespaceMode::Condense {
            nodes.extend(condense_text(text));
        } else {
            nodes.push(TemplateNode::Text(text));
        }
    }

    nodes
}

/// Whether the current nesting level is finished
fn is_end(ctx: &ParseContext<'_>) -> bool {
    if ctx.is_eof() {
        return true;
    }
    match ctx.mode {
        TextMode::Cdata => ctx.starts_with("]]>"),
        _ => ctx
            .ancestors
            .iter()
            .rev()
            .any(|tag| ctx.starts_with_end_tag(tag)),
    }
}

fn parse_element(ctx: &mut ParseContext<'_>) -> Option<TemplateNode> {
    let start = ctx.offset();
    let (mut element, end) = parse_start_tag(ctx)?;
    tracing::trace!(tag = %element.tag, offset = start, "parsed start tag");

    if end != StartTagEnd::Open {
        return Some(TemplateNode::Element(element));
    }

    let limit = ctx.options.max_depth;
    if ctx.ancestors.len() >= limit {
        ctx.report(ParseError::NestingTooDeep {
            tag: element.tag.clone(),
            limit,
            span: element.span.clone(),
        });
        return Some(TemplateNode::Element(element));
    }

    let parent_mode = ctx.mode;
    ctx.mode = TextMode::for_tag(&element.tag);
    ctx.ancestors.push(element.tag.clone());
    element.children = parse_children(ctx);
    ctx.ancestors.pop();
    ctx.mode = parent_mode;

    if ctx.starts_with_end_tag(&element.tag) {
        consume_end_tag(ctx);
    } else {
        ctx.report(ParseError::MissingClosingTag {
            tag: element.tag.clone(),
            span: element.span.clone(),
        });
    }

    element.span = ctx.span_from(start);
    Some(TemplateNode::Element(element))
}

/// How a start tag finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartTagEnd {
    /// `>`: content and a closing tag follow
    Open,
    /// `/>`
    SelfClosing,
    /// Input ran out or became unreadable before the tag ended
    Cutoff,
}

/// Parse `<tag attr=value ...>` or `<tag ... />`. The returned element's span
/// covers just the start tag. Returns `None` without consuming anything if
/// the input does not open a tag.
#[inline(never)]
fn parse_start_tag(ctx: &mut ParseContext<'_>) -> Option<(ElementNode, StartTagEnd)> {
    let start = ctx.offset();
    let rest = ctx.rest();
    let abs = |span: std::ops::Range<usize>| start + span.start..start + span.end;

    let mut lex = TagToken::lexer(rest);
    let Some(Ok(TagToken::StartTagOpen(tag))) = lex.next() else {
        return None;
    };

    let mut attributes = vec![];
    // Attribute name still waiting to see whether an `=` follows
    let mut pending: Option<(String, Span)> = None;
    let mut end = StartTagEnd::Cutoff;
    let mut cut_reported = false;

    let flush = |pending: &mut Option<(String, Span)>, attributes: &mut Vec<Attribute>| {
        if let Some((name, span)) = pending.take() {
            attributes.push(Attribute {
                name,
                value: String::new(),
                span,
            });
        }
    };

    // Bytes of `rest` that belong to the start tag
    let consumed = loop {
        let Some(token) = lex.next() else {
            break rest.len();
        };
        match token {
            Ok(TagToken::Name(name)) => {
                flush(&mut pending, &mut attributes);
                pending = Some((name, abs(lex.span())));
            }
            Ok(TagToken::Equals) => {
                let (name, name_span) = pending
                    .take()
                    .unwrap_or_else(|| (String::new(), abs(lex.span())));
                let mut value_lex = lex.morph::<ValueToken>();
                let value = match value_lex.next() {
                    Some(Ok(ValueToken::Quoted(QuotedValue::Closed(value))))
                    | Some(Ok(ValueToken::Unquoted(value))) => value,
                    Some(Ok(ValueToken::Quoted(QuotedValue::Unterminated))) => {
                        let quote_at = value_lex.span().start;
                        ctx.report(ParseError::MissingAttributeQuote {
                            attribute: name,
                            span: abs(quote_at..rest.len()),
                        });
                        cut_reported = true;
                        // The remaining attributes can't be trusted; resume after the next `>`
                        match rest[quote_at + 1..].find('>') {
                            Some(i) => {
                                let close = quote_at + 1 + i;
                                end = if rest[..close].ends_with('/') {
                                    StartTagEnd::SelfClosing
                                } else {
                                    StartTagEnd::Open
                                };
                                break close + 1;
                            }
                            None => break rest.len(),
                        }
                    }
                    Some(Ok(ValueToken::TagClose)) => {
                        attributes.push(Attribute {
                            name,
                            value: String::new(),
                            span: name_span,
                        });
                        end = StartTagEnd::Open;
                        break value_lex.span().end;
                    }
                    Some(Err(())) => String::new(),
                    None => {
                        attributes.push(Attribute {
                            name,
                            value: String::new(),
                            span: name_span,
                        });
                        break rest.len();
                    }
                };
                attributes.push(Attribute {
                    name,
                    value,
                    span: name_span.start..start + value_lex.span().end,
                });
                lex = value_lex.morph();
            }
            Ok(TagToken::TagClose) => {
                end = StartTagEnd::Open;
                break lex.span().end;
            }
            Ok(TagToken::SelfClose) => {
                end = StartTagEnd::SelfClosing;
                break lex.span().end;
            }
            // Another tag starts before this one was closed
            Ok(TagToken::StartTagOpen(_)) | Ok(TagToken::EndTagOpen(_)) => {
                break lex.span().start;
            }
            // Stray character such as a lone `/`
            Err(()) => {}
        }
    };
    flush(&mut pending, &mut attributes);

    ctx.advance_by(consumed);
    let span = ctx.span_from(start);
    if end == StartTagEnd::Cutoff && !cut_reported {
        ctx.report(ParseError::UnterminatedStartTag {
            tag: tag.clone(),
            span: span.clone(),
        });
    }

    let element = ElementNode {
        tag,
        attributes,
        children: vec![],
        self_closing: end == StartTagEnd::SelfClosing,
        span,
        js_node: None,
    };
    Some((element, end))
}

/// Consume `</tag ...>` and return the tag name, or `None` (consuming
/// nothing) if the input does not open an end tag.
fn consume_end_tag(ctx: &mut ParseContext<'_>) -> Option<String> {
    let mut lex = TagToken::lexer(ctx.rest());
    let Some(Ok(TagToken::EndTagOpen(tag))) = lex.next() else {
        return None;
    };
    let mut consumed = lex.span().end;
    while let Some(token) = lex.next() {
        match token {
            Ok(TagToken::TagClose) | Ok(TagToken::SelfClose) => {
                consumed = lex.span().end;
                break;
            }
            Ok(TagToken::StartTagOpen(_)) | Ok(TagToken::EndTagOpen(_)) => break,
            _ => consumed = lex.span().end,
        }
    }
    ctx.advance_by(consumed);
    Some(tag)
}

fn parse_comment(ctx: &mut ParseContext<'_>) -> TemplateNode {
    let start = ctx.offset();
    ctx.advance_by("<!--".len());
    let rest = ctx.rest();

    let content = match rest.find("-->") {
        Some(close) => {
            ctx.advance_by(close + "-->".len());
            &rest[..close]
        }
        None => {
            ctx.advance_to_end();
            let span = ctx.span_from(start);
            ctx.report(ParseError::UnterminatedComment { span });
            rest
        }
    };

    TemplateNode::Comment(CommentNode {
        content: content.to_string(),
        span: ctx.span_from(start),
        js_node: None,
    })
}

/// CDATA content is passed through as text
fn parse_cdata(ctx: &mut ParseContext<'_>) -> Vec<TemplateNode> {
    let start = ctx.offset();
    ctx.advance_by("<![CDATA[".len());

    let parent_mode = ctx.mode;
    ctx.mode = TextMode::Cdata;
    let nodes = parse_children(ctx);
    ctx.mode = parent_mode;

    if ctx.starts_with("]]>") {
        ctx.advance_by("]]>".len());
    } else {
        let span = ctx.span_from(start);
        ctx.report(ParseError::UnterminatedCdata { span });
    }
    nodes
}

fn parse_interpolation(ctx: &mut ParseContext<'_>) -> TemplateNode {
    let start = ctx.offset();
    ctx.advance_by("{{".len());
    let rest = ctx.rest();

    let expression = match rest.find("}}") {
        Some(close) => {
            ctx.advance_by(close + "}}".len());
            &rest[..close]
        }
        None => {
            ctx.advance_to_end();
            let span = ctx.span_from(start);
            ctx.report(ParseError::UnterminatedInterpolation { span });
            rest
        }
    };

    TemplateNode::Interpolation(InterpolationNode {
        expression: expression.to_string(),
        span: ctx.span_from(start),
        js_node: None,
    })
}

/// Text runs to the next delimiter for the current mode, but always takes at
/// least one character so a delimiter that opened nothing can't stall the loop.
fn parse_text(ctx: &mut ParseContext<'_>) -> TextNode {
    let start = ctx.offset();
    let rest = ctx.rest();
    let delimiters: &[&str] = match ctx.mode {
        TextMode::Data | TextMode::Rcdata => &["<", "{{"],
        TextMode::Rawtext => &["<"],
        TextMode::Cdata => &["]]>"],
    };

    let first = rest.chars().next().map_or(0, char::len_utf8);
    let end = delimiters
        .iter()
        .filter_map(|d| rest[first..].find(d))
        .min()
        .map_or(rest.len(), |i| first + i);

    ctx.advance_by(end);
    TextNode {
        content: rest[..end].to_string(),
        span: ctx.span_from(start),
        js_node: None,
    }
}

/// Whitespace-only text spanning lines is dropped; other whitespace runs
/// collapse to one space
fn condense_text(mut text: TextNode) -> Option<TemplateNode> {
    if text.content.chars().all(char::is_whitespace) {
        if text.content.contains('\n') {
            return None;
        }
        text.content = " ".to_string();
    } else {
        text.content = collapse_whitespace(&text.content);
    }
    Some(TemplateNode::Text(text))
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
