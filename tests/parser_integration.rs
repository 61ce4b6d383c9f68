//! Integration tests for the template parser
//!
//! Covers tree shape, text modes, and recovery from malformed input.

use pretty_assertions::assert_eq;

use template_compiler::parser::{Attribute, ElementNode, NodeKind};
use template_compiler::{parse, parse_with_options, ParseError, ParserOptions, TemplateNode};

/// Concatenated text of every Text node, in document order
fn collect_text(node: &TemplateNode, out: &mut String) {
    if let Some(text) = node.as_text() {
        out.push_str(text);
    }
    for child in node.children().unwrap_or_default() {
        collect_text(child, out);
    }
}

#[test]
fn test_single_paragraph() {
    let output = parse("<p>Vue</p>");
    assert!(output.diagnostics.is_empty());
    assert_eq!(output.children().len(), 1);

    let p = output.children()[0].as_element().expect("Should be an element");
    assert_eq!(p.tag, "p");
    assert_eq!(p.children.len(), 1);
    assert_eq!(p.children[0].as_text(), Some("Vue"));
}

#[test]
fn test_nested_tree_dump() {
    let output = parse("<div><p>Vue</p><p>Template</p></div>");
    assert_eq!(
        output.ast.dump(),
        "Root\n--Element: div\n----Element: p\n------Text: Vue\n----Element: p\n------Text: Template\n"
    );
}

#[test]
fn test_self_closing_element() {
    let output = parse("<div/>");
    assert!(output.diagnostics.is_empty());
    let div = output.children()[0].as_element().unwrap();
    assert!(div.self_closing);
    assert!(div.children.is_empty());
    assert_eq!(output.children()[0].span(), &(0..6));
}

#[test]
fn test_attributes() {
    let output = parse(r#"<input type="text" value='a b' disabled id=main>"#);
    let input = output.children()[0].as_element().unwrap();
    assert_eq!(input.attribute("type"), Some("text"));
    assert_eq!(input.attribute("value"), Some("a b"));
    assert_eq!(input.attribute("disabled"), Some(""));
    assert_eq!(input.attribute("id"), Some("main"));
    assert_eq!(
        input
            .attributes
            .iter()
            .map(|a: &Attribute| a.name.as_str())
            .collect::<Vec<_>>(),
        vec!["type", "value", "disabled", "id"]
    );
}

#[test]
fn test_mixed_content_kinds() {
    let output = parse("<p>Hi {{ name }}<!-- note --></p>");
    let p = output.children()[0].as_element().unwrap();
    let kinds: Vec<NodeKind> = p.children.iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Text, NodeKind::Interpolation, NodeKind::Comment]
    );
    assert_eq!(p.children[0].as_text(), Some("Hi "));
}

#[test]
fn test_text_is_preserved_by_flattening() {
    let source = "<div>one<p>two<b>three</b></p>four</div>five";
    let output = parse(source);
    let mut text = String::new();
    collect_text(&output.ast, &mut text);
    assert_eq!(text, "onetwothreefourfive");
}

#[test]
fn test_rawtext_content_is_not_parsed() {
    let output = parse("<script>if (a < b) { x = '<p>' }</script>");
    assert!(output.diagnostics.is_empty());
    let script = &output.children()[0];
    assert!(script
        .children()
        .unwrap()
        .iter()
        .all(|c| c.kind() == NodeKind::Text));

    let mut text = String::new();
    collect_text(script, &mut text);
    assert_eq!(text, "if (a < b) { x = '<p>' }");
}

#[test]
fn test_rcdata_keeps_interpolation() {
    let output = parse("<textarea><b>{{ x }}</b></textarea>");
    let textarea = output.children()[0].as_element().unwrap();
    let kinds: Vec<NodeKind> = textarea.children.iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Text, NodeKind::Interpolation, NodeKind::Text]
    );
}

#[test]
fn test_condense_whitespace() {
    let source = "<ul>\n  <li>a   b</li>\n</ul>";
    let options = ParserOptions::new()
        .with_whitespace(template_compiler::parser::WhitespaceMode::Condense);
    let output = parse_with_options(source, &options);
    let ul = output.children()[0].as_element().unwrap();
    assert_eq!(ul.children.len(), 1);
    let li = ul.children[0].as_element().unwrap();
    assert_eq!(li.children[0].as_text(), Some("a b"));
}

#[test]
fn test_missing_closing_tag_recovers() {
    let output = parse("<div><p>text</div>");
    assert_eq!(output.children().len(), 1);

    let div = output.children()[0].as_element().unwrap();
    assert_eq!(div.tag, "div");
    let p = div.children[0].as_element().unwrap();
    assert_eq!(p.tag, "p");
    assert_eq!(p.children[0].as_text(), Some("text"));

    assert_eq!(
        output.diagnostics,
        vec![ParseError::MissingClosingTag {
            tag: "p".to_string(),
            span: 5..8,
        }]
    );
}

#[test]
fn test_unmatched_closing_tag_is_skipped() {
    let output = parse("a</span>b");
    assert_eq!(output.diagnostics.len(), 1);
    assert!(matches!(
        &output.diagnostics[0],
        ParseError::UnmatchedClosingTag { tag, span } if tag == "span" && *span == (1..8)
    ));
    let mut text = String::new();
    collect_text(&output.ast, &mut text);
    assert_eq!(text, "ab");
}

#[test]
fn test_end_of_input_closes_everything() {
    let output = parse("<div><span>x");
    let tags: Vec<String> = output
        .diagnostics
        .iter()
        .filter_map(|d| match d {
            ParseError::MissingClosingTag { tag, .. } => Some(tag.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(tags, vec!["span", "div"]);
}

#[test]
fn test_unterminated_constructs() {
    assert!(matches!(
        parse("<!-- open").diagnostics.as_slice(),
        [ParseError::UnterminatedComment { .. }]
    ));
    assert!(matches!(
        parse("{{ open").diagnostics.as_slice(),
        [ParseError::UnterminatedInterpolation { .. }]
    ));
}

#[test]
fn test_parse_never_fails_on_garbage() {
    let inputs = [
        "<",
        "</",
        "<<<>>>",
        "<a b='",
        "<a b=\"c",
        "{{",
        "}}",
        "<![CDATA[",
        "<div <p>",
        "</>",
        "<a/><b></c>",
    ];
    for input in inputs {
        let output = parse(input);
        assert_eq!(output.ast.kind(), NodeKind::Root, "input: {:?}", input);
        assert_eq!(output.ast.span(), &(0..input.len()), "input: {:?}", input);
    }

    assert_eq!(
        parse("<![CDATA[").diagnostics,
        vec![ParseError::UnterminatedCdata { span: 0..9 }]
    );
}

#[test]
fn test_nesting_limit_is_reported() {
    let options = ParserOptions::new().with_max_depth(2);
    let output = parse_with_options("<ul><li><b>x</b></li></ul>", &options);
    assert!(matches!(
        &output.diagnostics[0],
        ParseError::NestingTooDeep { tag, limit: 2, .. } if tag == "b"
    ));
    let mut text = String::new();
    collect_text(&output.ast, &mut text);
    assert_eq!(text, "x");
}

#[test]
fn test_builder_tree_matches_parsed_tree_shape() {
    let built = ElementNode::new("p").with_child(TemplateNode::text("Vue"));
    let parsed = parse("<p>Vue</p>");
    let p = parsed.children()[0].as_element().unwrap();
    assert_eq!(p.tag, built.tag);
    assert_eq!(p.children.len(), built.children.len());
    assert_eq!(p.children[0].as_text(), built.children[0].as_text());
}
