//! HTML parsing for student submissions.
//!
//! Builds an immutable [`Document`] from raw markup. The parser accepts the
//! subset of HTML that intro-course submissions actually contain: a doctype
//! prologue, comments, nested elements with quoted or unquoted attributes,
//! void elements, and `/>` self-closing syntax. Tag and attribute names are
//! lowercased so rule queries are case-insensitive.
//!
//! Anything that cannot be parsed at all is a [`SourceError`] with kind
//! `Malformed` — an environment error surfaced before any rule runs, never
//! a rule failure.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{escaped, is_not, tag, tag_no_case, take_until},
    character::complete::{alphanumeric1, char, multispace0, multispace1, none_of},
    combinator::opt,
    multi::many0,
    sequence::{delimited, preceded, separated_pair},
};
use tracing::debug;

use crate::dom::{Document, ElementData, Node, NodeKind};
use crate::error::SourceError;

/// Elements with no content model and no closing tag.
static VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text up to the matching close tag.
static RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parse a markup string into an unvalidated Document.
///
/// Performs tokenization and tree construction only; no rule is evaluated
/// here.
pub fn parse(input: &str) -> Result<Document, SourceError> {
    if input.trim().is_empty() {
        return Err(SourceError::malformed("empty submission"));
    }

    let (rest, doctype) = parse_prologue(input);

    // many0 cannot fail; an unparseable construct simply stops consumption
    // and is reported via the leftover check below.
    let (rest, children) = many0(parse_node)(rest)
        .map_err(|_| SourceError::malformed("unparseable markup"))?;

    if !rest.trim().is_empty() {
        let offset = input.len() - rest.len();
        let snippet: String = rest.trim_start().chars().take(30).collect();
        return Err(SourceError::malformed(format!(
            "unparseable markup at byte {}: '{}'",
            offset, snippet
        )));
    }

    let doc = Document {
        source: input.to_string(),
        doctype,
        children,
    };
    debug!(
        elements = doc.descendants().filter(|n| n.as_element().is_some()).count(),
        doctype = doc.doctype.is_some(),
        "parsed submission"
    );
    Ok(doc)
}

/// Consume leading whitespace, comments, and an optional doctype, returning
/// the doctype content if present.
fn parse_prologue(input: &str) -> (&str, Option<String>) {
    let mut rest = input;
    loop {
        if let Ok((r, _)) = multispace0::<&str, nom::error::Error<&str>>(rest) {
            rest = r;
        }
        match parse_comment(rest) {
            Ok((r, _)) => rest = r,
            Err(_) => break,
        }
    }
    match parse_doctype(rest) {
        Ok((r, content)) => (r, Some(content.trim().to_string())),
        Err(_) => (rest, None),
    }
}

fn parse_doctype(input: &str) -> IResult<&str, &str> {
    delimited(tag_no_case("<!doctype"), take_until(">"), char('>'))(input)
}

fn parse_comment(input: &str) -> IResult<&str, &str> {
    delimited(tag("<!--"), take_until("-->"), tag("-->"))(input)
}

/// Attempt to parse a string as a valid tag name.
fn parse_tag_name(input: &str) -> IResult<&str, &str> {
    alphanumeric1(input)
}

/// Parse a tag in the form `</name>`, returning the lowercased name.
fn parse_close_tag(input: &str) -> IResult<&str, String> {
    let (rest, name) = delimited(
        tag("</"),
        parse_tag_name,
        preceded(multispace0, char('>')),
    )(input)?;
    Ok((rest, name.to_ascii_lowercase()))
}

/// Parse a tag in the form `<name attr=value ...>` or `<name ... />`,
/// returning the [`ElementData`] and whether it was self-closing.
fn parse_open_tag(input: &str) -> IResult<&str, (ElementData, bool)> {
    let (rest, _) = char('<')(input)?;
    let (rest, name) = parse_tag_name(rest)?;
    let (rest, attrs) = many0(preceded(multispace1, single_attr_parser))(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, slash) = opt(char('/'))(rest)?;
    let (rest, _) = char('>')(rest)?;

    let attributes = attrs
        .into_iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
        .collect();
    Ok((
        rest,
        (
            ElementData::new(name.to_ascii_lowercase(), attributes),
            slash.is_some(),
        ),
    ))
}

/// Text content between tags.
fn parse_text(input: &str) -> IResult<&str, Node> {
    let (rest, data) = is_not("<")(input)?;
    Ok((rest, Node::text(data)))
}

fn parse_comment_node(input: &str) -> IResult<&str, Node> {
    let (rest, data) = parse_comment(input)?;
    Ok((rest, Node::comment(data)))
}

/// Raw text content up to `</name`, matched case-insensitively.
fn raw_text_until_close<'a>(input: &'a str, name: &str) -> IResult<&'a str, &'a str> {
    let needle = format!("</{}", name);
    match input.to_ascii_lowercase().find(&needle) {
        Some(pos) => Ok((&input[pos..], &input[..pos])),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TakeUntil,
        ))),
    }
}

/// Parse a complete element, including its subtree.
fn parse_element(input: &str) -> IResult<&str, Node> {
    let (rest, (element, self_closing)) = parse_open_tag(input)?;

    if self_closing || VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return Ok((
            rest,
            Node {
                kind: NodeKind::Element(element),
                children: vec![],
            },
        ));
    }

    if RAW_TEXT_ELEMENTS.contains(&element.tag.as_str()) {
        let (rest, raw) = raw_text_until_close(rest, &element.tag)?;
        let (rest, _) = parse_close_tag(rest)?;
        let children = if raw.is_empty() { vec![] } else { vec![Node::text(raw)] };
        return Ok((
            rest,
            Node {
                kind: NodeKind::Element(element),
                children,
            },
        ));
    }

    let (rest, children) = many0(parse_node)(rest)?;
    let (rest, close_name) = parse_close_tag(rest)?;
    if close_name != element.tag {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((
        rest,
        Node {
            kind: NodeKind::Element(element),
            children,
        },
    ))
}

fn parse_node(input: &str) -> IResult<&str, Node> {
    alt((parse_comment_node, parse_element, parse_text))(input)
}

// Attribute parsing below, in the quirk-tolerant order browsers use:
// quoted values first, then unquoted, then bare attribute names.

fn parse_single_quoted(input: &str) -> IResult<&str, &str> {
    let esc = escaped(none_of("\\'"), '\\', tag("'"));
    let esc_or_empty = alt((esc, tag("")));
    delimited(tag("'"), esc_or_empty, tag("'"))(input)
}

fn parse_double_quoted(input: &str) -> IResult<&str, &str> {
    let esc = escaped(none_of("\\\""), '\\', tag("\""));
    let esc_or_empty = alt((esc, tag("")));
    delimited(tag("\""), esc_or_empty, tag("\""))(input)
}

fn parse_unquoted(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\"'=<>`")(input)
}

fn value_parser(input: &str) -> IResult<&str, &str> {
    alt((parse_single_quoted, parse_double_quoted, parse_unquoted))(input)
}

fn name_parser(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\"'>/=")(input)
}

fn single_attr_parser(input: &str) -> IResult<&str, (&str, &str)> {
    let mut key_value = separated_pair(name_parser, char('='), value_parser);
    if let Ok((rest, (k, v))) = key_value(input) {
        Ok((rest, (k, v)))
    } else {
        let (rest, name) = name_parser(input)?;
        Ok((rest, (name, "")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements() {
        let doc = parse("<html><body><h1>Hello</h1></body></html>").unwrap();
        let h1 = doc.select_first("h1").unwrap();
        assert_eq!(h1.text_content(), "Hello");
    }

    #[test]
    fn lowercases_tags_and_attributes() {
        let doc = parse(r#"<DIV CLASS="menu">x</DIV>"#).unwrap();
        let div = doc.select_first("div").unwrap();
        assert!(div.as_element().unwrap().has_class("menu"));
    }

    #[test]
    fn parses_doctype_prologue() {
        let doc = parse("<!DOCTYPE html>\n<html><body></body></html>").unwrap();
        assert_eq!(doc.doctype.as_deref(), Some("html"));
    }

    #[test]
    fn doctype_is_optional() {
        let doc = parse("<p>no prologue</p>").unwrap();
        assert!(doc.doctype.is_none());
    }

    #[test]
    fn void_elements_take_no_children() {
        let doc = parse("<p>a<br>b</p>").unwrap();
        let p = doc.select_first("p").unwrap();
        assert_eq!(p.text_content(), "ab");
        assert!(doc.select_first("br").unwrap().children.is_empty());
    }

    #[test]
    fn self_closing_syntax_accepted() {
        let doc = parse(r#"<section><img src="a.png" /></section>"#).unwrap();
        let img = doc.select_first("img").unwrap();
        assert_eq!(img.as_element().unwrap().attr("src"), Some("a.png"));
    }

    #[test]
    fn comments_are_kept_out_of_text() {
        let doc = parse("<p>a<!-- hidden -->b</p>").unwrap();
        assert_eq!(doc.select_first("p").unwrap().text_content(), "ab");
    }

    #[test]
    fn comment_before_doctype_is_tolerated() {
        let doc = parse("<!-- intro -->\n<!doctype html>\n<html><body></body></html>").unwrap();
        assert_eq!(doc.doctype.as_deref(), Some("html"));
    }

    #[test]
    fn style_content_is_raw_text() {
        let doc = parse("<style>p > a { color: red; }</style>").unwrap();
        let style = doc.select_first("style").unwrap();
        assert!(style.text_content().contains("color: red"));
    }

    #[test]
    fn attribute_quirks() {
        let doc =
            parse(r#"<div attr1 attr2=two attr3='three' attr4="number four">x</div>"#).unwrap();
        let el = doc.select_first("div").unwrap().as_element().unwrap().clone();
        assert_eq!(el.attr("attr1"), Some(""));
        assert_eq!(el.attr("attr2"), Some("two"));
        assert_eq!(el.attr("attr3"), Some("three"));
        assert_eq!(el.attr("attr4"), Some("number four"));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(parse("").is_err());
        assert!(parse("   \n  ").is_err());
    }

    #[test]
    fn mismatched_close_tag_is_an_error() {
        assert!(parse("<html></closing><opening></html>").is_err());
    }

    #[test]
    fn error_reports_offset_of_bad_markup() {
        let err = parse("<p>ok</p><div></span>").unwrap_err();
        assert!(err.message.contains("byte 9"), "got: {}", err.message);
    }
}
