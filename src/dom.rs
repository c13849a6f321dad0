//! Immutable document tree produced by [`crate::parse`].
//!
//! The tree is owned and never mutated after parsing; every query is a
//! read-only, depth-first walk in document order. Rules never touch raw
//! markup again except through this surface (the one exception being the
//! doctype rule, which is defined over the source text kept on
//! [`Document`]).

use std::collections::HashMap;

/// A parsed submission: the raw source text, the doctype prologue if one
/// was present, and the top-level nodes in document order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    pub source: String,
    pub doctype: Option<String>,
    pub children: Vec<Node>,
}

/// A single node in the tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Tag name (lowercased at parse time) and attribute map of an element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElementData {
    pub tag: String,
    pub attributes: HashMap<String, String>,
}

impl ElementData {
    pub fn new(tag: impl Into<String>, attributes: HashMap<String, String>) -> Self {
        ElementData {
            tag: tag.into(),
            attributes,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the `class` attribute contains `class_name` as a
    /// whitespace-separated token.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// `Some(1..=6)` for `h1`..`h6`, `None` otherwise.
    pub fn heading_level(&self) -> Option<u8> {
        match self.tag.as_str() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }
}

impl Node {
    pub fn element(tag: impl Into<String>, attributes: HashMap<String, String>, children: Vec<Node>) -> Self {
        Node {
            kind: NodeKind::Element(ElementData::new(tag, attributes)),
            children,
        }
    }

    pub fn text(data: impl Into<String>) -> Self {
        Node {
            kind: NodeKind::Text(data.into()),
            children: vec![],
        }
    }

    pub fn comment(data: impl Into<String>) -> Self {
        Node {
            kind: NodeKind::Comment(data.into()),
            children: vec![],
        }
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn is_element(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|el| el.tag == tag)
    }

    /// Depth-first preorder iterator over all descendants, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant element with the given tag, in document order.
    pub fn find_first(&self, tag: &str) -> Option<&Node> {
        self.descendants().find(|n| n.is_element(tag))
    }

    /// All descendant elements with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Node> {
        self.descendants().filter(|n| n.is_element(tag)).collect()
    }

    /// Direct element children, skipping text and comment nodes.
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|n| n.as_element().is_some())
    }

    /// Accumulated text content: the order-preserving concatenation of all
    /// descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeKind::Text(data) = &self.kind {
            out.push_str(data);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Stack-based preorder walk. Popping a node pushes its children in reverse
/// so siblings come out in document order.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl Document {
    /// Depth-first preorder iterator over every node in the document.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First element with the given tag anywhere in the document.
    pub fn select_first(&self, tag: &str) -> Option<&Node> {
        self.descendants().find(|n| n.is_element(tag))
    }

    /// All elements with the given tag, in document order.
    pub fn select_all(&self, tag: &str) -> Vec<&Node> {
        self.descendants().filter(|n| n.is_element(tag)).collect()
    }

    /// All `tag` elements that have an `ancestor` element somewhere above
    /// them (the descendant-combinator query `ancestor tag`). A node nested
    /// under several matching ancestors is reported once.
    pub fn select_scoped(&self, ancestor: &str, tag: &str) -> Vec<&Node> {
        fn walk<'a>(
            node: &'a Node,
            ancestor: &str,
            tag: &str,
            inside: bool,
            out: &mut Vec<&'a Node>,
        ) {
            if inside && node.is_element(tag) {
                out.push(node);
            }
            let inside = inside || node.is_element(ancestor);
            for child in &node.children {
                walk(child, ancestor, tag, inside, out);
            }
        }
        let mut out = Vec::new();
        for child in &self.children {
            walk(child, ancestor, tag, false, &mut out);
        }
        out
    }

    /// The body-equivalent root: the `body` element if one exists, else the
    /// first top-level element. Page-level rules (the page footer) scope to
    /// direct children of this node so an article's footer never satisfies
    /// them.
    pub fn page_scope(&self) -> Option<&Node> {
        self.select_first("body")
            .or_else(|| self.children.iter().find(|n| n.as_element().is_some()))
    }

    /// Heading levels (`h1`..`h6`) in document order.
    pub fn heading_levels(&self) -> Vec<u8> {
        self.descendants()
            .filter_map(|n| n.as_element().and_then(ElementData::heading_level))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn el(tag: &str, children: Vec<Node>) -> Node {
        Node::element(tag, HashMap::new(), children)
    }

    fn sample() -> Document {
        Document {
            source: String::new(),
            doctype: None,
            children: vec![el(
                "html",
                vec![el(
                    "body",
                    vec![
                        el("h1", vec![Node::text("Title")]),
                        el(
                            "main",
                            vec![
                                el("article", vec![el("h2", vec![Node::text("One")])]),
                                el("article", vec![el("h2", vec![Node::text("Two")])]),
                            ],
                        ),
                        el("footer", vec![Node::text("© 2024")]),
                    ],
                )],
            )],
        }
    }

    #[test]
    fn select_all_is_document_order() {
        let doc = sample();
        let headings: Vec<String> = doc
            .select_all("h2")
            .iter()
            .map(|n| n.text_content())
            .collect();
        assert_eq!(headings, vec!["One", "Two"]);
    }

    #[test]
    fn scoped_select_honors_ancestor() {
        let doc = sample();
        assert_eq!(doc.select_scoped("main", "article").len(), 2);
        assert_eq!(doc.select_scoped("aside", "article").len(), 0);
        // h1 is outside main
        assert!(doc.select_scoped("main", "h1").is_empty());
    }

    #[test]
    fn text_content_concatenates_in_order() {
        let doc = sample();
        let main = doc.select_first("main").unwrap();
        assert_eq!(main.text_content(), "OneTwo");
    }

    #[test]
    fn page_scope_prefers_body() {
        let doc = sample();
        assert!(doc.page_scope().unwrap().is_element("body"));
    }

    #[test]
    fn page_scope_falls_back_to_root_element() {
        let doc = Document {
            source: String::new(),
            doctype: None,
            children: vec![Node::comment("x"), el("main", vec![])],
        };
        assert!(doc.page_scope().unwrap().is_element("main"));
    }

    #[test]
    fn heading_levels_in_document_order() {
        let doc = sample();
        assert_eq!(doc.heading_levels(), vec![1, 2, 2]);
    }

    #[test]
    fn has_class_splits_tokens() {
        let attrs = HashMap::from([("class".to_string(), "menu wide".to_string())]);
        let el = ElementData::new("div", attrs);
        assert!(el.has_class("menu"));
        assert!(el.has_class("wide"));
        assert!(!el.has_class("men"));
    }
}
