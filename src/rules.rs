//! The rule predicates.
//!
//! Each rule is a pure function from [`Document`] to [`RuleStatus`]. Rules
//! share no state, never mutate the document, and are total over any
//! parseable input: a missing element is a normal `Fail`, never a panic or
//! an error. Parameterized checks (landmark presence, counts, scoped link
//! minimums) are shared helpers; each registered rule is a small named
//! wrapper fixing the parameters.

use crate::dom::{Document, Node};
use crate::report::RuleStatus;
use regex::Regex;
use std::sync::LazyLock;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static DOCTYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!doctype\s+html>").unwrap());

static COPYRIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)©|&copy;|copyright").unwrap());

/// The tag+class container shapes the exercises forbid: generic `div`s
/// carrying semantic-sounding class names instead of the semantic element.
static LEGACY_CONTAINERS: &[(&str, &str)] = &[
    ("div", "top-of-page"),
    ("div", "menu"),
    ("div", "main-content"),
    ("div", "blog-post"),
    ("div", "sidebar"),
    ("div", "bottom-of-page"),
];

// ─── Shared helpers ─────────────────────────────────────────────────────────

fn has_landmark(doc: &Document, tag: &str) -> RuleStatus {
    if doc.select_first(tag).is_some() {
        RuleStatus::Pass
    } else {
        RuleStatus::fail(format!("no <{}> element found", tag))
    }
}

fn count_at_least(doc: &Document, tag: &str, n: usize) -> RuleStatus {
    let found = doc.select_all(tag).len();
    if found >= n {
        RuleStatus::Pass
    } else {
        RuleStatus::fail(format!(
            "found {} <{}> element(s), need at least {}",
            found, tag, n
        ))
    }
}

/// Anchor count within `scope` elements across the whole document.
fn min_links_within(doc: &Document, scope: &str, n: usize) -> RuleStatus {
    let found = doc.select_scoped(scope, "a").len();
    if found >= n {
        RuleStatus::Pass
    } else {
        RuleStatus::fail(format!(
            "found {} link(s) inside <{}>, need at least {}",
            found, scope, n
        ))
    }
}

/// Every `parent_tag` element contains at least one `child_tag` descendant.
/// Zero parents pass vacuously; rule sets pair this with an explicit count
/// precondition.
fn each_has_child(doc: &Document, parent_tag: &str, child_tag: &str) -> RuleStatus {
    for (i, parent) in doc.select_all(parent_tag).iter().enumerate() {
        if parent.find_first(child_tag).is_none() {
            return RuleStatus::fail(format!(
                "<{}> {} has no <{}> descendant",
                parent_tag,
                i + 1,
                child_tag
            ));
        }
    }
    RuleStatus::Pass
}

/// The page-level footer: a `footer` that is a direct child of the
/// body-equivalent root. An article's footer never qualifies.
fn page_footer(doc: &Document) -> Option<&Node> {
    doc.page_scope()?
        .element_children()
        .find(|n| n.is_element("footer"))
}

/// Index of the first adjacent pair in a heading-level sequence that jumps
/// up by more than one. Decreasing levels are always allowed.
pub fn first_upward_skip(levels: &[u8]) -> Option<usize> {
    levels
        .windows(2)
        .position(|pair| pair[1] > pair[0] + 1)
}

// ─── Rule predicates ────────────────────────────────────────────────────────

pub(crate) fn doctype_declared(doc: &Document) -> RuleStatus {
    if DOCTYPE_RE.is_match(&doc.source) {
        RuleStatus::Pass
    } else {
        RuleStatus::fail("no HTML5 doctype declaration found")
    }
}

pub(crate) fn has_header(doc: &Document) -> RuleStatus {
    has_landmark(doc, "header")
}

pub(crate) fn has_main(doc: &Document) -> RuleStatus {
    has_landmark(doc, "main")
}

pub(crate) fn has_aside(doc: &Document) -> RuleStatus {
    has_landmark(doc, "aside")
}

pub(crate) fn has_h1(doc: &Document) -> RuleStatus {
    has_landmark(doc, "h1")
}

pub(crate) fn header_contains_nav(doc: &Document) -> RuleStatus {
    if doc.select_scoped("header", "nav").is_empty() {
        RuleStatus::fail("no <nav> inside a <header>")
    } else {
        RuleStatus::Pass
    }
}

pub(crate) fn nav_min_links(doc: &Document) -> RuleStatus {
    min_links_within(doc, "nav", 3)
}

pub(crate) fn header_nav_min_links(doc: &Document) -> RuleStatus {
    let Some(nav) = doc.select_scoped("header", "nav").into_iter().next() else {
        return RuleStatus::fail("no <nav> inside a <header>");
    };
    let found = nav.find_all("a").len();
    if found >= 3 {
        RuleStatus::Pass
    } else {
        RuleStatus::fail(format!(
            "header navigation has {} link(s), need at least 3",
            found
        ))
    }
}

pub(crate) fn articles_at_least_two(doc: &Document) -> RuleStatus {
    count_at_least(doc, "article", 2)
}

pub(crate) fn articles_inside_main(doc: &Document) -> RuleStatus {
    let found = doc.select_scoped("main", "article").len();
    if found >= 2 {
        RuleStatus::Pass
    } else {
        RuleStatus::fail(format!(
            "found {} <article> element(s) inside <main>, need at least 2",
            found
        ))
    }
}

pub(crate) fn each_article_has_h2(doc: &Document) -> RuleStatus {
    each_has_child(doc, "article", "h2")
}

pub(crate) fn each_article_has_footer(doc: &Document) -> RuleStatus {
    each_has_child(doc, "article", "footer")
}

pub(crate) fn articles_distinct_content(doc: &Document) -> RuleStatus {
    let articles = doc.select_all("article");
    if articles.len() < 2 {
        return RuleStatus::fail(format!(
            "need at least two <article> elements to compare, found {}",
            articles.len()
        ));
    }
    // Exact trimmed-text inequality; no similarity threshold.
    let first = articles[0].text_content().trim().to_string();
    let second = articles[1].text_content().trim().to_string();
    if first == second {
        RuleStatus::fail("the first two <article> elements have identical text content")
    } else {
        RuleStatus::Pass
    }
}

pub(crate) fn article_footers_nonempty(doc: &Document) -> RuleStatus {
    for (i, article) in doc.select_all("article").iter().enumerate() {
        match article.find_first("footer") {
            None => {
                return RuleStatus::fail(format!("<article> {} has no <footer>", i + 1));
            }
            Some(footer) if footer.text_content().trim().is_empty() => {
                return RuleStatus::fail(format!("<article> {} has an empty <footer>", i + 1));
            }
            Some(_) => {}
        }
    }
    RuleStatus::Pass
}

pub(crate) fn has_page_footer(doc: &Document) -> RuleStatus {
    if page_footer(doc).is_some() {
        RuleStatus::Pass
    } else {
        RuleStatus::fail("no page-level <footer> (direct child of <body>)")
    }
}

pub(crate) fn page_footer_copyright(doc: &Document) -> RuleStatus {
    let Some(footer) = page_footer(doc) else {
        return RuleStatus::fail("no page-level <footer> (direct child of <body>)");
    };
    if COPYRIGHT_RE.is_match(&footer.text_content()) {
        RuleStatus::Pass
    } else {
        RuleStatus::fail("page footer has no copyright mark (©, &copy;, or 'copyright')")
    }
}

pub(crate) fn page_footer_contact(doc: &Document) -> RuleStatus {
    let Some(footer) = page_footer(doc) else {
        return RuleStatus::fail("no page-level <footer> (direct child of <body>)");
    };
    let len = footer.text_content().trim().chars().count();
    if len > 10 {
        RuleStatus::Pass
    } else {
        RuleStatus::fail(format!(
            "page footer text is too short for contact information ({} characters)",
            len
        ))
    }
}

pub(crate) fn no_legacy_containers(doc: &Document) -> RuleStatus {
    for node in doc.descendants() {
        let Some(el) = node.as_element() else { continue };
        for (tag, class) in LEGACY_CONTAINERS {
            if el.tag == *tag && el.has_class(class) {
                return RuleStatus::fail(format!(
                    "uses <{} class=\"{}\"> instead of a semantic element",
                    tag, class
                ));
            }
        }
    }
    RuleStatus::Pass
}

pub(crate) fn main_wraps_articles(doc: &Document) -> RuleStatus {
    let Some(main) = doc.select_first("main") else {
        return RuleStatus::fail("no <main> element found");
    };
    if main.find_first("article").is_some() {
        RuleStatus::Pass
    } else {
        RuleStatus::fail("<main> contains no <article> elements")
    }
}

pub(crate) fn heading_levels_present(doc: &Document) -> RuleStatus {
    match (doc.select_first("h1"), doc.select_first("h2")) {
        (Some(_), Some(_)) => RuleStatus::Pass,
        (None, _) => RuleStatus::fail("no <h1> element found"),
        (_, None) => RuleStatus::fail("no <h2> element found"),
    }
}

pub(crate) fn document_skeleton(doc: &Document) -> RuleStatus {
    for tag in ["html", "head", "body"] {
        if doc.select_first(tag).is_none() {
            return RuleStatus::fail(format!("no <{}> element found", tag));
        }
    }
    RuleStatus::Pass
}

pub(crate) fn head_has_title(doc: &Document) -> RuleStatus {
    let Some(title) = doc.select_scoped("head", "title").into_iter().next() else {
        return RuleStatus::fail("no <title> inside <head>");
    };
    if title.text_content().trim().is_empty() {
        RuleStatus::fail("<title> is empty")
    } else {
        RuleStatus::Pass
    }
}

pub(crate) fn header_has_h1(doc: &Document) -> RuleStatus {
    let Some(header) = doc.select_first("header") else {
        return RuleStatus::fail("no <header> element found");
    };
    if header.find_first("h1").is_some() {
        RuleStatus::Pass
    } else {
        RuleStatus::fail("<header> has no <h1> page title")
    }
}

pub(crate) fn aside_has_heading(doc: &Document) -> RuleStatus {
    let Some(aside) = doc.select_first("aside") else {
        return RuleStatus::fail("no <aside> element found");
    };
    let has_heading = aside
        .descendants()
        .any(|n| ["h2", "h3", "h4"].iter().any(|t| n.is_element(t)));
    if has_heading {
        RuleStatus::Pass
    } else {
        RuleStatus::fail("<aside> has no heading (h2, h3, or h4)")
    }
}

pub(crate) fn heading_hierarchy_no_skip(doc: &Document) -> RuleStatus {
    let levels = doc.heading_levels();
    match first_upward_skip(&levels) {
        None => RuleStatus::Pass,
        Some(i) => RuleStatus::fail(format!(
            "heading level jumps from h{} to h{}",
            levels[i],
            levels[i + 1]
        )),
    }
}

pub(crate) fn article_paragraphs_substantial(doc: &Document) -> RuleStatus {
    for (i, article) in doc.select_all("article").iter().enumerate() {
        let paragraphs = article.find_all("p");
        if paragraphs.is_empty() {
            return RuleStatus::fail(format!("<article> {} has no paragraphs", i + 1));
        }
        for p in paragraphs {
            let len = p.text_content().trim().chars().count();
            if len <= 20 {
                return RuleStatus::fail(format!(
                    "<article> {} has a placeholder-length paragraph ({} characters)",
                    i + 1,
                    len
                ));
            }
        }
    }
    RuleStatus::Pass
}
