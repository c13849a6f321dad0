//! Static rule-set registry.
//!
//! Rule sets are fixed at build time: each exercise template maps to an
//! ordered, read-only list of rules. There is no runtime registration
//! surface.

use crate::dom::Document;
use crate::report::RuleStatus;
use crate::rules;

pub(crate) type RuleFn = fn(&Document) -> RuleStatus;

/// A named, independent pass/fail check over a parsed document.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    /// Human-readable pass condition, phrased the way the exercise hand-out
    /// phrases it.
    pub description: &'static str,
    pub(crate) check: RuleFn,
}

/// A rule set scoped to one exercise template.
pub struct RuleSet {
    pub name: &'static str,
    pub rules: &'static [Rule],
}

/// Rules for the semantic layout practice page.
static SEMANTIC_PRACTICE: &[Rule] = &[
    Rule {
        name: "doctype-declared",
        description: "Has proper DOCTYPE declaration",
        check: rules::doctype_declared,
    },
    Rule {
        name: "has-header",
        description: "Has <header> element",
        check: rules::has_header,
    },
    Rule {
        name: "header-contains-nav",
        description: "Has <nav> element inside header",
        check: rules::header_contains_nav,
    },
    Rule {
        name: "nav-min-links",
        description: "Navigation has at least 3 links",
        check: rules::nav_min_links,
    },
    Rule {
        name: "has-main",
        description: "Has <main> element",
        check: rules::has_main,
    },
    Rule {
        name: "articles-at-least-two",
        description: "Has at least 2 <article> elements",
        check: rules::articles_at_least_two,
    },
    Rule {
        name: "articles-inside-main",
        description: "Articles are inside main element",
        check: rules::articles_inside_main,
    },
    Rule {
        name: "each-article-has-h2",
        description: "Each article has a heading (h2)",
        check: rules::each_article_has_h2,
    },
    Rule {
        name: "each-article-has-footer",
        description: "Each article has a footer",
        check: rules::each_article_has_footer,
    },
    Rule {
        name: "has-aside",
        description: "Has <aside> element",
        check: rules::has_aside,
    },
    Rule {
        name: "has-page-footer",
        description: "Has page <footer> element",
        check: rules::has_page_footer,
    },
    Rule {
        name: "page-footer-copyright",
        description: "Page footer contains copyright symbol",
        check: rules::page_footer_copyright,
    },
    Rule {
        name: "no-legacy-containers",
        description: "Uses semantic tags instead of divs with classes",
        check: rules::no_legacy_containers,
    },
    Rule {
        name: "main-wraps-articles",
        description: "Main content is wrapped in <main> tag",
        check: rules::main_wraps_articles,
    },
    Rule {
        name: "heading-levels-present",
        description: "Proper heading hierarchy (h1 before h2)",
        check: rules::heading_levels_present,
    },
];

/// Rules for the free-form hobby page.
static HOBBY_PAGE: &[Rule] = &[
    Rule {
        name: "doctype-declared",
        description: "Has proper DOCTYPE declaration",
        check: rules::doctype_declared,
    },
    Rule {
        name: "document-skeleton",
        description: "Has valid HTML structure with html, head, and body tags",
        check: rules::document_skeleton,
    },
    Rule {
        name: "head-has-title",
        description: "Has <title> tag in head",
        check: rules::head_has_title,
    },
    Rule {
        name: "header-has-h1",
        description: "Has <header> with page title",
        check: rules::header_has_h1,
    },
    Rule {
        name: "header-nav-min-links",
        description: "Header has navigation with at least 3 links",
        check: rules::header_nav_min_links,
    },
    Rule {
        name: "has-main",
        description: "Has <main> section for primary content",
        check: rules::has_main,
    },
    Rule {
        name: "articles-at-least-two",
        description: "Has at least two <article> elements",
        check: rules::articles_at_least_two,
    },
    Rule {
        name: "articles-distinct-content",
        description: "Articles have different content",
        check: rules::articles_distinct_content,
    },
    Rule {
        name: "each-article-has-footer",
        description: "Each article has its own <footer>",
        check: rules::each_article_has_footer,
    },
    Rule {
        name: "article-footers-nonempty",
        description: "Article footers contain author name or publication date",
        check: rules::article_footers_nonempty,
    },
    Rule {
        name: "has-aside",
        description: "Has an <aside> element",
        check: rules::has_aside,
    },
    Rule {
        name: "aside-has-heading",
        description: "Aside has a heading",
        check: rules::aside_has_heading,
    },
    Rule {
        name: "page-footer-copyright",
        description: "Has page <footer> with copyright info",
        check: rules::page_footer_copyright,
    },
    Rule {
        name: "page-footer-contact",
        description: "Page footer contains contact information",
        check: rules::page_footer_contact,
    },
    Rule {
        name: "has-h1",
        description: "Has proper heading hierarchy (starts with h1)",
        check: rules::has_h1,
    },
    Rule {
        name: "heading-hierarchy-no-skip",
        description: "Does not skip heading levels",
        check: rules::heading_hierarchy_no_skip,
    },
    Rule {
        name: "article-paragraphs-substantial",
        description: "Has meaningful content (not placeholder text)",
        check: rules::article_paragraphs_substantial,
    },
    Rule {
        name: "articles-nested-in-main",
        description: "All semantic elements are properly nested",
        check: rules::main_wraps_articles,
    },
];

/// The registry of known rule sets, in declaration order.
pub static RULE_SETS: &[RuleSet] = &[
    RuleSet {
        name: "semantic-practice",
        rules: SEMANTIC_PRACTICE,
    },
    RuleSet {
        name: "hobby-page",
        rules: HOBBY_PAGE,
    },
];

/// Look up a rule set by name.
pub fn lookup_rule_set(name: &str) -> Option<&'static RuleSet> {
    RULE_SETS.iter().find(|rs| rs.name == name)
}

/// The registered rule-set names, in declaration order.
pub fn rule_set_names() -> Vec<String> {
    RULE_SETS.iter().map(|rs| rs.name.to_string()).collect()
}
