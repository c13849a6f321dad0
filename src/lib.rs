//! Grading harness for semantic HTML structure exercises.
//!
//! `semgrade` parses a student-submitted HTML file into an immutable
//! document tree and evaluates a named rule set of independent pass/fail
//! structure checks against it:
//!
//! ```text
//! load(path) → source → parse(source) → Document → validate(&doc, set) → Report
//! ```
//!
//! Two rule sets ship with the crate, one per exercise template:
//! `semantic-practice` and `hobby-page`. Rules are pure, read-only tree
//! inspections; every rule in a set is evaluated exactly once regardless of
//! earlier failures, and element absence is a normal `Fail` outcome. Only a
//! missing, unreadable, or unparseable submission is an error, surfaced
//! before any rule runs.
//!
//! # Quick Start
//!
//! ```rust
//! let html = r#"
//! <!doctype html>
//! <html><body>
//!   <main><article><h2>Post</h2></article></main>
//! </body></html>
//! "#;
//!
//! let doc = semgrade::parse(html).expect("parseable submission");
//! let report = semgrade::validate(&doc, "semantic-practice").expect("known rule set");
//! for entry in &report.entries {
//!     println!("{}: {:?}", entry.rule, entry.status);
//! }
//! ```

pub mod dom;
pub mod error;
pub mod parse;
pub mod report;
pub mod rules;
pub mod ruleset;
pub mod validate;

pub use dom::{Document, Node, NodeKind};
pub use error::*;
pub use report::{Report, ReportEntry, RuleStatus};
pub use ruleset::{RULE_SETS, Rule, RuleSet, lookup_rule_set};

// Re-export entry-point functions at the crate root for convenience.
pub use parse::parse;
pub use validate::validate;

use std::path::Path;

/// Read a submission from disk.
///
/// # Errors
///
/// A missing file is [`SourceErrorKind::NotFound`]; any other read failure
/// is [`SourceErrorKind::Unreadable`]. Both fail the run before any rule
/// executes.
pub fn load(path: impl AsRef<Path>) -> Result<String, SourceError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| {
        let kind = if e.kind() == std::io::ErrorKind::NotFound {
            SourceErrorKind::NotFound
        } else {
            SourceErrorKind::Unreadable
        };
        SourceError {
            kind,
            message: e.to_string(),
            path: Some(path.to_path_buf()),
        }
    })
}

/// Convenience entry point composing load → parse → validate.
///
/// # Errors
///
/// Returns [`GradeError::Source`] when the submission cannot be loaded or
/// parsed, and [`GradeError::Config`] for an unknown rule-set name. Rule
/// failures are not errors; they land in the returned [`Report`].
pub fn grade(path: impl AsRef<Path>, ruleset_name: &str) -> Result<Report, GradeError> {
    let path = path.as_ref();
    let source = load(path)?;
    let doc = parse::parse(&source).map_err(|e| SourceError {
        path: Some(path.to_path_buf()),
        ..e
    })?;
    let report = validate::validate(&doc, ruleset_name)?;
    Ok(report)
}
