//! Rule-set evaluation.
//!
//! Evaluates **every** rule in the selected set, in declaration order, with
//! no short-circuiting: a failed rule never suppresses the ones after it.
//! Validation does not modify the document.

use crate::dom::Document;
use crate::error::ConfigError;
use crate::report::{Report, ReportEntry};
use crate::ruleset::{lookup_rule_set, rule_set_names};
use tracing::debug;

/// Run the named rule set against a parsed document.
///
/// The report has exactly one entry per rule, in the set's declaration
/// order. Rules are independent and pure, so running this twice on the same
/// document yields identical reports.
///
/// # Errors
///
/// Returns [`ConfigError`] when `ruleset_name` is not a registered rule
/// set. Registration is fixed at build time.
pub fn validate(doc: &Document, ruleset_name: &str) -> Result<Report, ConfigError> {
    let rule_set = lookup_rule_set(ruleset_name).ok_or_else(|| ConfigError {
        name: ruleset_name.to_string(),
        known: rule_set_names(),
    })?;

    let entries: Vec<ReportEntry> = rule_set
        .rules
        .iter()
        .map(|rule| {
            let status = (rule.check)(doc);
            debug!(rule = rule.name, passed = status.is_pass(), "evaluated rule");
            ReportEntry {
                rule: rule.name.to_string(),
                description: rule.description.to_string(),
                status,
            }
        })
        .collect();

    Ok(Report {
        ruleset: rule_set.name.to_string(),
        entries,
    })
}
