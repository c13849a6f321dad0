//! Grading reports.
//!
//! A [`Report`] is created fresh per validation run and has exactly one
//! entry per rule in the selected set, in declaration order. It carries no
//! state beyond the run that produced it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum RuleStatus {
    Pass,
    /// The pass condition was not met; carries a diagnostic string, not a
    /// stack trace.
    Fail(String),
}

impl RuleStatus {
    pub fn fail(reason: impl Into<String>) -> Self {
        RuleStatus::Fail(reason.into())
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, RuleStatus::Pass)
    }
}

/// One rule's outcome within a report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub rule: String,
    pub description: String,
    #[serde(flatten)]
    pub status: RuleStatus,
}

/// Ordered outcomes for one rule set run against one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub ruleset: String,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    /// True when every rule in the set passed.
    pub fn passed(&self) -> bool {
        self.entries.iter().all(|e| e.status.is_pass())
    }

    /// The entries whose rule failed, in declaration order.
    pub fn failures(&self) -> Vec<&ReportEntry> {
        self.entries.iter().filter(|e| !e.status.is_pass()).collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            match &entry.status {
                RuleStatus::Pass => writeln!(f, "PASS {}", entry.description)?,
                RuleStatus::Fail(reason) => {
                    writeln!(f, "FAIL {} ({})", entry.description, reason)?
                }
            }
        }
        let failed = self.failures().len();
        write!(
            f,
            "{}: {} passed, {} failed",
            self.ruleset,
            self.entries.len() - failed,
            failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report {
            ruleset: "semantic-practice".to_string(),
            entries: vec![
                ReportEntry {
                    rule: "has-main".to_string(),
                    description: "Has <main> element".to_string(),
                    status: RuleStatus::Pass,
                },
                ReportEntry {
                    rule: "has-aside".to_string(),
                    description: "Has <aside> element".to_string(),
                    status: RuleStatus::fail("no <aside> element found"),
                },
            ],
        }
    }

    #[test]
    fn passed_requires_every_rule() {
        let mut report = sample();
        assert!(!report.passed());
        report.entries[1].status = RuleStatus::Pass;
        assert!(report.passed());
    }

    #[test]
    fn display_renders_one_line_per_rule() {
        let rendered = sample().to_string();
        assert!(rendered.contains("PASS Has <main> element"));
        assert!(rendered.contains("FAIL Has <aside> element (no <aside> element found)"));
        assert!(rendered.ends_with("semantic-practice: 1 passed, 1 failed"));
    }

    #[test]
    fn serializes_to_structured_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["entries"][0]["status"], "pass");
        assert_eq!(json["entries"][1]["status"], "fail");
        assert_eq!(json["entries"][1]["reason"], "no <aside> element found");
    }
}
