//! Outcome of a validation run

use std::fmt;

use advguard_core::errors::{AgError, AgErrorKind, AliasLookupError};
use advguard_core::ErrorTree;
use advguard_core_types::RunId;
use serde_json::{json, Value};
use thiserror::Error;

/// Why a pass stopped before producing a result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    #[error("alias lookup failed: {0}")]
    ExternalLookup(#[from] AliasLookupError),

    #[error("cancelled before completion")]
    Cancelled,
}

impl From<AbortReason> for AgError {
    fn from(reason: AbortReason) -> Self {
        match reason {
            AbortReason::ExternalLookup(err) => err.into(),
            AbortReason::Cancelled => AgError::new(AgErrorKind::Cancelled)
                .with_op("validate")
                .with_message("validation cancelled"),
        }
    }
}

/// A pass that started but could not finish.
///
/// Kept apart from the error tree: "the data is wrong" and "we could not tell
/// whether the data is wrong" are different answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbortedPass {
    pub check: &'static str,
    pub label: &'static str,
    pub reason: AbortReason,
}

/// A pass that did not run because its input dataset was absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPass {
    pub check: &'static str,
    pub reason: &'static str,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub run_id: RunId,
    /// One labeled subtree per check that found something
    pub tree: ErrorTree,
    pub aborted: Vec<AbortedPass>,
    pub skipped: Vec<SkippedPass>,
}

impl ValidationReport {
    /// No violations anywhere and every started pass completed
    pub fn passed(&self) -> bool {
        self.tree.is_empty() && self.aborted.is_empty()
    }

    pub fn was_skipped(&self, check: &str) -> bool {
        self.skipped.iter().any(|s| s.check == check)
    }

    pub fn was_aborted(&self, check: &str) -> bool {
        self.aborted.iter().any(|a| a.check == check)
    }

    pub fn to_value(&self) -> Value {
        json!({
            "run_id": self.run_id.as_str(),
            "passed": self.passed(),
            "errors": self.tree.to_value(),
            "aborted": self.aborted.iter().map(|a| json!({
                "check": a.check,
                "label": a.label,
                "reason": a.reason.to_string(),
            })).collect::<Vec<_>>(),
            "skipped": self.skipped.iter().map(|s| json!({
                "check": s.check,
                "reason": s.reason,
            })).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)?;
        for pass in &self.aborted {
            writeln!(f, "{}: aborted: {}", pass.label, pass.reason)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advguard_core::ValidationError;

    fn report(tree: ErrorTree, aborted: Vec<AbortedPass>) -> ValidationReport {
        ValidationReport {
            run_id: RunId::new(),
            tree,
            aborted,
            skipped: vec![SkippedPass {
                check: "fixed_versions",
                reason: "no package index provided",
            }],
        }
    }

    #[test]
    fn test_skipped_passes_do_not_fail_the_run() {
        let r = report(ErrorTree::empty(), vec![]);
        assert!(r.passed());
        assert!(r.was_skipped("fixed_versions"));
        assert_eq!(r.to_string(), "");
    }

    #[test]
    fn test_aborted_pass_fails_the_run_without_tree_errors() {
        let r = report(
            ErrorTree::empty(),
            vec![AbortedPass {
                check: "alias_completeness",
                label: "alias set completeness validation failure(s)",
                reason: AbortReason::Cancelled,
            }],
        );
        assert!(!r.passed());
        assert_eq!(
            r.to_string(),
            "alias set completeness validation failure(s): aborted: cancelled before completion\n"
        );
    }

    #[test]
    fn test_json_shape() {
        let tree = ErrorTree::node(
            "",
            vec![ErrorTree::node(
                "invalid change(s) in diff",
                vec![ErrorTree::leaf("curl", ValidationError::DocumentRemoved)],
            )],
        );
        let value = report(tree, vec![]).to_value();
        assert_eq!(value["passed"], false);
        assert_eq!(value["skipped"][0]["check"], "fixed_versions");
        assert_eq!(
            value["errors"]["children"][0]["children"][0]["error"]["code"],
            "ERR_DOCUMENT_REMOVED"
        );
    }

    #[test]
    fn test_abort_reason_maps_to_error_codes() {
        let lookup: AgError = AbortReason::from(AliasLookupError::Timeout(std::time::Duration::from_secs(30))).into();
        assert_eq!(lookup.code(), "ERR_EXTERNAL_LOOKUP");
        let cancelled: AgError = AbortReason::Cancelled.into();
        assert_eq!(cancelled.code(), "ERR_CANCELLED");
    }
}
