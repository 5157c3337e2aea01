//! Hierarchical error report
//!
//! Every check contributes a labeled subtree mirroring document → advisory →
//! event nesting. Empty subtrees are pruned on construction, so a tree is
//! empty exactly when no leaf error exists anywhere below it.

use std::fmt;

use serde_json::{json, Value};

use crate::errors::ValidationError;

/// A labeled node of the error report.
///
/// A node carries a label, an optional error of its own and child nodes.
/// An unlabeled node is a bare error listed directly under its parent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorTree {
    label: String,
    error: Option<ValidationError>,
    children: Vec<ErrorTree>,
}

impl ErrorTree {
    /// The empty tree
    pub fn empty() -> Self {
        Self::default()
    }

    /// A labeled node over `children`; empty children are dropped
    pub fn node(label: impl Into<String>, children: Vec<ErrorTree>) -> Self {
        Self {
            label: label.into(),
            error: None,
            children: children.into_iter().filter(|c| !c.is_empty()).collect(),
        }
    }

    /// A labeled node holding one error
    pub fn leaf(label: impl Into<String>, error: ValidationError) -> Self {
        Self {
            label: label.into(),
            error: Some(error),
            children: Vec::new(),
        }
    }

    /// An unlabeled error listed directly under its parent
    pub fn bare(error: ValidationError) -> Self {
        Self::leaf(String::new(), error)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn children(&self) -> &[ErrorTree] {
        &self.children
    }

    /// Append a child, dropping it if empty
    pub fn push(&mut self, child: ErrorTree) {
        if !child.is_empty() {
            self.children.push(child);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.children.iter().all(ErrorTree::is_empty)
    }

    /// First direct child with the given label
    pub fn child(&self, label: &str) -> Option<&ErrorTree> {
        self.children.iter().find(|c| c.label == label)
    }

    /// Walk a label path from this node
    pub fn find(&self, path: &[&str]) -> Option<&ErrorTree> {
        path.iter().try_fold(self, |node, label| node.child(label))
    }

    /// Every error in the tree with the labels leading to it, depth-first
    pub fn leaves(&self) -> Vec<(Vec<&str>, &ValidationError)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut Vec::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(
        &'a self,
        path: &mut Vec<&'a str>,
        out: &mut Vec<(Vec<&'a str>, &'a ValidationError)>,
    ) {
        let labeled = !self.label.is_empty();
        if labeled {
            path.push(&self.label);
        }
        if let Some(err) = &self.error {
            out.push((path.clone(), err));
        }
        for child in &self.children {
            child.collect_leaves(path, out);
        }
        if labeled {
            path.pop();
        }
    }

    /// Number of errors satisfying `pred`
    pub fn count_where<F>(&self, pred: F) -> usize
    where
        F: Fn(&ValidationError) -> bool,
    {
        self.leaves().into_iter().filter(|(_, e)| pred(e)).count()
    }

    pub fn error_count(&self) -> usize {
        self.leaves().len()
    }

    /// JSON rendering: `{label, error: {code, message}, children}`
    pub fn to_value(&self) -> Value {
        let mut obj = serde_json::Map::new();
        if !self.label.is_empty() {
            obj.insert("label".into(), json!(self.label));
        }
        if let Some(err) = &self.error {
            obj.insert(
                "error".into(),
                json!({ "code": err.code(), "message": err.to_string() }),
            );
        }
        if !self.children.is_empty() {
            obj.insert(
                "children".into(),
                Value::Array(self.children.iter().map(ErrorTree::to_value).collect()),
            );
        }
        Value::Object(obj)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let child_depth = match (self.label.is_empty(), &self.error) {
            (true, Some(err)) => {
                writeln!(f, "{}- {}", indent, err)?;
                depth + 1
            }
            (true, None) => depth,
            (false, Some(err)) => {
                writeln!(f, "{}{}: {}", indent, self.label, err)?;
                depth + 1
            }
            (false, None) => {
                writeln!(f, "{}{}:", indent, self.label)?;
                depth + 1
            }
        };
        for child in &self.children {
            child.render(f, child_depth)?;
        }
        Ok(())
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        self.render(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ErrorTree {
        ErrorTree::node(
            "invalid change(s) in diff",
            vec![
                ErrorTree::node(
                    "curl",
                    vec![
                        ErrorTree::bare(ValidationError::MissingBuildConfiguration),
                        ErrorTree::leaf("CVE-2024-0001", ValidationError::AdvisoryRemoved),
                    ],
                ),
                ErrorTree::node("zlib", vec![ErrorTree::node("CVE-2024-0002", vec![])]),
            ],
        )
    }

    #[test]
    fn test_empty_children_are_pruned() {
        let tree = sample();
        assert_eq!(tree.children().len(), 1);
        assert!(tree.child("zlib").is_none());
        assert!(ErrorTree::node("x", vec![ErrorTree::empty()]).is_empty());
    }

    #[test]
    fn test_leaves_carry_paths() {
        let tree = sample();
        let leaves = tree.leaves();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].0, vec!["invalid change(s) in diff", "curl"]);
        assert_eq!(
            leaves[1].0,
            vec!["invalid change(s) in diff", "curl", "CVE-2024-0001"]
        );
    }

    #[test]
    fn test_find_and_count() {
        let tree = sample();
        assert!(tree.find(&["curl", "CVE-2024-0001"]).is_some());
        assert_eq!(
            tree.count_where(|e| matches!(e, ValidationError::AdvisoryRemoved)),
            1
        );
        assert_eq!(tree.error_count(), 2);
    }

    #[test]
    fn test_rendering_is_indented() {
        let rendered = sample().to_string();
        assert_eq!(
            rendered,
            "invalid change(s) in diff:\n  curl:\n    - package build configuration not found in the distro\n    CVE-2024-0001: advisory was removed\n"
        );
    }

    #[test]
    fn test_json_rendering() {
        let value = sample().to_value();
        assert_eq!(value["label"], "invalid change(s) in diff");
        assert_eq!(
            value["children"][0]["children"][1]["error"]["code"],
            "ERR_ADVISORY_REMOVED"
        );
    }
}
