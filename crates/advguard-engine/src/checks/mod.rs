//! The validation passes
//!
//! Every pass returns the children of its labeled subtree; the orchestrator
//! attaches the label and drops empty subtrees. Passes never fail: a
//! violation is data, and only the alias pass can be cut short by its
//! external service.

pub mod alias;
pub mod diff_policy;
pub mod document;
pub mod fixed_version;

pub use alias::{check_alias_completeness, AliasCache};
pub use diff_policy::check_diff_policy;
pub use document::{check_basic, check_naming, check_uniqueness};
pub use fixed_version::check_fixed_versions;

use advguard_core::Event;

pub const LABEL_BASIC: &str = "basic validation failure(s)";
pub const LABEL_NAMING: &str = "document file name validation failure(s)";
pub const LABEL_UNIQUENESS: &str = "advisory ID uniqueness validation failure(s)";
pub const LABEL_DIFF: &str = "invalid change(s) in diff";
pub const LABEL_FIXED_VERSIONS: &str = "fixed version validation failure(s)";
pub const LABEL_ALIASES: &str = "alias set completeness validation failure(s)";

/// `event N (type: T)`, 1-based
pub fn event_label(index: usize, event: &Event) -> String {
    format!("event {} (type: {})", index + 1, event.kind())
}

/// `event N (just added)`, 1-based
pub fn added_event_label(index: usize) -> String {
    format!("event {} (just added)", index + 1)
}
