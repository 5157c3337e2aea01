//! Per-document rules
//!
//! These rules only look at a single document in isolation. Cross-document
//! and cross-snapshot policy lives in the engine's checks.

pub mod structural;

pub use structural::{validate_document, StructuralViolation};
