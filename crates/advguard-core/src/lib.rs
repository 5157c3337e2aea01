//! advguard Core - advisory document model and pure validation primitives
//!
//! This crate provides the foundational data structures and operations for
//! advguard, including:
//! - Advisory documents, advisories and lifecycle events
//! - Snapshot diffing between a baseline and a current advisory set
//! - Structural (self-consistency) rules for a single document
//! - The hierarchical error report returned by validation
//! - The reference datasets and alias resolver seam consulted by checks
//!
//! Nothing here performs I/O; loading lives in `advguard-store` and check
//! orchestration in `advguard-engine`.

pub mod datasets;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod report;
pub mod rules;
pub mod scope;

// Macros expand to `$crate::core_types::schema::*`
pub use advguard_core_types as core_types;

// Re-export commonly used types
pub use datasets::{AliasResolver, BuildConfigIndex, PackageIndex, PublishedPackage};
pub use diff::{compute_diff, SnapshotDiff};
pub use errors::{AgError, AgErrorKind, AliasLookupError, Result, ValidationError};
pub use model::{Advisory, Document, Event, EventData, EventKind, Snapshot};
pub use report::ErrorTree;
pub use scope::PackageScope;
