//! Snapshot diff engine.
//!
//! Compares a baseline snapshot with a current snapshot and produces a
//! structural delta at document, advisory and event granularity.
//!
//! ## Entry point
//!
//! ```
//! use advguard_core::diff::compute_diff;
//! use advguard_core::model::{Document, Snapshot};
//!
//! let base = Snapshot::from_documents([Document::new("curl")]);
//! let diff = compute_diff(&base, &base);
//! assert!(diff.is_zero());
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical diffs, in the same order.
//! - **Totality**: diffing never fails.
//! - **Coarse events**: event changes are set differences by value, so a
//!   changed event appears as one removal plus one addition.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_diff;
pub use human_summary::render_human_summary;
pub use model::{AdvisoryDiff, DocumentDiff, SnapshotDiff};
