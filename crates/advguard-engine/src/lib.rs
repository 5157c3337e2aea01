//! advguard Engine - check battery and orchestration
//!
//! Runs every applicable validation pass over a current snapshot (and an
//! optional baseline), skipping the passes whose reference dataset is
//! absent, and folds the results into one [`ValidationReport`].

pub mod checks;
pub mod options;
pub mod orchestrator;
pub mod report;

pub use options::ValidateOptions;
pub use orchestrator::{validate, validate_with_cancel, CheckSpec, Requirement, CHECKS};
pub use report::{AbortReason, AbortedPass, SkippedPass, ValidationReport};
