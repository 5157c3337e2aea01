//! Structured logging for validation runs
//!
//! `init(profile)` installs the global subscriber once per process. The
//! `log_op_*` macros and `log_check_skipped!` stamp every event with the
//! canonical `component`/`op`/`event` fields, and `test_capture` records
//! events in memory for assertions.
//!
//! ```rust
//! use advguard_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
