//! Structured logging facility for docparity
//!
//! This module provides:
//! - Single initialization point via `init(profile)` / `init_with_filter`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! Subscriber output is written to stderr. Stdout is reserved for the
//! `OK:` lines and document dumps produced by the console reporter.
//!
//! # Usage
//!
//! ```rust
//! use docparity_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, init_with_filter, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
