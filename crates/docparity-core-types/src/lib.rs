//! Core types shared across the docparity crates
//!
//! This crate provides foundational types used by both the parity engine
//! and the command-line front end:
//!
//! - **Correlation types**: RunId for tying log events and reports to one run
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RunId;
