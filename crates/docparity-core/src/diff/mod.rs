//! Structural tree diff.
//!
//! Compares a normalized reference document with a normalized candidate
//! document and produces a flat, deterministic list of inserts, deletes and
//! updates addressed by full path.
//!
//! ## Entry point
//!
//! ```
//! use docparity_core::diff::{compute_diff, DiffOp};
//! use serde_json::json;
//!
//! let diff = compute_diff(&json!({"a": 1}), &json!({"a": 2, "b": true}));
//! assert_eq!(diff.by_op(DiffOp::Insert).count(), 1);
//! assert_eq!(diff.by_op(DiffOp::Update).count(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical entry lists.
//! - **Explicit paths**: every entry carries its path from the document root.
//! - **Whole-subtree inserts/deletes**: a node missing on one side is reported
//!   once, at its own path, never as one entry per descendant.

pub mod engine;
pub mod model;

pub use engine::compute_diff;
pub use model::{DiffEntry, DiffOp, TreeDiff};
