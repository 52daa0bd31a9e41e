//! Run reporting.
//!
//! - [`console`]: the line-oriented `OK:` / `ERROR:` output and document dumps
//! - [`json`]: machine-readable run report with document digests
//! - [`markdown`]: summary for CI job pages

pub mod console;
pub mod json;
pub mod markdown;
pub mod model;

pub use console::{violation_message, Reporter};
pub use json::{render_json_report, write_json_report};
pub use markdown::{render_summary, write_summary};
pub use model::{DocTypeOutcome, OutcomeStatus, RunReport};
