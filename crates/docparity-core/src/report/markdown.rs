//! Markdown summary renderer for run reports.

use crate::errors::{ParityError, Result};
use crate::report::console::violation_message;
use crate::report::model::{OutcomeStatus, RunReport};
use std::path::Path;

/// Render a Markdown summary of a [`RunReport`].
///
/// Intended for CI job pages. It is informational only; the exit code is
/// derived from the report, not from this text.
pub fn render_summary(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str("## Document Parity\n\n");

    let verdict = if report.is_success() { "Pass" } else { "Fail" };
    out.push_str(&format!(
        "**Result**: {verdict}  \n**Profile**: {}  \n**Run**: `{}`  \n**Started**: {}\n\n",
        report.profile,
        report.run_id,
        report.started_at.to_rfc3339()
    ));

    out.push_str(&format!(
        "| Document type | Status | Violations | {} digest | {} digest |\n\
         |---|---|---|---|---|\n",
        report.reference_role, report.candidate_role
    ));
    for outcome in &report.outcomes {
        let status = match outcome.status {
            OutcomeStatus::Ok => "OK",
            OutcomeStatus::Failed => "FAILED",
            OutcomeStatus::Missing => "MISSING",
        };
        out.push_str(&format!(
            "| `{}` | {} | {} | {} | {} |\n",
            outcome.doc_type,
            status,
            outcome.violations.len(),
            short(outcome.reference_digest.as_deref()),
            short(outcome.candidate_digest.as_deref()),
        ));
    }
    out.push('\n');

    if report.is_success() {
        out.push_str("_All document types have expected parity._\n");
        return out;
    }

    out.push_str(&format!(
        "### Violations ({})\n\n",
        report.violation_count()
    ));
    for outcome in report.failed_doc_types() {
        for violation in &outcome.violations {
            out.push_str(&format!(
                "- {}\n",
                violation_message(violation, &report.reference_role, &report.candidate_role)
            ));
        }
    }

    out
}

/// Write the Markdown summary to `path`
///
/// # Errors
///
/// `Io` if the file cannot be written.
pub fn write_summary(report: &RunReport, path: &Path) -> Result<()> {
    std::fs::write(path, render_summary(report)).map_err(|e| ParityError::io(path, &e))
}

fn short(digest: Option<&str>) -> String {
    match digest {
        Some(d) if d.len() > 12 => format!("`{}…`", &d[..12]),
        Some(d) => format!("`{}`", d),
        None => "-".to_string(),
    }
}
