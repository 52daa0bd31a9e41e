//! Console reporter.
//!
//! Success lines go to the `out` sink prefixed with `OK: `; violation lines
//! go to the `err` sink prefixed with `ERROR: `. After the violation lines of
//! a failed type, both normalized documents are dumped to `out`.

use crate::policy::{Violation, ViolationKind};
use crate::report::model::{DocTypeOutcome, OutcomeStatus, RunReport};
use std::io::{self, Write};

/// Human-readable description of one violation
pub fn violation_message(violation: &Violation, reference_role: &str, candidate_role: &str) -> String {
    let subject = format!(
        "{}-indexed doc for type='{}'",
        candidate_role, violation.doc_type
    );
    let value = violation
        .value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_default();

    match violation.kind {
        ViolationKind::UnexpectedInsertion => format!(
            "{} has unexpected insertion at '{}': {}",
            subject, violation.path, value
        ),
        ViolationKind::UnexpectedDeletion => format!(
            "{} has unexpected deletion at '{}': {}",
            subject, violation.path, value
        ),
        ViolationKind::MissingRequiredDeletion => format!(
            "{} has no deletion of '{}'. Expected '{}' to be deleted.",
            subject, violation.path, violation.path
        ),
        ViolationKind::MissingDocumentType => format!(
            "Found {}-indexed document type '{}' with no {}-indexed counterpart.",
            reference_role, violation.doc_type, candidate_role
        ),
    }
}

/// Writes run results to a pair of sinks
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    reference_role: String,
    candidate_role: String,
}

impl Reporter<io::Stdout, io::Stderr> {
    /// Reporter bound to the process's stdout and stderr
    pub fn stdio(reference_role: &str, candidate_role: &str) -> Self {
        Self::new(io::stdout(), io::stderr(), reference_role, candidate_role)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, reference_role: &str, candidate_role: &str) -> Self {
        Self {
            out,
            err,
            reference_role: reference_role.to_string(),
            candidate_role: candidate_role.to_string(),
        }
    }

    /// Report one document type
    ///
    /// # Errors
    ///
    /// Propagates write failures on either sink.
    pub fn report_outcome(&mut self, outcome: &DocTypeOutcome) -> io::Result<()> {
        if outcome.status == OutcomeStatus::Ok {
            return writeln!(
                self.out,
                "OK: {}-indexed doc for type='{}' has expected parity with {}-indexed doc.",
                self.candidate_role, outcome.doc_type, self.reference_role
            );
        }

        for violation in &outcome.violations {
            writeln!(
                self.err,
                "ERROR: {}",
                violation_message(violation, &self.reference_role, &self.candidate_role)
            )?;
        }

        if let Some(documents) = &outcome.documents {
            writeln!(
                self.out,
                "{}-indexed doc for type='{}':\n{}",
                self.reference_role,
                outcome.doc_type,
                documents.reference.to_pretty_json()
            )?;
            writeln!(
                self.out,
                "{}-indexed doc for type='{}':\n{}",
                self.candidate_role,
                outcome.doc_type,
                documents.candidate.to_pretty_json()
            )?;
        }
        Ok(())
    }

    /// Report every outcome in order, then the failure summary if any
    ///
    /// # Errors
    ///
    /// Propagates write failures on either sink.
    pub fn report_run(&mut self, report: &RunReport) -> io::Result<()> {
        for outcome in &report.outcomes {
            self.report_outcome(outcome)?;
        }

        if !report.is_success() {
            writeln!(
                self.err,
                "ERROR: {} parity violation(s) across {} document type(s).",
                report.violation_count(),
                report.failed_doc_types().count()
            )?;
        }
        self.out.flush()?;
        self.err.flush()
    }

    /// Recover the sinks, mainly for inspection in tests
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
