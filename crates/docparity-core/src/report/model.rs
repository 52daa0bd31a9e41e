//! Run report types.
//!
//! A [`RunReport`] is the complete, serializable result of one comparison
//! run. Violations live here as values; they are never raised as errors.

use crate::config::ExitStrategy;
use crate::model::DocumentPair;
use crate::policy::Violation;
use crate::profiles::ProductProfile;
use chrono::{DateTime, Utc};
use docparity_core_types::RunId;
use serde::Serialize;
use std::path::PathBuf;

/// Result of comparing one document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Parity holds
    Ok,
    /// The pair was compared and at least one violation was found
    Failed,
    /// The reference type has no candidate document
    Missing,
}

/// Outcome for one document type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTypeOutcome {
    pub doc_type: String,
    pub status: OutcomeStatus,
    pub violations: Vec<Violation>,
    /// Normalization rules that changed the pair
    pub rules_applied: Vec<String>,
    /// Number of diff entries, updates included
    pub diff_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_digest: Option<String>,
    /// The normalized pair, kept for document dumps
    #[serde(skip)]
    pub documents: Option<DocumentPair>,
}

impl DocTypeOutcome {
    /// Outcome of a compared pair; the status follows from `violations`
    pub fn compared(
        documents: DocumentPair,
        violations: Vec<Violation>,
        rules_applied: Vec<String>,
        diff_len: usize,
    ) -> Self {
        let status = if violations.is_empty() {
            OutcomeStatus::Ok
        } else {
            OutcomeStatus::Failed
        };
        Self {
            doc_type: documents.doc_type().to_string(),
            status,
            violations,
            rules_applied,
            diff_len,
            reference_digest: Some(documents.reference.digest()),
            candidate_digest: Some(documents.candidate.digest()),
            documents: Some(documents),
        }
    }

    pub fn missing(doc_type: &str) -> Self {
        Self {
            doc_type: doc_type.to_string(),
            status: OutcomeStatus::Missing,
            violations: vec![Violation::missing_document_type(doc_type)],
            rules_applied: Vec::new(),
            diff_len: 0,
            reference_digest: None,
            candidate_digest: None,
            documents: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OutcomeStatus::Ok
    }
}

/// Complete result of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub profile: ProductProfile,
    pub reference_role: String,
    pub candidate_role: String,
    pub reference_dir: PathBuf,
    pub candidate_dir: PathBuf,
    pub exit_strategy: ExitStrategy,
    pub outcomes: Vec<DocTypeOutcome>,
}

impl RunReport {
    /// Total violations across every document type
    pub fn violation_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.violations.len()).sum()
    }

    pub fn failed_doc_types(&self) -> impl Iterator<Item = &DocTypeOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn is_success(&self) -> bool {
        self.violation_count() == 0
    }

    /// Process exit code for this run under its exit strategy
    pub fn exit_code(&self) -> i32 {
        self.exit_strategy.exit_code(self.violation_count())
    }

    pub fn outcome(&self, doc_type: &str) -> Option<&DocTypeOutcome> {
        self.outcomes.iter().find(|o| o.doc_type == doc_type)
    }
}
