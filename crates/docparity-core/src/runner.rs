//! Comparison run orchestration.
//!
//! Loader → normalizer → differ → policy engine, once per document type in
//! the reference directory, in sorted type order. Violations never stop the
//! run; loader and path errors do.

use crate::config::RunConfig;
use crate::diff::compute_diff;
use crate::errors::Result;
use crate::loader;
use crate::model::DocumentPair;
use crate::normalize::NormalizerRegistry;
use crate::policy::{self, PolicyConfig};
use crate::report::{DocTypeOutcome, RunReport};
use crate::{log_op_end, log_op_error, log_op_start};
use docparity_core_types::RunId;
use std::path::Path;
use std::time::Instant;

/// A configured comparison engine
///
/// Holds the run's immutable policy and normalizer registry; one runner can
/// execute any number of runs.
#[derive(Debug, Clone)]
pub struct ParityRunner {
    config: RunConfig,
    policy: PolicyConfig,
    registry: NormalizerRegistry,
}

impl ParityRunner {
    /// # Errors
    ///
    /// `InvalidInput` for an invalid configuration, `DuplicateNormalizer` if
    /// the profile's registry cannot be built.
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate()?;
        let registry = config.registry()?;
        let policy = config.policy();
        Ok(Self {
            config,
            policy,
            registry,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Normalize, diff and evaluate one document pair
    pub fn compare_pair(&self, mut pair: DocumentPair) -> DocTypeOutcome {
        let doc_type = pair.doc_type().to_string();
        log_op_start!("compare_doc_type", doc_type = doc_type.as_str());
        let start = Instant::now();

        let rules_applied = self
            .registry
            .normalize(&mut pair)
            .into_iter()
            .map(String::from)
            .collect();
        let diff = compute_diff(pair.reference.body(), pair.candidate.body());
        let violations = policy::evaluate(pair.doc_type(), &diff, &self.policy);

        log_op_end!(
            "compare_doc_type",
            duration_ms = start.elapsed().as_millis() as u64,
            doc_type = doc_type.as_str(),
            diff_len = diff.len(),
            violation_count = violations.len()
        );
        DocTypeOutcome::compared(pair, violations, rules_applied, diff.len())
    }

    /// Compare every document type of `reference_dir` against `candidate_dir`
    ///
    /// # Errors
    ///
    /// `PathNotFound`/`NotADirectory` for a bad directory, `InvalidDocType`,
    /// `DocumentNotFound`, `MalformedDocument` or `Io` from the loader.
    pub fn run(&self, reference_dir: &Path, candidate_dir: &Path) -> Result<RunReport> {
        let run_id = RunId::new();
        let span = tracing::info_span!("parity_run", run_id = %run_id);
        let _guard = span.enter();

        log_op_start!("parity_run", profile = self.config.profile.name());
        let start = Instant::now();

        let report = self
            .run_impl(run_id, reference_dir, candidate_dir)
            .map_err(|e| {
                log_op_error!(
                    "parity_run",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!(
            "parity_run",
            duration_ms = start.elapsed().as_millis() as u64,
            doc_type_count = report.outcomes.len(),
            violation_count = report.violation_count()
        );
        Ok(report)
    }

    fn run_impl(&self, run_id: RunId, reference_dir: &Path, candidate_dir: &Path) -> Result<RunReport> {
        let started_at = chrono::Utc::now();

        loader::ensure_docs_dir(reference_dir, &self.config.reference_role)?;
        loader::ensure_docs_dir(candidate_dir, &self.config.candidate_role)?;

        let reference_types = loader::list_doc_types(reference_dir)?;
        let candidate_types = loader::list_doc_types(candidate_dir)?;

        let mut outcomes = Vec::with_capacity(reference_types.len());
        for doc_type in &reference_types {
            if !candidate_types.contains(doc_type) {
                tracing::warn!(doc_type = doc_type.as_str(), "no candidate document for type");
                outcomes.push(DocTypeOutcome::missing(doc_type));
                continue;
            }

            let pair = DocumentPair::new(
                loader::load_document(reference_dir, doc_type)?,
                loader::load_document(candidate_dir, doc_type)?,
            );
            outcomes.push(self.compare_pair(pair));
        }

        Ok(RunReport {
            run_id,
            started_at,
            profile: self.config.profile,
            reference_role: self.config.reference_role.clone(),
            candidate_role: self.config.candidate_role.clone(),
            reference_dir: reference_dir.to_path_buf(),
            candidate_dir: candidate_dir.to_path_buf(),
            exit_strategy: self.config.exit_strategy,
            outcomes,
        })
    }
}
