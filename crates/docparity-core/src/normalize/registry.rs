//! Doc type → normalizer dispatch.

use crate::errors::{ParityError, Result};
use crate::model::DocumentPair;
use crate::normalize::rules::NormalizationRule;
use std::collections::BTreeMap;

/// Ordered normalization rules for one document type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    doc_type: String,
    rules: Vec<NormalizationRule>,
}

impl Normalizer {
    pub fn new(doc_type: impl Into<String>, rules: Vec<NormalizationRule>) -> Self {
        Self {
            doc_type: doc_type.into(),
            rules,
        }
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn rules(&self) -> &[NormalizationRule] {
        &self.rules
    }

    /// Apply every rule in order; returns the names of the rules that changed something
    pub fn apply(&self, pair: &mut DocumentPair) -> Vec<&'static str> {
        let (reference, candidate) = pair.bodies_mut();
        self.rules
            .iter()
            .filter_map(|rule| rule.apply(reference, candidate).then_some(rule.name()))
            .collect()
    }
}

/// Maps a document type to its normalizer
///
/// At most one normalizer is registered per type. Types without one are
/// compared as loaded.
#[derive(Debug, Clone, Default)]
pub struct NormalizerRegistry {
    normalizers: BTreeMap<String, Normalizer>,
}

impl NormalizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a normalizer for its document type
    ///
    /// # Errors
    ///
    /// `DuplicateNormalizer` if the type already has one.
    pub fn register(&mut self, normalizer: Normalizer) -> Result<()> {
        if self.normalizers.contains_key(normalizer.doc_type()) {
            return Err(ParityError::DuplicateNormalizer {
                doc_type: normalizer.doc_type().to_string(),
            });
        }
        self.normalizers
            .insert(normalizer.doc_type().to_string(), normalizer);
        Ok(())
    }

    pub fn get(&self, doc_type: &str) -> Option<&Normalizer> {
        self.normalizers.get(doc_type)
    }

    pub fn doc_types(&self) -> impl Iterator<Item = &str> {
        self.normalizers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Normalize a pair with the normalizer registered for its type, if any
    pub fn normalize(&self, pair: &mut DocumentPair) -> Vec<&'static str> {
        let Some(normalizer) = self.normalizers.get(pair.doc_type()) else {
            return Vec::new();
        };
        let applied = normalizer.apply(pair);
        tracing::debug!(
            doc_type = normalizer.doc_type(),
            rules_changed = applied.len(),
            "normalized document pair"
        );
        applied
    }
}
