use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest as _, Sha256};

/// Which collection path a document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The baseline collection path (internal or legacy collection)
    Reference,
    /// The collection path under test (Metricbeat)
    Candidate,
}

/// A monitoring document of one type, as loaded from `<doc_type>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    doc_type: String,
    body: Value,
}

impl Document {
    pub fn new(doc_type: impl Into<String>, body: Value) -> Self {
        Self {
            doc_type: doc_type.into(),
            body,
        }
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Value {
        &mut self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// SHA-256 over the compact JSON serialization of the body
    ///
    /// `serde_json` maps keep keys sorted, so equal trees always hash equal.
    pub fn digest(&self) -> String {
        let canonical = serde_json::to_vec(&self.body).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }

    /// Pretty-printed body for manual inspection
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
    }
}

/// The two documents of one type compared against each other
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPair {
    pub reference: Document,
    pub candidate: Document,
}

impl DocumentPair {
    pub fn new(reference: Document, candidate: Document) -> Self {
        Self {
            reference,
            candidate,
        }
    }

    pub fn doc_type(&self) -> &str {
        self.reference.doc_type()
    }

    pub fn get(&self, side: Side) -> &Document {
        match side {
            Side::Reference => &self.reference,
            Side::Candidate => &self.candidate,
        }
    }

    /// Mutable access to both bodies at once, reference first
    pub fn bodies_mut(&mut self) -> (&mut Value, &mut Value) {
        (self.reference.body_mut(), self.candidate.body_mut())
    }
}
