use docparity_core::model::{Document, DocumentPair};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Reference and candidate document directories under one temp root
#[allow(dead_code)]
pub struct DocsDirs {
    pub root: TempDir,
    pub reference: PathBuf,
    pub candidate: PathBuf,
}

/// Create empty `internal/` and `metricbeat/` directories
#[allow(dead_code)]
pub fn docs_dirs() -> DocsDirs {
    let root = TempDir::new().unwrap();
    let reference = root.path().join("internal");
    let candidate = root.path().join("metricbeat");
    std::fs::create_dir(&reference).unwrap();
    std::fs::create_dir(&candidate).unwrap();
    DocsDirs {
        root,
        reference,
        candidate,
    }
}

/// Write `<dir>/<doc_type>.json`
#[allow(dead_code)]
pub fn write_doc(dir: &Path, doc_type: &str, body: &Value) {
    let text = serde_json::to_string_pretty(body).unwrap();
    std::fs::write(dir.join(format!("{}.json", doc_type)), text).unwrap();
}

/// Write the same doc type on both sides
#[allow(dead_code)]
pub fn write_pair(dirs: &DocsDirs, doc_type: &str, reference: &Value, candidate: &Value) {
    write_doc(&dirs.reference, doc_type, reference);
    write_doc(&dirs.candidate, doc_type, candidate);
}

/// Build an in-memory pair
#[allow(dead_code)]
pub fn pair(doc_type: &str, reference: Value, candidate: Value) -> DocumentPair {
    DocumentPair::new(
        Document::new(doc_type, reference),
        Document::new(doc_type, candidate),
    )
}

/// Add the Metricbeat envelope fields to a document body
#[allow(dead_code)]
pub fn with_metricbeat_envelope(mut body: Value) -> Value {
    if let Some(object) = body.as_object_mut() {
        object.insert(
            "service".to_string(),
            serde_json::json!({"type": "elasticsearch"}),
        );
        object.insert(
            "@timestamp".to_string(),
            Value::String("2026-10-18T00:00:00.000Z".to_string()),
        );
        object.insert(
            "agent".to_string(),
            serde_json::json!({"type": "metricbeat", "version": "8.0.0"}),
        );
        object.insert("metricset".to_string(), serde_json::json!({"name": "node"}));
    }
    body
}
