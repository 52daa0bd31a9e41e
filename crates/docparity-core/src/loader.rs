//! Document loader.
//!
//! Each documents directory holds one `<doc_type>.json` file per document
//! type, directly inside it. Subdirectories are ignored.

use crate::errors::{ParityError, Result};
use crate::model::Document;
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Extension expected on every document file
pub const DOC_EXTENSION: &str = "json";

/// Check that a documents directory exists and is a directory
///
/// `role` is the display name of the collection path ("Metricbeat",
/// "internally") and only feeds the error message.
///
/// # Errors
///
/// `PathNotFound` when nothing exists at `path`, `NotADirectory` when it
/// is a file.
pub fn ensure_docs_dir(path: &Path, role: &str) -> Result<()> {
    if !path.exists() {
        return Err(ParityError::PathNotFound {
            role: role.to_string(),
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ParityError::NotADirectory {
            role: role.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Derive the document type from a file name by a single split on `.`
///
/// `shards.json` → `shards`. A name with zero or several dots, or an empty
/// base name, has no unambiguous type.
///
/// # Errors
///
/// `InvalidDocType` for names that do not split into exactly two parts.
pub fn doc_type_from_file_name(file_name: &str) -> Result<String> {
    let invalid = || ParityError::InvalidDocType {
        file_name: file_name.to_string(),
    };
    let (name, ext) = file_name.split_once('.').ok_or_else(invalid)?;
    if name.is_empty() || ext.contains('.') {
        return Err(invalid());
    }
    Ok(name.to_string())
}

/// Enumerate the document types in a directory (non-recursive)
///
/// # Errors
///
/// `Io` if the directory cannot be read, `InvalidDocType` for a regular
/// file whose name does not map to a type.
pub fn list_doc_types(dir: &Path) -> Result<BTreeSet<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ParityError::io(dir, &e))?;

    let mut doc_types = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| ParityError::io(dir, &e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        doc_types.insert(doc_type_from_file_name(&file_name)?);
    }

    tracing::debug!(
        dir = %dir.display(),
        doc_type_count = doc_types.len(),
        "listed document types"
    );
    Ok(doc_types)
}

/// Location of the file holding `doc_type` inside `dir`
pub fn document_path(dir: &Path, doc_type: &str) -> PathBuf {
    dir.join(format!("{}.{}", doc_type, DOC_EXTENSION))
}

/// Read and parse `<dir>/<doc_type>.json`
///
/// # Errors
///
/// `DocumentNotFound` if the file is absent, `MalformedDocument` if it is
/// not valid JSON, `Io` for any other read failure.
pub fn load_document(dir: &Path, doc_type: &str) -> Result<Document> {
    let path = document_path(dir, doc_type);
    let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ParityError::DocumentNotFound {
            doc_type: doc_type.to_string(),
            path: path.clone(),
        },
        _ => ParityError::io(&path, &e),
    })?;

    let body: Value =
        serde_json::from_str(&text).map_err(|e| ParityError::MalformedDocument {
            doc_type: doc_type.to_string(),
            path: path.clone(),
            reason: e.to_string(),
        })?;

    tracing::debug!(doc_type, path = %path.display(), "loaded document");
    Ok(Document::new(doc_type, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_from_simple_name() {
        assert_eq!(doc_type_from_file_name("shards.json").unwrap(), "shards");
        assert_eq!(
            doc_type_from_file_name("index_recovery.json").unwrap(),
            "index_recovery"
        );
    }

    #[test]
    fn test_doc_type_rejects_multi_dot_names() {
        let err = doc_type_from_file_name("node.stats.json").unwrap_err();
        assert!(matches!(err, ParityError::InvalidDocType { .. }));
    }

    #[test]
    fn test_doc_type_rejects_missing_or_empty_parts() {
        assert!(doc_type_from_file_name("README").is_err());
        assert!(doc_type_from_file_name(".json").is_err());
    }

    #[test]
    fn test_document_path_appends_extension() {
        let path = document_path(Path::new("/docs"), "shards");
        assert_eq!(path, PathBuf::from("/docs/shards.json"));
    }
}
