use docparity_core::errors::{ExError, ExErrorKind, ParityError};
use std::path::{Path, PathBuf};

#[test]
fn test_path_not_found_verifiable_by_kind() {
    let err = ParityError::PathNotFound {
        role: "internally".to_string(),
        path: PathBuf::from("/data/internal"),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::PathNotFound);
    assert_eq!(ex_err.code(), "ERR_PATH_NOT_FOUND");
    assert_eq!(ex_err.path(), Some(Path::new("/data/internal")));
    assert!(ex_err.message().contains("internally-indexed"));
}

#[test]
fn test_not_a_directory_distinct_from_not_found() {
    let err = ParityError::NotADirectory {
        role: "Metricbeat".to_string(),
        path: PathBuf::from("/data/metricbeat.tar"),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotADirectory);
    assert_ne!(ex_err.kind(), ExErrorKind::PathNotFound);
}

#[test]
fn test_document_not_found_carries_doc_type() {
    let err = ParityError::DocumentNotFound {
        doc_type: "node_stats".to_string(),
        path: PathBuf::from("/data/metricbeat/node_stats.json"),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DocumentNotFound);
    assert_eq!(ex_err.code(), "ERR_DOCUMENT_NOT_FOUND");
    assert_eq!(ex_err.op(), Some("load_document"));
    assert_eq!(ex_err.doc_type(), Some("node_stats"));
}

#[test]
fn test_malformed_document_keeps_parser_reason() {
    let err = ParityError::MalformedDocument {
        doc_type: "shards".to_string(),
        path: PathBuf::from("shards.json"),
        reason: "EOF while parsing an object at line 1 column 9".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MalformedDocument);
    assert!(ex_err.message().contains("EOF while parsing"));
}

#[test]
fn test_duplicate_normalizer_conversion() {
    let err = ParityError::DuplicateNormalizer {
        doc_type: "cluster_stats".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DuplicateNormalizer);
    assert_eq!(ex_err.op(), Some("register_normalizer"));
    assert_eq!(ex_err.doc_type(), Some("cluster_stats"));
}

#[test]
fn test_invalid_config_conversion() {
    let err = ParityError::InvalidConfig {
        path: PathBuf::from("docparity.toml"),
        reason: "unknown field `profil`".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.code(), "ERR_INVALID_CONFIG");
    assert_eq!(ex_err.op(), Some("load_config"));
    assert_eq!(ex_err.path(), Some(Path::new("docparity.toml")));
}

#[test]
fn test_parity_error_display_names_the_role() {
    let err = ParityError::PathNotFound {
        role: "Metricbeat".to_string(),
        path: PathBuf::from("/tmp/mb"),
    };
    assert_eq!(
        err.to_string(),
        "Metricbeat-indexed documents path does not exist: /tmp/mb"
    );
}

#[test]
fn test_ex_error_builder_pattern() {
    let ex_err = ExError::new(ExErrorKind::DocumentNotFound)
        .with_op("load_document")
        .with_doc_type("shards")
        .with_path("/data/internal/shards.json")
        .with_message("Document file not found");

    assert_eq!(ex_err.op(), Some("load_document"));
    assert_eq!(ex_err.doc_type(), Some("shards"));
    assert!(ex_err.message().contains("not found"));

    let display_str = format!("{}", ex_err);
    assert!(display_str.contains("ERR_DOCUMENT_NOT_FOUND"));
    assert!(display_str.contains("/data/internal/shards.json"));
}

#[test]
fn test_all_error_kinds_have_unique_codes() {
    use std::collections::HashSet;

    let kinds = vec![
        ExErrorKind::InvalidInput,
        ExErrorKind::PathNotFound,
        ExErrorKind::NotADirectory,
        ExErrorKind::Io,
        ExErrorKind::DocumentNotFound,
        ExErrorKind::MalformedDocument,
        ExErrorKind::InvalidDocType,
        ExErrorKind::DuplicateNormalizer,
        ExErrorKind::UnknownProfile,
        ExErrorKind::InvalidConfig,
        ExErrorKind::Serialization,
        ExErrorKind::Internal,
    ];

    let codes: HashSet<_> = kinds.iter().map(|k| k.code()).collect();

    assert_eq!(codes.len(), kinds.len());
    for code in codes {
        assert!(code.starts_with("ERR_"));
    }
}
