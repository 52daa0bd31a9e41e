#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{docs_dirs, write_pair};
use docparity_core::errors::{ExError, ExErrorKind, ParityError};
use docparity_core::logging_facility::test_capture::init_test_capture;
use docparity_core::{log_op_end, log_op_error, log_op_start};
use docparity_core::{ParityRunner, ProductProfile, RunConfig};
use docparity_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use serde_json::json;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert_eq!(start_events, 1);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ParityError::DocumentNotFound {
        doc_type: "shards".to_string(),
        path: "metricbeat/shards.json".into(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(
        error_event.fields.get("err.code"),
        Some(&"ERR_DOCUMENT_NOT_FOUND".to_string())
    );
}

#[test]
fn test_error_conversion_preserves_kind() {
    let capture = init_test_capture();
    let op_name = "test_error_conversion_unique_4";

    let err = ParityError::InvalidDocType {
        file_name: "node.stats.json".to_string(),
    };
    log_op_error!(op_name, err.clone(), duration_ms = 5);

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidDocType);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have error event for this test");
    assert_eq!(
        error_event.fields.get("err.code"),
        Some(&"ERR_INVALID_DOC_TYPE".to_string())
    );
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_5";

    log_op_start!(op_name, doc_type = "kibana_stats", profile = "kibana");

    let events = capture.events();
    let start_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have start event");

    assert_eq!(start_event.doc_type.as_deref(), Some("kibana_stats"));
    assert_eq!(start_event.fields.get("profile"), Some(&"kibana".to_string()));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_parity_run_emits_boundary_events() {
    let capture = init_test_capture();
    let dirs = docs_dirs();
    let doc = json!({"sample": 1});
    write_pair(&dirs, "logging_sample_stats", &doc, &doc);

    let runner = ParityRunner::new(RunConfig::new(ProductProfile::Generic)).unwrap();
    let report = runner.run(&dirs.reference, &dirs.candidate).unwrap();

    let events = capture.events_for_run(report.run_id.as_str());
    assert_eq!(events.iter().filter(|e| e.is("parity_run", EVENT_START)).count(), 1);
    let end = events
        .iter()
        .find(|e| e.is("parity_run", EVENT_END))
        .expect("Should have end event");
    assert_eq!(end.field("doc_type_count"), Some("1"));
    assert_eq!(end.field("violation_count"), Some("0"));
    assert!(
        events
            .iter()
            .any(|e| e.doc_type.as_deref() == Some("logging_sample_stats")),
        "per-type comparison should be logged with its doc_type"
    );
}

#[test]
fn test_each_doc_type_comparison_is_an_op() {
    let capture = init_test_capture();
    let dirs = docs_dirs();
    write_pair(&dirs, "per_type_alpha_stats", &json!({"x": 1}), &json!({"x": 1}));
    write_pair(&dirs, "per_type_beta_stats", &json!({"x": 1}), &json!({"x": 1, "y": 2}));

    let runner = ParityRunner::new(RunConfig::new(ProductProfile::Generic)).unwrap();
    let report = runner.run(&dirs.reference, &dirs.candidate).unwrap();

    let events = capture.events_for_run(report.run_id.as_str());
    for doc_type in ["per_type_alpha_stats", "per_type_beta_stats"] {
        let for_type = |event: &str| {
            events
                .iter()
                .filter(|e| e.is("compare_doc_type", event) && e.doc_type.as_deref() == Some(doc_type))
                .count()
        };
        assert_eq!(for_type(EVENT_START), 1, "start for {}", doc_type);
        assert_eq!(for_type(EVENT_END), 1, "end for {}", doc_type);
    }
    let end_b = events
        .iter()
        .find(|e| e.is("compare_doc_type", EVENT_END) && e.doc_type.as_deref() == Some("per_type_beta_stats"))
        .unwrap();
    assert_eq!(end_b.field("violation_count"), Some("1"));
    assert!(end_b.field("duration_ms").is_some());
}

#[test]
fn test_failed_parity_run_emits_error_event() {
    let capture = init_test_capture();
    let dirs = docs_dirs();
    let missing = dirs.root.path().join("does_not_exist");

    let runner = ParityRunner::new(RunConfig::default()).unwrap();
    assert!(runner.run(&missing, &dirs.candidate).is_err());

    let path_errors = capture.count_events(|e| {
        e.op.as_deref() == Some("parity_run")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err.code") == Some("ERR_PATH_NOT_FOUND")
    });
    assert!(path_errors >= 1);
}
