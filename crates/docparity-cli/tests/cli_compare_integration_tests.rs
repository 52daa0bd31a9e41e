//! CLI compare integration tests
//!
//! Run the built `docparity` binary against temp document directories and
//! check exit codes and the split between stdout and stderr.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct Workspace {
    root: TempDir,
    reference: PathBuf,
    candidate: PathBuf,
}

fn setup_workspace() -> Workspace {
    let root = TempDir::new().unwrap();
    let reference = root.path().join("internal");
    let candidate = root.path().join("metricbeat");
    fs::create_dir(&reference).unwrap();
    fs::create_dir(&candidate).unwrap();
    Workspace {
        root,
        reference,
        candidate,
    }
}

fn write_doc(dir: &Path, doc_type: &str, body: &Value) {
    fs::write(
        dir.join(format!("{}.json", doc_type)),
        serde_json::to_string_pretty(body).unwrap(),
    )
    .unwrap();
}

/// An `index_stats` pair with expected parity, plus an optional unlisted field
fn write_index_stats(ws: &Workspace, extra: Option<(&str, Value)>) {
    write_doc(
        &ws.reference,
        "index_stats",
        &json!({"cluster_uuid": "c1", "source_node": {"uuid": "n1"}}),
    );
    let mut candidate = json!({
        "cluster_uuid": "c1",
        "service": {"type": "elasticsearch"},
        "@timestamp": "2026-10-18T00:00:00.000Z",
        "metricset": {"name": "index"}
    });
    if let Some((key, value)) = extra {
        candidate[key] = value;
    }
    write_doc(&ws.candidate, "index_stats", &candidate);
}

fn docparity(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docparity"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn dirs(ws: &Workspace) -> [&str; 2] {
    [
        ws.reference.to_str().unwrap(),
        ws.candidate.to_str().unwrap(),
    ]
}

#[test]
fn test_cli_parity_exits_zero_with_ok_line() {
    let ws = setup_workspace();
    write_index_stats(&ws, None);

    let output = docparity(&dirs(&ws));

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(
        "OK: Metricbeat-indexed doc for type='index_stats' has expected parity with internally-indexed doc."
    ));
}

#[test]
fn test_cli_verbose_logs_stay_off_stdout() {
    let ws = setup_workspace();
    write_index_stats(&ws, None);
    let [reference, candidate] = dirs(&ws);

    for flags in [vec!["-vv"], vec!["-vv", "--log-format", "json"]] {
        let mut args = flags.clone();
        args.extend([reference, candidate]);
        let output = docparity(&args);

        assert_eq!(output.status.code(), Some(0), "flags {:?}", flags);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(!stdout.trim().is_empty());
        for line in stdout.lines() {
            assert!(line.starts_with("OK:"), "flags {:?}: stray stdout line {:?}", flags, line);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("parity_run"), "flags {:?}: {}", flags, stderr);
        assert!(stderr.contains("compare_doc_type"), "flags {:?}: {}", flags, stderr);
    }

    let output = docparity(&["-vv", "--log-format", "json", reference, candidate]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let events: Vec<Value> = stderr
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(!events.is_empty());
    assert!(events
        .iter()
        .any(|e| e["fields"]["op"] == json!("parity_run") && e["fields"]["event"] == json!("end")));
}

#[test]
fn test_cli_unlisted_insertion_exits_101() {
    let ws = setup_workspace();
    write_index_stats(&ws, Some(("custom_extra", json!(true))));

    let output = docparity(&dirs(&ws));

    assert_eq!(output.status.code(), Some(101));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected insertion at 'custom_extra': true"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("OK:"));
}

#[test]
fn test_cli_allow_insert_flag_extends_allow_list() {
    let ws = setup_workspace();
    write_index_stats(&ws, Some(("custom_extra", json!(true))));
    let [reference, candidate] = dirs(&ws);

    let output = docparity(&["--allow-insert", "custom_extra", reference, candidate]);

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_cli_fixed_exit_code() {
    let ws = setup_workspace();
    write_index_stats(&ws, Some(("custom_extra", json!(1))));
    write_doc(&ws.reference, "shards", &json!({}));
    let [reference, candidate] = dirs(&ws);

    let legacy = docparity(&["--fixed-exit-code", reference, candidate]);
    assert_eq!(legacy.status.code(), Some(21));

    let explicit = docparity(&["--fixed-exit-code=3", reference, candidate]);
    assert_eq!(explicit.status.code(), Some(3));
}

#[test]
fn test_cli_missing_directories() {
    let ws = setup_workspace();
    let missing = ws.root.path().join("legacy");
    let missing = missing.to_str().unwrap();
    let [reference, candidate] = dirs(&ws);

    let output = docparity(&[missing, candidate]);
    assert_eq!(output.status.code(), Some(11));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("internally-indexed documents path does not exist"));

    let output = docparity(&[reference, missing]);
    assert_eq!(output.status.code(), Some(12));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Metricbeat-indexed documents path does not exist"));
}

#[test]
fn test_cli_malformed_document_exits_13() {
    let ws = setup_workspace();
    write_index_stats(&ws, None);
    fs::write(ws.candidate.join("index_stats.json"), "{\"cluster_uuid\": ").unwrap();

    let output = docparity(&dirs(&ws));

    assert_eq!(output.status.code(), Some(13));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Malformed document"));
}

#[test]
fn test_cli_usage_errors_exit_one() {
    assert_eq!(docparity(&[]).status.code(), Some(1));
    assert_eq!(
        docparity(&["--profile", "solr", "a", "b"]).status.code(),
        Some(1)
    );
    assert_eq!(docparity(&["--help"]).status.code(), Some(0));
}

#[test]
fn test_cli_writes_json_report_and_summary() {
    let ws = setup_workspace();
    write_index_stats(&ws, Some(("custom_extra", json!("x"))));
    let report_path = ws.root.path().join("report.json");
    let summary_path = ws.root.path().join("summary.md");
    let [reference, candidate] = dirs(&ws);

    let output = docparity(&[
        "--report-json",
        report_path.to_str().unwrap(),
        "--summary-md",
        summary_path.to_str().unwrap(),
        reference,
        candidate,
    ]);

    assert_eq!(output.status.code(), Some(101));
    let report: Value = serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["violation_count"], json!(1));
    assert_eq!(report["exit_code"], json!(101));
    assert!(fs::read_to_string(&summary_path)
        .unwrap()
        .contains("**Result**: Fail"));
}

#[test]
fn test_cli_config_overlay() {
    let ws = setup_workspace();
    write_index_stats(&ws, Some(("custom_extra", json!(1))));
    let config_path = ws.root.path().join("docparity.toml");
    fs::write(
        &config_path,
        "candidate_role = \"Agent\"\nallowed_insertions = [\"custom_extra\"]\n",
    )
    .unwrap();
    let [reference, candidate] = dirs(&ws);

    let output = docparity(&["--config", config_path.to_str().unwrap(), reference, candidate]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("OK: Agent-indexed doc"));
}

#[test]
fn test_cli_invalid_config_is_reported() {
    let ws = setup_workspace();
    write_index_stats(&ws, None);
    let config_path = ws.root.path().join("bad.toml");
    fs::write(&config_path, "allow_everything = true\n").unwrap();
    let [reference, candidate] = dirs(&ws);

    let output = docparity(&["--config", config_path.to_str().unwrap(), reference, candidate]);

    assert_ne!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid configuration"));
}
