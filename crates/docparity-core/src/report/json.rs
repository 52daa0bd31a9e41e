//! JSON run report for CI artifacts.

use crate::errors::{ParityError, Result};
use crate::report::model::RunReport;
use serde_json::json;
use std::path::Path;

/// Version of the JSON report layout
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Render the machine-readable run report
///
/// # Errors
///
/// `Serialization` if the report cannot be encoded.
pub fn render_json_report(report: &RunReport) -> Result<String> {
    let mut value = serde_json::to_value(report)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("report_schema_version".to_string(), json!(REPORT_SCHEMA_VERSION));
        object.insert("violation_count".to_string(), json!(report.violation_count()));
        object.insert("exit_code".to_string(), json!(report.exit_code()));
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Write the JSON run report to `path`
///
/// # Errors
///
/// `Serialization` on encoding failure, `Io` if the file cannot be written.
pub fn write_json_report(report: &RunReport, path: &Path) -> Result<()> {
    let text = render_json_report(report)?;
    std::fs::write(path, text).map_err(|e| ParityError::io(path, &e))
}
