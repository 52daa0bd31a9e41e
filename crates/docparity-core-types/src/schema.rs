//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Comparison identifiers
pub const FIELD_DOC_TYPE: &str = "doc_type";
pub const FIELD_PROFILE: &str = "profile";
pub const FIELD_RULE: &str = "rule";

// Collection sizes
pub const FIELD_DIFF_LEN: &str = "diff_len";
pub const FIELD_VIOLATION_COUNT: &str = "violation_count";
pub const FIELD_DOC_TYPE_COUNT: &str = "doc_type_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
