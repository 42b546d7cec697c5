//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_PASS_ID: &str = "pass_id";

// Tree coordinates
pub const FIELD_SOURCE_ROOT: &str = "source_root";
pub const FIELD_TARGET_ROOT: &str = "target_root";
pub const FIELD_CANDIDATE: &str = "candidate";
pub const FIELD_PATH: &str = "path";
pub const FIELD_TRANSLATION_ID: &str = "translation_id";
pub const FIELD_LOCALE: &str = "locale";

// Outcome counts
pub const FIELD_CREATED: &str = "created";
pub const FIELD_SKIPPED: &str = "skipped";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_SKIP: &str = "skip";
