//! Translation-aware counterpart and path resolution

pub mod path;
pub mod translation;

pub use path::{find_translated_document_handle, resolve_target_document_path};
pub use translation::{find_translated_counterpart, CounterpartKind};
