//! pagemirror store - in-memory content store and document service
//!
//! Provides:
//! - `MemoryStore`: a thread-safe map-backed content tree implementing the
//!   core's `ContentStore` query surface, with fixture-building helpers
//! - `MemoryDocumentService`: a `DocumentManagementService` that executes
//!   workflow operations against a shared `MemoryStore` and records every
//!   call for assertions
//!
//! This is the concrete backend used by the integration tests and by
//! embedders who want a self-contained tree.

pub mod memory;
pub mod service;

pub use memory::MemoryStore;
pub use service::{MemoryDocumentService, ServiceCall};

// The core's result type is the only error surface this crate has.
pub use pagemirror_core::errors::Result;
