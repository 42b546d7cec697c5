//! pagemirror core - translation-aware mirroring of referenced content
//! between locale content trees
//!
//! This crate provides the core algorithms for keeping referenced content in
//! step when a page definition is copied between two parallel content trees
//! linked by stable translation identifiers:
//! - Reference filter pruning indirections already resolvable on the target side
//! - Translation-aware counterpart and target-path resolution
//! - Top-down materialization of missing target folder chains
//! - Idempotent copy orchestration with single-writer-per-target-root discipline
//! - Document-link parameter rewriting on copied configurations
//!
//! The hierarchical content store and the document workflow service are
//! external collaborators, injected behind the `ContentStore` and
//! `DocumentManagementService` traits.

pub mod errors;
pub mod filter;
pub mod logging;
pub mod materialize;
pub mod model;
pub mod orchestrate;
pub mod params;
pub mod resolve;
pub mod scan;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use errors::{ErrorKind, MirrorError, Result};
pub use filter::{build_skip_set, SkipSet};
pub use materialize::ensure_folder_chain;
pub use model::{ComponentConfig, ContentNode, ContentRoot, NodeKind, SiteConfiguration};
pub use orchestrate::{DocumentCopier, LockRegistry, PassReport, PathCorrespondence, SkipReason};
pub use params::update_target_document_paths;
pub use resolve::{
    find_translated_counterpart, find_translated_document_handle, resolve_target_document_path,
    CounterpartKind,
};
pub use scan::{ConfigParamsScanner, ReferenceScanner};
pub use service::DocumentManagementService;
pub use store::ContentStore;
