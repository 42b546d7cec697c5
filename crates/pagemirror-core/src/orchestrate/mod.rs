//! Copy orchestrator: idempotent skip/create decisions per candidate path,
//! serialized per target root

pub mod locks;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use pagemirror_core_types::{schema, PassId};

use crate::errors::{MirrorError, Result};
use crate::filter::build_skip_set;
use crate::materialize::ensure_folder_chain;
use crate::model::node::{canonical_path, join_paths, parent_path, relative_to};
use crate::model::{
    dedup_ordered, ComponentConfig, ContentRoot, DocumentReference, SiteConfiguration,
};
use crate::resolve::{find_translated_document_handle, resolve_target_document_path};
use crate::scan::ReferenceScanner;
use crate::service::DocumentManagementService;
use crate::store::{document_exists, document_handle, ContentStore};

pub use locks::LockRegistry;

/// Why a candidate path was skipped instead of copied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Absolute repository path, not relative to the source content base
    AbsolutePath,
    /// Nothing exists at the candidate path under the source root
    MissingAtSource,
    /// The source node is neither a document handle nor a variant
    NoDocumentAtSource,
    /// The document is already translated somewhere under the target root
    AlreadyTranslated,
    /// A document already sits at the resolved target path
    AlreadyExists,
}

/// Mapping from a source document path to its resolved target path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCorrespondence {
    pub source_path: String,
    pub target_path: String,
}

/// Outcome accounting for one orchestration pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    /// Correlation id of the pass
    pub pass_id: PassId,
    /// Documents created in the target tree, in processing order
    pub created: Vec<PathCorrespondence>,
    /// Candidates skipped, with the reason for each
    pub skipped: Vec<(String, SkipReason)>,
}

impl PassReport {
    fn new(pass_id: PassId) -> Self {
        Self {
            pass_id,
            created: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

enum CandidateOutcome {
    Created(PathCorrespondence),
    Skipped(SkipReason),
}

/// Orchestrates copying of referenced documents from a source content tree
/// into a target content tree
///
/// One copier is long-lived and shared by the event dispatcher; all state
/// built during a pass (skip set, correspondences, report) lives on the
/// stack of that pass. Mutating orchestration for a given target root is
/// mutually exclusive through the lock registry.
pub struct DocumentCopier {
    store: Arc<dyn ContentStore>,
    service: Arc<dyn DocumentManagementService>,
    locks: LockRegistry,
}

impl DocumentCopier {
    pub fn new(store: Arc<dyn ContentStore>, service: Arc<dyn DocumentManagementService>) -> Self {
        Self {
            store,
            service,
            locks: LockRegistry::new(),
        }
    }

    /// Copy every candidate document that is missing from the target tree
    ///
    /// Decides a skip/create outcome per candidate path, materializing
    /// missing folder chains before document creation. Skips are logged,
    /// never errors; precondition failures and structural conflicts abort
    /// the pass. Documents created before an abort remain in place.
    ///
    /// # Errors
    ///
    /// * `RootNotFound` / `BlankLocale` - a content root does not resolve usably
    /// * `SameLocale` - source and target carry the same locale on different paths
    /// * `NotAFolder` / `TranslationIdMismatch` / `SourceFolderMissing` - structural conflicts
    /// * `Store` / `Service` - a collaborator call failed
    pub fn copy_referenced_documents(
        &self,
        source_root_path: &str,
        target_root_path: &str,
        candidate_paths: &[String],
    ) -> Result<PassReport> {
        self.execute(source_root_path, target_root_path, |_| {
            Ok(candidate_paths.to_vec())
        })
    }

    /// Copy everything a page configuration references
    ///
    /// The full per-event flow: build the skip set from the two site
    /// configurations, scan the page for document references with it, then
    /// copy the candidates. All of it runs under the target root's lock.
    pub fn copy_page_documents(
        &self,
        source_root_path: &str,
        target_root_path: &str,
        page_config: &ComponentConfig,
        source_site: &SiteConfiguration,
        target_site: &SiteConfiguration,
        scanner: &dyn ReferenceScanner,
    ) -> Result<PassReport> {
        self.execute(source_root_path, target_root_path, |pass_id| {
            let skip = build_skip_set(page_config, source_site, target_site);
            info!(
                component = module_path!(),
                op = "copy_page_documents",
                pass_id = %pass_id,
                skipped_configs = skip.len(),
            );
            Ok(scanner.scan_document_references(page_config, &skip))
        })
    }

    fn execute(
        &self,
        source_root_path: &str,
        target_root_path: &str,
        gather: impl FnOnce(&PassId) -> Result<Vec<String>>,
    ) -> Result<PassReport> {
        let pass_id = PassId::new();
        let canonical_target = canonical_path(target_root_path).to_string();

        // Serialize whole passes per target root; the guard spans filter
        // building, resolution, materialization and translation calls.
        let lock = self.locks.lock_for(&canonical_target);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        info!(
            component = module_path!(),
            op = "copy_referenced_documents",
            event = schema::EVENT_START,
            pass_id = %pass_id,
            source_root = %source_root_path,
            target_root = %canonical_target,
        );

        let result = gather(&pass_id).and_then(|candidates| {
            self.run_pass(&pass_id, source_root_path, &canonical_target, &candidates)
        });

        match &result {
            Ok(report) => info!(
                component = module_path!(),
                op = "copy_referenced_documents",
                event = schema::EVENT_END,
                pass_id = %pass_id,
                created = report.created_count(),
                skipped = report.skipped_count(),
            ),
            Err(err) => error!(
                component = module_path!(),
                op = "copy_referenced_documents",
                event = schema::EVENT_END_ERROR,
                pass_id = %pass_id,
                err_kind = ?err.kind(),
                err_code = err.code(),
                reason = %err.client_reason(),
            ),
        }

        result
    }

    fn run_pass(
        &self,
        pass_id: &PassId,
        source_root_path: &str,
        canonical_target: &str,
        candidate_paths: &[String],
    ) -> Result<PassReport> {
        let canonical_source = canonical_path(source_root_path);

        // Identical content bases make the whole pass a no-op, regardless
        // of locales: a tree trivially contains its own content.
        if canonical_source == canonical_target {
            info!(
                component = module_path!(),
                op = "copy_referenced_documents",
                pass_id = %pass_id,
                source_root = %canonical_source,
                "source and target share the same content base path; nothing to copy"
            );
            return Ok(PassReport::new(pass_id.clone()));
        }

        let source_root = ContentRoot::resolve(self.store.as_ref(), canonical_source)?;
        let target_root = ContentRoot::resolve(self.store.as_ref(), canonical_target)?;

        if source_root.locale == target_root.locale {
            return Err(MirrorError::SameLocale {
                locale: source_root.locale,
                source_path: source_root.path,
                target_path: target_root.path,
            });
        }

        let mut report = PassReport::new(pass_id.clone());

        for candidate in dedup_ordered(candidate_paths.iter().cloned()) {
            match self.process_candidate(pass_id, &source_root, &target_root, &candidate)? {
                CandidateOutcome::Created(correspondence) => report.created.push(correspondence),
                CandidateOutcome::Skipped(reason) => {
                    info!(
                        component = module_path!(),
                        op = "copy_referenced_documents",
                        event = schema::EVENT_SKIP,
                        pass_id = %pass_id,
                        candidate = %candidate,
                        reason = ?reason,
                    );
                    report.skipped.push((candidate, reason));
                }
            }
        }

        Ok(report)
    }

    fn process_candidate(
        &self,
        pass_id: &PassId,
        source_root: &ContentRoot,
        target_root: &ContentRoot,
        candidate: &str,
    ) -> Result<CandidateOutcome> {
        let store = self.store.as_ref();
        let reference = DocumentReference::new(candidate);

        // Absolute repository paths are already resolved and never rewritten.
        if reference.is_absolute() {
            return Ok(CandidateOutcome::Skipped(SkipReason::AbsolutePath));
        }

        let source_path = join_paths(&source_root.path, reference.as_str());
        let Some(source_node) = store.get_node(&source_path)? else {
            return Ok(CandidateOutcome::Skipped(SkipReason::MissingAtSource));
        };

        let Some(handle) = document_handle(store, &source_node)? else {
            return Ok(CandidateOutcome::Skipped(SkipReason::NoDocumentAtSource));
        };

        if find_translated_document_handle(store, target_root, &handle)?.is_some() {
            return Ok(CandidateOutcome::Skipped(SkipReason::AlreadyTranslated));
        }

        let handle_rel =
            relative_to(&source_root.path, &handle.path).ok_or_else(|| MirrorError::Internal {
                message: format!(
                    "document handle '{}' is not under the source root '{}'",
                    handle.path, source_root.path
                ),
            })?;

        let target_document_path =
            resolve_target_document_path(store, source_root, target_root, &handle_rel)?;

        if document_exists(store, &target_document_path)? {
            return Ok(CandidateOutcome::Skipped(SkipReason::AlreadyExists));
        }

        let source_folder_path = handle
            .parent_path()
            .ok_or_else(|| MirrorError::SourceFolderMissing {
                path: handle.path.clone(),
            })?
            .to_string();
        let source_folder = store
            .get_node(&source_folder_path)?
            .filter(|node| node.is_folder())
            .ok_or_else(|| MirrorError::SourceFolderMissing {
                path: source_folder_path.clone(),
            })?;

        let target_folder_path =
            parent_path(&target_document_path)
                .ok_or_else(|| MirrorError::Internal {
                    message: format!(
                        "resolved target document path '{}' has no parent folder",
                        target_document_path
                    ),
                })?
                .to_string();

        match store.get_node(&target_folder_path)? {
            Some(existing) => {
                // The resolved folder already exists: it must be a folder
                // linked to the same logical folder as the source.
                if !existing.is_folder() {
                    return Err(MirrorError::NotAFolder {
                        path: target_folder_path,
                        kind: existing.kind,
                    });
                }
                if existing.translation_id != source_folder.translation_id {
                    return Err(MirrorError::TranslationIdMismatch {
                        source_path: source_folder_path,
                        target_path: target_folder_path,
                        source_id: source_folder.translation_id,
                        target_id: existing.translation_id,
                    });
                }
            }
            None => {
                let source_folder_rel = relative_to(&source_root.path, &source_folder_path)
                    .ok_or_else(|| MirrorError::Internal {
                        message: format!(
                            "source folder '{}' is not under the source root '{}'",
                            source_folder_path, source_root.path
                        ),
                    })?;
                let target_folder_rel = relative_to(&target_root.path, &target_folder_path);

                ensure_folder_chain(
                    store,
                    self.service.as_ref(),
                    source_root,
                    &source_folder_rel,
                    target_root,
                    target_folder_rel.as_deref(),
                    &target_root.locale,
                )?;
            }
        }

        let created_path =
            self.service
                .translate_document(&handle.path, &target_root.locale, handle.name())?;

        info!(
            component = module_path!(),
            op = "copy_referenced_documents",
            pass_id = %pass_id,
            candidate = %candidate,
            path = %created_path,
            locale = %target_root.locale,
            "created translated document"
        );

        Ok(CandidateOutcome::Created(PathCorrespondence {
            source_path: handle.path,
            target_path: created_path,
        }))
    }
}
