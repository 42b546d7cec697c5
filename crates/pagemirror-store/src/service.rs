//! In-memory document management service
//!
//! Executes the workflow operations against a shared `MemoryStore` and
//! records every call, so tests can assert exactly which mutations a pass
//! performed. Placement follows the translation workflow rule: a translated
//! node lands under the counterpart (for the requested locale) of its source
//! parent, which must already exist.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use pagemirror_core::errors::{MirrorError, Result};
use pagemirror_core::model::node::{join_paths, node_name, parent_path};
use pagemirror_core::model::{ContentNode, NodeKind};
use pagemirror_core::service::DocumentManagementService;
use pagemirror_core::store::ContentStore;

use crate::memory::MemoryStore;

/// One recorded service invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceCall {
    ObtainEditableDocument { path: String },
    DisposeEditableDocument { path: String },
    CommitEditableDocument { path: String },
    CopyDocument { source: String, target_folder: String, name: String },
    PublishDocument { path: String },
    DepublishDocument { path: String },
    TranslateFolder { source: String, locale: String, name: String },
    TranslateDocument { source: String, locale: String, name: String },
}

/// Document management service over a shared in-memory store
pub struct MemoryDocumentService {
    store: Arc<MemoryStore>,
    calls: Mutex<Vec<ServiceCall>>,
    fail_operation: Mutex<Option<String>>,
}

impl MemoryDocumentService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            calls: Mutex::new(Vec::new()),
            fail_operation: Mutex::new(None),
        }
    }

    /// All calls recorded so far, in invocation order
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of mutating calls (folder/document translations and copies)
    pub fn mutation_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    ServiceCall::TranslateFolder { .. }
                        | ServiceCall::TranslateDocument { .. }
                        | ServiceCall::CopyDocument { .. }
                )
            })
            .count()
    }

    /// Forget all recorded calls
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Make the named operation fail until cleared
    pub fn fail_on(&self, operation: &str) {
        *self.fail_operation.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(operation.to_string());
    }

    fn record(&self, call: ServiceCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }

    fn check_failure(&self, operation: &str, path: &str) -> Result<()> {
        let fail = self.fail_operation.lock().unwrap_or_else(|e| e.into_inner());
        if fail.as_deref() == Some(operation) {
            return Err(MirrorError::Service {
                operation: operation.to_string(),
                path: path.to_string(),
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn service_error(operation: &str, path: &str, message: impl Into<String>) -> MirrorError {
        MirrorError::Service {
            operation: operation.to_string(),
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Find the counterpart, for `locale`, of the folder at `path`
    ///
    /// Queries the whole tree by the folder's translation id and filters by
    /// locale; the first match in store order wins.
    fn locale_counterpart(&self, operation: &str, path: &str, locale: &str) -> Result<ContentNode> {
        let folder = self
            .store
            .get_node(path)?
            .filter(|node| node.is_folder())
            .ok_or_else(|| Self::service_error(operation, path, "no folder at this path"))?;

        let translation_id = folder.translation_id.as_deref().ok_or_else(|| {
            Self::service_error(operation, path, "folder carries no translation id")
        })?;

        let matches = self
            .store
            .find_by_translation_id("/", translation_id, NodeKind::Folder)?;
        let mut with_locale = matches
            .into_iter()
            .filter(|node| node.locale.as_deref() == Some(locale));

        let found = with_locale.next().ok_or_else(|| {
            Self::service_error(
                operation,
                path,
                format!("no counterpart folder for locale '{}'", locale),
            )
        })?;

        if with_locale.next().is_some() {
            warn!(
                component = module_path!(),
                op = operation,
                path = %path,
                locale = %locale,
                "several counterpart folders share the locale; using the first"
            );
        }

        Ok(found)
    }

    fn ensure_vacant(&self, operation: &str, path: &str) -> Result<()> {
        if self.store.node_exists(path)? {
            return Err(Self::service_error(
                operation,
                path,
                "a node already exists at the target path",
            ));
        }
        Ok(())
    }
}

impl DocumentManagementService for MemoryDocumentService {
    fn obtain_editable_document(&self, document_location: &str) -> Result<bool> {
        self.record(ServiceCall::ObtainEditableDocument {
            path: document_location.to_string(),
        });
        self.check_failure("obtain_editable_document", document_location)?;
        self.store.node_exists(document_location)
    }

    fn dispose_editable_document(&self, document_location: &str) -> Result<bool> {
        self.record(ServiceCall::DisposeEditableDocument {
            path: document_location.to_string(),
        });
        self.check_failure("dispose_editable_document", document_location)?;
        self.store.node_exists(document_location)
    }

    fn commit_editable_document(&self, document_location: &str) -> Result<bool> {
        self.record(ServiceCall::CommitEditableDocument {
            path: document_location.to_string(),
        });
        self.check_failure("commit_editable_document", document_location)?;
        self.store.node_exists(document_location)
    }

    fn copy_document(
        &self,
        source_document_location: &str,
        target_folder_location: &str,
        target_document_name: &str,
    ) -> Result<String> {
        self.record(ServiceCall::CopyDocument {
            source: source_document_location.to_string(),
            target_folder: target_folder_location.to_string(),
            name: target_document_name.to_string(),
        });
        self.check_failure("copy_document", source_document_location)?;

        let operation = "copy_document";
        let handle = self
            .store
            .get_node(source_document_location)?
            .filter(|node| node.is_document_handle())
            .ok_or_else(|| {
                Self::service_error(operation, source_document_location, "no document handle")
            })?;
        let source_variant_path = join_paths(&handle.path, handle.name());
        let variant = self
            .store
            .get_node(&source_variant_path)?
            .ok_or_else(|| {
                Self::service_error(operation, &source_variant_path, "no document variant")
            })?;

        let target_folder = self
            .store
            .get_node(target_folder_location)?
            .filter(|node| node.is_folder())
            .ok_or_else(|| {
                Self::service_error(operation, target_folder_location, "no target folder")
            })?;

        let target_handle_path = join_paths(&target_folder.path, target_document_name);
        self.ensure_vacant(operation, &target_handle_path)?;

        // A copy is a new logical document: fresh translation identity.
        let new_id = Uuid::now_v7().to_string();
        self.store.insert_node(ContentNode::new(
            &target_handle_path,
            NodeKind::DocumentHandle,
        ));
        let mut new_variant = ContentNode::new(
            join_paths(&target_handle_path, target_document_name),
            NodeKind::DocumentVariant,
        )
        .with_translation_id(new_id);
        if let Some(locale) = variant.locale.as_deref() {
            new_variant = new_variant.with_locale(locale);
        }
        self.store.insert_node(new_variant);

        Ok(target_handle_path)
    }

    fn publish_document(&self, document_location: &str) -> Result<bool> {
        self.record(ServiceCall::PublishDocument {
            path: document_location.to_string(),
        });
        self.check_failure("publish_document", document_location)?;
        self.store.node_exists(document_location)
    }

    fn depublish_document(&self, document_location: &str) -> Result<bool> {
        self.record(ServiceCall::DepublishDocument {
            path: document_location.to_string(),
        });
        self.check_failure("depublish_document", document_location)?;
        self.store.node_exists(document_location)
    }

    fn translate_folder(
        &self,
        source_folder_location: &str,
        locale: &str,
        name: &str,
    ) -> Result<String> {
        self.record(ServiceCall::TranslateFolder {
            source: source_folder_location.to_string(),
            locale: locale.to_string(),
            name: name.to_string(),
        });
        self.check_failure("translate_folder", source_folder_location)?;

        let operation = "translate_folder";
        let source = self
            .store
            .get_node(source_folder_location)?
            .filter(|node| node.is_folder())
            .ok_or_else(|| {
                Self::service_error(operation, source_folder_location, "no source folder")
            })?;

        let parent = parent_path(source_folder_location).ok_or_else(|| {
            Self::service_error(operation, source_folder_location, "source folder has no parent")
        })?;
        let target_parent = self.locale_counterpart(operation, parent, locale)?;

        let target_path = join_paths(&target_parent.path, name);
        self.ensure_vacant(operation, &target_path)?;

        let mut created = ContentNode::new(&target_path, NodeKind::Folder).with_locale(locale);
        if let Some(id) = source.translation_id.as_deref() {
            created = created.with_translation_id(id);
        }
        self.store.insert_node(created);

        Ok(target_path)
    }

    fn translate_document(
        &self,
        source_document_location: &str,
        locale: &str,
        name: &str,
    ) -> Result<String> {
        self.record(ServiceCall::TranslateDocument {
            source: source_document_location.to_string(),
            locale: locale.to_string(),
            name: name.to_string(),
        });
        self.check_failure("translate_document", source_document_location)?;

        let operation = "translate_document";
        let handle = self
            .store
            .get_node(source_document_location)?
            .filter(|node| node.is_document_handle())
            .ok_or_else(|| {
                Self::service_error(operation, source_document_location, "no document handle")
            })?;

        let variant_path = join_paths(&handle.path, node_name(&handle.path));
        let variant = self.store.get_node(&variant_path)?.ok_or_else(|| {
            Self::service_error(operation, &variant_path, "no document variant")
        })?;

        let parent = parent_path(source_document_location).ok_or_else(|| {
            Self::service_error(operation, source_document_location, "document has no parent")
        })?;
        let target_folder = self.locale_counterpart(operation, parent, locale)?;

        let target_handle_path = join_paths(&target_folder.path, name);
        self.ensure_vacant(operation, &target_handle_path)?;

        self.store.insert_node(ContentNode::new(
            &target_handle_path,
            NodeKind::DocumentHandle,
        ));
        let mut created_variant = ContentNode::new(
            join_paths(&target_handle_path, name),
            NodeKind::DocumentVariant,
        )
        .with_locale(locale);
        if let Some(id) = variant.translation_id.as_deref() {
            created_variant = created_variant.with_translation_id(id);
        }
        self.store.insert_node(created_variant);

        Ok(target_handle_path)
    }
}
