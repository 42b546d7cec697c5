//! Path mapper: translation-aware resolution of target document paths
//!
//! The mapping rule is "find the deepest already-translated ancestor, then
//! mirror the remaining untranslated suffix verbatim". It minimizes folder
//! creation while respecting translation links that already exist higher up
//! the tree.

use crate::errors::{MirrorError, Result};
use crate::model::node::{join_paths, node_name, parent_path};
use crate::model::{ContentNode, ContentRoot};
use crate::resolve::translation::{find_translated_counterpart, CounterpartKind};
use crate::store::{document_translation_id, ContentStore};

/// Resolve the absolute target path for a source document
///
/// `document_rel_path` is the document handle's path relative to the source
/// root. Walking starts at the handle's immediate parent folder: the first
/// ancestor with a translated counterpart under the target root anchors the
/// result, and the folder names between that ancestor and the document are
/// appended verbatim, followed by the handle name. When no ancestor up to
/// the source root resolves, the whole relative path is mirrored verbatim
/// under the target root.
///
/// # Errors
///
/// * `SourceFolderMissing` - an ancestor folder named by the relative path
///   does not exist in the source tree
pub fn resolve_target_document_path(
    store: &dyn ContentStore,
    source_root: &ContentRoot,
    target_root: &ContentRoot,
    document_rel_path: &str,
) -> Result<String> {
    let handle_name = node_name(document_rel_path);
    let source_document_path = join_paths(&source_root.path, document_rel_path);

    // Names of untranslated folders, leaf-first
    let mut mirrored: Vec<String> = Vec::new();
    let mut current = parent_path(&source_document_path)
        .unwrap_or(source_root.path.as_str())
        .to_string();

    while current != source_root.path {
        let folder = store
            .get_node(&current)?
            .ok_or_else(|| MirrorError::SourceFolderMissing {
                path: current.clone(),
            })?;

        let counterpart = find_translated_counterpart(
            store,
            &target_root.path,
            folder.translation_id.as_deref(),
            CounterpartKind::Folder,
        )?;

        if let Some(counterpart) = counterpart {
            let mut resolved = counterpart.path;
            for name in mirrored.iter().rev() {
                resolved = join_paths(&resolved, name);
            }
            return Ok(join_paths(&resolved, handle_name));
        }

        mirrored.push(folder.name().to_string());
        current = match folder.parent_path() {
            Some(parent) => parent.to_string(),
            None => break,
        };
    }

    // No translated ancestor: pure structural mirroring.
    Ok(join_paths(&target_root.path, document_rel_path))
}

/// Find the target-side handle of an already-translated document
///
/// Used to short-circuit copying when the document itself is already
/// translated somewhere under the target root, possibly at a different
/// path than naive mirroring would suggest.
pub fn find_translated_document_handle(
    store: &dyn ContentStore,
    target_root: &ContentRoot,
    source_document_handle: &ContentNode,
) -> Result<Option<ContentNode>> {
    let translation_id = document_translation_id(store, source_document_handle)?;
    find_translated_counterpart(
        store,
        &target_root.path,
        translation_id.as_deref(),
        CounterpartKind::Document,
    )
}
