//! Translation resolver: counterpart lookup by translation identity

use tracing::warn;

use crate::errors::Result;
use crate::model::{ContentNode, NodeKind};
use crate::store::ContentStore;

/// What a counterpart lookup is after: a folder, or a logical document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterpartKind {
    Folder,
    Document,
}

/// Find the translated counterpart of a node under `target_root_path`
///
/// Folder lookup matches folder nodes carrying the identifier directly.
/// Document lookup matches a handle's child variant carrying the identifier
/// and returns the handle, since the handle is the logical document entry.
///
/// A blank or absent `translation_id` is a guaranteed miss: the query is
/// never run against a blank filter value. When the store returns more than
/// one match, the first in store order is used and a warning names all
/// matches; duplicate identifiers under one root are a known ambiguity, not
/// an error.
pub fn find_translated_counterpart(
    store: &dyn ContentStore,
    target_root_path: &str,
    translation_id: Option<&str>,
    kind: CounterpartKind,
) -> Result<Option<ContentNode>> {
    let Some(translation_id) = translation_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    let node_kind = match kind {
        CounterpartKind::Folder => NodeKind::Folder,
        CounterpartKind::Document => NodeKind::DocumentVariant,
    };

    let matches = store.find_by_translation_id(target_root_path, translation_id, node_kind)?;

    if matches.len() > 1 {
        let paths: Vec<&str> = matches.iter().map(|node| node.path.as_str()).collect();
        warn!(
            component = module_path!(),
            op = "find_translated_counterpart",
            target_root = %target_root_path,
            translation_id = %translation_id,
            matches = ?paths,
            "multiple nodes share one translation id under the target root; using the first"
        );
    }

    let Some(first) = matches.into_iter().next() else {
        return Ok(None);
    };

    match kind {
        CounterpartKind::Folder => Ok(Some(first)),
        // The matched node is a variant; the logical document entry is its
        // parent handle.
        CounterpartKind::Document => match first.parent_path() {
            Some(parent) => Ok(store
                .get_node(parent)?
                .filter(|node| node.is_document_handle())),
            None => Ok(None),
        },
    }
}
