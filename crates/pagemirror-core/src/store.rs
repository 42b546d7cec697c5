//! Read/query boundary to the hierarchical content store
//!
//! The core never mutates content directly; everything it learns about the
//! two trees comes through this trait, and everything it changes goes
//! through the document management service.

use crate::errors::Result;
use crate::model::node::join_paths;
use crate::model::{ContentNode, NodeKind};

/// Read and query access to a hierarchical content store
///
/// Implementations must return translation-id query matches in a stable,
/// documented order: when the same identifier is (erroneously) carried by
/// several nodes under one root, the resolver deterministically picks the
/// first match and warns, so an unstable order would make that pick
/// non-deterministic.
pub trait ContentStore: Send + Sync {
    /// True when a node exists at `path`
    fn node_exists(&self, path: &str) -> Result<bool>;

    /// Get the node at `path`, or `None` when nothing is there
    fn get_node(&self, path: &str) -> Result<Option<ContentNode>>;

    /// Scoped exact-match query: all nodes of the given kind under
    /// `root_path` whose translation identifier equals `translation_id`,
    /// in stable store order
    fn find_by_translation_id(
        &self,
        root_path: &str,
        translation_id: &str,
        kind: NodeKind,
    ) -> Result<Vec<ContentNode>>;
}

/// True when a folder exists at `path`
pub fn folder_exists(store: &dyn ContentStore, path: &str) -> Result<bool> {
    Ok(store.get_node(path)?.is_some_and(|node| node.is_folder()))
}

/// True when a document exists at `path`
///
/// The path may point at the handle itself or at a variant directly below
/// a handle; anything else is not a document.
pub fn document_exists(store: &dyn ContentStore, path: &str) -> Result<bool> {
    let Some(node) = store.get_node(path)? else {
        return Ok(false);
    };

    match node.kind {
        NodeKind::DocumentHandle => Ok(true),
        NodeKind::DocumentVariant => match node.parent_path() {
            Some(parent) => Ok(store
                .get_node(parent)?
                .is_some_and(|parent_node| parent_node.is_document_handle())),
            None => Ok(false),
        },
        _ => Ok(false),
    }
}

/// Resolve the document handle for a node
///
/// Returns the node itself when it is a handle, its parent when the node is
/// a variant directly below a handle, and `None` otherwise.
pub fn document_handle(store: &dyn ContentStore, node: &ContentNode) -> Result<Option<ContentNode>> {
    match node.kind {
        NodeKind::DocumentHandle => Ok(Some(node.clone())),
        NodeKind::DocumentVariant => match node.parent_path() {
            Some(parent) => Ok(store
                .get_node(parent)?
                .filter(|parent_node| parent_node.is_document_handle())),
            None => Ok(None),
        },
        _ => Ok(None),
    }
}

/// Get the same-named variant below a document handle
///
/// Variants live at `<handle path>/<handle name>`; the variant is where the
/// translation identifier and locale of a document are carried.
pub fn document_variant(
    store: &dyn ContentStore,
    handle: &ContentNode,
) -> Result<Option<ContentNode>> {
    let variant_path = join_paths(&handle.path, handle.name());
    Ok(store
        .get_node(&variant_path)?
        .filter(|node| node.is_document_variant()))
}

/// Translation identifier of the document addressed by a handle, if any
pub fn document_translation_id(
    store: &dyn ContentStore,
    handle: &ContentNode,
) -> Result<Option<String>> {
    Ok(document_variant(store, handle)?.and_then(|variant| variant.translation_id))
}

// Keeps the free helpers honest against a minimal store without pulling the
// in-memory store crate into a dependency cycle.
#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A fixed list of nodes acting as a store, for unit tests
    pub(crate) struct FixedStore {
        nodes: Vec<ContentNode>,
    }

    impl FixedStore {
        pub(crate) fn with_nodes(nodes: Vec<ContentNode>) -> Self {
            Self { nodes }
        }
    }

    impl ContentStore for FixedStore {
        fn node_exists(&self, path: &str) -> Result<bool> {
            Ok(self.nodes.iter().any(|n| n.path == path))
        }

        fn get_node(&self, path: &str) -> Result<Option<ContentNode>> {
            Ok(self.nodes.iter().find(|n| n.path == path).cloned())
        }

        fn find_by_translation_id(
            &self,
            root_path: &str,
            translation_id: &str,
            kind: NodeKind,
        ) -> Result<Vec<ContentNode>> {
            Ok(self
                .nodes
                .iter()
                .filter(|n| {
                    n.kind == kind
                        && n.translation_id.as_deref() == Some(translation_id)
                        && (n.path == root_path
                            || n.path.starts_with(&format!("{}/", root_path.trim_end_matches('/'))))
                })
                .cloned()
                .collect())
        }
    }

    #[test]
    fn test_folder_exists() {
        let store = FixedStore::with_nodes(vec![
            ContentNode::new("/content/en/news", NodeKind::Folder),
            ContentNode::new("/content/en/news/article1", NodeKind::DocumentHandle),
        ]);

        assert!(folder_exists(&store, "/content/en/news").unwrap());
        assert!(!folder_exists(&store, "/content/en/news/article1").unwrap());
        assert!(!folder_exists(&store, "/content/en/missing").unwrap());
    }

    #[test]
    fn test_document_exists_for_handle_and_variant() {
        let store = FixedStore::with_nodes(vec![
            ContentNode::new("/c/en/news/article1", NodeKind::DocumentHandle),
            ContentNode::new("/c/en/news/article1/article1", NodeKind::DocumentVariant),
        ]);

        assert!(document_exists(&store, "/c/en/news/article1").unwrap());
        assert!(document_exists(&store, "/c/en/news/article1/article1").unwrap());
        assert!(!document_exists(&store, "/c/en/news").unwrap());
    }

    #[test]
    fn test_document_handle_from_variant() {
        let store = FixedStore::with_nodes(vec![
            ContentNode::new("/c/en/news/article1", NodeKind::DocumentHandle),
            ContentNode::new("/c/en/news/article1/article1", NodeKind::DocumentVariant),
        ]);

        let variant = store
            .get_node("/c/en/news/article1/article1")
            .unwrap()
            .unwrap();
        let handle = document_handle(&store, &variant).unwrap().unwrap();
        assert_eq!(handle.path, "/c/en/news/article1");

        let folder = ContentNode::new("/c/en/news", NodeKind::Folder);
        assert!(document_handle(&store, &folder).unwrap().is_none());
    }

    #[test]
    fn test_document_translation_id_reads_variant() {
        let store = FixedStore::with_nodes(vec![
            ContentNode::new("/c/en/news/article1", NodeKind::DocumentHandle),
            ContentNode::new("/c/en/news/article1/article1", NodeKind::DocumentVariant)
                .with_translation_id("doc-1")
                .with_locale("en"),
        ]);

        let handle = store.get_node("/c/en/news/article1").unwrap().unwrap();
        assert_eq!(
            document_translation_id(&store, &handle).unwrap(),
            Some("doc-1".to_string())
        );
    }
}
