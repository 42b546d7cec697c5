//! Thread-safe in-memory content store
//!
//! A map-backed tree with the query surface the core needs. Translation-id
//! queries return matches in insertion order, which is this store's stable,
//! documented order: when a translation id is duplicated under one root,
//! the node inserted first always wins the resolver's pick.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use pagemirror_core::errors::{MirrorError, Result};
use pagemirror_core::model::node::{canonical_path, join_paths};
use pagemirror_core::model::{ContentNode, NodeKind};
use pagemirror_core::store::ContentStore;

#[derive(Debug, Clone)]
struct NodeRecord {
    node: ContentNode,
    created_at: DateTime<Utc>,
    seq: u64,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: HashMap<String, NodeRecord>,
    next_seq: u64,
}

/// In-memory store for content nodes
///
/// All access goes through an internal mutex, so a shared reference can be
/// handed to concurrent passes and to the in-memory document service at the
/// same time.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Poisoning only means a panic mid-insert elsewhere; the map is
        // still consistent because every mutation is a single insert.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a node, replacing any previous node at the same path
    ///
    /// This is the low-level entry used by fixture building and by the
    /// in-memory document service.
    pub fn insert_node(&self, node: ContentNode) {
        let mut inner = self.locked();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.nodes.insert(
            node.path.clone(),
            NodeRecord {
                node,
                created_at: Utc::now(),
                seq,
            },
        );
    }

    /// Add a content root: a folder carrying a locale and a translation id
    pub fn add_root(&self, path: &str, locale: &str, translation_id: &str) {
        self.insert_node(
            ContentNode::new(canonical_path(path), NodeKind::Folder)
                .with_locale(locale)
                .with_translation_id(translation_id),
        );
    }

    /// Add a folder below an existing path
    pub fn add_folder(&self, path: &str, locale: &str, translation_id: &str) {
        self.insert_node(
            ContentNode::new(canonical_path(path), NodeKind::Folder)
                .with_locale(locale)
                .with_translation_id(translation_id),
        );
    }

    /// Add a folder without translation linkage
    pub fn add_unlinked_folder(&self, path: &str) {
        self.insert_node(ContentNode::new(canonical_path(path), NodeKind::Folder));
    }

    /// Add a document: a handle plus its same-named variant
    ///
    /// The variant carries the translation id and locale, as documents do.
    /// Returns the handle path.
    pub fn add_document(
        &self,
        folder_path: &str,
        name: &str,
        locale: &str,
        translation_id: &str,
    ) -> String {
        let handle_path = join_paths(folder_path, name);
        self.insert_node(ContentNode::new(&handle_path, NodeKind::DocumentHandle));
        self.insert_node(
            ContentNode::new(join_paths(&handle_path, name), NodeKind::DocumentVariant)
                .with_locale(locale)
                .with_translation_id(translation_id),
        );
        handle_path
    }

    /// Number of nodes in the store
    pub fn len(&self) -> usize {
        self.locked().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locked().nodes.is_empty()
    }

    /// Creation stamp of the node at `path`, if it exists
    pub fn node_created_at(&self, path: &str) -> Option<DateTime<Utc>> {
        self.locked().nodes.get(path).map(|r| r.created_at)
    }

    /// Insertion sequence number of the node at `path`, if it exists
    ///
    /// Exposes the store's stable order for assertions on creation order.
    pub fn node_seq(&self, path: &str) -> Option<u64> {
        self.locked().nodes.get(path).map(|r| r.seq)
    }
}

fn is_under(root_path: &str, path: &str) -> bool {
    let root = canonical_path(root_path);
    if root == "/" {
        return true;
    }
    path == root || path.starts_with(&format!("{}/", root))
}

impl ContentStore for MemoryStore {
    fn node_exists(&self, path: &str) -> Result<bool> {
        Ok(self.locked().nodes.contains_key(path))
    }

    fn get_node(&self, path: &str) -> Result<Option<ContentNode>> {
        Ok(self.locked().nodes.get(path).map(|r| r.node.clone()))
    }

    fn find_by_translation_id(
        &self,
        root_path: &str,
        translation_id: &str,
        kind: NodeKind,
    ) -> Result<Vec<ContentNode>> {
        if translation_id.trim().is_empty() {
            return Err(MirrorError::Store {
                message: "translation-id query with a blank filter value".to_string(),
            });
        }

        let inner = self.locked();
        let mut matches: Vec<&NodeRecord> = inner
            .nodes
            .values()
            .filter(|record| {
                record.node.kind == kind
                    && record.node.translation_id.as_deref() == Some(translation_id)
                    && is_under(root_path, &record.node.path)
            })
            .collect();
        matches.sort_by_key(|record| record.seq);

        Ok(matches.into_iter().map(|record| record.node.clone()).collect())
    }
}
