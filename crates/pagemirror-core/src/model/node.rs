use serde::{Deserialize, Serialize};

/// Node-type tag carried by every node in a content tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A folder that can hold documents and other folders
    Folder,
    /// The stable addressable entry point of a logical document
    DocumentHandle,
    /// A locale/state variant below a document handle
    DocumentVariant,
    /// Anything else (configuration nodes, system nodes, ...)
    Other,
}

/// A node in a hierarchical content tree
///
/// Paths are absolute, `/`-separated and unique within one tree snapshot.
/// The translation identifier, if present, is an opaque stable string shared
/// by all locale variants of the same logical folder or document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Absolute path of this node
    pub path: String,

    /// Node-type tag
    pub kind: NodeKind,

    /// Translation identifier linking this node to its locale counterparts
    pub translation_id: Option<String>,

    /// Locale tag of this node, if it carries one
    pub locale: Option<String>,
}

impl ContentNode {
    /// Create a new node with the given path and kind, without translation linkage
    pub fn new(path: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            path: path.into(),
            kind,
            translation_id: None,
            locale: None,
        }
    }

    /// Set the translation identifier
    pub fn with_translation_id(mut self, translation_id: impl Into<String>) -> Self {
        self.translation_id = Some(translation_id.into());
        self
    }

    /// Set the locale tag
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Last path segment of this node
    pub fn name(&self) -> &str {
        node_name(&self.path)
    }

    /// Absolute path of this node's parent, or `None` for the tree root
    pub fn parent_path(&self) -> Option<&str> {
        parent_path(&self.path)
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_document_handle(&self) -> bool {
        self.kind == NodeKind::DocumentHandle
    }

    pub fn is_document_variant(&self) -> bool {
        self.kind == NodeKind::DocumentVariant
    }
}

/// Last segment of an absolute `/`-separated path
pub fn node_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Parent of an absolute `/`-separated path, or `None` for the root `/`
pub fn parent_path(path: &str) -> Option<&str> {
    if path == "/" {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some("/"),
        Some(idx) => Some(&path[..idx]),
        None => None,
    }
}

/// Canonical form of a root path: no trailing slash except for `/` itself
pub fn canonical_path(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Join an absolute base path and a relative path
pub fn join_paths(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", canonical_path(base), relative.trim_start_matches('/'))
}

/// Strip a root prefix from an absolute path, yielding the root-relative part
///
/// Returns `None` when `path` does not live under `root`.
pub fn relative_to(root: &str, path: &str) -> Option<String> {
    let root = canonical_path(root);
    if path == root {
        return Some(String::new());
    }
    path.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
        .map(|rest| rest.to_string())
}
