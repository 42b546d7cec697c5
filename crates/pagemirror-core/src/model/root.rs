use serde::{Deserialize, Serialize};

use crate::errors::{MirrorError, Result};
use crate::model::node::canonical_path;
use crate::store::ContentStore;

/// A designated base path of one site's content tree, with its locale
///
/// Both the source and the target of a copy pass are content roots. The
/// locale is read from the root node itself; a root without a usable locale
/// cannot take part in translation-aware copying, so resolution fails
/// instead of producing a half-usable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRoot {
    /// Canonical absolute path of the content base
    pub path: String,

    /// Translation locale of the content base (never blank)
    pub locale: String,
}

impl ContentRoot {
    /// Resolve a content root from the store
    ///
    /// # Errors
    ///
    /// * `RootNotFound` - no node exists at `path`
    /// * `BlankLocale` - the node carries no locale, or a blank one
    pub fn resolve(store: &dyn ContentStore, path: &str) -> Result<Self> {
        let canonical = canonical_path(path);
        let node = store
            .get_node(canonical)?
            .ok_or_else(|| MirrorError::RootNotFound {
                path: canonical.to_string(),
            })?;

        let locale = node
            .locale
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| MirrorError::BlankLocale {
                path: canonical.to_string(),
            })?;

        Ok(Self {
            path: canonical.to_string(),
            locale: locale.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{ContentNode, NodeKind};
    use crate::store::tests::FixedStore;

    #[test]
    fn test_resolve_reads_locale() {
        let store = FixedStore::with_nodes(vec![ContentNode::new("/content/en", NodeKind::Folder)
            .with_locale("en")
            .with_translation_id("root-id")]);

        let root = ContentRoot::resolve(&store, "/content/en/").unwrap();
        assert_eq!(root.path, "/content/en");
        assert_eq!(root.locale, "en");
    }

    #[test]
    fn test_resolve_missing_root() {
        let store = FixedStore::with_nodes(vec![]);
        let result = ContentRoot::resolve(&store, "/content/en");
        assert!(matches!(result, Err(MirrorError::RootNotFound { .. })));
    }

    #[test]
    fn test_resolve_blank_locale() {
        let store = FixedStore::with_nodes(vec![
            ContentNode::new("/content/en", NodeKind::Folder).with_locale("  ")
        ]);
        let result = ContentRoot::resolve(&store, "/content/en");
        assert!(matches!(result, Err(MirrorError::BlankLocale { .. })));
    }

    #[test]
    fn test_resolve_absent_locale() {
        let store =
            FixedStore::with_nodes(vec![ContentNode::new("/content/en", NodeKind::Folder)]);
        let result = ContentRoot::resolve(&store, "/content/en");
        assert!(matches!(result, Err(MirrorError::BlankLocale { .. })));
    }
}
