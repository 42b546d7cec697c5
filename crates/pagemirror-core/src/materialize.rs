//! Folder materializer: top-down creation of missing target folder chains

use tracing::info;

use crate::errors::{MirrorError, Result};
use crate::model::node::join_paths;
use crate::model::ContentRoot;
use crate::service::DocumentManagementService;
use crate::store::ContentStore;

/// Create the missing folder chain for a resolved target path
///
/// `source_folder_rel_path` addresses the source document's folder relative
/// to the source root; `target_folder_rel_path`, when given, is the resolved
/// target-side relative path, which can use translated names for the levels
/// where translation resolution succeeded. The effective target name at each
/// position is the target-side name when present at that index, else the
/// source-side name mirrored through.
///
/// Creation happens one level at a time, top-down; a level is never created
/// before its parent exists. Existing target folders along the chain are
/// verified against the source chain: a non-folder node or a folder with a
/// different translation identifier is a structural conflict.
///
/// # Errors
///
/// * `SourceFolderMissing` - the source chain is broken (bad reference from the caller)
/// * `NotAFolder` - an existing target node along the chain is not a folder
/// * `TranslationIdMismatch` - an existing target folder links to a different logical folder
/// * `Service` - a folder creation call failed
pub fn ensure_folder_chain(
    store: &dyn ContentStore,
    service: &dyn DocumentManagementService,
    source_root: &ContentRoot,
    source_folder_rel_path: &str,
    target_root: &ContentRoot,
    target_folder_rel_path: Option<&str>,
    locale: &str,
) -> Result<()> {
    let source_segments: Vec<&str> = source_folder_rel_path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let target_segments: Vec<&str> = target_folder_rel_path
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    let mut source_location = source_root.path.clone();
    let mut target_location = target_root.path.clone();

    for (index, source_name) in source_segments.iter().enumerate() {
        source_location = join_paths(&source_location, source_name);

        let source_folder = store
            .get_node(&source_location)?
            .filter(|node| node.is_folder())
            .ok_or_else(|| MirrorError::SourceFolderMissing {
                path: source_location.clone(),
            })?;

        let target_name = target_segments.get(index).copied().unwrap_or(source_name);
        target_location = join_paths(&target_location, target_name);

        match store.get_node(&target_location)? {
            Some(existing) => {
                if !existing.is_folder() {
                    return Err(MirrorError::NotAFolder {
                        path: target_location,
                        kind: existing.kind,
                    });
                }
                if existing.translation_id != source_folder.translation_id {
                    return Err(MirrorError::TranslationIdMismatch {
                        source_path: source_location,
                        target_path: target_location,
                        source_id: source_folder.translation_id,
                        target_id: existing.translation_id,
                    });
                }
            }
            None => {
                let created =
                    service.translate_folder(&source_location, locale, target_name)?;
                info!(
                    component = module_path!(),
                    op = "ensure_folder_chain",
                    source_path = %source_location,
                    path = %created,
                    locale = %locale,
                    "created translated folder"
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentNode, NodeKind};
    use crate::store::tests::FixedStore;

    /// Service double that records translate calls without touching a store
    struct RecordingService {
        calls: std::sync::Mutex<Vec<(String, String, String)>>,
    }

    impl RecordingService {
        fn new() -> Self {
            Self {
                calls: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl DocumentManagementService for RecordingService {
        fn obtain_editable_document(&self, _: &str) -> Result<bool> {
            Ok(true)
        }
        fn dispose_editable_document(&self, _: &str) -> Result<bool> {
            Ok(true)
        }
        fn commit_editable_document(&self, _: &str) -> Result<bool> {
            Ok(true)
        }
        fn copy_document(&self, _: &str, _: &str, name: &str) -> Result<String> {
            Ok(name.to_string())
        }
        fn publish_document(&self, _: &str) -> Result<bool> {
            Ok(true)
        }
        fn depublish_document(&self, _: &str) -> Result<bool> {
            Ok(true)
        }
        fn translate_folder(&self, source: &str, locale: &str, name: &str) -> Result<String> {
            self.calls.lock().unwrap().push((
                source.to_string(),
                locale.to_string(),
                name.to_string(),
            ));
            Ok(format!("created:{}", name))
        }
        fn translate_document(&self, _: &str, _: &str, name: &str) -> Result<String> {
            Ok(name.to_string())
        }
    }

    fn roots() -> (ContentRoot, ContentRoot) {
        (
            ContentRoot {
                path: "/content/en".to_string(),
                locale: "en".to_string(),
            },
            ContentRoot {
                path: "/content/fr".to_string(),
                locale: "fr".to_string(),
            },
        )
    }

    #[test]
    fn test_creates_missing_levels_top_down() {
        let (source_root, target_root) = roots();
        let store = FixedStore::with_nodes(vec![
            ContentNode::new("/content/en/a", NodeKind::Folder).with_translation_id("ta"),
            ContentNode::new("/content/en/a/b", NodeKind::Folder).with_translation_id("tb"),
        ]);
        let service = RecordingService::new();

        ensure_folder_chain(&store, &service, &source_root, "a/b", &target_root, None, "fr")
            .unwrap();

        assert_eq!(
            service.calls(),
            vec![
                ("/content/en/a".to_string(), "fr".to_string(), "a".to_string()),
                ("/content/en/a/b".to_string(), "fr".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_existing_matching_levels_are_left_alone() {
        let (source_root, target_root) = roots();
        let store = FixedStore::with_nodes(vec![
            ContentNode::new("/content/en/a", NodeKind::Folder).with_translation_id("ta"),
            ContentNode::new("/content/en/a/b", NodeKind::Folder).with_translation_id("tb"),
            ContentNode::new("/content/fr/alpha", NodeKind::Folder).with_translation_id("ta"),
        ]);
        let service = RecordingService::new();

        ensure_folder_chain(
            &store,
            &service,
            &source_root,
            "a/b",
            &target_root,
            Some("alpha/b"),
            "fr",
        )
        .unwrap();

        // Only the missing level is created, under its mirrored name.
        assert_eq!(
            service.calls(),
            vec![("/content/en/a/b".to_string(), "fr".to_string(), "b".to_string())]
        );
    }

    #[test]
    fn test_missing_source_folder_is_fatal() {
        let (source_root, target_root) = roots();
        let store = FixedStore::with_nodes(vec![]);
        let service = RecordingService::new();

        let result =
            ensure_folder_chain(&store, &service, &source_root, "a/b", &target_root, None, "fr");
        assert!(matches!(result, Err(MirrorError::SourceFolderMissing { .. })));
        assert!(service.calls().is_empty());
    }

    #[test]
    fn test_non_folder_target_is_a_structural_conflict() {
        let (source_root, target_root) = roots();
        let store = FixedStore::with_nodes(vec![
            ContentNode::new("/content/en/a", NodeKind::Folder).with_translation_id("ta"),
            ContentNode::new("/content/fr/a", NodeKind::DocumentHandle),
        ]);
        let service = RecordingService::new();

        let result =
            ensure_folder_chain(&store, &service, &source_root, "a", &target_root, None, "fr");
        assert!(matches!(result, Err(MirrorError::NotAFolder { .. })));
    }

    #[test]
    fn test_translation_id_mismatch_is_a_structural_conflict() {
        let (source_root, target_root) = roots();
        let store = FixedStore::with_nodes(vec![
            ContentNode::new("/content/en/a", NodeKind::Folder).with_translation_id("ta"),
            ContentNode::new("/content/fr/a", NodeKind::Folder).with_translation_id("other"),
        ]);
        let service = RecordingService::new();

        let result =
            ensure_folder_chain(&store, &service, &source_root, "a", &target_root, None, "fr");
        assert!(matches!(
            result,
            Err(MirrorError::TranslationIdMismatch { .. })
        ));
    }

    #[test]
    fn test_unlinked_existing_folders_on_both_sides_match() {
        // Folders without translation ids compare equal (None == None); the
        // chain is accepted without creation calls.
        let (source_root, target_root) = roots();
        let store = FixedStore::with_nodes(vec![
            ContentNode::new("/content/en/a", NodeKind::Folder),
            ContentNode::new("/content/fr/a", NodeKind::Folder),
        ]);
        let service = RecordingService::new();

        ensure_folder_chain(&store, &service, &source_root, "a", &target_root, None, "fr")
            .unwrap();
        assert!(service.calls().is_empty());
    }
}
