use std::sync::Arc;

use pagemirror_core::orchestrate::DocumentCopier;
use pagemirror_store::{MemoryDocumentService, MemoryStore};

pub const EN_ROOT: &str = "/content/en";
pub const FR_ROOT: &str = "/content/fr";

/// Store with translated en/fr content roots
#[allow(dead_code)]
pub fn store_with_roots() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.add_root(EN_ROOT, "en", "root-id");
    store.add_root(FR_ROOT, "fr", "root-id");
    store
}

/// The standard fixture: `news/article1` under the source root, with the
/// `news` folder and the document both untranslated on the target side
#[allow(dead_code)]
pub fn store_with_untranslated_article() -> Arc<MemoryStore> {
    let store = store_with_roots();
    store.add_folder("/content/en/news", "en", "folder-news");
    store.add_document("/content/en/news", "article1", "en", "doc-article1");
    store
}

/// Wire a copier and keep handles on the store and the recording service
#[allow(dead_code)]
pub fn copier_over(store: Arc<MemoryStore>) -> (DocumentCopier, Arc<MemoryDocumentService>) {
    let service = Arc::new(MemoryDocumentService::new(store.clone()));
    let copier = DocumentCopier::new(store, service.clone());
    (copier, service)
}
