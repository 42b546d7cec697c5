mod common;

use std::sync::Arc;
use std::thread;

use common::{copier_over, store_with_roots, EN_ROOT, FR_ROOT};
use pagemirror_core::store::document_exists;
use pagemirror_store::ServiceCall;

// ===== SAME-TARGET-ROOT EXCLUSION =====

#[test]
fn test_concurrent_passes_on_one_target_root_create_exactly_once() {
    let store = store_with_roots();
    store.add_document(EN_ROOT, "doc", "en", "doc-id");
    let (copier, service) = copier_over(store.clone());
    let copier = Arc::new(copier);

    let candidates = vec!["doc".to_string()];
    thread::scope(|scope| {
        for _ in 0..2 {
            let copier = Arc::clone(&copier);
            let candidates = candidates.clone();
            scope.spawn(move || {
                copier
                    .copy_referenced_documents(EN_ROOT, FR_ROOT, &candidates)
                    .unwrap();
            });
        }
    });

    // Both passes finished; only one of them performed the creation.
    let translate_calls: Vec<ServiceCall> = service
        .calls()
        .into_iter()
        .filter(|c| matches!(c, ServiceCall::TranslateDocument { .. }))
        .collect();
    assert_eq!(translate_calls.len(), 1);
    assert!(document_exists(store.as_ref(), "/content/fr/doc").unwrap());
}

#[test]
fn test_repeated_racing_passes_stay_single_writer() {
    // A heavier variant: many passes over the same candidates.
    let store = store_with_roots();
    store.add_folder("/content/en/news", "en", "folder-news");
    store.add_document("/content/en/news", "article1", "en", "doc-1");
    store.add_document("/content/en/news", "article2", "en", "doc-2");
    let (copier, service) = copier_over(store.clone());
    let copier = Arc::new(copier);

    let candidates = vec!["news/article1".to_string(), "news/article2".to_string()];
    thread::scope(|scope| {
        for _ in 0..4 {
            let copier = Arc::clone(&copier);
            let candidates = candidates.clone();
            scope.spawn(move || {
                copier
                    .copy_referenced_documents(EN_ROOT, FR_ROOT, &candidates)
                    .unwrap();
            });
        }
    });

    // One folder and two documents, regardless of how many passes raced.
    assert_eq!(service.mutation_count(), 3);
}

// ===== DISTINCT TARGET ROOTS RUN INDEPENDENTLY =====

#[test]
fn test_distinct_target_roots_both_complete() {
    let store = store_with_roots();
    store.add_root("/content/de", "de", "root-id");
    store.add_document(EN_ROOT, "doc", "en", "doc-id");
    let (copier, _service) = copier_over(store.clone());
    let copier = Arc::new(copier);

    thread::scope(|scope| {
        let fr_copier = Arc::clone(&copier);
        scope.spawn(move || {
            fr_copier
                .copy_referenced_documents(EN_ROOT, FR_ROOT, &["doc".to_string()])
                .unwrap();
        });
        let de_copier = Arc::clone(&copier);
        scope.spawn(move || {
            de_copier
                .copy_referenced_documents(EN_ROOT, "/content/de", &["doc".to_string()])
                .unwrap();
        });
    });

    assert!(document_exists(store.as_ref(), "/content/fr/doc").unwrap());
    assert!(document_exists(store.as_ref(), "/content/de/doc").unwrap());
}
