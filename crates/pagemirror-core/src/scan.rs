//! Scanner boundary: extraction of document-reference paths from a page
//! configuration
//!
//! The real extraction lives outside the core; the trait pins down the
//! contract the orchestrator relies on, and `ConfigParamsScanner` is a
//! configuration-tree-based implementation for embedders whose page
//! configuration is available as a `ComponentConfig` model.

use crate::filter::SkipSet;
use crate::model::ComponentConfig;

/// Extracts document-reference path strings from a page configuration
///
/// The returned list is ordered and may contain duplicates; the caller
/// deduplicates into an insertion-ordered set. Entries are absolute
/// repository paths (leading `/`) or paths relative to the content root.
pub trait ReferenceScanner: Send + Sync {
    fn scan_document_references(&self, config: &ComponentConfig, skip: &SkipSet) -> Vec<String>;
}

/// Scanner over the materialized configuration model
///
/// Walks the configuration tree depth-first, collecting the values of every
/// declared document parameter, in both plain and variant-prefixed form.
/// Nodes excluded by the skip set are not visited, nor are their children;
/// their content requirements are satisfiable through the target-side
/// indirection the filter found.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigParamsScanner;

impl ConfigParamsScanner {
    pub fn new() -> Self {
        Self
    }

    fn collect(&self, config: &ComponentConfig, skip: &SkipSet, paths: &mut Vec<String>) {
        if skip.is_excluded(config) {
            return;
        }

        for name in &config.document_parameters {
            if let Some(value) = config.parameter(name).filter(|v| !v.is_empty()) {
                paths.push(value.to_string());
            }
            for prefix in &config.parameter_prefixes {
                let prefixed = ComponentConfig::prefixed_parameter_name(prefix, name);
                if let Some(value) = config.parameter(&prefixed).filter(|v| !v.is_empty()) {
                    paths.push(value.to_string());
                }
            }
        }

        for child in &config.children {
            self.collect(child, skip, paths);
        }
    }
}

impl ReferenceScanner for ConfigParamsScanner {
    fn scan_document_references(&self, config: &ComponentConfig, skip: &SkipSet) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect(config, skip, &mut paths);
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::build_skip_set;
    use crate::model::SiteConfiguration;

    #[test]
    fn test_collects_document_parameters_in_order() {
        let page = ComponentConfig::new("p1", "page")
            .with_document_parameter("document", "news/article1")
            .with_child(
                ComponentConfig::new("p2", "main")
                    .with_document_parameter("jcrPath", "events/party")
                    .with_document_parameter("document", "news/article1"),
            );

        let scanner = ConfigParamsScanner::new();
        let paths = scanner.scan_document_references(&page, &SkipSet::default());

        assert_eq!(paths, vec!["news/article1", "events/party", "news/article1"]);
    }

    #[test]
    fn test_collects_variant_prefixed_parameters() {
        let page = ComponentConfig::new("p1", "page")
            .with_document_parameter("document", "news/article1")
            .with_parameter_prefix("mobile")
            .with_parameter(
                ComponentConfig::prefixed_parameter_name("mobile", "document"),
                "news/article1-mobile",
            );

        let scanner = ConfigParamsScanner::new();
        let paths = scanner.scan_document_references(&page, &SkipSet::default());

        assert_eq!(paths, vec!["news/article1", "news/article1-mobile"]);
    }

    #[test]
    fn test_skip_set_prunes_whole_subtrees() {
        let referenced = ComponentConfig::new("ref-1", "banner")
            .with_document_parameter("document", "banners/summer");
        let mut source_site = SiteConfiguration::new();
        source_site.register("common/banner", referenced.clone());
        let mut target_site = SiteConfiguration::new();
        target_site.register("common/banner", ComponentConfig::new("t-ref", "banner"));

        let page = ComponentConfig::new("p1", "page")
            .with_document_parameter("document", "news/article1")
            .with_child(ComponentConfig::new("p2", "main").with_reference("common/banner"));

        let skip = build_skip_set(&page, &source_site, &target_site);
        let scanner = ConfigParamsScanner::new();

        // Scanning the page itself is unaffected (the page nodes are not in
        // the skip set), but the referenced subtree is excluded.
        let from_page = scanner.scan_document_references(&page, &skip);
        assert_eq!(from_page, vec!["news/article1"]);

        let from_referenced = scanner.scan_document_references(&referenced, &skip);
        assert!(from_referenced.is_empty());
    }

    #[test]
    fn test_empty_parameter_values_are_ignored() {
        let page = ComponentConfig::new("p1", "page").with_document_parameter("document", "");

        let scanner = ConfigParamsScanner::new();
        assert!(scanner
            .scan_document_references(&page, &SkipSet::default())
            .is_empty());
    }
}
