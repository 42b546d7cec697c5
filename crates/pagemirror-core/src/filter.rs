//! Reference filter: prunes configuration indirections that already resolve
//! on the target side
//!
//! A configuration node that points at another configuration element by name
//! does not need its referenced content copied when the target site already
//! resolves the same name: whatever that indirection needs is presumed
//! satisfiable through the existing target-side element. The filter walks
//! the source configuration once per pass and collects the identifiers of
//! every such redundant subtree.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::model::{ComponentConfig, SiteConfiguration};

/// Identifiers of configuration nodes excluded from reference scanning
///
/// Built once per pass from the page configuration downward; read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct SkipSet {
    ids: HashSet<String>,
}

impl SkipSet {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Exclusion predicate over configuration nodes, as consumed by scanners
    pub fn is_excluded(&self, config: &ComponentConfig) -> bool {
        self.ids.contains(&config.id)
    }
}

/// Build the skip set for one copy pass
///
/// Depth-first walk of the source page configuration. A node declaring a
/// reference that the target site resolves contributes the source-side
/// resolved element and all of its descendants to the skip set, and the
/// walk does not descend further below that node. A reference the target
/// site cannot resolve keeps the walk going. A reference the *source* site
/// cannot resolve is never treated as "needs copying": the walk still stops
/// below the node, with a warning, because such a configuration cannot
/// contribute usable references either way. Identifier resolution itself
/// cannot fail here: the configuration model is fully materialized before
/// the filter runs.
pub fn build_skip_set(
    source_config: &ComponentConfig,
    source_site: &SiteConfiguration,
    target_site: &SiteConfiguration,
) -> SkipSet {
    let mut ids = HashSet::new();
    populate_skip_set(source_config, source_site, target_site, &mut ids);
    SkipSet { ids }
}

fn populate_skip_set(
    config: &ComponentConfig,
    source_site: &SiteConfiguration,
    target_site: &SiteConfiguration,
    ids: &mut HashSet<String>,
) {
    if let Some(reference) = config
        .reference_component
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
    {
        if target_site.resolve(reference).is_some() {
            debug!(
                component = module_path!(),
                op = "build_skip_set",
                config_id = %config.id,
                reference = %reference,
                "skipping node and descendants: target site already resolves the reference"
            );
            match source_site.resolve(reference) {
                Some(source_reference) => populate_self_and_descending(source_reference, ids),
                // Not expected to happen: the source page is built against
                // the source site, so its references should resolve there.
                None => warn!(
                    component = module_path!(),
                    op = "build_skip_set",
                    config_id = %config.id,
                    reference = %reference,
                    "reference resolves in the target site but not in the source site"
                ),
            }
            // No need to check descendant configs.
            return;
        }
    }

    for child in &config.children {
        populate_skip_set(child, source_site, target_site, ids);
    }
}

fn populate_self_and_descending(current: &ComponentConfig, ids: &mut HashSet<String>) {
    ids.insert(current.id.clone());
    for child in &current.children {
        populate_self_and_descending(child, ids);
    }
}
