//! Rewrites document-link parameters on a copied target configuration
//!
//! After a page copy, the target page's configuration still carries the
//! source-side document paths in its parameters. For every parameter value
//! whose document has a translated counterpart under the target root, the
//! value is rewritten to the counterpart's path; values without a
//! counterpart are left as they are, which can leave the configuration
//! pointing across trees until the document gets translated.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::errors::Result;
use crate::model::node::{join_paths, relative_to};
use crate::model::{ComponentConfig, ContentRoot};
use crate::resolve::find_translated_document_handle;
use crate::store::{document_handle, ContentStore};

/// Map one source document path to its target counterpart path
///
/// Absolute values stay absolute; root-relative values stay root-relative.
/// Returns `None` when the value does not address a document with a
/// translated counterpart under the target root.
pub fn target_document_path(
    store: &dyn ContentStore,
    source_root: &ContentRoot,
    target_root: &ContentRoot,
    source_document_path: &str,
) -> Result<Option<String>> {
    let is_absolute = source_document_path.starts_with('/');
    let source_path = if is_absolute {
        source_document_path.to_string()
    } else {
        join_paths(&source_root.path, source_document_path)
    };

    let Some(node) = store.get_node(&source_path)? else {
        warn!(
            component = module_path!(),
            op = "target_document_path",
            path = %source_path,
            "document parameter points at nothing; leaving the value alone"
        );
        return Ok(None);
    };

    let Some(handle) = document_handle(store, &node)? else {
        warn!(
            component = module_path!(),
            op = "target_document_path",
            path = %source_path,
            "document parameter does not address a document; leaving the value alone"
        );
        return Ok(None);
    };

    let Some(counterpart) = find_translated_document_handle(store, target_root, &handle)? else {
        return Ok(None);
    };

    if is_absolute {
        Ok(Some(counterpart.path))
    } else {
        Ok(relative_to(&target_root.path, &counterpart.path))
    }
}

/// Compute the parameter-value change map for one configuration node
///
/// Considers every declared document parameter of `source`, in plain and
/// variant-prefixed form; only values that actually change are mapped.
pub fn target_document_paths(
    store: &dyn ContentStore,
    source_root: &ContentRoot,
    target_root: &ContentRoot,
    source: &ComponentConfig,
) -> Result<HashMap<String, String>> {
    let mut change_map = HashMap::new();

    for name in &source.document_parameters {
        let mut names = vec![name.clone()];
        for prefix in &source.parameter_prefixes {
            names.push(ComponentConfig::prefixed_parameter_name(prefix, name));
        }

        for lookup in names {
            let Some(value) = source.parameter(&lookup).filter(|v| !v.is_empty()) else {
                continue;
            };
            if change_map.contains_key(value) {
                continue;
            }
            if let Some(target_value) = target_document_path(store, source_root, target_root, value)?
            {
                if target_value != value {
                    change_map.insert(value.to_string(), target_value);
                }
            }
        }
    }

    debug!(
        component = module_path!(),
        op = "target_document_paths",
        config_id = %source.id,
        changes = change_map.len(),
    );

    Ok(change_map)
}

/// Replace matching parameter values on one target configuration node
///
/// Matching is by value: every parameter value equal to a change-map key is
/// replaced, whatever the parameter is called. Returns the replacement count.
pub fn replace_target_parameter_values(
    target: &mut ComponentConfig,
    change_map: &HashMap<String, String>,
) -> usize {
    let mut replaced = 0;
    for value in target.parameters.values_mut() {
        if let Some(new_value) = change_map.get(value.as_str()) {
            *value = new_value.clone();
            replaced += 1;
        }
    }
    replaced
}

/// Rewrite document-link parameters across a copied configuration tree
///
/// Walks the source and target trees in parallel, pairing children by
/// target child name: the source side can carry extra (inherited) children
/// the copy did not take, and a target child without a source counterpart
/// is warned about and left untouched. Returns the total replacement count.
pub fn update_target_document_paths(
    store: &dyn ContentStore,
    source_root: &ContentRoot,
    target_root: &ContentRoot,
    source: &ComponentConfig,
    target: &mut ComponentConfig,
) -> Result<usize> {
    let change_map = target_document_paths(store, source_root, target_root, source)?;
    let mut replaced = replace_target_parameter_values(target, &change_map);

    for target_child in &mut target.children {
        match source.child_by_name(&target_child.name) {
            Some(source_child) => {
                replaced += update_target_document_paths(
                    store,
                    source_root,
                    target_root,
                    source_child,
                    target_child,
                )?;
            }
            None => warn!(
                component = module_path!(),
                op = "update_target_document_paths",
                child = %target_child.name,
                "no source child with this name; skipping it and everything below"
            ),
        }
    }

    Ok(replaced)
}
