use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// One node of a page/component configuration tree
///
/// A configuration node can point at another named configuration element
/// through `reference_component` (an indirection by name, not by path), and
/// carries string parameters. Parameters listed in `document_parameters`
/// hold document paths, either absolute or relative to the site's content
/// root; the same parameter can additionally exist in variant-prefixed form
/// for targeted configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Stable identifier of this configuration node
    pub id: String,

    /// Node name, unique among its siblings
    pub name: String,

    /// Name of a referenced configuration element, if this node is an indirection
    pub reference_component: Option<String>,

    /// String parameters of this component
    pub parameters: BTreeMap<String, String>,

    /// Variant prefixes for targeted parameter values
    pub parameter_prefixes: Vec<String>,

    /// Names of parameters whose values are document paths
    pub document_parameters: BTreeSet<String>,

    /// Child configuration nodes, in insertion order
    pub children: Vec<ComponentConfig>,
}

impl ComponentConfig {
    /// Create a new configuration node
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reference_component: None,
            parameters: BTreeMap::new(),
            parameter_prefixes: Vec::new(),
            document_parameters: BTreeSet::new(),
            children: Vec::new(),
        }
    }

    /// Declare this node as a reference to another configuration element
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference_component = Some(reference.into());
        self
    }

    /// Set a plain parameter value
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Set a parameter value and mark the parameter as holding a document path
    pub fn with_document_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.document_parameters.insert(name.clone());
        self.parameters.insert(name, value.into());
        self
    }

    /// Register a variant prefix
    pub fn with_parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.parameter_prefixes.push(prefix.into());
        self
    }

    /// Append a child configuration node
    pub fn with_child(mut self, child: ComponentConfig) -> Self {
        self.children.push(child);
        self
    }

    /// Look up a parameter value by name
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Mutable child lookup by name
    pub fn child_by_name_mut(&mut self, name: &str) -> Option<&mut ComponentConfig> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Child lookup by name
    pub fn child_by_name(&self, name: &str) -> Option<&ComponentConfig> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Canonical name of a variant-prefixed parameter
    pub fn prefixed_parameter_name(prefix: &str, name: &str) -> String {
        format!("{}:{}", prefix, name)
    }
}

/// Name index over one site's configuration elements
///
/// Resolves reference-component names to configuration subtrees. The source
/// and the target site each carry one; the reference filter compares the two
/// to find indirections that are already satisfiable on the target side.
#[derive(Debug, Clone, Default)]
pub struct SiteConfiguration {
    components: HashMap<String, ComponentConfig>,
}

impl SiteConfiguration {
    /// Create an empty site configuration
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Register a configuration element under a reference name
    pub fn register(&mut self, reference: impl Into<String>, config: ComponentConfig) {
        self.components.insert(reference.into(), config);
    }

    /// Resolve a reference name to its configuration element
    pub fn resolve(&self, reference: &str) -> Option<&ComponentConfig> {
        self.components.get(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_lookup() {
        let config = ComponentConfig::new("c1", "page")
            .with_child(ComponentConfig::new("c2", "header"))
            .with_child(ComponentConfig::new("c3", "body"));

        assert_eq!(config.child_by_name("body").map(|c| c.id.as_str()), Some("c3"));
        assert!(config.child_by_name("footer").is_none());
    }

    #[test]
    fn test_document_parameter_marks_name() {
        let config = ComponentConfig::new("c1", "banner")
            .with_document_parameter("document", "news/article1");

        assert!(config.document_parameters.contains("document"));
        assert_eq!(config.parameter("document"), Some("news/article1"));
    }

    #[test]
    fn test_prefixed_parameter_name() {
        assert_eq!(
            ComponentConfig::prefixed_parameter_name("mobile", "document"),
            "mobile:document"
        );
    }

    #[test]
    fn test_site_configuration_resolution() {
        let mut site = SiteConfiguration::new();
        site.register("common/banner", ComponentConfig::new("c9", "banner"));

        assert!(site.resolve("common/banner").is_some());
        assert!(site.resolve("common/footer").is_none());
    }
}
