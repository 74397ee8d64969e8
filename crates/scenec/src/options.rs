//! Compile options.

use scenec_codegen::{EmitOptions, MarkupFlavor};
use serde::{Deserialize, Serialize};

/// Options for one compile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Prepended to every emitted class name.
    pub class_prefix: Option<String>,
    /// Compile only the subtree rooted at this node id.
    pub root_node: Option<String>,
    /// Emit hidden nodes styled `display: none` instead of omitting them.
    pub include_hidden: bool,
    /// Add `data-node-id` attributes to every element.
    pub emit_node_ids: bool,
    /// Markup dialect used when rendering.
    pub flavor: MarkupFlavor,
    /// Component and file base name.
    pub component_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            class_prefix: None,
            root_node: None,
            include_hidden: true,
            emit_node_ids: false,
            flavor: MarkupFlavor::default(),
            component_name: "Component".to_string(),
        }
    }
}

impl CompileOptions {
    /// Create default compile options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every class name.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Compile only the subtree rooted at `id`.
    pub fn with_root_node(mut self, id: impl Into<String>) -> Self {
        self.root_node = Some(id.into());
        self
    }

    /// Omit hidden nodes from the markup.
    pub fn without_hidden(mut self) -> Self {
        self.include_hidden = false;
        self
    }

    /// Emit `data-node-id` attributes.
    pub fn with_node_ids(mut self) -> Self {
        self.emit_node_ids = true;
        self
    }

    pub fn with_flavor(mut self, flavor: MarkupFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    pub(crate) fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            class_prefix: self.class_prefix.clone().unwrap_or_default(),
            include_hidden: self.include_hidden,
            emit_node_ids: self.emit_node_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompileOptions::default();
        assert!(options.include_hidden);
        assert!(!options.emit_node_ids);
        assert_eq!(options.flavor, MarkupFlavor::Jsx);
        assert_eq!(options.component_name, "Component");
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let options: CompileOptions =
            serde_json::from_str(r#"{"class_prefix": "fc-", "flavor": "html"}"#).unwrap();
        assert_eq!(options.class_prefix.as_deref(), Some("fc-"));
        assert_eq!(options.flavor, MarkupFlavor::Html);
        assert!(options.include_hidden);
        assert_eq!(options.component_name, "Component");
    }

    #[test]
    fn test_builder() {
        let options = CompileOptions::new()
            .with_class_prefix("x-")
            .with_root_node("1:2")
            .without_hidden()
            .with_node_ids();
        let emit = options.emit_options();
        assert_eq!(emit.class_prefix, "x-");
        assert!(!emit.include_hidden);
        assert!(emit.emit_node_ids);
        assert_eq!(options.root_node.as_deref(), Some("1:2"));
    }
}
