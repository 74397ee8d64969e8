//! Design-document compiler.
//!
//! Compiles a scene-graph document (frames, text, shapes and instances with
//! geometry, paint, effects and typography) into a component markup tree plus
//! an equivalent, deduplicated stylesheet.
//!
//! The stages run in order, each in its own crate:
//! - [`scenec_parser`] parses and validates the raw JSON
//! - [`scenec_layout`] walks the tree, annotating each node with its layout context
//! - [`scenec_resolver`] maps every node to a style record
//! - [`scenec_codegen`] emits markup and stylesheet rules
//!
//! `compile` is pure and deterministic: the same input always yields
//! byte-identical markup and stylesheet. Fetching documents, optimizing and
//! exporting output are left to the collaborators in [`collab`].
//!
//! # Example
//!
//! ```
//! let output = scenec::compile(r#"{
//!     "id": "1:1", "type": "FRAME", "name": "Card",
//!     "absoluteBoundingBox": {"x": 0, "y": 0, "width": 320, "height": 200}
//! }"#).unwrap();
//! assert_eq!(output.markup.to_html(), r#"<div class="card"></div>"#);
//! ```

pub mod collab;
mod error;
mod options;
mod pipeline;
mod url;

pub use collab::{
    CollaboratorError, DocumentRetriever, ExportArtifact, Exporter, Optimizer, Refinement,
};
pub use error::{CompileError, PipelineError, Result};
pub use options::CompileOptions;
pub use pipeline::{Pipeline, PipelineOutput};
pub use url::{extract_file_key, extract_node_id};

pub use scenec_codegen::{Element, Markup, MarkupFlavor, MarkupNode, StyleRule, Stylesheet};
pub use scenec_core::{Diagnostic, Diagnostics, SceneTree, Severity};

use scenec_codegen::{render_component_module, render_html_document, CodeEmitter};
use scenec_layout::{ScenegraphWalker, WalkEntry};
use scenec_resolver::StyleResolver;
use serde::Serialize;

/// Compiler output, owned by the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledOutput {
    pub markup: Markup,
    pub stylesheet: Stylesheet,
    /// Parse, then resolver, then emitter diagnostics
    pub diagnostics: Diagnostics,
    #[serde(skip)]
    flavor: MarkupFlavor,
    #[serde(skip)]
    component_name: String,
}

impl CompiledOutput {
    /// Markup in the configured flavor.
    pub fn render_markup(&self) -> String {
        self.markup.render(self.flavor)
    }

    pub fn to_css(&self) -> String {
        self.stylesheet.to_css()
    }

    pub fn flavor(&self) -> MarkupFlavor {
        self.flavor
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    /// File name of the rendered module (`Card.tsx`, `Card.html`).
    pub fn module_file_name(&self) -> String {
        format!("{}.{}", self.component_name, self.flavor.extension())
    }

    /// File name of the stylesheet (`Card.css`).
    pub fn stylesheet_file_name(&self) -> String {
        format!("{}.css", self.component_name)
    }

    /// A complete module: a React component importing its stylesheet for
    /// JSX, or a standalone document linking it for HTML.
    pub fn render_module(&self) -> Result<String> {
        let stylesheet = self.stylesheet_file_name();
        let module = match self.flavor {
            MarkupFlavor::Jsx => {
                render_component_module(&self.component_name, &self.markup, &stylesheet)?
            }
            MarkupFlavor::Html => {
                render_html_document(&self.component_name, &self.markup, &stylesheet)?
            }
        };
        Ok(module)
    }

    /// Serialize as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Compile a JSON document with default options.
pub fn compile(raw: &str) -> Result<CompiledOutput> {
    compile_with_options(raw, &CompileOptions::default())
}

/// Compile a JSON document.
pub fn compile_with_options(raw: &str, options: &CompileOptions) -> Result<CompiledOutput> {
    let parsed = scenec_parser::parse(raw)?;
    compile_parsed(&parsed.tree, parsed.diagnostics, options)
}

/// Compile an already-decoded JSON document.
pub fn compile_value(value: serde_json::Value, options: &CompileOptions) -> Result<CompiledOutput> {
    let parsed = scenec_parser::parse_value(value)?;
    compile_parsed(&parsed.tree, parsed.diagnostics, options)
}

/// Compile an already-validated scene tree.
pub fn compile_tree(tree: &SceneTree, options: &CompileOptions) -> Result<CompiledOutput> {
    compile_parsed(tree, Diagnostics::new(), options)
}

fn compile_parsed(
    tree: &SceneTree,
    mut diagnostics: Diagnostics,
    options: &CompileOptions,
) -> Result<CompiledOutput> {
    let walker = match &options.root_node {
        Some(id) => {
            let node = tree
                .find(id)
                .ok_or_else(|| CompileError::RootNotFound { id: id.clone() })?;
            ScenegraphWalker::from_node(node)
        }
        None => ScenegraphWalker::new(&tree.roots),
    };
    let entries: Vec<WalkEntry<'_>> = walker.collect();
    tracing::debug!(nodes = entries.len(), "walked scene graph");

    let resolution = StyleResolver::new().resolve(entries.iter().copied());
    diagnostics.extend(resolution.diagnostics);

    let emission = CodeEmitter::new(options.emit_options())?.emit(&entries, &resolution.nodes)?;
    diagnostics.extend(emission.diagnostics);

    tracing::debug!(
        rules = emission.stylesheet.len(),
        diagnostics = diagnostics.len(),
        "compiled document"
    );

    Ok(CompiledOutput {
        markup: emission.markup,
        stylesheet: emission.stylesheet,
        diagnostics,
        flavor: options.flavor,
        component_name: options.component_name.clone(),
    })
}
