//! Turns walk order and resolved styles into markup and a stylesheet.

use crate::error::{CodegenError, Result};
use crate::markup::{Element, Markup, MarkupNode};
use crate::naming::ClassNamer;
use crate::stylesheet::{StyleRule, Stylesheet};
use scenec_core::{Diagnostic, Diagnostics, NodeKind, SceneNode};
use scenec_layout::WalkEntry;
use scenec_resolver::{ResolvedNode, ResolvedRun, StyleRecord};
use std::collections::HashMap;

/// Options for code emission.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Prepended to every class name
    pub class_prefix: String,
    /// Emit hidden nodes (styled `display: none`) instead of omitting them
    pub include_hidden: bool,
    /// Add a `data-node-id` attribute to every element
    pub emit_node_ids: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            class_prefix: String::new(),
            include_hidden: true,
            emit_node_ids: false,
        }
    }
}

/// Emitter output.
#[derive(Debug, Clone, Default)]
pub struct Emission {
    pub markup: Markup,
    pub stylesheet: Stylesheet,
    pub diagnostics: Diagnostics,
}

/// Assigns classes and builds the markup tree for one compile.
#[derive(Debug)]
pub struct CodeEmitter {
    options: EmitOptions,
    namer: ClassNamer,
    /// Canonical record key → class name
    classes: HashMap<String, String>,
    stylesheet: Stylesheet,
}

impl CodeEmitter {
    pub fn new(options: EmitOptions) -> Result<Self> {
        let namer = ClassNamer::new(options.class_prefix.clone())?;
        Ok(Self {
            options,
            namer,
            classes: HashMap::new(),
            stylesheet: Stylesheet::new(),
        })
    }

    /// Emit markup for a walk. `resolved` must hold one entry per walk entry,
    /// in the same order.
    pub fn emit(mut self, entries: &[WalkEntry<'_>], resolved: &[ResolvedNode]) -> Result<Emission> {
        if entries.len() != resolved.len() {
            return Err(CodegenError::ResolutionMismatch(format!(
                "{} walk entries but {} resolved nodes",
                entries.len(),
                resolved.len()
            )));
        }

        let mut diagnostics = Diagnostics::new();
        let mut roots = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut skip_below: Option<usize> = None;

        for (entry, style) in entries.iter().zip(resolved) {
            if entry.node.id != style.node_id {
                return Err(CodegenError::ResolutionMismatch(format!(
                    "walk entry `{}` resolved as `{}`",
                    entry.node.id, style.node_id
                )));
            }
            match skip_below {
                Some(depth) if entry.depth > depth => continue,
                _ => skip_below = None,
            }
            if !entry.node.visible && !self.options.include_hidden {
                diagnostics.push(Diagnostic::info(
                    Some(entry.node.id.clone()),
                    "hidden node omitted from markup",
                ));
                skip_below = Some(entry.depth);
                continue;
            }

            while stack.len() > entry.depth {
                close(&mut stack, &mut roots);
            }
            let element = self.element(entry.node, style);
            stack.push(element);
        }
        while !stack.is_empty() {
            close(&mut stack, &mut roots);
        }

        tracing::debug!(
            roots = roots.len(),
            rules = self.stylesheet.len(),
            "emitted markup"
        );

        Ok(Emission {
            markup: Markup::new(roots),
            stylesheet: self.stylesheet,
            diagnostics,
        })
    }

    /// Class for a record, minting one the first time a record is seen.
    fn class_for(&mut self, record: &StyleRecord, name: &str, fallback: &str) -> Option<String> {
        if record.is_empty() {
            return None;
        }
        let key = record.canonical_key();
        if let Some(existing) = self.classes.get(&key) {
            return Some(existing.clone());
        }
        let class_name = self.namer.mint(name, fallback);
        self.stylesheet.push(StyleRule::new(class_name.clone(), record));
        self.classes.insert(key, class_name.clone());
        Some(class_name)
    }

    fn element(&mut self, node: &SceneNode, style: &ResolvedNode) -> Element {
        let label = node.kind.label();
        let class_name = self.class_for(&style.record, &node.name, label);

        let mut element = match &node.kind {
            NodeKind::Frame(_) | NodeKind::Instance(_) => Element::new("div"),
            NodeKind::Text(_) => Element::new("p"),
            NodeKind::Shape(shape) => {
                Element::new("div").with_attribute("data-shape", shape.shape.as_str())
            }
            NodeKind::Placeholder { type_tag } => {
                Element::new("div").with_attribute("data-placeholder", type_tag.as_str())
            }
        }
        .with_class(class_name);

        if self.options.emit_node_ids {
            element = element.with_attribute("data-node-id", node.id.as_str());
        }

        if let NodeKind::Text(text) = &node.kind {
            element.children = self.text_children(node, &text.characters, &style.runs);
        }
        element
    }

    fn text_children(
        &mut self,
        node: &SceneNode,
        characters: &str,
        runs: &[ResolvedRun],
    ) -> Vec<MarkupNode> {
        if runs.iter().all(|run| run.record.is_empty()) {
            if characters.is_empty() {
                return Vec::new();
            }
            return vec![MarkupNode::text(characters)];
        }

        let run_name = format!("{} run", node.name);
        let run_fallback = format!("{} run", node.kind.label());
        runs.iter()
            .map(|run| match self.class_for(&run.record, &run_name, &run_fallback) {
                None => MarkupNode::text(run.run.text.clone()),
                Some(class_name) => {
                    let mut span = Element::new("span").with_class(Some(class_name));
                    span.children.push(MarkupNode::text(run.run.text.clone()));
                    MarkupNode::Element(span)
                }
            })
            .collect()
    }
}

fn close(stack: &mut Vec<Element>, roots: &mut Vec<MarkupNode>) {
    if let Some(element) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(MarkupNode::Element(element)),
            None => roots.push(MarkupNode::Element(element)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenec_core::{
        Color, FrameProps, LayoutMode, OverrideTable, Paint, Rect, ShapeKind, ShapeProps,
        TextProps, TextStyle, TextStyleOverride,
    };
    use scenec_layout::ScenegraphWalker;
    use scenec_resolver::StyleResolver;

    fn emit_with(roots: &[SceneNode], options: EmitOptions) -> Emission {
        let entries: Vec<_> = ScenegraphWalker::new(roots).collect();
        let resolution = StyleResolver::new().resolve(entries.iter().copied());
        CodeEmitter::new(options)
            .unwrap()
            .emit(&entries, &resolution.nodes)
            .unwrap()
    }

    fn emit(roots: &[SceneNode]) -> Emission {
        emit_with(roots, EmitOptions::default())
    }

    fn text(id: &str, name: &str, characters: &str) -> SceneNode {
        SceneNode::new(
            id,
            NodeKind::Text(TextProps::new(characters, TextStyle::new("Inter", 400.0, 16.0))),
        )
        .with_name(name)
        .with_fills(vec![Paint::solid(Color::BLACK)])
    }

    fn row(id: &str, name: &str) -> SceneNode {
        SceneNode::new(
            id,
            NodeKind::Frame(FrameProps {
                layout_mode: LayoutMode::Horizontal,
                ..Default::default()
            }),
        )
        .with_name(name)
        .with_bounds(Rect::new(0.0, 0.0, 100.0, 40.0))
    }

    #[test]
    fn test_tree_mirrors_hierarchy() {
        let roots = vec![row("1:1", "Card")
            .with_child(text("1:2", "Title", "Hi"))
            .with_child(row("1:3", "Row").with_child(text("1:4", "Label", "x")))
            .with_child(text("1:5", "Footer", "Bye"))];
        let emission = emit(&roots);

        let card = emission.markup.roots[0].as_element().unwrap();
        let children: Vec<_> = card.children.iter().map(MarkupNode::text_content).collect();
        assert_eq!(children, vec!["Hi", "x", "Bye"]);
        assert_eq!(card.child_elements().nth(1).unwrap().children.len(), 1);
    }

    #[test]
    fn test_identical_records_share_one_class() {
        let roots = vec![row("1:1", "List")
            .with_child(text("1:2", "Item", "a"))
            .with_child(text("1:3", "Item", "b"))];
        let emission = emit(&roots);

        let list = emission.markup.roots[0].as_element().unwrap();
        let classes: Vec<_> = list
            .child_elements()
            .map(|e| e.class_name.clone().unwrap())
            .collect();
        assert_eq!(classes, vec!["item", "item"]);
        assert_eq!(emission.stylesheet.len(), 2);
    }

    #[test]
    fn test_one_differing_declaration_splits_classes() {
        let mut bold = text("1:3", "Item", "b");
        if let NodeKind::Text(props) = &mut bold.kind {
            props.style.font_weight = 700.0;
        }
        let roots = vec![row("1:1", "List")
            .with_child(text("1:2", "Item", "a"))
            .with_child(bold)];
        let emission = emit(&roots);

        let list = emission.markup.roots[0].as_element().unwrap();
        let classes: Vec<_> = list
            .child_elements()
            .map(|e| e.class_name.clone().unwrap())
            .collect();
        assert_eq!(classes, vec!["item", "item-2"]);
    }

    #[test]
    fn test_shapes_and_placeholders() {
        let ellipse = SceneNode::new(
            "1:2",
            NodeKind::Shape(ShapeProps {
                shape: ShapeKind::Ellipse,
                corner_radius: Default::default(),
            }),
        );
        let widget = SceneNode::new(
            "1:3",
            NodeKind::Placeholder {
                type_tag: "WIDGET".into(),
            },
        );
        let roots = vec![row("1:1", "Box").with_child(ellipse).with_child(widget)];
        let html = emit(&roots).markup.to_html();

        assert!(html.contains("<div class=\"shape\" data-shape=\"ellipse\"></div>"));
        assert!(html.contains("data-placeholder=\"WIDGET\""));
    }

    #[test]
    fn test_text_runs_become_spans() {
        let mut node = text("1:1", "Greeting", "Hello world");
        if let NodeKind::Text(props) = &mut node.kind {
            let mut table = OverrideTable::new();
            table.insert(
                1,
                TextStyleOverride {
                    italic: Some(true),
                    ..Default::default()
                },
            );
            props.override_table = table;
            props.character_overrides = vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
        }
        let emission = emit(&[node]);

        assert_eq!(
            emission.markup.to_html(),
            "<p class=\"greeting\">Hello <span class=\"greeting-run\">world</span></p>"
        );
        let run_rule = emission.stylesheet.rule("greeting-run").unwrap();
        assert_eq!(run_rule.declarations, vec![("font-style".to_string(), "italic".to_string())]);
    }

    #[test]
    fn test_hidden_nodes_omitted_when_requested() {
        let mut hidden = row("1:2", "Hidden").with_child(text("1:3", "Inner", "x"));
        hidden.visible = false;
        let roots = vec![row("1:1", "Card")
            .with_child(hidden)
            .with_child(text("1:4", "After", "y"))];

        let kept = emit(&roots);
        assert!(kept.markup.to_html().contains("class=\"hidden\""));
        assert_eq!(kept.stylesheet.rule("hidden").and_then(|r| r.get("display")), Some("none"));

        let options = EmitOptions {
            include_hidden: false,
            ..Default::default()
        };
        let omitted = emit_with(&roots, options);
        let card = omitted.markup.roots[0].as_element().unwrap();
        assert_eq!(card.children.len(), 1);
        assert_eq!(card.children[0].text_content(), "y");
        assert_eq!(omitted.diagnostics.len(), 1);
    }

    #[test]
    fn test_node_ids_and_prefix() {
        let options = EmitOptions {
            class_prefix: "fc-".into(),
            emit_node_ids: true,
            ..Default::default()
        };
        let html = emit_with(&[row("1:1", "Card")], options).markup.to_html();
        assert_eq!(html, "<div class=\"fc-card\" data-node-id=\"1:1\"></div>");
    }

    #[test]
    fn test_mismatched_resolution_rejected() {
        let roots = vec![row("1:1", "Card")];
        let entries: Vec<_> = ScenegraphWalker::new(&roots).collect();
        let err = CodeEmitter::new(EmitOptions::default())
            .unwrap()
            .emit(&entries, &[])
            .unwrap_err();
        assert!(matches!(err, CodegenError::ResolutionMismatch(_)));
    }
}
