//! Design-document parsing for scenec.
//!
//! Turns raw JSON into a validated [`SceneTree`]:
//! - A file envelope (`{"document": ...}`), `DOCUMENT` and `CANVAS` nodes are
//!   unwrapped; every top-level node of every page becomes a tree root
//! - Missing required fields abort the whole document with a
//!   [`ValidationError`](scenec_core::ValidationError) listing every problem
//! - Unknown node types degrade to placeholder boxes with a warning
//!
//! # Example
//!
//! ```
//! let doc = scenec_parser::parse(r#"{
//!     "id": "1:1", "type": "FRAME", "name": "Card",
//!     "absoluteBoundingBox": {"x": 0, "y": 0, "width": 320, "height": 200}
//! }"#).unwrap();
//! assert_eq!(doc.tree.roots.len(), 1);
//! ```

mod convert;
mod error;
pub mod schema;

pub use error::{ParseError, Result};

use convert::Converter;
use scenec_core::{Diagnostics, SceneNode, SceneTree, ValidationError};
use serde_json::Value;

/// A successfully parsed document plus the non-fatal diagnostics found on the way.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub tree: SceneTree,
    /// Warnings and info, in document order
    pub diagnostics: Diagnostics,
}

/// Parse a JSON string.
pub fn parse(raw: &str) -> Result<ParsedDocument> {
    let value: Value = serde_json::from_str(raw)?;
    parse_value(value)
}

/// Parse an already-decoded JSON value.
pub fn parse_value(value: Value) -> Result<ParsedDocument> {
    let (name, root) = unwrap_envelope(value);
    let mut converter = Converter::new();
    let roots = collect_roots(&mut converter, root)?;

    if !converter.errors.is_empty() {
        tracing::debug!(errors = converter.errors.len(), "document failed validation");
        return Err(ValidationError::from_diagnostics(converter.errors).into());
    }

    let tree = SceneTree { name, roots };
    tracing::debug!(
        roots = tree.roots.len(),
        nodes = tree.node_count(),
        warnings = converter.warnings.len(),
        "parsed scene tree"
    );
    Ok(ParsedDocument {
        tree,
        diagnostics: converter.warnings.into(),
    })
}

/// Strip a file-response envelope, returning the file name when present.
fn unwrap_envelope(value: Value) -> (Option<String>, Value) {
    match value {
        Value::Object(mut map) if !map.contains_key("type") && map.contains_key("document") => {
            let name = map.get("name").and_then(Value::as_str).map(str::to_string);
            let document = map.remove("document").unwrap_or(Value::Null);
            (name, document)
        }
        other => (None, other),
    }
}

fn node_type(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

fn collect_roots(converter: &mut Converter, root: Value) -> Result<Vec<SceneNode>> {
    let mut roots = Vec::new();
    match node_type(&root) {
        Some("DOCUMENT") => {
            for (page_index, page) in take_children(root, "DOCUMENT")?.into_iter().enumerate() {
                if matches!(node_type(&page), Some("CANVAS" | "PAGE")) {
                    let context = format!("page[{}]", page_index);
                    convert_all(converter, take_children(page, &context)?, &context, &mut roots);
                } else {
                    let context = format!("document.children[{}]", page_index);
                    roots.extend(converter.convert_node(page, &context));
                }
            }
        }
        Some("CANVAS" | "PAGE") => {
            convert_all(converter, take_children(root, "page")?, "page", &mut roots);
        }
        Some(_) => roots.extend(converter.convert_node(root, "root")),
        None => match root {
            Value::Array(nodes) => convert_all(converter, nodes, "root", &mut roots),
            Value::Object(_) => roots.extend(converter.convert_node(root, "root")),
            other => {
                return Err(crate::ParseError::InvalidRoot(format!(
                    "expected a node object or array, found {}",
                    json_kind(&other)
                )))
            }
        },
    }
    Ok(roots)
}

fn convert_all(
    converter: &mut Converter,
    nodes: Vec<Value>,
    context: &str,
    roots: &mut Vec<SceneNode>,
) {
    for (index, node) in nodes.into_iter().enumerate() {
        let context = format!("{}.children[{}]", context, index);
        roots.extend(converter.convert_node(node, &context));
    }
}

fn take_children(container: Value, context: &str) -> Result<Vec<Value>> {
    match container {
        Value::Object(mut map) => match map.remove("children") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(children)) => Ok(children),
            Some(other) => Err(crate::ParseError::InvalidRoot(format!(
                "{}: `children` must be an array, found {}",
                context,
                json_kind(&other)
            ))),
        },
        other => Err(crate::ParseError::InvalidRoot(format!(
            "{}: expected an object, found {}",
            context,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenec_core::{
        CornerRadius, EffectKind, LayoutMode, LineHeight, NodeKind, PaintKind, Severity,
        ShapeKind, SizingMode,
    };
    use serde_json::json;

    fn bbox() -> Value {
        json!({"x": 0, "y": 0, "width": 100, "height": 50})
    }

    fn text(id: &str, characters: &str) -> Value {
        json!({
            "id": id, "type": "TEXT", "name": characters,
            "absoluteBoundingBox": bbox(),
            "characters": characters,
            "style": {"fontFamily": "Inter", "fontWeight": 400, "fontSize": 16}
        })
    }

    fn parse_json(value: Value) -> Result<ParsedDocument> {
        parse_value(value)
    }

    #[test]
    fn test_parse_frame_with_defaults() {
        let doc = parse_json(json!({
            "id": "1:1", "type": "FRAME", "name": "Card",
            "absoluteBoundingBox": bbox()
        }))
        .unwrap();

        let node = &doc.tree.roots[0];
        assert_eq!(node.name, "Card");
        assert_eq!(node.opacity, 1.0);
        assert!(node.visible);
        let frame = node.frame().unwrap();
        assert_eq!(frame.layout_mode, LayoutMode::None);
        assert_eq!(frame.primary_sizing, SizingMode::Fixed);
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_unwraps_document_and_pages() {
        let doc = parse_json(json!({
            "name": "Landing",
            "document": {
                "id": "0:0", "type": "DOCUMENT",
                "children": [
                    {"id": "0:1", "type": "CANVAS", "children": [
                        {"id": "1:1", "type": "FRAME", "absoluteBoundingBox": bbox()},
                        {"id": "1:2", "type": "FRAME", "absoluteBoundingBox": bbox()}
                    ]},
                    {"id": "0:2", "type": "CANVAS", "children": [
                        {"id": "2:1", "type": "FRAME", "absoluteBoundingBox": bbox()}
                    ]}
                ]
            }
        }))
        .unwrap();

        assert_eq!(doc.tree.name.as_deref(), Some("Landing"));
        let ids: Vec<_> = doc.tree.roots.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1:1", "1:2", "2:1"]);
    }

    #[test]
    fn test_children_order_preserved() {
        let doc = parse_json(json!({
            "id": "1:1", "type": "FRAME", "absoluteBoundingBox": bbox(),
            "children": [text("1:4", "c"), text("1:2", "a"), text("1:3", "b")]
        }))
        .unwrap();

        let ids: Vec<_> = doc.tree.roots[0]
            .children
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1:4", "1:2", "1:3"]);
    }

    #[test]
    fn test_unknown_type_becomes_placeholder() {
        let doc = parse_json(json!({
            "id": "1:1", "type": "FRAME", "absoluteBoundingBox": bbox(),
            "children": [
                {"id": "1:2", "type": "WIDGET", "absoluteBoundingBox": bbox(),
                 "children": [{"id": "1:3", "type": "FRAME"}]},
                text("1:4", "sibling")
            ]
        }))
        .unwrap();

        let root = &doc.tree.roots[0];
        assert!(matches!(
            &root.children[0].kind,
            NodeKind::Placeholder { type_tag } if type_tag == "WIDGET"
        ));
        assert!(root.children[0].children.is_empty());
        assert!(matches!(root.children[1].kind, NodeKind::Text(_)));

        let warnings: Vec<_> = doc.diagnostics.with_severity(Severity::Warning).collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].node_id.as_ref().unwrap().as_str(), "1:2");
    }

    #[test]
    fn test_missing_required_fields_collects_all() {
        let err = parse_json(json!({
            "id": "1:1", "type": "FRAME", "absoluteBoundingBox": bbox(),
            "children": [
                {"id": "1:2", "type": "TEXT", "absoluteBoundingBox": bbox(),
                 "style": {"fontFamily": "Inter", "fontWeight": 400, "fontSize": 12}},
                {"id": "1:3", "type": "FRAME"},
                text("1:4", "fine")
            ]
        }))
        .unwrap_err();

        let ParseError::Validation(validation) = err else {
            panic!("expected validation error");
        };
        let ids: Vec<_> = validation.node_ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["1:2", "1:3"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = parse_json(json!([text("1:1", "a"), text("1:1", "b")])).unwrap_err();
        assert!(matches!(err, ParseError::Validation(v) if v.node_ids[0].as_str() == "1:1"));
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = parse_json(json!({
            "id": "1:1", "type": "RECTANGLE",
            "absoluteBoundingBox": {"x": 0, "y": 0, "width": -1, "height": 5}
        }))
        .unwrap_err();
        assert!(matches!(err, ParseError::Validation(_)));
    }

    #[test]
    fn test_corner_radius_variants() {
        let doc = parse_json(json!([
            {"id": "1:1", "type": "RECTANGLE", "absoluteBoundingBox": bbox(), "cornerRadius": 6},
            {"id": "1:2", "type": "FRAME", "absoluteBoundingBox": bbox(),
             "rectangleCornerRadii": [1, 2, 3, 4]}
        ]))
        .unwrap();

        let NodeKind::Shape(shape) = &doc.tree.roots[0].kind else {
            panic!("expected shape");
        };
        assert_eq!(shape.shape, ShapeKind::Rectangle);
        assert_eq!(shape.corner_radius, CornerRadius::Uniform(6.0));
        assert_eq!(
            doc.tree.roots[1].frame().unwrap().corner_radius,
            CornerRadius::PerCorner([1.0, 2.0, 3.0, 4.0])
        );

        let err = parse_json(json!({
            "id": "1:3", "type": "FRAME", "absoluteBoundingBox": bbox(),
            "cornerRadius": [1, 2, 3]
        }))
        .unwrap_err();
        assert!(matches!(err, ParseError::Validation(_)));
    }

    #[test]
    fn test_instance_carries_component_and_frame_props() {
        let doc = parse_json(json!({
            "id": "1:1", "type": "INSTANCE", "name": "Button",
            "absoluteBoundingBox": bbox(),
            "componentId": "5:10",
            "layoutMode": "HORIZONTAL",
            "itemSpacing": 4,
            "cornerRadius": 8,
            "children": [text("1:2", "Buy")]
        }))
        .unwrap();

        let node = &doc.tree.roots[0];
        let NodeKind::Instance(instance) = &node.kind else {
            panic!("expected instance");
        };
        assert_eq!(instance.component_id.as_deref(), Some("5:10"));
        assert_eq!(instance.frame.layout_mode, LayoutMode::Horizontal);
        assert_eq!(instance.frame.item_spacing, 4.0);
        assert_eq!(node.frame().unwrap().corner_radius, CornerRadius::Uniform(8.0));
        assert_eq!(node.children.len(), 1);
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_paints_and_effects() {
        let doc = parse_json(json!({
            "id": "1:1", "type": "FRAME", "absoluteBoundingBox": bbox(),
            "fills": [
                {"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0, "a": 1}},
                {"type": "GRADIENT_LINEAR",
                 "gradientStops": [
                    {"position": -0.5, "color": {"r": 0, "g": 0, "b": 0, "a": 1}},
                    {"position": 1.5, "color": {"r": 1, "g": 1, "b": 1, "a": 1}}
                 ]},
                {"type": "EMOJI"}
            ],
            "effects": [
                {"type": "DROP_SHADOW", "radius": 4, "offset": {"x": 0, "y": 2},
                 "color": {"r": 0, "g": 0, "b": 0, "a": 0.5}},
                {"type": "GLOW", "radius": 2}
            ]
        }))
        .unwrap();

        let node = &doc.tree.roots[0];
        assert_eq!(node.fills.len(), 3);
        let PaintKind::Gradient(gradient) = &node.fills[1].kind else {
            panic!("expected gradient");
        };
        assert_eq!(gradient.stops[0].position, 0.0);
        assert_eq!(gradient.stops[1].position, 1.0);
        assert!(matches!(&node.fills[2].kind, PaintKind::Unsupported(t) if t == "EMOJI"));
        assert!(matches!(node.effects[0].kind, EffectKind::DropShadow(_)));
        assert!(matches!(&node.effects[1].kind, EffectKind::Unsupported(t) if t == "GLOW"));
    }

    #[test]
    fn test_out_of_order_stops_checked_before_clamping() {
        let stop = |position: f64| {
            json!({"position": position, "color": {"r": 1, "g": 0, "b": 0, "a": 1}})
        };
        let doc = parse_json(json!({
            "id": "1:1", "type": "FRAME", "absoluteBoundingBox": bbox(),
            "fills": [
                {"type": "SOLID", "color": {"r": 0, "g": 0, "b": 1, "a": 1}},
                {"type": "GRADIENT_LINEAR", "gradientStops": [stop(0.5), stop(2.0), stop(1.5)]}
            ]
        }))
        .unwrap();

        let node = &doc.tree.roots[0];
        assert_eq!(node.fills.len(), 1);
        assert!(matches!(node.fills[0].kind, PaintKind::Solid(_)));
        let warnings: Vec<_> = doc.diagnostics.with_severity(Severity::Warning).collect();
        assert_eq!(doc.diagnostics.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.starts_with("fills[1]: gradient stops"));
    }

    #[test]
    fn test_text_overrides_and_line_height() {
        let doc = parse_json(json!({
            "id": "1:1", "type": "TEXT", "absoluteBoundingBox": bbox(),
            "characters": "Hello",
            "style": {"fontFamily": "Inter", "fontWeight": 400, "fontSize": 16,
                      "lineHeightUnit": "PIXELS", "lineHeightPx": 24},
            "characterStyleOverrides": [0, 0, 1, 1, 1, 0, 0],
            "styleOverrideTable": {"1": {"fontWeight": 700}},
            "styleOverrideRanges": [{"start": 3, "end": 99, "styleId": 2}]
        }))
        .unwrap();

        let text = doc.tree.roots[0].text().unwrap();
        assert_eq!(text.style.line_height, LineHeight::Px(24.0));
        assert_eq!(text.character_overrides.len(), 5);
        assert_eq!(text.override_table[&1].font_weight, Some(700.0));
        assert_eq!(text.override_ranges[0].end, 5);
        // truncated overrides (info) + missing style id 2 (warning)
        assert_eq!(doc.diagnostics.with_severity(Severity::Warning).count(), 1);
        assert_eq!(doc.diagnostics.with_severity(Severity::Info).count(), 1);
    }

    #[test]
    fn test_padding_shorthand_and_overrides() {
        let doc = parse_json(json!({
            "id": "1:1", "type": "FRAME", "absoluteBoundingBox": bbox(),
            "layoutMode": "HORIZONTAL", "padding": 16, "paddingLeft": 4
        }))
        .unwrap();
        let padding = doc.tree.roots[0].frame().unwrap().padding;
        assert_eq!(padding.top, 16.0);
        assert_eq!(padding.left, 4.0);
    }

    #[test]
    fn test_unknown_keyword_warns() {
        let doc = parse_json(json!({
            "id": "1:1", "type": "FRAME", "absoluteBoundingBox": bbox(),
            "blendMode": "SPARKLE"
        }))
        .unwrap();
        assert_eq!(doc.diagnostics.len(), 1);
        assert_eq!(doc.diagnostics.iter().next().unwrap().severity, Severity::Warning);
    }

    #[test]
    fn test_invalid_json_and_root() {
        assert!(matches!(parse("{not json"), Err(ParseError::Json(_))));
        assert!(matches!(parse("42"), Err(ParseError::InvalidRoot(_))));
    }
}
