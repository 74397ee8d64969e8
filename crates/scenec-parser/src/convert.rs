//! Conversion from raw JSON values to typed scene nodes.
//!
//! Each node is deserialized on its own so that a malformed node is reported
//! against its id while its siblings and children are still validated.

use crate::schema::{
    RawColor, RawCornerRadius, RawEffect, RawNode, RawPaint, RawRect, RawStyleRange, RawTextStyle,
};
use glam::DVec2;
use scenec_core::defaults;
use scenec_core::{
    BlendMode, Color, CornerRadius, CounterAlign, Diagnostic, Effect, EffectKind, FrameProps,
    Gradient, GradientKind, GradientStop, InstanceProps, LayoutMode, LineHeight, NodeId, NodeKind,
    OverrideTable, Padding, Paint, PaintKind, PrimaryAlign, Rect, ScaleMode, SceneNode, Shadow,
    ShapeKind, ShapeProps, SizingMode, StyleRange, TextAlignHorizontal, TextAlignVertical,
    TextCase, TextDecoration, TextProps, TextStyle, TextStyleOverride,
};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::collections::HashSet;

/// Node classes recognized from the `type` tag.
enum NodeClass {
    Frame,
    Instance,
    Text,
    Shape(ShapeKind),
}

/// Classify a `type` tag; `None` for types the compiler does not know.
fn classify(tag: &str) -> Option<NodeClass> {
    Some(match tag {
        "FRAME" | "GROUP" | "COMPONENT" | "COMPONENT_SET" | "SECTION" => NodeClass::Frame,
        "INSTANCE" => NodeClass::Instance,
        "TEXT" => NodeClass::Text,
        other => NodeClass::Shape(ShapeKind::from_tag(other)?),
    })
}

/// Accumulates nodes, warnings and validation errors for one document.
pub(crate) struct Converter {
    pub(crate) warnings: Vec<Diagnostic>,
    pub(crate) errors: Vec<Diagnostic>,
    seen: HashSet<String>,
}

impl Converter {
    pub(crate) fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn error(&mut self, id: Option<&NodeId>, message: impl Into<String>) {
        self.errors.push(Diagnostic::error(id.cloned(), message));
    }

    fn warn(&mut self, id: &NodeId, message: impl Into<String>) {
        self.warnings.push(Diagnostic::warning(id, message));
    }

    /// Convert one node and its subtree. Returns `None` when the node itself
    /// could not be built; errors are recorded either way.
    pub(crate) fn convert_node(&mut self, value: Value, context: &str) -> Option<SceneNode> {
        let Value::Object(mut map) = value else {
            self.error(None, format!("{}: expected a node object", context));
            return None;
        };

        let raw_children = self.take_children(&mut map, context);

        let id = match map.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => NodeId::from(id),
            _ => {
                self.error(None, format!("{}: missing required field `id`", context));
                self.validate_orphans(raw_children, context);
                return None;
            }
        };

        if !self.seen.insert(id.0.clone()) {
            self.error(Some(&id), format!("duplicate node id `{}`", id));
        }

        let Some(tag) = map.get("type").and_then(Value::as_str).map(str::to_string) else {
            self.error(Some(&id), "missing required field `type`");
            self.validate_orphans(raw_children, id.as_str());
            return None;
        };

        let Some(class) = classify(&tag) else {
            return Some(self.placeholder(id, &tag, &map, raw_children.len()));
        };

        let raw: RawNode = match serde_json::from_value(Value::Object(map)) {
            Ok(raw) => raw,
            Err(err) => {
                self.error(Some(&id), format!("malformed node: {}", err));
                self.validate_orphans(raw_children, id.as_str());
                return None;
            }
        };

        let bounds = self.bounds(&id, raw.absolute_bounding_box);
        let kind = match class {
            NodeClass::Frame => NodeKind::Frame(self.frame_props(&id, &raw)),
            NodeClass::Instance => NodeKind::Instance(InstanceProps {
                component_id: raw.component_id.clone(),
                frame: self.frame_props(&id, &raw),
            }),
            NodeClass::Text => match self.text_props(&id, &raw) {
                Some(text) => NodeKind::Text(text),
                None => {
                    self.validate_orphans(raw_children, id.as_str());
                    return None;
                }
            },
            NodeClass::Shape(shape) => NodeKind::Shape(ShapeProps {
                shape,
                corner_radius: self.corner_radius(&id, &raw),
            }),
        };

        let mut node = SceneNode::new(id.clone(), kind);
        node.name = raw.name;
        node.bounds = bounds.unwrap_or_default();
        node.visible = raw.visible.unwrap_or(defaults::VISIBLE);
        node.opacity = raw.opacity.unwrap_or(defaults::OPACITY);
        node.blend_mode = self.keyword(
            &id,
            "blendMode",
            raw.blend_mode.as_deref(),
            BlendMode::from_tag,
            defaults::BLEND_MODE,
        );
        node.fills = self.paints(&id, "fills", raw.fills);
        node.strokes = self.paints(&id, "strokes", raw.strokes);
        node.stroke_weight = raw.stroke_weight.unwrap_or(defaults::STROKE_WEIGHT);
        node.effects = raw
            .effects
            .into_iter()
            .map(|effect| self.effect(effect))
            .collect();
        node.layout_grow = raw.layout_grow.unwrap_or(defaults::LAYOUT_GROW);

        if node.frame().is_some() {
            node.children = raw_children
                .into_iter()
                .enumerate()
                .filter_map(|(index, child)| {
                    self.convert_node(child, &format!("{}.children[{}]", id, index))
                })
                .collect();
        } else if !raw_children.is_empty() {
            self.warnings.push(Diagnostic::info(
                Some(id.clone()),
                format!(
                    "{} child node(s) of a {} node are not emitted",
                    raw_children.len(),
                    node.kind.label()
                ),
            ));
        }

        Some(node)
    }

    fn take_children(&mut self, map: &mut Map<String, Value>, context: &str) -> Vec<Value> {
        match map.remove("children") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(children)) => children,
            Some(_) => {
                let id = map.get("id").and_then(Value::as_str).map(NodeId::from);
                self.error(
                    id.as_ref(),
                    format!("{}: field `children` must be an array", context),
                );
                Vec::new()
            }
        }
    }

    /// Validate the children of a node that could not be built.
    fn validate_orphans(&mut self, children: Vec<Value>, context: &str) {
        for (index, child) in children.into_iter().enumerate() {
            self.convert_node(child, &format!("{}.children[{}]", context, index));
        }
    }

    fn placeholder(
        &mut self,
        id: NodeId,
        tag: &str,
        map: &Map<String, Value>,
        dropped_children: usize,
    ) -> SceneNode {
        let bounds = map
            .get("absoluteBoundingBox")
            .cloned()
            .and_then(|v| serde_json::from_value::<RawRect>(v).ok())
            .map(|r| Rect::new(r.x, r.y, r.width.max(0.0), r.height.max(0.0)))
            .unwrap_or_default();

        let mut message = format!("unsupported node type `{}`, emitted as placeholder", tag);
        if dropped_children > 0 {
            message.push_str(&format!(" ({} child node(s) dropped)", dropped_children));
        }
        self.warn(&id, message);

        let mut node = SceneNode::new(
            id,
            NodeKind::Placeholder {
                type_tag: tag.to_string(),
            },
        );
        node.name = map
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        node.visible = map
            .get("visible")
            .and_then(Value::as_bool)
            .unwrap_or(defaults::VISIBLE);
        node.bounds = bounds;
        node
    }

    fn bounds(&mut self, id: &NodeId, raw: Option<RawRect>) -> Option<Rect> {
        let Some(r) = raw else {
            self.error(Some(id), "missing required field `absoluteBoundingBox`");
            return None;
        };
        if ![r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite()) {
            self.error(Some(id), "bounding box values must be finite");
            return None;
        }
        if r.width < 0.0 || r.height < 0.0 {
            self.error(
                Some(id),
                format!("bounding box has negative size {}x{}", r.width, r.height),
            );
            return None;
        }
        Some(Rect::new(r.x, r.y, r.width, r.height))
    }

    /// Parse an enum keyword, warning and falling back to the default on unknown values.
    fn keyword<T>(
        &mut self,
        id: &NodeId,
        field: &str,
        value: Option<&str>,
        parse: fn(&str) -> Option<T>,
        default: T,
    ) -> T {
        match value {
            None => default,
            Some(tag) => parse(tag).unwrap_or_else(|| {
                self.warn(id, format!("unknown {} `{}`, using default", field, tag));
                default
            }),
        }
    }

    fn frame_props(&mut self, id: &NodeId, raw: &RawNode) -> FrameProps {
        let base_padding = raw.padding.unwrap_or(defaults::PADDING);
        FrameProps {
            layout_mode: self.keyword(
                id,
                "layoutMode",
                raw.layout_mode.as_deref(),
                parse_layout_mode,
                defaults::LAYOUT_MODE,
            ),
            primary_sizing: self.keyword(
                id,
                "primaryAxisSizingMode",
                raw.primary_axis_sizing_mode.as_deref(),
                parse_sizing_mode,
                defaults::SIZING_MODE,
            ),
            counter_sizing: self.keyword(
                id,
                "counterAxisSizingMode",
                raw.counter_axis_sizing_mode.as_deref(),
                parse_sizing_mode,
                defaults::SIZING_MODE,
            ),
            primary_align: self.keyword(
                id,
                "primaryAxisAlignItems",
                raw.primary_axis_align_items.as_deref(),
                parse_primary_align,
                defaults::PRIMARY_ALIGN,
            ),
            counter_align: self.keyword(
                id,
                "counterAxisAlignItems",
                raw.counter_axis_align_items.as_deref(),
                parse_counter_align,
                defaults::COUNTER_ALIGN,
            ),
            padding: Padding {
                top: raw.padding_top.unwrap_or(base_padding),
                right: raw.padding_right.unwrap_or(base_padding),
                bottom: raw.padding_bottom.unwrap_or(base_padding),
                left: raw.padding_left.unwrap_or(base_padding),
            },
            item_spacing: raw.item_spacing.unwrap_or(defaults::ITEM_SPACING),
            corner_radius: self.corner_radius(id, raw),
            clips_content: raw.clips_content.unwrap_or(defaults::CLIPS_CONTENT),
        }
    }

    fn corner_radius(&mut self, id: &NodeId, raw: &RawNode) -> CornerRadius {
        let per_corner = match (&raw.rectangle_corner_radii, &raw.corner_radius) {
            (Some(radii), _) => Some(radii.as_slice()),
            (None, Some(RawCornerRadius::PerCorner(radii))) => Some(radii.as_slice()),
            (None, Some(RawCornerRadius::Uniform(radius))) => {
                return CornerRadius::Uniform(*radius)
            }
            (None, None) => None,
        };
        match per_corner {
            None => CornerRadius::Uniform(defaults::CORNER_RADIUS),
            Some(&[tl, tr, br, bl]) => CornerRadius::PerCorner([tl, tr, br, bl]),
            Some(other) => {
                self.error(
                    Some(id),
                    format!(
                        "corner radius array must have 4 values, found {}",
                        other.len()
                    ),
                );
                CornerRadius::Uniform(defaults::CORNER_RADIUS)
            }
        }
    }

    fn paints(&mut self, id: &NodeId, field: &str, raw: Vec<RawPaint>) -> Vec<Paint> {
        raw.into_iter()
            .enumerate()
            .filter_map(|(index, paint)| self.paint(id, field, index, paint))
            .collect()
    }

    fn paint(&mut self, id: &NodeId, field: &str, index: usize, raw: RawPaint) -> Option<Paint> {
        let kind = match raw.paint_type.as_str() {
            "SOLID" => match raw.color {
                Some(color) => PaintKind::Solid(color_from(color)),
                None => {
                    self.error(
                        Some(id),
                        format!("{}[{}]: solid paint missing required field `color`", field, index),
                    );
                    return None;
                }
            },
            tag @ ("GRADIENT_LINEAR" | "GRADIENT_RADIAL" | "GRADIENT_ANGULAR"
            | "GRADIENT_DIAMOND") => {
                // Order is judged on raw positions; clamping could hide it.
                let ordered = raw
                    .gradient_stops
                    .windows(2)
                    .all(|pair| pair[0].position <= pair[1].position);
                if !ordered {
                    self.warn(
                        id,
                        format!(
                            "{}[{}]: gradient stops are not in non-decreasing position order, layer skipped",
                            field, index
                        ),
                    );
                    return None;
                }
                PaintKind::Gradient(Gradient {
                    kind: match tag {
                        "GRADIENT_LINEAR" => GradientKind::Linear,
                        "GRADIENT_RADIAL" => GradientKind::Radial,
                        "GRADIENT_ANGULAR" => GradientKind::Angular,
                        _ => GradientKind::Diamond,
                    },
                    stops: raw
                        .gradient_stops
                        .iter()
                        .map(|stop| GradientStop {
                            position: stop.position.clamp(0.0, 1.0),
                            color: color_from(stop.color),
                        })
                        .collect(),
                    handles: raw
                        .gradient_handle_positions
                        .iter()
                        .map(|v| DVec2::new(v.x, v.y))
                        .collect::<SmallVec<[DVec2; 3]>>(),
                })
            }
            "IMAGE" => match raw.image_ref {
                Some(reference) => PaintKind::Image {
                    reference,
                    scale_mode: self.keyword(
                        id,
                        "scaleMode",
                        raw.scale_mode.as_deref(),
                        ScaleMode::from_tag,
                        defaults::SCALE_MODE,
                    ),
                },
                None => {
                    self.error(
                        Some(id),
                        format!("{}[{}]: image paint missing required field `imageRef`", field, index),
                    );
                    return None;
                }
            },
            other => PaintKind::Unsupported(other.to_string()),
        };

        Some(Paint {
            kind,
            opacity: raw.opacity.unwrap_or(defaults::PAINT_OPACITY),
            visible: raw.visible.unwrap_or(defaults::PAINT_VISIBLE),
        })
    }

    fn effect(&self, raw: RawEffect) -> Effect {
        let radius = raw.radius.unwrap_or(defaults::EFFECT_RADIUS);
        let shadow = || Shadow {
            color: raw.color.map(color_from).unwrap_or(defaults::SHADOW_COLOR),
            offset: raw
                .offset
                .map(|v| DVec2::new(v.x, v.y))
                .unwrap_or(DVec2::ZERO),
            radius,
            spread: raw.spread.unwrap_or(defaults::SHADOW_SPREAD),
        };
        let kind = match raw.effect_type.as_str() {
            "DROP_SHADOW" => EffectKind::DropShadow(shadow()),
            "INNER_SHADOW" => EffectKind::InnerShadow(shadow()),
            "LAYER_BLUR" => EffectKind::LayerBlur { radius },
            "BACKGROUND_BLUR" => EffectKind::BackgroundBlur { radius },
            other => EffectKind::Unsupported(other.to_string()),
        };
        Effect {
            kind,
            visible: raw.visible.unwrap_or(defaults::EFFECT_VISIBLE),
        }
    }

    fn text_props(&mut self, id: &NodeId, raw: &RawNode) -> Option<TextProps> {
        let characters = match &raw.characters {
            Some(characters) => characters.clone(),
            None => {
                self.error(Some(id), "text node missing required field `characters`");
                return None;
            }
        };
        let style = match &raw.style {
            Some(style) => self.base_style(id, style)?,
            None => {
                self.error(Some(id), "text node missing required field `style`");
                return None;
            }
        };

        let mut override_table = OverrideTable::new();
        for (key, raw_override) in &raw.style_override_table {
            match key.parse::<u32>() {
                Ok(style_id) => {
                    let entry = self.style_override(id, raw_override);
                    override_table.insert(style_id, entry);
                }
                Err(_) => self.error(
                    Some(id),
                    format!("style override table key `{}` is not a numeric id", key),
                ),
            }
        }

        let char_count = characters.chars().count();
        let mut character_overrides = raw.character_style_overrides.clone();
        if character_overrides.len() > char_count {
            self.warnings.push(Diagnostic::info(
                Some(id.clone()),
                format!(
                    "characterStyleOverrides has {} entries for {} characters; extra entries ignored",
                    character_overrides.len(),
                    char_count
                ),
            ));
            character_overrides.truncate(char_count);
        }

        let mut override_ranges = Vec::with_capacity(raw.style_override_ranges.len());
        for range in &raw.style_override_ranges {
            if let Some(range) = self.style_range(id, range, char_count) {
                override_ranges.push(range);
            }
        }

        let referenced = character_overrides
            .iter()
            .copied()
            .chain(override_ranges.iter().map(|r| r.style_id));
        let mut missing: Vec<u32> = referenced
            .filter(|style_id| *style_id != 0 && !override_table.contains_key(style_id))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        for style_id in missing {
            self.warn(
                id,
                format!("style override id {} not found in table, base style used", style_id),
            );
        }

        Some(TextProps {
            characters,
            style,
            character_overrides,
            override_table,
            override_ranges,
        })
    }

    fn style_range(
        &mut self,
        id: &NodeId,
        range: &RawStyleRange,
        char_count: usize,
    ) -> Option<StyleRange> {
        if range.start > range.end {
            self.error(
                Some(id),
                format!(
                    "style override range {}..{} has start after end",
                    range.start, range.end
                ),
            );
            return None;
        }
        Some(StyleRange {
            start: range.start.min(char_count),
            end: range.end.min(char_count),
            style_id: range.style_id,
        })
    }

    fn base_style(&mut self, id: &NodeId, raw: &RawTextStyle) -> Option<TextStyle> {
        let mut missing = Vec::new();
        if raw.font_family.is_none() {
            missing.push("fontFamily");
        }
        if raw.font_weight.is_none() {
            missing.push("fontWeight");
        }
        if raw.font_size.is_none() {
            missing.push("fontSize");
        }
        if !missing.is_empty() {
            self.error(
                Some(id),
                format!("text style missing required field(s): {}", missing.join(", ")),
            );
            return None;
        }

        let mut style = TextStyle::new(
            raw.font_family.clone().unwrap_or_default(),
            raw.font_weight.unwrap_or_default(),
            raw.font_size.unwrap_or_default(),
        );
        style.line_height = self.line_height(id, raw).unwrap_or(defaults::LINE_HEIGHT);
        style.letter_spacing = raw.letter_spacing.unwrap_or(defaults::LETTER_SPACING);
        style.italic = raw.italic.unwrap_or(defaults::ITALIC);
        style.align_horizontal = self.keyword(
            id,
            "textAlignHorizontal",
            raw.text_align_horizontal.as_deref(),
            parse_align_horizontal,
            defaults::TEXT_ALIGN_HORIZONTAL,
        );
        style.align_vertical = self.keyword(
            id,
            "textAlignVertical",
            raw.text_align_vertical.as_deref(),
            parse_align_vertical,
            defaults::TEXT_ALIGN_VERTICAL,
        );
        style.case = self.keyword(
            id,
            "textCase",
            raw.text_case.as_deref(),
            parse_text_case,
            defaults::TEXT_CASE,
        );
        style.decoration = self.keyword(
            id,
            "textDecoration",
            raw.text_decoration.as_deref(),
            parse_text_decoration,
            defaults::TEXT_DECORATION,
        );
        Some(style)
    }

    fn style_override(&mut self, id: &NodeId, raw: &RawTextStyle) -> TextStyleOverride {
        let case = raw.text_case.as_deref().map(|tag| {
            self.keyword(id, "textCase", Some(tag), parse_text_case, defaults::TEXT_CASE)
        });
        let decoration = raw.text_decoration.as_deref().map(|tag| {
            self.keyword(
                id,
                "textDecoration",
                Some(tag),
                parse_text_decoration,
                defaults::TEXT_DECORATION,
            )
        });
        TextStyleOverride {
            font_family: raw.font_family.clone(),
            font_weight: raw.font_weight,
            font_size: raw.font_size,
            line_height: self.line_height(id, raw),
            letter_spacing: raw.letter_spacing,
            italic: raw.italic,
            case,
            decoration,
            fills: raw
                .fills
                .clone()
                .map(|fills| self.paints(id, "styleOverrideTable.fills", fills)),
        }
    }

    /// Line height from the unit tag; `None` when the style does not set one.
    fn line_height(&mut self, id: &NodeId, raw: &RawTextStyle) -> Option<LineHeight> {
        match raw.line_height_unit.as_deref() {
            Some("PIXELS") => raw.line_height_px.map(LineHeight::Px),
            Some("FONT_SIZE_%") => raw.line_height_percent_font_size.map(LineHeight::Percent),
            Some("INTRINSIC_%") => Some(LineHeight::Normal),
            Some(other) => {
                self.warn(id, format!("unknown lineHeightUnit `{}`, using default", other));
                None
            }
            None => raw.line_height_px.map(LineHeight::Px),
        }
    }
}

fn color_from(raw: RawColor) -> Color {
    Color::rgba(raw.r, raw.g, raw.b, raw.a.unwrap_or(defaults::COLOR_ALPHA))
}

fn parse_layout_mode(tag: &str) -> Option<LayoutMode> {
    Some(match tag {
        "NONE" => LayoutMode::None,
        "HORIZONTAL" => LayoutMode::Horizontal,
        "VERTICAL" => LayoutMode::Vertical,
        _ => return None,
    })
}

fn parse_sizing_mode(tag: &str) -> Option<SizingMode> {
    Some(match tag {
        "FIXED" => SizingMode::Fixed,
        "AUTO" | "HUG" => SizingMode::Auto,
        _ => return None,
    })
}

fn parse_primary_align(tag: &str) -> Option<PrimaryAlign> {
    Some(match tag {
        "MIN" => PrimaryAlign::Min,
        "CENTER" => PrimaryAlign::Center,
        "MAX" => PrimaryAlign::Max,
        "SPACE_BETWEEN" => PrimaryAlign::SpaceBetween,
        _ => return None,
    })
}

fn parse_counter_align(tag: &str) -> Option<CounterAlign> {
    Some(match tag {
        "MIN" => CounterAlign::Min,
        "CENTER" => CounterAlign::Center,
        "MAX" => CounterAlign::Max,
        "BASELINE" => CounterAlign::Baseline,
        _ => return None,
    })
}

fn parse_align_horizontal(tag: &str) -> Option<TextAlignHorizontal> {
    Some(match tag {
        "LEFT" => TextAlignHorizontal::Left,
        "RIGHT" => TextAlignHorizontal::Right,
        "CENTER" => TextAlignHorizontal::Center,
        "JUSTIFIED" => TextAlignHorizontal::Justified,
        _ => return None,
    })
}

fn parse_align_vertical(tag: &str) -> Option<TextAlignVertical> {
    Some(match tag {
        "TOP" => TextAlignVertical::Top,
        "CENTER" => TextAlignVertical::Center,
        "BOTTOM" => TextAlignVertical::Bottom,
        _ => return None,
    })
}

fn parse_text_case(tag: &str) -> Option<TextCase> {
    Some(match tag {
        "ORIGINAL" => TextCase::Original,
        "UPPER" => TextCase::Upper,
        "LOWER" => TextCase::Lower,
        "TITLE" => TextCase::Title,
        _ => return None,
    })
}

fn parse_text_decoration(tag: &str) -> Option<TextDecoration> {
    Some(match tag {
        "NONE" => TextDecoration::None,
        "UNDERLINE" => TextDecoration::Underline,
        "STRIKETHROUGH" => TextDecoration::Strikethrough,
        _ => return None,
    })
}
