//! Raw serde types mirroring the design-document JSON schema.
//!
//! Every optional field stays optional here; defaults are applied during
//! conversion from the explicit table in `scenec_core::defaults`.

use indexmap::IndexMap;
use serde::Deserialize;

/// Node fields shared by all known node types.
///
/// `id`, `type` and `children` are read from the raw JSON object before this
/// struct is deserialized, so a malformed node never hides its children.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    #[serde(default)]
    pub name: String,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub blend_mode: Option<String>,
    pub absolute_bounding_box: Option<RawRect>,
    #[serde(default)]
    pub fills: Vec<RawPaint>,
    #[serde(default)]
    pub strokes: Vec<RawPaint>,
    pub stroke_weight: Option<f64>,
    #[serde(default)]
    pub effects: Vec<RawEffect>,
    pub layout_grow: Option<f64>,

    // Frame
    pub layout_mode: Option<String>,
    pub primary_axis_sizing_mode: Option<String>,
    pub counter_axis_sizing_mode: Option<String>,
    pub primary_axis_align_items: Option<String>,
    pub counter_axis_align_items: Option<String>,
    pub padding: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub padding_left: Option<f64>,
    pub item_spacing: Option<f64>,
    pub corner_radius: Option<RawCornerRadius>,
    pub rectangle_corner_radii: Option<Vec<f64>>,
    pub clips_content: Option<bool>,

    // Instance
    pub component_id: Option<String>,

    // Text
    pub characters: Option<String>,
    pub style: Option<RawTextStyle>,
    #[serde(default)]
    pub character_style_overrides: Vec<u32>,
    #[serde(default)]
    pub style_override_table: IndexMap<String, RawTextStyle>,
    #[serde(default)]
    pub style_override_ranges: Vec<RawStyleRange>,
}

/// Bounding box.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawVector {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawColorStop {
    pub position: f64,
    pub color: RawColor,
}

/// A fill or stroke.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaint {
    #[serde(rename = "type")]
    pub paint_type: String,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub color: Option<RawColor>,
    #[serde(default)]
    pub gradient_stops: Vec<RawColorStop>,
    #[serde(default)]
    pub gradient_handle_positions: Vec<RawVector>,
    pub image_ref: Option<String>,
    pub scale_mode: Option<String>,
}

/// A shadow or blur.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEffect {
    #[serde(rename = "type")]
    pub effect_type: String,
    pub visible: Option<bool>,
    pub radius: Option<f64>,
    pub color: Option<RawColor>,
    pub offset: Option<RawVector>,
    pub spread: Option<f64>,
}

/// Scalar radius or one radius per corner.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCornerRadius {
    Uniform(f64),
    PerCorner(Vec<f64>),
}

/// A text style; the base style requires the font fields, overrides do not.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextStyle {
    pub font_family: Option<String>,
    pub font_weight: Option<f64>,
    pub font_size: Option<f64>,
    pub italic: Option<bool>,
    pub letter_spacing: Option<f64>,
    pub line_height_px: Option<f64>,
    pub line_height_percent_font_size: Option<f64>,
    pub line_height_unit: Option<String>,
    pub text_align_horizontal: Option<String>,
    pub text_align_vertical: Option<String>,
    pub text_case: Option<String>,
    pub text_decoration: Option<String>,
    pub fills: Option<Vec<RawPaint>>,
}

/// An explicit override range over character indexes.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStyleRange {
    pub start: usize,
    pub end: usize,
    pub style_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_radius_untagged() {
        let uniform: RawCornerRadius = serde_json::from_str("8").unwrap();
        assert!(matches!(uniform, RawCornerRadius::Uniform(r) if r == 8.0));

        let corners: RawCornerRadius = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert!(matches!(corners, RawCornerRadius::PerCorner(ref v) if v.len() == 4));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let node: RawNode = serde_json::from_str(
            r#"{"name": "Card", "constraints": {"vertical": "TOP"}, "exportSettings": []}"#,
        )
        .unwrap();
        assert_eq!(node.name, "Card");
    }
}
