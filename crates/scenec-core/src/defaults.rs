//! Explicit defaults for fields the input document may omit.
//!
//! The parser fills every optional field from this table so that no later
//! stage depends on an implicit default.

use crate::types::{
    BlendMode, Color, CounterAlign, LayoutMode, LineHeight, PrimaryAlign, ScaleMode, SizingMode,
    TextAlignHorizontal, TextAlignVertical, TextCase, TextDecoration,
};

pub const OPACITY: f64 = 1.0;
pub const VISIBLE: bool = true;
pub const BLEND_MODE: BlendMode = BlendMode::PassThrough;

pub const LAYOUT_MODE: LayoutMode = LayoutMode::None;
pub const SIZING_MODE: SizingMode = SizingMode::Fixed;
pub const PRIMARY_ALIGN: PrimaryAlign = PrimaryAlign::Min;
pub const COUNTER_ALIGN: CounterAlign = CounterAlign::Min;
pub const PADDING: f64 = 0.0;
pub const ITEM_SPACING: f64 = 0.0;
pub const CORNER_RADIUS: f64 = 0.0;
pub const LAYOUT_GROW: f64 = 0.0;
pub const CLIPS_CONTENT: bool = false;

pub const STROKE_WEIGHT: f64 = 1.0;
pub const PAINT_OPACITY: f64 = 1.0;
pub const PAINT_VISIBLE: bool = true;
pub const COLOR_ALPHA: f64 = 1.0;
pub const SCALE_MODE: ScaleMode = ScaleMode::Fill;

pub const EFFECT_VISIBLE: bool = true;
pub const EFFECT_RADIUS: f64 = 0.0;
pub const SHADOW_SPREAD: f64 = 0.0;
pub const SHADOW_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.25);

pub const TEXT_ALIGN_HORIZONTAL: TextAlignHorizontal = TextAlignHorizontal::Left;
pub const TEXT_ALIGN_VERTICAL: TextAlignVertical = TextAlignVertical::Top;
pub const TEXT_CASE: TextCase = TextCase::Original;
pub const TEXT_DECORATION: TextDecoration = TextDecoration::None;
pub const LETTER_SPACING: f64 = 0.0;
pub const LINE_HEIGHT: LineHeight = LineHeight::Normal;
pub const ITALIC: bool = false;

/// Linear gradient angle (top to bottom) when handle positions are absent.
pub const LINEAR_GRADIENT_ANGLE: f64 = 180.0;
