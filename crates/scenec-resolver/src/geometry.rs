//! Placement, sizing and auto-layout container declarations.

use crate::record::StyleRecord;
use crate::units::{padding, px, radius};
use scenec_core::{CounterAlign, FrameProps, LayoutMode, NodeKind, PrimaryAlign, SizingMode};
use scenec_core::{format_number, CornerRadius, SceneNode, ShapeKind};
use scenec_layout::{FlowDirection, LayoutContext, WalkEntry};

/// Whether each axis has a fixed size: `(horizontal, vertical)`.
fn fixed_axes(node: &SceneNode) -> (bool, bool) {
    match node.frame() {
        Some(frame) => (
            frame.horizontal_sizing() == SizingMode::Fixed,
            frame.vertical_sizing() == SizingMode::Fixed,
        ),
        None => (true, true),
    }
}

fn set_size(node: &SceneNode, record: &mut StyleRecord) {
    let (fixed_width, fixed_height) = fixed_axes(node);
    if fixed_width {
        record.set("width", px(node.bounds.width));
    }
    if fixed_height {
        record.set("height", px(node.bounds.height));
    }
}

/// Position and size from the layout context.
pub fn resolve_geometry(entry: &WalkEntry<'_>, record: &mut StyleRecord) {
    let node = entry.node;
    match entry.layout {
        LayoutContext::Root => {
            record.set("position", "relative");
            set_size(node, record);
        }
        LayoutContext::Flow { .. } => {
            if node.layout_grow > 0.0 {
                record.set("flex-grow", format_number(node.layout_grow));
            } else {
                record.set("flex-shrink", "0");
            }
            if !matches!(node.kind, NodeKind::Text(_)) {
                set_size(node, record);
            }
            // Absolutely placed children need a containing block.
            let plain_container = node
                .frame()
                .is_some_and(|frame| frame.layout_mode == LayoutMode::None);
            if plain_container && !node.children.is_empty() {
                record.set("position", "relative");
            }
        }
        LayoutContext::Absolute { offset } => {
            record.set("position", "absolute");
            record.set("left", px(offset.x));
            record.set("top", px(offset.y));
            record.set("width", px(node.bounds.width));
            record.set("height", px(node.bounds.height));
        }
    }
}

fn justify_content(align: PrimaryAlign) -> Option<&'static str> {
    match align {
        PrimaryAlign::Min => None,
        PrimaryAlign::Center => Some("center"),
        PrimaryAlign::Max => Some("flex-end"),
        PrimaryAlign::SpaceBetween => Some("space-between"),
    }
}

fn align_items(align: CounterAlign) -> Option<&'static str> {
    match align {
        CounterAlign::Min => None,
        CounterAlign::Center => Some("center"),
        CounterAlign::Max => Some("flex-end"),
        CounterAlign::Baseline => Some("baseline"),
    }
}

/// Flex container declarations for an auto-layout frame.
pub fn resolve_container(frame: &FrameProps, record: &mut StyleRecord) {
    if let Some(direction) = FlowDirection::from_layout_mode(frame.layout_mode) {
        record.set("display", "flex");
        record.set("flex-direction", direction.css_keyword());
        if frame.item_spacing != 0.0 {
            record.set("gap", px(frame.item_spacing));
        }
        if !frame.padding.is_zero() {
            record.set("padding", padding(&frame.padding));
        }
        if let Some(value) = justify_content(frame.primary_align) {
            record.set("justify-content", value);
        }
        if let Some(value) = align_items(frame.counter_align) {
            record.set("align-items", value);
        }
    }
    if frame.clips_content {
        record.set("overflow", "hidden");
    }
}

/// Corner rounding for frames and shapes.
pub fn resolve_radius(node: &SceneNode, record: &mut StyleRecord) {
    let corner_radius: &CornerRadius = match &node.kind {
        NodeKind::Frame(frame) => &frame.corner_radius,
        NodeKind::Instance(instance) => &instance.frame.corner_radius,
        NodeKind::Shape(shape) if shape.shape == ShapeKind::Ellipse => {
            record.set("border-radius", "50%");
            return;
        }
        NodeKind::Shape(shape) => &shape.corner_radius,
        NodeKind::Text(_) | NodeKind::Placeholder { .. } => return,
    };
    if !corner_radius.is_zero() {
        record.set("border-radius", radius(corner_radius));
    }
}
