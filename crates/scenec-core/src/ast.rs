//! Scene-graph node types.
//!
//! A [`SceneTree`] is built once per compile and never mutated afterwards.
//! Every node owns its children; child order is significant.

use crate::types::{
    BlendMode, CornerRadius, CounterAlign, Effect, LayoutMode, OverrideTable, Padding, Paint,
    PrimaryAlign, Rect, SizingMode, StyleRange, TextStyle,
};
use std::fmt;

/// Document-unique node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

/// A parsed design document.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneTree {
    /// File name, when the input carried one
    pub name: Option<String>,
    /// Top-level nodes of every page, in document order
    pub roots: Vec<SceneNode>,
}

impl SceneTree {
    pub fn new(roots: Vec<SceneNode>) -> Self {
        Self { name: None, roots }
    }

    /// Find a node anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&SceneNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(SceneNode::subtree_len).sum()
    }
}

/// A node in the scene graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    /// Bounding box in absolute document coordinates
    pub bounds: Rect,
    pub opacity: f64,
    pub visible: bool,
    pub blend_mode: BlendMode,
    /// Fills, bottom to top
    pub fills: Vec<Paint>,
    /// Strokes, bottom to top
    pub strokes: Vec<Paint>,
    pub stroke_weight: f64,
    pub effects: Vec<Effect>,
    /// Grow factor when laid out by an auto-layout parent
    pub layout_grow: f64,
    pub kind: NodeKind,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create a node with every common field at its default.
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            bounds: Rect::default(),
            opacity: crate::defaults::OPACITY,
            visible: crate::defaults::VISIBLE,
            blend_mode: BlendMode::default(),
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: crate::defaults::STROKE_WEIGHT,
            effects: Vec::new(),
            layout_grow: crate::defaults::LAYOUT_GROW,
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_fills(mut self, fills: Vec<Paint>) -> Self {
        self.fills = fills;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Frame properties for frames and instances.
    pub fn frame(&self) -> Option<&FrameProps> {
        match &self.kind {
            NodeKind::Frame(frame) => Some(frame),
            NodeKind::Instance(instance) => Some(&instance.frame),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&TextProps> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Depth-first search for a node by id.
    pub fn find(&self, id: &str) -> Option<&SceneNode> {
        if self.id.as_str() == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SceneNode::subtree_len).sum::<usize>()
    }
}

/// Node variants, dispatched by pattern match.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Frame(FrameProps),
    Instance(InstanceProps),
    Text(TextProps),
    Shape(ShapeProps),
    /// A node of a type the compiler does not know; emitted as an empty box.
    Placeholder { type_tag: String },
}

impl NodeKind {
    /// Short lowercase label, used for fallback class names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Frame(_) => "frame",
            Self::Instance(_) => "instance",
            Self::Text(_) => "text",
            Self::Shape(_) => "shape",
            Self::Placeholder { .. } => "placeholder",
        }
    }
}

/// Container and auto-layout properties.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameProps {
    pub layout_mode: LayoutMode,
    /// Sizing along the layout axis
    pub primary_sizing: SizingMode,
    /// Sizing across the layout axis
    pub counter_sizing: SizingMode,
    pub primary_align: PrimaryAlign,
    pub counter_align: CounterAlign,
    pub padding: Padding,
    pub item_spacing: f64,
    pub corner_radius: CornerRadius,
    pub clips_content: bool,
}

impl FrameProps {
    /// Sizing mode along the horizontal axis, resolved from the layout direction.
    pub fn horizontal_sizing(&self) -> SizingMode {
        match self.layout_mode {
            LayoutMode::None => SizingMode::Fixed,
            LayoutMode::Horizontal => self.primary_sizing,
            LayoutMode::Vertical => self.counter_sizing,
        }
    }

    /// Sizing mode along the vertical axis, resolved from the layout direction.
    pub fn vertical_sizing(&self) -> SizingMode {
        match self.layout_mode {
            LayoutMode::None => SizingMode::Fixed,
            LayoutMode::Horizontal => self.counter_sizing,
            LayoutMode::Vertical => self.primary_sizing,
        }
    }
}

/// A component instance: a frame that also names its main component.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceProps {
    pub component_id: Option<String>,
    pub frame: FrameProps,
}

/// Text content and typography.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextProps {
    pub characters: String,
    pub style: TextStyle,
    /// Style id per character; missing trailing entries mean the base style
    pub character_overrides: Vec<u32>,
    pub override_table: OverrideTable,
    /// Explicit ranges applied after `character_overrides`, later ranges winning
    pub override_ranges: Vec<StyleRange>,
}

impl TextProps {
    pub fn new(characters: impl Into<String>, style: TextStyle) -> Self {
        Self {
            characters: characters.into(),
            style,
            character_overrides: Vec::new(),
            override_table: OverrideTable::new(),
            override_ranges: Vec::new(),
        }
    }

    pub fn has_overrides(&self) -> bool {
        self.character_overrides.iter().any(|id| *id != 0)
            || self.override_ranges.iter().any(|r| r.style_id != 0 && r.start < r.end)
    }
}

/// Vector shape family. Path data is never carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Vector,
    Rectangle,
    Ellipse,
    Line,
    Star,
    Polygon,
    BooleanOperation,
}

impl ShapeKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "VECTOR" => Self::Vector,
            "RECTANGLE" => Self::Rectangle,
            "ELLIPSE" => Self::Ellipse,
            "LINE" => Self::Line,
            "STAR" => Self::Star,
            "POLYGON" | "REGULAR_POLYGON" => Self::Polygon,
            "BOOLEAN_OPERATION" => Self::BooleanOperation,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Star => "star",
            Self::Polygon => "polygon",
            Self::BooleanOperation => "boolean-operation",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeProps {
    pub shape: ShapeKind,
    pub corner_radius: CornerRadius,
}
