//! Layout context inherited from the nearest ancestor frame.

use glam::DVec2;
use scenec_core::{LayoutMode, SceneNode};

/// Main axis of an auto-layout parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowDirection {
    /// Horizontal layout (left to right)
    Row,
    /// Vertical layout (top to bottom)
    Column,
}

impl FlowDirection {
    pub fn from_layout_mode(mode: LayoutMode) -> Option<Self> {
        match mode {
            LayoutMode::None => None,
            LayoutMode::Horizontal => Some(Self::Row),
            LayoutMode::Vertical => Some(Self::Column),
        }
    }

    /// The `flex-direction` keyword.
    pub fn css_keyword(&self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }
}

/// How a node is placed by its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutContext {
    /// A top-level node of the compiled tree
    Root,
    /// Participates in the parent's auto-layout flow
    Flow { direction: FlowDirection },
    /// Positioned explicitly at an origin offset from the parent's box
    Absolute { offset: DVec2 },
}

impl LayoutContext {
    /// Context of `child` placed inside `parent`.
    pub fn for_child(parent: &SceneNode, child: &SceneNode) -> Self {
        let direction = parent
            .frame()
            .and_then(|frame| FlowDirection::from_layout_mode(frame.layout_mode));
        match direction {
            Some(direction) => Self::Flow { direction },
            None => Self::Absolute {
                offset: child.bounds.offset_from(&parent.bounds),
            },
        }
    }

    pub fn is_flow(&self) -> bool {
        matches!(self, Self::Flow { .. })
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}
