//! Style resolution for scenec.
//!
//! Maps every walked node to a [`StyleRecord`] of CSS declarations without
//! touching the scene tree. Records are produced in walk order, one per node.
//!
//! Declaration groups, in emission order:
//! - Geometry from the node's layout context
//! - Flex container rules for auto-layout frames
//! - Fills, strokes, corner radius and effects
//! - Typography for text nodes, plus per-run records for style overrides
//! - Visibility, opacity and blend mode

mod effects;
mod geometry;
mod paint;
mod record;
mod runs;
mod typography;
pub mod units;

pub use paint::{composite_solids, gradient_css, linear_angle};
pub use record::StyleRecord;
pub use runs::{split_runs, TextRun};

use scenec_core::{Diagnostic, Diagnostics, NodeId, NodeKind, Paint, SceneNode, TextProps};
use scenec_layout::WalkEntry;

/// A text run with its resolved declarations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedRun {
    pub run: TextRun,
    /// Only the declarations that differ from the node's own record.
    /// Empty for base-style runs.
    pub record: StyleRecord,
}

/// The resolved style of one node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedNode {
    pub node_id: NodeId,
    pub record: StyleRecord,
    /// Text runs; empty for non-text nodes
    pub runs: Vec<ResolvedRun>,
}

/// Resolver output for one walk.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// One entry per walked node, in walk order
    pub nodes: Vec<ResolvedNode>,
    pub diagnostics: Diagnostics,
}

/// Computes style records for walked nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleResolver;

impl StyleResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve every entry of a walk.
    pub fn resolve<'a>(&self, entries: impl IntoIterator<Item = WalkEntry<'a>>) -> Resolution {
        let mut nodes = Vec::new();
        let mut diagnostics = Vec::new();
        for entry in entries {
            nodes.push(self.resolve_entry(&entry, &mut diagnostics));
        }
        tracing::debug!(
            nodes = nodes.len(),
            diagnostics = diagnostics.len(),
            "resolved styles"
        );
        Resolution {
            nodes,
            diagnostics: diagnostics.into(),
        }
    }

    /// Resolve a single entry, appending any diagnostics.
    pub fn resolve_entry(
        &self,
        entry: &WalkEntry<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ResolvedNode {
        let node = entry.node;
        let mut record = StyleRecord::new();

        geometry::resolve_geometry(entry, &mut record);
        if let Some(frame) = node.frame() {
            geometry::resolve_container(frame, &mut record);
        }

        let mut runs = Vec::new();
        match &node.kind {
            NodeKind::Frame(_) | NodeKind::Instance(_) | NodeKind::Shape(_) => {
                self.visual(node, false, &mut record, diagnostics);
            }
            NodeKind::Text(text) => {
                typography::paragraph_declarations(&text.style, &mut record);
                let base = text_record(&node.id, &text.style, &node.fills, diagnostics);
                self.visual(node, true, &mut record, diagnostics);
                record.merge(&base);
                runs = resolve_runs(node, text, &base, diagnostics);
            }
            NodeKind::Placeholder { .. } => {}
        }
        compositing(node, &mut record);

        ResolvedNode {
            node_id: node.id.clone(),
            record,
            runs,
        }
    }

    /// Strokes, radius and effects. Text fills are handled with typography.
    fn visual(
        &self,
        node: &SceneNode,
        is_text: bool,
        record: &mut StyleRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if !is_text {
            paint::resolve_fills(&node.id, &node.fills, false, record, diagnostics);
        }
        paint::resolve_strokes(
            &node.id,
            &node.strokes,
            node.stroke_weight,
            is_text,
            record,
            diagnostics,
        );
        geometry::resolve_radius(node, record);
        effects::resolve_effects(&node.id, &node.effects, is_text, record, diagnostics);
    }
}

/// Visibility, opacity and blend mode. Runs last so that `display: none`
/// replaces any flex display set earlier.
fn compositing(node: &SceneNode, record: &mut StyleRecord) {
    if !node.visible {
        record.set("display", "none");
    }
    if node.opacity < 1.0 {
        record.set("opacity", scenec_core::format_number(node.opacity.max(0.0)));
    }
    if let Some(keyword) = node.blend_mode.css_keyword() {
        record.set("mix-blend-mode", keyword);
    }
}

/// Font and fill declarations of a text style; shared by the base style and runs.
fn text_record(
    id: &NodeId,
    style: &scenec_core::TextStyle,
    fills: &[Paint],
    diagnostics: &mut Vec<Diagnostic>,
) -> StyleRecord {
    let mut record = StyleRecord::new();
    typography::font_declarations(style, &mut record);
    paint::resolve_fills(id, fills, true, &mut record, diagnostics);
    record
}

fn resolve_runs(
    node: &SceneNode,
    text: &TextProps,
    base: &StyleRecord,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ResolvedRun> {
    if !text.has_overrides() {
        return Vec::new();
    }
    split_runs(text)
        .into_iter()
        .map(|run| {
            let record = match text.override_table.get(&run.style_id) {
                Some(over) if run.style_id != 0 => {
                    let style = text.style.apply(over);
                    let record = match &over.fills {
                        Some(fills) => text_record(&node.id, &style, fills, diagnostics),
                        // Node fill problems are already reported by the base record.
                        None => text_record(&node.id, &style, &node.fills, &mut Vec::new()),
                    };
                    record.difference(base)
                }
                _ => StyleRecord::new(),
            };
            ResolvedRun { run, record }
        })
        .collect()
}
