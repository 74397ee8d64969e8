//! Shadow and blur effects.

use crate::record::StyleRecord;
use crate::units::px;
use scenec_core::{Diagnostic, Effect, EffectKind, NodeId, Shadow};

fn box_shadow(shadow: &Shadow, inset: bool) -> String {
    let value = format!(
        "{} {} {} {} {}",
        px(shadow.offset.x),
        px(shadow.offset.y),
        px(shadow.radius),
        px(shadow.spread),
        shadow.color.to_css()
    );
    if inset {
        format!("inset {}", value)
    } else {
        value
    }
}

fn text_shadow(shadow: &Shadow) -> String {
    format!(
        "{} {} {} {}",
        px(shadow.offset.x),
        px(shadow.offset.y),
        px(shadow.radius),
        shadow.color.to_css()
    )
}

/// Emit effect declarations, keeping document order within each property.
pub fn resolve_effects(
    id: &NodeId,
    effects: &[Effect],
    is_text: bool,
    record: &mut StyleRecord,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut shadows = Vec::new();
    let mut filters = Vec::new();
    let mut backdrop = Vec::new();

    for effect in effects.iter().filter(|effect| effect.visible) {
        match &effect.kind {
            EffectKind::DropShadow(shadow) if is_text => shadows.push(text_shadow(shadow)),
            EffectKind::DropShadow(shadow) => shadows.push(box_shadow(shadow, false)),
            EffectKind::InnerShadow(_) if is_text => {
                diagnostics.push(Diagnostic::warning(
                    id,
                    "unsupported: inner shadow on text, skipped",
                ));
            }
            EffectKind::InnerShadow(shadow) => shadows.push(box_shadow(shadow, true)),
            EffectKind::LayerBlur { radius } => filters.push(format!("blur({})", px(*radius))),
            EffectKind::BackgroundBlur { radius } => {
                backdrop.push(format!("blur({})", px(*radius)))
            }
            EffectKind::Unsupported(tag) => {
                diagnostics.push(Diagnostic::warning(
                    id,
                    format!("unsupported effect type `{}`, skipped", tag),
                ));
            }
        }
    }

    if !shadows.is_empty() {
        let property = if is_text { "text-shadow" } else { "box-shadow" };
        record.set(property, shadows.join(", "));
    }
    if !filters.is_empty() {
        record.set("filter", filters.join(" "));
    }
    if !backdrop.is_empty() {
        record.set("backdrop-filter", backdrop.join(" "));
    }
}
