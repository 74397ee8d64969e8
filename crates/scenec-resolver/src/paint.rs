//! Fill and stroke resolution.

use crate::record::StyleRecord;
use crate::units::{deg, percent, px};
use glam::DVec2;
use scenec_core::defaults;
use scenec_core::{Color, Diagnostic, Gradient, GradientKind, NodeId, Paint, PaintKind, ScaleMode};

/// One background layer after validation.
#[derive(Debug, Clone, PartialEq)]
enum Layer {
    Solid(Color),
    Css(String),
}

/// Composite solid paints bottom-to-top into one color.
pub fn composite_solids<'a>(paints: impl IntoIterator<Item = &'a Paint>) -> Color {
    paints
        .into_iter()
        .filter_map(|paint| match &paint.kind {
            PaintKind::Solid(color) => Some(color.with_opacity(paint.opacity)),
            _ => None,
        })
        .fold(Color::TRANSPARENT, |acc, color| color.over(acc))
}

/// CSS angle of a linear gradient from its first two handles.
///
/// Handles live in normalized node space with y pointing down; CSS measures
/// clockwise from "to top".
pub fn linear_angle(handles: &[DVec2]) -> f64 {
    match handles {
        [start, end, ..] => {
            let d = *end - *start;
            if d.length_squared() == 0.0 {
                return defaults::LINEAR_GRADIENT_ANGLE;
            }
            let angle = d.x.atan2(-d.y).to_degrees();
            if angle < 0.0 {
                angle + 360.0
            } else {
                angle
            }
        }
        _ => defaults::LINEAR_GRADIENT_ANGLE,
    }
}

/// CSS gradient function for a gradient paint.
///
/// Returns the problem as `Err` when the stops cannot be emitted.
pub fn gradient_css(gradient: &Gradient, opacity: f64) -> Result<String, String> {
    if gradient.stops.is_empty() {
        return Err("gradient has no color stops".to_string());
    }
    if !gradient.is_monotone() {
        return Err("gradient stops are not in non-decreasing position order".to_string());
    }

    let stops = gradient
        .stops
        .iter()
        .map(|stop| {
            format!(
                "{} {}",
                stop.color.with_opacity(opacity).to_css(),
                percent(stop.position.clamp(0.0, 1.0))
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    Ok(match gradient.kind {
        GradientKind::Linear => {
            format!("linear-gradient({}, {})", deg(linear_angle(&gradient.handles)), stops)
        }
        GradientKind::Radial | GradientKind::Diamond => {
            format!("radial-gradient(circle, {})", stops)
        }
        GradientKind::Angular => format!("conic-gradient({})", stops),
    })
}

fn image_layer(reference: &str, scale_mode: ScaleMode) -> String {
    let url = format!("url(\"{}\")", reference.replace('"', "%22"));
    match scale_mode {
        ScaleMode::Fill | ScaleMode::Crop => format!("{} center / cover no-repeat", url),
        ScaleMode::Fit => format!("{} center / contain no-repeat", url),
        ScaleMode::Tile => format!("{} center / auto repeat", url),
    }
}

fn layers(id: &NodeId, paints: &[Paint], diagnostics: &mut Vec<Diagnostic>) -> Vec<Layer> {
    paints
        .iter()
        .filter(|paint| paint.visible)
        .filter_map(|paint| match &paint.kind {
            PaintKind::Solid(color) => Some(Layer::Solid(color.with_opacity(paint.opacity))),
            PaintKind::Gradient(gradient) => match gradient_css(gradient, paint.opacity) {
                Ok(css) => Some(Layer::Css(css)),
                Err(problem) => {
                    diagnostics.push(Diagnostic::warning(id, format!("{}, layer skipped", problem)));
                    None
                }
            },
            PaintKind::Image {
                reference,
                scale_mode,
            } => Some(Layer::Css(image_layer(reference, *scale_mode))),
            PaintKind::Unsupported(tag) => {
                diagnostics.push(Diagnostic::warning(
                    id,
                    format!("unsupported paint type `{}`, skipped", tag),
                ));
                None
            }
        })
        .collect()
}

/// Emit fill declarations.
///
/// All-solid fills collapse to one composited color. Anything else becomes a
/// layered `background`, topmost first.
pub fn resolve_fills(
    id: &NodeId,
    fills: &[Paint],
    is_text: bool,
    record: &mut StyleRecord,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let layers = layers(id, fills, diagnostics);
    if layers.is_empty() {
        return;
    }

    if layers.iter().all(|layer| matches!(layer, Layer::Solid(_))) {
        let color = layers
            .iter()
            .fold(Color::TRANSPARENT, |acc, layer| match layer {
                Layer::Solid(color) => color.over(acc),
                Layer::Css(_) => acc,
            })
            .to_css();
        record.set(if is_text { "color" } else { "background-color" }, color);
        return;
    }

    let background = layers
        .iter()
        .rev()
        .map(|layer| match layer {
            Layer::Solid(color) => {
                let css = color.to_css();
                format!("linear-gradient({}, {})", css, css)
            }
            Layer::Css(css) => css.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    record.set("background", background);
    if is_text {
        record.set("background-clip", "text");
        record.set("color", "transparent");
    }
}

/// Emit the border for the first visible stroke.
pub fn resolve_strokes(
    id: &NodeId,
    strokes: &[Paint],
    weight: f64,
    is_text: bool,
    record: &mut StyleRecord,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut visible = strokes.iter().filter(|paint| paint.visible);
    let Some(first) = visible.next() else {
        return;
    };
    if visible.next().is_some() {
        diagnostics.push(Diagnostic::warning(id, "unsupported: multiple strokes"));
    }
    if weight <= 0.0 {
        return;
    }

    match &first.kind {
        PaintKind::Solid(color) => {
            let color = color.with_opacity(first.opacity).to_css();
            if is_text {
                record.set("-webkit-text-stroke", format!("{} {}", px(weight), color));
            } else {
                record.set("border", format!("{} solid {}", px(weight), color));
            }
        }
        PaintKind::Gradient(gradient) if !is_text => match gradient_css(gradient, first.opacity) {
            Ok(css) => {
                record.set("border", format!("{} solid transparent", px(weight)));
                record.set("border-image", format!("{} 1", css));
            }
            Err(problem) => {
                diagnostics.push(Diagnostic::warning(id, format!("{}, stroke skipped", problem)));
            }
        },
        PaintKind::Gradient(_) => {
            diagnostics.push(Diagnostic::warning(id, "unsupported: gradient text stroke"));
        }
        PaintKind::Image { .. } => {
            diagnostics.push(Diagnostic::warning(id, "unsupported: image stroke"));
        }
        PaintKind::Unsupported(tag) => {
            diagnostics.push(Diagnostic::warning(
                id,
                format!("unsupported paint type `{}`, stroke skipped", tag),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenec_core::GradientStop;

    fn stops(positions: &[f64]) -> Vec<GradientStop> {
        positions
            .iter()
            .map(|position| GradientStop {
                position: *position,
                color: Color::WHITE,
            })
            .collect()
    }

    fn gradient(kind: GradientKind, positions: &[f64]) -> Paint {
        Paint {
            kind: PaintKind::Gradient(Gradient {
                kind,
                stops: stops(positions),
                handles: Default::default(),
            }),
            opacity: 1.0,
            visible: true,
        }
    }

    fn id() -> NodeId {
        NodeId::from("1:1")
    }

    #[test]
    fn test_solid_fills_composite() {
        let fills = vec![
            Paint::solid(Color::rgb(1.0, 0.0, 0.0)),
            Paint::solid(Color::rgb(0.0, 0.0, 1.0)).with_opacity(0.5),
        ];
        let mut record = StyleRecord::new();
        let mut diagnostics = Vec::new();
        resolve_fills(&id(), &fills, false, &mut record, &mut diagnostics);

        let expected = Color::rgba(0.0, 0.0, 1.0, 0.5)
            .over(Color::rgb(1.0, 0.0, 0.0))
            .to_css();
        assert_eq!(record.get("background-color"), Some(expected.as_str()));
        assert_eq!(record.get("background-color"), Some("#800080"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_hidden_fills_ignored() {
        let mut hidden = Paint::solid(Color::BLACK);
        hidden.visible = false;
        let mut record = StyleRecord::new();
        resolve_fills(&id(), &[hidden], false, &mut record, &mut Vec::new());
        assert!(record.is_empty());
    }

    #[test]
    fn test_mixed_fills_layer_topmost_first() {
        let fills = vec![
            Paint::solid(Color::rgb(1.0, 0.0, 0.0)),
            gradient(GradientKind::Radial, &[0.0, 1.0]),
        ];
        let mut record = StyleRecord::new();
        resolve_fills(&id(), &fills, false, &mut record, &mut Vec::new());

        let background = record.get("background").unwrap();
        assert!(background.starts_with("radial-gradient(circle, #FFFFFF 0%, #FFFFFF 100%)"));
        assert!(background.ends_with("linear-gradient(#FF0000, #FF0000)"));
        assert!(!record.contains("background-color"));
    }

    #[test]
    fn test_text_gradient_clips_to_glyphs() {
        let mut record = StyleRecord::new();
        resolve_fills(
            &id(),
            &[gradient(GradientKind::Angular, &[0.0, 0.5])],
            true,
            &mut record,
            &mut Vec::new(),
        );
        assert_eq!(
            record.get("background"),
            Some("conic-gradient(#FFFFFF 0%, #FFFFFF 50%)")
        );
        assert_eq!(record.get("background-clip"), Some("text"));
        assert_eq!(record.get("color"), Some("transparent"));
    }

    #[test]
    fn test_non_monotone_gradient_skipped_with_warning() {
        let mut record = StyleRecord::new();
        let mut diagnostics = Vec::new();
        resolve_fills(
            &id(),
            &[gradient(GradientKind::Linear, &[0.8, 0.2])],
            false,
            &mut record,
            &mut diagnostics,
        );
        assert!(record.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("non-decreasing"));
    }

    #[test]
    fn test_linear_angle_from_handles() {
        assert_eq!(linear_angle(&[]), 180.0);
        let left_to_right = [DVec2::new(0.0, 0.5), DVec2::new(1.0, 0.5)];
        assert!((linear_angle(&left_to_right) - 90.0).abs() < 1e-9);
        let bottom_to_top = [DVec2::new(0.5, 1.0), DVec2::new(0.5, 0.0)];
        assert!(linear_angle(&bottom_to_top).abs() < 1e-9);
    }

    #[test]
    fn test_image_fill_scale_modes() {
        let image = |scale_mode| Paint {
            kind: PaintKind::Image {
                reference: "abc123".to_string(),
                scale_mode,
            },
            opacity: 1.0,
            visible: true,
        };
        let mut record = StyleRecord::new();
        resolve_fills(&id(), &[image(ScaleMode::Fit)], false, &mut record, &mut Vec::new());
        assert_eq!(
            record.get("background"),
            Some("url(\"abc123\") center / contain no-repeat")
        );

        resolve_fills(&id(), &[image(ScaleMode::Tile)], false, &mut record, &mut Vec::new());
        assert_eq!(record.get("background"), Some("url(\"abc123\") center / auto repeat"));
    }

    #[test]
    fn test_first_stroke_only() {
        let strokes = vec![
            Paint::solid(Color::BLACK),
            Paint::solid(Color::WHITE),
            Paint::solid(Color::WHITE),
        ];
        let mut record = StyleRecord::new();
        let mut diagnostics = Vec::new();
        resolve_strokes(&id(), &strokes, 2.0, false, &mut record, &mut diagnostics);

        assert_eq!(record.get("border"), Some("2px solid #000000"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "unsupported: multiple strokes");
    }

    #[test]
    fn test_gradient_stroke_uses_border_image() {
        let mut record = StyleRecord::new();
        resolve_strokes(
            &id(),
            &[gradient(GradientKind::Linear, &[0.0, 1.0])],
            1.0,
            false,
            &mut record,
            &mut Vec::new(),
        );
        assert_eq!(record.get("border"), Some("1px solid transparent"));
        assert_eq!(
            record.get("border-image"),
            Some("linear-gradient(180deg, #FFFFFF 0%, #FFFFFF 100%) 1")
        );
    }
}
