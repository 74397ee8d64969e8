//! CSS value formatting.

use scenec_core::{format_number, CornerRadius, Padding};

/// A length in pixels, rounded to 0.01.
pub fn px(value: f64) -> String {
    format!("{}px", format_number(value))
}

/// A percentage of a unit interval value (`0.25` → `25%`).
pub fn percent(fraction: f64) -> String {
    format!("{}%", format_number(fraction * 100.0))
}

pub fn deg(angle: f64) -> String {
    format!("{}deg", format_number(angle))
}

/// Padding shorthand, collapsed to one value when uniform.
pub fn padding(padding: &Padding) -> String {
    if padding.is_uniform() {
        px(padding.top)
    } else {
        format!(
            "{} {} {} {}",
            px(padding.top),
            px(padding.right),
            px(padding.bottom),
            px(padding.left)
        )
    }
}

/// `border-radius` value; per-corner arrays keep their order
/// (top-left, top-right, bottom-right, bottom-left).
pub fn radius(radius: &CornerRadius) -> String {
    match radius {
        CornerRadius::Uniform(r) => px(*r),
        CornerRadius::PerCorner([tl, tr, br, bl]) => {
            format!("{} {} {} {}", px(*tl), px(*tr), px(*br), px(*bl))
        }
    }
}

/// Quote a font family name.
pub fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
