//! Text style declarations.

use crate::record::StyleRecord;
use crate::units::{percent, px, quoted};
use scenec_core::{
    format_number, LineHeight, TextAlignHorizontal, TextAlignVertical, TextCase, TextDecoration,
    TextStyle,
};

/// Character-level declarations: the ones a text run may override.
pub fn font_declarations(style: &TextStyle, record: &mut StyleRecord) {
    record.set("font-family", quoted(&style.font_family));
    record.set("font-weight", format_number(style.font_weight));
    record.set("font-size", px(style.font_size));
    match style.line_height {
        LineHeight::Normal => {}
        LineHeight::Px(value) => record.set("line-height", px(value)),
        LineHeight::Percent(value) => record.set("line-height", percent(value / 100.0)),
    }
    if style.letter_spacing != 0.0 {
        record.set("letter-spacing", px(style.letter_spacing));
    }
    if style.italic {
        record.set("font-style", "italic");
    }
    match style.case {
        TextCase::Original => {}
        TextCase::Upper => record.set("text-transform", "uppercase"),
        TextCase::Lower => record.set("text-transform", "lowercase"),
        TextCase::Title => record.set("text-transform", "capitalize"),
    }
    match style.decoration {
        TextDecoration::None => {}
        TextDecoration::Underline => record.set("text-decoration", "underline"),
        TextDecoration::Strikethrough => record.set("text-decoration", "line-through"),
    }
}

/// Paragraph-level declarations: alignment of the whole text box.
pub fn paragraph_declarations(style: &TextStyle, record: &mut StyleRecord) {
    match style.align_horizontal {
        TextAlignHorizontal::Left => {}
        TextAlignHorizontal::Right => record.set("text-align", "right"),
        TextAlignHorizontal::Center => record.set("text-align", "center"),
        TextAlignHorizontal::Justified => record.set("text-align", "justify"),
    }
    let justify = match style.align_vertical {
        TextAlignVertical::Top => None,
        TextAlignVertical::Center => Some("center"),
        TextAlignVertical::Bottom => Some("flex-end"),
    };
    if let Some(justify) = justify {
        record.set("display", "flex");
        record.set("flex-direction", "column");
        record.set("justify-content", justify);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_font() {
        let mut style = TextStyle::new("Inter", 600.0, 14.0);
        style.line_height = LineHeight::Percent(150.0);
        style.letter_spacing = -0.25;
        let mut record = StyleRecord::new();
        font_declarations(&style, &mut record);

        assert_eq!(record.get("font-family"), Some("\"Inter\""));
        assert_eq!(record.get("font-weight"), Some("600"));
        assert_eq!(record.get("font-size"), Some("14px"));
        assert_eq!(record.get("line-height"), Some("150%"));
        assert_eq!(record.get("letter-spacing"), Some("-0.25px"));
        assert!(!record.contains("font-style"));
    }

    #[test]
    fn test_case_and_decoration() {
        let mut style = TextStyle::new("Inter", 400.0, 16.0);
        style.case = TextCase::Upper;
        style.decoration = TextDecoration::Strikethrough;
        style.italic = true;
        let mut record = StyleRecord::new();
        font_declarations(&style, &mut record);

        assert_eq!(record.get("text-transform"), Some("uppercase"));
        assert_eq!(record.get("text-decoration"), Some("line-through"));
        assert_eq!(record.get("font-style"), Some("italic"));
    }

    #[test]
    fn test_vertical_alignment() {
        let mut style = TextStyle::new("Inter", 400.0, 16.0);
        style.align_horizontal = TextAlignHorizontal::Center;
        style.align_vertical = TextAlignVertical::Bottom;
        let mut record = StyleRecord::new();
        paragraph_declarations(&style, &mut record);

        assert_eq!(record.get("text-align"), Some("center"));
        assert_eq!(record.get("flex-direction"), Some("column"));
        assert_eq!(record.get("justify-content"), Some("flex-end"));
    }
}
