//! Splitting text into non-overlapping style runs.

use scenec_core::TextProps;
use std::ops::Range;

/// A contiguous span of text sharing one style id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    /// Character (Unicode scalar) range into the source string
    pub range: Range<usize>,
    pub text: String,
    /// Override table id; 0 is the base style
    pub style_id: u32,
}

/// Split `text.characters` into the minimal ordered list of runs.
///
/// Per-character ids come first, then explicit ranges in order, later ranges
/// winning where they overlap. Ids missing from the override table fall back
/// to the base style. Adjacent characters with the same id share a run, so
/// consecutive runs always differ in `style_id`. Concatenating the runs
/// reproduces the original string.
pub fn split_runs(text: &TextProps) -> Vec<TextRun> {
    let chars: Vec<char> = text.characters.chars().collect();
    let len = chars.len();

    let mut ids = vec![0u32; len];
    for (slot, id) in ids.iter_mut().zip(&text.character_overrides) {
        *slot = *id;
    }
    for range in &text.override_ranges {
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start < end {
            ids[start..end].fill(range.style_id);
        }
    }
    for id in ids.iter_mut() {
        if *id != 0 && !text.override_table.contains_key(id) {
            *id = 0;
        }
    }

    let mut runs = Vec::new();
    let mut start = 0;
    while start < len {
        let style_id = ids[start];
        let end = ids[start..]
            .iter()
            .position(|id| *id != style_id)
            .map_or(len, |offset| start + offset);
        runs.push(TextRun {
            range: start..end,
            text: chars[start..end].iter().collect(),
            style_id,
        });
        start = end;
    }
    runs
}
