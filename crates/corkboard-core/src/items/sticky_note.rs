//! Sticky note item.

use serde::{Deserialize, Serialize};

use super::enums::{FontFamily, StickyShape, TextAlign, VerticalAlign};

/// Content of a sticky note.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickyNoteData {
    pub content: String,
    pub shape: StickyShape,
}

/// Styling for a sticky note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickyNoteStyle {
    pub fill_color: String,
    pub font_size: f64,
    pub font_family: FontFamily,
    pub text_align: TextAlign,
    pub text_align_vertical: VerticalAlign,
}

impl Default for StickyNoteStyle {
    fn default() -> Self {
        Self {
            fill_color: "#fff9b1".to_string(),
            font_size: 14.0,
            font_family: FontFamily::Arial,
            text_align: TextAlign::Center,
            text_align_vertical: VerticalAlign::Middle,
        }
    }
}
