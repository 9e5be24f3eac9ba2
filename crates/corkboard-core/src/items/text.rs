//! Text item.

use serde::{Deserialize, Serialize};

use super::enums::{FontFamily, TextAlign};

/// Content of a free-standing text item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextData {
    /// The text content.
    pub content: String,
}

/// Styling for a text item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    /// Text color.
    pub color: String,
    /// Background fill color behind the text.
    pub fill_color: String,
    /// Background fill opacity, 0.0 to 1.0.
    pub fill_opacity: f64,
    /// Font size in board units.
    pub font_size: f64,
    pub font_family: FontFamily,
    pub text_align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: "#1a1a1a".to_string(),
            fill_color: "transparent".to_string(),
            fill_opacity: 1.0,
            font_size: 14.0,
            font_family: FontFamily::Arial,
            text_align: TextAlign::Center,
        }
    }
}
