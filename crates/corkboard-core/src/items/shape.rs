//! Shape item.

use serde::{Deserialize, Serialize};

use super::enums::{BorderStyle, FontFamily, ShapeForm, TextAlign, VerticalAlign};

/// Content of a geometric shape item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeData {
    /// Text rendered inside the shape.
    pub content: String,
    /// Geometric form.
    pub shape: ShapeForm,
}

/// Styling for a shape item. The richest style record of the set: border,
/// fill, and inner-text properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeStyle {
    pub border_color: String,
    /// Border opacity, 0.0 to 1.0.
    pub border_opacity: f64,
    pub border_style: BorderStyle,
    /// Border width in board units.
    pub border_width: f64,
    /// Inner text color.
    pub color: String,
    pub fill_color: String,
    /// Fill opacity, 0.0 to 1.0.
    pub fill_opacity: f64,
    pub font_size: f64,
    pub font_family: FontFamily,
    pub text_align: TextAlign,
    pub text_align_vertical: VerticalAlign,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            border_color: "#1a1a1a".to_string(),
            border_opacity: 1.0,
            border_style: BorderStyle::Normal,
            border_width: 2.0,
            color: "#1a1a1a".to_string(),
            fill_color: "#ffffff".to_string(),
            fill_opacity: 1.0,
            font_size: 14.0,
            font_family: FontFamily::Arial,
            text_align: TextAlign::Center,
            text_align_vertical: VerticalAlign::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_overrides_defaults() {
        let style: ShapeStyle =
            serde_json::from_str(r##"{"borderStyle":"dashed","fillColor":"#00ff00"}"##).unwrap();
        assert_eq!(style.border_style, BorderStyle::Dashed);
        assert_eq!(style.fill_color, "#00ff00");
        assert_eq!(style.border_width, 2.0);
        assert_eq!(style.text_align_vertical, VerticalAlign::Middle);
    }
}
