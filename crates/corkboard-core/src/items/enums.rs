//! Closed enumerations used by item data and style records.
//!
//! These are pure data: the set of values the server accepts for alignment,
//! styling and per-kind shape options. Wire names are snake_case.

use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Font family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Arial (default).
    #[default]
    Arial,
    /// Open Sans.
    OpenSans,
    /// Roboto.
    Roboto,
    /// Noto Sans.
    NotoSans,
    /// Monospace.
    Mono,
}

impl FontFamily {
    /// Get the font family name as used by the renderer.
    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::OpenSans => "Open Sans",
            FontFamily::Roboto => "Roboto",
            FontFamily::NotoSans => "Noto Sans",
            FontFamily::Mono => "Monospace",
        }
    }

    /// Get all available font families.
    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Arial,
            FontFamily::OpenSans,
            FontFamily::Roboto,
            FontFamily::NotoSans,
            FontFamily::Mono,
        ]
    }
}

/// Border stroke style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    #[default]
    Normal,
    Dashed,
    Dotted,
}

/// Geometric form of a `shape` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeForm {
    #[default]
    Rectangle,
    RoundRectangle,
    Circle,
    Triangle,
    Rhombus,
    Parallelogram,
    Star,
    ArrowRight,
}

impl ShapeForm {
    /// Get all available shape forms.
    pub fn all() -> &'static [ShapeForm] {
        &[
            ShapeForm::Rectangle,
            ShapeForm::RoundRectangle,
            ShapeForm::Circle,
            ShapeForm::Triangle,
            ShapeForm::Rhombus,
            ShapeForm::Parallelogram,
            ShapeForm::Star,
            ShapeForm::ArrowRight,
        ]
    }
}

/// Aspect of a sticky note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickyShape {
    #[default]
    Square,
    Rectangle,
}

/// Preset frame formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameFormat {
    #[default]
    Custom,
    Desktop,
    Phone,
    A4,
    Letter,
}

/// Connection status of a card to its upstream app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    #[default]
    Disconnected,
    Connected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_wire_names() {
        assert_eq!(serde_json::to_string(&TextAlign::Left).unwrap(), "\"left\"");
        assert_eq!(
            serde_json::to_string(&FontFamily::OpenSans).unwrap(),
            "\"open_sans\""
        );
        assert_eq!(
            serde_json::to_string(&ShapeForm::RoundRectangle).unwrap(),
            "\"round_rectangle\""
        );
        assert_eq!(serde_json::to_string(&FrameFormat::A4).unwrap(), "\"a4\"");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TextAlign::default(), TextAlign::Center);
        assert_eq!(VerticalAlign::default(), VerticalAlign::Middle);
        assert_eq!(FontFamily::default(), FontFamily::Arial);
        assert_eq!(BorderStyle::default(), BorderStyle::Normal);
        assert_eq!(StickyShape::default(), StickyShape::Square);
    }

    #[test]
    fn test_unknown_value_is_an_error() {
        // The registry is a closed set; values outside it do not parse.
        assert!(serde_json::from_str::<TextAlign>("\"justified\"").is_err());
    }
}
