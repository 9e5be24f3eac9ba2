//! Frame item.
//!
//! A frame is a container: other items placed inside it point back to it via
//! their `parentId`.

use serde::{Deserialize, Serialize};

use super::enums::FrameFormat;

/// Content of a frame item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameData {
    /// Frame title, shown above the frame.
    pub title: String,
    /// Whether the frame renders its children.
    pub show_content: bool,
    /// Preset format the frame was created with.
    pub format: FrameFormat,
}

impl Default for FrameData {
    fn default() -> Self {
        Self {
            title: String::new(),
            show_content: true,
            format: FrameFormat::Custom,
        }
    }
}

/// Styling for a frame item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameStyle {
    /// Background fill.
    pub fill_color: String,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            fill_color: "#f5f5f5".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_content_defaults_true() {
        let data: FrameData = serde_json::from_str("{}").unwrap();
        assert!(data.show_content);
        assert_eq!(data.format, FrameFormat::Custom);
    }
}
