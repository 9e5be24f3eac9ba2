//! Image item.

use serde::{Deserialize, Serialize};

/// Content of an image item. The image itself lives behind `image_url`;
/// the board only carries the reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageData {
    pub image_url: String,
    pub title: String,
    pub alt_text: String,
}

/// Styling for an image item. Currently empty; kept as a record so new
/// style fields can be added without a wire format change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageStyle {}
