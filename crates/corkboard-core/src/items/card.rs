//! Card and app card items.
//!
//! Both kinds share the same data record; they differ in styling (a plain
//! card has a theme color, an app card has a background) and in how the
//! presentation layer renders them.

use serde::{Deserialize, Serialize};

use super::enums::CardStatus;

/// Content shared by `card` and `app_card` items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardData {
    pub title: String,
    pub description: String,
    /// Due date as an ISO-8601 date string, if set.
    pub due_date: Option<String>,
    /// Id of the assigned user, if any.
    pub assignee_id: Option<String>,
    pub status: CardStatus,
}

/// Styling for a plain card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardStyle {
    /// Accent color of the card edge.
    pub card_theme: String,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            card_theme: "#2399f3".to_string(),
        }
    }
}

/// Styling for an app card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppCardStyle {
    pub background: String,
}

impl Default for AppCardStyle {
    fn default() -> Self {
        Self {
            background: "#2399f3".to_string(),
        }
    }
}
