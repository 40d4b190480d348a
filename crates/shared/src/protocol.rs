use serde::{Deserialize, Serialize};

/// Navigation request carried by a clickable node or a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourAction {
    Next,
    Previous,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Escape,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value, including the legacy names
    /// older engines report.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }

    pub fn action(&self) -> Option<TourAction> {
        match self {
            Key::ArrowRight => Some(TourAction::Next),
            Key::ArrowLeft => Some(TourAction::Previous),
            Key::Escape => Some(TourAction::Stop),
            Key::Other(_) => None,
        }
    }
}
