use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowest opacity the widget accepts, in percent
pub const MIN_OPACITY: u8 = 20;
/// Highest opacity, in percent
pub const MAX_OPACITY: u8 = 100;

/// Widget preferences from yellowstrip.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub opacity: Opacity,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Top-left corner of the widget in terminal cells.
/// Unset coordinates mean "use the default placement".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<u16>,
}

impl Position {
    pub fn at(x: u16, y: u16) -> Self {
        Position {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Both coordinates, if both were saved
    pub fn coords(&self) -> Option<(u16, u16)> {
        Some((self.x?, self.y?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opacity {
    /// Background opacity in percent
    #[serde(default = "default_opacity")]
    pub opacity: u8,
}

impl Default for Opacity {
    fn default() -> Self {
        Opacity {
            opacity: default_opacity(),
        }
    }
}

impl Opacity {
    /// Percent clamped into the accepted range
    pub fn percent(&self) -> u8 {
        self.opacity.clamp(MIN_OPACITY, MAX_OPACITY)
    }

    /// Step the opacity by `delta` percent, staying in range
    pub fn adjust(&mut self, delta: i16) {
        let next = (self.percent() as i16 + delta).clamp(MIN_OPACITY as i16, MAX_OPACITY as i16);
        self.opacity = next as u8;
    }
}

fn default_opacity() -> u8 {
    90
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `text = "#E0E0E0"`)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub colors: HashMap<String, String>,
}
