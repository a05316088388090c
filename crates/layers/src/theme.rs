use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" | "night" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// CSS-style brightness filter applied to the base map.
    pub fn map_brightness(self) -> f64 {
        match self {
            Theme::Light => 1.0,
            Theme::Dark => 0.9,
        }
    }
}
