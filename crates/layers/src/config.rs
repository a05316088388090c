use std::path::Path;

use camera::{DEFAULT_EASE_DURATION_S, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, MercatorCamera};
use foundation::{GeoPosition, Insets};
use scene::FIT_PADDING;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config read failed: {msg}"),
            ConfigError::Parse(msg) => write!(f, "config parse failed: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Default for InitialView {
    fn default() -> Self {
        Self {
            latitude: -6.05,
            longitude: 106.8,
            zoom: 11.0,
        }
    }
}

/// Map page settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub initial_view: InitialView,
    /// Padding (logical px) used when framing all nodes.
    pub fit_padding: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub viewport_px: [f64; 2],
    pub ease_duration_s: f64,
    /// Whether the fishing-spot overlay starts visible.
    pub overlay_visible: bool,
    /// Clicking bare map closes the node popup.
    pub close_popup_on_map_click: bool,
    pub theme: Theme,
    pub max_pitch: f64,
    pub drag_rotate: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_view: InitialView::default(),
            fit_padding: FIT_PADDING,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            viewport_px: [1280.0, 720.0],
            ease_duration_s: DEFAULT_EASE_DURATION_S,
            overlay_visible: true,
            close_popup_on_map_click: true,
            theme: Theme::Light,
            max_pitch: 0.0,
            drag_rotate: false,
        }
    }
}

impl MapConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: MapConfig =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.initial_view;
        if !(v.latitude.is_finite() && v.longitude.is_finite() && v.zoom.is_finite()) {
            return Err(ConfigError::Invalid("initial_view must be finite".to_string()));
        }
        if !(self.min_zoom.is_finite() && self.max_zoom.is_finite()) || self.min_zoom > self.max_zoom
        {
            return Err(ConfigError::Invalid(format!(
                "zoom range {}..{} is empty",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.fit_padding.is_finite() && self.fit_padding >= 0.0) {
            return Err(ConfigError::Invalid(
                "fit_padding must be a non-negative number".to_string(),
            ));
        }
        if !self.viewport_px.iter().all(|d| d.is_finite() && *d > 0.0) {
            return Err(ConfigError::Invalid("viewport_px must be positive".to_string()));
        }
        if !(self.ease_duration_s.is_finite() && self.ease_duration_s >= 0.0) {
            return Err(ConfigError::Invalid(
                "ease_duration_s must be a non-negative number".to_string(),
            ));
        }
        if self.max_pitch != 0.0 || self.drag_rotate {
            return Err(ConfigError::Invalid(
                "the map is top-down only: max_pitch must be 0 and drag_rotate false".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fit_insets(&self) -> Insets {
        Insets::uniform(self.fit_padding)
    }

    /// The camera the map starts with.
    pub fn build_camera(&self) -> MercatorCamera {
        let v = self.initial_view;
        MercatorCamera::with_limits(
            GeoPosition::new(v.latitude, v.longitude),
            v.zoom,
            self.viewport_px,
            self.min_zoom,
            self.max_zoom,
        )
        .with_ease_duration(self.ease_duration_s)
    }
}
